//! HTTP client for the remote gallery API.

use color_eyre::{eyre::eyre, Result};
use reqwest::multipart;
use url::Url;

use crate::config::Config;
use crate::gallery::types::{Category, Image, NewImage};

/// Gallery API client wrapper
#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  base_url: Url,
}

impl ApiClient {
  pub fn new(config: &Config) -> Result<Self> {
    let base_url = Url::parse(&config.api.base_url)
      .map_err(|e| eyre!("Invalid API base URL {}: {}", config.api.base_url, e))?;

    Ok(Self {
      http: reqwest::Client::new(),
      base_url,
    })
  }

  /// Build an endpoint URL by appending path segments to the base URL.
  fn endpoint(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|_| eyre!("API base URL cannot be a base: {}", self.base_url))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  /// Fetch all categories. The remote is read-only seed data for them.
  pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
    let url = self.endpoint(&["categories"])?;

    let response = self
      .http
      .get(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to fetch categories: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Failed to fetch categories: {}", e))?;

    response
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse categories: {}", e))
  }

  /// Fetch all images
  pub async fn fetch_images(&self) -> Result<Vec<Image>> {
    let url = self.endpoint(&["images"])?;

    let response = self
      .http
      .get(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to fetch images: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Failed to fetch images: {}", e))?;

    response
      .json()
      .await
      .map_err(|e| eyre!("Failed to parse images: {}", e))
  }

  /// Upload an image as multipart form data.
  ///
  /// The response body is not interpreted; a success status is the signal.
  pub async fn upload_image(&self, image: &NewImage) -> Result<()> {
    let url = self.endpoint(&["images"])?;

    let bytes = tokio::fs::read(&image.file)
      .await
      .map_err(|e| eyre!("Failed to read {}: {}", image.file.display(), e))?;

    let file_name = image
      .file
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "upload".to_string());

    let form = multipart::Form::new()
      .text("name", image.name.clone())
      .text("category", image.category_id.to_string())
      .part("file", multipart::Part::bytes(bytes).file_name(file_name));

    self
      .http
      .post(url)
      .multipart(form)
      .send()
      .await
      .map_err(|e| eyre!("Failed to upload image: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Failed to upload image: {}", e))?;

    Ok(())
  }

  /// Delete an image by id
  pub async fn delete_image(&self, id: u64) -> Result<()> {
    let id = id.to_string();
    let url = self.endpoint(&["images", &id])?;

    self
      .http
      .delete(url)
      .send()
      .await
      .map_err(|e| eyre!("Failed to delete image {}: {}", id, e))?
      .error_for_status()
      .map_err(|e| eyre!("Failed to delete image {}: {}", id, e))?;

    Ok(())
  }
}
