//! Domain types for the gallery collections.
//!
//! The serialized shapes (camelCase field names) match both the remote API
//! payloads and the stored category snapshots, so the same types serve as
//! wire and storage records.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A gallery category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
  pub id: u64,
  pub name: String,
  pub description: Option<String>,
  pub image: String,
}

/// A gallery image record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
  pub id: u64,
  pub name: String,
  pub url: String,
  #[serde(rename = "uploadDate")]
  pub upload_date: String,
  pub metadata: ImageMetadata,
  #[serde(rename = "categoryId")]
  pub category_id: u64,
}

/// Image file metadata as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
  /// Unit-suffixed size string, e.g. "2.5MB" or "800KB"
  pub size: String,
  pub resolution: String,
}

/// Fields for a category to be created; the id is allocated on insert
#[derive(Debug, Clone)]
pub struct NewCategory {
  pub name: String,
  pub description: Option<String>,
  pub image: String,
}

/// Partial category update; absent fields are left unchanged.
/// The id is immutable by construction: there is no field for it.
///
/// Description is doubly optional: the outer Option is "provided or not",
/// the inner one distinguishes setting a description from clearing it.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
  pub name: Option<String>,
  pub description: Option<Option<String>>,
  pub image: Option<String>,
}

impl CategoryPatch {
  /// Shallow-merge this patch into a category.
  pub fn apply(&self, category: &mut Category) {
    if let Some(name) = &self.name {
      category.name = name.clone();
    }
    if let Some(description) = &self.description {
      category.description = description.clone();
    }
    if let Some(image) = &self.image {
      category.image = image.clone();
    }
  }
}

/// Fields for an image upload
#[derive(Debug, Clone)]
pub struct NewImage {
  pub name: String,
  pub category_id: u64,
  pub file: PathBuf,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_image_wire_field_names() {
    let image = Image {
      id: 3,
      name: "Sunset".to_string(),
      url: "https://example.com/sunset.jpg".to_string(),
      upload_date: "2023-01-15".to_string(),
      metadata: ImageMetadata {
        size: "2.5MB".to_string(),
        resolution: "1920x1080".to_string(),
      },
      category_id: 1,
    };

    let json = serde_json::to_value(&image).unwrap();
    assert_eq!(json["uploadDate"], "2023-01-15");
    assert_eq!(json["categoryId"], 1);
  }

  #[test]
  fn test_category_missing_description_deserializes() {
    let category: Category =
      serde_json::from_str(r#"{"id":1,"name":"Nature","image":"nature.jpg"}"#).unwrap();
    assert_eq!(category.description, None);
  }

  #[test]
  fn test_patch_apply_overwrites_present_fields_only() {
    let mut category = Category {
      id: 1,
      name: "Nature".to_string(),
      description: Some("Outdoors".to_string()),
      image: "nature.jpg".to_string(),
    };

    let patch = CategoryPatch {
      name: Some("Wildlife".to_string()),
      ..Default::default()
    };
    patch.apply(&mut category);

    assert_eq!(category.name, "Wildlife");
    assert_eq!(category.description.as_deref(), Some("Outdoors"));
    assert_eq!(category.image, "nature.jpg");
    assert_eq!(category.id, 1);
  }

  #[test]
  fn test_patch_can_clear_description() {
    let mut category = Category {
      id: 1,
      name: "Nature".to_string(),
      description: Some("Outdoors".to_string()),
      image: "nature.jpg".to_string(),
    };

    let patch = CategoryPatch {
      description: Some(None),
      ..Default::default()
    };
    patch.apply(&mut category);

    assert_eq!(category.description, None);
    assert_eq!(category.name, "Nature");
  }
}
