use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Base URL of the demo gallery API
const DEFAULT_BASE_URL: &str = "https://my-json-server.typicode.com/MostafaKMilly/demo";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  /// Directory for the store database and log file (defaults to the
  /// platform data directory)
  pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  #[serde(default = "default_base_url")]
  pub base_url: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
    }
  }
}

fn default_base_url() -> String {
  DEFAULT_BASE_URL.to_string()
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./g9s.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/g9s/config.yaml
  ///
  /// Every field has a default, so no file at all yields the default config.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    if let Some(p) = explicit_path {
      // An explicitly named file must exist; silently falling back to
      // defaults would hide a typo in the path
      if !p.exists() {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
      return Self::load_from_path(p);
    }

    match Self::find_config_file() {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("g9s.yaml");
    if local.exists() {
      return Some(local);
    }

    dirs::config_dir()
      .map(|dir| dir.join("g9s").join("config.yaml"))
      .filter(|p| p.exists())
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Cannot read config {}: {}", path.display(), e))?;
    serde_yaml::from_str(&text).map_err(|e| eyre!("Invalid YAML in {}: {}", path.display(), e))
  }

  /// Resolve the directory holding the store database and log file.
  pub fn resolve_data_dir(&self) -> Result<PathBuf> {
    if let Some(dir) = &self.data_dir {
      return Ok(dir.clone());
    }

    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| eyre!("Could not determine data directory"))?;

    Ok(data_dir.join("g9s"))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_when_fields_absent() {
    let config: Config = serde_yaml::from_str("data_dir: /tmp/g9s-test").unwrap();
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/g9s-test")));
  }

  #[test]
  fn test_base_url_override() {
    let yaml = "api:\n  base_url: http://localhost:3000/demo\n";
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.api.base_url, "http://localhost:3000/demo");
  }

  #[test]
  fn test_explicit_missing_path_errors() {
    let result = Config::load(Some(Path::new("/nonexistent/g9s.yaml")));
    assert!(result.is_err());
  }

  #[test]
  fn test_configured_data_dir_wins() {
    let config = Config {
      data_dir: Some(PathBuf::from("/tmp/g9s-data")),
      ..Default::default()
    };
    assert_eq!(
      config.resolve_data_dir().unwrap(),
      PathBuf::from("/tmp/g9s-data")
    );
  }
}
