//! Configuration for the remote analysis backend
//!
//! The external vision service is reached at a fixed address with three
//! well-known paths. There is no authentication, retry policy, or explicit
//! timeout; the transport default applies.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed
//! programmatically:
//!
//! ```no_run
//! use smartshelf::BackendConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = BackendConfig::from_json_file(Path::new("backend.json"))?;
//!
//! // Or use the local default
//! let config = BackendConfig::default_local();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::constants::endpoints;
use serde::{Deserialize, Serialize};

/// Address and paths of the external vision service.
///
/// Can be serialized to/from JSON so demo deployments can point the panels
/// at a different host without rebuilding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the service, without a trailing slash
    pub base_url: String,

    /// Path of the CSV-to-images workflow
    #[serde(default = "default_generate_images_path")]
    pub generate_images_path: String,

    /// Path of the pixel-filter workflow
    #[serde(default = "default_process_image_path")]
    pub process_image_path: String,

    /// Path of the object-counting workflow
    #[serde(default = "default_count_objects_path")]
    pub count_objects_path: String,
}

fn default_generate_images_path() -> String {
    endpoints::GENERATE_IMAGES.to_string()
}

fn default_process_image_path() -> String {
    endpoints::PROCESS_IMAGE.to_string()
}

fn default_count_objects_path() -> String {
    endpoints::COUNT_OBJECTS.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::default_local()
    }
}

impl BackendConfig {
    /// Configuration pointing at the default local service address
    pub fn default_local() -> Self {
        Self {
            base_url: endpoints::DEFAULT_BASE_URL.to_string(),
            generate_images_path: default_generate_images_path(),
            process_image_path: default_process_image_path(),
            count_objects_path: default_count_objects_path(),
        }
    }

    /// Configuration for a service at the given base URL, default paths
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default_local()
        }
    }

    /// Full URL of an endpoint path on this backend
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
