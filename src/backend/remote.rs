//! Remote analysis proxy
//!
//! Thin HTTP glue around the external vision service. Each call is a single
//! synchronous request: a transport failure maps to `ShelfError::Network`, a
//! non-2xx status to `ShelfError::Http`, and an unparseable body to
//! `ShelfError::Response`. The caller must re-invoke explicitly; nothing is
//! retried here.

use crate::backend::{AnalysisBackend, CountOutcome, GenerateOutcome, ProcessOutcome};
use crate::config::BackendConfig;
use crate::error::{Result, ShelfError};
use crate::filters::FilterKind;
use crate::upload::{CsvUpload, ImageUpload};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Serialize)]
struct ProcessImageRequest {
    image_base64: String,
    #[serde(rename = "type")]
    kind: FilterKind,
}

#[derive(Serialize)]
struct CountObjectsRequest {
    image_base64: String,
}

/// HTTP client for the external vision service
pub struct RemoteBackend {
    http: Client,
    config: BackendConfig,
}

impl RemoteBackend {
    /// Client against the given backend configuration
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Client against the default local service address
    pub fn default_local() -> Self {
        Self::new(BackendConfig::default_local())
    }

    fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.config.url_for(path);
        debug!(%url, "posting JSON request");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .map_err(|e| ShelfError::network(path, e))?;
        self.parse_response(path, response)
    }

    fn parse_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::blocking::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = path, status = status.as_u16(), "backend error");
            return Err(ShelfError::Http {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        response.json().map_err(|e| ShelfError::Response {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}

impl AnalysisBackend for RemoteBackend {
    fn process_image(&mut self, upload: &ImageUpload, kind: FilterKind) -> Result<ProcessOutcome> {
        let request = ProcessImageRequest {
            image_base64: upload.to_data_url(),
            kind,
        };
        self.post_json(&self.config.process_image_path.clone(), &request)
    }

    fn count_objects(&mut self, upload: &ImageUpload) -> Result<CountOutcome> {
        let request = CountObjectsRequest {
            image_base64: upload.to_data_url(),
        };
        self.post_json(&self.config.count_objects_path.clone(), &request)
    }

    fn generate_images(&mut self, upload: &CsvUpload) -> Result<GenerateOutcome> {
        let path = self.config.generate_images_path.clone();
        let url = self.config.url_for(&path);

        let file_part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str("text/csv")
            .map_err(|e| ShelfError::network(path.as_str(), e))?;
        let form = Form::new()
            .part("file", file_part)
            .text("top_n", upload.top_n.to_string());

        debug!(%url, top_n = upload.top_n, "posting CSV upload");
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| ShelfError::network(path.as_str(), e))?;
        self.parse_response(&path, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_image_request_wire_shape() {
        let request = ProcessImageRequest {
            image_base64: "data:image/png;base64,AAAA".into(),
            kind: FilterKind::Edges,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"image_base64\""));
        assert!(json.contains("\"type\":\"edges\""));
    }

    #[test]
    fn test_unreachable_backend_is_a_network_error() {
        // Port 9 (discard) is not running a service; the connect must fail
        // immediately rather than hang.
        let mut backend = RemoteBackend::new(BackendConfig::with_base_url("http://127.0.0.1:9"));
        let upload = ImageUpload::new("shelf.png", "image/png", vec![1, 2, 3]).unwrap();
        let err = backend.count_objects(&upload).unwrap_err();
        assert!(matches!(err, ShelfError::Network { .. }));
        assert_eq!(
            err.user_message(),
            "An error occurred while processing the request"
        );
    }
}
