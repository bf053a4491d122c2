use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::models::{ImageAnalysis, VideoAnalysis};

use super::{AnalysisBackend, BackendError};

/// Default analysis server endpoint
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

/// HTTP client for the HygieneCheck analysis server
pub struct HttpAnalysisClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpAnalysisClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file: &Path,
    ) -> Result<T, BackendError> {
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let form = Form::new().part(field.to_string(), Part::bytes(bytes).file_name(file_name));

        debug!(url = %self.endpoint(path), "uploading file for analysis");
        let response = self
            .http
            .post(self.endpoint(path))
            .multipart(form)
            .send()
            .await?;

        decode_response(response).await
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisClient {
    async fn analyze_image(&self, path: &Path) -> Result<ImageAnalysis, BackendError> {
        self.upload("/analyze", "image", path).await
    }

    async fn analyze_video(&self, path: &Path) -> Result<VideoAnalysis, BackendError> {
        self.upload("/analyze_video", "video", path).await
    }

    async fn send_feedback(&self, subject: &str, message: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.endpoint("/feedback"))
            .json(&serde_json::json!({ "subject": subject, "message": message }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(BackendError::Server {
                status: status.as_u16(),
                message: extract_error_message(&body, status.as_u16()),
            })
        }
    }
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(BackendError::Server {
            status: status.as_u16(),
            message: extract_error_message(&body, status.as_u16()),
        });
    }

    serde_json::from_str(&body).map_err(|e| BackendError::InvalidResponse(e.to_string()))
}

/// Non-2xx bodies carry `{"error": "..."}`; fall back to a generic
/// status line when the body is something else entirely.
fn extract_error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| format!("Server Error: {}", status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_extraction() {
        assert_eq!(
            extract_error_message(r#"{"error": "No image part"}"#, 400),
            "No image part"
        );
        assert_eq!(
            extract_error_message("<html>gateway timeout</html>", 502),
            "Server Error: 502"
        );
        assert_eq!(extract_error_message("", 500), "Server Error: 500");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpAnalysisClient::new("http://localhost:5000/");
        assert_eq!(client.endpoint("/analyze"), "http://localhost:5000/analyze");
    }

    #[tokio::test]
    async fn test_missing_upload_file_is_an_upload_error() {
        let client = HttpAnalysisClient::new(DEFAULT_SERVER);
        let result = client
            .analyze_image(Path::new("/nonexistent/kitchen.jpg"))
            .await;
        assert!(matches!(result, Err(BackendError::Upload(_))));
    }
}
