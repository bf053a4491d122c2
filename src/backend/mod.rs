use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ImageAnalysis, VideoAnalysis};

pub mod client;

pub use client::HttpAnalysisClient;

/// Failures talking to the analysis backend. These surface to the user
/// as a message; nothing here is retried or fatal.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Could not reach the analysis server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not read upload file: {0}")]
    Upload(#[from] std::io::Error),

    #[error("Analysis server rejected the request ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Analysis server returned an unreadable response: {0}")]
    InvalidResponse(String),
}

/// Seam to the analysis service.
///
/// One non-blocking request per call; no retry, no timeout policy, no
/// cancellation. Callers catch the error and report it to the user.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Upload an image for a compliance audit (POST /analyze)
    async fn analyze_image(&self, path: &Path) -> Result<ImageAnalysis, BackendError>;

    /// Upload a video for a compliance audit (POST /analyze_video)
    async fn analyze_video(&self, path: &Path) -> Result<VideoAnalysis, BackendError>;

    /// Submit user feedback (POST /feedback)
    async fn send_feedback(&self, subject: &str, message: &str) -> Result<(), BackendError>;
}
