//! Data models for the HygieneCheck client
//!
//! One persisted entity (the compliance [`Report`]), the typed payloads
//! returned by the analysis backend, and the regulator policy settings
//! applied when a payload is normalized into a report.

pub mod analysis;
pub mod report;
pub mod settings;

pub use analysis::{AnalysisOutcome, Detection, ImageAnalysis, VideoAnalysis};
pub use report::{
    generate_report_id, seed_reports, Report, ReportType, RiskTier, Severity, Violation,
    ViolationStatus,
};
pub use settings::RegulatorSettings;

/// Common validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Required field '{field}' is empty")]
    RequiredFieldEmpty { field: String },

    #[error("Invalid format for field '{field}': {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Value out of range for field '{field}': {reason}")]
    OutOfRange { field: String, reason: String },
}
