//! Core report model: one persisted record of a completed compliance audit.

use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// What kind of media the audit analyzed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportType {
    Image,
    Video,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Image => "Image",
            ReportType::Video => "Video",
        }
    }

    /// Parse a type label case-insensitively ("image", "Video", ...)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "image" => Some(ReportType::Image),
            "video" => Some(ReportType::Video),
            _ => None,
        }
    }
}

/// Categorical risk bucket for an audit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    /// Parse a tier label case-insensitively ("Low", "HIGH", ...)
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "low" => Some(RiskTier::Low),
            "medium" => Some(RiskTier::Medium),
            "high" => Some(RiskTier::High),
            _ => None,
        }
    }

    /// Derive a tier from a compliance score against the regulator threshold.
    ///
    /// Scores at or above the threshold are low risk, scores below 60 are
    /// high risk, everything between is medium.
    pub fn from_score(score: u8, threshold: u8) -> Self {
        if score >= threshold {
            RiskTier::Low
        } else if score >= 60 {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }
}

/// Severity of a single checked item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

/// Whether a checked item passed or failed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ViolationStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "VIOLATION")]
    Violation,
}

impl ViolationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationStatus::Ok => "OK",
            ViolationStatus::Violation => "VIOLATION",
        }
    }
}

/// One row of the audit's checked-item breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Violation {
    /// Item category (PPE, Safety, Hygiene, ...)
    pub category: String,
    /// Human-readable item name
    pub item: String,
    pub severity: Severity,
    pub status: ViolationStatus,
}

/// One persisted compliance audit record.
///
/// Created once when an analysis completes, never mutated afterwards.
/// Optional fields are type-specific: `caption` for image audits,
/// `total_frames`/`critical_incidents` for video audits. Seed records
/// carry none of them, so all are defaulted on deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Unique report id in the form HC-<4 digits>
    pub id: String,
    /// Display-formatted creation timestamp; never re-parsed
    pub date: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// Compliance score, 0-100
    pub score: u8,
    pub risk: RiskTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_frames: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical_incidents: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl Report {
    /// Check the HC-<4 digits> id shape
    pub fn is_valid_id(id: &str) -> bool {
        Regex::new(r"^HC-\d{4}$").unwrap().is_match(id)
    }
}

/// Mint a fresh report id (HC-1000 .. HC-9999)
pub fn generate_report_id() -> String {
    format!("HC-{}", rand::thread_rng().gen_range(1000..10000))
}

/// Display timestamp for a freshly created report
pub fn report_timestamp(now: chrono::DateTime<chrono::Local>) -> String {
    now.format("%m/%d/%Y, %H:%M:%S").to_string()
}

/// The fixed five-report default history used when no persisted
/// history exists (or the slot is unreadable).
pub fn seed_reports() -> Vec<Report> {
    fn seed(id: &str, date: &str, report_type: ReportType, score: u8, risk: RiskTier) -> Report {
        Report {
            id: id.to_string(),
            date: date.to_string(),
            report_type,
            score,
            risk,
            risk_reason: None,
            caption: None,
            total_frames: None,
            critical_incidents: None,
            violations: Vec::new(),
        }
    }

    vec![
        seed("HC-9921", "2023-11-01 14:30", ReportType::Image, 95, RiskTier::Low),
        seed("HC-9920", "2023-11-01 11:15", ReportType::Video, 58, RiskTier::High),
        seed("HC-9919", "2023-10-31 09:45", ReportType::Image, 72, RiskTier::Medium),
        seed("HC-9918", "2023-10-31 08:30", ReportType::Video, 88, RiskTier::Low),
        seed("HC-9917", "2023-10-30 16:20", ReportType::Image, 91, RiskTier::Low),
    ]
}
