//! Typed payloads returned by the analysis backend, and their
//! normalization into [`Report`] records at the boundary.
//!
//! The backend is loosely shaped JSON; everything optional there is
//! optional here, and a [`Report`] is only constructed after the
//! payload has deserialized into one of these shapes.

use serde::{Deserialize, Serialize};

use super::report::{
    generate_report_id, report_timestamp, Report, ReportType, RiskTier, Severity, Violation,
    ViolationStatus,
};
use super::settings::RegulatorSettings;

/// A single detection box from an image analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
    /// "ok" or "bad"
    pub status: String,
}

/// Response body of POST /analyze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub compliance_score: u8,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub risk_reason: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub detected_ppe: Vec<String>,
    #[serde(default)]
    pub violations: Vec<String>,
    #[serde(default)]
    pub detections: Vec<Detection>,
}

/// Response body of POST /analyze_video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAnalysis {
    pub average_score: u8,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub risk_reason: Option<String>,
    #[serde(default)]
    pub total_frames: Option<u64>,
    #[serde(default)]
    pub critical_incidents: Option<u64>,
    #[serde(default)]
    pub frequent_violations: Vec<String>,
    #[serde(default)]
    pub processed_video_url: Option<String>,
}

/// A completed analysis of either kind, tagged by audit type
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Image(ImageAnalysis),
    Video(VideoAnalysis),
}

impl AnalysisOutcome {
    pub fn report_type(&self) -> ReportType {
        match self {
            AnalysisOutcome::Image(_) => ReportType::Image,
            AnalysisOutcome::Video(_) => ReportType::Video,
        }
    }

    /// Normalize this outcome into a fresh [`Report`] using the current
    /// regulator settings. The backend's explicit risk level wins; when
    /// absent, the tier is derived from the score and threshold.
    pub fn into_report(self, settings: &RegulatorSettings) -> Report {
        let now = report_timestamp(chrono::Local::now());
        match self {
            AnalysisOutcome::Image(data) => {
                let score = data.compliance_score.min(100);
                let risk = resolve_risk(data.risk_level.as_deref(), score, settings.threshold);
                let mut violations: Vec<Violation> =
                    data.violations.iter().map(|v| image_violation(v)).collect();
                violations.extend(data.detected_ppe.iter().map(|p| detected_ppe_item(p)));
                Report {
                    id: generate_report_id(),
                    date: now,
                    report_type: ReportType::Image,
                    score,
                    risk,
                    risk_reason: data.risk_reason.filter(|s| !s.is_empty()),
                    caption: data.caption.filter(|s| !s.is_empty()),
                    total_frames: None,
                    critical_incidents: None,
                    violations,
                }
            }
            AnalysisOutcome::Video(data) => {
                let score = data.average_score.min(100);
                let risk = resolve_risk(data.risk_level.as_deref(), score, settings.threshold);
                let violations = data
                    .frequent_violations
                    .iter()
                    .map(|v| video_violation(v))
                    .collect();
                Report {
                    id: generate_report_id(),
                    date: now,
                    report_type: ReportType::Video,
                    score,
                    risk,
                    risk_reason: data.risk_reason.filter(|s| !s.is_empty()),
                    caption: None,
                    total_frames: data.total_frames,
                    critical_incidents: data.critical_incidents,
                    violations,
                }
            }
        }
    }
}

fn resolve_risk(explicit: Option<&str>, score: u8, threshold: u8) -> RiskTier {
    explicit
        .and_then(RiskTier::parse)
        .unwrap_or_else(|| RiskTier::from_score(score, threshold))
}

/// Image violation strings arrive as "Violation: X" or "Hazard: X".
/// Hazards (fire/smoke) are safety items of high severity; the rest
/// are PPE items of medium severity.
fn image_violation(raw: &str) -> Violation {
    let is_hazard = raw.contains("Hazard") || raw.contains("Fire") || raw.contains("Smoke");
    Violation {
        category: if raw.contains("Hazard") { "Safety" } else { "PPE" }.to_string(),
        item: raw
            .replace("Violation: ", "")
            .replace("Hazard: ", ""),
        severity: if is_hazard { Severity::High } else { Severity::Medium },
        status: ViolationStatus::Violation,
    }
}

/// PPE the analyzer confirmed present becomes a passing low-severity row
fn detected_ppe_item(raw: &str) -> Violation {
    Violation {
        category: "PPE".to_string(),
        item: title_case(&raw.replace('_', " ")),
        severity: Severity::Low,
        status: ViolationStatus::Ok,
    }
}

/// Video violation strings arrive as "HAZARD: X" or a plain item name
fn video_violation(raw: &str) -> Violation {
    let is_hazard = raw.contains("HAZARD");
    Violation {
        category: if is_hazard { "Safety" } else { "PPE" }.to_string(),
        item: raw.replace("HAZARD: ", ""),
        severity: if is_hazard { Severity::High } else { Severity::Medium },
        status: ViolationStatus::Violation,
    }
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_payload(risk_level: Option<&str>, score: u8) -> ImageAnalysis {
        ImageAnalysis {
            compliance_score: score,
            risk_level: risk_level.map(|s| s.to_string()),
            risk_reason: Some("Minor violations detected; improved monitoring required.".to_string()),
            caption: Some("A busy commercial kitchen".to_string()),
            detected_ppe: vec!["with_mask".to_string()],
            violations: vec![
                "Violation: No Apron".to_string(),
                "Hazard: Fire".to_string(),
            ],
            detections: vec![],
        }
    }

    #[test]
    fn test_image_normalization() {
        let settings = RegulatorSettings::default();
        let report = AnalysisOutcome::Image(image_payload(Some("Medium"), 70))
            .into_report(&settings);

        assert_eq!(report.report_type, ReportType::Image);
        assert_eq!(report.score, 70);
        assert_eq!(report.risk, RiskTier::Medium);
        assert_eq!(report.caption.as_deref(), Some("A busy commercial kitchen"));
        assert!(report.total_frames.is_none());

        assert_eq!(report.violations.len(), 3);
        let apron = &report.violations[0];
        assert_eq!(apron.category, "PPE");
        assert_eq!(apron.item, "No Apron");
        assert_eq!(apron.severity, Severity::Medium);
        assert_eq!(apron.status, ViolationStatus::Violation);

        let fire = &report.violations[1];
        assert_eq!(fire.category, "Safety");
        assert_eq!(fire.item, "Fire");
        assert_eq!(fire.severity, Severity::High);

        let ppe = &report.violations[2];
        assert_eq!(ppe.item, "With Mask");
        assert_eq!(ppe.severity, Severity::Low);
        assert_eq!(ppe.status, ViolationStatus::Ok);
    }

    #[test]
    fn test_missing_risk_level_is_derived() {
        let settings = RegulatorSettings::default(); // threshold 80
        let report = AnalysisOutcome::Image(image_payload(None, 85)).into_report(&settings);
        assert_eq!(report.risk, RiskTier::Low);

        let report = AnalysisOutcome::Image(image_payload(None, 50)).into_report(&settings);
        assert_eq!(report.risk, RiskTier::High);
    }

    #[test]
    fn test_explicit_risk_level_wins() {
        let settings = RegulatorSettings::default();
        // Backend says High even though the score would derive Low
        let report = AnalysisOutcome::Image(image_payload(Some("High"), 95)).into_report(&settings);
        assert_eq!(report.risk, RiskTier::High);
    }

    #[test]
    fn test_video_normalization() {
        let settings = RegulatorSettings::default();
        let payload = VideoAnalysis {
            average_score: 58,
            risk_level: Some("High".to_string()),
            risk_reason: Some("Recurring critical hazards detected during stream.".to_string()),
            total_frames: Some(1240),
            critical_incidents: Some(2),
            frequent_violations: vec![
                "HAZARD: Fire".to_string(),
                "Missing Gloves".to_string(),
            ],
            processed_video_url: Some("/outputs/processed_1.mp4".to_string()),
        };
        let report = AnalysisOutcome::Video(payload).into_report(&settings);

        assert_eq!(report.report_type, ReportType::Video);
        assert_eq!(report.total_frames, Some(1240));
        assert_eq!(report.critical_incidents, Some(2));
        assert_eq!(report.violations.len(), 2);
        assert_eq!(report.violations[0].category, "Safety");
        assert_eq!(report.violations[0].item, "Fire");
        assert_eq!(report.violations[1].category, "PPE");
        assert_eq!(report.violations[1].severity, Severity::Medium);
    }

    #[test]
    fn test_payload_deserializes_with_missing_optionals() {
        let json = r#"{"compliance_score": 92}"#;
        let payload: ImageAnalysis = serde_json::from_str(json).unwrap();
        assert!(payload.risk_level.is_none());
        assert!(payload.violations.is_empty());

        let json = r#"{"average_score": 77, "total_frames": 300}"#;
        let payload: VideoAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(payload.total_frames, Some(300));
        assert!(payload.frequent_violations.is_empty());
    }
}
