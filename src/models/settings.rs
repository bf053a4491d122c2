use serde::{Deserialize, Serialize};

/// Regulator policy settings applied when normalizing analysis results.
///
/// Stored as individual durable keys (`hc_threshold`, `hc_masks`,
/// `hc_emails`); any absent or unreadable key falls back to its
/// default here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegulatorSettings {
    /// Compliance score at or above which an audit is low risk
    pub threshold: u8,

    /// Enforce strict facial-protection policy
    pub strict_masks: bool,

    /// Email alerts for medium/high risk audits
    pub email_alerts: bool,
}

impl Default for RegulatorSettings {
    fn default() -> Self {
        Self {
            threshold: 80,
            strict_masks: true,
            email_alerts: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RegulatorSettings::default();
        assert_eq!(settings.threshold, 80);
        assert!(settings.strict_masks);
        assert!(settings.email_alerts);
    }
}
