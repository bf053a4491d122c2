use crate::models::{Report, ReportType, RiskTier};

/// Risk constraint for the report table; `All` means unconstrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiskFilter {
    #[default]
    All,
    Tier(RiskTier),
}

/// Type constraint for the report table; `All` means unconstrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Kind(ReportType),
}

/// Filter state for the report table.
///
/// The default value is the cleared-filters state: empty text and both
/// selectors at `All`, under which filtering is the identity.
#[derive(Debug, Clone, Default)]
pub struct ReportQuery {
    /// Free text matched case-insensitively as a substring of id or date
    pub text: String,
    pub risk: RiskFilter,
    pub report_type: TypeFilter,
}

impl ReportQuery {
    /// Parse CLI-style filter values; "all" (or absence) clears a selector
    pub fn from_args(text: Option<&str>, risk: Option<&str>, report_type: Option<&str>) -> Self {
        let risk = match risk {
            Some(value) if !value.eq_ignore_ascii_case("all") => RiskTier::parse(value)
                .map(RiskFilter::Tier)
                .unwrap_or(RiskFilter::All),
            _ => RiskFilter::All,
        };
        let report_type = match report_type {
            Some(value) if !value.eq_ignore_ascii_case("all") => ReportType::parse(value)
                .map(TypeFilter::Kind)
                .unwrap_or(TypeFilter::All),
            _ => TypeFilter::All,
        };
        Self {
            text: text.unwrap_or("").to_string(),
            risk,
            report_type,
        }
    }

    fn matches(&self, report: &Report) -> bool {
        let needle = self.text.to_lowercase();
        let matches_text = needle.is_empty()
            || report.id.to_lowercase().contains(&needle)
            || report.date.to_lowercase().contains(&needle);

        let matches_risk = match self.risk {
            RiskFilter::All => true,
            RiskFilter::Tier(tier) => report.risk == tier,
        };

        let matches_type = match self.report_type {
            TypeFilter::All => true,
            TypeFilter::Kind(kind) => report.report_type == kind,
        };

        matches_text && matches_risk && matches_type
    }
}

/// Project the history through a filter, preserving relative order.
/// Side-effect free; calling twice with the same inputs is identical.
pub fn filter_reports(reports: &[Report], query: &ReportQuery) -> Vec<Report> {
    reports
        .iter()
        .filter(|r| query.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_reports;

    #[test]
    fn test_cleared_filters_are_identity() {
        let reports = seed_reports();
        let filtered = filter_reports(&reports, &ReportQuery::default());
        assert_eq!(filtered, reports);
    }

    #[test]
    fn test_text_query_matches_id_substring() {
        let reports = seed_reports();
        let query = ReportQuery {
            text: "9920".to_string(),
            ..Default::default()
        };
        let filtered = filter_reports(&reports, &query);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "HC-9920");
    }

    #[test]
    fn test_text_query_is_case_insensitive() {
        let reports = seed_reports();
        let query = ReportQuery {
            text: "hc-9917".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_reports(&reports, &query).len(), 1);
    }

    #[test]
    fn test_text_query_matches_date() {
        let reports = seed_reports();
        let query = ReportQuery {
            text: "2023-10-31".to_string(),
            ..Default::default()
        };
        let filtered = filter_reports(&reports, &query);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "HC-9919");
        assert_eq!(filtered[1].id, "HC-9918");
    }

    #[test]
    fn test_risk_and_type_combine_as_and() {
        let reports = seed_reports();
        let query = ReportQuery {
            text: String::new(),
            risk: RiskFilter::Tier(RiskTier::Low),
            report_type: TypeFilter::Kind(ReportType::Image),
        };
        let filtered = filter_reports(&reports, &query);
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        // HC-9918 is low risk but a video; it must not appear
        assert_eq!(ids, vec!["HC-9921", "HC-9917"]);
    }

    #[test]
    fn test_filter_preserves_input_order() {
        let reports = seed_reports();
        let query = ReportQuery {
            risk: RiskFilter::Tier(RiskTier::Low),
            ..Default::default()
        };
        let filtered = filter_reports(&reports, &query);
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["HC-9921", "HC-9918", "HC-9917"]);
    }

    #[test]
    fn test_from_args_sentinels() {
        let query = ReportQuery::from_args(None, Some("all"), Some("all"));
        assert_eq!(query.risk, RiskFilter::All);
        assert_eq!(query.report_type, TypeFilter::All);
        assert!(query.text.is_empty());

        let query = ReportQuery::from_args(Some("9920"), Some("High"), Some("video"));
        assert_eq!(query.risk, RiskFilter::Tier(RiskTier::High));
        assert_eq!(query.report_type, TypeFilter::Kind(ReportType::Video));
    }
}
