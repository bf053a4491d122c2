use serde::Serialize;

use crate::models::{Report, RiskTier};

/// Low/medium/high counts for the categorical risk chart
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// One point of the chronological score series
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    pub score: u8,
}

/// Summary KPIs and chart-ready series derived from the report history.
///
/// Pure and stateless: recomputed in full from the current snapshot on
/// every change, deterministic for identical input.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardMetrics {
    pub total_audits: usize,
    /// Floored integer average of all scores; 0 for an empty history
    pub average_score: u32,
    pub high_risk_count: usize,
    pub risk_distribution: RiskDistribution,
    /// Oldest-first score series for the compliance trend chart
    pub score_trend: Vec<TrendPoint>,
}

impl DashboardMetrics {
    pub fn compute(reports: &[Report]) -> Self {
        let total_audits = reports.len();

        let average_score = if total_audits > 0 {
            let sum: u64 = reports.iter().map(|r| r.score as u64).sum();
            (sum / total_audits as u64) as u32
        } else {
            0
        };

        let count_tier =
            |tier: RiskTier| reports.iter().filter(|r| r.risk == tier).count();
        let risk_distribution = RiskDistribution {
            low: count_tier(RiskTier::Low),
            medium: count_tier(RiskTier::Medium),
            high: count_tier(RiskTier::High),
        };

        // History is newest-first; the trend chart reads oldest-first.
        let score_trend = reports
            .iter()
            .rev()
            .enumerate()
            .map(|(i, r)| TrendPoint {
                label: trend_label(&r.date, i),
                score: r.score,
            })
            .collect();

        Self {
            total_audits,
            average_score,
            high_risk_count: risk_distribution.high,
            risk_distribution,
            score_trend,
        }
    }
}

/// Chart label for one audit: the date's leading comma-delimited
/// segment, or a synthetic "Audit {n}" when the date is empty.
fn trend_label(date: &str, index: usize) -> String {
    let segment = date.split(',').next().unwrap_or("").trim();
    if segment.is_empty() {
        format!("Audit {}", index + 1)
    } else {
        segment.to_string()
    }
}
