//! Derived dashboard views over the report history: summary KPIs,
//! chart-ready series, and the filtered report table.

pub mod metrics;
pub mod query;

pub use metrics::{DashboardMetrics, RiskDistribution, TrendPoint};
pub use query::{filter_reports, ReportQuery, RiskFilter, TypeFilter};
