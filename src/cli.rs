use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::backend::{client::DEFAULT_SERVER, AnalysisBackend, HttpAnalysisClient};
use crate::dashboard::{filter_reports, DashboardMetrics, ReportQuery};
use crate::models::{AnalysisOutcome, Report, ReportType, ViolationStatus};
use crate::storage::{ReportStore, SettingsStore, StreakTracker};

/// HygieneCheck - food-safety compliance audit client
#[derive(Parser)]
#[command(name = "hygienectl")]
#[command(about = "Audit kitchen imagery for food-safety compliance and track report history")]
pub struct Cli {
    /// Analysis server endpoint
    #[arg(long, global = true, default_value = DEFAULT_SERVER)]
    pub server: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a compliance audit on an image
    AnalyzeImage { path: PathBuf },
    /// Run a compliance audit on a video
    AnalyzeVideo { path: PathBuf },
    /// List audit reports, optionally filtered
    Reports {
        /// Match reports whose id or date contains this text
        #[arg(long)]
        search: Option<String>,
        /// Risk tier (low, medium, high) or "all"
        #[arg(long)]
        risk: Option<String>,
        /// Report type (image, video) or "all"
        #[arg(long = "type")]
        report_type: Option<String>,
    },
    /// Show the full details of one report
    Details { id: String },
    /// Show dashboard KPIs and chart series
    Dashboard,
    /// Show regulator settings
    Settings,
    /// Set the compliance score threshold (0-100)
    SetThreshold { value: u8 },
    /// Toggle the strict facial-protection policy
    SetStrictMasks { enabled: bool },
    /// Toggle email alerts for risky audits
    SetEmailAlerts { enabled: bool },
    /// Send feedback to the administrators
    Feedback { subject: String, message: String },
    /// Record a completed training session
    Training,
    /// Show the current training streak
    Streak,
    /// Reset the persisted report history
    ClearHistory,
    /// Show comprehensive client status
    Status,
    /// Show version information
    Version,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::AnalyzeImage { path } => analyze_image(&cli.server, path).await,
        Commands::AnalyzeVideo { path } => analyze_video(&cli.server, path).await,
        Commands::Reports {
            search,
            risk,
            report_type,
        } => list_reports(search, risk, report_type).await,
        Commands::Details { id } => show_details(&id).await,
        Commands::Dashboard => show_dashboard().await,
        Commands::Settings => show_settings().await,
        Commands::SetThreshold { value } => set_threshold(value).await,
        Commands::SetStrictMasks { enabled } => set_strict_masks(enabled).await,
        Commands::SetEmailAlerts { enabled } => set_email_alerts(enabled).await,
        Commands::Feedback { subject, message } => {
            send_feedback(&cli.server, &subject, &message).await
        }
        Commands::Training => record_training().await,
        Commands::Streak => show_streak().await,
        Commands::ClearHistory => clear_history().await,
        Commands::Status => show_status().await,
        Commands::Version => show_version().await,
    }
}

/// Open the store with a KPI refresh wired to every append, the way
/// the dashboard refreshes after each completed analysis.
fn open_store_with_kpi_refresh() -> Result<ReportStore> {
    let mut store = ReportStore::open_default()?;
    store.subscribe(Box::new(|reports| {
        let metrics = DashboardMetrics::compute(reports);
        println!(
            "\n📊 Dashboard refreshed: {} audits | avg score {}% | {} high-risk",
            metrics.total_audits, metrics.average_score, metrics.high_risk_count
        );
    }));
    Ok(store)
}

async fn analyze_image(server: &str, path: PathBuf) -> Result<()> {
    println!("📷 Uploading image for compliance audit...");

    let client = HttpAnalysisClient::new(server);
    let analysis = match client.analyze_image(&path).await {
        Ok(analysis) => analysis,
        Err(e) => {
            println!("❌ Failed to analyze image: {}", e);
            return Ok(());
        }
    };

    let settings = SettingsStore::open_default()?.load();
    let report = AnalysisOutcome::Image(analysis).into_report(&settings);

    print_report_card(&report);

    let store = open_store_with_kpi_refresh()?;
    store.append(report)?;
    println!("✅ Audit complete: analysis saved to history");

    Ok(())
}

async fn analyze_video(server: &str, path: PathBuf) -> Result<()> {
    println!("🎥 Uploading video for compliance audit (this can take a while)...");

    let client = HttpAnalysisClient::new(server);
    let analysis = match client.analyze_video(&path).await {
        Ok(analysis) => analysis,
        Err(e) => {
            println!("❌ Failed to analyze video: {}", e);
            return Ok(());
        }
    };

    if let Some(url) = &analysis.processed_video_url {
        println!("🎞️  Processed video: {}{}", server.trim_end_matches('/'), url);
    }

    let settings = SettingsStore::open_default()?.load();
    let report = AnalysisOutcome::Video(analysis).into_report(&settings);

    print_report_card(&report);

    let store = open_store_with_kpi_refresh()?;
    store.append(report)?;
    println!("✅ Video analysis complete: report saved to history");

    Ok(())
}

async fn list_reports(
    search: Option<String>,
    risk: Option<String>,
    report_type: Option<String>,
) -> Result<()> {
    let store = ReportStore::open_default()?;
    let reports = store.load();

    let query = ReportQuery::from_args(search.as_deref(), risk.as_deref(), report_type.as_deref());
    let filtered = filter_reports(&reports, &query);

    println!(
        "📋 Audit reports ({} of {} shown):",
        filtered.len(),
        reports.len()
    );
    if filtered.is_empty() {
        println!("   📭 No reports match the current filters");
        return Ok(());
    }

    for report in &filtered {
        println!(
            "   #{} | {} | {} | {}% | {}",
            report.id,
            report.date,
            report.report_type.as_str(),
            report.score,
            report.risk.as_str().to_uppercase()
        );
    }

    Ok(())
}

async fn show_details(id: &str) -> Result<()> {
    if !Report::is_valid_id(id) {
        println!("⚠️  '{}' does not look like a report id (expected HC-XXXX)", id);
    }

    let store = ReportStore::open_default()?;
    let Some(report) = store.find(id) else {
        println!("❌ No report with id {}", id);
        return Ok(());
    };

    println!("📄 Report Details: #{}", report.id);
    print_report_card(&report);

    if report.violations.is_empty() {
        println!("   ✅ No violations detected in this audit.");
    } else {
        println!("   Checked items:");
        for v in &report.violations {
            let mark = match v.status {
                ViolationStatus::Ok => "✓",
                ViolationStatus::Violation => "✗",
            };
            println!(
                "     {} [{}] {}: {} ({})",
                mark,
                v.severity.as_str(),
                v.category,
                v.item,
                v.status.as_str()
            );
        }
    }

    Ok(())
}

fn print_report_card(report: &Report) {
    println!("   Date:  {}", report.date);
    println!("   Type:  {}", report.report_type.as_str());
    println!("   Score: {}%", report.score);
    println!("   Risk:  {}", report.risk.as_str().to_uppercase());
    if let Some(reason) = &report.risk_reason {
        println!("   📋 Risk analysis: {}", reason);
    }
    if let Some(caption) = &report.caption {
        println!("   💬 Scene: \"{}\"", caption);
    }
    if report.report_type == ReportType::Video {
        if let Some(frames) = report.total_frames {
            println!("   🎞️  Frames analyzed: {}", frames);
        }
        if let Some(incidents) = report.critical_incidents {
            println!("   🚨 Critical incidents: {}", incidents);
        }
    }
}

async fn show_dashboard() -> Result<()> {
    let store = ReportStore::open_default()?;
    let reports = store.load();
    let metrics = DashboardMetrics::compute(&reports);

    println!("📊 HygieneCheck Dashboard");
    println!("   Total audits:     {}", metrics.total_audits);
    println!("   Average score:    {}%", metrics.average_score);
    println!("   High-risk alerts: {}", metrics.high_risk_count);
    println!(
        "   Risk distribution: 🟢 {} low | 🟡 {} medium | 🔴 {} high",
        metrics.risk_distribution.low,
        metrics.risk_distribution.medium,
        metrics.risk_distribution.high
    );

    println!("   Compliance trend (oldest first):");
    for point in &metrics.score_trend {
        println!("     {} - {}%", point.label, point.score);
    }

    Ok(())
}

async fn show_settings() -> Result<()> {
    let settings = SettingsStore::open_default()?.load();
    println!("⚙️  Regulator settings:");
    println!("   Compliance threshold: {}%", settings.threshold);
    println!("   Strict mask policy:   {}", on_off(settings.strict_masks));
    println!("   Email alerts:         {}", on_off(settings.email_alerts));
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "🟢 ENABLED"
    } else {
        "🔴 DISABLED"
    }
}

async fn set_threshold(value: u8) -> Result<()> {
    SettingsStore::open_default()?.set_threshold(value)?;
    println!("✅ Global policy updated: compliance threshold is now {}%", value);
    Ok(())
}

async fn set_strict_masks(enabled: bool) -> Result<()> {
    SettingsStore::open_default()?.set_strict_masks(enabled)?;
    println!("✅ Strict mask policy {}", on_off(enabled));
    Ok(())
}

async fn set_email_alerts(enabled: bool) -> Result<()> {
    SettingsStore::open_default()?.set_email_alerts(enabled)?;
    println!("✅ Email alerts {}", on_off(enabled));
    Ok(())
}

async fn send_feedback(server: &str, subject: &str, message: &str) -> Result<()> {
    println!("📨 Sending feedback...");
    let client = HttpAnalysisClient::new(server);
    match client.send_feedback(subject, message).await {
        Ok(()) => println!("✅ Feedback sent and emailed to admin!"),
        Err(e) => println!("❌ Feedback submission failed: {}", e),
    }
    Ok(())
}

async fn record_training() -> Result<()> {
    let tracker = StreakTracker::open_default()?;
    let today = chrono::Local::now().date_naive();
    let before = tracker.current(today)?;
    let streak = tracker.record_session(today)?;

    if streak == before {
        println!(
            "📚 Training already recorded today. Streak: {}",
            day_count(streak)
        );
    } else {
        println!("🔥 Training streak increased! Now at {}", day_count(streak));
    }
    Ok(())
}

async fn show_streak() -> Result<()> {
    let tracker = StreakTracker::open_default()?;
    let streak = tracker.current(chrono::Local::now().date_naive())?;
    println!("🔥 Training streak: {}", day_count(streak));
    Ok(())
}

fn day_count(days: u32) -> String {
    if days == 1 {
        "1 Day".to_string()
    } else {
        format!("{} Days", days)
    }
}

async fn clear_history() -> Result<()> {
    let store = ReportStore::open_default()?;
    store.clear()?;
    println!("🗑️  Report history cleared (seed examples will show until the next audit)");
    Ok(())
}

async fn show_status() -> Result<()> {
    let store = ReportStore::open_default()?;
    let reports = store.load();
    let metrics = DashboardMetrics::compute(&reports);
    let settings = SettingsStore::open_default()?.load();
    let streak = StreakTracker::open_default()?.current(chrono::Local::now().date_naive())?;

    println!("🏥 HygieneCheck client status");
    println!(
        "   History: {} audits ({} image, {} video)",
        metrics.total_audits,
        reports
            .iter()
            .filter(|r| r.report_type == ReportType::Image)
            .count(),
        reports
            .iter()
            .filter(|r| r.report_type == ReportType::Video)
            .count()
    );
    println!(
        "   Scores:  avg {}% | {} high-risk alerts",
        metrics.average_score, metrics.high_risk_count
    );
    println!("   Policy:  threshold {}%", settings.threshold);
    println!("   Streak:  {}", day_count(streak));
    Ok(())
}

async fn show_version() -> Result<()> {
    println!("hygienectl v{}", env!("CARGO_PKG_VERSION"));
    println!("HygieneCheck - food-safety compliance audit client");
    Ok(())
}
