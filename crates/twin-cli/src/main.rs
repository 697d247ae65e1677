use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use application::AnalyticsService;
use domain::building::BuildingRepository;
use domain::event::EventPublisher;
use domain::telemetry::TimeRange;
use infrastructure::config::AnalyticsConfig;
use infrastructure::telemetry::init_tracing;
use infrastructure::{
    CompositeEventPublisher, InMemoryBuildingRepository, LoggingEventPublisher,
    SimulatedReadingSource, SimulatorConfig,
};

mod demo;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run building analytics against simulated telemetry", long_about = None)]
struct Args {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Name of the sample building
    #[arg(long, default_value = "Station Office")]
    building_name: String,

    /// Length of the analysed period, ending now
    #[arg(long, default_value_t = 24)]
    hours: i64,

    /// Aggregation interval
    #[arg(long, default_value_t = 60)]
    interval_minutes: i64,

    /// KPIs to compute; the configured list when omitted
    #[arg(long = "kpi")]
    kpis: Vec<String>,
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let config = AnalyticsConfig::load(&args.config_dir)
        .with_context(|| format!("Failed to load configuration from {}", args.config_dir))?;
    init_tracing(&config.log_filter)?;

    info!("🏢 Building Twin analytics starting...");
    info!("📂 Config directory: {}", args.config_dir);

    let publisher: Arc<dyn EventPublisher> =
        Arc::new(CompositeEventPublisher::new(vec![Arc::new(LoggingEventPublisher)]));
    let repository = InMemoryBuildingRepository::with_publisher(publisher);

    let building = demo::sample_building(&args.building_name)?;
    repository.save(&building, 0).await?;
    info!(
        building_id = %building.id(),
        floors = building.floor_count(),
        area = building.total_area(),
        "🏗️ Sample building registered"
    );

    let lookback = Duration::try_hours(args.hours).context("--hours is out of range")?;
    let interval = Duration::try_minutes(args.interval_minutes)
        .context("--interval-minutes is out of range")?;
    let range = TimeRange::ending_at(Utc::now(), lookback)?;
    let source = Arc::new(SimulatedReadingSource::new(SimulatorConfig::default()));
    let service = AnalyticsService::new(source, config);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("🛑 Cancelling analyses..."),
            Err(err) => warn!(error = %err, "Unable to listen for shutdown signal"),
        }
        on_signal.cancel();
    });

    let subject = building.id().to_string();
    let kpi_names: Vec<&str> = args.kpis.iter().map(String::as_str).collect();
    let (energy, anomalies, kpis, insights) = tokio::join!(
        service.analyze_energy(&subject, range, interval, &cancel),
        service.detect_anomalies(&subject, range, interval, &cancel),
        service.calculate_kpis(&building, &kpi_names, range, interval, &cancel),
        service.generate_insights(&building, range, interval, &cancel),
    );

    let mut equipment = Vec::new();
    for item in building.all_equipment() {
        equipment.push(service.analyze_equipment(item, range, interval, &cancel).await);
    }

    let report = serde_json::json!({
        "building": building.name(),
        "energy": energy,
        "anomalies": anomalies,
        "kpis": kpis,
        "insights": insights,
        "equipment": equipment,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("👋 Done");
    Ok(())
}

fn main() {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("❌ Failed to start runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(run()) {
        eprintln!("\n❌ CRITICAL ERROR: {:?}", e);
        std::process::exit(1);
    }
}
