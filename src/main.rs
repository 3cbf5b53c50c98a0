use hotel_rate_scout::analyzer::{Analyzer, AnalyzerImpl, ComparisonAnalysis};
use hotel_rate_scout::config::{load_config, AppConfig};
use hotel_rate_scout::store::{fetch_many, fetch_series, SnapshotStore};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let range = match config.date_range() {
        Ok(range) => range,
        Err(e) => {
            error!("Invalid date range in config: {}", e);
            return;
        }
    };

    let store = match SnapshotStore::open(&config.snapshot_path).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open snapshot: {}", e);
            return;
        }
    };

    // Primary and comparison hotels are loaded concurrently
    let (primary, comparisons) = tokio::join!(
        fetch_series(&store, config.primary_hotel_id),
        fetch_many(&store, &config.comparison_hotel_ids)
    );
    let primary = match primary {
        Ok(series) => series,
        Err(e) => {
            error!("Primary hotel unavailable: {}", e);
            return;
        }
    };

    let analyzer = AnalyzerImpl::new();

    match analyzer.summarize(&primary.observations, &range) {
        Ok(summary) => {
            info!("Prices by date for {}:", primary.hotel.name);
            for group in &summary.by_date {
                info!(
                    "  {}: avg {:.2} | min {:.2} | max {:.2} | {} quotes",
                    group.key, group.average, group.min, group.max, group.count
                );
            }
            info!("Prices by room type:");
            for group in &summary.by_room_type {
                info!("  {}: avg {:.2} ({} quotes)", group.key, group.average, group.count);
            }
        }
        Err(e) => warn!("Summary failed: {}", e),
    }

    match analyzer.compare_hotels(&primary, &comparisons, &range) {
        Ok(analysis) => log_comparison(&analysis),
        Err(e) => warn!("Comparison unavailable: {}", e),
    }
}

fn log_comparison(analysis: &ComparisonAnalysis) {
    let report = &analysis.report;
    info!(
        "Primary {}: avg {:.2} over {} days ({} quotes)",
        report.primary.hotel.name, report.primary.average_price, report.total_days, report.primary.data_points
    );
    for row in &report.results {
        info!(
            "  {}: avg {:.2} | diff {:+.2} ({:+.2}%) | {:?} | {} quotes",
            row.hotel.name, row.average_price, row.difference, row.percentage_diff, row.trend, row.data_points
        );
    }

    for trend in &analysis.trends {
        info!(
            "Trend {}: current {:.2} | change {:+.2} ({:+.2}%) | volatility {:.2}",
            trend.hotel_name, trend.current_price, trend.price_change, trend.price_change_percent, trend.volatility
        );
    }

    if let Some(market) = &analysis.market {
        info!(
            "Market: avg {:.2} | min {:.2} | max {:.2} | range {:.2}",
            market.average_price, market.min_price, market.max_price, market.price_range
        );
    }

    for impact in &analysis.amenities {
        info!(
            "Amenity {}: {:+.2} ({:+.2}%) | {:?} | {} with, {} without",
            impact.amenity,
            impact.price_impact,
            impact.price_impact_percent,
            impact.significance,
            impact.hotels_with,
            impact.hotels_without
        );
    }

    match serde_json::to_string_pretty(&analysis.chart) {
        Ok(json) => info!("Chart series:\n{}", json),
        Err(e) => warn!("Failed to serialize chart series: {}", e),
    }
}
