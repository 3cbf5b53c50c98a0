use crate::analyzer::aggregate::{summarize_by_date, summarize_by_month, summarize_by_room_type};
use crate::analyzer::comparison::compare;
use crate::analyzer::filter::{filter_by_date_range, filter_series};
use crate::analyzer::heatmap::{heatmap, HeatCell};
use crate::analyzer::lifecycle::{build_price_history, PriceHistory};
use crate::analyzer::market_indicators::{AmenityImpact, MarketAnalyzer, MarketSnapshot, PriceTrend};
use crate::analyzer::series::{align_series, SeriesPoint};
use crate::model::{AggregatedGroup, AnalyticsError, ComparisonReport, DateRange, HotelSeries, PriceObservation};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Trait defining the interface for a price analyzer.
pub trait Analyzer {
    /// Summaries of a single hotel's prices inside `range`.
    fn summarize(&self, observations: &[PriceObservation], range: &DateRange) -> Result<HotelSummary, AnalyticsError>;
    /// Compares several hotels against a primary one inside `range`.
    fn compare_hotels(
        &self,
        primary: &HotelSeries,
        comparisons: &[HotelSeries],
        range: &DateRange,
    ) -> Result<ComparisonAnalysis, AnalyticsError>;
}

/// Everything the single-hotel views need.
#[derive(Debug, Clone, Serialize)]
pub struct HotelSummary {
    pub by_date: Vec<AggregatedGroup<String>>,
    pub by_room_type: Vec<AggregatedGroup<String>>,
    pub by_month: Vec<AggregatedGroup<(i32, u32)>>,
    pub calendar: BTreeMap<NaiveDate, HeatCell>,
    pub history: Vec<PriceHistory>,
}

/// Everything the comparison views need.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonAnalysis {
    pub report: ComparisonReport,
    pub chart: Vec<SeriesPoint>,
    pub calendar: BTreeMap<NaiveDate, HeatCell>,
    pub trends: Vec<PriceTrend>,
    /// `None` when no hotel has a usable price.
    pub market: Option<MarketSnapshot>,
    pub amenities: Vec<AmenityImpact>,
}

/// Implementation of the price analyzer. Holds no state; every call works
/// from its arguments alone.
#[derive(Debug, Default)]
pub struct AnalyzerImpl;

impl AnalyzerImpl {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for AnalyzerImpl {
    fn summarize(&self, observations: &[PriceObservation], range: &DateRange) -> Result<HotelSummary, AnalyticsError> {
        let window = filter_by_date_range(observations, range)?;
        info!(
            "Summarizing {} of {} prices between {} and {}",
            window.len(),
            observations.len(),
            range.start,
            range.end
        );

        Ok(HotelSummary {
            by_date: summarize_by_date(&window),
            by_room_type: summarize_by_room_type(&window),
            by_month: summarize_by_month(&window),
            calendar: heatmap(&window),
            history: build_price_history(&window),
        })
    }

    fn compare_hotels(
        &self,
        primary: &HotelSeries,
        comparisons: &[HotelSeries],
        range: &DateRange,
    ) -> Result<ComparisonAnalysis, AnalyticsError> {
        let primary = filter_series(primary, range)?;
        let comparisons = comparisons
            .iter()
            .map(|series| filter_series(series, range))
            .collect::<Result<Vec<_>, _>>()?;

        let report = compare(&primary, &comparisons)?;
        info!(
            "Compared {} against {} hotels ({} with data)",
            primary.hotel.name,
            comparisons.len(),
            report.results.len()
        );

        let mut all = Vec::with_capacity(comparisons.len() + 1);
        all.push(primary.clone());
        all.extend(comparisons.iter().cloned());

        Ok(ComparisonAnalysis {
            chart: align_series(&primary, &comparisons),
            calendar: heatmap(&primary.observations),
            trends: MarketAnalyzer::price_trends(&all),
            market: MarketAnalyzer::market_snapshot(&all).ok(),
            amenities: MarketAnalyzer::amenity_impact(&all),
            report,
        })
    }
}
