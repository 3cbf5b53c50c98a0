use crate::analyzer::aggregate::aggregate;
use crate::analyzer::grouping::check_in_key;
use crate::model::{
    AnalyticsError, ComparisonReport, ComparisonResult, HotelSeries, PrimarySummary, Trend,
};
use crate::utils::round2;
use std::collections::HashSet;
use tracing::debug;

/// Compares each comparison hotel's average price with the primary hotel's.
///
/// Both sides are expected to be filtered to the same date range already.
/// Comparison hotels without usable prices are left out of the results, the
/// rest keep the order they were given in. Differences and trends are computed
/// at full precision; only the reported figures are rounded to cents.
pub fn compare(primary: &HotelSeries, comparisons: &[HotelSeries]) -> Result<ComparisonReport, AnalyticsError> {
    let primary_group =
        aggregate((), &primary.observations).map_err(|_| AnalyticsError::NoPrimaryData)?;
    let primary_average = primary_group.average;

    let results = comparisons
        .iter()
        .filter_map(|series| match aggregate((), &series.observations) {
            Ok(group) => Some(compare_one(series, group.average, group.count, primary_average)),
            Err(e) => {
                debug!("Excluding hotel {} from comparison: {}", series.hotel.id, e);
                None
            }
        })
        .collect();

    let total_days = primary
        .observations
        .iter()
        .filter(|o| o.valid_price().is_some())
        .map(check_in_key)
        .collect::<HashSet<_>>()
        .len();

    Ok(ComparisonReport {
        primary: PrimarySummary {
            hotel: primary.hotel.clone(),
            average_price: round2(primary_average),
            data_points: primary_group.count,
        },
        primary_average,
        total_days,
        results,
    })
}

fn compare_one(series: &HotelSeries, average: f64, data_points: usize, primary_average: f64) -> ComparisonResult {
    let difference = average - primary_average;
    let percentage_diff = if primary_average > 0.0 {
        difference / primary_average * 100.0
    } else {
        0.0
    };

    ComparisonResult {
        hotel: series.hotel.clone(),
        average_price: round2(average),
        difference: round2(difference),
        percentage_diff: round2(percentage_diff),
        trend: Trend::classify(difference),
        data_points,
    }
}
