use crate::analyzer::grouping::{by_check_in_date, by_month, by_room_type, PriceGroups};
use crate::model::{AggregatedGroup, AnalyticsError, PriceObservation};
use std::hash::Hash;
use tracing::debug;

/// Reduces one group to count, mean, min, max and the most recently scraped
/// observation. Members without a usable price are ignored; the group fails
/// with `NoValidPrices` when none is left.
pub fn aggregate<K>(key: K, group: &[PriceObservation]) -> Result<AggregatedGroup<K>, AnalyticsError> {
    if group.is_empty() {
        return Err(AnalyticsError::EmptyGroup);
    }

    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut most_recent: Option<&PriceObservation> = None;

    for observation in group {
        let Some(price) = observation.valid_price() else {
            continue;
        };
        count += 1;
        sum += price;
        min = min.min(price);
        max = max.max(price);

        // Strictly later wins, so the first of equal timestamps is kept.
        let newer = match most_recent {
            None => true,
            Some(current) => observation.scraped() > current.scraped(),
        };
        if newer {
            most_recent = Some(observation);
        }
    }

    let most_recent = most_recent.ok_or(AnalyticsError::NoValidPrices)?;

    Ok(AggregatedGroup {
        key,
        count,
        average: sum / count as f64,
        min,
        max,
        most_recent: most_recent.clone(),
    })
}

/// Mean of the usable prices of `observations`.
pub fn average_price(observations: &[PriceObservation]) -> Result<f64, AnalyticsError> {
    aggregate((), observations).map(|group| group.average)
}

/// Aggregates every group in key order, leaving out groups that have no
/// usable price.
pub fn summarize_groups<K>(groups: PriceGroups<K>) -> Vec<AggregatedGroup<K>>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    groups
        .into_iter()
        .filter_map(|(key, members)| match aggregate(key.clone(), &members) {
            Ok(summary) => Some(summary),
            Err(e) => {
                debug!("Skipping group {:?}: {}", key, e);
                None
            }
        })
        .collect()
}

pub fn summarize_by_date(observations: &[PriceObservation]) -> Vec<AggregatedGroup<String>> {
    summarize_groups(by_check_in_date(observations))
}

pub fn summarize_by_room_type(observations: &[PriceObservation]) -> Vec<AggregatedGroup<String>> {
    summarize_groups(by_room_type(observations))
}

/// Seasonal view: one summary per check-in (year, month) that has data.
pub fn summarize_by_month(observations: &[PriceObservation]) -> Vec<AggregatedGroup<(i32, u32)>> {
    summarize_groups(by_month(observations))
}
