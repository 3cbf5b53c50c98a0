use crate::analyzer::aggregate::summarize_by_date;
use crate::model::PriceObservation;
use crate::utils::{parse_date, round2};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

pub const MIN_INTENSITY: f64 = 0.1;
pub const MAX_INTENSITY: f64 = 0.9;
pub const NEUTRAL_INTENSITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatCell {
    pub average_price: f64,
    pub count: usize,
    pub intensity: f64,
}

/// Calendar heat map of the given (already date-filtered) observations.
/// Intensity scales each date's average between the lowest and highest
/// daily average of the whole window.
pub fn heatmap(observations: &[PriceObservation]) -> BTreeMap<NaiveDate, HeatCell> {
    let daily: Vec<(NaiveDate, f64, usize)> = summarize_by_date(observations)
        .into_iter()
        .filter_map(|group| parse_date(&group.key).map(|date| (date, group.average, group.count)))
        .collect();

    let global_min = daily.iter().map(|(_, avg, _)| *avg).fold(f64::INFINITY, f64::min);
    let global_max = daily.iter().map(|(_, avg, _)| *avg).fold(f64::NEG_INFINITY, f64::max);

    daily
        .into_iter()
        .map(|(date, average, count)| {
            let cell = HeatCell {
                average_price: round2(average),
                count,
                intensity: intensity(average, global_min, global_max),
            };
            (date, cell)
        })
        .collect()
}

fn intensity(average: f64, global_min: f64, global_max: f64) -> f64 {
    if global_max > global_min {
        ((average - global_min) / (global_max - global_min)).clamp(MIN_INTENSITY, MAX_INTENSITY)
    } else {
        NEUTRAL_INTENSITY
    }
}
