use crate::analyzer::aggregate::average_price;
use crate::analyzer::grouping::by_check_in_date;
use crate::model::HotelSeries;
use crate::utils::{parse_date, round2};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// One chart row: a date plus the average price of every hotel with data on
/// that date, keyed by hotel name. A missing name means no data that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub prices: BTreeMap<String, f64>,
}

impl SeriesPoint {
    pub fn price(&self, hotel_name: &str) -> Option<f64> {
        self.prices.get(hotel_name).copied()
    }
}

/// Merges the per-date averages of the primary and comparison hotels into
/// one ascending sequence with a row per distinct check-in date. Hotels
/// sharing a name share a column; the later hotel's value is kept.
pub fn align_series(primary: &HotelSeries, comparisons: &[HotelSeries]) -> Vec<SeriesPoint> {
    let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut rows: BTreeMap<NaiveDate, BTreeMap<String, f64>> = BTreeMap::new();

    for series in std::iter::once(primary).chain(comparisons) {
        for (key, members) in by_check_in_date(&series.observations).into_iter() {
            // Keys are display strings; sorting needs the real date back.
            let Some(date) = parse_date(&key) else {
                debug!("Skipping unparsable date {:?} of hotel {}", key, series.hotel.id);
                continue;
            };
            dates.insert(date);
            match average_price(&members) {
                Ok(average) => {
                    let replaced = rows
                        .entry(date)
                        .or_default()
                        .insert(series.hotel.name.clone(), round2(average));
                    if let Some(previous) = replaced {
                        debug!(
                            "Hotel {} replaces {:.2} under shared name {:?} on {}",
                            series.hotel.id, previous, series.hotel.name, date
                        );
                    }
                }
                Err(e) => debug!("No chart value for hotel {} on {}: {}", series.hotel.id, date, e),
            }
        }
    }

    dates
        .into_iter()
        .map(|date| SeriesPoint {
            date,
            prices: rows.remove(&date).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::test_support::{hotel, obs};
    use crate::model::PriceObservation;

    fn series(id: i64, name: &str, prices: &[(&str, Option<f64>)]) -> HotelSeries {
        let observations: Vec<PriceObservation> = prices
            .iter()
            .enumerate()
            .map(|(i, (date, price))| obs(id * 100 + i as i64, date, *price, "2025-05-01T10:00:00Z"))
            .collect();
        HotelSeries::new(hotel(id, name), observations)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn rows_are_sorted_and_sparse() {
        let primary = series(
            1,
            "Harbor Inn",
            &[("2025-06-03", Some(100.0)), ("2025-06-01", Some(90.0)), ("2025-06-03", Some(110.0))],
        );
        let rival = series(2, "Grand Plaza", &[("2025-06-02", Some(150.0)), ("2025-06-03", Some(160.0))]);
        let points = align_series(&primary, &[rival]);

        let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);

        assert_eq!(points[0].price("Harbor Inn"), Some(90.0));
        assert_eq!(points[0].price("Grand Plaza"), None);
        assert_eq!(points[1].price("Harbor Inn"), None);
        assert_eq!(points[1].price("Grand Plaza"), Some(150.0));
        assert_eq!(points[2].price("Harbor Inn"), Some(105.0));
        assert_eq!(points[2].price("Grand Plaza"), Some(160.0));
    }

    #[test]
    fn one_row_per_distinct_date_even_without_prices() {
        let primary = series(1, "A", &[("2025-06-01", Some(100.0)), ("2025-06-04", None)]);
        let rival = series(2, "B", &[("2025-06-01", Some(80.0)), ("2025-06-02", Some(85.0))]);
        let points = align_series(&primary, &[rival]);

        assert_eq!(points.len(), 3);
        assert!(points[2].prices.is_empty());
        assert!(
            points
                .iter()
                .filter(|p| p.date == day(1))
                .all(|p| p.price("A").is_some())
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let primary = series(1, "A", &[("2025-06-02", Some(100.0)), ("2025-06-01", Some(95.0))]);
        let rival = series(2, "B", &[("2025-06-03", Some(80.0))]);
        let comparisons = vec![rival];

        assert_eq!(align_series(&primary, &comparisons), align_series(&primary, &comparisons));
    }

    #[test]
    fn shared_name_keeps_the_later_hotel() {
        let primary = series(1, "Ibis", &[("2025-06-01", Some(100.0)), ("2025-06-02", Some(110.0))]);
        let namesake = series(2, "Ibis", &[("2025-06-01", Some(300.0))]);
        let points = align_series(&primary, &[namesake]);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].prices.len(), 1);
        assert_eq!(points[0].price("Ibis"), Some(300.0));
        assert_eq!(points[1].price("Ibis"), Some(110.0));
    }

    #[test]
    fn serializes_hotel_names_as_columns() {
        let primary = series(1, "A", &[("2025-06-01", Some(100.0))]);
        let points = align_series(&primary, &[]);
        let json = serde_json::to_value(&points).unwrap();

        assert_eq!(json[0]["date"], "2025-06-01");
        assert_eq!(json[0]["A"], 100.0);
    }
}
