use crate::analyzer::grouping::{check_in_key, group_by};
use crate::model::PriceObservation;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Scrape history of one room type on one check-in date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceHistory {
    pub room_type: String,
    pub check_in_date: String,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
    pub latest_price: Option<f64>,
    pub price_changes: u32,
    pub observations: usize,
}

/// Walks every (room type, check-in date) history in scrape order and counts
/// how often the quoted price moved.
pub fn build_price_history(observations: &[PriceObservation]) -> Vec<PriceHistory> {
    let groups = group_by(observations, |o| {
        Some((o.room_type_label().to_string(), check_in_key(o)))
    });

    groups
        .into_iter()
        .map(|((room_type, check_in_date), mut members)| {
            members.sort_by_key(|o| o.scraped());

            let mut price_changes = 0;
            let mut last_price: Option<f64> = None;
            for price in members.iter().filter_map(|o| o.valid_price()) {
                if let Some(previous) = last_price {
                    if (price - previous).abs() > f64::EPSILON {
                        price_changes += 1;
                    }
                }
                last_price = Some(price);
            }

            let seen: Vec<DateTime<Utc>> = members.iter().filter_map(|o| o.scraped()).collect();

            PriceHistory {
                room_type,
                check_in_date,
                first_seen: seen.first().copied(),
                last_seen: seen.last().copied(),
                latest_price: last_price,
                price_changes,
                observations: members.len(),
            }
        })
        .collect()
}
