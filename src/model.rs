// Core structs: Hotel, PriceObservation, DateRange, derived summaries and errors
use crate::utils::{parse_date, parse_datetime};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used whenever an observation carries no room type.
pub const UNKNOWN_ROOM_TYPE: &str = "Unknown Room Type";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub star_rating: Option<f64>,
    #[serde(default)]
    pub user_rating: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// One scraped price quote. Dates are kept as received so that a single
/// malformed record can be dropped without rejecting the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub id: i64,
    pub hotel_id: i64,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub board_type: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: String,
    pub check_in_date: String,
    #[serde(default)]
    pub check_out_date: Option<String>,
    pub scraped_at: String,
    #[serde(default)]
    pub source: String,
}

impl PriceObservation {
    pub fn check_in(&self) -> Option<NaiveDate> {
        parse_date(&self.check_in_date)
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        self.check_out_date.as_deref().and_then(parse_date)
    }

    pub fn scraped(&self) -> Option<DateTime<Utc>> {
        parse_datetime(&self.scraped_at)
    }

    /// The price if it is usable for statistics: present, finite and non-negative.
    pub fn valid_price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite() && *p >= 0.0)
    }

    pub fn room_type_label(&self) -> &str {
        match self.room_type.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => UNKNOWN_ROOM_TYPE,
        }
    }
}

/// Inclusive window of check-in dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalyticsError> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    /// Builds a range from two ISO `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, AnalyticsError> {
        let start_date = parse_date(start).ok_or_else(|| AnalyticsError::InvalidDate(start.to_string()))?;
        let end_date = parse_date(end).ok_or_else(|| AnalyticsError::InvalidDate(end.to_string()))?;
        Self::new(start_date, end_date)
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.start > self.end {
            return Err(AnalyticsError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Summary statistics of one group of observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedGroup<K> {
    pub key: K,
    /// Observations with a usable price.
    pub count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub most_recent: PriceObservation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Higher,
    Lower,
    Same,
}

impl Trend {
    /// Exact comparison against zero, no tolerance band.
    pub fn classify(difference: f64) -> Self {
        if difference > 0.0 {
            Trend::Higher
        } else if difference < 0.0 {
            Trend::Lower
        } else {
            Trend::Same
        }
    }
}

/// A hotel together with its price observations.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelSeries {
    pub hotel: Hotel,
    pub observations: Vec<PriceObservation>,
}

impl HotelSeries {
    pub fn new(hotel: Hotel, observations: Vec<PriceObservation>) -> Self {
        Self { hotel, observations }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub hotel: Hotel,
    pub average_price: f64,
    pub difference: f64,
    pub percentage_diff: f64,
    pub trend: Trend,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrimarySummary {
    pub hotel: Hotel,
    pub average_price: f64,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub primary: PrimarySummary,
    /// Unrounded primary average, the reference for every difference.
    pub primary_average: f64,
    /// Distinct check-in dates with a usable primary price. Several quotes on
    /// one date count once; the number of quotes is `primary.data_points`.
    pub total_days: usize,
    pub results: Vec<ComparisonResult>,
}

#[derive(Debug, Error, PartialEq)]
pub enum AnalyticsError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("cannot aggregate an empty group")]
    EmptyGroup,
    #[error("group has no valid prices")]
    NoValidPrices,
    #[error("primary hotel has no price data in the selected range")]
    NoPrimaryData,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("hotel {0} not found")]
    HotelNotFound(i64),
}
