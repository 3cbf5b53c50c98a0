use crate::model::{AnalyticsError, DateRange};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// JSON document with `hotels` and `prices` arrays.
    pub snapshot_path: String,
    pub primary_hotel_id: i64,
    #[serde(default)]
    pub comparison_hotel_ids: Vec<i64>,
    pub start_date: String,
    pub end_date: String,
}

impl AppConfig {
    pub fn date_range(&self) -> Result<DateRange, AnalyticsError> {
        DateRange::parse(&self.start_date, &self.end_date)
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn parses_config_and_range() {
        let raw = r#"{
            "snapshot_path": "prices.json",
            "primary_hotel_id": 1,
            "comparison_hotel_ids": [2, 3],
            "start_date": "2025-06-01",
            "end_date": "2025-06-07"
        }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.comparison_hotel_ids, vec![2, 3]);

        let range = config.date_range().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let raw = r#"{
            "snapshot_path": "prices.json",
            "primary_hotel_id": 1,
            "start_date": "2025-06-07",
            "end_date": "2025-06-01"
        }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert!(config.comparison_hotel_ids.is_empty());
        assert!(matches!(
            config.date_range(),
            Err(AnalyticsError::InvalidRange { .. })
        ));
    }
}
