// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod aggregate;
pub mod comparison;
pub mod filter;
pub mod grouping;
pub mod heatmap;
pub mod lifecycle;
pub mod market_indicators;
pub mod price_analysis;
pub mod series;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, AnalyzerImpl, ComparisonAnalysis, HotelSummary};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::{Hotel, PriceObservation};

    pub fn hotel(id: i64, name: &str) -> Hotel {
        Hotel {
            id,
            name: name.to_string(),
            city: "Lisbon".into(),
            country: "Portugal".into(),
            star_rating: Some(4.0),
            user_rating: Some(8.6),
            amenities: vec!["WiFi".into()],
        }
    }

    pub fn obs(id: i64, check_in: &str, price: Option<f64>, scraped_at: &str) -> PriceObservation {
        PriceObservation {
            id,
            hotel_id: 1,
            room_type: Some("Standard Double".into()),
            board_type: None,
            price,
            currency: "EUR".into(),
            check_in_date: check_in.into(),
            check_out_date: None,
            scraped_at: scraped_at.into(),
            source: "booking.com".into(),
        }
    }

    pub fn obs_room(id: i64, check_in: &str, price: Option<f64>, room_type: Option<&str>) -> PriceObservation {
        PriceObservation {
            room_type: room_type.map(String::from),
            ..obs(id, check_in, price, "2025-05-01T10:00:00Z")
        }
    }
}
