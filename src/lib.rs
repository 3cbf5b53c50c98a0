//! Price aggregation and comparison analytics for scraped hotel room rates.
//!
//! Raw observations flow through the date filter, get grouped and aggregated,
//! and end up in comparison reports, chart-ready series and calendar heat maps.

pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod store;
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerImpl};
pub use model::{AnalyticsError, DateRange, Hotel, HotelSeries, PriceObservation, StoreError};
