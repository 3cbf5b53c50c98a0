use crate::analyzer::aggregate::aggregate;
use crate::model::{AnalyticsError, Hotel, HotelSeries, PriceObservation};
use crate::utils::round2;
use indexmap::IndexSet;
use serde::Serialize;
use tracing::debug;

const HIGH_IMPACT_PERCENT: f64 = 10.0;
const MEDIUM_IMPACT_PERCENT: f64 = 5.0;

/// How a hotel's quoted price moved across successive scrapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceTrend {
    pub hotel_id: i64,
    pub hotel_name: String,
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    /// Population standard deviation of all quoted prices.
    pub volatility: f64,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketEntry {
    pub hotel: Hotel,
    pub price: f64,
    pub currency: String,
}

/// Latest quote of every hotel plus the spread across them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub hotels: Vec<MarketEntry>,
    pub average_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub price_range: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    High,
    Medium,
    Low,
}

impl Significance {
    fn from_percent(percent: f64) -> Self {
        let magnitude = percent.abs();
        if magnitude > HIGH_IMPACT_PERCENT {
            Significance::High
        } else if magnitude > MEDIUM_IMPACT_PERCENT {
            Significance::Medium
        } else {
            Significance::Low
        }
    }
}

/// Price gap between hotels offering an amenity and those that don't.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmenityImpact {
    pub amenity: String,
    pub hotels_with: usize,
    pub hotels_without: usize,
    pub avg_price_with: f64,
    pub avg_price_without: f64,
    pub price_impact: f64,
    pub price_impact_percent: f64,
    pub significance: Significance,
}

pub struct MarketAnalyzer;

impl MarketAnalyzer {
    /// Orders the usable prices by scrape time and reports the movement from
    /// the first to the last one.
    pub fn price_trend(hotel: &Hotel, observations: &[PriceObservation]) -> Result<PriceTrend, AnalyticsError> {
        let mut timeline: Vec<&PriceObservation> = observations
            .iter()
            .filter(|o| o.valid_price().is_some())
            .collect();
        // Stable sort: equal timestamps stay in input order.
        timeline.sort_by_key(|o| o.scraped());

        let prices: Vec<f64> = timeline.iter().filter_map(|o| o.valid_price()).collect();
        let (Some(&first), Some(&last)) = (prices.first(), prices.last()) else {
            return Err(AnalyticsError::NoValidPrices);
        };

        let change = last - first;
        let change_percent = if first > 0.0 { change / first * 100.0 } else { 0.0 };

        Ok(PriceTrend {
            hotel_id: hotel.id,
            hotel_name: hotel.name.clone(),
            current_price: last,
            price_change: round2(change),
            price_change_percent: round2(change_percent),
            volatility: round2(Self::std_dev(&prices)),
            data_points: prices.len(),
        })
    }

    /// Trends for every hotel that has usable prices, in input order.
    pub fn price_trends(series: &[HotelSeries]) -> Vec<PriceTrend> {
        series
            .iter()
            .filter_map(|s| match Self::price_trend(&s.hotel, &s.observations) {
                Ok(trend) => Some(trend),
                Err(e) => {
                    debug!("No price trend for hotel {}: {}", s.hotel.id, e);
                    None
                }
            })
            .collect()
    }

    /// Takes each hotel's most recently scraped price and summarizes the
    /// market across hotels. Hotels without usable prices are left out.
    pub fn market_snapshot(series: &[HotelSeries]) -> Result<MarketSnapshot, AnalyticsError> {
        let hotels: Vec<MarketEntry> = series
            .iter()
            .filter_map(|s| {
                let group = aggregate((), &s.observations).ok()?;
                let price = group.most_recent.valid_price()?;
                Some(MarketEntry {
                    hotel: s.hotel.clone(),
                    price,
                    currency: group.most_recent.currency,
                })
            })
            .collect();

        if hotels.is_empty() {
            return Err(AnalyticsError::NoValidPrices);
        }

        let prices: Vec<f64> = hotels.iter().map(|e| e.price).collect();
        let average = prices.iter().sum::<f64>() / prices.len() as f64;
        let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(MarketSnapshot {
            hotels,
            average_price: round2(average),
            min_price: round2(min),
            max_price: round2(max),
            price_range: round2(max - min),
        })
    }

    /// Compares latest quotes of hotels with and without each amenity.
    /// Only hotels with a usable price and at least one amenity take part, and
    /// an amenity is reported only when both sides have hotels. Results are
    /// ordered by the size of the percentage impact, largest first.
    pub fn amenity_impact(series: &[HotelSeries]) -> Vec<AmenityImpact> {
        let quoted: Vec<(&[String], f64)> = series
            .iter()
            .filter(|s| !s.hotel.amenities.is_empty())
            .filter_map(|s| {
                let group = aggregate((), &s.observations).ok()?;
                let price = group.most_recent.valid_price()?;
                Some((s.hotel.amenities.as_slice(), price))
            })
            .collect();

        let amenities: IndexSet<&String> = quoted.iter().flat_map(|(amenities, _)| amenities.iter()).collect();

        let mut impacts: Vec<AmenityImpact> = amenities
            .into_iter()
            .filter_map(|amenity| {
                let (with, without): (Vec<_>, Vec<_>) = quoted
                    .iter()
                    .partition(|(amenities, _)| amenities.contains(amenity));
                if with.is_empty() || without.is_empty() {
                    return None;
                }

                let avg_with = Self::mean_price(&with);
                let avg_without = Self::mean_price(&without);
                let impact = avg_with - avg_without;
                let impact_percent = if avg_without > 0.0 {
                    impact / avg_without * 100.0
                } else {
                    0.0
                };

                Some(AmenityImpact {
                    amenity: amenity.clone(),
                    hotels_with: with.len(),
                    hotels_without: without.len(),
                    avg_price_with: round2(avg_with),
                    avg_price_without: round2(avg_without),
                    price_impact: round2(impact),
                    price_impact_percent: round2(impact_percent),
                    significance: Significance::from_percent(impact_percent),
                })
            })
            .collect();

        // Stable: equal impacts keep first-seen amenity order.
        impacts.sort_by(|a, b| b.price_impact_percent.abs().total_cmp(&a.price_impact_percent.abs()));
        impacts
    }

    fn mean_price(hotels: &[&(&[String], f64)]) -> f64 {
        hotels.iter().map(|(_, price)| price).sum::<f64>() / hotels.len() as f64
    }

    fn std_dev(prices: &[f64]) -> f64 {
        if prices.is_empty() {
            return 0.0;
        }
        let count = prices.len() as f64;
        let mean = prices.iter().sum::<f64>() / count;
        let variance = prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / count;
        variance.sqrt()
    }
}
