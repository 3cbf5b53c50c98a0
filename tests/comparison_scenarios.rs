//! End-to-end scenarios for the comparison engine: raw records in, report out.

use hotel_rate_scout::analyzer::aggregate::aggregate;
use hotel_rate_scout::model::Trend;
use hotel_rate_scout::{Analyzer, AnalyzerImpl, DateRange, Hotel, HotelSeries, PriceObservation};

// =============================================================================
// Helpers
// =============================================================================

fn hotel(id: i64, name: &str) -> Hotel {
    Hotel {
        id,
        name: name.to_string(),
        city: "Porto".into(),
        country: "Portugal".into(),
        star_rating: None,
        user_rating: None,
        amenities: Vec::new(),
    }
}

fn quote(id: i64, hotel_id: i64, check_in: &str, price: f64, scraped_at: &str) -> PriceObservation {
    PriceObservation {
        id,
        hotel_id,
        room_type: Some("Double Room".into()),
        board_type: Some("Breakfast included".into()),
        price: Some(price),
        currency: "EUR".into(),
        check_in_date: check_in.into(),
        check_out_date: None,
        scraped_at: scraped_at.into(),
        source: "booking.com".into(),
    }
}

fn june_window() -> DateRange {
    DateRange::parse("2025-06-01", "2025-06-03").unwrap()
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn competitor_twenty_percent_above_primary() {
    let primary = HotelSeries::new(
        hotel(1, "Ribeira Suites"),
        vec![
            quote(1, 1, "2025-06-01", 100.0, "2025-05-20T09:00:00Z"),
            quote(2, 1, "2025-06-02", 100.0, "2025-05-20T09:00:00Z"),
            quote(3, 1, "2025-06-03", 100.0, "2025-05-20T09:00:00Z"),
        ],
    );
    let rival = HotelSeries::new(
        hotel(2, "Douro View"),
        vec![
            quote(4, 2, "2025-06-01", 120.0, "2025-05-20T09:00:00Z"),
            quote(5, 2, "2025-06-02", 120.0, "2025-05-20T09:00:00Z"),
            quote(6, 2, "2025-06-03", 120.0, "2025-05-20T09:00:00Z"),
        ],
    );

    let analysis = AnalyzerImpl::new()
        .compare_hotels(&primary, &[rival], &june_window())
        .unwrap();
    let report = &analysis.report;

    assert_eq!(report.primary.average_price, 100.0);
    assert_eq!(report.total_days, 3);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].difference, 20.0);
    assert_eq!(report.results[0].percentage_diff, 20.0);
    assert_eq!(report.results[0].trend, Trend::Higher);

    let chart = &analysis.chart;
    assert_eq!(chart.len(), 3);
    assert!(chart.iter().all(|p| p.price("Ribeira Suites") == Some(100.0)));
    assert!(chart.iter().all(|p| p.price("Douro View") == Some(120.0)));
}

#[test]
fn competitor_with_data_only_outside_window_is_excluded() {
    let primary = HotelSeries::new(
        hotel(1, "Ribeira Suites"),
        vec![quote(1, 1, "2025-06-02", 100.0, "2025-05-20T09:00:00Z")],
    );
    let rival = HotelSeries::new(
        hotel(2, "Douro View"),
        vec![
            quote(2, 2, "2025-05-28", 80.0, "2025-05-20T09:00:00Z"),
            quote(3, 2, "2025-06-10", 90.0, "2025-05-20T09:00:00Z"),
        ],
    );

    let analysis = AnalyzerImpl::new()
        .compare_hotels(&primary, &[rival], &june_window())
        .unwrap();

    assert!(analysis.report.results.is_empty());
    assert!(analysis.chart.iter().all(|p| p.price("Douro View").is_none()));
}

#[test]
fn rescraped_price_keeps_history_in_the_mean() {
    let group = vec![
        quote(1, 1, "2025-06-01", 100.0, "2025-05-20T09:00:00Z"),
        quote(2, 1, "2025-06-01", 130.0, "2025-05-22T09:00:00Z"),
    ];
    let summary = aggregate("2025-06-01", &group).unwrap();

    assert_eq!(summary.most_recent.id, 2);
    assert_eq!(summary.average, 115.0);
    assert_eq!(summary.count, 2);
}

#[test]
fn calendar_is_neutral_when_every_day_costs_the_same() {
    let observations: Vec<PriceObservation> = (1..=3)
        .map(|d| quote(d, 1, &format!("2025-06-0{}", d), 75.0, "2025-05-20T09:00:00Z"))
        .collect();

    let summary = AnalyzerImpl::new().summarize(&observations, &june_window()).unwrap();

    assert_eq!(summary.calendar.len(), 3);
    assert!(summary.calendar.values().all(|cell| cell.intensity == 0.5));
}

#[test]
fn reversed_window_is_reported_to_the_caller() {
    assert!(DateRange::parse("2025-06-03", "2025-06-01").is_err());
}
