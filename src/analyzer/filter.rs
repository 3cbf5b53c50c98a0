use crate::model::{AnalyticsError, DateRange, HotelSeries, PriceObservation};
use tracing::debug;

/// Keeps the observations whose check-in date lies inside `range`, in input
/// order. Records with an unparsable check-in date are dropped.
pub fn filter_by_date_range(
    observations: &[PriceObservation],
    range: &DateRange,
) -> Result<Vec<PriceObservation>, AnalyticsError> {
    range.validate()?;

    let mut kept = Vec::new();
    for observation in observations {
        match observation.check_in() {
            Some(date) if range.contains(date) => kept.push(observation.clone()),
            Some(_) => {}
            None => debug!(
                "Dropping price {}: unparsable check-in date {:?}",
                observation.id, observation.check_in_date
            ),
        }
    }
    Ok(kept)
}

/// Applies the date filter to a hotel's whole series.
pub fn filter_series(series: &HotelSeries, range: &DateRange) -> Result<HotelSeries, AnalyticsError> {
    Ok(HotelSeries::new(
        series.hotel.clone(),
        filter_by_date_range(&series.observations, range)?,
    ))
}
