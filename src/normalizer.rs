use crate::model::PriceObservation;
use tracing::warn;

/// Cleans up freshly loaded observations in place. Records whose check-out
/// does not fall strictly after check-in are removed.
pub fn normalize_all(observations: &mut Vec<PriceObservation>) {
    for observation in observations.iter_mut() {
        normalize_observation(observation);
    }

    observations.retain(|observation| {
        let valid = has_valid_stay(observation);
        if !valid {
            warn!(
                "Dropping price {} of hotel {}: check-out {:?} is not after check-in {}",
                observation.id, observation.hotel_id, observation.check_out_date, observation.check_in_date
            );
        }
        valid
    });
}

fn normalize_observation(observation: &mut PriceObservation) {
    observation.room_type = clean_label(observation.room_type.take());
    observation.board_type = clean_label(observation.board_type.take());
    observation.currency = observation.currency.trim().to_uppercase();
}

fn clean_label(label: Option<String>) -> Option<String> {
    label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}

// Unparsable dates are left for the date filter to drop.
fn has_valid_stay(observation: &PriceObservation) -> bool {
    match (observation.check_in(), observation.check_out()) {
        (Some(check_in), Some(check_out)) => check_out > check_in,
        _ => true,
    }
}
