use serde::{Deserialize, Serialize};

use farelens_core::models::FlightOffer;

/// Sort order for a result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    Departure,
}

/// Return a new list ordered ascending by the key.
///
/// The sort is stable: offers with equal keys keep their original relative
/// order. Malformed prices and duration tokens parse leniently to zero, so
/// they sort first rather than producing NaN comparisons.
pub fn sort_offers(offers: &[FlightOffer], key: SortKey) -> Vec<FlightOffer> {
    let mut sorted = offers.to_vec();
    match key {
        SortKey::Price => {
            sorted.sort_by(|a, b| a.total_price().total_cmp(&b.total_price()));
        }
        SortKey::Duration => {
            sorted.sort_by_key(FlightOffer::outbound_duration_minutes);
        }
        SortKey::Departure => {
            sorted.sort_by_key(FlightOffer::departure_at);
        }
    }
    sorted
}
