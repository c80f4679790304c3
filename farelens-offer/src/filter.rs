use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use farelens_core::models::FlightOffer;

/// User-selected constraint set applied to one result list.
///
/// Owned by the presentation layer and consumed read-only here. Every bound
/// is independently optional; an absent bound passes everything through,
/// and an empty airline list means no carrier restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Inclusive price ceiling.
    pub max_price: Option<f64>,
    /// Allowed marketing carriers, matched against the outbound first
    /// segment.
    pub airlines: Vec<String>,
    /// Maximum stop count on the outbound itinerary.
    pub max_stops: Option<usize>,
    /// Inclusive departure hour-of-day window, 0-24.
    pub departure_hours: Option<(u32, u32)>,
    /// Inclusive arrival hour-of-day window, 0-24.
    pub arrival_hours: Option<(u32, u32)>,
    /// Maximum outbound duration in minutes.
    pub max_duration_minutes: Option<u32>,
}

/// Keep the offers satisfying every present bound, in their original order.
///
/// Departure attributes come from the outbound itinerary's first segment and
/// arrival attributes from its last; the return itinerary is not consulted
/// for stop or time bounds.
pub fn filter_offers(offers: &[FlightOffer], spec: &FilterSpec) -> Vec<FlightOffer> {
    offers
        .iter()
        .filter(|offer| matches_spec(offer, spec))
        .cloned()
        .collect()
}

fn matches_spec(offer: &FlightOffer, spec: &FilterSpec) -> bool {
    if let Some(ceiling) = spec.max_price {
        if offer.total_price() > ceiling {
            return false;
        }
    }

    if !spec.airlines.is_empty() {
        let allowed = offer
            .outbound_carrier()
            .map(|carrier| spec.airlines.iter().any(|a| a == carrier))
            .unwrap_or(false);
        if !allowed {
            return false;
        }
    }

    if let Some(max_stops) = spec.max_stops {
        if offer.outbound_stops() > max_stops {
            return false;
        }
    }

    if let Some((min_hour, max_hour)) = spec.departure_hours {
        let hour = offer.departure_hour();
        if hour < min_hour || hour > max_hour {
            return false;
        }
    }

    if let Some((min_hour, max_hour)) = spec.arrival_hours {
        let hour = offer.arrival_hour();
        if hour < min_hour || hour > max_hour {
            return false;
        }
    }

    if let Some(max_minutes) = spec.max_duration_minutes {
        if offer.outbound_duration_minutes() > max_minutes {
            return false;
        }
    }

    true
}

/// Distinct carrier codes across the outbound segments of a result list,
/// sorted. Feeds the airline filter control.
pub fn unique_airlines(offers: &[FlightOffer]) -> Vec<String> {
    let mut codes = BTreeSet::new();
    for offer in offers {
        if let Some(outbound) = offer.outbound() {
            for segment in &outbound.segments {
                codes.insert(segment.carrier_code.clone());
            }
        }
    }
    codes.into_iter().collect()
}

/// Lowest and highest total price in a result list; `(0, 0)` when empty.
/// Feeds the price slider bounds.
pub fn price_range(offers: &[FlightOffer]) -> (f64, f64) {
    if offers.is_empty() {
        return (0.0, 0.0);
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for offer in offers {
        let price = offer.total_price();
        min = min.min(price);
        max = max.max(price);
    }
    (min, max)
}
