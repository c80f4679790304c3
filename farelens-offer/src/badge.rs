use serde::{Deserialize, Serialize};

use farelens_core::models::FlightOffer;

/// Comparative label for an offer within one result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    Cheapest,
    Fastest,
    BestValue,
}

/// Classify one offer against the whole result set.
///
/// Every offer matching the set-wide minimum price is labeled cheapest;
/// among the rest, every offer matching the minimum outbound duration is
/// labeled fastest. All comparisons use the outbound itinerary only.
pub fn classify(offer: &FlightOffer, offers: &[FlightOffer]) -> Option<Badge> {
    if offers.is_empty() {
        return None;
    }

    let min_price = offers
        .iter()
        .map(FlightOffer::total_price)
        .fold(f64::INFINITY, f64::min);
    let min_duration = offers
        .iter()
        .map(FlightOffer::outbound_duration_minutes)
        .min()
        .unwrap_or(0);

    let price = offer.total_price();
    let duration = offer.outbound_duration_minutes();

    if price == min_price {
        return Some(Badge::Cheapest);
    }

    if duration == min_duration {
        return Some(Badge::Fastest);
    }

    // Never reached: the cheapest arm above already claims every offer whose
    // price equals the minimum. Kept until product settles the intended
    // badge precedence.
    if price == min_price && f64::from(duration) <= f64::from(min_duration) * 1.15 {
        return Some(Badge::BestValue);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use farelens_core::models::{Aircraft, FlightEndpoint, Itinerary, Price, Segment};

    fn offer(total: &str, duration: &str) -> FlightOffer {
        FlightOffer {
            id: String::new(),
            price: Price {
                total: total.to_string(),
                base: total.to_string(),
                currency: "USD".to_string(),
            },
            itineraries: vec![Itinerary {
                duration: duration.to_string(),
                segments: vec![Segment {
                    departure: FlightEndpoint {
                        iata_code: "JFK".to_string(),
                        at: DateTime::parse_from_rfc3339("2026-09-14T09:30:00+00:00").unwrap(),
                    },
                    arrival: FlightEndpoint {
                        iata_code: "LHR".to_string(),
                        at: DateTime::parse_from_rfc3339("2026-09-14T17:30:00+00:00").unwrap(),
                    },
                    carrier_code: "BA".to_string(),
                    number: "100".to_string(),
                    aircraft: Aircraft {
                        code: "320".to_string(),
                    },
                    class: None,
                }],
            }],
        }
    }

    #[test]
    fn test_cheapest_and_fastest() {
        let offers = vec![
            offer("200.00", "PT5H0M"),
            offer("350.00", "PT3H20M"),
            offer("500.00", "PT4H0M"),
        ];
        assert_eq!(classify(&offers[0], &offers), Some(Badge::Cheapest));
        assert_eq!(classify(&offers[1], &offers), Some(Badge::Fastest));
        assert_eq!(classify(&offers[2], &offers), None);
    }

    #[test]
    fn test_ties_share_the_badge() {
        let offers = vec![
            offer("200.00", "PT5H0M"),
            offer("200.00", "PT6H0M"),
            offer("300.00", "PT4H0M"),
            offer("310.00", "PT4H0M"),
        ];
        assert_eq!(classify(&offers[0], &offers), Some(Badge::Cheapest));
        assert_eq!(classify(&offers[1], &offers), Some(Badge::Cheapest));
        assert_eq!(classify(&offers[2], &offers), Some(Badge::Fastest));
        assert_eq!(classify(&offers[3], &offers), Some(Badge::Fastest));
    }

    #[test]
    fn test_cheapest_wins_even_when_also_fastest() {
        let offers = vec![offer("200.00", "PT3H0M"), offer("400.00", "PT5H0M")];
        assert_eq!(classify(&offers[0], &offers), Some(Badge::Cheapest));
    }

    // Documented quirk: the best-value label requires the minimum price, but
    // the cheapest label intercepts every minimum-price offer first, so
    // best-value can never be returned. This pins the current behavior.
    #[test]
    fn test_best_value_is_shadowed_by_cheapest() {
        let offers = vec![
            offer("200.00", "PT5H10M"),
            offer("200.00", "PT5H0M"),
            offer("260.00", "PT5H30M"),
        ];
        for candidate in &offers {
            assert_ne!(classify(candidate, &offers), Some(Badge::BestValue));
        }
    }

    #[test]
    fn test_empty_set_has_no_badge() {
        let candidate = offer("200.00", "PT5H0M");
        assert_eq!(classify(&candidate, &[]), None);
    }

    #[test]
    fn test_badge_wire_labels() {
        assert_eq!(serde_json::to_string(&Badge::Cheapest).unwrap(), "\"cheapest\"");
        assert_eq!(serde_json::to_string(&Badge::Fastest).unwrap(), "\"fastest\"");
        assert_eq!(serde_json::to_string(&Badge::BestValue).unwrap(), "\"best-value\"");
    }
}
