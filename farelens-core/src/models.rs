use chrono::{DateTime, FixedOffset, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::duration::parse_duration_minutes;

/// Lenient parse for upstream decimal strings.
///
/// Malformed input degrades to `0.0` rather than erroring; upstream payloads
/// are loosely well-formed but not guaranteed, and callers must tolerate the
/// zero.
pub fn lenient_price(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0)
}

/// Price block attached to an offer. `total >= base >= 0`, both decimal
/// strings as delivered by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Price {
    pub total: String,
    pub base: String,
    pub currency: String,
}

/// One priced flight itinerary option from a search response.
///
/// Immutable for the lifetime of a result set; a new search replaces the
/// whole list. `itineraries[0]` is the outbound direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    #[serde(default)]
    pub id: String,
    pub price: Price,
    pub itineraries: Vec<Itinerary>,
}

impl FlightOffer {
    /// Total price as a number, leniently parsed.
    pub fn total_price(&self) -> f64 {
        lenient_price(&self.price.total)
    }

    /// The outbound itinerary, when present.
    pub fn outbound(&self) -> Option<&Itinerary> {
        self.itineraries.first()
    }

    /// Outbound travel time in minutes; 0 when the offer has no outbound.
    pub fn outbound_duration_minutes(&self) -> u32 {
        self.outbound().map(Itinerary::duration_minutes).unwrap_or(0)
    }

    /// Stop count of the outbound itinerary; 0 when absent.
    pub fn outbound_stops(&self) -> usize {
        self.outbound().map(Itinerary::stop_count).unwrap_or(0)
    }

    /// Marketing carrier of the outbound first segment.
    pub fn outbound_carrier(&self) -> Option<&str> {
        self.outbound()
            .and_then(|itinerary| itinerary.segments.first())
            .map(|segment| segment.carrier_code.as_str())
    }

    /// Departure timestamp of the outbound first segment.
    pub fn departure_at(&self) -> Option<DateTime<FixedOffset>> {
        self.outbound()
            .and_then(|itinerary| itinerary.segments.first())
            .map(|segment| segment.departure.at)
    }

    /// Local departure hour of the outbound first segment; 0 when absent.
    pub fn departure_hour(&self) -> u32 {
        self.departure_at().map(|at| at.hour()).unwrap_or(0)
    }

    /// Local arrival hour of the outbound last segment; 0 when absent.
    pub fn arrival_hour(&self) -> u32 {
        self.outbound()
            .and_then(|itinerary| itinerary.segments.last())
            .map(|segment| segment.arrival.at.hour())
            .unwrap_or(0)
    }
}

/// One direction of travel: a non-empty chain of flight legs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    /// Provider duration token, e.g. `PT5H30M`.
    pub duration: String,
    pub segments: Vec<Segment>,
}

impl Itinerary {
    /// Total travel time in minutes, leniently parsed from the token.
    pub fn duration_minutes(&self) -> u32 {
        parse_duration_minutes(&self.duration)
    }

    /// Stop count: one less than the number of segments.
    pub fn stop_count(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }
}

/// A single non-stop flight leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub departure: FlightEndpoint,
    pub arrival: FlightEndpoint,
    /// Two-letter marketing carrier code.
    pub carrier_code: String,
    /// Flight number within the carrier.
    pub number: String,
    pub aircraft: Aircraft,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// Airport + local timestamp pair for one end of a segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightEndpoint {
    pub iata_code: String,
    /// Timestamp with timezone offset; the hour is the airport-local hour.
    pub at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub code: String,
}

/// Candidate destination from the inspiration search, offered to the user
/// when their own search came back empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSuggestion {
    pub destination: String,
    pub departure_date: NaiveDate,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_deserialization() {
        let json = r#"
            {
                "id": "1",
                "price": { "total": "523.40", "base": "489.00", "currency": "USD" },
                "itineraries": [
                    {
                        "duration": "PT8H15M",
                        "segments": [
                            {
                                "departure": { "iataCode": "JFK", "at": "2026-09-14T09:30:00-04:00" },
                                "arrival": { "iataCode": "LHR", "at": "2026-09-14T21:45:00+01:00" },
                                "carrierCode": "BA",
                                "number": "112",
                                "aircraft": { "code": "77W" }
                            }
                        ]
                    }
                ]
            }
        "#;
        let offer: FlightOffer = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(offer.total_price(), 523.40);
        assert_eq!(offer.outbound_duration_minutes(), 495);
        assert_eq!(offer.outbound_stops(), 0);
        assert_eq!(offer.outbound_carrier(), Some("BA"));
        assert_eq!(offer.departure_hour(), 9);
        assert_eq!(offer.arrival_hour(), 21);
    }

    #[test]
    fn test_missing_outbound_degrades_to_zero() {
        let offer = FlightOffer {
            id: String::new(),
            price: Price {
                total: "not-a-number".to_string(),
                base: "0".to_string(),
                currency: "USD".to_string(),
            },
            itineraries: Vec::new(),
        };
        assert_eq!(offer.total_price(), 0.0);
        assert_eq!(offer.outbound_duration_minutes(), 0);
        assert_eq!(offer.outbound_stops(), 0);
        assert_eq!(offer.outbound_carrier(), None);
        assert_eq!(offer.departure_hour(), 0);
    }

    #[test]
    fn test_lenient_price() {
        assert_eq!(lenient_price("199.99"), 199.99);
        assert_eq!(lenient_price(" 42 "), 42.0);
        assert_eq!(lenient_price("garbage"), 0.0);
        assert_eq!(lenient_price(""), 0.0);
    }
}
