use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

pub const MIN_ADULTS: u32 = 1;
pub const MAX_ADULTS: u32 = 9;
pub const MAX_CHILDREN: u32 = 8;
pub const MAX_INFANTS: u32 = 4;

/// Cabin class requested for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl TravelClass {
    /// Wire value used in provider query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "ECONOMY",
            TravelClass::PremiumEconomy => "PREMIUM_ECONOMY",
            TravelClass::Business => "BUSINESS",
            TravelClass::First => "FIRST",
        }
    }
}

/// One flight search as submitted by the search form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub infants: u32,
    #[serde(default)]
    pub travel_class: TravelClass,
}

fn default_adults() -> u32 {
    1
}

impl SearchRequest {
    /// One-way request with default passenger counts.
    pub fn one_way(origin: &str, destination: &str, departure_date: NaiveDate) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date,
            return_date: None,
            adults: 1,
            children: 0,
            infants: 0,
            travel_class: TravelClass::Economy,
        }
    }

    /// Reject requests the provider would refuse anyway: malformed airport
    /// codes, out-of-range passenger counts, a return date before departure.
    pub fn validate(&self) -> CoreResult<()> {
        if !is_iata_code(&self.origin) || !is_iata_code(&self.destination) {
            return Err(CoreError::ValidationError(
                "origin and destination must be 3-letter airport codes".to_string(),
            ));
        }
        if self.adults < MIN_ADULTS || self.adults > MAX_ADULTS {
            return Err(CoreError::ValidationError(format!(
                "adults must be between {MIN_ADULTS} and {MAX_ADULTS}"
            )));
        }
        if self.children > MAX_CHILDREN {
            return Err(CoreError::ValidationError(format!(
                "children must be at most {MAX_CHILDREN}"
            )));
        }
        if self.infants > MAX_INFANTS {
            return Err(CoreError::ValidationError(format!(
                "infants must be at most {MAX_INFANTS}"
            )));
        }
        if let Some(return_date) = self.return_date {
            if return_date < self.departure_date {
                return Err(CoreError::ValidationError(
                    "return date must be after departure date".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Whether a string looks like an IATA airport code (three ASCII uppercase
/// letters).
pub fn is_iata_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}
