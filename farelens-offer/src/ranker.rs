use serde::{Deserialize, Serialize};

use farelens_core::models::FlightOffer;

/// Weights for the optimal-ranking score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub price_weight: f64,
    pub duration_weight: f64,
    /// Convenience contribution for outbound departures between 08:00 and
    /// 20:00 local time, inclusive.
    pub daytime_bonus: f64,
    /// Convenience contribution for departures outside that window.
    pub off_hours_bonus: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            price_weight: 0.5,
            duration_weight: 0.3,
            daytime_bonus: 0.2,
            off_hours_bonus: 0.1,
        }
    }
}

/// Ranks offers by a normalized desirability score (rule-based).
pub struct OfferRanker {
    config: ScoringConfig,
}

impl OfferRanker {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Desirability of one offer relative to the whole result set.
    ///
    /// Price and duration are normalized against the set maxima, so the
    /// score only means something within the result set it was computed
    /// against. A set-wide maximum of zero contributes nothing — the
    /// singleton-set case is degenerate but defined.
    pub fn score(&self, offer: &FlightOffer, offers: &[FlightOffer]) -> f64 {
        let max_price = offers
            .iter()
            .map(FlightOffer::total_price)
            .fold(0.0_f64, f64::max);
        let max_duration = offers
            .iter()
            .map(FlightOffer::outbound_duration_minutes)
            .max()
            .unwrap_or(0);

        let price_score = if max_price > 0.0 {
            (1.0 - offer.total_price() / max_price) * self.config.price_weight
        } else {
            0.0
        };

        let duration_score = if max_duration > 0 {
            let normalized =
                f64::from(offer.outbound_duration_minutes()) / f64::from(max_duration);
            (1.0 - normalized) * self.config.duration_weight
        } else {
            0.0
        };

        let hour = offer.departure_hour();
        let convenience = if (8..=20).contains(&hour) {
            self.config.daytime_bonus
        } else {
            self.config.off_hours_bonus
        };

        price_score + duration_score + convenience
    }

    /// Order a result list by descending score ("optimal" sort mode).
    ///
    /// Stable: equal scores keep their original relative order, since no
    /// tertiary tie-break is defined.
    pub fn rank(&self, offers: &[FlightOffer]) -> Vec<FlightOffer> {
        let mut scored: Vec<(f64, FlightOffer)> = offers
            .iter()
            .map(|offer| (self.score(offer, offers), offer.clone()))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(_, offer)| offer).collect()
    }
}

impl Default for OfferRanker {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
