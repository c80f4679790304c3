use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::TrendPoint;

/// Generate a period-length daily series around a base price.
///
/// Used when the provider has no real series for a route: a slow sine swell
/// (±15%) plus per-day noise (±5%), so every price lands within ±20% of the
/// base. Noise comes from the injected RNG; seeded callers get reproducible
/// series.
pub fn synthesize_series<R: Rng>(
    start: NaiveDate,
    base_price: f64,
    days: usize,
    rng: &mut R,
) -> Vec<TrendPoint> {
    (0..days)
        .map(|i| {
            let swell = (i as f64 / 5.0).sin() * 0.15;
            let noise = rng.gen::<f64>() * 0.1 - 0.05;
            let price = (base_price * (1.0 + swell + noise)).round();
            TrendPoint::daily(start + Duration::days(i as i64), price)
        })
        .collect()
}
