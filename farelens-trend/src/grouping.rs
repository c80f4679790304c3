use std::collections::BTreeMap;

use chrono::Datelike;

use farelens_core::models::FlightOffer;

use crate::{Period, TrendPoint};

/// Group a daily series for display.
///
/// Short periods (week, month) keep every point. Longer periods reduce to
/// weekly buckets, and the year view to calendar-month buckets; each bucket
/// carries its first date, mean price, min, max and sample count. Input is
/// expected date-ascending and bucket order follows it.
pub fn group_by_period(points: Vec<TrendPoint>, period: Period) -> Vec<TrendPoint> {
    if matches!(period, Period::Week | Period::Month) {
        return points;
    }

    let mut buckets: BTreeMap<(i32, u32, u32), Vec<TrendPoint>> = BTreeMap::new();
    for point in points {
        buckets
            .entry(bucket_key(&point, period))
            .or_default()
            .push(point);
    }

    buckets
        .into_values()
        .filter_map(|bucket| reduce_bucket(&bucket))
        .collect()
}

/// Bucket key per period: calendar month for the year view, month-scoped
/// week index (`day / 7`) for the quarter and half-year views.
fn bucket_key(point: &TrendPoint, period: Period) -> (i32, u32, u32) {
    let date = point.date;
    match period {
        Period::Year => (date.year(), date.month(), 0),
        _ => (date.year(), date.month(), date.day() / 7),
    }
}

fn reduce_bucket(bucket: &[TrendPoint]) -> Option<TrendPoint> {
    let first = bucket.first()?;
    let count = bucket.len();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for point in bucket {
        min = min.min(point.price);
        max = max.max(point.price);
        sum += point.price;
    }
    Some(TrendPoint {
        date: first.date,
        price: (sum / count as f64).round(),
        min_price: Some(min.round()),
        max_price: Some(max.round()),
        sample_count: Some(count),
    })
}

/// Build a per-date series from the offers currently on screen.
///
/// Used when no provider series exists at all: offers bucket by their
/// outbound departure calendar date, one point per distinct date with
/// mean/min/max/count, ascending.
pub fn series_from_offers(offers: &[FlightOffer]) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<chrono::NaiveDate, Vec<f64>> = BTreeMap::new();
    for offer in offers {
        let Some(at) = offer.departure_at() else {
            continue;
        };
        by_date
            .entry(at.date_naive())
            .or_default()
            .push(offer.total_price());
    }

    by_date
        .into_iter()
        .map(|(date, prices)| {
            let count = prices.len();
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            let mut sum = 0.0;
            for price in &prices {
                min = min.min(*price);
                max = max.max(*price);
                sum += price;
            }
            TrendPoint {
                date,
                price: (sum / count as f64).round(),
                min_price: Some(min.round()),
                max_price: Some(max.round()),
                sample_count: Some(count),
            }
        })
        .collect()
}
