use std::sync::atomic::{AtomicU64, Ordering};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use farelens_core::models::FlightOffer;
use farelens_core::supplier::PriceTrendSource;

use crate::grouping::{group_by_period, series_from_offers};
use crate::synthetic::synthesize_series;
use crate::{TrendPoint, TrendQuery};

/// Base price for the last-resort synthetic series, when the provider has
/// neither a cheapest-date calendar nor price metrics for the route.
const FALLBACK_BASE_PRICE: f64 = 500.0;

/// Builds chart-ready price series with a cascading provider fallback.
///
/// Builds are tagged with a monotonic generation. A build superseded by a
/// newer one returns `None`, so a stale response that lands after a fresher
/// request started is discarded instead of overwriting it — the caller keeps
/// whichever result carries `Some`.
pub struct TrendAggregator {
    generation: AtomicU64,
    seed: Option<u64>,
}

impl TrendAggregator {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            seed: None,
        }
    }

    /// Fix the waveform noise seed, making synthesized series reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            generation: AtomicU64::new(0),
            seed: Some(seed),
        }
    }

    /// Build the series for one route/period key.
    ///
    /// Fetch tiers, in order: provider cheapest-date calendar (sorted and
    /// truncated to the period), route price metrics feeding the synthetic
    /// waveform, and the waveform around [`FALLBACK_BASE_PRICE`]. When live
    /// search results exist for the same route, a fetched series is rescaled
    /// by the ratio of mean prices before grouping so the chart matches the
    /// offers on screen; with no series at all, the live results themselves
    /// bucket into a per-date series.
    pub async fn build_price_trend(
        &self,
        query: &TrendQuery,
        source: &dyn PriceTrendSource,
        live_offers: &[FlightOffer],
    ) -> Option<Vec<TrendPoint>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let series = self.fetch_series(query, source).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(
                origin = %query.origin,
                destination = %query.destination,
                "discarding superseded trend build"
            );
            return None;
        }

        if series.is_empty() {
            if live_offers.is_empty() {
                return Some(Vec::new());
            }
            return Some(series_from_offers(live_offers));
        }

        let series = reconcile_with_live(series, live_offers);
        Some(group_by_period(series, query.period))
    }

    async fn fetch_series(
        &self,
        query: &TrendQuery,
        source: &dyn PriceTrendSource,
    ) -> Vec<TrendPoint> {
        match source.cheapest_dates(&query.origin, &query.destination).await {
            Ok(rows) if !rows.is_empty() => {
                let mut points: Vec<TrendPoint> = rows
                    .into_iter()
                    .map(|row| TrendPoint::daily(row.departure_date, row.price))
                    .collect();
                points.sort_by_key(|point| point.date);
                points.truncate(query.period.days());
                debug!(points = points.len(), "trend series from cheapest-date calendar");
                return points;
            }
            Ok(_) => {
                warn!("cheapest-date calendar empty, falling back to price metrics");
            }
            Err(error) => {
                warn!(%error, "cheapest-date calendar failed, falling back to price metrics");
            }
        }

        let base_price = match source
            .price_metrics(&query.origin, &query.destination, query.departure_date)
            .await
        {
            Ok(Some(metrics)) => metrics.reference_price(),
            Ok(None) => None,
            Err(error) => {
                warn!(%error, "price metrics lookup failed");
                None
            }
        };

        let base_price = base_price.unwrap_or_else(|| {
            warn!("no usable price metrics, synthesizing around the fallback base price");
            FALLBACK_BASE_PRICE
        });

        let mut rng = self.rng();
        synthesize_series(
            query.departure_date,
            base_price,
            query.period.days(),
            &mut rng,
        )
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for TrendAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Rescale a fetched series so its level matches the offers on screen.
fn reconcile_with_live(series: Vec<TrendPoint>, live_offers: &[FlightOffer]) -> Vec<TrendPoint> {
    if live_offers.is_empty() || series.is_empty() {
        return series;
    }

    let live_mean = live_offers
        .iter()
        .map(FlightOffer::total_price)
        .sum::<f64>()
        / live_offers.len() as f64;
    let series_mean = series.iter().map(|point| point.price).sum::<f64>() / series.len() as f64;
    if live_mean <= 0.0 || series_mean <= 0.0 {
        return series;
    }

    let ratio = live_mean / series_mean;
    series
        .into_iter()
        .map(|point| TrendPoint {
            price: (point.price * ratio).round(),
            ..point
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration as StdDuration;

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, NaiveDate};
    use farelens_core::models::{Aircraft, FlightEndpoint, Itinerary, Price, Segment};
    use farelens_core::supplier::{CheapestDate, RoutePriceMetrics};

    use crate::Period;

    type SourceError = Box<dyn std::error::Error + Send + Sync>;

    struct FailingSource;

    #[async_trait]
    impl PriceTrendSource for FailingSource {
        async fn cheapest_dates(
            &self,
            _origin: &str,
            _destination: &str,
        ) -> Result<Vec<CheapestDate>, SourceError> {
            Err("cheapest dates unavailable".into())
        }

        async fn price_metrics(
            &self,
            _origin: &str,
            _destination: &str,
            _departure_date: NaiveDate,
        ) -> Result<Option<RoutePriceMetrics>, SourceError> {
            Err("price metrics unavailable".into())
        }
    }

    struct CalendarSource {
        rows: Vec<CheapestDate>,
        delay: StdDuration,
    }

    #[async_trait]
    impl PriceTrendSource for CalendarSource {
        async fn cheapest_dates(
            &self,
            _origin: &str,
            _destination: &str,
        ) -> Result<Vec<CheapestDate>, SourceError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            Ok(self.rows.clone())
        }

        async fn price_metrics(
            &self,
            _origin: &str,
            _destination: &str,
            _departure_date: NaiveDate,
        ) -> Result<Option<RoutePriceMetrics>, SourceError> {
            Ok(None)
        }
    }

    struct MetricsSource {
        metrics: RoutePriceMetrics,
    }

    #[async_trait]
    impl PriceTrendSource for MetricsSource {
        async fn cheapest_dates(
            &self,
            _origin: &str,
            _destination: &str,
        ) -> Result<Vec<CheapestDate>, SourceError> {
            Ok(Vec::new())
        }

        async fn price_metrics(
            &self,
            _origin: &str,
            _destination: &str,
            _departure_date: NaiveDate,
        ) -> Result<Option<RoutePriceMetrics>, SourceError> {
            Ok(Some(self.metrics))
        }
    }

    fn query(period: Period) -> TrendQuery {
        TrendQuery {
            origin: "JFK".to_string(),
            destination: "LHR".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            period,
        }
    }

    fn calendar_rows(start: NaiveDate, count: usize, price: f64) -> Vec<CheapestDate> {
        (0..count)
            .map(|i| CheapestDate {
                departure_date: start + Duration::days(i as i64),
                price,
            })
            .collect()
    }

    fn live_offer(total: &str, depart: &str) -> FlightOffer {
        FlightOffer {
            id: String::new(),
            price: Price {
                total: total.to_string(),
                base: total.to_string(),
                currency: "USD".to_string(),
            },
            itineraries: vec![Itinerary {
                duration: "PT7H0M".to_string(),
                segments: vec![Segment {
                    departure: FlightEndpoint {
                        iata_code: "JFK".to_string(),
                        at: DateTime::parse_from_rfc3339(depart).unwrap(),
                    },
                    arrival: FlightEndpoint {
                        iata_code: "LHR".to_string(),
                        at: DateTime::parse_from_rfc3339(depart).unwrap(),
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

    #[tokio::test]
    async fn test_double_failure_synthesizes_month() {
        let aggregator = TrendAggregator::with_seed(7);
        let points = aggregator
            .build_price_trend(&query(Period::Month), &FailingSource, &[])
            .await
            .unwrap();

        assert_eq!(points.len(), 30);
        let start = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.date, start + Duration::days(i as i64));
            assert!(
                (400.0..=600.0).contains(&point.price),
                "price outside ±20% of 500: {}",
                point.price
            );
        }
    }

    #[tokio::test]
    async fn test_calendar_is_sorted_and_truncated() {
        let start = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let mut rows = calendar_rows(start, 20, 350.0);
        rows.reverse();
        let source = CalendarSource {
            rows,
            delay: StdDuration::ZERO,
        };

        let aggregator = TrendAggregator::new();
        let points = aggregator
            .build_price_trend(&query(Period::Week), &source, &[])
            .await
            .unwrap();

        assert_eq!(points.len(), 7);
        assert_eq!(points[0].date, start);
        let dates: Vec<_> = points.iter().map(|p| p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn test_metrics_feed_the_waveform() {
        let source = MetricsSource {
            metrics: RoutePriceMetrics {
                median: Some(800.0),
                mean: Some(950.0),
            },
        };
        let aggregator = TrendAggregator::with_seed(3);
        let points = aggregator
            .build_price_trend(&query(Period::Week), &source, &[])
            .await
            .unwrap();

        assert_eq!(points.len(), 7);
        for point in &points {
            assert!(
                (640.0..=960.0).contains(&point.price),
                "price outside ±20% of the median: {}",
                point.price
            );
        }
    }

    #[tokio::test]
    async fn test_live_offers_rescale_the_series() {
        let start = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let source = CalendarSource {
            rows: calendar_rows(start, 7, 200.0),
            delay: StdDuration::ZERO,
        };
        let live = vec![
            live_offer("380", "2026-09-14T09:00:00+00:00"),
            live_offer("420", "2026-09-14T15:00:00+00:00"),
        ];

        let aggregator = TrendAggregator::new();
        let points = aggregator
            .build_price_trend(&query(Period::Week), &source, &live)
            .await
            .unwrap();

        // Series mean 200 against live mean 400 doubles every point.
        assert!(points.iter().all(|p| p.price == 400.0));
    }

    #[tokio::test]
    async fn test_year_series_groups_into_months() {
        let aggregator = TrendAggregator::with_seed(9);
        let mut q = query(Period::Year);
        q.departure_date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let points = aggregator
            .build_price_trend(&q, &FailingSource, &[])
            .await
            .unwrap();

        assert!(points.len() <= 12);
        let total: usize = points.iter().filter_map(|p| p.sample_count).sum();
        assert_eq!(total, 365);
    }

    #[tokio::test]
    async fn test_superseded_build_is_discarded() {
        let start = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let aggregator = Arc::new(TrendAggregator::new());
        let q = query(Period::Week);

        let slow_aggregator = Arc::clone(&aggregator);
        let slow_query = q.clone();
        let slow = tokio::spawn(async move {
            let source = CalendarSource {
                rows: calendar_rows(start, 7, 210.0),
                delay: StdDuration::from_millis(80),
            };
            slow_aggregator
                .build_price_trend(&slow_query, &source, &[])
                .await
        });

        tokio::time::sleep(StdDuration::from_millis(20)).await;

        let fast_source = CalendarSource {
            rows: calendar_rows(start, 7, 340.0),
            delay: StdDuration::ZERO,
        };
        let fresh = aggregator.build_price_trend(&q, &fast_source, &[]).await;

        assert!(fresh.is_some());
        assert!(slow.await.unwrap().is_none());
    }
}
