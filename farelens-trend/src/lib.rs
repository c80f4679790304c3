//! Price-trend series for the route chart.
//!
//! The aggregator builds a chart-ready series from whatever the provider can
//! supply, degrading through a cheapest-date calendar, route price metrics,
//! and finally a synthetic waveform — the chart never renders empty, and a
//! synthesized series is an accepted, labeled degradation rather than a
//! failure.

pub mod aggregator;
pub mod grouping;
pub mod synthetic;

pub use aggregator::TrendAggregator;
pub use grouping::{group_by_period, series_from_offers};
pub use synthetic::synthesize_series;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Named trend time-window selected in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "year")]
    Year,
}

impl Period {
    /// Number of daily points the period covers.
    pub fn days(self) -> usize {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::Year => 365,
        }
    }
}

/// One chart-ready price point. Min/max/count are only present on grouped
/// buckets and on points built from live search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,
}

impl TrendPoint {
    /// A plain daily point with no bucket statistics.
    pub fn daily(date: NaiveDate, price: f64) -> Self {
        Self {
            date,
            price,
            min_price: None,
            max_price: None,
            sample_count: None,
        }
    }
}

/// Route + period key a series is built for. A new key replaces the whole
/// series; points are never merged across keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrendQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub period: Period,
}

/// Lowest / average / highest price over a built series, for the stat tiles
/// above the chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSummary {
    pub lowest: f64,
    pub average: f64,
    pub highest: f64,
}

impl TrendSummary {
    pub fn from_points(points: &[TrendPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut lowest = f64::INFINITY;
        let mut highest = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for point in points {
            lowest = lowest.min(point.price);
            highest = highest.max(point.price);
            sum += point.price;
        }
        Some(Self {
            lowest,
            average: (sum / points.len() as f64).round(),
            highest,
        })
    }
}
