use async_trait::async_trait;
use chrono::NaiveDate;

/// Cheapest known fare for one departure date on a route.
#[derive(Debug, Clone, PartialEq)]
pub struct CheapestDate {
    pub departure_date: NaiveDate,
    pub price: f64,
}

/// Median/mean price statistics for a route on an exact date.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoutePriceMetrics {
    pub median: Option<f64>,
    pub mean: Option<f64>,
}

impl RoutePriceMetrics {
    /// Reference price for trend synthesis: the median when present, else
    /// the mean.
    pub fn reference_price(&self) -> Option<f64> {
        self.median.or(self.mean)
    }
}

/// Price-history surface of the external flight-data supplier, consumed by
/// the trend aggregator.
#[async_trait]
pub trait PriceTrendSource: Send + Sync {
    /// Cheapest fare per departure date for the route.
    async fn cheapest_dates(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<CheapestDate>, Box<dyn std::error::Error + Send + Sync>>;

    /// Price statistics for the route on the exact departure date.
    async fn price_metrics(
        &self,
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
    ) -> Result<Option<RoutePriceMetrics>, Box<dyn std::error::Error + Send + Sync>>;
}
