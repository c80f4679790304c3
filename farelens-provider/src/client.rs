use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use farelens_core::models::{lenient_price, DestinationSuggestion, FlightOffer};
use farelens_core::search::SearchRequest;
use farelens_core::supplier::{CheapestDate, PriceTrendSource, RoutePriceMetrics};

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::token::{TokenCache, TokenResponse};

const TOKEN_PATH: &str = "/v1/security/oauth2/token";
const SEARCH_PATH: &str = "/v2/shopping/flight-offers";
const INSPIRATION_PATH: &str = "/v1/shopping/flight-destinations";
const CHEAPEST_DATES_PATH: &str = "/v1/shopping/flight-dates";
const PRICE_METRICS_PATH: &str = "/v1/analytics/itinerary-price-metrics";

/// JSON envelope wrapping every provider collection payload.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TotalPrice {
    total: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheapestDateRow {
    departure_date: NaiveDate,
    price: TotalPrice,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InspirationRow {
    destination: String,
    departure_date: NaiveDate,
    price: TotalPrice,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceMetricsRow {
    #[serde(default)]
    price_metrics: Vec<MetricsEntry>,
}

#[derive(Debug, Deserialize)]
struct MetricsEntry {
    #[serde(default)]
    median: Option<Metric>,
    #[serde(default)]
    mean: Option<Metric>,
}

/// Metric amounts arrive as numbers or decimal strings depending on the
/// endpoint version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Metric {
    Number(f64),
    Text(String),
}

impl Metric {
    fn value(&self) -> Option<f64> {
        match self {
            Metric::Number(value) => Some(*value),
            Metric::Text(raw) => raw.trim().parse().ok(),
        }
    }
}

/// HTTP client for the upstream flight-data provider.
///
/// Performs the OAuth client-credentials flow with a cached bearer token and
/// strips the `{ data: [...] }` envelope so callers only see typed rows.
pub struct ProviderClient {
    http: reqwest::Client,
    config: ProviderConfig,
    token: Mutex<TokenCache>,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(http, config))
    }

    /// Build with a pre-configured HTTP client; tests point this at a mock
    /// server.
    pub fn with_client(http: reqwest::Client, config: ProviderConfig) -> Self {
        Self {
            http,
            config,
            token: Mutex::new(TokenCache::new()),
        }
    }

    /// Search priced offers for a route.
    ///
    /// The request is validated before any network traffic. Offers that fail
    /// the structural parse boundary (undecodable, no itineraries, or an
    /// itinerary without segments) are dropped with a warning instead of
    /// failing the whole result set.
    pub async fn search_offers(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<FlightOffer>, ProviderError> {
        request
            .validate()
            .map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        let mut query: Vec<(&str, String)> = vec![
            ("originLocationCode", request.origin.clone()),
            ("destinationLocationCode", request.destination.clone()),
            ("departureDate", request.departure_date.to_string()),
            ("adults", request.adults.to_string()),
            ("travelClass", request.travel_class.as_str().to_string()),
            ("max", self.config.max_results.to_string()),
            ("currencyCode", self.config.currency.clone()),
        ];
        if let Some(return_date) = request.return_date {
            query.push(("returnDate", return_date.to_string()));
        }
        if request.children > 0 {
            query.push(("children", request.children.to_string()));
        }
        if request.infants > 0 {
            query.push(("infants", request.infants.to_string()));
        }

        let rows: Vec<serde_json::Value> = self.get_envelope(SEARCH_PATH, &query).await?;
        let total = rows.len();
        let offers: Vec<FlightOffer> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<FlightOffer>(row) {
                Ok(offer) if has_valid_shape(&offer) => Some(offer),
                Ok(_) => None,
                Err(error) => {
                    warn!(%error, "skipping undecodable offer");
                    None
                }
            })
            .collect();

        if offers.len() < total {
            warn!(
                dropped = total - offers.len(),
                "dropped structurally invalid offers from search response"
            );
        }
        debug!(
            count = offers.len(),
            origin = %request.origin,
            destination = %request.destination,
            "flight search completed"
        );
        Ok(offers)
    }

    /// Cheapest alternative destinations from an origin, offered to the user
    /// when their search came back empty.
    pub async fn inspiration(
        &self,
        origin: &str,
        departure_date: Option<NaiveDate>,
        max_price: Option<u32>,
    ) -> Result<Vec<DestinationSuggestion>, ProviderError> {
        let mut query: Vec<(&str, String)> = vec![("origin", origin.to_string())];
        if let Some(date) = departure_date {
            query.push(("departureDate", date.to_string()));
        }
        if let Some(price) = max_price {
            query.push(("maxPrice", price.to_string()));
        }

        let rows: Vec<InspirationRow> = self.get_envelope(INSPIRATION_PATH, &query).await?;
        Ok(rows
            .into_iter()
            .map(|row| DestinationSuggestion {
                destination: row.destination,
                departure_date: row.departure_date,
                price: lenient_price(&row.price.total),
            })
            .collect())
    }

    /// Cheapest known fare per departure date for a route.
    pub async fn cheapest_dates(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<CheapestDate>, ProviderError> {
        let query: Vec<(&str, String)> = vec![
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("oneWay", "false".to_string()),
        ];
        let rows: Vec<CheapestDateRow> = self.get_envelope(CHEAPEST_DATES_PATH, &query).await?;
        Ok(rows
            .into_iter()
            .map(|row| CheapestDate {
                departure_date: row.departure_date,
                price: lenient_price(&row.price.total),
            })
            .collect())
    }

    /// Median/mean price statistics for a route on an exact date.
    pub async fn price_metrics(
        &self,
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
    ) -> Result<Option<RoutePriceMetrics>, ProviderError> {
        let query: Vec<(&str, String)> = vec![
            ("originLocationCode", origin.to_string()),
            ("destinationLocationCode", destination.to_string()),
            ("departureDate", departure_date.to_string()),
            ("currencyCode", self.config.currency.clone()),
        ];
        let rows: Vec<PriceMetricsRow> = self.get_envelope(PRICE_METRICS_PATH, &query).await?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|row| row.price_metrics.into_iter().next())
            .map(|entry| RoutePriceMetrics {
                median: entry.median.as_ref().and_then(Metric::value),
                mean: entry.mean.as_ref().and_then(Metric::value),
            }))
    }

    async fn access_token(&self) -> Result<String, ProviderError> {
        let mut cache = self.token.lock().await;
        if let Some(token) = cache.current(Utc::now()) {
            debug!("reusing cached provider token");
            return Ok(token.to_string());
        }

        let url = format!("{}{}", self.config.base_url, TOKEN_PATH);
        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.api_key.as_str()),
                ("client_secret", self.config.api_secret.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Auth(format!(
                "token request failed with status {status}: {message}"
            )));
        }

        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        let access_token = token.access_token.clone();
        cache.store(token, Utc::now());
        debug!("provider token refreshed");
        Ok(access_token)
    }

    /// GET a `{ data: [...] }` endpoint and unwrap the envelope.
    ///
    /// The provider signals "no data for this route" as HTTP 404, which maps
    /// to an empty row set rather than an error.
    async fn get_envelope<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ProviderError> {
        let token = self.access_token().await?;
        let url = format!("{}{}", self.config.base_url, path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.data)
    }
}

fn has_valid_shape(offer: &FlightOffer) -> bool {
    !offer.itineraries.is_empty()
        && offer
            .itineraries
            .iter()
            .all(|itinerary| !itinerary.segments.is_empty())
}

#[async_trait]
impl PriceTrendSource for ProviderClient {
    async fn cheapest_dates(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<CheapestDate>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(ProviderClient::cheapest_dates(self, origin, destination).await?)
    }

    async fn price_metrics(
        &self,
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
    ) -> Result<Option<RoutePriceMetrics>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(ProviderClient::price_metrics(self, origin, destination, departure_date).await?)
    }
}
