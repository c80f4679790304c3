pub mod duration;
pub mod format;
pub mod iata;
pub mod models;
pub mod search;
pub mod supplier;

pub use models::{lenient_price, DestinationSuggestion, FlightOffer, Itinerary, Price, Segment};
pub use search::{SearchRequest, TravelClass};
pub use supplier::{CheapestDate, PriceTrendSource, RoutePriceMetrics};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
