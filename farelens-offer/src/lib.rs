pub mod badge;
pub mod filter;
pub mod ranker;
pub mod sort;

pub use badge::{classify, Badge};
pub use filter::{filter_offers, price_range, unique_airlines, FilterSpec};
pub use ranker::{OfferRanker, ScoringConfig};
pub use sort::{sort_offers, SortKey};
