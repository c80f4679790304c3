pub mod client;
pub mod config;
pub mod error;
pub mod token;

pub use client::ProviderClient;
pub use config::{Config, ProviderConfig};
pub use error::ProviderError;
pub use token::TokenCache;
