use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
}

/// Upstream flight-data provider settings.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_max_results() -> u32 {
    250
}

fn default_timeout_secs() -> u64 {
    30
}

impl ProviderConfig {
    /// Minimal config pointed at an arbitrary base URL; tests aim this at a
    /// mock server.
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: "test-key".to_string(),
            api_secret: "test-secret".to_string(),
            currency: default_currency(),
            max_results: default_max_results(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of FARELENS)
            // Eg.. `FARELENS__PROVIDER__API_KEY=...` would set the key
            .add_source(config::Environment::with_prefix("FARELENS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
