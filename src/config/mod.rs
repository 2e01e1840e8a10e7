//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Nested values use the `VARSHAN` prefix
//! with `__` separators (e.g., `VARSHAN__SERVER__PORT=8080`); the original
//! deployment's flat variable names (`GEMINI_API_KEY`, `GEMINI_API_KEY_2`,
//! `GEMINI_API_KEY_3`, `TAVILY_API_KEY`) are recognized as fallbacks.
//!
//! # Example
//!
//! ```no_run
//! use varshan_ai::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod search;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use search::SearchConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI provider configuration (Gemini keys and models)
    #[serde(default)]
    pub ai: AiConfig,

    /// Web search configuration (Tavily)
    #[serde(default)]
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `VARSHAN__`-prefixed variables into the nested sections
    /// 3. Overlays the flat well-known key variables as fallbacks
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VARSHAN")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.ai.fill_from_well_known_env();
        config.search.fill_from_well_known_env();

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    /// Note that running without any API keys is deliberately valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.search.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
