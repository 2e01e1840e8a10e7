//! AI provider configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Gemini provider configuration.
///
/// Up to three API keys are recognized; the generator rotates across
/// whichever are present. Running with no keys at all is allowed (the
/// service starts and warns), so a missing key is not a validation error.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Primary Gemini API key
    pub gemini_api_key: Option<Secret<String>>,

    /// Secondary Gemini API key
    pub gemini_api_key_2: Option<Secret<String>>,

    /// Tertiary Gemini API key
    pub gemini_api_key_3: Option<Secret<String>>,

    /// Chat model identifier
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Image generation model identifier
    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the configured API keys, in failover order.
    pub fn api_keys(&self) -> Vec<Secret<String>> {
        [
            &self.gemini_api_key,
            &self.gemini_api_key_2,
            &self.gemini_api_key_3,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }

    /// Check if at least one API key is configured
    pub fn has_any_key(&self) -> bool {
        !self.api_keys().is_empty()
    }

    /// Fills absent keys from the well-known flat environment variables.
    pub(super) fn fill_from_well_known_env(&mut self) {
        fill_secret(&mut self.gemini_api_key, "GEMINI_API_KEY");
        fill_secret(&mut self.gemini_api_key_2, "GEMINI_API_KEY_2");
        fill_secret(&mut self.gemini_api_key_3, "GEMINI_API_KEY_3");
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.chat_model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("chat model"));
        }
        if self.image_model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("image model"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_api_key_2: None,
            gemini_api_key_3: None,
            chat_model: default_chat_model(),
            image_model: default_image_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

pub(super) fn fill_secret(slot: &mut Option<Secret<String>>, var: &str) {
    if slot.is_none() {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                *slot = Some(Secret::new(value));
            }
        }
    }
}

fn default_chat_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "imagen-4.0-fast-generate-001".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    120
}
