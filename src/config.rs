//! Controller configuration.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the stock storage keys, control id, and retry policy. In the browser
//! the JSON comes from an optional `window.AuroraBackgroundConfig` object.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{CONTROL_ID, LEVEL_KEY, MAX_RETRIES, MODE_KEY, RETRY_DELAY_MS, TOAST_PATH};
use crate::retry::RetryPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse background config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid background config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BackgroundConfig {
    pub mode_key: String,
    pub level_key: String,
    pub control_id: String,
    pub retry_delay_ms: u32,
    pub max_retries: u32,
    /// Property path from the global object to the toast function.
    pub toast_path: Vec<String>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            mode_key: MODE_KEY.to_owned(),
            level_key: LEVEL_KEY.to_owned(),
            control_id: CONTROL_ID.to_owned(),
            retry_delay_ms: RETRY_DELAY_MS,
            max_retries: MAX_RETRIES,
            toast_path: TOAST_PATH.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl BackgroundConfig {
    /// Parse and validate a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::Invalid`] when a value fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode_key.trim().is_empty() {
            return Err(ConfigError::Invalid("modeKey must not be empty".into()));
        }
        if self.level_key.trim().is_empty() {
            return Err(ConfigError::Invalid("levelKey must not be empty".into()));
        }
        if self.mode_key == self.level_key {
            return Err(ConfigError::Invalid("modeKey and levelKey must differ".into()));
        }
        if self.control_id.trim().is_empty() {
            return Err(ConfigError::Invalid("controlId must not be empty".into()));
        }
        if self.toast_path.iter().any(|segment| segment.is_empty()) {
            return Err(ConfigError::Invalid("toastPath segments must not be empty".into()));
        }
        Ok(())
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy { delay_ms: self.retry_delay_ms, max_retries: self.max_retries }
    }
}
