//! Runtime configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no
//! file) gives the stock retry behaviour: 3333ms growing by 1.5x, forever.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backoff::Backoff;
use crate::error::ConfigError;

/// Retry shape for template fetches and controller polling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub initial_delay_ms: f64,
    pub multiplier: f64,
    /// Total attempts before giving up; `None` retries forever
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: 3333.0,
            multiplier: 1.5,
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Delays between attempts
    pub fn delays(&self) -> Backoff {
        let backoff = Backoff::new(self.initial_delay_ms, self.multiplier);
        match self.max_attempts {
            Some(attempts) => backoff.with_limit(attempts.saturating_sub(1)),
            None => backoff,
        }
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        if !(self.initial_delay_ms >= 0.0 && self.initial_delay_ms.is_finite()) {
            return Err(ConfigError::Invalid(format!("{field}.initial_delay_ms must be a non-negative number")));
        }
        if !(self.multiplier >= 1.0 && self.multiplier.is_finite()) {
            return Err(ConfigError::Invalid(format!("{field}.multiplier must be at least 1.0")));
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::Invalid(format!("{field}.max_attempts must be at least 1")));
        }
        Ok(())
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Base URL that convention-derived template paths are joined onto
    pub template_root: String,
    pub template_retry: RetryPolicy,
    pub controller_retry: RetryPolicy,
    /// Abandon template and controller waits once the component leaves the document
    pub cancel_on_disconnect: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            template_root: String::new(),
            template_retry: RetryPolicy::default(),
            controller_retry: RetryPolicy::default(),
            cancel_on_disconnect: false,
        }
    }
}

impl RuntimeConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.template_retry.validate("template_retry")?;
        self.controller_retry.validate("controller_retry")
    }
}
