//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment variables.
//!
//! A missing OpenAI credential is *not* a startup failure: the process starts, and every
//! generation attempt fails with [`ScenarioError::Configuration`] before any network call.

use crate::constants::{DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::{ScenarioError, ScenarioResult};
use std::fmt;
use std::time::Duration;

/// OpenAI credential. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a credential; returns `None` for an empty or whitespace-only value.
    pub fn new(value: impl AsRef<str>) -> Option<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    api_key: Option<ApiKey>,
    model: String,
    openai_base_url: String,
    request_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Configuration`] if the model name is empty or the base URL is not
    /// an `http(s)` URL.
    pub fn new(
        api_key: Option<ApiKey>,
        model: String,
        openai_base_url: String,
        request_timeout: Duration,
    ) -> ScenarioResult<Self> {
        let model = model.trim().to_owned();
        if model.is_empty() {
            return Err(ScenarioError::Configuration(
                "model name cannot be empty".into(),
            ));
        }

        let openai_base_url = openai_base_url.trim().trim_end_matches('/').to_owned();
        if !(openai_base_url.starts_with("http://") || openai_base_url.starts_with("https://")) {
            return Err(ScenarioError::Configuration(format!(
                "OpenAI base URL must start with http:// or https://, got '{openai_base_url}'"
            )));
        }

        Ok(Self {
            api_key,
            model,
            openai_base_url,
            request_timeout,
        })
    }

    /// Configuration with the default model, endpoint and timeout.
    pub fn with_defaults(api_key: Option<ApiKey>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.into(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn openai_base_url(&self) -> &str {
        &self.openai_base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Build a `CoreConfig` from raw environment values.
    ///
    /// Each argument is the optional value of the corresponding variable (`OPENAI_API_KEY`,
    /// `OPENAI_MODEL`, `OPENAI_BASE_URL`, `OPENAI_TIMEOUT_SECS`). Empty values fall back to the
    /// defaults.
    pub fn from_env_values(
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> ScenarioResult<Self> {
        let model = non_empty(model).unwrap_or_else(|| DEFAULT_MODEL.into());
        let base_url = non_empty(base_url).unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.into());
        let timeout = timeout_from_env_value(timeout_secs)?;

        Self::new(api_key.and_then(ApiKey::new), model, base_url, timeout)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the transport timeout from an optional seconds value.
///
/// If `value` is `None` or empty/whitespace, returns the default timeout.
pub fn timeout_from_env_value(value: Option<String>) -> ScenarioResult<Duration> {
    let Some(value) = non_empty(value) else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };

    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ScenarioError::Configuration(format!(
            "OPENAI_TIMEOUT_SECS must be a positive integer, got '{value}'"
        ))),
    }
}
