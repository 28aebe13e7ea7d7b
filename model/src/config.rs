use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Connection settings for a TestRail instance. The transport that sends the
/// payloads built by this crate reads these; nothing here performs I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRailConfig {
    pub endpoint: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl TestRailConfig {
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let endpoint: String = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            username: username.into(),
            api_key: api_key.into(),
            application_name: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_application_name(mut self, application_name: impl Into<String>) -> Self {
        self.application_name = Some(application_name.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Endpoint without any trailing slash, regardless of how it was loaded.
    pub fn endpoint(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }

    pub fn validate(&self) -> ModelResult<()> {
        let invalid = |message: &str| {
            Err(ModelError::InvalidConfig {
                message: message.to_string(),
            })
        };

        if self.endpoint().is_empty() {
            return invalid("Endpoint cannot be empty");
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return invalid("Endpoint must start with http:// or https://");
        }

        if self.username.trim().is_empty() {
            return invalid("Username cannot be empty");
        }

        if self.api_key.is_empty() {
            return invalid("API key cannot be empty");
        }

        if self.timeout_secs == 0 {
            return invalid("Timeout must be greater than 0");
        }

        Ok(())
    }
}
