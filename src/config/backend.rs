//! Plan backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::ai::is_http_url;
use super::error::ValidationError;

/// Structure-generation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL; the service calls `POST {base_url}/visualize`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional request timeout in seconds; unset means no client-side timeout
    pub timeout_secs: Option<u64>,
}

impl BackendConfig {
    /// Get timeout as Duration, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate backend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidBackendUrl(self.base_url.clone()));
        }
        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}
