//! HTTP Plan Backend - calls `POST {base_url}/visualize`.
//!
//! # Configuration
//!
//! ```ignore
//! let backend = HttpPlanBackend::new(
//!     HttpPlanBackendConfig::new("http://localhost:8000").with_timeout(None),
//! )?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::domain::visualization::{Concept, StructuredPlan};
use crate::ports::{PlanBackend, PlanError};

/// Configuration for the HTTP plan backend.
#[derive(Debug, Clone)]
pub struct HttpPlanBackendConfig {
    /// Base URL of the plan service.
    pub base_url: String,
    /// Optional request timeout. `None` waits on the connection itself.
    pub timeout: Option<Duration>,
}

impl HttpPlanBackendConfig {
    /// Creates a new configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Plan backend reached over HTTP.
pub struct HttpPlanBackend {
    config: HttpPlanBackendConfig,
    client: Client,
}

impl HttpPlanBackend {
    /// Creates a new backend client.
    ///
    /// # Errors
    ///
    /// - `Network` if the HTTP client cannot be built
    pub fn new(config: HttpPlanBackendConfig) -> Result<Self, PlanError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PlanError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn visualize_url(&self) -> String {
        format!("{}/visualize", self.config.base_url.trim_end_matches('/'))
    }

    async fn send_request(&self, concept: &Concept) -> Result<Response, PlanError> {
        let body = PlanRequest {
            concept: concept.as_str(),
        };

        self.client
            .post(self.visualize_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PlanError::Timeout {
                        timeout_secs: self.config.timeout.map(|t| t.as_secs()).unwrap_or(0),
                    }
                } else if e.is_connect() {
                    PlanError::network(format!("Connection failed: {}", e))
                } else {
                    PlanError::network(e.to_string())
                }
            })
    }
}

/// Parses a `/visualize` response body into a plan.
///
/// A missing or `null` `visualization` field is an error.
fn parse_plan_response(body: &str) -> Result<StructuredPlan, PlanError> {
    let response: PlanResponse = serde_json::from_str(body)
        .map_err(|e| PlanError::parse(format!("Failed to parse plan response: {}", e)))?;

    match response.visualization {
        None | Some(Value::Null) => Err(PlanError::MissingPlan),
        Some(visualization) => Ok(StructuredPlan {
            visualization,
            category: response.category,
        }),
    }
}

#[async_trait]
impl PlanBackend for HttpPlanBackend {
    async fn fetch_plan(&self, concept: &Concept) -> Result<StructuredPlan, PlanError> {
        let response = self.send_request(concept).await?;
        let status = response.status();

        let body = response
            .text()
            .await
            .map_err(|e| PlanError::network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Plan backend returned non-success status");
            return Err(PlanError::status(status.as_u16(), body));
        }

        parse_plan_response(&body)
    }
}

#[derive(Debug, Serialize)]
struct PlanRequest<'a> {
    concept: &'a str,
}

#[derive(Debug, Deserialize)]
struct PlanResponse {
    #[serde(default)]
    visualization: Option<Value>,
    #[serde(default)]
    category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn visualize_url_trims_trailing_slash() {
        let backend =
            HttpPlanBackend::new(HttpPlanBackendConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(backend.visualize_url(), "http://localhost:8000/visualize");
    }

    #[test]
    fn config_defaults_have_no_timeout() {
        let config = HttpPlanBackendConfig::new("http://localhost:8000");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn request_body_carries_concept() {
        let body = serde_json::to_value(PlanRequest { concept: "osmosis" }).unwrap();
        assert_eq!(body, json!({ "concept": "osmosis" }));
    }

    #[test]
    fn parses_plan_and_category() {
        let body = json!({
            "visualization": { "title": "Osmosis", "elements": [] },
            "category": "Science & Nature"
        })
        .to_string();

        let plan = parse_plan_response(&body).unwrap();

        assert_eq!(plan.visualization["title"], "Osmosis");
        assert_eq!(plan.category.as_deref(), Some("Science & Nature"));
    }

    #[test]
    fn plan_keys_keep_backend_order() {
        let body = r#"{"visualization":{"title":"Osmosis","layout":"split","interaction":"drag","elements":[]}}"#;

        let plan = parse_plan_response(body).unwrap();

        let keys: Vec<&str> = plan
            .visualization
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["title", "layout", "interaction", "elements"]);
        assert!(plan.to_pretty_json().starts_with("{\n  \"title\": \"Osmosis\",\n  \"layout\""));
    }

    #[test]
    fn missing_visualization_is_an_error() {
        assert!(matches!(
            parse_plan_response(r#"{"category": "x"}"#),
            Err(PlanError::MissingPlan)
        ));
        assert!(matches!(
            parse_plan_response(r#"{"visualization": null}"#),
            Err(PlanError::MissingPlan)
        ));
    }

    #[test]
    fn malformed_body_is_parse_error() {
        assert!(matches!(
            parse_plan_response("<html>502</html>"),
            Err(PlanError::Parse(_))
        ));
    }
}
