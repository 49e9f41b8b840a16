//! Prometheus HTTP API client (instant queries only)
//!
//! `GET {base}/api/v1/query?query=<promql>` returning a vector result.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

/// Default Prometheus endpoint
pub const DEFAULT_PROMETHEUS_URL: &str = "http://localhost:9090";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest error body kept in messages
const MAX_ERROR_BODY: usize = 500;

/// Error talking to Prometheus
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("request to Prometheus failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Prometheus returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Prometheus query failed ({error_type}): {message}")]
    Query { error_type: String, message: String },

    #[error("invalid sample value '{0}'")]
    InvalidValue(String),
}

/// One element of an instant-vector result
#[derive(Debug, Clone, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub metric: HashMap<String, String>,
    /// `[unix_timestamp, "value"]`
    pub value: (f64, String),
}

impl Sample {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.metric.get(name).map(String::as_str)
    }

    /// Parse the sample value. Prometheus encodes it as a string so that
    /// `NaN` and `+Inf` survive JSON.
    pub fn value(&self) -> Result<f64, MetricsError> {
        self.value
            .1
            .parse::<f64>()
            .map_err(|_| MetricsError::InvalidValue(self.value.1.clone()))
    }
}

/// Raw API envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    status: String,
    data: Option<ApiData>,
    error_type: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiData {
    #[serde(default)]
    result: Vec<Sample>,
}

/// Prometheus client
pub struct PrometheusClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl PrometheusClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run an instant query and return its vector samples.
    pub async fn query(&self, promql: &str) -> Result<Vec<Sample>, MetricsError> {
        let url = format!("{}/api/v1/query", self.base_url);
        tracing::debug!(%url, query = promql, "querying Prometheus");

        let response = self
            .client
            .get(&url)
            .query(&[("query", promql)])
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Prometheus reports bad queries as 4xx with a JSON envelope; prefer that message
        let parsed: Option<ApiResponse> = serde_json::from_str(&body).ok();
        match parsed {
            Some(api) if status.is_success() && api.status == "success" => {
                Ok(api.data.map(|d| d.result).unwrap_or_default())
            }
            Some(api) if api.error.is_some() => Err(MetricsError::Query {
                error_type: api.error_type.unwrap_or_else(|| "unknown".to_string()),
                message: api.error.unwrap_or_default(),
            }),
            _ => Err(MetricsError::Status {
                status: status.as_u16(),
                body: truncate(&body),
            }),
        }
    }
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
