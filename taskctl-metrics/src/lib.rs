//! taskctl-metrics - pod resource usage from Prometheus
//!
//! This crate provides:
//! - A minimal Prometheus instant-query client
//! - CPU/memory summarization for a single pod
//! - CLI argument handling for `taskctl pod-usage`
//!
//! ## Flow
//!
//! ```text
//! pod name → cpu_query / memory_query → PrometheusClient::query (x2)
//!          → summarize (first CPU sample + matching memory sample)
//!          → pretty JSON on stdout
//! ```

pub mod prometheus;
pub mod usage;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Args;

pub use prometheus::{MetricsError, PrometheusClient, Sample, DEFAULT_PROMETHEUS_URL};
pub use usage::{cpu_query, memory_query, pod_usage, summarize, PodUsage};

/// pod-usage subcommand arguments
#[derive(Args, Debug)]
pub struct PodUsageArgs {
    /// Pod name to report on
    #[arg(value_name = "POD", value_parser = NonEmptyStringValueParser::new())]
    pub pod: String,

    /// Prometheus base URL
    #[arg(long, env = "PROMETHEUS_URL", default_value = DEFAULT_PROMETHEUS_URL)]
    pub prometheus_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

/// Render the command output for a (possibly absent) usage record.
pub fn render(pod: &str, usage: Option<&PodUsage>) -> Result<String> {
    match usage {
        Some(usage) => {
            serde_json::to_string_pretty(&[usage]).context("Failed to serialize usage")
        }
        None => Ok(format!("No metrics found for pod '{}'.", pod)),
    }
}

/// Run the pod-usage command
pub async fn run_pod_usage(args: PodUsageArgs) -> Result<()> {
    let client = PrometheusClient::new(&args.prometheus_url)
        .with_timeout(Duration::from_secs(args.timeout));

    let usage = pod_usage(&client, &args.pod)
        .await
        .with_context(|| format!("Failed to query Prometheus at {}", client.base_url()))?;

    if usage.is_none() {
        tracing::warn!(pod = %args.pod, "no CPU samples returned");
    }

    println!("{}", render(&args.pod, usage.as_ref())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn vector(result: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "resultType": "vector", "result": result }
        }))
    }

    #[test]
    fn renders_json_array() {
        let usage = PodUsage {
            namespace: "default".into(),
            pod: "web-1".into(),
            cpu_usage_cores: 0.25,
            memory_usage_bytes: 1024.0,
        };
        let rendered = render("web-1", Some(&usage)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(
            parsed,
            json!([{
                "namespace": "default",
                "pod": "web-1",
                "cpu_usage_cores": 0.25,
                "memory_usage_bytes": 1024.0
            }])
        );
        assert!(rendered.contains("\n  {"));
    }

    #[test]
    fn renders_missing_metrics_notice() {
        assert_eq!(
            render("ghost", None).unwrap(),
            "No metrics found for pod 'ghost'."
        );
    }

    #[tokio::test]
    async fn pod_usage_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/query"))
            .and(query_param("query", cpu_query("web-1").as_str()))
            .respond_with(vector(json!([{
                "metric": {"pod": "web-1", "namespace": "shop", "container": "app"},
                "value": [1700000000.0, "0.05"]
            }])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/query"))
            .and(query_param("query", memory_query("web-1").as_str()))
            .respond_with(vector(json!([{
                "metric": {"pod": "web-1", "container": "app"},
                "value": [1700000000.0, "2048"]
            }])))
            .mount(&server)
            .await;

        let client = PrometheusClient::new(server.uri());
        let usage = pod_usage(&client, "web-1").await.unwrap().unwrap();

        assert_eq!(usage.namespace, "shop");
        assert_eq!(usage.cpu_usage_cores, 0.05);
        assert_eq!(usage.memory_usage_bytes, 2048.0);
    }
}
