//! Per-pod CPU/memory summary built from two instant queries

use serde::Serialize;

use crate::prometheus::{MetricsError, PrometheusClient, Sample};

/// Usage figures for one pod's container
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PodUsage {
    pub namespace: String,
    pub pod: String,
    pub cpu_usage_cores: f64,
    pub memory_usage_bytes: f64,
}

/// CPU cores used over the last minute, per container of `pod`.
pub fn cpu_query(pod: &str) -> String {
    format!(
        r#"rate(container_cpu_usage_seconds_total{{pod="{}", container!=""}}[1m])"#,
        escape_label(pod)
    )
}

/// Working memory in bytes, per container of `pod`.
pub fn memory_query(pod: &str) -> String {
    format!(
        r#"container_memory_usage_bytes{{pod="{}", container!=""}}"#,
        escape_label(pod)
    )
}

/// Escape a value for a double-quoted PromQL label matcher.
fn escape_label(value: &str) -> String {
    value.replace('\\', r"\\").replace('"', r#"\""#)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Combine CPU and memory samples into a single usage record.
///
/// Only the first CPU sample counts. Memory comes from the first memory
/// sample of the same container, or 0 when none matches. `None` when there
/// is no CPU sample at all.
pub fn summarize(
    pod: &str,
    cpu: &[Sample],
    memory: &[Sample],
) -> Result<Option<PodUsage>, MetricsError> {
    let Some(first) = cpu.first() else {
        return Ok(None);
    };

    let container = first.label("container").unwrap_or("");
    let cpu_value = first.value()?;
    let memory_value = match memory
        .iter()
        .find(|m| m.label("container") == Some(container))
    {
        Some(sample) => sample.value()?,
        None => 0.0,
    };

    Ok(Some(PodUsage {
        namespace: first.label("namespace").unwrap_or("default").to_string(),
        pod: first.label("pod").unwrap_or(pod).to_string(),
        cpu_usage_cores: round_to(cpu_value, 8),
        memory_usage_bytes: round_to(memory_value, 2),
    }))
}

/// Query Prometheus for `pod` and summarize.
pub async fn pod_usage(
    client: &PrometheusClient,
    pod: &str,
) -> Result<Option<PodUsage>, MetricsError> {
    let cpu = client.query(&cpu_query(pod)).await?;
    let memory = client.query(&memory_query(pod)).await?;
    tracing::debug!(
        pod,
        cpu_samples = cpu.len(),
        memory_samples = memory.len(),
        "fetched samples"
    );

    summarize(pod, &cpu, &memory)
}
