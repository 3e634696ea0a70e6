// Copyright 2025 Cowboy AI, LLC.

//! Counters and timings for repository calls

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Samples kept per operation
const MAX_SAMPLES: usize = 1000;

/// Shared metrics collector; clones record into the same maps
#[derive(Debug, Clone, Default)]
pub struct PersistenceMetrics {
    counters: Arc<RwLock<HashMap<String, u64>>>,
    durations: Arc<RwLock<HashMap<String, Vec<Duration>>>>,
}

impl PersistenceMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a counter
    pub async fn increment(&self, name: &str) {
        let mut counters = self.counters.write().await;
        *counters.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Record operation duration
    pub async fn record_duration(&self, operation: &str, duration: Duration) {
        let mut durations = self.durations.write().await;
        let samples = durations.entry(operation.to_string()).or_default();
        samples.push(duration);
        if samples.len() > MAX_SAMPLES {
            let excess = samples.len() - MAX_SAMPLES;
            samples.drain(0..excess);
        }
    }

    /// Get counter value
    pub async fn get_counter(&self, name: &str) -> u64 {
        self.counters.read().await.get(name).copied().unwrap_or(0)
    }

    /// Get average duration for an operation
    pub async fn get_avg_duration(&self, operation: &str) -> Option<Duration> {
        let durations = self.durations.read().await;
        durations.get(operation).and_then(|samples| average(samples))
    }

    /// All metrics as a summary
    pub async fn summary(&self) -> MetricsSummary {
        let counters = self.counters.read().await.clone();
        let durations = self
            .durations
            .read()
            .await
            .iter()
            .filter_map(|(op, samples)| DurationStats::from_samples(samples).map(|s| (op.clone(), s)))
            .collect();

        MetricsSummary {
            counters,
            durations,
        }
    }

    /// Reset all metrics
    pub async fn reset(&self) {
        self.counters.write().await.clear();
        self.durations.write().await.clear();
    }
}

fn average(samples: &[Duration]) -> Option<Duration> {
    let count = u32::try_from(samples.len()).ok().filter(|n| *n > 0)?;
    Some(samples.iter().sum::<Duration>() / count)
}

/// Summary of all metrics
#[derive(Debug, Clone, Default)]
pub struct MetricsSummary {
    /// Counter values
    pub counters: HashMap<String, u64>,
    /// Duration statistics per operation
    pub durations: HashMap<String, DurationStats>,
}

/// Duration statistics for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationStats {
    /// Number of measurements
    pub count: usize,
    /// Average duration
    pub avg: Duration,
    /// 50th percentile
    pub p50: Duration,
    /// 95th percentile
    pub p95: Duration,
    /// Minimum duration
    pub min: Duration,
    /// Maximum duration
    pub max: Duration,
}

impl DurationStats {
    fn from_samples(samples: &[Duration]) -> Option<Self> {
        let avg = average(samples)?;
        let mut sorted = samples.to_vec();
        sorted.sort();
        let at = |percentile: f64| {
            let index = ((sorted.len() - 1) as f64 * percentile) as usize;
            sorted[index]
        };
        Some(Self {
            count: sorted.len(),
            avg,
            p50: at(0.5),
            p95: at(0.95),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Timer for one repository call
pub struct MetricsTimer<'a> {
    metrics: &'a PersistenceMetrics,
    operation: &'static str,
    start: Instant,
}

impl<'a> MetricsTimer<'a> {
    /// Start timing `operation`
    pub fn new(metrics: &'a PersistenceMetrics, operation: &'static str) -> Self {
        Self {
            metrics,
            operation,
            start: Instant::now(),
        }
    }

    /// Record the duration, bump `<operation>.count` and `<operation>.<outcome>`
    pub async fn finish(self, outcome: &str) {
        let elapsed = self.start.elapsed();
        self.metrics.record_duration(self.operation, elapsed).await;
        self.metrics
            .increment(&format!("{}.count", self.operation))
            .await;
        self.metrics
            .increment(&format!("{}.{outcome}", self.operation))
            .await;
    }
}
