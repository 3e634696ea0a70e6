// Copyright 2025 Cowboy AI, LLC.

//! Repository wrapper that adds metrics collection

use super::metrics::{MetricsTimer, PersistenceMetrics};
use super::repository::Repository;
use crate::entity::Entity;
use crate::results::{OperationResult, RecordResult};
use async_trait::async_trait;
use std::marker::PhantomData;

fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

/// Counts calls and outcomes of an inner repository
///
/// Counters are named `repository.<operation>.count` plus one outcome
/// counter per call: `success`/`failure` for writes and reads, `hit`/`miss`
/// for existence checks.
pub struct InstrumentedRepository<T, R> {
    inner: R,
    metrics: PersistenceMetrics,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R: Clone> Clone for InstrumentedRepository<T, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            metrics: self.metrics.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity, R: Repository<T>> InstrumentedRepository<T, R> {
    /// Wrap `inner` with a fresh collector
    pub fn new(inner: R) -> Self {
        Self::with_metrics(inner, PersistenceMetrics::new())
    }

    /// Wrap `inner`, recording into an existing collector
    pub fn with_metrics(inner: R, metrics: PersistenceMetrics) -> Self {
        Self {
            inner,
            metrics,
            _entity: PhantomData,
        }
    }

    /// The metrics collector
    pub fn metrics(&self) -> &PersistenceMetrics {
        &self.metrics
    }

    /// The wrapped repository
    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<T: Entity, R: Repository<T>> Repository<T> for InstrumentedRepository<T, R> {
    async fn create(&self, item: &T) -> OperationResult {
        let timer = MetricsTimer::new(&self.metrics, "repository.create");
        let result = self.inner.create(item).await;
        timer.finish(outcome(result.success)).await;
        result
    }

    async fn update(&self, item: &T) -> OperationResult {
        let timer = MetricsTimer::new(&self.metrics, "repository.update");
        let result = self.inner.update(item).await;
        timer.finish(outcome(result.success)).await;
        result
    }

    async fn delete(&self, id: &str) -> bool {
        let timer = MetricsTimer::new(&self.metrics, "repository.delete");
        let deleted = self.inner.delete(id).await;
        timer.finish(outcome(deleted)).await;
        deleted
    }

    async fn get_record_by_id(&self, id: &str) -> RecordResult<T> {
        let timer = MetricsTimer::new(&self.metrics, "repository.get");
        let result = self.inner.get_record_by_id(id).await;
        timer.finish(outcome(result.success)).await;
        result
    }

    async fn record_exists(&self, id: &str) -> bool {
        let timer = MetricsTimer::new(&self.metrics, "repository.exists");
        let exists = self.inner.record_exists(id).await;
        timer.finish(if exists { "hit" } else { "miss" }).await;
        exists
    }

    fn validate(&self, item: &T) -> OperationResult {
        self.inner.validate(item)
    }
}
