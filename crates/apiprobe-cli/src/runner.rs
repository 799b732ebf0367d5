//! Concurrent suite execution

use crate::report::{CaseResult, SuiteReport};
use crate::suite::{CaseContext, TestCase};
use apiprobe_core::{EndpointTable, Settings};
use apiprobe_http::ApiClient;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// Runs test cases, each against its own freshly configured client
pub struct SuiteRunner {
    settings: Arc<Settings>,
    endpoints: Arc<EndpointTable>,
    workers: usize,
}

impl SuiteRunner {
    pub fn new(settings: Settings, endpoints: EndpointTable) -> Self {
        let workers = settings.parallel_workers.max(1);
        Self {
            settings: Arc::new(settings),
            endpoints: Arc::new(endpoints),
            workers,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Cases whose id contains `filter`, all of them when `None`
    pub fn select(cases: Vec<TestCase>, filter: Option<&str>) -> Vec<TestCase> {
        match filter {
            Some(filter) => cases.into_iter().filter(|c| c.id().contains(filter)).collect(),
            None => cases,
        }
    }

    /// Run `cases` with up to `workers` in flight. Results keep the input
    /// order regardless of completion order.
    pub async fn run(&self, cases: Vec<TestCase>) -> SuiteReport {
        let started_at = Utc::now();
        let start = Instant::now();
        tracing::info!(cases = cases.len(), workers = self.workers, "Running suite");

        let mut results: Vec<(usize, CaseResult)> = stream::iter(cases.into_iter().enumerate())
            .map(|(index, case)| async move { (index, self.run_case(case).await) })
            .buffer_unordered(self.workers)
            .collect()
            .await;
        results.sort_by_key(|(index, _)| *index);

        SuiteReport::new(
            started_at,
            self.settings.base_url.clone(),
            self.settings.environment.clone(),
            start.elapsed(),
            results.into_iter().map(|(_, result)| result).collect(),
        )
    }

    async fn run_case(&self, case: TestCase) -> CaseResult {
        let ctx = CaseContext {
            client: ApiClient::from_settings(&self.settings),
            endpoints: self.endpoints.clone(),
        };

        let start = Instant::now();
        let outcome = (case.run)(ctx).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match &outcome {
            Ok(()) => tracing::info!(case = %case.id(), duration_ms, "Case passed"),
            Err(e) => tracing::error!(case = %case.id(), duration_ms, error = %e, "Case failed"),
        }

        CaseResult {
            id: case.id(),
            category: case.category,
            name: case.name.to_string(),
            passed: outcome.is_ok(),
            duration_ms,
            error: outcome.err().map(|e| format!("{:#}", e)),
        }
    }
}
