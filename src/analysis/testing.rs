//! Scripted analysis service for controller tests

use crate::analysis::error::{AnalysisError, ApiResult};
use crate::analysis::service::AnalysisService;
use crate::analysis::types::{AnalysisRequest, AnalysisResult, EmotionIntensity, HealthStatus};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// The result used by the "I feel great today" scenario
pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        emotion: "happy".to_string(),
        confidence: 0.92,
        secondary_emotions: vec!["excited".to_string()],
        suggestions: vec!["Keep a journal".to_string()],
        emotion_intensity: EmotionIntensity::Medium,
        timestamp: "2024-01-01T00:00:00Z".to_string(),
        processing_time_seconds: 0.42,
        analysis_id: "abc123".to_string(),
    }
}

/// Fake service that replays queued outcomes and records each call
#[derive(Default)]
pub struct MockAnalysisService {
    latency: Duration,
    outcomes: Mutex<VecDeque<ApiResult<AnalysisResult>>>,
    requests: Mutex<Vec<AnalysisRequest>>,
    calls: AtomicUsize,
}

impl MockAnalysisService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every response by `latency`
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn push_result(&self, result: AnalysisResult) {
        self.outcomes.lock().unwrap().push_back(Ok(result));
    }

    pub fn push_error(&self, error: AnalysisError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<AnalysisRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> ApiResult<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AnalysisError::transport("no scripted outcome")))
    }

    async fn health_check(&self) -> ApiResult<HealthStatus> {
        Ok(HealthStatus {
            status: "healthy".to_string(),
            service: "mock".to_string(),
            message: None,
            timestamp: None,
            version: None,
            uptime: None,
            environment: None,
        })
    }
}
