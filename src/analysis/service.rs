//! Trait seam between the lifecycle controller and the HTTP client

use crate::analysis::error::ApiResult;
use crate::analysis::types::{AnalysisRequest, AnalysisResult, HealthStatus};
use async_trait::async_trait;

/// A backend able to analyze reflections.
///
/// [`crate::analysis::ApiClient`] is the production implementation; tests
/// substitute a scripted fake.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Perform one analysis exchange
    async fn analyze(&self, request: &AnalysisRequest) -> ApiResult<AnalysisResult>;

    /// Query service health
    async fn health_check(&self) -> ApiResult<HealthStatus>;
}
