//! HTTP client for the emotion analysis service

use crate::analysis::config::{ClientConfig, ConfigError};
use crate::analysis::error::{AnalysisError, ApiResult};
use crate::analysis::service::AnalysisService;
use crate::analysis::types::{AnalysisRequest, AnalysisResult, EmotionStats, HealthStatus};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

pub const ANALYZE_PATH: &str = "/api/v1/emotion/analyze";
pub const HEALTH_PATH: &str = "/api/v1/emotion/health";
pub const STATS_PATH: &str = "/api/v1/emotion/stats";
pub const EMOTIONS_PATH: &str = "/api/v1/emotion/emotions";

/// Client for the emotion analysis API.
///
/// Every call performs exactly one HTTP exchange, bounded by the configured
/// timeout. There are no retries and nothing is cached.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn request_timeout(&self) -> Duration {
        self.config.request_timeout()
    }

    /// Submit text for analysis
    pub async fn analyze_emotion(&self, request: &AnalysisRequest) -> ApiResult<AnalysisResult> {
        self.request(Method::POST, ANALYZE_PATH, Some(request)).await
    }

    /// Fetch service health
    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.request::<HealthStatus, ()>(Method::GET, HEALTH_PATH, None)
            .await
    }

    /// Fetch aggregate analysis statistics
    pub async fn stats(&self) -> ApiResult<EmotionStats> {
        self.request::<EmotionStats, ()>(Method::GET, STATS_PATH, None)
            .await
    }

    /// List the emotions the service can detect
    pub async fn supported_emotions(&self) -> ApiResult<Vec<String>> {
        self.request::<Vec<String>, ()>(Method::GET, EMOTIONS_PATH, None)
            .await
    }

    /// Run one exchange, racing it against the configured timeout.
    ///
    /// When the timer wins the exchange future is dropped, which aborts the
    /// underlying connection, so a late response can never be observed.
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(path);
        let request_timeout = self.config.request_timeout();

        debug!("{} {} (timeout {:?})", method, url, request_timeout);

        let result = match timeout(request_timeout, self.exchange(method.clone(), &url, body)).await {
            Ok(result) => result,
            Err(_) => Err(AnalysisError::timeout()),
        };

        if let Err(ref e) = result {
            warn!("{} {} failed with status {}: {}", method, url, e.status_code, e.message);
        }

        result
    }

    async fn exchange<T, B>(&self, method: Method, url: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(body) = body {
            let payload = serde_json::to_vec(body)
                .map_err(|e| AnalysisError::validation(format!("Failed to encode request: {}", e)))?;
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(AnalysisError::from)?;
        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("");
            // Error bodies are best-effort; anything unparseable becomes {}
            let data = response
                .json::<serde_json::Value>()
                .await
                .unwrap_or_else(|_| serde_json::json!({}));
            return Err(AnalysisError::http(status.as_u16(), reason, data));
        }

        let bytes = response.bytes().await.map_err(AnalysisError::from)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            AnalysisError::malformed_response(
                status.as_u16(),
                e,
                String::from_utf8_lossy(&bytes).into_owned(),
            )
        })
    }
}

#[async_trait]
impl AnalysisService for ApiClient {
    async fn analyze(&self, request: &AnalysisRequest) -> ApiResult<AnalysisResult> {
        self.analyze_emotion(request).await
    }

    async fn health_check(&self) -> ApiResult<HealthStatus> {
        self.health().await
    }
}
