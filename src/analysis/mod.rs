//! Emotion analysis client
//!
//! An [`ApiClient`] talks to the remote analysis service; an
//! [`AnalysisController`] owns the lifecycle state a front end renders.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use controller::{AnalysisController, LifecycleState};
pub use error::{AnalysisError, ApiResult, ErrorCategory, ErrorKind};
pub use service::AnalysisService;
pub use types::{AnalysisRequest, AnalysisResult, EmotionIntensity, EmotionStats, HealthStatus};
