//! Wire types exchanged with the emotion analysis service

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Text and options submitted for analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Free-text reflection to analyze
    pub text: String,
    /// Ask the service to use its transformer model instead of the rule-based analyzer
    pub use_real_model: bool,
    /// Ask the service to include suggestions in the result
    pub include_suggestions: bool,
}

impl AnalysisRequest {
    /// Create a request with the service's default options
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            use_real_model: false,
            include_suggestions: true,
        }
    }

    pub fn with_real_model(mut self, use_real_model: bool) -> Self {
        self.use_real_model = use_real_model;
        self
    }

    pub fn with_suggestions(mut self, include_suggestions: bool) -> Self {
        self.include_suggestions = include_suggestions;
        self
    }
}

/// Intensity level reported alongside the primary emotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionIntensity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for EmotionIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmotionIntensity::Low => write!(f, "low"),
            EmotionIntensity::Medium => write!(f, "medium"),
            EmotionIntensity::High => write!(f, "high"),
        }
    }
}

/// Structured analysis returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Primary detected emotion
    pub emotion: String,
    /// Confidence score, nominally in `[0, 1]`
    pub confidence: f64,
    #[serde(default)]
    pub secondary_emotions: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub emotion_intensity: EmotionIntensity,
    /// Analysis timestamp as sent by the service
    pub timestamp: String,
    #[serde(rename = "processing_time")]
    pub processing_time_seconds: f64,
    pub analysis_id: String,
}

impl AnalysisResult {
    /// Confidence as a whole percentage, clamped to `0..=100`
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    /// Parse the timestamp when the service sent RFC 3339
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }
}

/// Health endpoint payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy") || self.status.eq_ignore_ascii_case("ok")
    }
}

/// Aggregate statistics kept by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionStats {
    pub total_analyses: u64,
    pub most_common_emotion: String,
    pub average_confidence: f64,
    pub processing_time_avg: f64,
}
