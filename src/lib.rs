//! Client for an emotion analysis service.
//!
//! [`analysis`] holds the HTTP client and the lifecycle controller a front end
//! drives; [`cli`] and [`form`] are the command-line front end.

pub mod analysis;
pub mod cli;
pub mod form;

pub use analysis::{
    AnalysisController, AnalysisError, AnalysisRequest, AnalysisResult, ApiClient, ClientConfig,
    LifecycleState,
};
