//! Analysis lifecycle controller
//!
//! Owns the observable [`LifecycleState`] for one front end, validates input
//! before dispatch and translates client errors into user-facing messages.

use crate::analysis::error::{AnalysisError, ApiResult, ErrorCategory};
use crate::analysis::service::AnalysisService;
use crate::analysis::types::{AnalysisRequest, AnalysisResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Message returned when the submitted text is blank
pub const EMPTY_TEXT_MESSAGE: &str = "Please enter some text to analyze";

/// Where the controller is in the analysis lifecycle
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Loading,
    Succeeded(AnalysisResult),
    Failed(AnalysisError),
}

impl LifecycleState {
    pub fn is_idle(&self) -> bool {
        matches!(self, LifecycleState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LifecycleState::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            LifecycleState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            LifecycleState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Idle => write!(f, "Idle"),
            LifecycleState::Loading => write!(f, "Loading"),
            LifecycleState::Succeeded(_) => write!(f, "Succeeded"),
            LifecycleState::Failed(_) => write!(f, "Failed"),
        }
    }
}

/// Mediates between a front end and an [`AnalysisService`].
///
/// At most one analysis is in flight per controller: a second `analyze` while
/// `Loading` is rejected with [`AnalysisError::busy`]. `reset` bumps a
/// generation counter so the outcome of a request started before the reset is
/// returned to its caller but never written to the state slot.
pub struct AnalysisController {
    service: Arc<dyn AnalysisService>,
    state: watch::Sender<LifecycleState>,
    generation: AtomicU64,
}

impl AnalysisController {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        let (state, _) = watch::channel(LifecycleState::Idle);
        Self {
            service,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> LifecycleState {
        self.state.borrow().clone()
    }

    pub fn result(&self) -> Option<AnalysisResult> {
        self.state.borrow().result().cloned()
    }

    pub fn error(&self) -> Option<AnalysisError> {
        self.state.borrow().error().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Observe every state transition
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Validate, dispatch and record one analysis.
    ///
    /// Suggestions are always requested regardless of the caller's flag.
    /// Errors from the service are remapped by [`ErrorCategory`] before being
    /// stored and returned.
    pub async fn analyze(&self, request: AnalysisRequest) -> ApiResult<AnalysisResult> {
        let mut admitted: ApiResult<u64> = Err(AnalysisError::busy());

        self.state.send_if_modified(|state| {
            if state.is_loading() {
                return false;
            }

            if request.text.trim().is_empty() {
                let error = AnalysisError::validation(EMPTY_TEXT_MESSAGE);
                *state = LifecycleState::Failed(error.clone());
                admitted = Err(error);
                return true;
            }

            *state = LifecycleState::Loading;
            admitted = Ok(self.generation.load(Ordering::SeqCst));
            true
        });

        let generation = match admitted {
            Ok(generation) => generation,
            Err(error) => {
                debug!("Analysis rejected before dispatch: {}", error);
                return Err(error);
            }
        };

        let guard = InFlight {
            controller: self,
            generation,
            finished: false,
        };

        let request = AnalysisRequest {
            include_suggestions: true,
            ..request
        };

        debug!("Dispatching analysis of {} characters", request.text.chars().count());

        match self.service.analyze(&request).await {
            Ok(result) => {
                info!(
                    "Analysis {} completed: {} ({:.2})",
                    result.analysis_id, result.emotion, result.confidence
                );
                guard.finish(LifecycleState::Succeeded(result.clone()));
                Ok(result)
            }
            Err(raw) => {
                warn!(
                    "Analysis failed ({}, status {}): {}",
                    ErrorCategory::classify(&raw),
                    raw.status_code,
                    raw.message
                );
                let error = ErrorCategory::remap(raw);
                guard.finish(LifecycleState::Failed(error.clone()));
                Err(error)
            }
        }
    }

    /// Return to `Idle`, discarding any result or error.
    ///
    /// Does not cancel an in-flight request.
    pub fn reset(&self) {
        self.state.send_if_modified(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            if state.is_idle() {
                false
            } else {
                *state = LifecycleState::Idle;
                true
            }
        });
    }

    /// Write `next` only if no reset happened since `generation` was taken
    fn commit(&self, generation: u64, next: LifecycleState) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            true
        })
    }
}

/// Tracks one admitted analysis. If the caller drops the future before the
/// service answers, the slot is released back to `Idle` instead of being
/// left in `Loading`.
struct InFlight<'a> {
    controller: &'a AnalysisController,
    generation: u64,
    finished: bool,
}

impl InFlight<'_> {
    fn finish(mut self, next: LifecycleState) {
        self.finished = true;
        debug!("Analysis finished, moving to {}", next);
        if !self.controller.commit(self.generation, next) {
            debug!("Discarding outcome of an analysis superseded by reset");
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            debug!("Analysis dropped while in flight, releasing state");
            self.controller.state.send_if_modified(|state| {
                if state.is_loading()
                    && self.controller.generation.load(Ordering::SeqCst) == self.generation
                {
                    *state = LifecycleState::Idle;
                    true
                } else {
                    false
                }
            });
        }
    }
}
