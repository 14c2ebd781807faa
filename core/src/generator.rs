use std::sync::Arc;

use crate::error::GiftError;
use crate::runner::{CoreExecutor, ExecutionOutcome};

const VALIDATION_FALLBACK: &str = "Validation error";
const NO_ERROR_OUTPUT: &str = "No error output";

/// Turns a gift request payload into the core binary's JSON answer.
///
/// The payload and the answer are both passed through untouched; only the
/// failure cases are reinterpreted.
#[derive(Clone)]
pub struct GiftGenerator {
    executor: Arc<dyn CoreExecutor>,
}

impl GiftGenerator {
    pub fn new(executor: Arc<dyn CoreExecutor>) -> Self {
        Self { executor }
    }

    pub async fn generate_gifts(&self, payload: &str) -> Result<String, GiftError> {
        let outcome = match self.executor.execute(Some(payload)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let err = GiftError::from(e);
                log_internal(&err);
                return Err(err);
            }
        };
        translate(outcome)
    }

    /// Rejects runs that have not started yet; used on shutdown.
    pub fn close(&self) {
        self.executor.close();
    }
}

/// Collapses an outcome into the answer or one of the two caller-facing
/// error kinds. Input and runtime errors are not told apart past here.
pub fn translate(outcome: ExecutionOutcome) -> Result<String, GiftError> {
    if outcome.is_successful() {
        return Ok(outcome.output().trim().to_string());
    }

    let detail = outcome.error_output().trim();

    if outcome.is_validation_error() {
        let message = non_empty_or(detail, VALIDATION_FALLBACK);
        tracing::info!(exit_code = outcome.exit_code(), reason = %message, "gift request rejected");
        return Err(GiftError::Validation {
            message,
            exit_code: outcome.exit_code(),
        });
    }

    let detail = non_empty_or(detail, NO_ERROR_OUTPUT);
    let message = match outcome.interruption() {
        Some(reason) => format!(
            "Core timed out with exit code {} ({}): {}",
            outcome.exit_code(),
            reason,
            detail
        ),
        None => format!(
            "Core crashed with exit code {}: {}",
            outcome.exit_code(),
            detail
        ),
    };
    let err = GiftError::Internal {
        exit_code: Some(outcome.exit_code()),
        message,
        source: None,
    };
    log_internal(&err);
    Err(err)
}

// The diagnostic only shows up at debug level.
fn log_internal(err: &GiftError) {
    tracing::error!(exit_code = err.exit_code(), "core binary failed");
    tracing::debug!(detail = %err, "core binary failure detail");
}

fn non_empty_or(s: &str, fallback: &str) -> String {
    if s.is_empty() {
        fallback.to_string()
    } else {
        s.to_string()
    }
}
