//! Stable re-exports for consumers (`cli` and tests).
//!
//! Prefer importing from `giftgen_core::api` instead of reaching into internal modules.

pub use crate::config::{load, AppConfig, ExecutorConfig, HttpServerConfig, LoggingConfig};
pub use crate::error::{ConfigError, ExecutorError, GiftError, INTERNAL_PUBLIC_MESSAGE};
pub use crate::generator::GiftGenerator;
pub use crate::runner::{
    CoreExecutor, ExecutionOutcome, Interruption, OutcomeKind, ProcessExecutor,
};
pub use tokio_util::sync::CancellationToken;
