pub mod exit;
mod executor;
pub mod outcome;

pub use executor::{CoreExecutor, ProcessExecutor};
pub use outcome::{classify, ExecutionOutcome, Interruption, OutcomeKind};
