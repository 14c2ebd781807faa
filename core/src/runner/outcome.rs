use std::fmt;
use std::time::Duration;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_INPUT_ERROR: i32 = 1;
pub const EXIT_RUNTIME_ERROR: i32 = 2;
/// Reported when the child has no exit status of its own (killed by a
/// signal, or terminated by us after a deadline or cancellation).
pub const EXIT_ABNORMAL: i32 = -1;

pub const DEFAULT_INPUT_ERROR: &str = "Invalid JSON input";
pub const DEFAULT_RUNTIME_ERROR: &str = "Invalid data (age or interests)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    InputError,
    RuntimeError,
    Crash,
}

/// Why a run was forcibly terminated before the child exited on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    Deadline(Duration),
    Cancelled,
}

impl fmt::Display for Interruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interruption::Deadline(after) => write!(f, "deadline of {}ms exceeded", after.as_millis()),
            Interruption::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Immutable record of one core binary run.
///
/// Only the named constructors below build a value, so an exit code is never
/// paired with the wrong kind of captured text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    exit_code: i32,
    output: String,
    error_output: String,
    interruption: Option<Interruption>,
}

impl ExecutionOutcome {
    fn new(exit_code: i32, output: String, error_output: String) -> Self {
        Self {
            exit_code,
            output,
            error_output,
            interruption: None,
        }
    }

    pub fn success(output: impl Into<String>) -> Self {
        Self::new(EXIT_SUCCESS, output.into(), String::new())
    }

    pub fn input_error(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT_ERROR, String::new(), message.into())
    }

    pub fn runtime_error(message: impl Into<String>) -> Self {
        Self::new(EXIT_RUNTIME_ERROR, String::new(), message.into())
    }

    pub fn crash(exit_code: i32, error_output: impl Into<String>) -> Self {
        Self::new(exit_code, String::new(), error_output.into())
    }

    pub fn timed_out(interruption: Interruption, error_output: impl Into<String>) -> Self {
        Self {
            interruption: Some(interruption),
            ..Self::new(EXIT_ABNORMAL, String::new(), error_output.into())
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn error_output(&self) -> &str {
        &self.error_output
    }

    pub fn interruption(&self) -> Option<Interruption> {
        self.interruption
    }

    pub fn is_successful(&self) -> bool {
        self.exit_code == EXIT_SUCCESS
    }

    pub fn is_input_error(&self) -> bool {
        self.exit_code == EXIT_INPUT_ERROR
    }

    pub fn is_runtime_error(&self) -> bool {
        self.exit_code == EXIT_RUNTIME_ERROR
    }

    pub fn is_validation_error(&self) -> bool {
        self.is_input_error() || self.is_runtime_error()
    }

    pub fn is_timed_out(&self) -> bool {
        self.interruption.is_some()
    }

    pub fn kind(&self) -> OutcomeKind {
        match self.exit_code {
            EXIT_SUCCESS => OutcomeKind::Success,
            EXIT_INPUT_ERROR => OutcomeKind::InputError,
            EXIT_RUNTIME_ERROR => OutcomeKind::RuntimeError,
            _ => OutcomeKind::Crash,
        }
    }
}

/// Maps a finished run onto the core binary's exit-code protocol.
///
/// 0 passes stdout through, 1 and 2 fall back to fixed messages when stderr
/// is empty, anything else is an undifferentiated crash.
pub fn classify(exit_code: i32, stdout: String, stderr: String) -> ExecutionOutcome {
    match exit_code {
        EXIT_SUCCESS => ExecutionOutcome::success(stdout),
        EXIT_INPUT_ERROR => ExecutionOutcome::input_error(or_default(stderr, DEFAULT_INPUT_ERROR)),
        EXIT_RUNTIME_ERROR => {
            ExecutionOutcome::runtime_error(or_default(stderr, DEFAULT_RUNTIME_ERROR))
        }
        code => ExecutionOutcome::crash(code, stderr),
    }
}

fn or_default(captured: String, fallback: &str) -> String {
    if captured.is_empty() {
        fallback.to_string()
    } else {
        captured
    }
}
