// core/src/error/executor_error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Failures that happen around the core binary rather than inside its
/// exit-code protocol.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("core binary not found or not executable: {}", path.display())]
    BinaryUnavailable { path: PathBuf },

    #[error("failed to spawn process: {}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error while streaming: {stream}")]
    StreamIo {
        stream: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("stdout decode error (utf-8)")]
    StdoutDecode(#[source] std::string::FromUtf8Error),

    #[error("core executor closed, no new runs are admitted")]
    GateClosed,
}
