use super::outcome::EXIT_ABNORMAL;

/// Exit code of a finished child, or `EXIT_ABNORMAL` when it has none.
///
/// Signal deaths are not folded into `128 + sig`: the core binary protocol
/// treats any missing status as a crash, and the signal is only logged.
pub fn normalize_exit(status: std::process::ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(code) = status.code() {
            code
        } else {
            if let Some(sig) = status.signal() {
                tracing::warn!(signal = sig, "core binary terminated by signal");
            }
            EXIT_ABNORMAL
        }
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(EXIT_ABNORMAL)
    }
}
