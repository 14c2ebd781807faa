//! Integration tests for the process executor
//!
//! These tests run small shell scripts standing in for the core binary and
//! check the exit-code protocol end to end.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use giftgen_core::api::{
    CancellationToken, CoreExecutor, ExecutorConfig, ExecutorError, GiftError, GiftGenerator,
    Interruption, OutcomeKind, ProcessExecutor,
};
use pretty_assertions::assert_eq;

const SCRIPTS: &[(&str, &str)] = &[
    ("ideas", "cat > /dev/null\nprintf '%s\\n' '{\"ideas\":[\"a\"]}'\n"),
    ("echo", "cat\n"),
    ("ignore_stdin", "echo done\n"),
    ("bad_json", "cat > /dev/null\nexit 1\n"),
    ("bad_age", "cat > /dev/null\nprintf 'Invalid age' >&2\nexit 2\n"),
    ("bad_data", "exit 2\n"),
    ("segfault", "printf 'Segmentation fault' >&2\nexit 139\n"),
    ("killed", "kill -9 $$\n"),
    ("hang", "sleep 5\necho late\n"),
    ("slow", "sleep 0.3\necho slow\n"),
    ("latin1", "cat > /dev/null\nprintf '\\377\\376'\n"),
];

// Executable bit set, but not a format the kernel can load.
const GARBAGE: &[u8] = &[0x7f, b'E', b'L', b'F', 0x00, 0xde, 0xad, 0xbe, 0xef];

// Every script is written before any test spawns a process, so no forked
// child can hold a write handle on a file we are about to exec.
fn fixtures() -> &'static Path {
    static DIR: OnceLock<tempfile::TempDir> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in SCRIPTS {
            let path = dir.path().join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        let garbage = dir.path().join("garbage");
        std::fs::write(&garbage, GARBAGE).unwrap();
        std::fs::set_permissions(&garbage, std::fs::Permissions::from_mode(0o755)).unwrap();
        dir
    })
    .path()
}

fn script(name: &str) -> PathBuf {
    fixtures().join(name)
}

fn executor(name: &str) -> ProcessExecutor {
    executor_with(name, 5_000, 4)
}

fn executor_with(name: &str, timeout_ms: u64, max_concurrent: usize) -> ProcessExecutor {
    ProcessExecutor::new(&ExecutorConfig {
        binary_path: script(name),
        project_dir: None,
        timeout_ms,
        max_concurrent,
    })
}

#[tokio::test]
async fn test_success_passes_stdout_through() {
    let outcome = executor("ideas")
        .execute(Some(r#"{"age":33,"interests":"tech"}"#))
        .await
        .unwrap();

    assert!(outcome.is_successful());
    assert_eq!(outcome.output(), "{\"ideas\":[\"a\"]}\n");
    assert_eq!(outcome.error_output(), "");
}

#[tokio::test]
async fn test_input_is_delivered_on_stdin() {
    let payload = r#"{"age":41,"interests":"jeux video, high-tech"}"#;
    let outcome = executor("echo").execute(Some(payload)).await.unwrap();

    assert!(outcome.is_successful());
    assert_eq!(outcome.output(), payload);
}

#[tokio::test]
async fn test_absent_input_gives_empty_stdin() {
    let outcome = executor("echo").execute(None).await.unwrap();

    assert!(outcome.is_successful());
    assert_eq!(outcome.output(), "");
}

#[tokio::test]
async fn test_child_ignoring_large_input_is_not_an_error() {
    let payload = "x".repeat(1024 * 1024);
    let outcome = executor("ignore_stdin").execute(Some(&payload)).await.unwrap();

    assert!(outcome.is_successful());
    assert_eq!(outcome.output(), "done\n");
}

#[tokio::test]
async fn test_exit_1_defaults_message() {
    let outcome = executor("bad_json").execute(Some("invalid json {")).await.unwrap();

    assert!(outcome.is_input_error());
    assert_eq!(outcome.error_output(), "Invalid JSON input");
}

#[tokio::test]
async fn test_exit_2_keeps_stderr() {
    let outcome = executor("bad_age")
        .execute(Some(r#"{"age":0,"interests":"tech"}"#))
        .await
        .unwrap();

    assert!(outcome.is_runtime_error());
    assert_eq!(outcome.error_output(), "Invalid age");
}

#[tokio::test]
async fn test_exit_2_defaults_message() {
    let outcome = executor("bad_data").execute(Some("{}")).await.unwrap();

    assert!(outcome.is_runtime_error());
    assert_eq!(outcome.error_output(), "Invalid data (age or interests)");
}

#[tokio::test]
async fn test_unknown_exit_code_is_crash() {
    let outcome = executor("segfault").execute(Some("test")).await.unwrap();

    assert_eq!(outcome.kind(), OutcomeKind::Crash);
    assert!(!outcome.is_successful());
    assert!(!outcome.is_validation_error());
    assert_eq!(outcome.exit_code(), 139);
    assert_eq!(outcome.error_output(), "Segmentation fault");
}

#[tokio::test]
async fn test_signal_death_is_crash_with_sentinel() {
    let outcome = executor("killed").execute(None).await.unwrap();

    assert_eq!(outcome.kind(), OutcomeKind::Crash);
    assert_eq!(outcome.exit_code(), -1);
    assert!(!outcome.is_timed_out());
}

#[tokio::test]
async fn test_deadline_terminates_child() {
    let started = Instant::now();
    let outcome = executor_with("hang", 200, 1).execute(None).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(3));
    assert!(outcome.is_timed_out());
    assert_eq!(outcome.kind(), OutcomeKind::Crash);
    assert_eq!(
        outcome.interruption(),
        Some(Interruption::Deadline(Duration::from_millis(200)))
    );
}

#[tokio::test]
async fn test_cancellation_terminates_child() {
    let exec = executor_with("hang", 0, 1);
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let outcome = exec.execute_with_cancel(Some("{}"), token).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(outcome.interruption(), Some(Interruption::Cancelled));
    assert_eq!(exec.available_slots(), 1);
}

#[tokio::test]
async fn test_admission_gate_serializes_runs() {
    let exec = Arc::new(executor_with("slow", 5_000, 1));

    let started = Instant::now();
    let (a, b) = tokio::join!(exec.execute(None), exec.execute(None));

    assert_eq!(a.unwrap().output(), "slow\n");
    assert_eq!(b.unwrap().output(), "slow\n");
    assert!(started.elapsed() >= Duration::from_millis(550));
    assert_eq!(exec.available_slots(), 1);
}

#[tokio::test]
async fn test_generator_scenarios() {
    let ideas = GiftGenerator::new(Arc::new(executor("ideas")));
    assert_eq!(
        ideas
            .generate_gifts(r#"{"age":33,"interests":"tech"}"#)
            .await
            .unwrap(),
        r#"{"ideas":["a"]}"#
    );

    let bad_json = GiftGenerator::new(Arc::new(executor("bad_json")));
    match bad_json.generate_gifts("invalid json {").await {
        Err(GiftError::Validation { message, .. }) => assert_eq!(message, "Invalid JSON input"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let bad_age = GiftGenerator::new(Arc::new(executor("bad_age")));
    match bad_age
        .generate_gifts(r#"{"age":0,"interests":"tech"}"#)
        .await
    {
        Err(GiftError::Validation { message, .. }) => assert_eq!(message, "Invalid age"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let segfault = GiftGenerator::new(Arc::new(executor("segfault")));
    let err = segfault.generate_gifts("{}").await.unwrap_err();
    assert!(!err.is_validation());
    assert!(err.to_string().contains("139"));
    assert!(err.to_string().contains("Segmentation fault"));
}

#[tokio::test]
async fn test_non_executable_binary_is_rejected_before_spawn() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("core");
    std::fs::write(&path, "#!/bin/sh\ntouch \"$0.ran\"\n").unwrap();

    let exec = ProcessExecutor::new(&ExecutorConfig {
        binary_path: path.clone(),
        project_dir: None,
        timeout_ms: 1_000,
        max_concurrent: 1,
    });

    let generator = GiftGenerator::new(Arc::new(exec));
    let err = generator.generate_gifts("{}").await.unwrap_err();
    assert!(!err.is_validation());
    assert!(err.to_string().contains("not found or not executable"));
    assert!(!dir.path().join("core.ran").exists());
}

#[tokio::test]
async fn test_non_utf8_stdout_on_success_is_decode_error() {
    let err = executor("latin1").execute(Some("{}")).await.unwrap_err();
    match err {
        ExecutorError::StdoutDecode(e) => assert_eq!(e.as_bytes(), &[0xff, 0xfe]),
        other => panic!("expected decode error, got {other}"),
    }

    let generator = GiftGenerator::new(Arc::new(executor("latin1")));
    match generator.generate_gifts("{}").await {
        Err(GiftError::Internal {
            exit_code: None,
            source: Some(ExecutorError::StdoutDecode(_)),
            ..
        }) => {}
        other => panic!("expected internal decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unloadable_binary_is_spawn_error() {
    let exec = executor("garbage");

    match exec.execute(Some("{}")).await {
        Err(ExecutorError::Spawn { program, .. }) => assert_eq!(program, script("garbage")),
        other => panic!("expected spawn error, got {other:?}"),
    }
    assert_eq!(exec.available_slots(), 4);
}

async fn wait_for_full_gate(exec: &ProcessExecutor) {
    while exec.available_slots() > 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_cancel_while_queued_for_a_slot() {
    let exec = Arc::new(executor_with("hang", 0, 1));
    let holder = {
        let exec = exec.clone();
        tokio::spawn(async move { exec.execute(None).await })
    };
    wait_for_full_gate(&exec).await;

    let token = CancellationToken::new();
    token.cancel();
    let started = Instant::now();
    let outcome = exec.execute_with_cancel(Some("{}"), token).await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(outcome.exit_code(), -1);
    assert_eq!(outcome.interruption(), Some(Interruption::Cancelled));
    assert_eq!(exec.available_slots(), 0);

    holder.abort();
    let _ = holder.await;
    assert_eq!(exec.available_slots(), 1);
}

#[tokio::test]
async fn test_close_rejects_queued_runs_but_not_running_ones() {
    let exec = Arc::new(executor_with("slow", 5_000, 1));
    let running = {
        let exec = exec.clone();
        tokio::spawn(async move { exec.execute(None).await })
    };
    wait_for_full_gate(&exec).await;

    let queued = {
        let exec = exec.clone();
        tokio::spawn(async move { exec.execute(None).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    exec.close();

    assert!(matches!(
        queued.await.unwrap(),
        Err(ExecutorError::GateClosed)
    ));
    assert_eq!(running.await.unwrap().unwrap().output(), "slow\n");
    assert!(matches!(
        exec.execute(None).await,
        Err(ExecutorError::GateClosed)
    ));
}
