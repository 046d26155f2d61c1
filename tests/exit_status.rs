// tests/exit_status.rs
#![cfg(unix)]

mod common;
use crate::common::{init_tracing, sh, RecordingSink, TestResult};

use async_runner::errors::RunnerError;
use async_runner::{ExecutionOptions, FailureReason, LifecycleEvent};

#[tokio::test]
async fn zero_exit_returns_true_and_logs_success() -> TestResult {
    init_tracing();
    let (runner, sink) = RecordingSink::runner();

    let ok = runner
        .execute(sh("exit 0"), &ExecutionOptions::new().process_name("ok"))
        .await?;

    assert!(ok);
    let events = sink.events_for("ok");
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], LifecycleEvent::Start { .. }));
    assert_eq!(
        events[1],
        LifecycleEvent::Success {
            label: "ok".to_string(),
            exit_code: 0
        }
    );
    Ok(())
}

#[tokio::test]
async fn non_zero_exit_returns_false_with_exact_code() -> TestResult {
    init_tracing();
    let (runner, sink) = RecordingSink::runner();

    let ok = runner
        .execute(sh("exit 42"), &ExecutionOptions::new().process_name("bad"))
        .await?;

    assert!(!ok);
    match sink.events_for("bad").last() {
        Some(LifecycleEvent::Failure {
            exit_code, reason, ..
        }) => {
            assert_eq!(*exit_code, Some(42));
            assert_eq!(*reason, FailureReason::NonZeroExit(42));
        }
        other => panic!("expected failure event, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn empty_command_is_a_configuration_error_without_start_event() {
    init_tracing();
    let (runner, sink) = RecordingSink::runner();

    let res = runner
        .execute(Vec::<String>::new(), &ExecutionOptions::new())
        .await;

    assert!(matches!(res, Err(RunnerError::ConfigError(_))));
    assert_eq!(sink.start_count(), 0);
    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        LifecycleEvent::Failure {
            exit_code: None,
            reason: FailureReason::Configuration(_),
            ..
        }
    ));
}

#[tokio::test]
async fn missing_executable_is_a_spawn_failure_not_an_exit_code() -> TestResult {
    init_tracing();
    let (runner, sink) = RecordingSink::runner();

    let outcome = runner
        .execute_with_output(
            ["/definitely/not/a/real/binary-7f3a", "--flag"],
            &ExecutionOptions::new().capture_output(true),
        )
        .await?;

    assert!(!outcome.success);
    assert_eq!(outcome.exit_code, None);
    assert_eq!(outcome.stdout, None);
    assert_eq!(outcome.stderr, None);
    assert!(matches!(outcome.failure, Some(FailureReason::Spawn(_))));

    let events = sink.events_for("/definitely/not/a/real/binary-7f3a");
    assert_eq!(events.len(), 2, "start + failure: {events:?}");
    assert!(matches!(
        events[1],
        LifecycleEvent::Failure {
            exit_code: None,
            reason: FailureReason::Spawn(_),
            tail: None,
            ..
        }
    ));
    Ok(())
}

#[tokio::test]
async fn label_defaults_to_executable_and_start_carries_full_command() -> TestResult {
    init_tracing();
    let (runner, sink) = RecordingSink::runner();

    runner
        .execute(["true", "ignored-arg"], &ExecutionOptions::new())
        .await?;

    let events = sink.events_for("true");
    assert_eq!(
        events[0],
        LifecycleEvent::Start {
            label: "true".to_string(),
            command: vec!["true".to_string(), "ignored-arg".to_string()],
        }
    );
    Ok(())
}

#[tokio::test]
async fn killed_child_is_reported_as_signal() -> TestResult {
    init_tracing();
    let (runner, _sink) = RecordingSink::runner();

    let outcome = runner
        .execute_with_output(sh("kill -9 $$"), &ExecutionOptions::new())
        .await?;

    assert!(!outcome.success);
    assert_eq!(outcome.exit_code, None);
    assert_eq!(outcome.failure, Some(FailureReason::Signal(9)));
    Ok(())
}

#[tokio::test]
async fn working_directory_and_environment_are_applied() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let dir = dir.path().canonicalize()?;

    let options = ExecutionOptions::new()
        .capture_output(true)
        .working_directory(&dir)
        .env("GREETING", "hej")
        .env("PATH", "/usr/bin:/bin");

    let outcome = async_runner::run_process_with_output(
        sh("pwd -P; echo \"$GREETING\"; echo \"${HOME:-unset}\""),
        &options,
    )
    .await?;

    assert!(outcome.success, "{outcome:?}");
    let expected = format!("{}\nhej\nunset\n", dir.display());
    assert_eq!(outcome.stdout.as_deref(), Some(expected.as_str()));
    Ok(())
}

#[tokio::test]
async fn free_function_reports_boolean() -> TestResult {
    init_tracing();
    assert!(async_runner::run_process(["true"], &ExecutionOptions::new()).await?);
    assert!(!async_runner::run_process(["false"], &ExecutionOptions::new()).await?);
    Ok(())
}
