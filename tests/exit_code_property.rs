// tests/exit_code_property.rs
#![cfg(unix)]

mod common;
use crate::common::{sh, RecordingSink};

use async_runner::{ExecutionOptions, FailureReason, LifecycleEvent};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn success_iff_exit_code_is_zero(code in 0i32..=255, capture in any::<bool>()) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        let (runner, sink) = RecordingSink::runner();
        let options = ExecutionOptions::new()
            .process_name("prop")
            .capture_output(capture);
        let ok = rt
            .block_on(runner.execute(sh(&format!("exit {code}")), &options))
            .unwrap();

        prop_assert_eq!(ok, code == 0);

        let events = sink.events_for("prop");
        prop_assert_eq!(events.len(), 2);
        match &events[1] {
            LifecycleEvent::Success { exit_code, .. } => prop_assert_eq!(*exit_code, 0),
            LifecycleEvent::Failure { exit_code, reason, .. } => {
                prop_assert_eq!(*exit_code, Some(code));
                prop_assert_eq!(reason, &FailureReason::NonZeroExit(code));
            }
            other => prop_assert!(false, "unexpected terminal event {:?}", other),
        }
    }
}
