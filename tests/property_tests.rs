//! Property-based tests for the engine's core invariants.
//!
//! These tests use proptest to verify properties hold across many
//! randomly generated inputs.

use proptest::prelude::*;
use std::sync::{Arc, Mutex};
use strata::{StackBuilder, StateStack, TransitionLog, TransitionRecord, Trigger, TriggerId};

fn sym(i: u8) -> String {
    format!("s{i}")
}

fn record(i: usize) -> TransitionRecord<String> {
    TransitionRecord::new(
        format!("from{i}"),
        TriggerId::Event("step".to_string()),
        format!("to{i}"),
    )
}

proptest! {
    #[test]
    fn log_never_exceeds_capacity(capacity in 1..8usize, count in 0..40usize) {
        let mut log = TransitionLog::with_capacity(capacity);
        for i in 0..count {
            log.record(record(i));
        }

        prop_assert_eq!(log.len(), count.min(capacity));
        if count > 0 {
            prop_assert_eq!(log.get(-1).unwrap().from.as_str(), format!("from{}", count - 1));
        }
    }

    #[test]
    fn log_retains_newest_records(capacity in 1..8usize, count in 1..40usize) {
        let mut log = TransitionLog::with_capacity(capacity);
        for i in 0..count {
            log.record(record(i));
        }

        let oldest_retained = count.saturating_sub(capacity);
        prop_assert_eq!(
            log.get(0).unwrap().from.as_str(),
            format!("from{oldest_retained}")
        );
    }

    #[test]
    fn extended_indexing_is_total_for_nonempty_logs(
        count in 1..20usize,
        index in -100..100i64,
    ) {
        let mut log = TransitionLog::with_capacity(count);
        for i in 0..count {
            log.record(record(i));
        }

        let wrapped = index.rem_euclid(count as i64);
        let by_index = log.get(index).unwrap();
        let by_wrapped = log.get(wrapped).unwrap();
        prop_assert_eq!(&by_index.from, &by_wrapped.from);
    }

    #[test]
    fn trigger_equality_ignores_arguments(
        args in prop::collection::vec("[a-z]{0,8}", 0..5)
    ) {
        let with_args = Trigger::new("play".to_string()).with_args(args);
        let bare = Trigger::new("play".to_string());

        prop_assert_eq!(with_args, bare);
    }

    #[test]
    fn failed_dispatch_never_mutates_the_stack(
        depth in 1..6u8,
        trigger in 10..20u8,
    ) {
        let mut machine = StateStack::new(sym(0), ());
        for i in 1..depth {
            machine.push(sym(i));
        }
        let before: Vec<String> = machine.path().to_vec();

        // no handler anywhere: triggers 10..20 are never registered
        prop_assert!(!machine.dispatch(sym(trigger)));
        prop_assert_eq!(machine.path(), before.as_slice());
        prop_assert!(machine.current_trigger().is_none());
    }

    #[test]
    fn push_pop_matches_reference_model(
        ops in prop::collection::vec((any::<bool>(), 0..5u8), 0..40)
    ) {
        let mut machine = StateStack::new(sym(9), ());
        let mut model = vec![sym(9)];

        for (is_push, i) in ops {
            if is_push {
                let state = sym(i);
                if model.last() != Some(&state) {
                    model.push(state.clone());
                }
                machine.push(state);
            } else {
                model.pop();
                machine.pop();
            }
        }

        prop_assert_eq!(machine.path(), model.as_slice());
    }

    #[test]
    fn every_begun_state_is_ended_by_teardown(
        ops in prop::collection::vec((any::<bool>(), 0..5u8), 0..30)
    ) {
        type Seen = Arc<Mutex<Vec<(String, &'static str)>>>;
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));

        {
            let mut builder = StackBuilder::<String, Seen>::new().initial(sym(9));
            for i in (0..5).chain([9]) {
                let state = sym(i);
                builder = builder
                    .on_enter(state.clone(), {
                        let state = state.clone();
                        move |m, _| m.context().lock().unwrap().push((state.clone(), "begin"))
                    })
                    .on_exit(state.clone(), {
                        let state = state.clone();
                        move |m, _| m.context().lock().unwrap().push((state.clone(), "end"))
                    });
            }
            let mut machine = builder.build(Arc::clone(&seen)).unwrap();
            for (is_push, i) in ops {
                if is_push {
                    machine.push(sym(i));
                } else {
                    machine.pop();
                }
            }
        }

        // teardown popped whatever remained; begins and ends must pair up
        let seen = seen.lock().unwrap();
        for i in (0..5).chain([9]) {
            let state = sym(i);
            let begins = seen.iter().filter(|(s, k)| *s == state && *k == "begin").count();
            let ends = seen.iter().filter(|(s, k)| *s == state && *k == "end").count();
            prop_assert_eq!(begins, ends);
        }
    }
}
