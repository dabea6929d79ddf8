use std::cell::RefCell;

use super::*;
use crate::foundation::error::PermtraceError;

fn input(v: &[i32]) -> InputSequence {
    InputSequence::new(v.to_vec()).unwrap()
}

#[test]
fn fresh_session_snapshot_is_idle() {
    let s = Session::new(input(&[1, 2, 3]), PlaybackOpts::default());
    let snap = s.snapshot();
    assert_eq!(snap.position, -1);
    assert_eq!(snap.total_steps, 33);
    assert_eq!(snap.state, PlaybackState::Idle);
    assert!(snap.step.is_none());
    assert!(snap.highlight_path.is_empty());
    assert!(snap.highlight_lines.is_empty());
    assert!(snap.call_stack.is_empty());
    assert_eq!(snap.progress.total_nodes, 16);
    assert_eq!(snap.progress.expected_permutations, 6);
    assert_eq!(snap.dimmed_count, 16);
    assert_eq!(snap.variables.remaining, "[1, 2, 3]");
    assert_eq!(snap.explanation, Explanation::idle());
}

#[test]
fn snapshot_after_first_step() {
    let mut s = Session::new(input(&[1, 2, 3]), PlaybackOpts::default());
    s.controller_mut().step_forward();
    let snap = s.snapshot();
    assert_eq!(snap.position, 0);
    assert_eq!(snap.state, PlaybackState::Paused);
    assert_eq!(snap.step.as_ref().map(|st| st.kind), Some(crate::StepKind::Select));
    assert_eq!(
        snap.highlight_path,
        vec![NodeId::root(), NodeId::from_path(&[1])]
    );
    assert_eq!(snap.dimmed_count, 14);
    assert_eq!(snap.highlight_lines, vec![10, 11, 12]);
    assert_eq!(snap.call_stack.len(), 2);
    assert_eq!(snap.variables.path, "[1]");
    assert_eq!(snap.variables.used, vec![true, false, false]);
    assert_eq!(snap.explanation.main, "Place 1 at position 1");
}

#[test]
fn snapshot_at_last_step_has_every_result() {
    let mut s = Session::new(input(&[1, 2, 3]), PlaybackOpts::default());
    s.controller_mut().go_to_step(32);
    let snap = s.snapshot();
    assert_eq!(snap.presentation.results.len(), 6);
    assert_eq!(snap.progress.found_permutations, 6);
    assert_eq!(snap.progress.visited_count, 15);
    assert_eq!(snap.variables.result_size, 6);
    assert_eq!(snap.explanation.title, "Permutation found");
}

#[test]
fn submit_discards_previous_run() {
    let seen = RefCell::new(Vec::new());
    let mut s = Session::new(input(&[1, 2, 3]), PlaybackOpts { speed_ms: 300 });
    s.controller_mut()
        .set_observer(|step, i| seen.borrow_mut().push((i, step.node_id.clone())));
    s.controller_mut().play();
    let before = s.fingerprint();

    s.submit(input(&[2, 4]));
    assert_eq!(s.controller().state(), PlaybackState::Idle);
    assert_eq!(s.controller().position(), None);
    assert_eq!(s.controller().len(), 8);
    assert_eq!(s.controller().speed_ms(), 300);
    assert_eq!(s.tree().node_count(), 5);
    assert_eq!(s.input().as_slice(), &[2, 4]);
    assert_ne!(s.fingerprint(), before);

    s.controller_mut().step_forward();
    assert_eq!(
        seen.borrow().last(),
        Some(&(0, NodeId::from_path(&[2])))
    );
}

#[test]
fn resubmitting_the_same_input_reproduces_the_fingerprint() {
    let mut s = Session::new(input(&[3, -1, 5]), PlaybackOpts::default());
    let a = s.fingerprint();
    s.submit(input(&[3, -1, 5]));
    assert_eq!(s.fingerprint(), a);
}

#[test]
fn config_defaults_playback() {
    let cfg = SessionConfig::from_json_str(r#"{ "nums": [1, 2, 3] }"#).unwrap();
    assert_eq!(cfg.nums.as_slice(), &[1, 2, 3]);
    assert_eq!(cfg.playback, PlaybackOpts::default());

    let cfg =
        SessionConfig::from_json_str(r#"{ "nums": [5], "playback": { "speed_ms": 250 } }"#)
            .unwrap();
    let s = Session::from_config(cfg);
    assert_eq!(s.controller().speed_ms(), 250);
}

#[test]
fn config_rejects_invalid_input() {
    let err = SessionConfig::from_json_str(r#"{ "nums": [1, 1] }"#).unwrap_err();
    assert!(matches!(err, PermtraceError::Serde(_)));
    assert!(err.to_string().contains("distinct"), "{err}");

    let err = SessionConfig::from_json_str(r#"{ "nums": [1], "speed": 3 }"#).unwrap_err();
    assert!(matches!(err, PermtraceError::Serde(_)));
}

#[test]
fn config_from_missing_path_is_other() {
    let err = SessionConfig::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, PermtraceError::Other(_)));
    assert!(err.to_string().contains("read session config"), "{err}");
}
