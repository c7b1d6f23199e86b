use std::sync::Once;

use mathprobe_core::{update, AppState, Effect, Msg, ReportContent, RunStatus, Stage};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(probe_logging::initialize_for_tests);
}

#[test]
fn noop_changes_nothing() {
    init_logging();
    let state = AppState::new();
    let before = state.view();

    let (next, effects) = update(state, Msg::NoOp);

    assert_eq!(next.view(), before);
    assert!(effects.is_empty());
}

#[test]
fn tick_is_silent_while_idle() {
    init_logging();
    let mut state = AppState::new();
    let _ = state.consume_dirty();

    let (mut next, effects) = update(state, Msg::Tick);

    assert!(!next.consume_dirty());
    assert!(effects.is_empty());
}

#[test]
fn tick_redraws_while_generating() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::GenerateClicked);
    let mut state = state;
    let _ = state.consume_dirty();

    let (mut next, effects) = update(state, Msg::Tick);

    assert!(next.consume_dirty());
    assert!(effects.is_empty());
}

#[test]
fn blank_topic_cannot_start() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TopicChanged("   ".to_string()));

    let (next, effects) = update(state, Msg::GenerateClicked);

    assert_eq!(next.view().status, RunStatus::Idle);
    assert!(effects.is_empty());
}

#[test]
fn print_without_content_is_ignored() {
    init_logging();
    let state = AppState::new();

    let (_next, effects) = update(state, Msg::PrintClicked);

    assert!(effects.is_empty());
}

#[test]
fn print_carries_run_topic_and_full_report() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TopicChanged("鸡兔同笼".to_string()));
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, _) = update(
        state,
        Msg::StageCompleted {
            stage: Stage::First,
            text: "a".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::StageCompleted {
            stage: Stage::Second,
            text: "b".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::StageCompleted {
            stage: Stage::Third,
            text: "c".to_string(),
        },
    );
    // Edits after the run finished must not rename the printed report.
    let (state, _) = update(state, Msg::TopicChanged("changed later".to_string()));

    let (_next, effects) = update(state, Msg::PrintClicked);

    assert_eq!(
        effects,
        vec![Effect::PrintReport {
            topic: "鸡兔同笼".to_string(),
            content: ReportContent {
                part1: "a".to_string(),
                part2: "b".to_string(),
                part3: "c".to_string(),
            },
        }]
    );
}

#[test]
fn unchanged_topic_does_not_redraw() {
    init_logging();
    let mut state = AppState::new();
    let topic = state.view().topic;
    let _ = state.consume_dirty();

    let (mut next, effects) = update(state, Msg::TopicChanged(topic));

    assert!(!next.consume_dirty());
    assert!(effects.is_empty());
}
