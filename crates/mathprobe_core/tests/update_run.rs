use std::sync::Once;

use mathprobe_core::{update, AppState, Effect, Msg, RunStatus, Stage, StepState, DEFAULT_TOPIC};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(probe_logging::initialize_for_tests);
}

fn start_run(state: AppState, topic: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::TopicChanged(topic.to_string()));
    update(state, Msg::GenerateClicked)
}

fn complete(state: AppState, stage: Stage, text: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::StageCompleted {
            stage,
            text: text.to_string(),
        },
    )
}

#[test]
fn new_state_prefills_default_topic() {
    init_logging();
    let view = AppState::new().view();

    assert_eq!(view.topic, DEFAULT_TOPIC);
    assert_eq!(view.status, RunStatus::Idle);
    assert!(view.can_start);
    assert!(!view.show_print);
}

#[test]
fn generate_starts_first_stage() {
    init_logging();
    let state = AppState::new();

    let (next, effects) = start_run(state, "长方形的面积");
    let view = next.view();

    assert_eq!(view.status, RunStatus::Generating(Stage::First));
    assert_eq!(
        view.steps,
        [StepState::Active, StepState::Pending, StepState::Pending]
    );
    assert!(view.dirty);
    assert!(!view.can_start);
    assert_eq!(
        effects,
        vec![Effect::Generate {
            stage: Stage::First,
            topic: "长方形的面积".to_string(),
            context: None,
        }]
    );
}

#[test]
fn stage_outputs_chain_in_order() {
    init_logging();
    let state = AppState::new();
    let (state, _) = start_run(state, "百分数");

    let (state, effects) = complete(state, Stage::First, "roots");
    assert_eq!(state.view().status, RunStatus::Generating(Stage::Second));
    assert_eq!(
        effects,
        vec![Effect::Generate {
            stage: Stage::Second,
            topic: "百分数".to_string(),
            context: Some("roots".to_string()),
        }]
    );

    let (state, effects) = complete(state, Stage::Second, "models");
    assert_eq!(state.view().status, RunStatus::Generating(Stage::Third));
    assert_eq!(
        effects,
        vec![Effect::Generate {
            stage: Stage::Third,
            topic: "百分数".to_string(),
            context: Some("models".to_string()),
        }]
    );

    let (state, effects) = complete(state, Stage::Third, "history");
    let view = state.view();
    assert_eq!(view.status, RunStatus::Completed);
    assert_eq!(view.steps, [StepState::Completed; 3]);
    assert_eq!(view.content.part1, "roots");
    assert_eq!(view.content.part2, "models");
    assert_eq!(view.content.part3, "history");
    assert!(view.show_print);
    assert!(effects.is_empty());
}

#[test]
fn generate_ignored_while_running() {
    init_logging();
    let state = AppState::new();
    let (state, _) = start_run(state, "小数除法");
    let (state, _) = complete(state, Stage::First, "kept");

    let (next, effects) = update(state, Msg::GenerateClicked);
    let view = next.view();

    assert_eq!(view.status, RunStatus::Generating(Stage::Second));
    assert_eq!(view.content.part1, "kept");
    assert!(effects.is_empty());
}

#[test]
fn restart_after_completion_clears_previous_report() {
    init_logging();
    let state = AppState::new();
    let (state, _) = start_run(state, "first topic");
    let (state, _) = complete(state, Stage::First, "a");
    let (state, _) = complete(state, Stage::Second, "b");
    let (state, _) = complete(state, Stage::Third, "c");

    let (next, effects) = start_run(state, "second topic");
    let view = next.view();

    assert_eq!(view.status, RunStatus::Generating(Stage::First));
    assert_eq!(view.content.part1, "");
    assert_eq!(view.content.part2, "");
    assert_eq!(view.content.part3, "");
    assert!(!view.show_print);
    assert_eq!(
        effects,
        vec![Effect::Generate {
            stage: Stage::First,
            topic: "second topic".to_string(),
            context: None,
        }]
    );
}

#[test]
fn empty_stage_output_still_advances() {
    init_logging();
    let state = AppState::new();
    let (state, _) = start_run(state, "负数");

    let (state, effects) = complete(state, Stage::First, "");

    assert_eq!(state.view().status, RunStatus::Generating(Stage::Second));
    assert_eq!(
        effects,
        vec![Effect::Generate {
            stage: Stage::Second,
            topic: "负数".to_string(),
            context: Some(String::new()),
        }]
    );
}

#[test]
fn topic_edits_mid_run_do_not_leak_into_stages() {
    init_logging();
    let state = AppState::new();
    let (state, _) = start_run(state, "original");
    let (state, _) = update(state, Msg::TopicChanged("edited".to_string()));

    let (state, effects) = complete(state, Stage::First, "part one");

    assert_eq!(state.view().topic, "edited");
    assert_eq!(
        effects,
        vec![Effect::Generate {
            stage: Stage::Second,
            topic: "original".to_string(),
            context: Some("part one".to_string()),
        }]
    );
}
