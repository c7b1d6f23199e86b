use crate::effect::Effect;
use crate::msg::Msg;
use crate::state::{AppState, RunStatus, Stage, UNKNOWN_ERROR_MESSAGE};

/// Applies one message to the state and returns the effects the shell
/// must execute. Pure: no IO, no clocks, no randomness.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TopicChanged(text) => {
            state.set_topic(text);
            Vec::new()
        }
        Msg::GenerateClicked => start_run(&mut state),
        Msg::StageCompleted { stage, text } => complete_stage(&mut state, stage, text),
        Msg::StageFailed { stage, message } => fail_stage(&mut state, stage, message),
        Msg::PrintClicked => request_print(&state),
        Msg::Tick => {
            // The spinner only animates while a run is in flight.
            if state.status().is_generating() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };
    (state, effects)
}

fn start_run(state: &mut AppState) -> Vec<Effect> {
    if !state.can_start() {
        return Vec::new();
    }
    if state.topic().trim().is_empty() {
        return Vec::new();
    }
    state.begin_run();
    vec![Effect::Generate {
        stage: Stage::First,
        topic: state.run_topic().to_string(),
        context: None,
    }]
}

fn complete_stage(state: &mut AppState, stage: Stage, text: String) -> Vec<Effect> {
    // Results from an abandoned run must not disturb the current one.
    if state.status() != RunStatus::Generating(stage) {
        return Vec::new();
    }
    state.store_part(stage, text);
    match stage.next() {
        Some(next) => {
            state.set_status(RunStatus::Generating(next));
            vec![Effect::Generate {
                stage: next,
                topic: state.run_topic().to_string(),
                context: Some(state.content().part(stage).to_string()),
            }]
        }
        None => {
            state.set_status(RunStatus::Completed);
            Vec::new()
        }
    }
}

fn fail_stage(state: &mut AppState, stage: Stage, message: String) -> Vec<Effect> {
    if state.status() != RunStatus::Generating(stage) {
        return Vec::new();
    }
    let message = if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message
    };
    state.fail_run(message);
    Vec::new()
}

fn request_print(state: &AppState) -> Vec<Effect> {
    if !state.content().has_content() {
        return Vec::new();
    }
    vec![Effect::PrintReport {
        topic: state.run_topic().to_string(),
        content: state.content().clone(),
    }]
}
