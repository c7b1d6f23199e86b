//! Mathprobe core: pure analysis-run state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, ReportContent, RunStatus, Stage, DEFAULT_TOPIC, UNKNOWN_ERROR_MESSAGE,
};
pub use update::update;
pub use view_model::{step_states, AppViewModel, StepState};
