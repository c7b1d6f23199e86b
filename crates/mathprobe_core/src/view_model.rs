use crate::state::{ReportContent, RunStatus};

/// Display state of one progress step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Active,
    Completed,
}

/// Read-only snapshot the renderer consumes. Derived from `AppState`,
/// never mutated by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub status: RunStatus,
    pub topic: String,
    pub content: ReportContent,
    pub error: Option<String>,
    pub steps: [StepState; 3],
    pub can_start: bool,
    pub generating: bool,
    pub show_print: bool,
    pub dirty: bool,
}

/// Maps run status onto the three step indicators. A failed run shows
/// every step as pending again, inviting a retry.
pub fn step_states(status: RunStatus) -> [StepState; 3] {
    match status {
        RunStatus::Idle | RunStatus::Failed => [StepState::Pending; 3],
        RunStatus::Completed => [StepState::Completed; 3],
        RunStatus::Generating(active) => {
            let mut steps = [StepState::Pending; 3];
            for (index, step) in steps.iter_mut().enumerate() {
                if index < active.index() {
                    *step = StepState::Completed;
                } else if index == active.index() {
                    *step = StepState::Active;
                }
            }
            steps
        }
    }
}
