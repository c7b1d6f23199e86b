use crate::state::Stage;

/// Everything that can happen to the application, from the user or from
/// the generation engine. The update function is the only consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The topic input changed to this full replacement value.
    TopicChanged(String),
    /// The user asked to start (or restart) the analysis.
    GenerateClicked,
    /// The engine finished a stage with the given text, possibly empty.
    StageCompleted { stage: Stage, text: String },
    /// The engine gave up on a stage. The message may be blank.
    StageFailed { stage: Stage, message: String },
    /// The user asked for a printable copy of the report.
    PrintClicked,
    /// Periodic heartbeat that drives the progress indicator.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
