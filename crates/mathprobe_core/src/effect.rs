use crate::state::{ReportContent, Stage};

/// Side effects requested by the update function. The shell executes
/// them; the core never performs IO itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run one generation stage. `context` carries the previous stage's
    /// output and is absent only for the first stage.
    Generate {
        stage: Stage,
        topic: String,
        context: Option<String>,
    },
    /// Produce a printable document from the accumulated report.
    PrintReport {
        topic: String,
        content: ReportContent,
    },
}
