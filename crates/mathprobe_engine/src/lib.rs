//! Mathprobe engine: prompt assembly, Gemini relay client, and report output.
mod client;
mod engine;
mod persist;
mod prompt;
mod report;
mod types;

pub use client::{GeminiGenerator, GenerateSettings, TextGenerator};
pub use engine::{EngineConfig, EngineHandle};
pub use persist::{ensure_report_dir, write_report_file, PersistError};
pub use prompt::build_prompt;
pub use report::{build_report_document, report_filename, REPORT_FOOTER, REPORT_SUBTITLE};
pub use types::{EngineEvent, FailureKind, GenerateError, ReportParts, StageId};
