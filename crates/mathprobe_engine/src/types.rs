use std::fmt;
use std::path::PathBuf;

/// Pipeline stage identifiers as the engine sees them. The UI keeps its
/// own copy of this enum; the shell maps between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageId {
    First,
    Second,
    Third,
}

/// Accumulated stage outputs handed over for report assembly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportParts {
    pub part1: String,
    pub part2: String,
    pub part3: String,
}

/// Everything the engine reports back to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    StageCompleted { stage: StageId, text: String },
    StageFailed { stage: StageId, error: GenerateError },
    ReportPrinted { path: PathBuf },
    PrintFailed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateError {
    pub kind: FailureKind,
    pub message: String,
}

impl GenerateError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The configured endpoint does not form a usable request URL.
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    /// The service answered 200 but embedded an error payload.
    Api,
    /// The body came back but not in the shape we expect.
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Api => write!(f, "api error"),
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
