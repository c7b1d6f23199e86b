use crate::view_model::AppViewModel;

/// Knowledge point pre-filled in the topic box on startup.
pub const DEFAULT_TOPIC: &str = "六年级小学数学分数四则混合运算";

/// Shown when a stage fails without carrying a usable message.
pub const UNKNOWN_ERROR_MESSAGE: &str =
    "An unknown error occurred during generation. Please check your API configuration.";

/// One of the three ordered phases of the generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    First,
    Second,
    Third,
}

impl Stage {
    /// Zero-based position, used by the progress indicator.
    pub fn index(self) -> usize {
        match self {
            Stage::First => 0,
            Stage::Second => 1,
            Stage::Third => 2,
        }
    }

    /// The stage that runs after this one, if any.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::First => Some(Stage::Second),
            Stage::Second => Some(Stage::Third),
            Stage::Third => None,
        }
    }
}

/// Pipeline progress for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Idle,
    Generating(Stage),
    Completed,
    Failed,
}

impl RunStatus {
    pub fn is_generating(self) -> bool {
        matches!(self, RunStatus::Generating(_))
    }
}

/// In-memory accumulation of the three stage outputs for the current run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportContent {
    pub part1: String,
    pub part2: String,
    pub part3: String,
}

impl ReportContent {
    pub fn part(&self, stage: Stage) -> &str {
        match stage {
            Stage::First => &self.part1,
            Stage::Second => &self.part2,
            Stage::Third => &self.part3,
        }
    }

    pub(crate) fn set_part(&mut self, stage: Stage, text: String) {
        match stage {
            Stage::First => self.part1 = text,
            Stage::Second => self.part2 = text,
            Stage::Third => self.part3 = text,
        }
    }

    /// True once at least one stage output is non-empty.
    pub fn has_content(&self) -> bool {
        !self.part1.is_empty() || !self.part2.is_empty() || !self.part3.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    topic: String,
    run_topic: Option<String>,
    status: RunStatus,
    content: ReportContent,
    error: Option<String>,
    dirty: bool,
    follow: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            topic: DEFAULT_TOPIC.to_string(),
            run_topic: None,
            status: RunStatus::Idle,
            content: ReportContent::default(),
            error: None,
            dirty: false,
            follow: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            status: self.status,
            topic: self.topic.clone(),
            content: self.content.clone(),
            error: self.error.clone(),
            steps: crate::view_model::step_states(self.status),
            can_start: self.can_start(),
            generating: self.status.is_generating(),
            show_print: self.content.has_content(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Returns whether the report view should jump to the newest content
    /// and clears the flag.
    pub fn consume_follow(&mut self) -> bool {
        std::mem::take(&mut self.follow)
    }

    pub(crate) fn status(&self) -> RunStatus {
        self.status
    }

    pub(crate) fn topic(&self) -> &str {
        &self.topic
    }

    /// Topic captured when the current run started. Falls back to the live
    /// input value before any run has begun.
    pub(crate) fn run_topic(&self) -> &str {
        self.run_topic.as_deref().unwrap_or(&self.topic)
    }

    pub(crate) fn content(&self) -> &ReportContent {
        &self.content
    }

    pub(crate) fn set_topic(&mut self, text: String) {
        if self.topic != text {
            self.topic = text;
            self.dirty = true;
        }
    }

    /// A new run may start from any settled status, never mid-run.
    pub(crate) fn can_start(&self) -> bool {
        matches!(
            self.status,
            RunStatus::Idle | RunStatus::Completed | RunStatus::Failed
        )
    }

    /// Resets the aggregate and error, snapshots the topic for the run,
    /// and enters the first generating state.
    pub(crate) fn begin_run(&mut self) {
        self.run_topic = Some(self.topic.clone());
        self.content = ReportContent::default();
        self.error = None;
        self.status = RunStatus::Generating(Stage::First);
        self.dirty = true;
        self.follow = true;
    }

    pub(crate) fn store_part(&mut self, stage: Stage, text: String) {
        self.content.set_part(stage, text);
        self.dirty = true;
        self.follow = true;
    }

    pub(crate) fn set_status(&mut self, status: RunStatus) {
        self.status = status;
        self.dirty = true;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Marks the run failed. Parts stored before the failure stay visible.
    pub(crate) fn fail_run(&mut self, message: String) {
        self.status = RunStatus::Failed;
        self.error = Some(message);
        self.dirty = true;
    }
}
