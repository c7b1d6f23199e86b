use std::sync::Arc;

use chrono::Utc;
use mathprobe_core::{Effect, Msg, ReportContent, Stage};
use mathprobe_engine::{EngineConfig, EngineEvent, EngineHandle, ReportParts, StageId};
use probe_logging::{probe_info, probe_warn};

use crate::config::AppConfig;

/// What the shell does with an engine event: either feed it back into
/// the state machine or surface a status-line notice.
#[derive(Debug)]
pub enum Feedback {
    Update(Msg),
    Notice(String),
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: AppConfig) -> Self {
        let mut engine_config = EngineConfig::default_with_report_dir(config.report_dir);
        engine_config.generate = config.generate;
        engine_config.generated_utc = Arc::new(|| Utc::now().to_rfc3339());
        Self::with_engine(EngineHandle::new(engine_config))
    }

    fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Generate {
                    stage,
                    topic,
                    context,
                } => {
                    probe_info!(
                        "Generate stage={:?} topic_chars={} context={}",
                        stage,
                        topic.chars().count(),
                        context.is_some()
                    );
                    self.engine.generate(engine_stage(stage), topic, context);
                }
                Effect::PrintReport { topic, content } => {
                    probe_info!("PrintReport topic_chars={}", topic.chars().count());
                    self.engine.print_report(topic, report_parts(content));
                }
            }
        }
    }

    /// Drains engine events into shell feedback, oldest first.
    pub fn poll(&self) -> Vec<Feedback> {
        let mut feedback = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            feedback.push(map_event(event));
        }
        feedback
    }
}

fn map_event(event: EngineEvent) -> Feedback {
    match event {
        EngineEvent::StageCompleted { stage, text } => Feedback::Update(Msg::StageCompleted {
            stage: core_stage(stage),
            text,
        }),
        EngineEvent::StageFailed { stage, error } => {
            probe_warn!("stage {:?} failed: {}", stage, error.message);
            Feedback::Update(Msg::StageFailed {
                stage: core_stage(stage),
                message: error.message,
            })
        }
        EngineEvent::ReportPrinted { path } => {
            Feedback::Notice(format!("Report saved: {}", path.display()))
        }
        EngineEvent::PrintFailed { message } => Feedback::Notice(format!("Print failed: {message}")),
    }
}

fn engine_stage(stage: Stage) -> StageId {
    match stage {
        Stage::First => StageId::First,
        Stage::Second => StageId::Second,
        Stage::Third => StageId::Third,
    }
}

fn core_stage(stage: StageId) -> Stage {
    match stage {
        StageId::First => Stage::First,
        StageId::Second => Stage::Second,
        StageId::Third => Stage::Third,
    }
}

fn report_parts(content: ReportContent) -> ReportParts {
    ReportParts {
        part1: content.part1,
        part2: content.part2,
        part3: content.part3,
    }
}
