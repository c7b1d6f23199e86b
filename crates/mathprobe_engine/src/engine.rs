use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use probe_logging::{probe_info, probe_warn};

use crate::client::{GeminiGenerator, TextGenerator};
use crate::persist::write_report_file;
use crate::report::{build_report_document, report_filename};
use crate::{prompt, EngineEvent, GenerateSettings, ReportParts, StageId};

pub struct EngineConfig {
    pub generate: GenerateSettings,
    pub report_dir: PathBuf,
    /// Timestamp source for report headers, injected by the shell.
    pub generated_utc: Arc<dyn Fn() -> String + Send + Sync>,
    /// Spooler binary the written report is handed to, when present.
    pub spooler: Option<String>,
}

impl EngineConfig {
    pub fn default_with_report_dir(report_dir: PathBuf) -> Self {
        Self {
            generate: GenerateSettings::default(),
            report_dir,
            generated_utc: Arc::new(String::new),
            spooler: default_spooler(),
        }
    }
}

fn default_spooler() -> Option<String> {
    if cfg!(unix) {
        Some("lp".to_string())
    } else {
        None
    }
}

enum EngineCommand {
    Generate {
        stage: StageId,
        topic: String,
        context: Option<String>,
    },
    Print {
        topic: String,
        parts: ReportParts,
    },
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let generator = Arc::new(GeminiGenerator::new(config.generate.clone()));
        Self::with_generator(config, generator)
    }

    /// Same engine loop with a caller-supplied generator, for tests.
    pub fn with_generator(config: EngineConfig, generator: Arc<dyn TextGenerator>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            // block_on keeps the pipeline strictly sequential: the next
            // command is not even read until this one has finished.
            while let Ok(command) = cmd_rx.recv() {
                runtime.block_on(handle_command(
                    generator.as_ref(),
                    &config,
                    command,
                    &event_tx,
                ));
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn generate(&self, stage: StageId, topic: impl Into<String>, context: Option<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            stage,
            topic: topic.into(),
            context,
        });
    }

    pub fn print_report(&self, topic: impl Into<String>, parts: ReportParts) {
        let _ = self.cmd_tx.send(EngineCommand::Print {
            topic: topic.into(),
            parts,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    generator: &dyn TextGenerator,
    config: &EngineConfig,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate {
            stage,
            topic,
            context,
        } => {
            // The relay asks for a breather between consecutive calls.
            if stage != StageId::First && !config.generate.stage_pause.is_zero() {
                tokio::time::sleep(config.generate.stage_pause).await;
            }
            let prompt = prompt::build_prompt(stage, &topic, context.as_deref());
            probe_info!(
                "generate stage={:?} prompt_chars={}",
                stage,
                prompt.chars().count()
            );
            let event = match generator.generate(&prompt).await {
                Ok(text) => {
                    probe_info!("stage {:?} produced {} chars", stage, text.chars().count());
                    EngineEvent::StageCompleted { stage, text }
                }
                Err(error) => {
                    probe_warn!("stage {:?} failed: {}", stage, error.message);
                    EngineEvent::StageFailed { stage, error }
                }
            };
            let _ = event_tx.send(event);
        }
        EngineCommand::Print { topic, parts } => {
            let _ = event_tx.send(print_report(config, &topic, &parts));
        }
    }
}

fn print_report(config: &EngineConfig, topic: &str, parts: &ReportParts) -> EngineEvent {
    let generated = (config.generated_utc)();
    let document = build_report_document(topic, &generated, parts);
    let filename = report_filename(topic);
    match write_report_file(&config.report_dir, &filename, &document) {
        Ok(path) => {
            probe_info!("report written to {}", path.display());
            spool(config.spooler.as_deref(), &path);
            EngineEvent::ReportPrinted { path }
        }
        Err(err) => {
            probe_warn!("report write failed: {err}");
            EngineEvent::PrintFailed {
                message: err.to_string(),
            }
        }
    }
}

/// Best effort: the file on disk is the deliverable, spooling a bonus.
/// The wait happens on a separate thread so the command loop moves on.
fn spool(spooler: Option<&str>, path: &Path) {
    let Some(command) = spooler else {
        return;
    };
    let command = command.to_string();
    let path = path.to_path_buf();
    thread::spawn(move || match drive_spooler(&command, &path) {
        Ok(()) => probe_info!("handed {} to {command}", path.display()),
        Err(reason) => probe_warn!("spooler {command}: {reason}"),
    });
}

/// Runs the spooler to completion, reaping the child; a non-zero exit
/// counts as a failure.
fn drive_spooler(command: &str, path: &Path) -> Result<(), String> {
    let status = std::process::Command::new(command)
        .arg(path)
        .status()
        .map_err(|err| format!("unavailable: {err}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("exited with {status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::drive_spooler;
    use std::path::Path;

    #[test]
    fn missing_spooler_reports_unavailable() {
        let err = drive_spooler("no-such-spooler", Path::new("report.md")).unwrap_err();
        assert!(err.starts_with("unavailable"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_spooler_exit_is_a_failure() {
        let err = drive_spooler("false", Path::new("report.md")).unwrap_err();
        assert!(err.starts_with("exited with"), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn clean_spooler_exit_is_a_success() {
        assert_eq!(drive_spooler("true", Path::new("report.md")), Ok(()));
    }
}
