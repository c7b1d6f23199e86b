//! Logging setup for the app shell.
//!
//! The terminal is owned by the UI, so the default sink is a file,
//! `./mathprobe.log`. Set `MATHPROBE_LOG` to change verbosity.

use std::fs::File;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

const LOG_FILE: &str = "./mathprobe.log";

/// Where log lines end up.
#[allow(dead_code)]
pub enum LogDestination {
    File,
    Terminal,
    Both,
}

/// Installs the global logger. Failure to create the log file is not
/// fatal; the app runs without file logging.
pub fn initialize(destination: LogDestination) {
    let level = level_from_env();
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        match File::create(LOG_FILE) {
            Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
            Err(err) => eprintln!("Warning: could not create {LOG_FILE}: {err}"),
        }
    }

    if !loggers.is_empty() {
        let _ = CombinedLogger::init(loggers);
    }
}

fn level_from_env() -> LevelFilter {
    match std::env::var("MATHPROBE_LOG").as_deref() {
        Ok("trace") => LevelFilter::Trace,
        Ok("debug") => LevelFilter::Debug,
        Ok("warn") => LevelFilter::Warn,
        Ok("error") => LevelFilter::Error,
        Ok("off") => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}
