mod app;
mod config;
mod effects;
mod logging;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    // The terminal belongs to the UI, so logs go to a file.
    logging::initialize(logging::LogDestination::File);
    let config = config::AppConfig::from_env();
    app::run(config)
}
