use anyhow::Result;
use clap::Parser;

use project_tracker::app::{Cli, TrackerApp};
use project_tracker::config::Settings;
use project_tracker::logging;
use project_tracker::model::timeline;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load();
    logging::init(&settings.log_filter);
    if let Some(path) = cli.data {
        settings.data_file = Some(path);
    }

    let mut app = TrackerApp::open(&settings)?;
    let output = app.run(cli.command, timeline::today())?;
    println!("{output}");
    Ok(())
}
