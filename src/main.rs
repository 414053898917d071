use anyhow::Context;
use std::process::ExitCode;
use tracing::error;

use waypoint_photos::config::Settings;
use waypoint_photos::{logging, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let settings = Settings::load().context("Failed to load settings")?;
    logging::init(settings.log_format).context("Failed to initialise logging")?;

    let config = match settings.validate() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::from(2));
        }
    };

    run(&config).await.with_context(|| {
        format!(
            "Failed to process {} into {}",
            config.wall_file.display(),
            config.images_folder.display()
        )
    })?;

    Ok(ExitCode::SUCCESS)
}
