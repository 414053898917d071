//! Download the photos attached to Gaia GPS waypoints and name them after
//! each waypoint's title.
//!
//! Export a folder from Gaia GPS as `.geojson`, copy the `sessionid` cookie
//! from a logged-in browser, and run:
//!
//! ```text
//! SESSION_ID=... WALL_FILE=walls.geojson IMAGES_FOLDER=wall_images waypoint-photos
//! ```

pub mod config;
pub mod logging;
pub mod photos;

use tracing::info;

use crate::config::RunConfig;
use crate::photos::{FetchReport, Fetcher, HttpPhotoClient, Loader};

/// Load the waypoint export and download every missing photo
pub async fn run(config: &RunConfig) -> photos::Result<FetchReport> {
    let collection = Loader::load(&config.wall_file).await?;

    let client = HttpPhotoClient::new(&config.session_id, config.request_timeout)?;
    let fetcher = Fetcher::new(config.fetcher_config(), client);

    if config.dry_run {
        info!("Dry run: nothing will be downloaded");
    }

    fetcher.fetch_all(&collection).await
}
