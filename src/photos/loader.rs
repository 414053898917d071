use std::path::Path;
use tracing::{debug, info};

use super::{PhotoError, Result, WaypointCollection};

/// Reads Gaia GPS `.geojson` exports
pub struct Loader;

impl Loader {
    /// Load and parse a waypoint export from disk
    pub async fn load(path: &Path) -> Result<WaypointCollection> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PhotoError::NotFound(path.to_path_buf())
            } else {
                PhotoError::Io(e)
            }
        })?;

        debug!("Read {} bytes from {}", content.len(), path.display());

        let collection = Self::parse(&content)?;

        info!(
            "Loaded {} waypoints from {}",
            collection.len(),
            path.display()
        );

        Ok(collection)
    }

    /// Parse a waypoint export from a JSON string
    pub fn parse(content: &str) -> Result<WaypointCollection> {
        serde_json::from_str(content)
            .map_err(|e| PhotoError::Parse(format!("invalid waypoint export: {e}")))
    }
}
