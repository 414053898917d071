//! Runtime settings, read once at startup

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::photos::{FetcherConfig, PhotoError, Result};

/// Env var pointing at an alternative settings file
pub const CONFIG_PATH_VAR: &str = "WAYPOINT_PHOTOS_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "waypoint-photos";
const DEFAULT_WALL_FILE: &str = "walls.geojson";
const DEFAULT_IMAGES_FOLDER: &str = "wall_images";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Raw settings as layered from defaults, file and environment
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Gaia GPS `.geojson` export
    pub wall_file: PathBuf,
    /// Directory photos are saved under
    pub images_folder: PathBuf,
    /// Value of the `sessionid` cookie from a logged-in browser
    pub session_id: Option<String>,
    pub request_timeout_secs: u64,
    pub dry_run: bool,
    pub log_format: LogFormat,
}

/// Validated settings for a single run
#[derive(Clone)]
pub struct RunConfig {
    pub wall_file: PathBuf,
    pub images_folder: PathBuf,
    pub session_id: String,
    pub request_timeout: Duration,
    pub dry_run: bool,
}

impl Settings {
    /// Load settings from the optional settings file and the process environment
    pub fn load() -> Result<Self> {
        let file = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.into());
        Self::from_sources(File::with_name(&file).required(false), Environment::default())
    }

    fn from_sources(
        file: File<config::FileSourceFile, config::FileFormat>,
        env: Environment,
    ) -> Result<Self> {
        Config::builder()
            .set_default("wall_file", DEFAULT_WALL_FILE)
            .and_then(|b| b.set_default("images_folder", DEFAULT_IMAGES_FOLDER))
            .and_then(|b| b.set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS))
            .and_then(|b| b.set_default("dry_run", false))
            .and_then(|b| b.set_default("log_format", "pretty"))
            .map_err(config_error)?
            .add_source(file)
            .add_source(env)
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)
    }

    /// Check the settings and turn them into a [`RunConfig`].
    ///
    /// A missing or blank session id is a configuration error.
    pub fn validate(self) -> Result<RunConfig> {
        let session_id = self
            .session_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                PhotoError::Config("no session id cookie provided (set SESSION_ID)".into())
            })?;

        if self.request_timeout_secs == 0 {
            return Err(PhotoError::Config(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(RunConfig {
            wall_file: self.wall_file,
            images_folder: self.images_folder,
            session_id,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            dry_run: self.dry_run,
        })
    }
}

impl RunConfig {
    #[must_use]
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig::new(&self.images_folder).with_dry_run(self.dry_run)
    }
}

impl std::fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunConfig")
            .field("wall_file", &self.wall_file)
            .field("images_folder", &self.images_folder)
            .field("session_id", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

fn config_error(e: config::ConfigError) -> PhotoError {
    PhotoError::Config(e.to_string())
}
