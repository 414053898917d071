mod client;
mod fetcher;
mod loader;
mod naming;
mod types;


pub use client::{HttpPhotoClient, PhotoSource};
pub use fetcher::{FetchReport, Fetcher, FetcherConfig};
pub use loader::Loader;
pub use naming::{PhotoTarget, plan_targets, sanitize_title};
pub use types::{PhotoRef, WaypointCollection, WaypointProperties, WaypointRecord};

use std::path::PathBuf;

/// Photo download result type
pub type Result<T> = std::result::Result<T, PhotoError>;

/// Photo download error types
#[derive(Debug, thiserror::Error)]
pub enum PhotoError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Download failed: {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid title: {0:?}")]
    InvalidTitle(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
