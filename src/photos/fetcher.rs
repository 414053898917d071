//! Photo fetcher - download every waypoint photo that is not already on disk

use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::{PhotoError, PhotoSource, PhotoTarget, Result, WaypointCollection, WaypointRecord};
use super::naming::plan_targets;

/// Suffix for bodies that are still being written
const PARTIAL_SUFFIX: &str = "part";

/// Fetcher configuration
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Root directory for saved photos; must already exist
    pub output_dir: PathBuf,
    /// Dry run mode (log what would be downloaded, touch nothing)
    pub dry_run: bool,
}

impl FetcherConfig {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dry_run: false,
        }
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Photos written to disk (or that would be, in dry run mode)
    pub downloaded: Vec<PathBuf>,
    /// Photos whose destination already existed
    pub skipped: Vec<PathBuf>,
    /// Photos that could not be fetched or written
    pub failed: Vec<(String, String)>,
    /// Waypoints without any photos
    pub without_photos: usize,
    /// Waypoints whose title could not be used as a file name
    pub invalid_titles: Vec<String>,
}

impl FetchReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.downloaded.len() + self.skipped.len() + self.failed.len()
    }

    #[must_use]
    pub fn downloaded_count(&self) -> usize {
        self.downloaded.len()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// Downloads waypoint photos one at a time
pub struct Fetcher<S> {
    config: FetcherConfig,
    source: S,
}

impl<S: PhotoSource> Fetcher<S> {
    /// Create a new fetcher over a photo source
    #[must_use]
    pub fn new(config: FetcherConfig, source: S) -> Self {
        Self { config, source }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Make sure every photo in the collection is present on disk.
    ///
    /// Only a missing output directory is fatal. Failures for a single photo
    /// or waypoint are recorded in the report and the run carries on.
    pub async fn fetch_all(&self, collection: &WaypointCollection) -> Result<FetchReport> {
        if !tokio::fs::metadata(&self.config.output_dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            return Err(PhotoError::NotFound(self.config.output_dir.clone()));
        }

        let mut report = FetchReport::default();

        for record in collection.iter() {
            self.fetch_record(record, &mut report).await;
        }

        info!(
            "Fetch complete: {} downloaded, {} skipped, {} failed, {} waypoints without photos",
            report.downloaded_count(),
            report.skipped_count(),
            report.failed_count(),
            report.without_photos
        );

        Ok(report)
    }

    /// Fetch all photos of a single waypoint
    pub async fn fetch_record(&self, record: &WaypointRecord, report: &mut FetchReport) {
        info!("Getting images for {}...", record.title());

        let targets = match plan_targets(&self.config.output_dir, record) {
            Ok(targets) => targets,
            Err(e) => {
                warn!("Skipping waypoint: {}", e);
                report.invalid_titles.push(record.title().to_string());
                return;
            }
        };

        if targets.is_empty() {
            debug!("{} has no photos", record.title());
            report.without_photos += 1;
            return;
        }

        if targets.len() > 1
            && let Some(folder) = targets[0].path.parent()
            && let Err(e) = self.ensure_dir(folder).await
        {
            error!("Failed to create {}: {}", folder.display(), e);
            for target in targets {
                report.failed.push((target.url, e.to_string()));
            }
            return;
        }

        for target in targets {
            self.fetch_target(target, report).await;
        }
    }

    async fn fetch_target(&self, target: PhotoTarget, report: &mut FetchReport) {
        // Any existing entry counts, whatever its contents
        if tokio::fs::try_exists(&target.path).await.unwrap_or(false) {
            info!("{} already exists, skipping...", target.path.display());
            report.skipped.push(target.path);
            return;
        }

        if self.config.dry_run {
            info!(
                "[DRY RUN] Would download {} -> {}",
                target.url,
                target.path.display()
            );
            report.downloaded.push(target.path);
            return;
        }

        match self.download(&target).await {
            Ok(()) => {
                debug!("Saved {}", target.path.display());
                report.downloaded.push(target.path);
            }
            Err(PhotoError::Status { url, status }) => {
                error!("Error downloading {}. Status code: {}", url, status);
                report.failed.push((url, format!("status {status}")));
            }
            Err(e) => {
                error!("Error downloading {}: {}", target.url, e);
                report.failed.push((target.url, e.to_string()));
            }
        }
    }

    async fn download(&self, target: &PhotoTarget) -> Result<()> {
        let bytes = self.source.fetch(&target.url).await?;

        let partial = partial_path(&target.path);
        let written = match tokio::fs::write(&partial, &bytes).await {
            Ok(()) => tokio::fs::rename(&partial, &target.path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if self.config.dry_run || tokio::fs::try_exists(dir).await.unwrap_or(false) {
            return Ok(());
        }

        debug!("Creating {}", dir.display());
        match tokio::fs::create_dir(dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// `Eagle Cliff.jpg` -> `Eagle Cliff.jpg.part`
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}
