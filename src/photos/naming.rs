//! Destination naming for downloaded photos

use std::path::{Path, PathBuf};

use super::{PhotoError, Result, WaypointRecord};

/// Extension given to every saved photo
const PHOTO_EXTENSION: &str = "jpg";

/// A single photo download: where it comes from and where it lands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoTarget {
    pub url: String,
    pub path: PathBuf,
}

/// Expand a waypoint into its (url, destination) pairs.
///
/// One photo lands at `{output}/{title}.jpg`. Several photos share a
/// `{output}/{title}/` directory and are numbered from 1 in document order:
/// `{output}/{title}/{title}1.jpg`, `{title}2.jpg`, ...
///
/// Waypoints without photos yield no targets.
pub fn plan_targets(output_dir: &Path, record: &WaypointRecord) -> Result<Vec<PhotoTarget>> {
    let photos = record.photos();
    if photos.is_empty() {
        return Ok(Vec::new());
    }

    let title = sanitize_title(record.title())?;

    if let [photo] = photos {
        return Ok(vec![PhotoTarget {
            url: photo.fullsize_url.clone(),
            path: output_dir.join(format!("{title}.{PHOTO_EXTENSION}")),
        }]);
    }

    let folder = output_dir.join(&title);
    Ok(photos
        .iter()
        .enumerate()
        .map(|(idx, photo)| PhotoTarget {
            url: photo.fullsize_url.clone(),
            path: folder.join(format!("{title}{}.{PHOTO_EXTENSION}", idx + 1)),
        })
        .collect())
}

/// Make a waypoint title safe to use as a single path component.
///
/// Separators and characters rejected by common filesystems become `_`.
/// Everything else, spaces included, is kept as-is.
pub fn sanitize_title(title: &str) -> Result<String> {
    // Characters not allowed in filenames on various systems
    const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

    let result: String = title
        .chars()
        .map(|c| {
            if INVALID_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if result.trim().is_empty() || result == "." || result == ".." {
        return Err(PhotoError::InvalidTitle(title.to_string()));
    }

    Ok(result)
}
