use serde::Deserialize;

/// Parsed waypoint export, in document order
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaypointCollection {
    pub features: Vec<WaypointRecord>,
}

impl WaypointCollection {
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WaypointRecord> {
        self.features.iter()
    }
}

/// One saved waypoint (a GeoJSON feature)
#[derive(Debug, Clone, Deserialize)]
pub struct WaypointRecord {
    pub properties: WaypointProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaypointProperties {
    pub title: String,
    /// `null` and a missing key both deserialize to `None`
    #[serde(default)]
    pub photos: Option<Vec<PhotoRef>>,
}

impl WaypointRecord {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            properties: WaypointProperties {
                title: title.into(),
                photos: None,
            },
        }
    }

    #[must_use]
    pub fn with_photos<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.photos = Some(urls.into_iter().map(PhotoRef::new).collect());
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.properties.title
    }

    /// Attached photos; empty when the waypoint has none
    #[must_use]
    pub fn photos(&self) -> &[PhotoRef] {
        self.properties.photos.as_deref().unwrap_or_default()
    }
}

/// Reference to a remote photo attachment
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoRef {
    pub fullsize_url: String,
}

impl PhotoRef {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            fullsize_url: url.into(),
        }
    }
}
