//! Image CDN URL construction.

/// Default TMDB image CDN base.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Size segment every view requests: the full-resolution upload.
const SIZE: &str = "original";

/// Builds image URLs from API-returned relative paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    /// CDN base without trailing slash.
    base: String,
}

impl ImageUrls {
    /// Creates a builder rooted at `base` (e.g. `https://image.tmdb.org/t/p/`).
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: String::from(base.trim_end_matches('/')),
        }
    }

    /// Joins base, size segment and path.
    ///
    /// Returns `None` for a missing or empty path.
    #[must_use]
    pub fn url(&self, path: Option<&str>) -> Option<String> {
        let path = path?.trim_start_matches('/');
        if path.is_empty() {
            return None;
        }
        Some(format!("{}/{SIZE}/{path}", self.base))
    }
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL)
    }
}
