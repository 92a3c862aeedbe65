//! Playlist entries and projection-mode detection.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// How an entry's video is projected in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Regular video, shown on a (curved) screen in front of the viewer.
    Flat,
    /// 360° equirectangular video, shown on an inside-facing sphere.
    Panoramic,
}

/// One tour video. Immutable once appended to a playlist; duplicates by
/// URL are permitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub title: String,
    pub url: String,
    pub mode: ProjectionMode,
}

impl PlaylistEntry {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        mode: ProjectionMode,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            mode,
        }
    }

    /// Builds an entry, inferring the projection mode: an entry is
    /// panoramic when its declared mode, title, or URL contains "360".
    pub fn detect(
        title: impl Into<String>,
        url: impl Into<String>,
        mode_hint: Option<&str>,
    ) -> Self {
        let title = title.into();
        let url = url.into();
        let mode = if is_panoramic(mode_hint, &title, &url) {
            ProjectionMode::Panoramic
        } else {
            ProjectionMode::Flat
        };
        Self { title, url, mode }
    }

    /// The URL to hand to the media source, sanitized for binding.
    pub fn source_url(&self) -> Cow<'_, str> {
        sanitize_source_url(&self.url)
    }
}

fn contains_360(s: &str) -> bool {
    s.contains("360")
}

fn is_panoramic(mode_hint: Option<&str>, title: &str, url: &str) -> bool {
    mode_hint.map(|m| contains_360(&m.to_ascii_lowercase())).unwrap_or(false)
        || contains_360(title)
        || contains_360(url)
}

/// Bytes that break a relative media path when left raw. Absolute URLs are
/// assumed to be already encoded by their producer.
const RELATIVE_PATH_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// Percent-encodes relative paths (spaces and friends); URLs that carry a
/// scheme pass through untouched.
pub fn sanitize_source_url(url: &str) -> Cow<'_, str> {
    if url.contains("://") {
        Cow::Borrowed(url)
    } else {
        utf8_percent_encode(url, RELATIVE_PATH_ESCAPES).into()
    }
}
