//! Manifest acquisition: the `PlaylistSource` trait and its HTTP
//! implementation.
//!
//! The manifest is a JSON document of the form:
//!
//! ```json
//! { "videos": [ { "title": "Lobby", "url": "lobby.mp4", "mode": "2d" } ] }
//! ```
//!
//! `mode` is optional; entries without one fall back to the 360 heuristic
//! on title/URL.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use crate::entry::PlaylistEntry;
use crate::error::{Error, Result};

/// Supplies an ordered list of playlist entries.
///
/// Manifest fetch and local file selection are equivalent at this boundary;
/// consumers append whatever a source yields.
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn fetch_entries(&self) -> Result<Vec<PlaylistEntry>>;
}

#[derive(Debug, Deserialize)]
struct ManifestDoc {
    videos: Option<Vec<ManifestVideo>>,
}

#[derive(Debug, Deserialize)]
struct ManifestVideo {
    title: Option<String>,
    url: String,
    mode: Option<String>,
}

/// Parses a manifest document into playlist entries.
///
/// Entries without a title are titled by the trailing segment of their URL.
pub fn parse_manifest(json: &str) -> Result<Vec<PlaylistEntry>> {
    let doc: ManifestDoc = serde_json::from_str(json)?;
    let videos = doc.videos.ok_or(Error::ManifestShape)?;
    Ok(videos
        .into_iter()
        .map(|v| {
            let title = v
                .title
                .unwrap_or_else(|| trailing_segment(&v.url).to_string());
            PlaylistEntry::detect(title, v.url, v.mode.as_deref())
        })
        .collect())
}

fn trailing_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Fetches a manifest over HTTP.
pub struct ManifestSource {
    url: String,
    client: reqwest::Client,
}

impl ManifestSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PlaylistSource for ManifestSource {
    async fn fetch_entries(&self) -> Result<Vec<PlaylistEntry>> {
        let body = self
            .client
            .get(&self.url)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let entries = parse_manifest(&body)?;
        debug!(url = %self.url, count = entries.len(), "manifest fetched");
        Ok(entries)
    }
}
