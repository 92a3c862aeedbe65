//! Local folder scan as a playlist source.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::entry::PlaylistEntry;
use crate::error::Result;
use crate::manifest::PlaylistSource;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "mov", "webm", "mkv"];

/// Scans a directory (non-recursively) for video files and exposes them as
/// playlist entries, titled by file name, sorted by name for a stable
/// order. Mode detection uses the 360 file-name heuristic.
pub struct FolderSource {
    root: PathBuf,
}

impl FolderSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn is_video_file(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[async_trait]
impl PlaylistSource for FolderSource {
    async fn fetch_entries(&self) -> Result<Vec<PlaylistEntry>> {
        let mut names = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.root).await?;
        while let Some(item) = dir.next_entry().await? {
            if !item.file_type().await?.is_file() {
                continue;
            }
            let name = item.file_name().to_string_lossy().into_owned();
            if is_video_file(&name) {
                names.push(name);
            }
        }
        names.sort();

        let entries = names
            .into_iter()
            .map(|name| {
                let path = self.root.join(&name).to_string_lossy().into_owned();
                PlaylistEntry::detect(name, path, None)
            })
            .collect::<Vec<_>>();
        debug!(root = %self.root.display(), count = entries.len(), "folder scanned");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ProjectionMode;

    #[tokio::test]
    async fn scans_only_video_files_in_name_order() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["b_360_roof.mp4", "a_lobby.MP4", "notes.txt", "c.webm"] {
            std::fs::write(dir.path().join(name), b"")?;
        }

        let entries = FolderSource::new(dir.path()).fetch_entries().await?;
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["a_lobby.MP4", "b_360_roof.mp4", "c.webm"]);
        assert_eq!(entries[1].mode, ProjectionMode::Panoramic);
        assert_eq!(entries[0].mode, ProjectionMode::Flat);
        Ok(())
    }

    #[tokio::test]
    async fn missing_folder_is_an_error() {
        let result = FolderSource::new("/definitely/not/here")
            .fetch_entries()
            .await;
        assert!(result.is_err());
    }
}
