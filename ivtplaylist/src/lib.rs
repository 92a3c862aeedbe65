//! # ivtplaylist
//!
//! Playlist data model and acquisition sources for IVTours.
//!
//! This crate provides:
//! - **[`PlaylistEntry`]** / **[`ProjectionMode`]**: one tour video (title,
//!   source URL, flat or panoramic projection), with the panoramic
//!   detection heuristic and source-URL sanitizing.
//! - **[`Playlist`]**: an ordered, append-only sequence of entries plus a
//!   cursor, with wrap-around navigation math. No-ops on an empty playlist.
//! - **[`PlaylistSource`]**: the acquisition trait. A manifest fetched over
//!   HTTP ([`ManifestSource`]) and a local folder scan ([`FolderSource`])
//!   are equivalent producers; the playback core treats both as appends.
//!
//! The playlist itself holds no playback state: which entry is loading or
//! playing is owned by the orchestrator in `ivtplayback`.

mod entry;
mod error;
mod folder;
mod manifest;
mod playlist;

pub use entry::{PlaylistEntry, ProjectionMode, sanitize_source_url};
pub use error::{Error, Result};
pub use folder::FolderSource;
pub use manifest::{ManifestSource, PlaylistSource, parse_manifest};
pub use playlist::Playlist;
