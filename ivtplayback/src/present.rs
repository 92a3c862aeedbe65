//! Seam between the playback core and the render layer.

use ivtplaylist::PlaylistEntry;

/// Consumes orchestrator transitions to drive projection geometry.
///
/// Called after every verified start and on pause/resume, with the active
/// entry and whether playback is running. Implementations decide screen
/// geometry on their own; the core never inspects rendering state, and a
/// superseded pipeline never reaches this call.
pub trait PresentationAdapter: Send + Sync {
    fn present(&self, entry: &PlaylistEntry, playing: bool);
}
