//! Orchestrator states and the structured event stream.

use ivtmedia::MediaFault;
use ivtplaylist::ProjectionMode;

/// Behavioral states of the orchestrator.
///
/// Only the pipeline holding the current load token transitions the state,
/// so a superseded pipeline can never report itself as the active one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// No entry selected, no source bound.
    Idle,
    /// A start request is in flight (guarded; concurrent starts are
    /// silently dropped).
    Starting,
    /// Waiting for the current entry's readiness signal or load timeout.
    Loading,
    /// Play was requested; waiting for the timeline to provably advance.
    Verifying,
    /// Verified advancing.
    Playing,
    /// Load or verification could not confirm progress; playback controls
    /// stay live so the user can retry manually.
    Stalled,
}

/// Why playback stalled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StallReason {
    /// The play request was accepted but the timeline never advanced.
    NotAdvancing,
    /// The play request itself was rejected (commonly an autoplay policy
    /// awaiting a user gesture).
    Rejected(String),
}

/// Events emitted over the orchestrator's broadcast channel. Consumed by
/// control surfaces and presentation layers; the orchestrator never waits
/// on its own events.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    StateChanged(PlayerState),
    /// A playlist entry passed verification and is now the active one.
    EntryStarted {
        index: usize,
        total: usize,
        title: String,
        mode: ProjectionMode,
    },
    /// An attempt ended without verified progress; a manual play gesture is
    /// the expected remedy.
    Stalled { reason: StallReason },
    PauseToggled { paused: bool },
    /// The media source reported a fault. `suggests_reencode` is the
    /// remediation hint for decode/format faults.
    MediaFault {
        fault: MediaFault,
        suggests_reencode: bool,
    },
    /// A start request found no entries, even after asking the catalog.
    CatalogEmpty,
}
