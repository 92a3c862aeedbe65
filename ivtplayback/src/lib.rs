//! # ivtplayback
//!
//! Playback orchestration core for IVTours.
//!
//! Media elements are only loosely cooperative: a play request can resolve
//! without a single frame advancing, readiness events sometimes never fire,
//! and a user can skip ahead while a previous load is still settling. This
//! crate turns that into a predictable state machine built from three
//! pieces:
//!
//! - **[`LoadSequencer`]**: binds a URL and resolves on the first readiness
//!   signal or a timeout, minting a monotonically increasing load token so
//!   callers can detect and discard superseded loads.
//! - **[`PlaybackVerifier`]**: after a play request, confirms the timeline
//!   position actually increased before playback is declared started.
//! - **[`PlaybackOrchestrator`]**: owns the playlist cursor and the media
//!   source, serializes start requests behind a single in-flight guard, and
//!   drives load → play → verify per entry. Overlapping navigation is
//!   resolved by token comparison at every resume point: superseded
//!   pipelines run to completion but may not mutate shared state.
//!
//! Nothing from the media layer escapes the orchestrator as an error; every
//! attempt degrades to a [`PlaybackAttemptResult`] so a control surface can
//! always offer a manual retry.

mod events;
mod load;
mod orchestrator;
mod present;
mod tunables;
mod verify;

pub use events::{PlayerEvent, PlayerState, StallReason};
pub use load::LoadSequencer;
pub use orchestrator::{
    PlaybackAttemptResult, PlaybackOrchestrator, StartOutcome, ToggleOutcome,
};
pub use present::PresentationAdapter;
pub use tunables::PlaybackTunables;
pub use verify::PlaybackVerifier;
