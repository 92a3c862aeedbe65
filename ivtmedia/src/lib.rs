//! # ivtmedia
//!
//! Media capability layer for IVTours.
//!
//! This crate defines the contract between the playback core and whatever
//! actually decodes video: a [`MediaSource`] is a single playable resource
//! exposing URL binding, play/pause control, a timeline position, and a
//! broadcast stream of [`MediaEvent`]s (readiness, progress, faults).
//!
//! Higher layers never talk to a decoder directly; `ivtplayback` drives a
//! `MediaSource` and is its exclusive mutator. Render and input layers only
//! read derived state.
//!
//! The crate also ships [`SimulatedMediaSource`], a scripted in-process
//! source used by the integration tests and the runnable demos. It is not a
//! decoder: it replays a configurable readiness/progress scenario so the
//! orchestration logic can be exercised deterministically.

mod sim;
mod source;

pub use sim::{SimBehavior, SimulatedMediaSource};
pub use source::{MediaError, MediaEvent, MediaFault, MediaSource};

/// Result type for media source operations.
pub type Result<T> = std::result::Result<T, MediaError>;
