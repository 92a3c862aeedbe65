//! Top-level playback state machine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use ivtmedia::{MediaEvent, MediaSource};
use ivtplaylist::{Playlist, PlaylistEntry, PlaylistSource};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::events::{PlayerEvent, PlayerState, StallReason};
use crate::load::LoadSequencer;
use crate::present::PresentationAdapter;
use crate::tunables::PlaybackTunables;
use crate::verify::PlaybackVerifier;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Outcome of one non-superseded play attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackAttemptResult {
    /// The timeline provably advanced.
    Started,
    /// The play request was accepted but nothing advanced; a manual retry
    /// gesture is the expected remedy.
    NotAdvanced,
    /// The play request was rejected, with the denial reason.
    Errored(String),
}

/// Outcome of a `start_first` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// Another start was already in flight; this one did nothing.
    AlreadyInFlight,
    /// The playlist stayed empty even after asking the catalog.
    NoContent,
    /// A pipeline ran to completion for the selected entry.
    Attempted(PlaybackAttemptResult),
    /// The pipeline was superseded by newer navigation before finishing.
    Superseded,
}

/// Outcome of a play/pause toggle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No source was bound yet; the toggle behaved as a start request.
    Redirected(StartOutcome),
    /// Toggling with no source and no entries does nothing.
    NoContent,
    /// Playback was paused.
    Paused,
    /// A paused source was resumed (and re-verified).
    Resumed(PlaybackAttemptResult),
    /// Newer navigation superseded the resume before it finished.
    Superseded,
}

/// Owns the playlist cursor and the media source, and serializes playback
/// requests.
///
/// The orchestrator is the media source's exclusive mutator: nothing else
/// may bind URLs or issue play/pause. Synchronization is deliberately
/// minimal — an `AtomicBool` guard serializing start requests and the load
/// token comparison at every resume point. Superseded pipelines are never
/// aborted; they run to completion and their results are discarded
/// (`None`), so no state they compute can leak into the UI.
pub struct PlaybackOrchestrator {
    source: Arc<dyn MediaSource>,
    playlist: Mutex<Playlist>,
    sequencer: LoadSequencer,
    verifier: PlaybackVerifier,
    starting: AtomicBool,
    state: Mutex<PlayerState>,
    events: broadcast::Sender<PlayerEvent>,
    presentation: Option<Arc<dyn PresentationAdapter>>,
    catalog: Option<Arc<dyn PlaylistSource>>,
    fault_monitor: JoinHandle<()>,
}

impl PlaybackOrchestrator {
    /// Creates an orchestrator around `source`. Must run inside a Tokio
    /// runtime (a fault monitor task is spawned for the source's
    /// lifetime).
    pub fn new(source: Arc<dyn MediaSource>, tunables: PlaybackTunables) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let fault_monitor = spawn_fault_monitor(&source, events.clone());
        Self {
            source,
            playlist: Mutex::new(Playlist::new()),
            sequencer: LoadSequencer::new(tunables.load_timeout()),
            verifier: PlaybackVerifier::new(
                tunables.verify_timeout(),
                tunables.settle_delay(),
            ),
            starting: AtomicBool::new(false),
            state: Mutex::new(PlayerState::Idle),
            events,
            presentation: None,
            catalog: None,
            fault_monitor,
        }
    }

    /// Attaches the presentation seam notified on verified transitions.
    pub fn with_presentation(mut self, presentation: Arc<dyn PresentationAdapter>) -> Self {
        self.presentation = Some(presentation);
        self
    }

    /// Attaches the catalog consulted when a start request finds an empty
    /// playlist.
    pub fn with_catalog(mut self, catalog: Arc<dyn PlaylistSource>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Subscribes to the orchestrator's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> PlayerState {
        *self.state.lock().unwrap()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.playlist.lock().unwrap().current()
    }

    pub fn current_entry(&self) -> Option<PlaylistEntry> {
        self.playlist.lock().unwrap().current_entry().cloned()
    }

    pub fn playlist_len(&self) -> usize {
        self.playlist.lock().unwrap().len()
    }

    pub fn is_paused(&self) -> bool {
        self.source.is_paused()
    }

    /// Appends entries to the playlist. Manifest fetches and local file
    /// selections both land here; the origin makes no difference.
    pub fn append_entries(&self, entries: Vec<PlaylistEntry>) {
        self.playlist.lock().unwrap().extend(entries);
    }

    /// Loads, plays, and verifies the entry at `request` (normalized into
    /// range, wrapping in both directions).
    ///
    /// Returns `None` when the playlist is empty or when this pipeline was
    /// superseded by newer navigation — in both cases no shared state was
    /// mutated by the discarded portion. Media-layer failures never
    /// propagate: a rejected play degrades to
    /// [`PlaybackAttemptResult::Errored`].
    pub async fn play_index(&self, request: isize) -> Option<PlaybackAttemptResult> {
        let (index, total, entry) = {
            let mut playlist = self.playlist.lock().unwrap();
            let index = playlist.select(request)?;
            let entry = playlist.entry(index)?.clone();
            (index, playlist.len(), entry)
        };

        self.transition(PlayerState::Loading);
        debug!(index, url = %entry.url, "loading playlist entry");
        let token = self
            .sequencer
            .begin_load(self.source.as_ref(), &entry.source_url())
            .await;
        if !self.sequencer.is_current(token) {
            debug!(token, url = %entry.url, "load superseded, discarding");
            return None;
        }

        self.transition(PlayerState::Verifying);
        let result = match self.source.play().await {
            Ok(()) => {
                if !self.sequencer.is_current(token) {
                    debug!(token, "play superseded before verification, discarding");
                    return None;
                }
                if self.verifier.verify_advance(self.source.as_ref()).await {
                    PlaybackAttemptResult::Started
                } else {
                    PlaybackAttemptResult::NotAdvanced
                }
            }
            // Known throw point: autoplay-policy rejection. Degrades to a
            // result value, never an error.
            Err(err) => PlaybackAttemptResult::Errored(err.to_string()),
        };

        if !self.sequencer.is_current(token) {
            debug!(token, "attempt superseded after verification, discarding");
            return None;
        }

        match &result {
            PlaybackAttemptResult::Started => {
                self.transition(PlayerState::Playing);
                self.present(&entry, true);
                info!(
                    position = index + 1,
                    total,
                    title = %entry.title,
                    mode = ?entry.mode,
                    "playback verified"
                );
                let _ = self.events.send(PlayerEvent::EntryStarted {
                    index,
                    total,
                    title: entry.title.clone(),
                    mode: entry.mode,
                });
            }
            PlaybackAttemptResult::NotAdvanced => {
                self.transition(PlayerState::Stalled);
                warn!(title = %entry.title, "playback did not advance; manual play gesture required");
                let _ = self.events.send(PlayerEvent::Stalled {
                    reason: StallReason::NotAdvancing,
                });
            }
            PlaybackAttemptResult::Errored(reason) => {
                self.transition(PlayerState::Stalled);
                warn!(%reason, title = %entry.title, "play request rejected");
                let _ = self.events.send(PlayerEvent::Stalled {
                    reason: StallReason::Rejected(reason.clone()),
                });
            }
        }

        Some(result)
    }

    /// Steps the cursor by `delta` (wrapping) and re-enters the pipeline.
    /// Any pipeline still running for the previous entry is implicitly
    /// cancelled through token mismatch. No-op on an empty playlist.
    pub async fn navigate(&self, delta: isize) -> Option<PlaybackAttemptResult> {
        let target = self.playlist.lock().unwrap().step_target(delta)?;
        self.play_index(target).await
    }

    pub async fn next(&self) -> Option<PlaybackAttemptResult> {
        self.navigate(1).await
    }

    pub async fn prev(&self) -> Option<PlaybackAttemptResult> {
        self.navigate(-1).await
    }

    /// Starts playback at the remembered cursor, or at the head of the
    /// playlist.
    ///
    /// Guarded: while one start is in flight, further calls return
    /// [`StartOutcome::AlreadyInFlight`] without touching anything (not
    /// queued, not an error). If the playlist is empty the catalog
    /// collaborator is asked once; fetch failures are absorbed.
    pub async fn start_first(&self) -> StartOutcome {
        if self.starting.swap(true, Ordering::SeqCst) {
            debug!("start already in flight, ignoring");
            return StartOutcome::AlreadyInFlight;
        }
        let outcome = self.start_guarded().await;
        self.starting.store(false, Ordering::SeqCst);
        outcome
    }

    async fn start_guarded(&self) -> StartOutcome {
        self.transition(PlayerState::Starting);

        if self.playlist.lock().unwrap().is_empty() {
            if let Some(catalog) = &self.catalog {
                match catalog.fetch_entries().await {
                    Ok(entries) => {
                        info!(count = entries.len(), "catalog supplied entries");
                        self.append_entries(entries);
                    }
                    Err(err) => warn!(%err, "catalog fetch failed"),
                }
            }
        }

        let resume = {
            let playlist = self.playlist.lock().unwrap();
            if playlist.is_empty() {
                None
            } else {
                Some(playlist.current().map(|i| i as isize).unwrap_or(0))
            }
        };
        let Some(resume) = resume else {
            warn!("no entries to play");
            self.transition(PlayerState::Idle);
            let _ = self.events.send(PlayerEvent::CatalogEmpty);
            return StartOutcome::NoContent;
        };

        match self.play_index(resume).await {
            Some(result) => StartOutcome::Attempted(result),
            None => StartOutcome::Superseded,
        }
    }

    /// Flips paused/playing on the bound source.
    ///
    /// A toggle before anything was started is treated as a start request
    /// (the empty source has nothing to toggle). Resuming re-verifies that
    /// the timeline advances — this is the manual-gesture path after an
    /// autoplay rejection, and it must confirm progress just like a fresh
    /// attempt.
    pub async fn toggle_play_pause(&self) -> ToggleOutcome {
        if !self.source.has_url() {
            if self.playlist.lock().unwrap().is_empty() {
                return ToggleOutcome::NoContent;
            }
            return ToggleOutcome::Redirected(self.start_first().await);
        }

        let token = self.sequencer.current_token();
        if self.source.is_paused() {
            let result = match self.source.play().await {
                Ok(()) => {
                    if self.verifier.verify_advance(self.source.as_ref()).await {
                        PlaybackAttemptResult::Started
                    } else {
                        PlaybackAttemptResult::NotAdvanced
                    }
                }
                Err(err) => PlaybackAttemptResult::Errored(err.to_string()),
            };
            if !self.sequencer.is_current(token) {
                debug!("resume superseded by navigation, discarding");
                return ToggleOutcome::Superseded;
            }
            match &result {
                PlaybackAttemptResult::Started => {
                    self.transition(PlayerState::Playing);
                    if let Some(entry) = self.current_entry() {
                        self.present(&entry, true);
                    }
                    let _ = self.events.send(PlayerEvent::PauseToggled { paused: false });
                }
                PlaybackAttemptResult::NotAdvanced => {
                    self.transition(PlayerState::Stalled);
                    let _ = self.events.send(PlayerEvent::Stalled {
                        reason: StallReason::NotAdvancing,
                    });
                }
                PlaybackAttemptResult::Errored(reason) => {
                    self.transition(PlayerState::Stalled);
                    warn!(%reason, "manual resume rejected");
                    let _ = self.events.send(PlayerEvent::Stalled {
                        reason: StallReason::Rejected(reason.clone()),
                    });
                }
            }
            ToggleOutcome::Resumed(result)
        } else {
            if let Err(err) = self.source.pause() {
                debug!(%err, "pause request failed");
            }
            if let Some(entry) = self.current_entry() {
                self.present(&entry, false);
            }
            let _ = self.events.send(PlayerEvent::PauseToggled { paused: true });
            ToggleOutcome::Paused
        }
    }

    fn present(&self, entry: &PlaylistEntry, playing: bool) {
        if let Some(presentation) = &self.presentation {
            presentation.present(entry, playing);
        }
    }

    fn transition(&self, next: PlayerState) {
        let mut state = self.state.lock().unwrap();
        if *state != next {
            debug!(from = ?*state, to = ?next, "state transition");
            *state = next;
            let _ = self.events.send(PlayerEvent::StateChanged(next));
        }
    }
}

impl Drop for PlaybackOrchestrator {
    fn drop(&mut self) {
        self.fault_monitor.abort();
    }
}

/// Forwards media faults to the orchestrator's event stream for the life
/// of the source, attaching the re-encode hint for format faults.
fn spawn_fault_monitor(
    source: &Arc<dyn MediaSource>,
    events: broadcast::Sender<PlayerEvent>,
) -> JoinHandle<()> {
    let mut media_events = source.subscribe();
    tokio::spawn(async move {
        loop {
            match media_events.recv().await {
                Ok(MediaEvent::Error(fault)) => {
                    warn!(%fault, "media source fault");
                    let _ = events.send(PlayerEvent::MediaFault {
                        fault,
                        suggests_reencode: fault.suggests_reencode(),
                    });
                }
                Ok(_) => {}
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            }
        }
    })
}
