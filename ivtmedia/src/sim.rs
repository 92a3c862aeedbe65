//! Scripted media source for tests and demos.
//!
//! `SimulatedMediaSource` replays a configurable readiness/progress scenario
//! instead of decoding anything. Two modes of use:
//!
//! - **Scripted** (`SimBehavior::default()`): binding a URL emits readiness
//!   after a delay, and a successful play ticks the timeline forward while
//!   emitting `Progressing`. Good for demos and happy-path tests.
//! - **Manual** (`SimBehavior::manual()`): nothing happens on its own; the
//!   test drives the source with [`SimulatedMediaSource::emit`] and
//!   [`SimulatedMediaSource::set_position`]. Good for timeout and
//!   cancellation tests under a paused clock.
//!
//! Internal scripted tasks are keyed on a generation counter: any URL
//! rebind, clear, or pause bump invalidates tasks spawned for the previous
//! state, so a stale readiness task can never emit for a discarded URL.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::trace;

use crate::source::{MediaError, MediaEvent, MediaSource};

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Scenario configuration for a [`SimulatedMediaSource`].
#[derive(Clone, Debug)]
pub struct SimBehavior {
    /// Emit `MetadataReady` + `CanPlay` this long after a URL is bound.
    /// `None` means readiness never fires on its own.
    pub ready_after: Option<Duration>,
    /// When set, `play()` is rejected with this reason.
    pub reject_play: Option<String>,
    /// When true, a successful `play()` advances the timeline on a tick.
    pub advance_on_play: bool,
    /// Tick period for the auto-advance task.
    pub tick: Duration,
    /// When true, `pause()` reports a backend failure (the source keeps
    /// playing). Used to exercise best-effort pause handling.
    pub fail_pause: bool,
}

impl SimBehavior {
    /// Fully inert behavior: the test drives every signal by hand.
    pub fn manual() -> Self {
        Self {
            ready_after: None,
            reject_play: None,
            advance_on_play: false,
            tick: Duration::from_millis(50),
            fail_pause: false,
        }
    }
}

impl Default for SimBehavior {
    /// Scripted happy path: readiness after 20 ms, timeline advancing on a
    /// 50 ms tick once playing.
    fn default() -> Self {
        Self {
            ready_after: Some(Duration::from_millis(20)),
            reject_play: None,
            advance_on_play: true,
            tick: Duration::from_millis(50),
            fail_pause: false,
        }
    }
}

#[derive(Debug)]
struct SimState {
    url: Option<String>,
    paused: bool,
    position: f64,
    /// Bumped on every bind/clear/play/pause; scripted tasks holding an
    /// older generation stop without emitting.
    generation: u64,
    behavior: SimBehavior,
    url_history: Vec<String>,
    play_calls: usize,
}

/// In-process scripted implementation of [`MediaSource`].
///
/// Scripted behaviors spawn Tokio tasks, so a source with `ready_after` or
/// `advance_on_play` set must be used inside a Tokio runtime.
pub struct SimulatedMediaSource {
    inner: Arc<Mutex<SimState>>,
    events: broadcast::Sender<MediaEvent>,
}

impl SimulatedMediaSource {
    pub fn new(behavior: SimBehavior) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(SimState {
                url: None,
                paused: true,
                position: 0.0,
                generation: 0,
                behavior,
                url_history: Vec::new(),
                play_calls: 0,
            })),
            events,
        }
    }

    /// Injects an event as if the underlying engine had raised it.
    pub fn emit(&self, event: MediaEvent) {
        let _ = self.events.send(event);
    }

    /// Moves the timeline to an absolute position, in seconds.
    pub fn set_position(&self, position: f64) {
        self.inner.lock().unwrap().position = position;
    }

    /// Installs or clears a play-rejection reason for subsequent `play()`
    /// calls.
    pub fn set_reject_play(&self, reason: Option<String>) {
        self.inner.lock().unwrap().behavior.reject_play = reason;
    }

    /// Every URL ever bound, in order. Lets tests assert how many loads
    /// were actually issued.
    pub fn url_history(&self) -> Vec<String> {
        self.inner.lock().unwrap().url_history.clone()
    }

    pub fn current_url(&self) -> Option<String> {
        self.inner.lock().unwrap().url.clone()
    }

    pub fn play_count(&self) -> usize {
        self.inner.lock().unwrap().play_calls
    }

    fn spawn_ready_task(&self, generation: u64, delay: Duration) {
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let still_current = inner.lock().unwrap().generation == generation;
            if still_current {
                trace!("scripted readiness fired");
                let _ = events.send(MediaEvent::MetadataReady);
                let _ = events.send(MediaEvent::CanPlay);
            }
        });
    }

    fn spawn_advance_task(&self, generation: u64, tick: Duration) {
        let inner = Arc::clone(&self.inner);
        let events = self.events.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(tick).await;
                {
                    let mut state = inner.lock().unwrap();
                    if state.generation != generation || state.paused {
                        break;
                    }
                    state.position += tick.as_secs_f64();
                }
                let _ = events.send(MediaEvent::Progressing);
            }
        });
    }
}

#[async_trait]
impl MediaSource for SimulatedMediaSource {
    fn set_url(&self, url: &str) {
        let (generation, ready_after) = {
            let mut state = self.inner.lock().unwrap();
            state.generation += 1;
            state.url = Some(url.to_string());
            state.url_history.push(url.to_string());
            (state.generation, state.behavior.ready_after)
        };
        if let Some(delay) = ready_after {
            self.spawn_ready_task(generation, delay);
        }
    }

    fn clear_url(&self) {
        let mut state = self.inner.lock().unwrap();
        state.generation += 1;
        state.url = None;
    }

    fn has_url(&self) -> bool {
        self.inner.lock().unwrap().url.is_some()
    }

    async fn play(&self) -> crate::Result<()> {
        let (generation, tick, advance) = {
            let mut state = self.inner.lock().unwrap();
            if let Some(reason) = state.behavior.reject_play.clone() {
                return Err(MediaError::PlayRejected(reason));
            }
            if state.url.is_none() {
                return Err(MediaError::NoMedia);
            }
            state.paused = false;
            state.play_calls += 1;
            state.generation += 1;
            (
                state.generation,
                state.behavior.tick,
                state.behavior.advance_on_play,
            )
        };
        if advance {
            self.spawn_advance_task(generation, tick);
        }
        Ok(())
    }

    fn pause(&self) -> crate::Result<()> {
        let mut state = self.inner.lock().unwrap();
        if state.behavior.fail_pause {
            return Err(MediaError::Backend("pause unavailable".into()));
        }
        state.paused = true;
        state.generation += 1;
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.inner.lock().unwrap().paused
    }

    fn position(&self) -> f64 {
        self.inner.lock().unwrap().position
    }

    fn subscribe(&self) -> broadcast::Receiver<MediaEvent> {
        self.events.subscribe()
    }
}
