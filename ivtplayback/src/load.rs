//! Load sequencing: URL binding with token-based supersession.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ivtmedia::{MediaEvent, MediaSource};
use tokio::sync::broadcast::error::RecvError;
use tokio::time;
use tracing::debug;

/// Issues loads against a media source and mints a monotonically
/// increasing token per attempt.
///
/// At most one token is current at a time. `begin_load` itself always runs
/// to resolution; it is the *caller's* contract to compare the returned
/// token against [`LoadSequencer::is_current`] and discard the pipeline if
/// a later load superseded it. This is how a stale load for an entry the
/// user already skipped past is prevented from clobbering newer state,
/// without needing an abort channel through the media capability.
pub struct LoadSequencer {
    latest: AtomicU64,
    load_timeout: Duration,
}

impl LoadSequencer {
    pub fn new(load_timeout: Duration) -> Self {
        Self {
            latest: AtomicU64::new(0),
            load_timeout,
        }
    }

    /// The most recently minted token.
    pub fn current_token(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    /// Whether `token` is still the newest load.
    pub fn is_current(&self, token: u64) -> bool {
        self.current_token() == token
    }

    /// Binds `url` to `source` and resolves once the resource is plausibly
    /// decodable, returning the token minted for this attempt.
    ///
    /// The token is minted synchronously on entry, so a later `begin_load`
    /// supersedes this one before any await runs. The wait resolves on the
    /// first of: metadata parsed, can-play, an error event, or the load
    /// timeout. Neither an error nor the timeout is fatal here — playback
    /// is attempted regardless, and real failures surface during
    /// verification. The event subscription is torn down exactly once, by
    /// dropping the receiver at resolution.
    pub async fn begin_load(&self, source: &dyn MediaSource, url: &str) -> u64 {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        // Best-effort: a source that cannot pause still gets the new URL.
        if let Err(err) = source.pause() {
            debug!(%err, "pause before load failed, continuing");
        }

        // Unbind first so error events from the discarded resource are not
        // surfaced. No explicit reload beyond the assignment: assignment
        // alone triggers the source's readiness pipeline.
        source.clear_url();
        let mut events = source.subscribe();
        source.set_url(url);

        let ready = async {
            loop {
                match events.recv().await {
                    Ok(MediaEvent::MetadataReady | MediaEvent::CanPlay) => break,
                    Ok(MediaEvent::Error(fault)) => {
                        debug!(%fault, token, "error during load, will attempt playback anyway");
                        break;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "media event backlog dropped during load");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        };

        if time::timeout(self.load_timeout, ready).await.is_err() {
            debug!(token, url, "no readiness signal before timeout, proceeding");
        }

        token
    }
}
