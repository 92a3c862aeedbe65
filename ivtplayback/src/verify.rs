//! Playback verification: did the timeline actually advance?

use std::time::Duration;

use ivtmedia::{MediaEvent, MediaSource};
use tokio::sync::broadcast::error::RecvError;
use tokio::time;
use tracing::debug;

/// Confirms that a play request produced real timeline progress.
///
/// Autoplay policies and decode stalls can leave a source nominally
/// "playing" while frozen, so a resolved play call is not proof of
/// playback. The verifier samples the position before the wait, then on
/// each progress signal waits a short settle delay and re-samples; only a
/// position strictly greater than the starting one counts.
pub struct PlaybackVerifier {
    verify_timeout: Duration,
    settle_delay: Duration,
}

impl PlaybackVerifier {
    pub fn new(verify_timeout: Duration, settle_delay: Duration) -> Self {
        Self {
            verify_timeout,
            settle_delay,
        }
    }

    /// True once the position exceeds its value at entry; false if an
    /// error event fires first, the source's event channel closes, or the
    /// verify timeout elapses. The subscription is torn down exactly once
    /// (receiver drop at return) on every path.
    pub async fn verify_advance(&self, source: &dyn MediaSource) -> bool {
        let starting_position = source.position();
        let mut events = source.subscribe();

        let advanced = async {
            loop {
                match events.recv().await {
                    Ok(MediaEvent::Progressing) => {
                        time::sleep(self.settle_delay).await;
                        if source.position() > starting_position {
                            return true;
                        }
                    }
                    Ok(MediaEvent::Error(fault)) => {
                        debug!(%fault, "error while verifying playback");
                        return false;
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(skipped, "media event backlog dropped during verify");
                    }
                    Err(RecvError::Closed) => return false,
                }
            }
        };

        match time::timeout(self.verify_timeout, advanced).await {
            Ok(result) => result,
            Err(_) => {
                debug!("timeline did not advance before verify timeout");
                false
            }
        }
    }
}
