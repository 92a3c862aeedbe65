//! Timing knobs for the playback pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_LOAD_TIMEOUT_MS: u64 = 8000;
const DEFAULT_VERIFY_TIMEOUT_MS: u64 = 4000;
const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

/// Timeouts of the load and verify stages.
///
/// Serde-friendly so hosts can load them from a config file; the defaults
/// are the tuning the pipeline was validated with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackTunables {
    /// How long a load may wait for a readiness signal before the pipeline
    /// attempts playback anyway (some hosts never fire a clean readiness
    /// event for certain formats).
    pub load_timeout_ms: u64,
    /// How long verification waits for the timeline to advance before the
    /// attempt is reported as not advancing.
    pub verify_timeout_ms: u64,
    /// Pause between a progress signal and the position re-sample, letting
    /// the reported position settle.
    pub settle_delay_ms: u64,
}

impl Default for PlaybackTunables {
    fn default() -> Self {
        Self {
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
            verify_timeout_ms: DEFAULT_VERIFY_TIMEOUT_MS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl PlaybackTunables {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }

    pub fn verify_timeout(&self) -> Duration {
        Duration::from_millis(self.verify_timeout_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_validated_tuning() {
        let t = PlaybackTunables::default();
        assert_eq!(t.load_timeout(), Duration::from_secs(8));
        assert_eq!(t.verify_timeout(), Duration::from_secs(4));
        assert_eq!(t.settle_delay(), Duration::from_millis(100));
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let t: PlaybackTunables =
            serde_json::from_str(r#"{ "load_timeout_ms": 2000 }"#).unwrap();
        assert_eq!(t.load_timeout_ms, 2000);
        assert_eq!(t.verify_timeout_ms, 4000);
        assert_eq!(t.settle_delay_ms, 100);
    }
}
