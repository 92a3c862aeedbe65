//! The `MediaSource` capability and its event/fault vocabulary.

use async_trait::async_trait;
use tokio::sync::broadcast;

/// Fault categories reported by a media source.
///
/// These mirror the four error classes a playback element can raise. The
/// playback core maps them to a remediation hint but never attempts
/// automatic recovery (no transcoding, no fallback source).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaFault {
    /// Fetching was aborted before the resource was usable.
    Aborted,
    /// A network-level failure interrupted the fetch.
    Network,
    /// The container was fetched but could not be decoded
    /// (commonly an HEVC/H.265 stream on hosts without a decoder).
    Decode,
    /// The source format is not supported at all.
    SrcNotSupported,
}

impl MediaFault {
    /// Maps a raw numeric error code (1..=4) to a fault category.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Aborted),
            2 => Some(Self::Network),
            3 => Some(Self::Decode),
            4 => Some(Self::SrcNotSupported),
            _ => None,
        }
    }

    /// True when the expected remedy is re-encoding the content
    /// (H.264/AAC), rather than retrying.
    pub fn suggests_reencode(&self) -> bool {
        matches!(self, Self::Decode | Self::SrcNotSupported)
    }
}

impl std::fmt::Display for MediaFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Aborted => "ABORTED",
            Self::Network => "NETWORK",
            Self::Decode => "DECODE",
            Self::SrcNotSupported => "SRC_NOT_SUPPORTED",
        };
        f.write_str(label)
    }
}

/// Events emitted by a media source over its broadcast channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    /// Metadata (dimensions, duration) has been parsed.
    MetadataReady,
    /// Enough data is buffered to plausibly begin playback.
    CanPlay,
    /// The timeline is advancing.
    Progressing,
    /// The resource played to its end.
    Ended,
    /// The source entered a fault state.
    Error(MediaFault),
}

/// Errors surfaced by `MediaSource` control operations.
#[derive(Clone, Debug, thiserror::Error)]
pub enum MediaError {
    /// The host denied the play request (typically an autoplay policy that
    /// requires an explicit user gesture). Displays as the bare denial
    /// reason so callers can surface it verbatim.
    #[error("{0}")]
    PlayRejected(String),

    /// No URL is bound to the source.
    #[error("no media bound")]
    NoMedia,

    /// Backend-specific failure.
    #[error("media backend failure: {0}")]
    Backend(String),
}

/// A single playable media resource.
///
/// Implementations wrap a real decoder/compositor element; the playback
/// core only relies on this surface. URL assignment alone must trigger the
/// source's own readiness pipeline: callers never issue an explicit
/// reload/reset (some engines raise spurious abort diagnostics when reset
/// twice).
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Binds a new URL. Any readiness pipeline for a previous URL is
    /// implicitly abandoned.
    fn set_url(&self, url: &str);

    /// Unbinds the current URL without binding a new one, so transient
    /// error events from the discarded resource are not surfaced.
    fn clear_url(&self);

    /// True once a URL has been bound.
    fn has_url(&self) -> bool;

    /// Requests playback. Resolution of the returned future means the
    /// request was accepted, not that frames are advancing; callers that
    /// need real progress must verify the timeline position separately.
    async fn play(&self) -> crate::Result<()>;

    /// Requests pause.
    fn pause(&self) -> crate::Result<()>;

    /// True when the source is paused (or was never started).
    fn is_paused(&self) -> bool;

    /// Current timeline position, in seconds.
    fn position(&self) -> f64;

    /// Subscribes to the source's event stream. Dropping the receiver is
    /// the teardown; no explicit unsubscribe exists.
    fn subscribe(&self) -> broadcast::Receiver<MediaEvent>;
}
