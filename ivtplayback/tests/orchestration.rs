//! End-to-end orchestrator behavior against the scripted media source.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ivtmedia::{MediaEvent, MediaFault, MediaSource, SimBehavior, SimulatedMediaSource};
use ivtplaylist::{PlaylistEntry, PlaylistSource, ProjectionMode};
use ivtplayback::{
    PlaybackAttemptResult, PlaybackOrchestrator, PlaybackTunables, PlayerEvent, PlayerState,
    PresentationAdapter, StartOutcome, ToggleOutcome,
};
use tokio::time::sleep;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn flat(title: &str, url: &str) -> PlaylistEntry {
    PlaylistEntry::new(title, url, ProjectionMode::Flat)
}

/// Scripted source that loads and plays successfully on its own.
fn scripted() -> SimBehavior {
    SimBehavior::default()
}

fn orchestrator_with(
    source: &Arc<SimulatedMediaSource>,
    entries: Vec<PlaylistEntry>,
) -> Arc<PlaybackOrchestrator> {
    let orch = PlaybackOrchestrator::new(source.clone(), PlaybackTunables::default());
    orch.append_entries(entries);
    Arc::new(orch)
}

struct RecordingPresenter {
    calls: Mutex<Vec<(String, bool)>>,
}

impl RecordingPresenter {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<(String, bool)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PresentationAdapter for RecordingPresenter {
    fn present(&self, entry: &PlaylistEntry, playing: bool) {
        self.calls.lock().unwrap().push((entry.title.clone(), playing));
    }
}

struct StubCatalog {
    entries: Vec<PlaylistEntry>,
}

#[async_trait]
impl PlaylistSource for StubCatalog {
    async fn fetch_entries(&self) -> ivtplaylist::Result<Vec<PlaylistEntry>> {
        Ok(self.entries.clone())
    }
}

#[tokio::test(start_paused = true)]
async fn stale_navigation_discards_previous_pipeline() {
    let source = Arc::new(SimulatedMediaSource::new(SimBehavior::manual()));
    let orch = orchestrator_with(&source, vec![flat("A", "a.mp4"), flat("B", "b.mp4")]);

    // Start the first entry; its load never settles on its own.
    let first = tokio::spawn({
        let orch = orch.clone();
        async move { orch.play_index(0).await }
    });
    sleep(ms(1)).await;
    assert_eq!(source.current_url().as_deref(), Some("a.mp4"));
    assert_eq!(orch.current_index(), Some(0));

    // Advance before the a.mp4 load settles: a new token is minted and
    // b.mp4 becomes the bound URL immediately.
    let second = tokio::spawn({
        let orch = orch.clone();
        async move { orch.next().await }
    });
    sleep(ms(1)).await;
    assert_eq!(source.current_url().as_deref(), Some("b.mp4"));

    // A readiness signal resolves both pipelines' waits; only the newest
    // may proceed to play.
    source.emit(MediaEvent::MetadataReady);
    sleep(ms(1)).await;
    assert!(!source.is_paused());

    source.set_position(0.5);
    source.emit(MediaEvent::Progressing);
    sleep(ms(200)).await;

    assert_eq!(first.await.unwrap(), None);
    assert_eq!(
        second.await.unwrap(),
        Some(PlaybackAttemptResult::Started)
    );
    // Final state is what a direct play_index(1) would have produced.
    assert_eq!(orch.current_index(), Some(1));
    assert_eq!(orch.current_entry().unwrap().url, "b.mp4");
    assert_eq!(orch.state(), PlayerState::Playing);
    assert_eq!(source.url_history(), vec!["a.mp4", "b.mp4"]);
}

#[tokio::test(start_paused = true)]
async fn next_then_prev_returns_to_starting_index() {
    let source = Arc::new(SimulatedMediaSource::new(scripted()));
    let orch = orchestrator_with(
        &source,
        vec![flat("A", "a.mp4"), flat("B", "b.mp4"), flat("C", "c.mp4")],
    );

    assert_eq!(
        orch.play_index(1).await,
        Some(PlaybackAttemptResult::Started)
    );
    orch.next().await;
    assert_eq!(orch.current_index(), Some(2));
    orch.prev().await;
    assert_eq!(orch.current_index(), Some(1));
}

#[tokio::test(start_paused = true)]
async fn navigation_wraps_around_playlist_edges() {
    let source = Arc::new(SimulatedMediaSource::new(scripted()));
    let orch = orchestrator_with(&source, vec![flat("A", "a.mp4"), flat("B", "b.mp4")]);

    orch.play_index(1).await;
    orch.next().await;
    assert_eq!(orch.current_index(), Some(0));
    orch.prev().await;
    assert_eq!(orch.current_index(), Some(1));
}

#[tokio::test(start_paused = true)]
async fn empty_playlist_operations_are_noops() {
    let source = Arc::new(SimulatedMediaSource::new(SimBehavior::manual()));
    let orch = orchestrator_with(&source, Vec::new());

    assert_eq!(orch.next().await, None);
    assert_eq!(orch.prev().await, None);
    assert_eq!(orch.play_index(3).await, None);
    assert_eq!(orch.toggle_play_pause().await, ToggleOutcome::NoContent);
    assert_eq!(orch.state(), PlayerState::Idle);
    assert!(source.url_history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn load_timeout_falls_through_to_playback() {
    // No readiness signal ever fires, but the source does play: the load
    // timeout is a fallback, not a failure.
    let behavior = SimBehavior {
        ready_after: None,
        ..scripted()
    };
    let source = Arc::new(SimulatedMediaSource::new(behavior));
    let orch = orchestrator_with(&source, vec![flat("A", "a.mp4")]);

    let started = tokio::time::Instant::now();
    assert_eq!(
        orch.play_index(0).await,
        Some(PlaybackAttemptResult::Started)
    );
    assert!(started.elapsed() >= ms(8000));
    assert_eq!(orch.state(), PlayerState::Playing);
}

#[tokio::test(start_paused = true)]
async fn rejected_play_stalls_and_manual_toggle_recovers() {
    let behavior = SimBehavior {
        reject_play: Some("NotAllowedError".into()),
        ..scripted()
    };
    let source = Arc::new(SimulatedMediaSource::new(behavior));
    let orch = orchestrator_with(&source, vec![flat("A", "a.mp4")]);

    assert_eq!(
        orch.play_index(0).await,
        Some(PlaybackAttemptResult::Errored("NotAllowedError".into()))
    );
    assert_eq!(orch.state(), PlayerState::Stalled);

    // The user gesture lifts the autoplay denial; a manual toggle must
    // re-verify and reach Playing.
    source.set_reject_play(None);
    assert_eq!(
        orch.toggle_play_pause().await,
        ToggleOutcome::Resumed(PlaybackAttemptResult::Started)
    );
    assert_eq!(orch.state(), PlayerState::Playing);
}

#[tokio::test(start_paused = true)]
async fn overlapping_start_requests_are_dropped() {
    let source = Arc::new(SimulatedMediaSource::new(SimBehavior::manual()));
    let orch = orchestrator_with(&source, vec![flat("A", "a.mp4")]);

    let first = tokio::spawn({
        let orch = orch.clone();
        async move { orch.start_first().await }
    });
    sleep(ms(1)).await;

    // Second start while the first holds the guard: silent no-op, no
    // second load issued.
    assert_eq!(orch.start_first().await, StartOutcome::AlreadyInFlight);
    assert_eq!(source.url_history().len(), 1);

    // The first request runs its course: load timeout, play, verify
    // timeout, reported as not advancing.
    assert_eq!(
        first.await.unwrap(),
        StartOutcome::Attempted(PlaybackAttemptResult::NotAdvanced)
    );
    assert_eq!(orch.state(), PlayerState::Stalled);
}

#[tokio::test(start_paused = true)]
async fn start_resumes_at_remembered_cursor() {
    let source = Arc::new(SimulatedMediaSource::new(scripted()));
    let orch = orchestrator_with(&source, vec![flat("A", "a.mp4"), flat("B", "b.mp4")]);

    orch.play_index(1).await;
    orch.start_first().await;
    assert_eq!(orch.current_index(), Some(1));
    assert_eq!(source.url_history(), vec!["b.mp4", "b.mp4"]);
}

#[tokio::test(start_paused = true)]
async fn start_consults_catalog_when_playlist_empty() {
    let source = Arc::new(SimulatedMediaSource::new(scripted()));
    let orch = Arc::new(
        PlaybackOrchestrator::new(source.clone(), PlaybackTunables::default()).with_catalog(
            Arc::new(StubCatalog {
                entries: vec![flat("A", "a.mp4")],
            }),
        ),
    );

    assert_eq!(
        orch.start_first().await,
        StartOutcome::Attempted(PlaybackAttemptResult::Started)
    );
    assert_eq!(orch.playlist_len(), 1);
    assert_eq!(orch.current_index(), Some(0));
}

#[tokio::test(start_paused = true)]
async fn start_without_content_reports_no_content() {
    let source = Arc::new(SimulatedMediaSource::new(SimBehavior::manual()));
    let orch = orchestrator_with(&source, Vec::new());
    let mut events = orch.subscribe();

    assert_eq!(orch.start_first().await, StartOutcome::NoContent);
    assert_eq!(orch.state(), PlayerState::Idle);

    let mut saw_catalog_empty = false;
    while let Ok(event) = events.try_recv() {
        if event == PlayerEvent::CatalogEmpty {
            saw_catalog_empty = true;
        }
    }
    assert!(saw_catalog_empty);
}

#[tokio::test(start_paused = true)]
async fn toggle_before_start_redirects_to_start() {
    let source = Arc::new(SimulatedMediaSource::new(scripted()));
    let orch = orchestrator_with(&source, vec![flat("A", "a.mp4")]);

    assert_eq!(
        orch.toggle_play_pause().await,
        ToggleOutcome::Redirected(StartOutcome::Attempted(PlaybackAttemptResult::Started))
    );
    assert_eq!(orch.state(), PlayerState::Playing);
}

#[tokio::test(start_paused = true)]
async fn pause_notifies_presentation_with_playing_flag() {
    let presenter = RecordingPresenter::new();
    let source = Arc::new(SimulatedMediaSource::new(scripted()));
    let orch = PlaybackOrchestrator::new(source.clone(), PlaybackTunables::default())
        .with_presentation(presenter.clone());
    orch.append_entries(vec![flat("Lobby", "lobby.mp4")]);

    orch.play_index(0).await;
    assert_eq!(orch.toggle_play_pause().await, ToggleOutcome::Paused);
    assert!(source.is_paused());
    assert_eq!(
        presenter.calls(),
        vec![("Lobby".to_string(), true), ("Lobby".to_string(), false)]
    );
}

#[tokio::test(start_paused = true)]
async fn media_faults_surface_with_reencode_hint() {
    let source = Arc::new(SimulatedMediaSource::new(SimBehavior::manual()));
    let orch = orchestrator_with(&source, Vec::new());
    let mut events = orch.subscribe();

    source.emit(MediaEvent::Error(MediaFault::Decode));
    sleep(ms(1)).await;

    assert_eq!(
        events.recv().await.unwrap(),
        PlayerEvent::MediaFault {
            fault: MediaFault::Decode,
            suggests_reencode: true,
        }
    );
}
