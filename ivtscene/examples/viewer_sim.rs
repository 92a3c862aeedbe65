// examples/viewer_sim.rs
//
// End-to-end walkthrough of the playback pipeline against the scripted
// media source:
//  - playlist with flat and panoramic entries
//  - start / next / toggle driven from code
//  - `GeometryPresenter` showing which surface each entry lands on
//
// Run (from the ivtscene crate root):
//   cargo run --example viewer_sim

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ivtmedia::{SimBehavior, SimulatedMediaSource};
use ivtplaylist::{PlaylistEntry, ProjectionMode};
use ivtplayback::{PlaybackOrchestrator, PlaybackTunables, PlayerEvent};
use ivtscene::GeometryPresenter;
use tokio::time::sleep;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let source = Arc::new(SimulatedMediaSource::new(SimBehavior::default()));
    let presenter = Arc::new(GeometryPresenter::new());
    let orchestrator = Arc::new(
        PlaybackOrchestrator::new(source, PlaybackTunables::default())
            .with_presentation(presenter.clone()),
    );
    orchestrator.append_entries(vec![
        PlaylistEntry::new("Lobby", "lobby.mp4", ProjectionMode::Flat),
        PlaylistEntry::new("Rooftop 360", "rooftop_360.mp4", ProjectionMode::Panoramic),
        PlaylistEntry::new("Garden", "garden.mp4", ProjectionMode::Flat),
    ]);

    // Print the event stream in the background.
    let mut events = orchestrator.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                PlayerEvent::EntryStarted { index, total, title, mode } => {
                    println!("▶ {}/{}: {} ({:?})", index + 1, total, title, mode);
                }
                other => println!("  {other:?}"),
            }
        }
    });

    println!("starting first entry...");
    let outcome = orchestrator.start_first().await;
    println!("start outcome: {outcome:?}");
    println!("sphere active: {}", presenter.sphere_active());

    sleep(Duration::from_millis(300)).await;

    println!("advancing to the panorama...");
    orchestrator.next().await;
    println!("sphere active: {}", presenter.sphere_active());

    sleep(Duration::from_millis(300)).await;

    println!("toggling pause...");
    orchestrator.toggle_play_pause().await;
    let surface = presenter.active().expect("a surface is active");
    println!("paused on '{}', playing = {}", surface.title, surface.playing);

    Ok(())
}
