// examples/fetch_manifest.rs
//
// Fetches a tours manifest and prints the detected entries.
//
// Run (from the ivtplaylist crate root):
//   cargo run --example fetch_manifest -- https://example.com/tours.json

use anyhow::Result;
use ivtplaylist::{ManifestSource, PlaylistSource};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let url = env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8000/tours.json".to_string());

    let entries = ManifestSource::new(&url).fetch_entries().await?;
    if entries.is_empty() {
        println!("manifest at {url} lists no videos");
        return Ok(());
    }

    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}. {} [{:?}] -> {}",
            i + 1,
            entry.title,
            entry.mode,
            entry.source_url()
        );
    }
    Ok(())
}
