//! LinnStrument LED editor
//!
//! Lights the LinnStrument play surface with a 19-EDO layout and stores it in
//! custom light pattern slot A#. Takes no arguments; the layout is built in.
//! Set RUST_LOG=debug to see the layout grid and every MIDI message.

use anyhow::Context;
use linnled_midi::{program_device, LayoutConfig, MidirTransport, Progress};

fn main() -> anyhow::Result<()> {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("LinnStrument LED editor - v {}", env!("CARGO_PKG_VERSION"));
    println!("---");

    let config = LayoutConfig::default();
    match serde_yaml::to_string(&config) {
        Ok(yaml) => log::debug!("Layout config:\n{}", yaml),
        Err(e) => log::warn!("Could not render layout config: {}", e),
    }

    let transport = MidirTransport::new();
    let summary = program_device(&transport, &config, |progress| match progress {
        Progress::Opening { port } => println!("Opening {}...", port),
        Progress::Connected => println!("Success!"),
        Progress::Painted(painted) => log::info!("Colored {} pads", painted.pads),
        Progress::Saved(slot) => log::info!("Layout saved to slot {}", slot),
    })
    .context("Failed to program LinnStrument LEDs")?;

    log::info!(
        "Done: {} pads, {} MIDI messages",
        summary.pads,
        summary.messages
    );
    Ok(())
}
