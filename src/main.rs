//! Packet replay monitor
//!
//! Feeds captured controller notifications through the decoder and logs the
//! resulting state. Input is hex-encoded packets, one per line, from a file
//! argument or stdin. Lines starting with `#` are comments. Stands in for
//! the display layer while no transport is attached.

use anyhow::{Context, Result};
use daydream_controller::domain::settings::SettingsService;
use daydream_controller::infrastructure::logging;
use daydream_controller::{AppEvent, ControllerState, NotificationFeed, QuerySurface};
use std::fs::File;
use std::io::{stdin, BufRead, BufReader};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = SettingsService::new()?;
    let _logging = logging::init_logger(&settings.get().log_settings)?;
    info!("Starting Daydream controller monitor");

    let state = Arc::new(ControllerState::new());
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (packets_tx, feed) = NotificationFeed::with_raw_logging(
        state.clone(),
        events_tx,
        settings.get().debug_raw_data_logging,
    );
    let feed_task = tokio::spawn(feed.run());

    let source = std::env::args().nth(1);
    let reader_task = tokio::task::spawn_blocking(move || read_packets(source, packets_tx));

    while let Some(event) = events_rx.recv().await {
        match event {
            AppEvent::ConnectionStatus(status) => info!("Connection status: {status:?}"),
            AppEvent::Snapshot(_) => {
                let query = QuerySurface::new(&state);
                info!(
                    "seq={:>2} ts={:>3} touchpad=({:>7.2}, {:>7.2}) \
                     click={} home={} app={} vol-={} vol+={}",
                    query.get_sequence(),
                    query.get_timestamp(),
                    query.get_touchpad_x(),
                    query.get_touchpad_y(),
                    query.get_button("click"),
                    query.get_button("home"),
                    query.get_button("app"),
                    query.get_button("volume down"),
                    query.get_button("volume up"),
                );
                info!(
                    "orientation=({:.3}, {:.3}, {:.3}) accel=({:.3}, {:.3}, {:.3}) \
                     gyro=({:.3}, {:.3}, {:.3})",
                    query.get_orientation("x"),
                    query.get_orientation("y"),
                    query.get_orientation("z"),
                    query.get_acceleration("x"),
                    query.get_acceleration("y"),
                    query.get_acceleration("z"),
                    query.get_gyro("x"),
                    query.get_gyro("y"),
                    query.get_gyro("z"),
                );
            }
        }
    }

    reader_task.await??;
    feed_task.await?;
    Ok(())
}

fn read_packets(source: Option<String>, packets: mpsc::UnboundedSender<Vec<u8>>) -> Result<()> {
    let reader: Box<dyn BufRead> = match source {
        Some(path) => Box::new(BufReader::new(
            File::open(&path).with_context(|| format!("opening {path}"))?,
        )),
        None => Box::new(BufReader::new(stdin())),
    };

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_hex_line(trimmed) {
            Some(bytes) => {
                if packets.send(bytes).is_err() {
                    break;
                }
            }
            None => warn!("Skipping unparseable line {}", number + 1),
        }
    }
    Ok(())
}

/// Parse a line of hex bytes, separated by whitespace or commas, with or
/// without `0x` prefixes.
fn parse_hex_line(line: &str) -> Option<Vec<u8>> {
    line.split([' ', '\t', ','])
        .filter(|token| !token.is_empty())
        .map(|token| {
            let token = token.strip_prefix("0x").unwrap_or(token);
            u8::from_str_radix(token, 16).ok()
        })
        .collect()
}
