//! Notification feed
//!
//! The seam between the external BLE transport and the decoder. The
//! transport (or a replay tool) pushes raw notification buffers into an
//! unbounded channel; the feed decodes each one, publishes the snapshot,
//! and forwards it as an [`AppEvent`] for the display layer.
//!
//! Decoding happens on the feed task only, so the published state has a
//! single writer no matter how the transport delivers notifications.

use crate::domain::models::{AppEvent, ConnectionStatus};
use crate::domain::state::ControllerState;
use crate::protocol::decode::decode_packet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

pub struct NotificationFeed {
    packets: mpsc::UnboundedReceiver<Vec<u8>>,
    state: Arc<ControllerState>,
    events: mpsc::UnboundedSender<AppEvent>,
    log_raw_packets: bool,
}

impl NotificationFeed {
    /// Returns the sender half the transport writes packets into, plus the
    /// feed to spawn.
    pub fn new(
        state: Arc<ControllerState>,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> (mpsc::UnboundedSender<Vec<u8>>, Self) {
        Self::with_raw_logging(state, events, false)
    }

    pub fn with_raw_logging(
        state: Arc<ControllerState>,
        events: mpsc::UnboundedSender<AppEvent>,
        log_raw_packets: bool,
    ) -> (mpsc::UnboundedSender<Vec<u8>>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let feed = Self {
            packets: rx,
            state,
            events,
            log_raw_packets,
        };
        (tx, feed)
    }

    /// Consume packets until the transport drops its sender. On exit the
    /// state is marked disconnected and zeroed.
    pub async fn run(mut self) {
        self.state.set_connected(true);
        let _ = self
            .events
            .send(AppEvent::ConnectionStatus(ConnectionStatus::Connected));
        info!("Notification feed started");

        while let Some(bytes) = self.packets.recv().await {
            if self.log_raw_packets {
                trace!("Raw packet: {:02X?}", bytes);
            }
            match decode_packet(&bytes) {
                Ok(snapshot) => {
                    self.state.publish(snapshot.clone());
                    let _ = self.events.send(AppEvent::Snapshot(snapshot));
                }
                // Prior state stays published.
                Err(err) => debug!("Dropping notification: {err}"),
            }
        }

        self.state.set_connected(false);
        self.state.reset();
        let _ = self
            .events
            .send(AppEvent::ConnectionStatus(ConnectionStatus::Disconnected));
        info!("Notification feed closed");
    }
}
