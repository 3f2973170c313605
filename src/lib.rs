//! Telemetry decoding and state tracking for the Google Daydream controller.
//!
//! The controller streams 20-byte notification packets over BLE. This crate
//! decodes them into typed snapshots (buttons, touchpad, orientation,
//! acceleration, gyro, sequence, timestamp) and publishes the latest
//! snapshot for the display layer to query. Device discovery, pairing, and
//! the GATT subscription itself belong to an external transport; its
//! contract with this crate is "deliver byte buffers into the notification
//! feed".
//!
//! ## Modules
//!
//! - [`protocol`] - wire constants and the packet decoder
//! - [`domain`] - snapshot types, published state, settings
//! - [`infrastructure`] - notification feed and logging setup
//! - [`presentation`] - string-keyed query surface for the block interface

pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod protocol;

pub use domain::models::{
    AppEvent, Axis, Button, ButtonState, ConnectionStatus, ControllerSnapshot, TouchpadPosition,
    Vector3,
};
pub use domain::state::ControllerState;
pub use infrastructure::feed::NotificationFeed;
pub use presentation::query::QuerySurface;
pub use protocol::decode::{decode_packet, DecodeError};
