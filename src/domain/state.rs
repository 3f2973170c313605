//! Published controller state
//!
//! Single-writer, multi-reader holder for the latest decoded snapshot. The
//! writer swaps in a whole `Arc<ControllerSnapshot>`; readers clone the
//! `Arc`, so a reader racing a decode sees either the old snapshot or the
//! new one, never a half-written mix.

use crate::domain::models::{Axis, Button, ControllerSnapshot, Vector3};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub struct ControllerState {
    snapshot: Mutex<Arc<ControllerSnapshot>>,
    connected: AtomicBool,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerState {
    /// All-zero state, as at connection time.
    pub fn new() -> Self {
        Self {
            snapshot: Mutex::new(Arc::new(ControllerSnapshot::default())),
            connected: AtomicBool::new(false),
        }
    }

    /// Latest snapshot. Cheap: clones the `Arc`, not the data.
    pub fn snapshot(&self) -> Arc<ControllerSnapshot> {
        self.snapshot.lock().unwrap().clone()
    }

    /// Replace the published snapshot wholesale.
    pub fn publish(&self, snapshot: ControllerSnapshot) {
        *self.snapshot.lock().unwrap() = Arc::new(snapshot);
    }

    /// Back to the all-zero snapshot, as on disconnect.
    pub fn reset(&self) {
        self.publish(ControllerSnapshot::default());
    }

    /// Zero the stored orientation vector. Every other field, including the
    /// raw packet copy, is left as decoded.
    pub fn reset_orientation(&self) {
        let mut guard = self.snapshot.lock().unwrap();
        let mut snapshot = (**guard).clone();
        snapshot.orientation = Vector3::default();
        *guard = Arc::new(snapshot);
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn button(&self, button: Button) -> bool {
        self.snapshot().buttons.get(button)
    }

    /// Touchpad X in [-100, 100].
    pub fn touchpad_x(&self) -> f64 {
        self.snapshot().touchpad.x
    }

    /// Touchpad Y in [-100, 100].
    pub fn touchpad_y(&self) -> f64 {
        self.snapshot().touchpad.y
    }

    /// Touchpad X in [0, 1], derived from the stored form.
    pub fn touchpad_x_raw(&self) -> f64 {
        self.snapshot().touchpad.x_raw()
    }

    /// Touchpad Y in [0, 1], derived from the stored form.
    pub fn touchpad_y_raw(&self) -> f64 {
        self.snapshot().touchpad.y_raw()
    }

    /// Orientation in radians.
    pub fn orientation(&self, axis: Axis) -> f64 {
        self.snapshot().orientation.axis(axis)
    }

    /// Acceleration in m/s^2.
    pub fn acceleration(&self, axis: Axis) -> f64 {
        self.snapshot().acceleration.axis(axis)
    }

    /// Angular velocity in rad/s.
    pub fn gyro(&self, axis: Axis) -> f64 {
        self.snapshot().gyro.axis(axis)
    }

    /// 5-bit sequence counter of the last packet.
    pub fn sequence(&self) -> u8 {
        self.snapshot().sequence
    }

    /// 9-bit device timestamp of the last packet.
    pub fn timestamp(&self) -> u16 {
        self.snapshot().timestamp
    }

    /// One byte of the last raw packet; out-of-range indices yield 0.
    pub fn raw_byte(&self, index: usize) -> u8 {
        self.snapshot().raw.get(index).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode::decode_packet;

    fn populated_state() -> ControllerState {
        let mut data = [0u8; 20];
        data[0] = 0x01;
        data[1] = 0x9F; // timestamp low bit, sequence bits, orientation.x high bits
        data[12] = 0x40;
        data[18] = 0x13;
        data[19] = 0xAB;
        let state = ControllerState::new();
        state.publish(decode_packet(&data).unwrap());
        state
    }

    #[test]
    fn starts_zeroed_and_disconnected() {
        let state = ControllerState::new();
        assert!(!state.is_connected());
        assert_eq!(state.sequence(), 0);
        assert_eq!(state.timestamp(), 0);
        // Before the first packet the stored touchpad value is plain zero;
        // -100 only shows up once an all-zero packet has been decoded.
        assert_eq!(state.touchpad_x(), 0.0);
        assert_eq!(state.touchpad_y(), 0.0);
        assert!(!state.button(Button::Home));
    }

    #[test]
    fn publish_replaces_whole_snapshot() {
        let state = populated_state();
        assert!(state.button(Button::Click));
        assert!(state.button(Button::Home));
        assert!(state.button(Button::VolumeUp));
        assert!(!state.button(Button::App));
        assert_eq!(state.timestamp(), 3);
        assert_eq!(state.sequence(), 7);

        state.reset();
        assert_eq!(*state.snapshot(), ControllerSnapshot::default());
    }

    #[test]
    fn reset_orientation_leaves_other_fields() {
        let state = populated_state();
        let before = state.snapshot();
        assert_ne!(state.orientation(Axis::X), 0.0);
        assert_ne!(state.gyro(Axis::X), 0.0);

        state.reset_orientation();
        assert_eq!(state.orientation(Axis::X), 0.0);
        assert_eq!(state.orientation(Axis::Y), 0.0);
        assert_eq!(state.orientation(Axis::Z), 0.0);
        assert_eq!(state.gyro(Axis::X), before.gyro.x);
        assert_eq!(state.sequence(), before.sequence);
        assert_eq!(state.timestamp(), before.timestamp);
        assert_eq!(state.snapshot().raw, before.raw);
    }

    #[test]
    fn raw_byte_bounds() {
        let state = populated_state();
        assert_eq!(state.raw_byte(19), 0xAB);
        assert_eq!(state.raw_byte(20), 0);
        assert_eq!(state.raw_byte(25), 0);
    }

    #[test]
    fn readers_share_the_published_arc() {
        let state = populated_state();
        let a = state.snapshot();
        let b = state.snapshot();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
