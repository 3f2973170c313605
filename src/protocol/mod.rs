//! Daydream Controller Protocol
//!
//! Protocol definitions for the Google Daydream controller: the BLE
//! identifiers its telemetry arrives on and the constants governing the
//! 20-byte notification packet. Connection and subscription are handled by
//! an external transport; this crate only documents what it expects to be
//! handed and decodes it.

pub mod decode;

/// Daydream BLE service UUID
pub const SERVICE_UUID: &str = "0000fe55-0000-1000-8000-00805f9b34fb";

/// Telemetry characteristic UUID - sensor notifications arrive here
pub const DATA_CHAR_UUID: &str = "00000001-1000-1000-8000-00805f9b34fb";

/// Client characteristic configuration descriptor UUID
pub const CCC_DESCRIPTOR_UUID: &str = "00002902-0000-1000-8000-00805f9b34fb";

/// Value the transport writes to the CCC descriptor to enable notifications
pub const ENABLE_NOTIFICATIONS: [u8; 2] = [0x01, 0x00];

/// Length of one telemetry notification packet
pub const PACKET_LEN: usize = 20;

/// Button bit masks within byte 18 of the packet
pub mod buttons {
    pub const CLICK: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const APP: u8 = 0x04;
    pub const VOLUME_DOWN: u8 = 0x08;
    pub const VOLUME_UP: u8 = 0x10;
}

/// Sensor scale factors
///
/// Raw 13-bit readings span -4096..=4095. These multipliers convert them to
/// standard units and are part of the wire contract; downstream consumers
/// depend on the exact values.
pub mod scale {
    use std::f64::consts::PI;

    /// Orientation: raw units -> radians
    pub const ORIENTATION: f64 = 2.0 * PI / 4095.0;
    /// Acceleration: raw units -> m/s^2 (+/-8 g range, g = 9.8)
    pub const ACCELERATION: f64 = 8.0 * 9.8 / 4095.0;
    /// Gyroscope: raw units -> radians/second
    pub const GYRO: f64 = 2048.0 / 180.0 * PI / 4095.0;
}
