//! Telemetry packet decoding
//!
//! Turns one 20-byte notification from the controller into a
//! [`ControllerSnapshot`]. Decoding is pure and all-or-nothing: a short
//! buffer is rejected whole, anything else decodes.
//!
//! # Packet structure (20 bytes)
//!
//! ```text
//! [0-1]   : Timestamp (9 bits) and sequence counter (5 bits)
//! [1-3]   : Orientation X (13-bit signed)
//! [3-4]   : Orientation Y (13-bit signed)
//! [5-6]   : Orientation Z (13-bit signed)
//! [6-8]   : Acceleration X (13-bit signed)
//! [8-9]   : Acceleration Y (13-bit signed)
//! [9-11]  : Acceleration Z (13-bit signed)
//! [11-13] : Gyro X (13-bit signed)
//! [13-14] : Gyro Y (13-bit signed)
//! [14-16] : Gyro Z (13-bit signed)
//! [16-17] : Touchpad X (8 bits, 0 = left edge)
//! [17-18] : Touchpad Y (8 bits, 0 = top edge)
//! [18]    : Button mask (low 5 bits, see [`crate::protocol::buttons`])
//! [19]    : Unused
//! ```
//!
//! Touchpad Y shares byte 18 with the button mask: its low three bits come
//! from the same byte's high bits. That packing is part of the wire format
//! and is reproduced exactly.

use crate::domain::models::{ButtonState, ControllerSnapshot, TouchpadPosition, Vector3};
use crate::protocol::{buttons, scale, PACKET_LEN};
use thiserror::Error;

/// Decoding failure. The only way a packet can fail is by being short;
/// the protocol carries no checksum, so corrupt-but-full packets decode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("telemetry packet too short: {len} bytes (expected {PACKET_LEN})")]
    ShortPacket { len: usize },
}

/// Sign-extend a raw 13-bit field to a full `i32`.
///
/// The field's sign bit is shifted into the register's MSB, then shifted
/// back arithmetically. Values 0..=4095 stay non-negative, 4096..=8191 map
/// to -4096..=-1.
pub fn sign_extend_13(raw: u16) -> i32 {
    ((raw as i32) << 19) >> 19
}

/// Linearly rescale `value` from `[min_in, max_in]` to `[min_out, max_out]`.
///
/// No clamping: out-of-domain input yields out-of-range output.
pub fn range_map(value: f64, min_in: f64, max_in: f64, min_out: f64, max_out: f64) -> f64 {
    (value - min_in) / (max_in - min_in) * (max_out - min_out) + min_out
}

/// Decode one notification packet into a complete snapshot.
///
/// Buffers shorter than [`PACKET_LEN`] fail with [`DecodeError::ShortPacket`];
/// longer buffers are decoded from their first 20 bytes.
pub fn decode_packet(data: &[u8]) -> Result<ControllerSnapshot, DecodeError> {
    if data.len() < PACKET_LEN {
        return Err(DecodeError::ShortPacket { len: data.len() });
    }

    let mut raw = [0u8; PACKET_LEN];
    raw.copy_from_slice(&data[..PACKET_LEN]);
    let b = |i: usize| raw[i] as u16;

    let buttons = ButtonState::from_mask(raw[18]);

    let timestamp = (b(0) << 1) | ((b(1) & 0x80) >> 7);
    let sequence = ((raw[1] & 0x7C) >> 2) as u8;

    // Nine 13-bit signed sensor fields, packed back to back across bytes
    // 1..=16 of the packet.
    let orientation = Vector3 {
        x: sign_extend_13((b(1) & 0x03) << 11 | b(2) << 3 | (b(3) & 0xE0) >> 5) as f64,
        y: sign_extend_13((b(3) & 0x1F) << 8 | b(4)) as f64,
        z: sign_extend_13(b(5) << 5 | (b(6) & 0xF8) >> 3) as f64,
    };
    let acceleration = Vector3 {
        x: sign_extend_13((b(6) & 0x07) << 10 | b(7) << 2 | (b(8) & 0xC0) >> 6) as f64,
        y: sign_extend_13((b(8) & 0x3F) << 7 | (b(9) & 0xFE) >> 1) as f64,
        z: sign_extend_13((b(9) & 0x01) << 12 | b(10) << 4 | (b(11) & 0xF0) >> 4) as f64,
    };
    let gyro = Vector3 {
        x: sign_extend_13((b(11) & 0x0F) << 9 | b(12) << 1 | (b(13) & 0x80) >> 7) as f64,
        y: sign_extend_13((b(13) & 0x7F) << 6 | (b(14) & 0xFC) >> 2) as f64,
        z: sign_extend_13((b(14) & 0x03) << 11 | b(15) << 3 | (b(16) & 0xE0) >> 5) as f64,
    };

    // Touchpad bytes normalize to [0, 1]; the stored form is the mapped
    // [-100, 100] range, with the raw form derived on demand. Touchpad Y
    // deliberately re-reads the high bits of the button byte.
    let raw_x = ((b(16) & 0x1F) << 3 | (b(17) & 0xE0) >> 5) as f64 / 255.0;
    let raw_y = ((b(17) & 0x1F) << 3 | (b(18) & 0xE0) >> 5) as f64 / 255.0;
    let touchpad = TouchpadPosition {
        x: range_map(raw_x, 0.0, 1.0, -100.0, 100.0),
        y: range_map(raw_y, 0.0, 1.0, -100.0, 100.0),
    };

    // Unit conversion. Orientation X and Y are negated to match the
    // consuming coordinate convention; Z is not.
    let orientation = Vector3 {
        x: -(orientation.x * scale::ORIENTATION),
        y: -(orientation.y * scale::ORIENTATION),
        z: orientation.z * scale::ORIENTATION,
    };
    let acceleration = acceleration.scaled(scale::ACCELERATION);
    let gyro = gyro.scaled(scale::GYRO);

    Ok(ControllerSnapshot {
        buttons,
        orientation,
        acceleration,
        gyro,
        touchpad,
        sequence,
        timestamp,
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet() -> [u8; 20] {
        [0u8; 20]
    }

    #[test]
    fn sign_extension_boundaries() {
        assert_eq!(sign_extend_13(0), 0);
        assert_eq!(sign_extend_13(4095), 4095);
        assert_eq!(sign_extend_13(4096), -4096);
        assert_eq!(sign_extend_13(8191), -1);
    }

    #[test]
    fn range_map_round_trips() {
        for i in 0..=20 {
            let v = i as f64 / 20.0;
            let mapped = range_map(v, 0.0, 1.0, -100.0, 100.0);
            let back = range_map(mapped, -100.0, 100.0, 0.0, 1.0);
            assert!((back - v).abs() < 1e-12, "v={v} back={back}");
        }
    }

    #[test]
    fn range_map_does_not_clamp() {
        assert_eq!(range_map(2.0, 0.0, 1.0, -100.0, 100.0), 300.0);
    }

    #[test]
    fn short_packet_rejected() {
        let err = decode_packet(&[0u8; 19]).unwrap_err();
        assert_eq!(err, DecodeError::ShortPacket { len: 19 });
        assert!(decode_packet(&[]).is_err());
        assert!(decode_packet(&[0u8; 20]).is_ok());
    }

    #[test]
    fn header_fields() {
        let mut data = packet();
        data[0] = 0x01;
        data[1] = 0x02;
        let snap = decode_packet(&data).unwrap();
        assert_eq!(snap.timestamp, 2);
        assert_eq!(snap.sequence, 0);

        // Timestamp borrows the top bit of byte 1; sequence sits below it.
        data[1] = 0x80 | 0x7C;
        let snap = decode_packet(&data).unwrap();
        assert_eq!(snap.timestamp, 3);
        assert_eq!(snap.sequence, 31);
    }

    #[test]
    fn button_bits_are_independent() {
        for mask in 0u8..32 {
            let mut data = packet();
            // Noise in the high bits must not leak into the button state.
            data[18] = mask | 0xE0;
            let snap = decode_packet(&data).unwrap();
            assert_eq!(snap.buttons.click, mask & 0x01 != 0);
            assert_eq!(snap.buttons.home, mask & 0x02 != 0);
            assert_eq!(snap.buttons.app, mask & 0x04 != 0);
            assert_eq!(snap.buttons.volume_down, mask & 0x08 != 0);
            assert_eq!(snap.buttons.volume_up, mask & 0x10 != 0);
        }
    }

    #[test]
    fn orientation_is_scaled_and_negated() {
        // orientation.x = +4095 raw: top bits 01 in byte 1, middle 0xFF,
        // low three bits in the high bits of byte 3.
        let mut data = packet();
        data[1] = 0x01;
        data[2] = 0xFF;
        data[3] = 0xE0;
        let snap = decode_packet(&data).unwrap();
        let expected = -(4095.0 * (2.0 * std::f64::consts::PI / 4095.0));
        assert!((snap.orientation.x - expected).abs() < 1e-9);
        assert_eq!(snap.orientation.y, 0.0);
        assert_eq!(snap.orientation.z, 0.0);
    }

    #[test]
    fn acceleration_handles_negative_extremes() {
        // acceleration.y = raw 4096, the most negative encodable value.
        let mut data = packet();
        data[8] = 0x20;
        let snap = decode_packet(&data).unwrap();
        let expected = -4096.0 * (8.0 * 9.8 / 4095.0);
        assert!((snap.acceleration.y - expected).abs() < 1e-9);
    }

    #[test]
    fn gyro_scale_applied() {
        // gyro.y = raw 1: lowest bit lands in byte 14's bit 2.
        let mut data = packet();
        data[14] = 0x04;
        let snap = decode_packet(&data).unwrap();
        let expected = 2048.0 / 180.0 * std::f64::consts::PI / 4095.0;
        assert!((snap.gyro.y - expected).abs() < 1e-12);
    }

    #[test]
    fn touchpad_full_scale() {
        let mut data = packet();
        data[16] = 0x1F;
        data[17] = 0xE0;
        let snap = decode_packet(&data).unwrap();
        assert!((snap.touchpad.x - 100.0).abs() < 1e-9);
        assert!((snap.touchpad.x_raw() - 1.0).abs() < 1e-9);
        // Y saw only zero bits.
        assert_eq!(snap.touchpad.y, -100.0);
    }

    #[test]
    fn touchpad_y_reads_button_byte_high_bits() {
        let mut data = packet();
        data[18] = 0xE0;
        let snap = decode_packet(&data).unwrap();
        // Low three bits of the y coordinate come from byte 18.
        assert!((snap.touchpad.y_raw() - 7.0 / 255.0).abs() < 1e-9);
        // And none of the buttons read as pressed.
        assert_eq!(snap.buttons, ButtonState::default());
    }

    #[test]
    fn click_and_app_end_to_end() {
        let mut data = packet();
        data[18] = 0x05;
        let snap = decode_packet(&data).unwrap();
        assert!(snap.buttons.click);
        assert!(snap.buttons.app);
        assert!(!snap.buttons.home);
        assert!(!snap.buttons.volume_down);
        assert!(!snap.buttons.volume_up);
        assert_eq!(snap.touchpad.x, -100.0);
        assert_eq!(snap.orientation, Vector3::default());
        assert_eq!(snap.acceleration, Vector3::default());
        assert_eq!(snap.gyro, Vector3::default());
    }

    #[test]
    fn decode_is_deterministic() {
        let data: Vec<u8> = (0u8..20).map(|i| i.wrapping_mul(37).wrapping_add(11)).collect();
        let first = decode_packet(&data).unwrap();
        let second = decode_packet(&data).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn raw_bytes_kept_verbatim() {
        let mut data = vec![0u8; 24];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = i as u8;
        }
        let snap = decode_packet(&data).unwrap();
        assert_eq!(&snap.raw[..], &data[..20]);
    }
}
