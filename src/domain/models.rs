use crate::protocol::buttons;
use crate::protocol::decode::range_map;

/// One axis of a three-component sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Case-insensitive lookup used by the string query surface.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "x" => Some(Self::X),
            "y" => Some(Self::Y),
            "z" => Some(Self::Z),
            _ => None,
        }
    }
}

/// The five physical buttons on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Click,
    Home,
    App,
    VolumeDown,
    VolumeUp,
}

impl Button {
    /// Lookup by the literal names the query layer exposes.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "click" => Some(Self::Click),
            "home" => Some(Self::Home),
            "app" => Some(Self::App),
            "volume down" => Some(Self::VolumeDown),
            "volume up" => Some(Self::VolumeUp),
            _ => None,
        }
    }
}

/// Momentary state of all five buttons, rebuilt on every decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    pub click: bool,
    pub home: bool,
    pub app: bool,
    pub volume_down: bool,
    pub volume_up: bool,
}

impl ButtonState {
    /// Split the packet's button byte into independent booleans.
    pub fn from_mask(mask: u8) -> Self {
        Self {
            click: mask & buttons::CLICK != 0,
            home: mask & buttons::HOME != 0,
            app: mask & buttons::APP != 0,
            volume_down: mask & buttons::VOLUME_DOWN != 0,
            volume_up: mask & buttons::VOLUME_UP != 0,
        }
    }

    pub fn get(&self, button: Button) -> bool {
        match button {
            Button::Click => self.click,
            Button::Home => self.home,
            Button::App => self.app,
            Button::VolumeDown => self.volume_down,
            Button::VolumeUp => self.volume_up,
        }
    }
}

/// Three-component sensor reading. Orientation, acceleration, and gyro all
/// share this shape but carry different units; they are not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }
}

/// Touchpad coordinates, stored in the mapped [-100, 100] range.
///
/// The normalized [0, 1] form is always derived from the stored one, never
/// cached, so the two representations cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchpadPosition {
    pub x: f64,
    pub y: f64,
}

impl TouchpadPosition {
    pub fn x_raw(&self) -> f64 {
        range_map(self.x, -100.0, 100.0, 0.0, 1.0)
    }

    pub fn y_raw(&self) -> f64 {
        range_map(self.y, -100.0, 100.0, 0.0, 1.0)
    }
}

/// Fully decoded state of the controller after one notification.
///
/// `raw` keeps the verbatim packet bytes for byte-level inspection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControllerSnapshot {
    pub buttons: ButtonState,
    pub orientation: Vector3,
    pub acceleration: Vector3,
    pub gyro: Vector3,
    pub touchpad: TouchpadPosition,
    /// 5-bit counter, wraps at 32.
    pub sequence: u8,
    /// 9-bit free-running device clock, wraps at 512.
    pub timestamp: u16,
    pub raw: [u8; crate::protocol::PACKET_LEN],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Events the notification feed emits towards the display layer.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Snapshot(ControllerSnapshot),
    ConnectionStatus(ConnectionStatus),
}
