//! String-keyed query surface
//!
//! The block/display layer addresses the controller with string names
//! ("volume down", "x"). Unknown names are not errors: booleans fall back
//! to `false` and numerics to `0.0`, matching the behavior the block
//! interface has always had.

use crate::domain::models::{Axis, Button};
use crate::domain::state::ControllerState;

pub struct QuerySurface<'a> {
    state: &'a ControllerState,
}

impl<'a> QuerySurface<'a> {
    pub fn new(state: &'a ControllerState) -> Self {
        Self { state }
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// `name` is one of "click", "home", "app", "volume down", "volume up".
    pub fn get_button(&self, name: &str) -> bool {
        Button::from_name(name)
            .map(|button| self.state.button(button))
            .unwrap_or(false)
    }

    pub fn get_touchpad_x(&self) -> f64 {
        self.state.touchpad_x()
    }

    pub fn get_touchpad_y(&self) -> f64 {
        self.state.touchpad_y()
    }

    pub fn get_touchpad_x_raw(&self) -> f64 {
        self.state.touchpad_x_raw()
    }

    pub fn get_touchpad_y_raw(&self) -> f64 {
        self.state.touchpad_y_raw()
    }

    pub fn get_orientation(&self, axis: &str) -> f64 {
        self.axis_value(axis, |axis| self.state.orientation(axis))
    }

    pub fn get_acceleration(&self, axis: &str) -> f64 {
        self.axis_value(axis, |axis| self.state.acceleration(axis))
    }

    pub fn get_gyro(&self, axis: &str) -> f64 {
        self.axis_value(axis, |axis| self.state.gyro(axis))
    }

    pub fn get_sequence(&self) -> u8 {
        self.state.sequence()
    }

    pub fn get_timestamp(&self) -> u16 {
        self.state.timestamp()
    }

    /// Indices outside 0..=19 yield 0.
    pub fn get_raw_byte(&self, index: i64) -> u8 {
        usize::try_from(index)
            .map(|index| self.state.raw_byte(index))
            .unwrap_or(0)
    }

    pub fn reset_orientation(&self) {
        self.state.reset_orientation();
    }

    fn axis_value(&self, name: &str, read: impl Fn(Axis) -> f64) -> f64 {
        Axis::from_name(name).map(read).unwrap_or(0.0)
    }
}
