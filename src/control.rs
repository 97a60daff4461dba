//! Control register group (`0x0E..=0x0F`).
//!
//! The control and control/status registers are plain bit flags, so the
//! packed layout is also the host layout. [`ControlValue`] holds both bytes
//! unchanged, including the three unused status bits, and exposes the flags
//! through the [`Control`] and [`Status`] bitfield accessors.

use crate::{Control, Status};

/// The control and control/status registers, transferred byte for byte.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlValue {
    /// Control register (`0x0E`)
    pub control: Control,
    /// Control/status register (`0x0F`)
    pub status: Status,
}

impl ControlValue {
    /// Number of register bytes in the control group.
    pub const LEN: usize = 2;
}

impl From<[u8; 2]> for ControlValue {
    fn from(data: [u8; 2]) -> Self {
        ControlValue {
            control: Control(data[0]),
            status: Status(data[1]),
        }
    }
}

impl From<&ControlValue> for [u8; 2] {
    fn from(value: &ControlValue) -> [u8; 2] {
        [value.control.0, value.status.0]
    }
}
