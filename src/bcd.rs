//! Binary-coded-decimal field helpers shared by the clock and alarm codecs.
//!
//! Every BCD field in the DS3231 register map is split into a ones digit in
//! bits 3:0 and a tens digit in a narrower range above it. The tens range is
//! different per register (3 bits for seconds, 2 bits for hours, 1 bit for the
//! month, ...), so the encoder here only produces the two digits and leaves the
//! masking to the register's bitfield setter.
//!
//! # Range handling
//!
//! [`encode_bcd_field`] never fails. A value whose tens digit does not fit in
//! the destination field loses its high bits when stored (for example 85
//! seconds is stored as `0x05`, i.e. 5 seconds). The driver's write operations
//! call [`crate::ClockValue::validate`] and the alarm equivalents first, so
//! this truncation is only reachable through the raw codec functions.

use core::ops::RangeInclusive;

/// Combines a tens digit and a ones digit into a decimal value.
///
/// No validation is performed; the inputs come from register fields that are
/// at most 4 bits wide.
pub const fn decode_bcd_field(tens: u8, ones: u8) -> u8 {
    tens.wrapping_mul(10).wrapping_add(ones)
}

/// Splits a decimal value into `(tens, ones)` digits.
pub const fn encode_bcd_field(value: u8) -> (u8, u8) {
    (value / 10, value % 10)
}

/// A host value that is outside the decimal range of its register field.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// Seconds must be 0-59
    Seconds(u8),
    /// Minutes must be 0-59
    Minutes(u8),
    /// Hours must be 0-23
    Hours(u8),
    /// Day of week must be 1-7
    Day(u8),
    /// Date of month must be 1-31
    Date(u8),
    /// Month must be 1-12
    Month(u8),
    /// Year must be 0-99
    Year(u8),
}

pub(crate) fn check(
    value: u8,
    range: RangeInclusive<u8>,
    error: fn(u8) -> RangeError,
) -> Result<(), RangeError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(error(value))
    }
}
