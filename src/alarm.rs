//! Alarm register codec for the DS3231 RTC.
//!
//! The DS3231 has two alarms with different register groups:
//!
//! - Alarm 1, 4 registers at `0x07`: seconds, minutes, hours, date
//! - Alarm 2, 3 registers at `0x0B`: minutes, hours, date (no seconds)
//!
//! Each register carries a mask bit in bit 7 (`AxM1`..`AxM4`). A set mask bit
//! means the field is not compared when the device matches the alarm. Both
//! alarms are presented to the host as the same [`AlarmValue`] shape; for
//! alarm 2, `m1` and `seconds` read back as zero and are dropped on write.
//!
//! Only the raw fields are transferred. Alarm interrupt enables and flags live
//! in the control group (see [`crate::ControlValue`]).

use crate::bcd::{check, decode_bcd_field, encode_bcd_field, RangeError};
use crate::{AlarmDayDate, AlarmHours, AlarmMinutes, AlarmSeconds};

/// Host representation of an alarm register group.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmValue {
    /// Ignore seconds when matching (alarm 1 only)
    pub m1: bool,
    /// Seconds (0-59, alarm 1 only)
    pub seconds: u8,
    /// Ignore minutes when matching
    pub m2: bool,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Ignore hours when matching
    pub m3: bool,
    /// Hours (0-23)
    pub hours: u8,
    /// Ignore date when matching
    pub m4: bool,
    /// Date of month (1-31, 0 allowed when `m4` is set)
    pub date: u8,
}

impl AlarmValue {
    /// Checks the fields stored by alarm 1.
    ///
    /// # Errors
    ///
    /// Returns the first field found out of range, in register order.
    pub fn validate_alarm1(&self) -> Result<(), RangeError> {
        check(self.seconds, 0..=59, RangeError::Seconds)?;
        self.validate_alarm2()
    }

    /// Checks the fields stored by alarm 2. `m1` and `seconds` are ignored.
    ///
    /// # Errors
    ///
    /// Returns the first field found out of range, in register order.
    pub fn validate_alarm2(&self) -> Result<(), RangeError> {
        check(self.minutes, 0..=59, RangeError::Minutes)?;
        check(self.hours, 0..=23, RangeError::Hours)?;
        let first_date = if self.m4 { 0 } else { 1 };
        check(self.date, first_date..=31, RangeError::Date)
    }
}

/// Packed alarm 1 registers `0x07..=0x0A`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PackedAlarm1Registers {
    pub seconds: AlarmSeconds,
    pub minutes: AlarmMinutes,
    pub hours: AlarmHours,
    pub day_date: AlarmDayDate,
}

impl PackedAlarm1Registers {
    /// Number of register bytes in the alarm 1 group.
    pub const LEN: usize = 4;
}

impl From<[u8; 4]> for PackedAlarm1Registers {
    fn from(data: [u8; 4]) -> Self {
        PackedAlarm1Registers {
            seconds: AlarmSeconds(data[0]),
            minutes: AlarmMinutes(data[1]),
            hours: AlarmHours(data[2]),
            day_date: AlarmDayDate(data[3]),
        }
    }
}

impl From<&PackedAlarm1Registers> for [u8; 4] {
    fn from(packed: &PackedAlarm1Registers) -> [u8; 4] {
        [
            packed.seconds.0,
            packed.minutes.0,
            packed.hours.0,
            packed.day_date.0,
        ]
    }
}

/// Packed alarm 2 registers `0x0B..=0x0D`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PackedAlarm2Registers {
    pub minutes: AlarmMinutes,
    pub hours: AlarmHours,
    pub day_date: AlarmDayDate,
}

impl PackedAlarm2Registers {
    /// Number of register bytes in the alarm 2 group.
    pub const LEN: usize = 3;
}

impl From<[u8; 3]> for PackedAlarm2Registers {
    fn from(data: [u8; 3]) -> Self {
        PackedAlarm2Registers {
            minutes: AlarmMinutes(data[0]),
            hours: AlarmHours(data[1]),
            day_date: AlarmDayDate(data[2]),
        }
    }
}

impl From<&PackedAlarm2Registers> for [u8; 3] {
    fn from(packed: &PackedAlarm2Registers) -> [u8; 3] {
        [packed.minutes.0, packed.hours.0, packed.day_date.0]
    }
}

// The minutes/hours/date registers are laid out the same for both alarms.

fn decode_minutes(minutes: AlarmMinutes) -> (bool, u8) {
    (
        minutes.alarm_mask2(),
        decode_bcd_field(minutes.ten_minutes(), minutes.minutes()),
    )
}

fn decode_hours(hours: AlarmHours) -> (bool, u8) {
    (
        hours.alarm_mask3(),
        decode_bcd_field(hours.ten_hours(), hours.hours()),
    )
}

fn decode_day_date(day_date: AlarmDayDate) -> (bool, u8) {
    (
        day_date.alarm_mask4(),
        decode_bcd_field(day_date.ten_date(), day_date.date()),
    )
}

fn encode_minutes(alarm: &AlarmValue) -> AlarmMinutes {
    let (tens, ones) = encode_bcd_field(alarm.minutes);
    let mut value = AlarmMinutes::default();
    value.set_alarm_mask2(alarm.m2);
    value.set_ten_minutes(tens);
    value.set_minutes(ones);
    value
}

fn encode_hours(alarm: &AlarmValue) -> AlarmHours {
    let (tens, ones) = encode_bcd_field(alarm.hours);
    let mut value = AlarmHours::default();
    value.set_alarm_mask3(alarm.m3);
    value.set_ten_hours(tens);
    value.set_hours(ones);
    value
}

fn encode_day_date(alarm: &AlarmValue) -> AlarmDayDate {
    let (tens, ones) = encode_bcd_field(alarm.date);
    let mut value = AlarmDayDate::default();
    value.set_alarm_mask4(alarm.m4);
    value.set_ten_date(tens);
    value.set_date(ones);
    value
}

/// Decodes the packed alarm 1 registers.
pub fn decode_alarm1(packed: &PackedAlarm1Registers) -> AlarmValue {
    let (m2, minutes) = decode_minutes(packed.minutes);
    let (m3, hours) = decode_hours(packed.hours);
    let (m4, date) = decode_day_date(packed.day_date);
    AlarmValue {
        m1: packed.seconds.alarm_mask1(),
        seconds: decode_bcd_field(packed.seconds.ten_seconds(), packed.seconds.seconds()),
        m2,
        minutes,
        m3,
        hours,
        m4,
        date,
    }
}

/// Encodes an alarm into the alarm 1 registers.
///
/// Reserved bits are zero and tens digits are cut to their field width.
pub fn encode_alarm1(alarm: &AlarmValue) -> PackedAlarm1Registers {
    let (tens, ones) = encode_bcd_field(alarm.seconds);
    let mut seconds = AlarmSeconds::default();
    seconds.set_alarm_mask1(alarm.m1);
    seconds.set_ten_seconds(tens);
    seconds.set_seconds(ones);

    PackedAlarm1Registers {
        seconds,
        minutes: encode_minutes(alarm),
        hours: encode_hours(alarm),
        day_date: encode_day_date(alarm),
    }
}

/// Decodes the packed alarm 2 registers; `m1` and `seconds` are always zero.
pub fn decode_alarm2(packed: &PackedAlarm2Registers) -> AlarmValue {
    let (m2, minutes) = decode_minutes(packed.minutes);
    let (m3, hours) = decode_hours(packed.hours);
    let (m4, date) = decode_day_date(packed.day_date);
    AlarmValue {
        m1: false,
        seconds: 0,
        m2,
        minutes,
        m3,
        hours,
        m4,
        date,
    }
}

/// Encodes an alarm into the alarm 2 registers, dropping `m1` and `seconds`.
pub fn encode_alarm2(alarm: &AlarmValue) -> PackedAlarm2Registers {
    PackedAlarm2Registers {
        minutes: encode_minutes(alarm),
        hours: encode_hours(alarm),
        day_date: encode_day_date(alarm),
    }
}
