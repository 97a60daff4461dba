//! Clock register codec for the DS3231 RTC.
//!
//! The DS3231 stores the time of day and the calendar in 7 consecutive
//! registers starting at `0x00`:
//! - Seconds, Minutes, Hours, Day, Date, Month (with century flag), Year
//!
//! [`ClockValue`] is the host side: plain decimal integers, one per field.
//! [`PackedClockRegisters`] is the wire side: one bitfield per register byte.
//! [`decode_clock`] and [`encode_clock`] convert between the two and cannot
//! fail. Range checks live in [`ClockValue::validate`].

use crate::bcd::{check, decode_bcd_field, encode_bcd_field, RangeError};
use crate::{Date, Day, Hours, Minutes, Month, Seconds, Year};

/// Host representation of the clock registers.
///
/// Hours are in 24-hour form. No calendar checks are applied: a value such as
/// 31 February is transferred as is.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockValue {
    /// Seconds (0-59)
    pub seconds: u8,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Hours (0-23)
    pub hours: u8,
    /// Day of week (1-7), meaning of each day is up to the application
    pub day: u8,
    /// Date of month (1-31)
    pub date: u8,
    /// Century flag from the month register
    pub century: bool,
    /// Month (1-12)
    pub month: u8,
    /// Year within the century (0-99)
    pub year: u8,
}

impl ClockValue {
    /// Checks every field against its decimal range.
    ///
    /// # Errors
    ///
    /// Returns the first field found out of range, in register order.
    pub fn validate(&self) -> Result<(), RangeError> {
        check(self.seconds, 0..=59, RangeError::Seconds)?;
        check(self.minutes, 0..=59, RangeError::Minutes)?;
        check(self.hours, 0..=23, RangeError::Hours)?;
        check(self.day, 1..=7, RangeError::Day)?;
        check(self.date, 1..=31, RangeError::Date)?;
        check(self.month, 1..=12, RangeError::Month)?;
        check(self.year, 0..=99, RangeError::Year)
    }
}

/// Packed clock registers `0x00..=0x06` as they appear on the wire.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PackedClockRegisters {
    pub seconds: Seconds,
    pub minutes: Minutes,
    pub hours: Hours,
    pub day: Day,
    pub date: Date,
    pub month: Month,
    pub year: Year,
}

impl PackedClockRegisters {
    /// Number of register bytes in the clock group.
    pub const LEN: usize = 7;
}

impl From<[u8; 7]> for PackedClockRegisters {
    fn from(data: [u8; 7]) -> Self {
        PackedClockRegisters {
            seconds: Seconds(data[0]),
            minutes: Minutes(data[1]),
            hours: Hours(data[2]),
            day: Day(data[3]),
            date: Date(data[4]),
            month: Month(data[5]),
            year: Year(data[6]),
        }
    }
}

impl From<&PackedClockRegisters> for [u8; 7] {
    fn from(packed: &PackedClockRegisters) -> [u8; 7] {
        [
            packed.seconds.0,
            packed.minutes.0,
            packed.hours.0,
            packed.day.0,
            packed.date.0,
            packed.month.0,
            packed.year.0,
        ]
    }
}

/// Decodes the packed clock registers into decimal values.
///
/// Reserved bits are ignored. `day` and `century` are copied without a BCD
/// split.
pub fn decode_clock(packed: &PackedClockRegisters) -> ClockValue {
    ClockValue {
        seconds: decode_bcd_field(packed.seconds.ten_seconds(), packed.seconds.seconds()),
        minutes: decode_bcd_field(packed.minutes.ten_minutes(), packed.minutes.minutes()),
        hours: decode_bcd_field(packed.hours.ten_hours(), packed.hours.hours()),
        day: packed.day.day(),
        date: decode_bcd_field(packed.date.ten_date(), packed.date.date()),
        century: packed.month.century(),
        month: decode_bcd_field(packed.month.ten_month(), packed.month.month()),
        year: decode_bcd_field(packed.year.ten_year(), packed.year.year()),
    }
}

/// Encodes decimal clock values into packed registers.
///
/// Reserved bits are zero. A tens digit wider than its field is cut to the
/// field width, so out-of-range values are stored truncated; call
/// [`ClockValue::validate`] first to reject them instead.
pub fn encode_clock(clock: &ClockValue) -> PackedClockRegisters {
    let mut packed = PackedClockRegisters::default();

    let (tens, ones) = encode_bcd_field(clock.seconds);
    packed.seconds.set_ten_seconds(tens);
    packed.seconds.set_seconds(ones);

    let (tens, ones) = encode_bcd_field(clock.minutes);
    packed.minutes.set_ten_minutes(tens);
    packed.minutes.set_minutes(ones);

    let (tens, ones) = encode_bcd_field(clock.hours);
    packed.hours.set_ten_hours(tens);
    packed.hours.set_hours(ones);

    packed.day.set_day(clock.day);

    let (tens, ones) = encode_bcd_field(clock.date);
    packed.date.set_ten_date(tens);
    packed.date.set_date(ones);

    let (tens, ones) = encode_bcd_field(clock.month);
    packed.month.set_century(clock.century);
    packed.month.set_ten_month(tens);
    packed.month.set_month(ones);

    let (tens, ones) = encode_bcd_field(clock.year);
    packed.year.set_ten_year(tens);
    packed.year.set_year(ones);

    packed
}

#[cfg(test)]
mod tests {
    use super::*;

    // Bits of each clock register that no field owns.
    const RESERVED: [u8; 7] = [0x80, 0x80, 0xC0, 0xF8, 0xC0, 0x60, 0x00];

    fn sample() -> ClockValue {
        ClockValue {
            seconds: 45,
            minutes: 30,
            hours: 13,
            day: 3,
            date: 27,
            century: false,
            month: 6,
            year: 24,
        }
    }

    #[test]
    fn test_encode_clock_sample() {
        let packed = encode_clock(&sample());
        let data: [u8; 7] = (&packed).into();
        assert_eq!(data[0], (4 << 4) | 5);
        assert_eq!(data, [0x45, 0x30, 0x13, 0x03, 0x27, 0x06, 0x24]);
    }

    #[test]
    fn test_decode_clock_sample() {
        let packed = PackedClockRegisters::from([0x45, 0x30, 0x13, 0x03, 0x27, 0x06, 0x24]);
        assert_eq!(decode_clock(&packed), sample());
    }

    #[test]
    fn test_century_flag() {
        let clock = ClockValue {
            century: true,
            month: 12,
            ..sample()
        };
        let data: [u8; 7] = (&encode_clock(&clock)).into();
        assert_eq!(data[5], 0x92);
        assert_eq!(decode_clock(&PackedClockRegisters::from(data)), clock);
    }

    #[test]
    fn test_field_round_trips() {
        let base = ClockValue {
            seconds: 0,
            minutes: 0,
            hours: 0,
            day: 1,
            date: 1,
            century: false,
            month: 1,
            year: 0,
        };
        for v in 0..=59 {
            let clock = ClockValue {
                seconds: v,
                minutes: v,
                ..base
            };
            assert_eq!(decode_clock(&encode_clock(&clock)), clock);
        }
        for v in 0..=23 {
            let clock = ClockValue { hours: v, ..base };
            assert_eq!(decode_clock(&encode_clock(&clock)), clock);
        }
        for v in 1..=7 {
            let clock = ClockValue { day: v, ..base };
            assert_eq!(decode_clock(&encode_clock(&clock)), clock);
        }
        for v in 1..=31 {
            let clock = ClockValue { date: v, ..base };
            assert_eq!(decode_clock(&encode_clock(&clock)), clock);
        }
        for v in 1..=12 {
            let clock = ClockValue { month: v, ..base };
            assert_eq!(decode_clock(&encode_clock(&clock)), clock);
        }
        for v in 0..=99 {
            let clock = ClockValue { year: v, ..base };
            assert_eq!(decode_clock(&encode_clock(&clock)), clock);
        }
    }

    #[test]
    fn test_encode_clock_reserved_bits_zero() {
        // Includes values that overflow their tens fields
        let extremes = [
            ClockValue::default(),
            sample(),
            ClockValue {
                seconds: 255,
                minutes: 255,
                hours: 255,
                day: 255,
                date: 255,
                century: true,
                month: 255,
                year: 255,
            },
            ClockValue {
                seconds: 79,
                minutes: 79,
                hours: 39,
                day: 7,
                date: 39,
                century: true,
                month: 19,
                year: 99,
            },
        ];
        for clock in extremes {
            let data: [u8; 7] = (&encode_clock(&clock)).into();
            for (byte, reserved) in data.iter().zip(RESERVED) {
                assert_eq!(byte & reserved, 0, "clock {:?} -> {:02x?}", clock, data);
            }
        }
    }

    #[test]
    fn test_encode_clock_truncates_out_of_range() {
        // 85 seconds: tens digit 8 does not fit in 3 bits and is cut to 0
        let clock = ClockValue {
            seconds: 85,
            ..sample()
        };
        let data: [u8; 7] = (&encode_clock(&clock)).into();
        assert_eq!(data[0], 0x05);
        assert_eq!(decode_clock(&PackedClockRegisters::from(data)).seconds, 5);

        // 60 seconds fits the 3-bit field and survives, even though it is invalid
        let clock = ClockValue {
            seconds: 60,
            ..sample()
        };
        let data: [u8; 7] = (&encode_clock(&clock)).into();
        assert_eq!(data[0], 0x60);

        // Hours tens digit is 2 bits wide: 45 -> tens 4 -> 0
        let clock = ClockValue {
            hours: 45,
            ..sample()
        };
        let data: [u8; 7] = (&encode_clock(&clock)).into();
        assert_eq!(data[2], 0x05);
    }

    #[test]
    fn test_decode_clock_ignores_reserved_bits() {
        let packed = PackedClockRegisters::from([0xC5, 0xB0, 0xD3, 0xFB, 0xE7, 0x66, 0x24]);
        let clock = decode_clock(&packed);
        assert_eq!(clock.seconds, 45);
        assert_eq!(clock.minutes, 30);
        assert_eq!(clock.hours, 13);
        assert_eq!(clock.day, 3);
        assert_eq!(clock.date, 27);
        assert!(!clock.century);
        assert_eq!(clock.month, 6);
    }

    #[test]
    fn test_validate() {
        assert_eq!(sample().validate(), Ok(()));

        let cases = [
            (ClockValue { seconds: 60, ..sample() }, RangeError::Seconds(60)),
            (ClockValue { minutes: 60, ..sample() }, RangeError::Minutes(60)),
            (ClockValue { hours: 24, ..sample() }, RangeError::Hours(24)),
            (ClockValue { day: 0, ..sample() }, RangeError::Day(0)),
            (ClockValue { day: 8, ..sample() }, RangeError::Day(8)),
            (ClockValue { date: 0, ..sample() }, RangeError::Date(0)),
            (ClockValue { date: 32, ..sample() }, RangeError::Date(32)),
            (ClockValue { month: 13, ..sample() }, RangeError::Month(13)),
            (ClockValue { year: 100, ..sample() }, RangeError::Year(100)),
        ];
        for (clock, expected) in cases {
            assert_eq!(clock.validate(), Err(expected));
        }
    }
}
