//! Temperature registers (`0x11..=0x12`).
//!
//! The device reports a 10-bit two's complement temperature: the integer part
//! in `0x11` and two fraction bits (quarter degrees) in bits 7:6 of `0x12`.

use crate::{Temperature, TemperatureFraction};

/// A temperature reading with 0.25 °C resolution.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureReading {
    quarter_degrees: i16,
}

impl TemperatureReading {
    /// Number of register bytes in the temperature group.
    pub const LEN: usize = 2;

    /// Temperature in units of 0.25 °C.
    pub fn quarter_degrees(&self) -> i16 {
        self.quarter_degrees
    }

    /// Temperature rounded down to a whole degree.
    pub fn whole_degrees(&self) -> i16 {
        self.quarter_degrees.div_euclid(4)
    }

    /// Temperature in °C.
    #[cfg(feature = "temperature_f32")]
    pub fn celsius(&self) -> f32 {
        f32::from(self.quarter_degrees) * 0.25
    }
}

impl From<[u8; 2]> for TemperatureReading {
    fn from(data: [u8; 2]) -> Self {
        let integer = i16::from(Temperature(data[0]).temperature());
        let fraction = i16::from(TemperatureFraction(data[1]).temperature_fraction());
        TemperatureReading {
            quarter_degrees: integer * 4 + fraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_temperature() {
        let reading = TemperatureReading::from([0x19, 0x40]); // 25.25°C
        assert_eq!(reading.quarter_degrees(), 101);
        assert_eq!(reading.whole_degrees(), 25);
    }

    #[test]
    fn test_negative_temperature() {
        // -0.25°C is 0b11111111_11 in 10-bit two's complement
        let reading = TemperatureReading::from([0xFF, 0xC0]);
        assert_eq!(reading.quarter_degrees(), -1);
        assert_eq!(reading.whole_degrees(), -1);

        let reading = TemperatureReading::from([0xF6, 0x00]); // -10°C
        assert_eq!(reading.quarter_degrees(), -40);
        assert_eq!(reading.whole_degrees(), -10);
    }

    #[test]
    fn test_fraction_ignores_low_bits() {
        let reading = TemperatureReading::from([0x00, 0xBF]); // 0.5°C plus noise
        assert_eq!(reading.quarter_degrees(), 2);
    }

    #[cfg(feature = "temperature_f32")]
    #[test]
    fn test_celsius() {
        let reading = TemperatureReading::from([0x19, 0xC0]);
        // Quarter degrees are exact in binary floating point
        assert_eq!(reading.celsius(), 25.75);
    }
}
