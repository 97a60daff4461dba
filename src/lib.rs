//! A platform-agnostic, register-level driver for the DS3231 real-time clock.
//!
//! The driver reads and writes the DS3231 register groups as plain decimal
//! values:
//!
//! | Group | Address | Bytes | Host type |
//! |---|---|---|---|
//! | clock | `0x00` | 7 | [`ClockValue`] |
//! | alarm 1 | `0x07` | 4 | [`AlarmValue`] |
//! | alarm 2 | `0x0B` | 3 | [`AlarmValue`] |
//! | control | `0x0E` | 2 | [`ControlValue`] |
//! | aging offset | `0x10` | 1 | [`AgingOffset`] |
//! | temperature | `0x11` | 2 | [`TemperatureReading`] |
//!
//! Every operation is one bus transaction through a [`Transport`]. Use
//! [`DS3231::from_i2c`] to drive any `embedded_hal::i2c::I2c` bus, or
//! implement [`Transport`] for a bus that exposes start/stop/byte primitives
//! directly.
//!
//! The driver keeps no state between calls: no caching, no calendar logic, no
//! alarm handling beyond the raw register fields.
//!
//! # Features
//!
//! - `log`: log transactions with the `log` crate
//! - `defmt`: log transactions with `defmt` and derive `defmt::Format`
//! - `temperature_f32`: [`TemperatureReading::celsius`]
//!
//! # Example
//!
//! ```rust,ignore
//! use ds3231_twi::{ClockValue, DS3231};
//!
//! let mut rtc = DS3231::from_i2c(i2c);
//!
//! rtc.write_clock(&ClockValue {
//!     seconds: 0,
//!     minutes: 30,
//!     hours: 13,
//!     day: 3,
//!     date: 27,
//!     century: false,
//!     month: 6,
//!     year: 24,
//! })?;
//!
//! let now = rtc.read_clock()?;
//! ```

#![no_std]

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        macro_rules! debug {
            ($($arg:tt)*) => { defmt::debug!($($arg)*) };
        }
        macro_rules! error {
            ($($arg:tt)*) => { defmt::error!($($arg)*) };
        }
    } else if #[cfg(feature = "log")] {
        macro_rules! debug {
            ($($arg:tt)*) => { log::debug!($($arg)*) };
        }
        macro_rules! error {
            ($($arg:tt)*) => { log::error!($($arg)*) };
        }
    } else {
        macro_rules! debug {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
        }
        macro_rules! error {
            ($fmt:literal $(, $arg:expr)* $(,)?) => {{ $( let _ = &$arg; )* }};
        }
    }
}

pub mod alarm;
pub mod bcd;
pub mod bus;
pub mod clock;
pub mod control;
pub mod hal;
mod registers;
pub mod temperature;

#[cfg(test)]
mod fake;

use embedded_hal::i2c::I2c;

pub use alarm::AlarmValue;
pub use bcd::RangeError;
pub use bus::{BusError, Step, Transport};
pub use clock::ClockValue;
pub use control::ControlValue;
pub use hal::{HalError, HalTransport};
pub use registers::*;
pub use temperature::TemperatureReading;

use alarm::{PackedAlarm1Registers, PackedAlarm2Registers};
use clock::PackedClockRegisters;

/// Device configuration applied by [`DS3231::configure`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub square_wave_frequency: SquareWaveFrequency,
    pub interrupt_control: InterruptControl,
    pub battery_backed_square_wave: bool,
    pub oscillator_enable: Oscillator,
}

/// Errors returned by the driver operations.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DS3231Error<E> {
    /// A bus step failed; the transaction was abandoned at that step
    Transaction(BusError<E>),
    /// A value to write is outside its register field's range; nothing was sent
    OutOfRange(RangeError),
}

impl<E> From<BusError<E>> for DS3231Error<E> {
    fn from(e: BusError<E>) -> Self {
        DS3231Error::Transaction(e)
    }
}

impl<E> From<RangeError> for DS3231Error<E> {
    fn from(e: RangeError) -> Self {
        DS3231Error::OutOfRange(e)
    }
}

/// DS3231 Real-Time Clock driver.
///
/// Each method performs exactly one bus transaction (except
/// [`configure`](Self::configure), which performs a read and a write). A
/// failed method leaves the bus wherever the transport stopped.
pub struct DS3231<T: Transport> {
    transport: T,
}

impl<I2C: I2c> DS3231<HalTransport<I2C>> {
    /// Creates a driver on an `embedded-hal` I2C bus.
    pub fn from_i2c(i2c: I2C) -> Self {
        Self::new(HalTransport::new(i2c))
    }
}

impl<T: Transport> DS3231<T> {
    /// Creates a driver on a bus transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the transport.
    pub fn release(self) -> T {
        self.transport
    }

    /// Configures the device according to the provided configuration.
    ///
    /// The alarm interrupt enables and the convert bit are read back and kept
    /// as they are.
    pub fn configure(&mut self, config: &Config) -> Result<(), DS3231Error<T::Error>> {
        debug!("DS3231: reading control register");
        let mut control = self.control()?;
        control.set_oscillator_enable(config.oscillator_enable);
        control.set_battery_backed_square_wave(config.battery_backed_square_wave);
        control.set_square_wave_frequency(config.square_wave_frequency);
        control.set_interrupt_control(config.interrupt_control);
        debug!("DS3231: writing control: {:?}", control);
        self.set_control(control)
    }

    /// Reads the clock registers.
    pub fn read_clock(&mut self) -> Result<ClockValue, DS3231Error<T::Error>> {
        let data: [u8; PackedClockRegisters::LEN] = self.read_group(RegAddr::Seconds)?;
        Ok(clock::decode_clock(&PackedClockRegisters::from(data)))
    }

    /// Writes the clock registers.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::OutOfRange`] without touching the bus if a
    /// field is outside its range.
    pub fn write_clock(&mut self, value: &ClockValue) -> Result<(), DS3231Error<T::Error>> {
        value.validate()?;
        let data: [u8; PackedClockRegisters::LEN] = (&clock::encode_clock(value)).into();
        self.write_group(RegAddr::Seconds, &data)
    }

    /// Reads the alarm 1 registers.
    pub fn read_alarm1(&mut self) -> Result<AlarmValue, DS3231Error<T::Error>> {
        let data: [u8; PackedAlarm1Registers::LEN] = self.read_group(RegAddr::Alarm1Seconds)?;
        Ok(alarm::decode_alarm1(&PackedAlarm1Registers::from(data)))
    }

    /// Writes the alarm 1 registers.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::OutOfRange`] without touching the bus if a
    /// field is outside its range.
    pub fn write_alarm1(&mut self, value: &AlarmValue) -> Result<(), DS3231Error<T::Error>> {
        value.validate_alarm1()?;
        let data: [u8; PackedAlarm1Registers::LEN] = (&alarm::encode_alarm1(value)).into();
        self.write_group(RegAddr::Alarm1Seconds, &data)
    }

    /// Reads the alarm 2 registers. `m1` and `seconds` are always zero.
    pub fn read_alarm2(&mut self) -> Result<AlarmValue, DS3231Error<T::Error>> {
        let data: [u8; PackedAlarm2Registers::LEN] = self.read_group(RegAddr::Alarm2Minutes)?;
        Ok(alarm::decode_alarm2(&PackedAlarm2Registers::from(data)))
    }

    /// Writes the alarm 2 registers. `m1` and `seconds` are not sent.
    ///
    /// # Errors
    ///
    /// Returns [`DS3231Error::OutOfRange`] without touching the bus if a
    /// field is outside its range.
    pub fn write_alarm2(&mut self, value: &AlarmValue) -> Result<(), DS3231Error<T::Error>> {
        value.validate_alarm2()?;
        let data: [u8; PackedAlarm2Registers::LEN] = (&alarm::encode_alarm2(value)).into();
        self.write_group(RegAddr::Alarm2Minutes, &data)
    }

    /// Reads the control and control/status registers.
    pub fn read_control(&mut self) -> Result<ControlValue, DS3231Error<T::Error>> {
        let data: [u8; ControlValue::LEN] = self.read_group(RegAddr::Control)?;
        Ok(ControlValue::from(data))
    }

    /// Writes the control and control/status registers as they are.
    pub fn write_control(&mut self, value: &ControlValue) -> Result<(), DS3231Error<T::Error>> {
        let data: [u8; ControlValue::LEN] = value.into();
        self.write_group(RegAddr::Control, &data)
    }

    /// Reads the temperature registers.
    pub fn temperature(&mut self) -> Result<TemperatureReading, DS3231Error<T::Error>> {
        let data: [u8; TemperatureReading::LEN] = self.read_group(RegAddr::MSBTemp)?;
        Ok(TemperatureReading::from(data))
    }

    fn read_group<const N: usize>(
        &mut self,
        register: RegAddr,
    ) -> Result<[u8; N], DS3231Error<T::Error>> {
        let mut data = [0; N];
        bus::read_registers(&mut self.transport, register.into(), &mut data)?;
        debug!("DS3231: {:?} -> {:?}", register, data);
        Ok(data)
    }

    fn write_group(&mut self, register: RegAddr, data: &[u8]) -> Result<(), DS3231Error<T::Error>> {
        debug!("DS3231: {:?} <- {:?}", register, data);
        bus::write_registers(&mut self.transport, register.into(), data)?;
        Ok(())
    }
}

// Single register access
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<T: Transport> DS3231<T> {
            $(
                paste::paste! {
                    #[doc = concat!("Reads the ", stringify!($name), " register.")]
                    pub fn $name(&mut self) -> Result<$typ, DS3231Error<T::Error>> {
                        let data: [u8; 1] = self.read_group($regaddr)?;
                        Ok(<$typ>::from(data[0]))
                    }

                    #[doc = concat!("Writes the ", stringify!($name), " register.")]
                    pub fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS3231Error<T::Error>> {
                        self.write_group($regaddr, &[u8::from(value)])
                    }
                }
            )+
        }
    }
}

impl_register_access!(
    (control, RegAddr::Control, Control),
    (status, RegAddr::ControlStatus, Status),
    (aging_offset, RegAddr::AgingOffset, AgingOffset)
);
