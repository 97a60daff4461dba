//! [`Transport`] on top of an `embedded-hal` I2C bus.
//!
//! `embedded_hal::i2c::I2c` works in whole transfers rather than single bus
//! conditions, so [`HalTransport`] collects the steps of a transaction and
//! issues them as one transfer:
//!
//! - bytes sent after the write address are buffered;
//! - `receive` sends the buffered register pointer and reads the data with a
//!   single `write_read`, which the HAL frames with a repeated start;
//! - `end` sends any buffered bytes with a single `write`.
//!
//! The buffer holds the register pointer plus the largest register group.

use embedded_hal::i2c::I2c;

use crate::bus::{Transport, DEVICE_ADDRESS};

const PENDING_CAPACITY: usize = 8;

/// Errors raised by [`HalTransport`].
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError<E> {
    /// The underlying I2C bus failed
    I2c(E),
    /// More bytes were sent than one transaction can hold
    Overflow,
    /// The address byte does not belong to the DS3231
    UnknownAddress(u8),
    /// A step was issued in the wrong direction or before an address
    Sequence,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Direction {
    Write,
    Read,
}

/// Adapts any `embedded_hal::i2c::I2c` implementation to [`Transport`].
pub struct HalTransport<I2C> {
    i2c: I2C,
    pending: [u8; PENDING_CAPACITY],
    len: usize,
    direction: Option<Direction>,
}

impl<I2C: I2c> HalTransport<I2C> {
    /// Wraps an I2C bus.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            pending: [0; PENDING_CAPACITY],
            len: 0,
            direction: None,
        }
    }

    /// Returns the wrapped I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn expect(&self, direction: Direction) -> Result<(), HalError<I2C::Error>> {
        if self.direction == Some(direction) {
            Ok(())
        } else {
            Err(HalError::Sequence)
        }
    }
}

impl<I2C: I2c> Transport for HalTransport<I2C> {
    type Error = HalError<I2C::Error>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.len = 0;
        self.direction = None;
        Ok(())
    }

    fn address(&mut self, address: u8) -> Result<(), Self::Error> {
        if address >> 1 != DEVICE_ADDRESS {
            return Err(HalError::UnknownAddress(address));
        }
        self.direction = Some(if address & 1 == 1 {
            Direction::Read
        } else {
            Direction::Write
        });
        Ok(())
    }

    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.transmit(&[byte])
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.expect(Direction::Write)?;
        let end = self.len + bytes.len();
        if end > PENDING_CAPACITY {
            return Err(HalError::Overflow);
        }
        self.pending[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.expect(Direction::Read)?;
        let result = if self.len == 0 {
            self.i2c.read(DEVICE_ADDRESS, buf)
        } else {
            self.i2c
                .write_read(DEVICE_ADDRESS, &self.pending[..self.len], buf)
        };
        result.map_err(HalError::I2c)?;
        self.len = 0;
        Ok(())
    }

    fn restart(&mut self) -> Result<(), Self::Error> {
        // The direction must be set again by the next address byte.
        self.direction = None;
        Ok(())
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        let len = core::mem::take(&mut self.len);
        self.direction = None;
        if len > 0 {
            self.i2c
                .write(DEVICE_ADDRESS, &self.pending[..len])
                .map_err(HalError::I2c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use crate::bus::{read_registers, write_registers, BusError, Step, ADDRESS_READ, ADDRESS_WRITE};
    use alloc::vec;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    #[test]
    fn test_read_uses_write_read() {
        let mock = I2cMock::new(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![0x07],
            vec![0x80, 0x15, 0x80, 0x10],
        )]);
        let mut transport = HalTransport::new(mock);

        let mut buf = [0; 4];
        read_registers(&mut transport, 0x07, &mut buf).unwrap();

        assert_eq!(buf, [0x80, 0x15, 0x80, 0x10]);
        transport.release().done();
    }

    #[test]
    fn test_write_is_one_transfer() {
        let mock = I2cMock::new(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![0x00, 0x45, 0x30, 0x13, 0x03, 0x27, 0x06, 0x24],
        )]);
        let mut transport = HalTransport::new(mock);

        write_registers(
            &mut transport,
            0x00,
            &[0x45, 0x30, 0x13, 0x03, 0x27, 0x06, 0x24],
        )
        .unwrap();

        transport.release().done();
    }

    #[test]
    fn test_i2c_error_is_reported_at_receive() {
        let mock = I2cMock::new(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![0x0E], vec![0, 0]).with_error(ErrorKind::Other),
        ]);
        let mut transport = HalTransport::new(mock);

        let mut buf = [0; 2];
        let err = read_registers(&mut transport, 0x0E, &mut buf).unwrap_err();

        assert_eq!(
            err,
            BusError {
                step: Step::Receive,
                cause: HalError::I2c(ErrorKind::Other)
            }
        );
        transport.release().done();
    }

    #[test]
    fn test_i2c_error_is_reported_at_end() {
        let mock = I2cMock::new(&[
            I2cTrans::write(DEVICE_ADDRESS, vec![0x10, 0xFE]).with_error(ErrorKind::Other),
        ]);
        let mut transport = HalTransport::new(mock);

        let err = write_registers(&mut transport, 0x10, &[0xFE]).unwrap_err();

        assert_eq!(err.step, Step::End);
        assert_eq!(err.cause, HalError::I2c(ErrorKind::Other));
        transport.release().done();
    }

    #[test]
    fn test_overflow_is_rejected_without_bus_traffic() {
        let mock = I2cMock::new(&[]);
        let mut transport = HalTransport::new(mock);

        let err = write_registers(&mut transport, 0x00, &[0; 8]).unwrap_err();

        assert_eq!(err.step, Step::Transmit);
        assert_eq!(err.cause, HalError::Overflow);
        transport.release().done();
    }

    #[test]
    fn test_unknown_address() {
        let mut transport = HalTransport::new(I2cMock::new(&[]));

        assert_eq!(
            transport.address(0xA0),
            Err(HalError::UnknownAddress(0xA0))
        );
        transport.release().done();
    }

    #[test]
    fn test_out_of_order_steps() {
        let mut transport = HalTransport::new(I2cMock::new(&[]));

        transport.begin().unwrap();
        // No address yet
        assert_eq!(transport.transmit_byte(0x00), Err(HalError::Sequence));

        transport.address(ADDRESS_READ).unwrap();
        assert_eq!(transport.transmit_byte(0x00), Err(HalError::Sequence));

        transport.restart().unwrap();
        transport.address(ADDRESS_WRITE).unwrap();
        let mut buf = [0; 1];
        assert_eq!(transport.receive(&mut buf), Err(HalError::Sequence));

        transport.release().done();
    }

    #[test]
    fn test_plain_read_without_pointer() {
        let mock = I2cMock::new(&[I2cTrans::read(DEVICE_ADDRESS, vec![0x42])]);
        let mut transport = HalTransport::new(mock);

        transport.begin().unwrap();
        transport.address(ADDRESS_READ).unwrap();
        let mut buf = [0; 1];
        transport.receive(&mut buf).unwrap();
        transport.end().unwrap();

        assert_eq!(buf, [0x42]);
        transport.release().done();
    }
}
