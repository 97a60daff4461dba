//! Register-addressed bus transactions.
//!
//! The DS3231 register pointer is set by writing one byte after the device
//! address. A read sets the pointer, then switches direction with a repeated
//! start so the bus is not released in between:
//!
//! ```text
//! read:  START  0xD0  reg  RESTART  0xD1  data...  STOP
//! write: START  0xD0  reg  data...  STOP
//! ```
//!
//! Each step goes through the [`Transport`] collaborator and may fail. The
//! first failure ends the transaction: no further steps are issued, not even
//! the stop condition, and nothing is retried. The caller decides whether to
//! start the whole transaction again.
//!
//! Nothing here locks the bus. Callers sharing a physical bus between drivers
//! must serialize the transactions themselves.

/// 7-bit I2C address of the DS3231.
pub const DEVICE_ADDRESS: u8 = 0x68;

/// Address byte that selects the device for writing.
pub const ADDRESS_WRITE: u8 = DEVICE_ADDRESS << 1;

/// Address byte that selects the device for reading.
pub const ADDRESS_READ: u8 = (DEVICE_ADDRESS << 1) | 1;

/// The bus primitives a transaction is built from.
///
/// Every method blocks until the step has completed on the bus or the
/// transport gave up on it.
pub trait Transport {
    /// Transport specific failure, e.g. arbitration loss or a missing ACK.
    type Error;

    /// Issues a start condition.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Sends an 8-bit address byte, R/W bit included.
    fn address(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Sends a single byte.
    fn transmit_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Sends a run of bytes.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for &byte in bytes {
            self.transmit_byte(byte)?;
        }
        Ok(())
    }

    /// Receives exactly `buf.len()` bytes.
    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Issues a repeated start condition without releasing the bus.
    fn restart(&mut self) -> Result<(), Self::Error>;

    /// Issues a stop condition.
    fn end(&mut self) -> Result<(), Self::Error>;
}

/// A step of a register transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Start condition
    Begin,
    /// Device address with the write bit
    AddressWrite,
    /// Register pointer byte
    RegisterPointer,
    /// Repeated start
    Restart,
    /// Device address with the read bit
    AddressRead,
    /// Data bytes from the device
    Receive,
    /// Data bytes to the device
    Transmit,
    /// Stop condition
    End,
}

/// A failed transaction: the step that failed and the transport's error.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusError<E> {
    pub step: Step,
    pub cause: E,
}

impl<E> BusError<E> {
    fn at(step: Step) -> impl FnOnce(E) -> Self {
        move |cause| BusError { step, cause }
    }
}

/// Reads `buf.len()` consecutive registers starting at `register`.
///
/// # Errors
///
/// Returns the first failed step. `buf` holds unspecified data in that case.
pub fn read_registers<T: Transport>(
    transport: &mut T,
    register: u8,
    buf: &mut [u8],
) -> Result<(), BusError<T::Error>> {
    debug!("DS3231: read {} bytes from {:#x}", buf.len(), register);
    let result = read_sequence(transport, register, buf);
    if let Err(e) = &result {
        error!("DS3231: read from {:#x} failed at {:?}", register, e.step);
    }
    result
}

/// Writes `data` to consecutive registers starting at `register`.
///
/// # Errors
///
/// Returns the first failed step. The device may hold a partial write.
pub fn write_registers<T: Transport>(
    transport: &mut T,
    register: u8,
    data: &[u8],
) -> Result<(), BusError<T::Error>> {
    debug!("DS3231: write {} bytes to {:#x}", data.len(), register);
    let result = write_sequence(transport, register, data);
    if let Err(e) = &result {
        error!("DS3231: write to {:#x} failed at {:?}", register, e.step);
    }
    result
}

fn read_sequence<T: Transport>(
    transport: &mut T,
    register: u8,
    buf: &mut [u8],
) -> Result<(), BusError<T::Error>> {
    transport.begin().map_err(BusError::at(Step::Begin))?;
    transport
        .address(ADDRESS_WRITE)
        .map_err(BusError::at(Step::AddressWrite))?;
    transport
        .transmit_byte(register)
        .map_err(BusError::at(Step::RegisterPointer))?;
    transport.restart().map_err(BusError::at(Step::Restart))?;
    transport
        .address(ADDRESS_READ)
        .map_err(BusError::at(Step::AddressRead))?;
    transport
        .receive(buf)
        .map_err(BusError::at(Step::Receive))?;
    transport.end().map_err(BusError::at(Step::End))
}

fn write_sequence<T: Transport>(
    transport: &mut T,
    register: u8,
    data: &[u8],
) -> Result<(), BusError<T::Error>> {
    transport.begin().map_err(BusError::at(Step::Begin))?;
    transport
        .address(ADDRESS_WRITE)
        .map_err(BusError::at(Step::AddressWrite))?;
    transport
        .transmit_byte(register)
        .map_err(BusError::at(Step::RegisterPointer))?;
    transport
        .transmit(data)
        .map_err(BusError::at(Step::Transmit))?;
    transport.end().map_err(BusError::at(Step::End))
}
