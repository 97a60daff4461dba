//! In-memory DS3231 stand-in for tests.
//!
//! `FakeBus` records every transport call and serves reads and writes from a
//! register file, so a write followed by a read loops back. It can be told to
//! fail the n-th call.

extern crate alloc;

use alloc::vec::Vec;

use crate::bus::{Transport, ADDRESS_READ, ADDRESS_WRITE};

const REGISTER_COUNT: usize = 0x13;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Begin,
    Address(u8),
    TransmitByte(u8),
    Transmit(Vec<u8>),
    Receive(usize),
    Restart,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Nack;

pub(crate) struct FakeBus {
    pub calls: Vec<Call>,
    pub registers: [u8; REGISTER_COUNT],
    fail_at: Option<usize>,
    reading: bool,
    pointer: Option<usize>,
}

impl FakeBus {
    pub fn new() -> Self {
        FakeBus {
            calls: Vec::new(),
            registers: [0; REGISTER_COUNT],
            fail_at: None,
            reading: false,
            pointer: None,
        }
    }

    /// Fails the call with index `k` (0-based) and every call after it.
    pub fn failing_at(k: usize) -> Self {
        FakeBus {
            fail_at: Some(k),
            ..Self::new()
        }
    }

    fn record(&mut self, call: Call) -> Result<(), Nack> {
        let index = self.calls.len();
        self.calls.push(call);
        match self.fail_at {
            Some(k) if index >= k => Err(Nack),
            _ => Ok(()),
        }
    }

    fn store(&mut self, byte: u8) {
        match self.pointer {
            None => self.pointer = Some(usize::from(byte) % REGISTER_COUNT),
            Some(p) => {
                self.registers[p] = byte;
                self.pointer = Some((p + 1) % REGISTER_COUNT);
            }
        }
    }
}

impl Transport for FakeBus {
    type Error = Nack;

    fn begin(&mut self) -> Result<(), Nack> {
        self.record(Call::Begin)?;
        self.pointer = None;
        Ok(())
    }

    fn address(&mut self, address: u8) -> Result<(), Nack> {
        self.record(Call::Address(address))?;
        match address {
            ADDRESS_WRITE => self.reading = false,
            ADDRESS_READ => self.reading = true,
            _ => return Err(Nack),
        }
        Ok(())
    }

    fn transmit_byte(&mut self, byte: u8) -> Result<(), Nack> {
        self.record(Call::TransmitByte(byte))?;
        self.store(byte);
        Ok(())
    }

    fn transmit(&mut self, bytes: &[u8]) -> Result<(), Nack> {
        self.record(Call::Transmit(bytes.to_vec()))?;
        for &byte in bytes {
            self.store(byte);
        }
        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), Nack> {
        self.record(Call::Receive(buf.len()))?;
        if !self.reading {
            return Err(Nack);
        }
        let mut p = self.pointer.unwrap_or(0);
        for byte in buf.iter_mut() {
            *byte = self.registers[p];
            p = (p + 1) % REGISTER_COUNT;
        }
        self.pointer = Some(p);
        Ok(())
    }

    fn restart(&mut self) -> Result<(), Nack> {
        self.record(Call::Restart)
    }

    fn end(&mut self) -> Result<(), Nack> {
        self.record(Call::End)
    }
}
