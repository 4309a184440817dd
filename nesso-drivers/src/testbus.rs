//! Fake I2C bus for host-side driver tests
//!
//! Models a bus of byte-addressed register devices: the first byte of a
//! write sets the register pointer, further bytes store to consecutive
//! registers, reads return consecutive registers from the pointer. Every
//! write is also logged verbatim so tests can count transactions.

use std::collections::HashMap;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeBusError;

impl embedded_hal::i2c::Error for FakeBusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct FakeBus {
    mem: HashMap<u8, [u8; 256]>,
    /// Every write issued, as (device address, raw bytes).
    pub writes: Vec<(u8, Vec<u8>)>,
    /// Addresses that NACK every transaction.
    pub absent: Vec<u8>,
    /// Fail the whole bus, all addresses.
    pub broken: bool,
}

impl FakeBus {
    pub fn new() -> Self {
        Self {
            mem: HashMap::new(),
            writes: Vec::new(),
            absent: Vec::new(),
            broken: false,
        }
    }

    pub fn set_reg(&mut self, addr: u8, reg: u8, value: u8) {
        self.mem.entry(addr).or_insert([0; 256])[reg as usize] = value;
    }

    /// Store a 16-bit field the way the gauge exposes them: little-endian
    /// across two consecutive registers.
    pub fn set_reg_u16_le(&mut self, addr: u8, reg: u8, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.set_reg(addr, reg, lo);
        self.set_reg(addr, reg.wrapping_add(1), hi);
    }

    pub fn reg(&self, addr: u8, reg: u8) -> u8 {
        self.mem.get(&addr).map_or(0, |m| m[reg as usize])
    }

    /// How many writes went to a given register of a given device. The
    /// register pointer is the first byte of each logged write.
    pub fn writes_to(&self, addr: u8, reg: u8) -> usize {
        self.writes
            .iter()
            .filter(|(a, bytes)| *a == addr && bytes.first() == Some(&reg) && bytes.len() > 1)
            .count()
    }
}

impl ErrorType for FakeBus {
    type Error = FakeBusError;
}

impl I2c for FakeBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), FakeBusError> {
        if self.broken || self.absent.contains(&address) {
            return Err(FakeBusError);
        }
        let mut pointer: usize = 0;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                    if let Some((reg, data)) = bytes.split_first() {
                        pointer = *reg as usize;
                        let mem = self.mem.entry(address).or_insert([0; 256]);
                        for byte in data {
                            mem[pointer % 256] = *byte;
                            pointer += 1;
                        }
                    }
                }
                Operation::Read(buffer) => {
                    let mem = self.mem.entry(address).or_insert([0; 256]);
                    for slot in buffer.iter_mut() {
                        *slot = mem[pointer % 256];
                        pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
