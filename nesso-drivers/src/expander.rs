//! Virtual GPIO over the two port expanders
//!
//! The board's slow pins (keys, LED, display reset, radio switches) hang
//! off two PI4IOE5V6408-class 8-bit expanders instead of native MCU GPIO.
//! This driver reimplements the usual pin-mode/write/read operations as
//! register transactions against whichever chip a pin decodes to.
//!
//! The chips power up with every output high-impedance; the first
//! operation touching a chip releases that latch once, and a per-chip flag
//! on the driver skips the release afterwards.

use embedded_hal::i2c::I2c;
pub use embedded_hal::digital::PinState;

use nesso_core::pin::{ExpanderChip, ExpanderPin, PinMode};

use crate::error::Error;

/// PI4IOE5V6408-class register addresses.
pub mod reg {
    /// Pin direction, 1 = output.
    pub const IO_DIRECTION: u8 = 0x03;
    /// Output latch.
    pub const OUTPUT_STATE: u8 = 0x05;
    /// Output high-impedance latch, 1 = Hi-Z. Powers up all-ones.
    pub const OUTPUT_HIZ: u8 = 0x07;
    /// Pull resistor enable, 1 = pull active.
    pub const PULL_ENABLE: u8 = 0x0B;
    /// Pull direction, 1 = pull-up, 0 = pull-down.
    pub const PULL_SELECT: u8 = 0x0D;
    /// Input level, live.
    pub const INPUT_STATUS: u8 = 0x0F;
}

/// GPIO driver multiplexing both expander chips over one bus handle.
///
/// Only the low three bits of a pin's index are meaningful on these 8-bit
/// parts; the board constants all stay within that range.
pub struct ExpanderGpio<I2C> {
    i2c: I2C,
    configured: [bool; 2],
}

impl<I2C, E> ExpanderGpio<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            configured: [false; 2],
        }
    }

    /// Give the bus handle back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// One-time per-chip setup: release the power-on output Hi-Z latch so
    /// output writes reach the pins. Runs at most once per chip for the
    /// lifetime of this driver.
    fn ensure_configured(&mut self, chip: ExpanderChip) -> Result<(), Error<E>> {
        if self.configured[chip.index()] {
            return Ok(());
        }
        self.i2c.write(chip.address(), &[reg::OUTPUT_HIZ, 0x00])?;
        self.configured[chip.index()] = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("expander {=u8:#x}: outputs released", chip.address());
        Ok(())
    }

    /// Read-modify-write one bit of one register.
    fn update_bit(&mut self, addr: u8, register: u8, mask: u8, set: bool) -> Result<(), Error<E>> {
        let mut current = [0u8];
        self.i2c.write_read(addr, &[register], &mut current)?;
        let next = if set {
            current[0] | mask
        } else {
            current[0] & !mask
        };
        self.i2c.write(addr, &[register, next])?;
        Ok(())
    }

    /// Configure a pin's direction and pull resistors.
    pub fn pin_mode(&mut self, pin: ExpanderPin, mode: PinMode) -> Result<(), Error<E>> {
        self.ensure_configured(pin.chip())?;
        let addr = pin.chip().address();
        let mask = 1 << (pin.index() & 0x07);
        match mode {
            PinMode::Output => self.update_bit(addr, reg::IO_DIRECTION, mask, true),
            PinMode::Input => {
                self.update_bit(addr, reg::PULL_ENABLE, mask, false)?;
                self.update_bit(addr, reg::IO_DIRECTION, mask, false)
            }
            PinMode::InputPullup => {
                self.update_bit(addr, reg::PULL_SELECT, mask, true)?;
                self.update_bit(addr, reg::PULL_ENABLE, mask, true)?;
                self.update_bit(addr, reg::IO_DIRECTION, mask, false)
            }
            PinMode::InputPulldown => {
                self.update_bit(addr, reg::PULL_SELECT, mask, false)?;
                self.update_bit(addr, reg::PULL_ENABLE, mask, true)?;
                self.update_bit(addr, reg::IO_DIRECTION, mask, false)
            }
        }
    }

    /// Drive an output pin.
    pub fn digital_write(&mut self, pin: ExpanderPin, level: PinState) -> Result<(), Error<E>> {
        self.ensure_configured(pin.chip())?;
        let mask = 1 << (pin.index() & 0x07);
        self.update_bit(
            pin.chip().address(),
            reg::OUTPUT_STATE,
            mask,
            level == PinState::High,
        )
    }

    /// Sample an input pin.
    pub fn digital_read(&mut self, pin: ExpanderPin) -> Result<PinState, Error<E>> {
        self.ensure_configured(pin.chip())?;
        let mut status = [0u8];
        self.i2c
            .write_read(pin.chip().address(), &[reg::INPUT_STATUS], &mut status)?;
        let mask = 1 << (pin.index() & 0x07);
        Ok(if status[0] & mask != 0 {
            PinState::High
        } else {
            PinState::Low
        })
    }

    /// Like [`Self::pin_mode`], discarding the transport result.
    ///
    /// Expander configuration is treated as best effort, matching
    /// conventional GPIO semantics where a mode change is assumed to land.
    pub fn pin_mode_best_effort(&mut self, pin: ExpanderPin, mode: PinMode) {
        let _ = self.pin_mode(pin, mode);
    }

    /// Like [`Self::digital_write`], discarding the transport result.
    ///
    /// A NACK leaves the pin at its previous level and nothing at this
    /// layer can do better than retry; callers that care use the fallible
    /// variant.
    pub fn digital_write_best_effort(&mut self, pin: ExpanderPin, level: PinState) {
        let _ = self.digital_write(pin, level);
    }

    /// Like [`Self::digital_read`], reporting `Low` when the chip is
    /// unreachable. The substitution is this driver's documented choice;
    /// use the fallible variant to tell a low pin from a dead bus.
    pub fn digital_read_best_effort(&mut self, pin: ExpanderPin) -> PinState {
        self.digital_read(pin).unwrap_or(PinState::Low)
    }
}
