//! FT6x36 touch panel
//!
//! Polled capacitive touch controller. Structurally the smallest of the
//! board's drivers: one status register, one four-byte coordinate block,
//! no conversion beyond unpacking 12-bit coordinates. Gestures and
//! multi-touch are deliberately not supported; anything other than
//! exactly one finger reads as "no touch".

use embedded_hal::i2c::I2c;

use crate::error::Error;

/// Fixed 7-bit bus address.
pub const I2C_ADDR: u8 = 0x38;

/// Touch-count status register; low nibble is the number of points.
const TD_STATUS: u8 = 0x02;
/// First touch point: X high, X low, Y high, Y low.
const P1_COORD: u8 = 0x03;

/// One touch position in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

/// FT6x36 touch driver.
pub struct Ft6x36<I2C> {
    i2c: I2C,
    present: bool,
}

impl<I2C, E> Ft6x36<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            present: false,
        }
    }

    /// Give the bus handle back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Check that the controller answers on the bus.
    ///
    /// Until a probe succeeds, the polling methods report "no touch"
    /// rather than raise errors.
    pub fn probe(&mut self) -> Result<(), Error<E>> {
        match self.i2c.write(I2C_ADDR, &[]) {
            Ok(()) => {
                self.present = true;
                Ok(())
            }
            Err(_) => Err(Error::NotDetected),
        }
    }

    /// Whether exactly one finger is on the panel right now.
    pub fn is_touched(&mut self) -> Result<bool, Error<E>> {
        if !self.present {
            return Ok(false);
        }
        let mut status = [0u8];
        self.i2c.write_read(I2C_ADDR, &[TD_STATUS], &mut status)?;
        Ok(status[0] & 0x0F == 1)
    }

    /// Current touch position, if exactly one finger is down.
    pub fn touch_point(&mut self) -> Result<Option<TouchPoint>, Error<E>> {
        if !self.present {
            return Ok(None);
        }

        let mut block = [0u8; 4];
        self.i2c.write_read(I2C_ADDR, &[P1_COORD], &mut block)?;

        // The coordinate block is only valid for a single-touch frame.
        if !self.is_touched()? {
            return Ok(None);
        }

        Ok(Some(TouchPoint {
            x: u16::from(block[0] & 0x0F) << 8 | u16::from(block[1]),
            y: u16::from(block[2] & 0x0F) << 8 | u16::from(block[3]),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testbus::FakeBus;

    fn panel_with(setup: impl FnOnce(&mut FakeBus)) -> Ft6x36<FakeBus> {
        let mut bus = FakeBus::new();
        setup(&mut bus);
        let mut panel = Ft6x36::new(bus);
        panel.probe().unwrap();
        panel
    }

    #[test]
    fn probe_fails_on_an_absent_controller() {
        let mut bus = FakeBus::new();
        bus.absent.push(I2C_ADDR);
        let mut panel = Ft6x36::new(bus);
        assert_eq!(panel.probe(), Err(Error::NotDetected));
        // Unprobed panel polls as idle instead of erroring.
        assert_eq!(panel.is_touched(), Ok(false));
        assert_eq!(panel.touch_point(), Ok(None));
    }

    #[test]
    fn single_touch_decodes_both_coordinates() {
        let mut panel = panel_with(|bus| {
            bus.set_reg(I2C_ADDR, TD_STATUS, 1);
            bus.set_reg(I2C_ADDR, P1_COORD, 0x01);
            bus.set_reg(I2C_ADDR, P1_COORD + 1, 0x23);
            bus.set_reg(I2C_ADDR, P1_COORD + 2, 0x02);
            bus.set_reg(I2C_ADDR, P1_COORD + 3, 0x58);
        });
        assert!(panel.is_touched().unwrap());
        assert_eq!(
            panel.touch_point().unwrap(),
            Some(TouchPoint { x: 0x123, y: 0x258 })
        );
    }

    #[test]
    fn event_flag_bits_do_not_leak_into_coordinates() {
        let mut panel = panel_with(|bus| {
            bus.set_reg(I2C_ADDR, TD_STATUS, 0xF1);
            bus.set_reg(I2C_ADDR, P1_COORD, 0xF1);
            bus.set_reg(I2C_ADDR, P1_COORD + 1, 0x23);
        });
        assert!(panel.is_touched().unwrap());
        assert_eq!(panel.touch_point().unwrap().unwrap().x, 0x123);
    }

    #[test]
    fn no_touch_reads_as_none() {
        let mut panel = panel_with(|bus| bus.set_reg(I2C_ADDR, TD_STATUS, 0));
        assert!(!panel.is_touched().unwrap());
        assert_eq!(panel.touch_point().unwrap(), None);
    }

    #[test]
    fn multi_touch_is_rejected() {
        let mut panel = panel_with(|bus| bus.set_reg(I2C_ADDR, TD_STATUS, 2));
        assert!(!panel.is_touched().unwrap());
        assert_eq!(panel.touch_point().unwrap(), None);
    }
}
