//! BQ27220 fuel gauge
//!
//! Coulomb-counting battery monitor. Every quantity is a 16-bit
//! little-endian field behind a one-byte command; reads are independent,
//! uncached single round-trips. Smoothing or averaging beyond what the
//! gauge itself does is the caller's business.

use embedded_hal::i2c::I2c;

use nesso_core::telemetry::BatteryTelemetry;

use crate::error::Error;

/// Fixed 7-bit bus address.
pub const I2C_ADDR: u8 = 0x55;

/// BQ27220 standard command addresses.
pub mod cmd {
    /// Battery voltage, mV.
    pub const VOLTAGE: u8 = 0x08;
    /// Battery current, signed mA.
    pub const CURRENT: u8 = 0x0C;
    /// Remaining capacity, mAh.
    pub const REMAIN_CAPACITY: u8 = 0x10;
    /// Full charge capacity, mAh.
    pub const FULL_CAPACITY: u8 = 0x12;
    /// Average power, signed mW.
    pub const AVG_POWER: u8 = 0x24;
    /// Temperature, tenths of Kelvin.
    pub const TEMPERATURE: u8 = 0x28;
    /// Charge/discharge cycle counter.
    pub const CYCLE_COUNT: u8 = 0x2A;
}

/// Remaining/full ratio as an integer percentage, rounded to nearest.
///
/// A fresh or faulted gauge can report a full capacity of zero; that reads
/// as 0% instead of dividing by it. Computed in u32 and saturated so a
/// corrupt remaining-capacity read cannot wrap the result.
fn charge_percent(remaining: u16, full: u16) -> u16 {
    if full == 0 {
        return 0;
    }
    let percent = (remaining as u32 * 100 + full as u32 / 2) / full as u32;
    percent.min(u16::MAX as u32) as u16
}

/// Gauge temperature arrives in tenths of Kelvin.
fn deci_kelvin_to_celsius(raw: u16) -> f32 {
    raw as f32 / 10.0 - 273.15
}

/// BQ27220 fuel gauge driver.
pub struct Bq27220<I2C> {
    i2c: I2C,
}

impl<I2C, E> Bq27220<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus handle back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_u16(&mut self, command: u8) -> Result<u16, Error<E>> {
        let mut raw = [0u8; 2];
        self.i2c.write_read(I2C_ADDR, &[command], &mut raw)?;
        Ok(u16::from_le_bytes(raw))
    }

    /// Battery voltage in volts.
    pub fn voltage(&mut self) -> Result<f32, Error<E>> {
        Ok(self.read_u16(cmd::VOLTAGE)? as f32 / 1000.0)
    }

    /// Battery current in amperes; negative while discharging.
    pub fn current(&mut self) -> Result<f32, Error<E>> {
        Ok(self.read_u16(cmd::CURRENT)? as i16 as f32 / 1000.0)
    }

    /// Remaining charge as a percentage of full capacity.
    pub fn charge_level(&mut self) -> Result<u16, Error<E>> {
        let remaining = self.read_u16(cmd::REMAIN_CAPACITY)?;
        let full = self.read_u16(cmd::FULL_CAPACITY)?;
        Ok(charge_percent(remaining, full))
    }

    /// Average power in milliwatts; negative while discharging.
    pub fn average_power(&mut self) -> Result<i16, Error<E>> {
        Ok(self.read_u16(cmd::AVG_POWER)? as i16)
    }

    /// Battery temperature in degrees Celsius.
    pub fn temperature(&mut self) -> Result<f32, Error<E>> {
        Ok(deci_kelvin_to_celsius(self.read_u16(cmd::TEMPERATURE)?))
    }

    /// Charge/discharge cycle counter.
    pub fn cycle_count(&mut self) -> Result<u16, Error<E>> {
        self.read_u16(cmd::CYCLE_COUNT)
    }

    /// Read every reported quantity in one burst.
    pub fn snapshot(&mut self) -> Result<BatteryTelemetry, Error<E>> {
        Ok(BatteryTelemetry {
            voltage_v: self.voltage()?,
            current_a: self.current()?,
            charge_percent: self.charge_level()?,
            average_power_mw: self.average_power()?,
            temperature_c: self.temperature()?,
            cycle_count: self.cycle_count()?,
        })
    }
}
