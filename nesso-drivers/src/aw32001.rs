//! AW32001 battery charger
//!
//! Linear single-cell Li-Ion charger with an 11-register I2C map. Every
//! configurable quantity is a packed field with a fixed offset and step;
//! setters here take engineering units, clamp to the field's range,
//! quantize to the nearest step and rewrite only their own field. Out of
//! range requests are never rejected - the hardware's granularity is the
//! contract, and firmware routinely asks for round numbers the chip
//! cannot represent exactly.

use embedded_hal::i2c::I2c;

use nesso_core::charge::{ChargeStatus, UnderVoltageLockout};

use crate::error::Error;

/// Fixed 7-bit bus address.
pub const I2C_ADDR: u8 = 0x49;

/// AW32001 register addresses.
pub mod reg {
    /// Input source control: VIN_DPM[7:4], IIN_LIM[3:0].
    pub const INPUT_SRC: u8 = 0x00;
    /// Power-on configuration: WD_RST[6], BAT_UVLO[5:3].
    pub const POWER_ON_CFG: u8 = 0x01;
    /// Charge current control: ICHG[5:0].
    pub const CHG_CURRENT: u8 = 0x02;
    /// Discharge and termination current: IDSCHG[7:4], ITERM[3:0].
    pub const TERM_CURRENT: u8 = 0x03;
    /// Charge voltage control: VREG[7:2].
    pub const CHG_VOLTAGE: u8 = 0x04;
    /// Timer and watchdog control: WATCHDOG[5:4].
    pub const TIMER_WD: u8 = 0x05;
    /// Main control: EN_HIZ[7], CHG_EN[4].
    pub const MAIN_CTRL: u8 = 0x06;
    /// System control: FET_DIS[5].
    pub const SYS_CTRL: u8 = 0x07;
    /// System status: CHG_STAT[4:3].
    pub const SYS_STATUS: u8 = 0x08;
    /// Fault status, read-only.
    pub const FAULT_STATUS: u8 = 0x09;
    /// Chip identification, read-only.
    pub const CHIP_ID: u8 = 0x0A;
}

const VIN_DPM_MASK: u8 = 0xF0;
const VIN_DPM_SHIFT: u8 = 4;
const IIN_LIM_MASK: u8 = 0x0F;

const WD_RST: u8 = 1 << 6;
const UVLO_MASK: u8 = 0b0011_1000;
const UVLO_SHIFT: u8 = 3;

const ICHG_MASK: u8 = 0x3F;

const IDSCHG_MASK: u8 = 0xF0;
const IDSCHG_SHIFT: u8 = 4;

const VREG_MASK: u8 = 0xFC;
const VREG_SHIFT: u8 = 2;

const WATCHDOG_MASK: u8 = 0b0011_0000;
const WATCHDOG_SHIFT: u8 = 4;

const EN_HIZ: u8 = 1 << 7;
const CHG_EN: u8 = 1 << 4;

const FET_DIS: u8 = 1 << 5;

const CHG_STAT_MASK: u8 = 0b0001_1000;
const CHG_STAT_SHIFT: u8 = 3;

/// Clamp an engineering-unit request into a field's range and round to
/// the nearest register step. A projection: feeding a representable value
/// back in returns the same code.
const fn field_code(value: u16, min: u16, max: u16, step: u16) -> u8 {
    let clamped = if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    };
    ((clamped - min + step / 2) / step) as u8
}

/// Power-on charge configuration.
///
/// The defaults match the board's battery: 256mA fast charge into a
/// 4200mV cell, lockout at 2580mV, input DPM at 4520mV, watchdog off.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeConfig {
    /// Input current limit in mA (50-500, 30mA steps).
    pub input_current_ma: u16,
    /// Input DPM voltage in mV (3880-5080, 80mV steps).
    pub vin_dpm_mv: u16,
    /// Battery undervoltage lockout threshold.
    pub uvlo: UnderVoltageLockout,
    /// Fast-charge current in mA (8-456, 8mA steps).
    pub charge_current_ma: u16,
    /// Discharge current limit in mA (200-3200, 200mA steps).
    pub discharge_current_ma: u16,
    /// Charge termination voltage in mV (3600-4545, 15mV steps).
    pub charge_voltage_mv: u16,
    /// Watchdog timeout in seconds (0, 40, 80 or 160; 0 disables).
    pub watchdog_s: u8,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            input_current_ma: 500,
            vin_dpm_mv: 4520,
            uvlo: UnderVoltageLockout::Mv2580,
            charge_current_ma: 256,
            discharge_current_ma: 2000,
            charge_voltage_mv: 4200,
            watchdog_s: 0,
        }
    }
}

/// AW32001 charger driver.
pub struct Aw32001<I2C> {
    i2c: I2C,
}

impl<I2C, E> Aw32001<I2C>
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

    fn read_reg(&mut self, register: u8) -> Result<u8, Error<E>> {
        let mut value = [0u8];
        self.i2c.write_read(I2C_ADDR, &[register], &mut value)?;
        Ok(value[0])
    }

    fn write_reg(&mut self, register: u8, value: u8) -> Result<(), Error<E>> {
        self.i2c.write(I2C_ADDR, &[register, value])?;
        Ok(())
    }

    /// Rewrite one field of a register, leaving sibling fields alone.
    fn update_field(&mut self, register: u8, mask: u8, bits: u8) -> Result<(), Error<E>> {
        let current = self.read_reg(register)?;
        self.write_reg(register, (current & !mask) | (bits & mask))
    }

    /// Establish the power-on configuration: every limit below, then
    /// charging enabled.
    pub fn init(&mut self, config: &ChargeConfig) -> Result<(), Error<E>> {
        self.set_input_current_limit(config.input_current_ma)?;
        self.set_vin_dpm_voltage(config.vin_dpm_mv)?;
        self.set_battery_uvlo(config.uvlo)?;
        self.set_charge_current(config.charge_current_ma)?;
        self.set_discharge_current(config.discharge_current_ma)?;
        self.set_charge_voltage(config.charge_voltage_mv)?;
        self.set_watchdog_timer(config.watchdog_s)?;
        self.set_charge_enable(true)?;
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "aw32001: charging {=u16}mA to {=u16}mV",
            config.charge_current_ma,
            config.charge_voltage_mv
        );
        Ok(())
    }

    /// Gate the charge path on or off. Other main-control bits are left
    /// untouched.
    pub fn set_charge_enable(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.update_field(reg::MAIN_CTRL, CHG_EN, if enable { CHG_EN } else { 0 })
    }

    /// Shorthand for [`Self::set_charge_enable`] with `true`.
    pub fn enable_charge(&mut self) -> Result<(), Error<E>> {
        self.set_charge_enable(true)
    }

    /// Input current limit, 50-500mA in 30mA steps.
    pub fn set_input_current_limit(&mut self, ma: u16) -> Result<(), Error<E>> {
        let code = field_code(ma, 50, 500, 30);
        self.update_field(reg::INPUT_SRC, IIN_LIM_MASK, code)
    }

    /// Input DPM threshold, 3880-5080mV in 80mV steps. Below this input
    /// voltage the chip throttles input current rather than collapse the
    /// source.
    pub fn set_vin_dpm_voltage(&mut self, mv: u16) -> Result<(), Error<E>> {
        let code = field_code(mv, 3880, 5080, 80);
        self.update_field(reg::INPUT_SRC, VIN_DPM_MASK, code << VIN_DPM_SHIFT)
    }

    /// Battery undervoltage lockout. Already discrete, no quantization.
    pub fn set_battery_uvlo(&mut self, uvlo: UnderVoltageLockout) -> Result<(), Error<E>> {
        self.update_field(reg::POWER_ON_CFG, UVLO_MASK, uvlo.code() << UVLO_SHIFT)
    }

    /// Fast-charge current, 8-456mA in 8mA steps.
    pub fn set_charge_current(&mut self, ma: u16) -> Result<(), Error<E>> {
        let code = field_code(ma, 8, 456, 8);
        self.update_field(reg::CHG_CURRENT, ICHG_MASK, code)
    }

    /// Discharge current limit, 200-3200mA in 200mA steps.
    pub fn set_discharge_current(&mut self, ma: u16) -> Result<(), Error<E>> {
        let code = field_code(ma, 200, 3200, 200);
        self.update_field(reg::TERM_CURRENT, IDSCHG_MASK, code << IDSCHG_SHIFT)
    }

    /// Charge termination voltage, 3600-4545mV in 15mV steps.
    pub fn set_charge_voltage(&mut self, mv: u16) -> Result<(), Error<E>> {
        let code = field_code(mv, 3600, 4545, 15);
        self.update_field(reg::CHG_VOLTAGE, VREG_MASK, code << VREG_SHIFT)
    }

    /// Charge watchdog timeout in seconds, nearest of 0, 40, 80 or 160;
    /// 0 disables the watchdog.
    ///
    /// With the watchdog running the chip reverts to hardware defaults
    /// unless [`Self::feed_watchdog`] is called in time - scheduling that
    /// is the caller's obligation.
    pub fn set_watchdog_timer(&mut self, seconds: u8) -> Result<(), Error<E>> {
        let code = match seconds {
            0..=19 => 0,
            20..=59 => 1,
            60..=119 => 2,
            _ => 3,
        };
        self.update_field(reg::TIMER_WD, WATCHDOG_MASK, code << WATCHDOG_SHIFT)
    }

    /// Reset the watchdog countdown. The bit self-clears in hardware.
    pub fn feed_watchdog(&mut self) -> Result<(), Error<E>> {
        self.update_field(reg::POWER_ON_CFG, WD_RST, WD_RST)
    }

    /// Ship mode disconnects the battery from the system load for
    /// storage; the device looks powered off until physically woken.
    pub fn set_ship_mode(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.update_field(reg::SYS_CTRL, FET_DIS, if enable { FET_DIS } else { 0 })
    }

    /// Hi-Z disconnects the input source from the system rail, forcing
    /// battery-only operation; `false` restores the normal pass-through.
    pub fn set_hi_z(&mut self, enable: bool) -> Result<(), Error<E>> {
        self.update_field(reg::MAIN_CTRL, EN_HIZ, if enable { EN_HIZ } else { 0 })
    }

    /// Decode the charge-status field from a fresh status register read.
    pub fn charge_status(&mut self) -> Result<ChargeStatus, Error<E>> {
        let status = self.read_reg(reg::SYS_STATUS)?;
        Ok(ChargeStatus::from_field(
            (status & CHG_STAT_MASK) >> CHG_STAT_SHIFT,
        ))
    }

    /// Raw fault status register.
    pub fn fault_status(&mut self) -> Result<u8, Error<E>> {
        self.read_reg(reg::FAULT_STATUS)
    }

    /// Raw chip identification register.
    pub fn chip_id(&mut self) -> Result<u8, Error<E>> {
        self.read_reg(reg::CHIP_ID)
    }
}
