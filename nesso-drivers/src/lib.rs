//! I2C register drivers for the Nesso N1 companion chips
//!
//! Concrete drivers for the board's four I2C devices, generic over
//! [`embedded_hal::i2c::I2c`]:
//!
//! - Port expander virtual GPIO (two PI4IOE5V6408-class chips)
//! - AW32001 battery charger
//! - BQ27220 fuel gauge
//! - FT6x36 touch panel
//!
//! All four share one physical bus. The drivers take no locks and run
//! strictly blocking; hand each one a shared-bus device (for example from
//! `embedded-hal-bus`) or otherwise serialize access yourself.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod aw32001;
pub mod bq27220;
pub mod error;
pub mod expander;
pub mod ft6x36;

#[cfg(test)]
pub(crate) mod testbus;

pub use aw32001::{Aw32001, ChargeConfig};
pub use bq27220::Bq27220;
pub use error::Error;
pub use expander::ExpanderGpio;
pub use ft6x36::{Ft6x36, TouchPoint};
