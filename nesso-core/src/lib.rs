//! Board-agnostic types for the Nesso N1 board support
//!
//! This crate contains everything that does not need a bus handle:
//!
//! - Virtual pin identity for the two I2C port expanders
//! - Board wiring constants (which net sits on which expander pin)
//! - Charger value types (charge status, undervoltage lockout levels)
//! - Battery telemetry snapshot type
//!
//! The drivers that move bytes over I2C live in `nesso-drivers`.

#![no_std]
#![deny(unsafe_code)]

pub mod board;
pub mod charge;
pub mod pin;
pub mod telemetry;

pub use charge::{ChargeStatus, UnderVoltageLockout};
pub use pin::{ExpanderChip, ExpanderPin, PinMode};
pub use telemetry::BatteryTelemetry;
