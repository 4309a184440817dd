//! Board wiring constants
//!
//! Which net sits on which expander pin. Chip A (0x43) carries the radio
//! and power-path controls, chip B (0x44) the display, LED and keys.

use crate::pin::ExpanderPin;

/// LoRa low-noise amplifier enable.
pub const LORA_LNA_ENABLE: ExpanderPin = ExpanderPin::from_code(0x000);
/// LoRa RF antenna switch control.
pub const LORA_ANTENNA_SWITCH: ExpanderPin = ExpanderPin::from_code(0x001);
/// LoRa module power enable.
pub const LORA_ENABLE: ExpanderPin = ExpanderPin::from_code(0x002);
/// System power-off latch.
pub const POWEROFF: ExpanderPin = ExpanderPin::from_code(0x003);
/// Grove connector 5V rail enable.
pub const GROVE_POWER_EN: ExpanderPin = ExpanderPin::from_code(0x004);
/// External supply presence sense.
pub const VIN_DETECT: ExpanderPin = ExpanderPin::from_code(0x005);

/// LCD panel reset, active low.
pub const LCD_RESET: ExpanderPin = ExpanderPin::from_code(0x100);
/// LCD backlight enable.
pub const LCD_BACKLIGHT: ExpanderPin = ExpanderPin::from_code(0x101);
/// User LED.
pub const LED_BUILTIN: ExpanderPin = ExpanderPin::from_code(0x102);
/// Side key 1, active low.
pub const KEY1: ExpanderPin = ExpanderPin::from_code(0x103);
/// Side key 2, active low.
pub const KEY2: ExpanderPin = ExpanderPin::from_code(0x104);
