//! Virtual pin identity
//!
//! The board routes most of its slow GPIO through two 8-bit I2C port
//! expanders instead of native MCU pins. A pin is identified by a 9-bit
//! code: bit 8 selects the expander chip, bits 0-7 the pin index within
//! that chip. The decode is a pure function of the code, so the named
//! constants in [`crate::board`] can live in `const` context.

/// One of the two port expander chips on the board.
///
/// Chip `A` answers at I2C address `0x43`, chip `B` at `0x44`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpanderChip {
    A,
    B,
}

impl ExpanderChip {
    /// 7-bit I2C address of this chip.
    pub const fn address(self) -> u8 {
        match self {
            ExpanderChip::A => 0x43,
            ExpanderChip::B => 0x44,
        }
    }

    /// Dense index (0 or 1) for per-chip state tables.
    pub const fn index(self) -> usize {
        match self {
            ExpanderChip::A => 0,
            ExpanderChip::B => 1,
        }
    }
}

/// A pin on one of the two expander chips.
///
/// Stateless value type: two pins built from the same code compare equal
/// and address the same hardware bit. Per-chip runtime state (the one-time
/// configuration latch) is owned by the GPIO driver, not by the pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExpanderPin {
    chip: ExpanderChip,
    index: u8,
}

impl ExpanderPin {
    /// Build a pin from its chip and index.
    pub const fn new(chip: ExpanderChip, index: u8) -> Self {
        Self { chip, index }
    }

    /// Decode the board's 9-bit pin encoding.
    ///
    /// Bit 8 selects the chip (`0` = chip A at 0x43, `1` = chip B at 0x44),
    /// bits 0-7 are the pin index. Bits above 8 are ignored.
    pub const fn from_code(code: u16) -> Self {
        let chip = if code & 0x100 != 0 {
            ExpanderChip::B
        } else {
            ExpanderChip::A
        };
        Self {
            chip,
            index: (code & 0xFF) as u8,
        }
    }

    /// The chip this pin lives on.
    pub const fn chip(self) -> ExpanderChip {
        self.chip
    }

    /// Pin index within the chip's register layout.
    pub const fn index(self) -> u8 {
        self.index
    }
}

/// Pin configuration, mirroring what the expander silicon supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// High-impedance input, pulls disabled.
    Input,
    /// Input with the internal pull-up enabled.
    InputPullup,
    /// Input with the internal pull-down enabled.
    InputPulldown,
    /// Push-pull output.
    Output,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn low_codes_select_chip_a() {
        let pin = ExpanderPin::from_code(0x05);
        assert_eq!(pin.chip(), ExpanderChip::A);
        assert_eq!(pin.chip().address(), 0x43);
        assert_eq!(pin.index(), 5);
    }

    #[test]
    fn bit_eight_selects_chip_b() {
        let pin = ExpanderPin::from_code(0x102);
        assert_eq!(pin.chip(), ExpanderChip::B);
        assert_eq!(pin.chip().address(), 0x44);
        assert_eq!(pin.index(), 2);
    }

    #[test]
    fn decode_is_pure() {
        // Same code, same pin - regardless of how often it is decoded.
        assert_eq!(ExpanderPin::from_code(0x1A3), ExpanderPin::from_code(0x1A3));
        assert_eq!(
            ExpanderPin::from_code(0x07),
            ExpanderPin::new(ExpanderChip::A, 7)
        );
    }

    proptest! {
        #[test]
        fn decode_matches_bit_layout(code in any::<u16>()) {
            let pin = ExpanderPin::from_code(code);
            let expected_addr = if code & 0x100 != 0 { 0x44 } else { 0x43 };
            prop_assert_eq!(pin.chip().address(), expected_addr);
            prop_assert_eq!(pin.index(), (code & 0xFF) as u8);
        }
    }
}
