//! Byte/bit layout of the G13 input report
//!
//! The layout is plain constant data handed to the decoder, so a different
//! hardware revision (or a test) can supply its own table.
//!
//! Report format of the retail device:
//! ```text
//! ┌──────┬─────────┬─────────┬────────┬─────────┬──────────┬──────────┬──────────────┐
//! │ ID   │ STICK X │ STICK Y │ G1-G8  │ G9-G16  │ G17-G22  │ BD L1-L4 │ MR LEFT DOWN │
//! │      │         │         │        │         │          │ M1-M3    │ STICK        │
//! │ 0    │ 1       │ 2       │ 3      │ 4       │ 5        │ 6        │ 7            │
//! └──────┴─────────┴─────────┴────────┴─────────┴──────────┴──────────┴──────────────┘
//! ```

use crate::buttons::{ButtonId, ButtonSet};

/// Minimum length of a G13 report in bytes
pub const G13_REPORT_LEN: usize = 8;

/// Layout validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// An entry points at a byte outside the minimum report length
    ByteOutOfRange(ButtonId),
    /// An entry uses a bit index above 7
    BitOutOfRange(ButtonId),
    /// An entry maps a reserved bit
    ReservedBit(ButtonId),
    /// Two entries map the same byte/bit
    DuplicateBit(ButtonId),
    /// A button is listed twice
    DuplicateButton(ButtonId),
    /// A stick axis offset lies outside the minimum report length
    StickOutOfRange,
}

/// One entry of the button table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonBit {
    pub button: ButtonId,
    pub byte: usize,
    pub bit: u8,
}

impl ButtonBit {
    pub const fn new(button: ButtonId, byte: usize, bit: u8) -> Self {
        Self { button, byte, bit }
    }
}

/// Report layout: button table, stick offsets and reserved bits
#[derive(Debug, Clone, Copy)]
pub struct ButtonLayout {
    /// Button to (byte, bit) table
    pub buttons: &'static [ButtonBit],
    /// Byte offset of the stick X axis
    pub stick_x: usize,
    /// Byte offset of the stick Y axis
    pub stick_y: usize,
    /// Reports shorter than this are malformed
    pub min_len: usize,
    /// (byte, mask) pairs cleared before any bit is tested
    pub reserved: &'static [(usize, u8)],
}

const G13_BUTTONS: [ButtonBit; 34] = [
    ButtonBit::new(ButtonId::G1, 3, 0),
    ButtonBit::new(ButtonId::G2, 3, 1),
    ButtonBit::new(ButtonId::G3, 3, 2),
    ButtonBit::new(ButtonId::G4, 3, 3),
    ButtonBit::new(ButtonId::G5, 3, 4),
    ButtonBit::new(ButtonId::G6, 3, 5),
    ButtonBit::new(ButtonId::G7, 3, 6),
    ButtonBit::new(ButtonId::G8, 3, 7),
    ButtonBit::new(ButtonId::G9, 4, 0),
    ButtonBit::new(ButtonId::G10, 4, 1),
    ButtonBit::new(ButtonId::G11, 4, 2),
    ButtonBit::new(ButtonId::G12, 4, 3),
    ButtonBit::new(ButtonId::G13, 4, 4),
    ButtonBit::new(ButtonId::G14, 4, 5),
    ButtonBit::new(ButtonId::G15, 4, 6),
    ButtonBit::new(ButtonId::G16, 4, 7),
    ButtonBit::new(ButtonId::G17, 5, 0),
    ButtonBit::new(ButtonId::G18, 5, 1),
    ButtonBit::new(ButtonId::G19, 5, 2),
    ButtonBit::new(ButtonId::G20, 5, 3),
    ButtonBit::new(ButtonId::G21, 5, 4),
    ButtonBit::new(ButtonId::G22, 5, 5),
    ButtonBit::new(ButtonId::Bd, 6, 0),
    ButtonBit::new(ButtonId::L1, 6, 1),
    ButtonBit::new(ButtonId::L2, 6, 2),
    ButtonBit::new(ButtonId::L3, 6, 3),
    ButtonBit::new(ButtonId::L4, 6, 4),
    ButtonBit::new(ButtonId::M1, 6, 5),
    ButtonBit::new(ButtonId::M2, 6, 6),
    ButtonBit::new(ButtonId::M3, 6, 7),
    ButtonBit::new(ButtonId::Mr, 7, 0),
    ButtonBit::new(ButtonId::Left, 7, 1),
    ButtonBit::new(ButtonId::Down, 7, 2),
    ButtonBit::new(ButtonId::Stick, 7, 3),
];

// Byte 5 bits 6-7 are unused. Byte 7 bit 7 reports the backlight state and
// is set in almost every report.
const G13_RESERVED: [(usize, u8); 2] = [(5, 0xC0), (7, 0xF0)];

impl ButtonLayout {
    /// Layout of the retail G13
    pub const G13: ButtonLayout = ButtonLayout {
        buttons: &G13_BUTTONS,
        stick_x: 1,
        stick_y: 2,
        min_len: G13_REPORT_LEN,
        reserved: &G13_RESERVED,
    };

    /// Mask applied to `byte` before testing button bits
    pub fn keep_mask(&self, byte: usize) -> u8 {
        self.reserved
            .iter()
            .filter(|(b, _)| *b == byte)
            .fold(0xFF, |mask, (_, reserved)| mask & !reserved)
    }

    /// Look up the table entry for a button
    pub fn locate(&self, button: ButtonId) -> Option<ButtonBit> {
        self.buttons.iter().copied().find(|entry| entry.button == button)
    }

    /// Check the table for inconsistencies
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.stick_x >= self.min_len || self.stick_y >= self.min_len {
            return Err(LayoutError::StickOutOfRange);
        }

        let mut seen = ButtonSet::new();
        for (i, entry) in self.buttons.iter().enumerate() {
            if entry.byte >= self.min_len {
                return Err(LayoutError::ByteOutOfRange(entry.button));
            }
            if entry.bit > 7 {
                return Err(LayoutError::BitOutOfRange(entry.button));
            }
            if self.keep_mask(entry.byte) & (1 << entry.bit) == 0 {
                return Err(LayoutError::ReservedBit(entry.button));
            }
            if seen.contains(entry.button) {
                return Err(LayoutError::DuplicateButton(entry.button));
            }
            seen.insert(entry.button);

            let clash = self.buttons[..i]
                .iter()
                .any(|other| other.byte == entry.byte && other.bit == entry.bit);
            if clash {
                return Err(LayoutError::DuplicateBit(entry.button));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_g13_layout_is_valid() {
        assert_eq!(ButtonLayout::G13.validate(), Ok(()));
        assert_eq!(ButtonLayout::G13.buttons.len(), ButtonId::ALL.len());
    }

    #[test]
    fn test_locate() {
        let g1 = ButtonLayout::G13.locate(ButtonId::G1).unwrap();
        assert_eq!((g1.byte, g1.bit), (3, 0));

        let stick = ButtonLayout::G13.locate(ButtonId::Stick).unwrap();
        assert_eq!((stick.byte, stick.bit), (7, 3));
    }

    #[test]
    fn test_keep_mask() {
        assert_eq!(ButtonLayout::G13.keep_mask(3), 0xFF);
        assert_eq!(ButtonLayout::G13.keep_mask(5), 0x3F);
        assert_eq!(ButtonLayout::G13.keep_mask(7), 0x0F);
    }

    #[test]
    fn test_reserved_bit_rejected() {
        static TABLE: [ButtonBit; 1] = [ButtonBit::new(ButtonId::G1, 7, 7)];
        let layout = ButtonLayout {
            buttons: &TABLE,
            ..ButtonLayout::G13
        };
        assert_eq!(layout.validate(), Err(LayoutError::ReservedBit(ButtonId::G1)));
    }

    #[test]
    fn test_duplicate_bit_rejected() {
        static TABLE: [ButtonBit; 2] = [
            ButtonBit::new(ButtonId::G1, 3, 0),
            ButtonBit::new(ButtonId::G2, 3, 0),
        ];
        let layout = ButtonLayout {
            buttons: &TABLE,
            ..ButtonLayout::G13
        };
        assert_eq!(layout.validate(), Err(LayoutError::DuplicateBit(ButtonId::G2)));
    }

    #[test]
    fn test_duplicate_button_rejected() {
        static TABLE: [ButtonBit; 2] = [
            ButtonBit::new(ButtonId::G1, 3, 0),
            ButtonBit::new(ButtonId::G1, 3, 1),
        ];
        let layout = ButtonLayout {
            buttons: &TABLE,
            ..ButtonLayout::G13
        };
        assert_eq!(
            layout.validate(),
            Err(LayoutError::DuplicateButton(ButtonId::G1))
        );
    }

    #[test]
    fn test_out_of_range_entries_rejected() {
        static PAST_END: [ButtonBit; 1] = [ButtonBit::new(ButtonId::G1, 8, 0)];
        let layout = ButtonLayout {
            buttons: &PAST_END,
            ..ButtonLayout::G13
        };
        assert_eq!(
            layout.validate(),
            Err(LayoutError::ByteOutOfRange(ButtonId::G1))
        );

        static BAD_BIT: [ButtonBit; 1] = [ButtonBit::new(ButtonId::G1, 3, 8)];
        let layout = ButtonLayout {
            buttons: &BAD_BIT,
            ..ButtonLayout::G13
        };
        assert_eq!(
            layout.validate(),
            Err(LayoutError::BitOutOfRange(ButtonId::G1))
        );

        let layout = ButtonLayout {
            stick_y: 9,
            ..ButtonLayout::G13
        };
        assert_eq!(layout.validate(), Err(LayoutError::StickOutOfRange));
    }
}
