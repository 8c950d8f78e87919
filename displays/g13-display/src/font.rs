//! Bitmap fonts
//!
//! Glyphs are stored column-major: one byte per column, bit 0 is the top
//! row. This matches the LCD's column-byte layout so a glyph column can be
//! blitted bit by bit without transposing.

/// A fixed-width bitmap font covering a contiguous character range
#[derive(Debug, Clone, Copy)]
pub struct Font {
    /// Glyph width in pixels (bytes per glyph)
    pub width: u8,
    /// Glyph height in pixels
    pub height: u8,
    /// Default gap between glyphs
    pub spacing: u8,
    /// First character in the table
    pub first: u8,
    /// Flattened glyph columns, `width` bytes per character
    pub glyphs: &'static [u8],
}

impl Font {
    /// Number of characters in the table
    pub fn len(&self) -> usize {
        self.glyphs.len() / self.width as usize
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Horizontal advance per character with the given spacing
    pub fn advance(&self, spacing: u8) -> i32 {
        self.width as i32 + spacing as i32
    }

    /// Whether the font has a glyph for `ch`
    pub fn contains(&self, ch: char) -> bool {
        self.index_of(ch).is_some()
    }

    /// Glyph columns for `ch`; characters outside the table render as `?`
    pub fn glyph(&self, ch: char) -> &'static [u8] {
        let index = self
            .index_of(ch)
            .or_else(|| self.index_of('?'))
            .unwrap_or(0);
        let start = index * self.width as usize;
        let end = start + self.width as usize;
        self.glyphs.get(start..end).unwrap_or(&[])
    }

    fn index_of(&self, ch: char) -> Option<usize> {
        let code = ch as u32;
        let first = self.first as u32;
        if code < first {
            return None;
        }
        let index = (code - first) as usize;
        (index < self.len()).then_some(index)
    }
}

/// 5x7 font, ASCII 0x20..=0x7E
pub const FONT_5X7: Font = Font {
    width: 5,
    height: 7,
    spacing: 1,
    first: 0x20,
    glyphs: &GLYPHS_5X7,
};

/// Small font: 3-pixel glyphs in a 4-column cell, 6 rows with descenders,
/// ASCII 0x20..=0x7E
pub const FONT_4X6: Font = Font {
    width: 3,
    height: 6,
    spacing: 1,
    first: 0x20,
    glyphs: &GLYPHS_4X6,
};

#[rustfmt::skip]
const GLYPHS_5X7: [u8; 95 * 5] = [
    0x00, 0x00, 0x00, 0x00, 0x00, // space
    0x00, 0x00, 0x5F, 0x00, 0x00, // '!'
    0x00, 0x07, 0x00, 0x07, 0x00, // '"'
    0x14, 0x7F, 0x14, 0x7F, 0x14, // '#'
    0x24, 0x2A, 0x7F, 0x2A, 0x12, // '$'
    0x23, 0x13, 0x08, 0x64, 0x62, // '%'
    0x36, 0x49, 0x55, 0x22, 0x50, // '&'
    0x00, 0x05, 0x03, 0x00, 0x00, // '''
    0x00, 0x1C, 0x22, 0x41, 0x00, // '('
    0x00, 0x41, 0x22, 0x1C, 0x00, // ')'
    0x08, 0x2A, 0x1C, 0x2A, 0x08, // '*'
    0x08, 0x08, 0x3E, 0x08, 0x08, // '+'
    0x00, 0x50, 0x30, 0x00, 0x00, // ','
    0x08, 0x08, 0x08, 0x08, 0x08, // '-'
    0x00, 0x60, 0x60, 0x00, 0x00, // '.'
    0x20, 0x10, 0x08, 0x04, 0x02, // '/'
    0x3E, 0x51, 0x49, 0x45, 0x3E, // '0'
    0x00, 0x42, 0x7F, 0x40, 0x00, // '1'
    0x42, 0x61, 0x51, 0x49, 0x46, // '2'
    0x21, 0x41, 0x45, 0x4B, 0x31, // '3'
    0x18, 0x14, 0x12, 0x7F, 0x10, // '4'
    0x27, 0x45, 0x45, 0x45, 0x39, // '5'
    0x3C, 0x4A, 0x49, 0x49, 0x30, // '6'
    0x01, 0x71, 0x09, 0x05, 0x03, // '7'
    0x36, 0x49, 0x49, 0x49, 0x36, // '8'
    0x06, 0x49, 0x49, 0x29, 0x1E, // '9'
    0x00, 0x36, 0x36, 0x00, 0x00, // ':'
    0x00, 0x56, 0x36, 0x00, 0x00, // ';'
    0x08, 0x14, 0x22, 0x41, 0x00, // '<'
    0x14, 0x14, 0x14, 0x14, 0x14, // '='
    0x00, 0x41, 0x22, 0x14, 0x08, // '>'
    0x02, 0x01, 0x51, 0x09, 0x06, // '?'
    0x32, 0x49, 0x79, 0x41, 0x3E, // '@'
    0x7E, 0x11, 0x11, 0x11, 0x7E, // 'A'
    0x7F, 0x49, 0x49, 0x49, 0x36, // 'B'
    0x3E, 0x41, 0x41, 0x41, 0x22, // 'C'
    0x7F, 0x41, 0x41, 0x22, 0x1C, // 'D'
    0x7F, 0x49, 0x49, 0x49, 0x41, // 'E'
    0x7F, 0x09, 0x09, 0x09, 0x01, // 'F'
    0x3E, 0x41, 0x49, 0x49, 0x7A, // 'G'
    0x7F, 0x08, 0x08, 0x08, 0x7F, // 'H'
    0x00, 0x41, 0x7F, 0x41, 0x00, // 'I'
    0x20, 0x40, 0x41, 0x3F, 0x01, // 'J'
    0x7F, 0x08, 0x14, 0x22, 0x41, // 'K'
    0x7F, 0x40, 0x40, 0x40, 0x40, // 'L'
    0x7F, 0x02, 0x0C, 0x02, 0x7F, // 'M'
    0x7F, 0x04, 0x08, 0x10, 0x7F, // 'N'
    0x3E, 0x41, 0x41, 0x41, 0x3E, // 'O'
    0x7F, 0x09, 0x09, 0x09, 0x06, // 'P'
    0x3E, 0x41, 0x51, 0x21, 0x5E, // 'Q'
    0x7F, 0x09, 0x19, 0x29, 0x46, // 'R'
    0x46, 0x49, 0x49, 0x49, 0x31, // 'S'
    0x01, 0x01, 0x7F, 0x01, 0x01, // 'T'
    0x3F, 0x40, 0x40, 0x40, 0x3F, // 'U'
    0x1F, 0x20, 0x40, 0x20, 0x1F, // 'V'
    0x3F, 0x40, 0x38, 0x40, 0x3F, // 'W'
    0x63, 0x14, 0x08, 0x14, 0x63, // 'X'
    0x07, 0x08, 0x70, 0x08, 0x07, // 'Y'
    0x61, 0x51, 0x49, 0x45, 0x43, // 'Z'
    0x00, 0x7F, 0x41, 0x41, 0x00, // '['
    0x02, 0x04, 0x08, 0x10, 0x20, // '\'
    0x00, 0x41, 0x41, 0x7F, 0x00, // ']'
    0x04, 0x02, 0x01, 0x02, 0x04, // '^'
    0x40, 0x40, 0x40, 0x40, 0x40, // '_'
    0x00, 0x01, 0x02, 0x04, 0x00, // '`'
    0x20, 0x54, 0x54, 0x54, 0x78, // 'a'
    0x7F, 0x48, 0x44, 0x44, 0x38, // 'b'
    0x38, 0x44, 0x44, 0x44, 0x20, // 'c'
    0x38, 0x44, 0x44, 0x48, 0x7F, // 'd'
    0x38, 0x54, 0x54, 0x54, 0x18, // 'e'
    0x08, 0x7E, 0x09, 0x01, 0x02, // 'f'
    0x0C, 0x52, 0x52, 0x52, 0x3E, // 'g'
    0x7F, 0x08, 0x04, 0x04, 0x78, // 'h'
    0x00, 0x44, 0x7D, 0x40, 0x00, // 'i'
    0x20, 0x40, 0x44, 0x3D, 0x00, // 'j'
    0x7F, 0x10, 0x28, 0x44, 0x00, // 'k'
    0x00, 0x41, 0x7F, 0x40, 0x00, // 'l'
    0x7C, 0x04, 0x18, 0x04, 0x78, // 'm'
    0x7C, 0x08, 0x04, 0x04, 0x78, // 'n'
    0x38, 0x44, 0x44, 0x44, 0x38, // 'o'
    0x7C, 0x14, 0x14, 0x14, 0x08, // 'p'
    0x08, 0x14, 0x14, 0x18, 0x7C, // 'q'
    0x7C, 0x08, 0x04, 0x04, 0x08, // 'r'
    0x48, 0x54, 0x54, 0x54, 0x20, // 's'
    0x04, 0x3F, 0x44, 0x40, 0x20, // 't'
    0x3C, 0x40, 0x40, 0x20, 0x7C, // 'u'
    0x1C, 0x20, 0x40, 0x20, 0x1C, // 'v'
    0x3C, 0x40, 0x30, 0x40, 0x3C, // 'w'
    0x44, 0x28, 0x10, 0x28, 0x44, // 'x'
    0x0C, 0x50, 0x50, 0x50, 0x3C, // 'y'
    0x44, 0x64, 0x54, 0x4C, 0x44, // 'z'
    0x00, 0x08, 0x36, 0x41, 0x00, // '{'
    0x00, 0x00, 0x7F, 0x00, 0x00, // '|'
    0x00, 0x41, 0x36, 0x08, 0x00, // '}'
    0x08, 0x04, 0x08, 0x10, 0x08, // '~'
];

#[rustfmt::skip]
const GLYPHS_4X6: [u8; 95 * 3] = [
    0x00, 0x00, 0x00, // space
    0x00, 0x17, 0x00, // '!'
    0x03, 0x00, 0x03, // '"'
    0x1F, 0x0A, 0x1F, // '#'
    0x12, 0x1F, 0x09, // '$'
    0x09, 0x04, 0x12, // '%'
    0x0F, 0x17, 0x1C, // '&'
    0x00, 0x03, 0x00, // '''
    0x00, 0x0E, 0x11, // '('
    0x11, 0x0E, 0x00, // ')'
    0x05, 0x02, 0x05, // '*'
    0x04, 0x0E, 0x04, // '+'
    0x10, 0x08, 0x00, // ','
    0x04, 0x04, 0x04, // '-'
    0x00, 0x10, 0x00, // '.'
    0x18, 0x04, 0x03, // '/'
    0x1E, 0x11, 0x0F, // '0'
    0x02, 0x1F, 0x00, // '1'
    0x19, 0x15, 0x12, // '2'
    0x11, 0x15, 0x0A, // '3'
    0x07, 0x04, 0x1F, // '4'
    0x17, 0x15, 0x09, // '5'
    0x1E, 0x15, 0x1D, // '6'
    0x19, 0x05, 0x03, // '7'
    0x1F, 0x15, 0x1F, // '8'
    0x17, 0x15, 0x0F, // '9'
    0x00, 0x0A, 0x00, // ':'
    0x10, 0x0A, 0x00, // ';'
    0x04, 0x0A, 0x11, // '<'
    0x0A, 0x0A, 0x0A, // '='
    0x11, 0x0A, 0x04, // '>'
    0x01, 0x15, 0x03, // '?'
    0x0E, 0x11, 0x16, // '@'
    0x1E, 0x05, 0x1E, // 'A'
    0x1F, 0x15, 0x0A, // 'B'
    0x0E, 0x11, 0x11, // 'C'
    0x1F, 0x11, 0x0E, // 'D'
    0x1F, 0x15, 0x15, // 'E'
    0x1F, 0x05, 0x05, // 'F'
    0x0E, 0x11, 0x1D, // 'G'
    0x1F, 0x04, 0x1F, // 'H'
    0x11, 0x1F, 0x11, // 'I'
    0x08, 0x10, 0x0F, // 'J'
    0x1F, 0x04, 0x1B, // 'K'
    0x1F, 0x10, 0x10, // 'L'
    0x1F, 0x06, 0x1F, // 'M'
    0x1F, 0x0E, 0x1F, // 'N'
    0x0E, 0x11, 0x0E, // 'O'
    0x1F, 0x05, 0x02, // 'P'
    0x0E, 0x19, 0x1E, // 'Q'
    0x1F, 0x0D, 0x16, // 'R'
    0x12, 0x15, 0x09, // 'S'
    0x01, 0x1F, 0x01, // 'T'
    0x0F, 0x10, 0x1F, // 'U'
    0x07, 0x18, 0x07, // 'V'
    0x1F, 0x0C, 0x1F, // 'W'
    0x1B, 0x04, 0x1B, // 'X'
    0x03, 0x1C, 0x03, // 'Y'
    0x19, 0x15, 0x13, // 'Z'
    0x1F, 0x11, 0x11, // '['
    0x03, 0x04, 0x18, // '\'
    0x11, 0x11, 0x1F, // ']'
    0x02, 0x01, 0x02, // '^'
    0x10, 0x10, 0x10, // '_'
    0x01, 0x02, 0x00, // '`'
    0x1A, 0x16, 0x1C, // 'a'
    0x1F, 0x12, 0x0C, // 'b'
    0x0C, 0x12, 0x12, // 'c'
    0x0C, 0x12, 0x1F, // 'd'
    0x0C, 0x1A, 0x16, // 'e'
    0x04, 0x1E, 0x05, // 'f'
    0x04, 0x2A, 0x1E, // 'g'
    0x1F, 0x02, 0x1C, // 'h'
    0x00, 0x1D, 0x00, // 'i'
    0x10, 0x20, 0x1D, // 'j'
    0x1F, 0x0C, 0x12, // 'k'
    0x11, 0x1F, 0x10, // 'l'
    0x1E, 0x0E, 0x1E, // 'm'
    0x1E, 0x02, 0x1C, // 'n'
    0x0C, 0x12, 0x0C, // 'o'
    0x3E, 0x12, 0x0C, // 'p'
    0x0C, 0x12, 0x3E, // 'q'
    0x1C, 0x02, 0x02, // 'r'
    0x14, 0x1E, 0x0A, // 's'
    0x02, 0x1F, 0x12, // 't'
    0x0E, 0x10, 0x1E, // 'u'
    0x0E, 0x18, 0x0E, // 'v'
    0x1E, 0x1C, 0x1E, // 'w'
    0x12, 0x0C, 0x12, // 'x'
    0x06, 0x28, 0x1E, // 'y'
    0x1A, 0x1E, 0x16, // 'z'
    0x04, 0x1F, 0x11, // '{'
    0x00, 0x1B, 0x00, // '|'
    0x11, 0x1F, 0x04, // '}'
    0x02, 0x03, 0x01, // '~'
];
