use crate::Text::TextMeasure;
use x11rb::protocol::xproto::{Charinfo, QueryFontReply};

/// Per-glyph advances of an X core font, laid out the way the server reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphTable {
    pub min_byte1: u8,
    pub max_byte1: u8,
    pub min_char_or_byte2: u16,
    pub max_char_or_byte2: u16,
    /// Row-major advances, one row per first byte. Empty when every glyph
    /// shares the font's maximum bounds.
    pub widths: Vec<u32>,
    /// Advance used for characters the font does not cover.
    pub default_width: u32,
}

/// Measurements of an opened font, computed locally so that wrapping does
/// not cost a server round trip per candidate line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMetrics {
    pub ascent: u32,
    pub descent: u32,
    pub max_advance: u32,
    glyphs: GlyphTable,
}

fn advance(info: &Charinfo) -> u32 {
    u32::try_from(info.character_width).unwrap_or(0)
}

fn non_negative(v: i16) -> u32 {
    u32::try_from(v).unwrap_or(0)
}

impl FontMetrics {
    pub fn new(ascent: u32, descent: u32, max_advance: u32, glyphs: GlyphTable) -> Self {
        Self {
            ascent,
            descent,
            max_advance,
            glyphs,
        }
    }

    pub fn from_reply(reply: &QueryFontReply) -> Self {
        let max_advance = advance(&reply.max_bounds);
        let mut glyphs = GlyphTable {
            min_byte1: reply.min_byte1,
            max_byte1: reply.max_byte1,
            min_char_or_byte2: reply.min_char_or_byte2,
            max_char_or_byte2: reply.max_char_or_byte2,
            widths: reply.char_infos.iter().map(advance).collect(),
            default_width: max_advance,
        };
        let default_char = char::from_u32(u32::from(reply.default_char));
        if let Some(width) = default_char.and_then(|c| glyphs.lookup(c)) {
            glyphs.default_width = width;
        }

        Self::new(
            non_negative(reply.font_ascent),
            non_negative(reply.font_descent),
            max_advance,
            glyphs,
        )
    }

    pub fn line_height(&self) -> u32 {
        self.ascent + self.descent
    }

    pub fn char_width(&self, c: char) -> u32 {
        if self.glyphs.widths.is_empty() {
            return self.max_advance;
        }
        self.glyphs.lookup(c).unwrap_or(self.glyphs.default_width)
    }
}

impl GlyphTable {
    fn lookup(&self, c: char) -> Option<u32> {
        let code = u32::from(c);
        if code > 0xFFFF {
            return None;
        }
        let byte1 = (code >> 8) as u8;
        let byte2 = (code & 0xFF) as u16;

        if byte1 < self.min_byte1 || byte1 > self.max_byte1 {
            return None;
        }
        if byte2 < self.min_char_or_byte2 || byte2 > self.max_char_or_byte2 {
            return None;
        }

        let columns = usize::from(self.max_char_or_byte2 - self.min_char_or_byte2) + 1;
        let index = usize::from(byte1 - self.min_byte1) * columns
            + usize::from(byte2 - self.min_char_or_byte2);

        // zero-width entries are glyphs the font does not actually have
        self.widths.get(index).copied().filter(|&w| w > 0)
    }
}

impl TextMeasure for FontMetrics {
    fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .map(|c| self.char_width(c))
            .fold(0u32, u32::saturating_add)
    }

    fn max_advance(&self) -> u32 {
        self.max_advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Latin-1 only font: 'i' is narrow, 'W' is wide, everything else 8px.
    fn latin1() -> FontMetrics {
        let mut widths = vec![8; 256];
        widths[usize::from(b'i')] = 4;
        widths[usize::from(b'W')] = 12;
        widths[0x7F] = 0;
        FontMetrics::new(
            14,
            4,
            12,
            GlyphTable {
                min_byte1: 0,
                max_byte1: 0,
                min_char_or_byte2: 0,
                max_char_or_byte2: 255,
                widths,
                default_width: 8,
            },
        )
    }

    #[test]
    fn sums_per_glyph_advances() {
        let font = latin1();
        assert_eq!(font.text_width("iW"), 16);
        assert_eq!(font.text_width(""), 0);
        assert_eq!(font.line_height(), 18);
    }

    #[test]
    fn uncovered_characters_use_default_width() {
        let font = latin1();
        assert_eq!(font.char_width('\u{7F}'), 8);
        assert_eq!(font.char_width('€'), 8);
        assert_eq!(font.char_width('🦀'), 8);
    }

    #[test]
    fn two_byte_fonts_index_by_row() {
        let font = FontMetrics::new(
            10,
            2,
            9,
            GlyphTable {
                min_byte1: 0x20,
                max_byte1: 0x21,
                min_char_or_byte2: 0xAC,
                max_char_or_byte2: 0xAD,
                widths: vec![1, 2, 3, 4],
                default_width: 9,
            },
        );
        assert_eq!(font.char_width('\u{20AC}'), 1);
        assert_eq!(font.char_width('\u{20AD}'), 2);
        assert_eq!(font.char_width('\u{21AC}'), 3);
        assert_eq!(font.char_width('\u{21AD}'), 4);
        assert_eq!(font.char_width('a'), 9);
    }

    #[test]
    fn empty_table_means_monospace_max_bounds() {
        let font = FontMetrics::new(
            10,
            2,
            7,
            GlyphTable {
                min_byte1: 0,
                max_byte1: 0,
                min_char_or_byte2: 0,
                max_char_or_byte2: 255,
                widths: Vec::new(),
                default_width: 7,
            },
        );
        assert_eq!(font.text_width("hello"), 35);
    }
}
