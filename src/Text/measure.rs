/// Pixel measurement seam between the layout engine and whatever renders glyphs.
pub trait TextMeasure {
    /// Rendered width of `text` in pixels.
    fn text_width(&self, text: &str) -> u32;

    /// Advance of the widest glyph in the font, used to seed line-length guesses.
    fn max_advance(&self) -> u32;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn text_width(&self, text: &str) -> u32 {
        (**self).text_width(text)
    }

    fn max_advance(&self) -> u32 {
        (**self).max_advance()
    }
}

/// Every character is `advance` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAdvance(pub u32);

impl TextMeasure for FixedAdvance {
    fn text_width(&self, text: &str) -> u32 {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        chars.saturating_mul(self.0)
    }

    fn max_advance(&self) -> u32 {
        self.0
    }
}
