/// Pixel geometry of a laid-out popup. Read-only once computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub line_count: u32,
    /// Height of one text line (font ascent + descent).
    pub line_height: u32,
    /// Distance from the top of a line to its baseline.
    pub ascent: u32,
    pub line_spacing: u32,
    /// Inner padding on every side of the text block.
    pub padding: u32,
    /// Outer window width, padding included.
    pub width: u32,
}

impl LayoutMetrics {
    /// Width available to text once padding is taken off both sides.
    pub fn text_width_budget(width: u32, padding: u32) -> u32 {
        width.saturating_sub(padding.saturating_mul(2))
    }

    pub fn height(&self) -> u32 {
        let lines = self.line_count.saturating_mul(self.line_height);
        let gaps = self
            .line_count
            .saturating_sub(1)
            .saturating_mul(self.line_spacing);
        lines
            .saturating_add(gaps)
            .saturating_add(self.padding.saturating_mul(2))
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height())
    }

    /// Vertical stacking space this popup claims: its height plus one padding
    /// worth of gap before the next popup.
    pub fn extent(&self) -> u32 {
        self.height().saturating_add(self.padding)
    }

    /// Baseline y coordinate of line `index`, relative to the window.
    pub fn baseline(&self, index: u32) -> u32 {
        let pitch = self.line_height.saturating_add(self.line_spacing);
        self.padding
            .saturating_add(index.saturating_mul(pitch))
            .saturating_add(self.ascent)
    }
}
