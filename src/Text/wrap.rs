//! Greedy line wrapping against a pixel width budget.
//!
//! Lines are cut at the first explicit newline in the window that fits,
//! otherwise at the last space before the first glyph that overflows, and
//! only as a last resort in the middle of a word.

use super::measure::TextMeasure;

/// Ordered display lines produced by the layout engine.
pub type LineBuffer = Vec<String>;

/// One step of the wrap loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBreak {
    /// Byte length of the line content.
    pub end: usize,
    /// Bytes to advance the cursor by. Larger than `end` when a newline or a
    /// word-separating space was consumed as the break.
    pub consumed: usize,
}

/// Find where the next display line of `text` ends.
///
/// Returns `None` once the input is exhausted. Every other call consumes at
/// least one character, even when a single glyph is wider than `max_width`.
pub fn next_line<M: TextMeasure + ?Sized>(
    text: &str,
    max_width: u32,
    measure: &M,
) -> Option<LineBreak> {
    if text.is_empty() {
        return None;
    }

    // bounds[n] is the byte offset just past the first n characters
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = bounds.len() - 1;

    let overflows = measure.text_width(text) > max_width;
    let fit = if overflows {
        greedy_fit(text, &bounds, max_width, measure)
    } else {
        char_count
    };

    if let Some(newline) = text[..bounds[fit]].find('\n') {
        return Some(LineBreak {
            end: newline,
            consumed: newline + 1,
        });
    }

    let hard_cut = LineBreak {
        end: bounds[fit],
        consumed: bounds[fit],
    };
    if !overflows || fit >= char_count {
        return Some(hard_cut);
    }

    // Walk back from the first glyph that did not fit to the nearest space.
    let mut space = fit;
    while space > 0 && !text[bounds[space]..].starts_with(' ') {
        space -= 1;
    }

    if space == 0 {
        Some(hard_cut)
    } else {
        Some(LineBreak {
            end: bounds[space],
            consumed: bounds[space] + 1,
        })
    }
}

/// Largest character count whose prefix fits, given the whole text does not.
fn greedy_fit<M: TextMeasure + ?Sized>(
    text: &str,
    bounds: &[usize],
    max_width: u32,
    measure: &M,
) -> usize {
    let char_count = bounds.len() - 1;
    let width_of = |n: usize| measure.text_width(&text[..bounds[n]]);

    let seed = (max_width / measure.max_advance().max(1)) as usize;
    let mut len = seed.min(char_count - 1);

    while len > 0 && width_of(len) > max_width {
        len -= 1;
    }
    while len + 1 < char_count && width_of(len + 1) <= max_width {
        len += 1;
    }

    len.max(1)
}

/// Wrap a single message token into display lines.
pub fn wrap<M: TextMeasure + ?Sized>(text: &str, max_width: u32, measure: &M) -> LineBuffer {
    let mut lines = LineBuffer::new();
    let mut rest = text;

    while let Some(brk) = next_line(rest, max_width, measure) {
        lines.push(rest[..brk.end].to_owned());
        rest = &rest[brk.consumed..];
    }

    lines
}

/// Wrap every token independently and concatenate the results in order.
pub fn wrap_tokens<I, S, M>(tokens: I, max_width: u32, measure: &M) -> LineBuffer
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    M: TextMeasure + ?Sized,
{
    let mut lines = LineBuffer::new();
    for token in tokens {
        lines.extend(wrap(token.as_ref(), max_width, measure));
    }
    tracing::debug!(lines = lines.len(), max_width, "wrapped message");
    lines
}
