//! Text measurement service.

use serde::{Deserialize, Serialize};

/// Base font size every measurement is taken at.
pub const TEXT_BASE_FONT_SIZE_PX: f32 = 16.0;
/// Line pitch multiplier for wrapped text.
pub const TEXT_LINE_HEIGHT_FACTOR: f32 = 1.5;

/// Fixed line pitch used when wrapping rich text.
pub fn text_line_height_px() -> f32 {
    TEXT_BASE_FONT_SIZE_PX * TEXT_LINE_HEIGHT_FACTOR
}

/// Weight and slant of measured text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontStyle {
    /// CSS-like font weight (400 regular, 700 bold).
    pub weight: u16,
    /// Italic slant.
    pub italic: bool,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            weight: 400,
            italic: false,
        }
    }
}

impl FontStyle {
    /// True for weights at or above 600.
    pub fn is_bold(self) -> bool {
        self.weight >= 600
    }
}

/// Width measurement hook for line fitting.
///
/// Implementations may wrap a stateful rendering surface. One measurer can
/// be shared across independent pagination runs, so implementations must be
/// `Send + Sync` and synchronize any internal state themselves.
pub trait TextMeasurer: Send + Sync {
    /// Rendered width of `text` at [`TEXT_BASE_FONT_SIZE_PX`].
    fn measure_text_px(&self, text: &str, style: FontStyle) -> f32;
}

/// Glyph-class width model used when no rendering surface is installed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeuristicMeasurer;

impl TextMeasurer for HeuristicMeasurer {
    fn measure_text_px(&self, text: &str, style: FontStyle) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let em_sum: f32 = text.chars().map(proportional_glyph_em_width).sum();
        let mut scale = 1.0;
        if style.is_bold() {
            scale += 0.03;
        }
        if style.italic {
            scale += 0.01;
        }
        em_sum * TEXT_BASE_FONT_SIZE_PX * scale
    }
}

fn proportional_glyph_em_width(ch: char) -> f32 {
    match ch {
        ' ' | '\u{00A0}' => 0.32,
        '\t' => 1.28,
        'i' | 'l' | 'I' | '|' | '!' => 0.24,
        '.' | ',' | ':' | ';' | '\'' | '"' | '`' => 0.23,
        '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' => 0.34,
        '(' | ')' | '[' | ']' | '{' | '}' => 0.30,
        'f' | 't' | 'j' | 'r' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' | '#' => 0.74,
        c if c.is_ascii_digit() => 0.52,
        c if c.is_ascii_uppercase() => 0.64,
        c if c.is_ascii_lowercase() => 0.52,
        c if c.is_whitespace() => 0.32,
        c if c.is_ascii_punctuation() => 0.42,
        // CJK and other wide scripts.
        c if c as u32 >= 0x2E80 => 1.0,
        _ => 0.56,
    }
}

/// Fixed advance per character, regardless of style.
///
/// Deterministic stand-in for headless runs and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance of every character, in px.
    pub char_width_px: f32,
}

impl MonospaceMeasurer {
    /// Measurer with the given per-character advance.
    pub fn new(char_width_px: f32) -> Self {
        Self { char_width_px }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(TEXT_BASE_FONT_SIZE_PX * 0.6)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_text_px(&self, text: &str, _style: FontStyle) -> f32 {
        text.chars().count() as f32 * self.char_width_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_height_is_fixed() {
        assert_eq!(text_line_height_px(), 24.0);
    }

    #[test]
    fn heuristic_bold_is_wider_than_regular() {
        let m = HeuristicMeasurer;
        let regular = m.measure_text_px("Pagination", FontStyle::default());
        let bold = m.measure_text_px(
            "Pagination",
            FontStyle {
                weight: 700,
                italic: false,
            },
        );
        assert!(regular > 0.0);
        assert!(bold > regular);
    }

    #[test]
    fn heuristic_narrow_glyphs_measure_less() {
        let m = HeuristicMeasurer;
        let narrow = m.measure_text_px("illi", FontStyle::default());
        let wide = m.measure_text_px("mwMW", FontStyle::default());
        assert!(narrow < wide);
        assert_eq!(m.measure_text_px("", FontStyle::default()), 0.0);
    }

    #[test]
    fn monospace_counts_chars_not_bytes() {
        let m = MonospaceMeasurer::new(10.0);
        assert_eq!(m.measure_text_px("abc", FontStyle::default()), 30.0);
        assert_eq!(m.measure_text_px(" é", FontStyle::default()), 20.0);
    }
}
