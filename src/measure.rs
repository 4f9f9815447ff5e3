//! Text width measurement.
//!
//! The renderer never shapes text itself; it asks a [`TextMeasure`] for the
//! width of each visual line unless the host already supplied one.

use std::sync::Arc;

use crate::text::LineMetrics;

/// Measures the advance width of a run of text in pixels.
pub trait TextMeasure {
    /// Returns `None` when the width cannot be determined.
    fn text_width(&self, text: &str) -> Option<f32>;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> Option<f32>,
{
    fn text_width(&self, text: &str) -> Option<f32> {
        self(text)
    }
}

/// Monospace measurer: every character advances by the same amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance(pub f32);

impl TextMeasure for FixedAdvance {
    fn text_width(&self, text: &str) -> Option<f32> {
        Some(text.chars().count() as f32 * self.0)
    }
}

/// Measures with a `fontdue` font at a fixed pixel size.
///
/// Widths are the sum of glyph advances plus pair kerning, which is what a
/// text view uses to place the next run.
#[derive(Clone)]
pub struct FontMeasure {
    font: Arc<fontdue::Font>,
    px: f32,
}

impl FontMeasure {
    pub fn new(font: Arc<fontdue::Font>, px: f32) -> Self {
        Self { font, px }
    }

    pub fn font_size(&self) -> f32 {
        self.px
    }

    /// Vertical metrics for stacking lines set in this font.
    pub fn line_metrics(&self) -> Option<LineMetrics> {
        self.font.horizontal_line_metrics(self.px).map(Into::into)
    }
}

impl TextMeasure for FontMeasure {
    fn text_width(&self, text: &str) -> Option<f32> {
        if !self.px.is_finite() || self.px <= 0.0 {
            return None;
        }

        let mut width = 0.0;
        let mut previous: Option<u16> = None;
        for ch in text.chars() {
            let glyph = self.font.lookup_glyph_index(ch);
            if let Some(prev) = previous {
                width += self
                    .font
                    .horizontal_kern_indexed(prev, glyph, self.px)
                    .unwrap_or(0.0);
            }
            width += self.font.metrics_indexed(glyph, self.px).advance_width;
            previous = Some(glyph);
        }
        Some(width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_advance_counts_chars_not_bytes() {
        assert_eq!(FixedAdvance(8.0).text_width("héllo"), Some(40.0));
        assert_eq!(FixedAdvance(8.0).text_width(""), Some(0.0));
    }

    #[test]
    fn closures_measure_too() {
        let unavailable = |_: &str| -> Option<f32> { None };
        assert_eq!(unavailable.text_width("abc"), None);

        let doubled = |s: &str| Some(s.len() as f32 * 2.0);
        assert_eq!(doubled.text_width("abc"), Some(6.0));
    }
}
