use std::ops::Range;

use crate::measure::TextMeasure;
use crate::text::Line;

/// Vertical font metrics used to stack lines.
///
/// Same sign convention as `fontdue`: `descent` is negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

impl LineMetrics {
    pub fn line_height(&self) -> f32 {
        self.ascent - self.descent + self.line_gap
    }
}

impl From<fontdue::LineMetrics> for LineMetrics {
    fn from(m: fontdue::LineMetrics) -> Self {
        Self {
            ascent: m.ascent,
            descent: m.descent,
            line_gap: m.line_gap,
        }
    }
}

/// Knobs for [`Paragraph::layout`].
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphConfig {
    /// Right bound of the text container, copied into every line.
    pub right: f32,
    /// Wrap width. `None` only breaks on hard line breaks.
    pub max_width: Option<f32>,
    pub line_height_scale: f32,
    /// Y coordinate of the first line's top.
    pub top: f32,
}

impl Default for ParagraphConfig {
    fn default() -> Self {
        Self {
            right: 0.0,
            max_width: None,
            line_height_scale: 1.0,
            top: 0.0,
        }
    }
}

/// A paragraph broken into visual lines.
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph<'a> {
    pub lines: Vec<Line<'a>>,
    pub total_height: f32,
}

impl<'a> Paragraph<'a> {
    /// Breaks `text` into lines and stacks them top to bottom.
    ///
    /// `'\n'` always ends a line. With `max_width` set, words are packed
    /// greedily; a single word wider than the limit keeps its own line.
    /// Trailing whitespace is left out of each line's range so the background
    /// hugs the visible text.
    pub fn layout(
        text: &'a str,
        metrics: LineMetrics,
        config: &ParagraphConfig,
        measure: &dyn TextMeasure,
    ) -> Self {
        let line_height = (metrics.line_height() * config.line_height_scale).max(0.0);
        let mut cursor_y = config.top;
        let mut lines = Vec::new();

        for hard in hard_lines(text) {
            for range in wrap(text, hard, config.max_width, measure) {
                let line_number = lines.len();
                lines.push(Line {
                    text,
                    start: range.start,
                    end: range.end,
                    top: cursor_y,
                    baseline: cursor_y + metrics.ascent,
                    bottom: cursor_y + line_height,
                    right: config.right,
                    line_number,
                    measured_width: None,
                });
                cursor_y += line_height;
            }
        }

        Self {
            lines,
            total_height: cursor_y - config.top,
        }
    }
}

fn hard_lines(text: &str) -> impl Iterator<Item = Range<usize>> + '_ {
    let mut start = 0;
    text.split('\n').map(move |part| {
        let range = start..start + part.len();
        start = range.end + 1;
        range
    })
}

/// Byte ranges of the non-whitespace runs inside `range`.
fn words(text: &str, range: Range<usize>) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut word_start = None;
    for (offset, ch) in text[range.clone()].char_indices() {
        let at = range.start + offset;
        match (ch.is_whitespace(), word_start) {
            (true, Some(s)) => {
                out.push(s..at);
                word_start = None;
            }
            (false, None) => word_start = Some(at),
            _ => {}
        }
    }
    if let Some(s) = word_start {
        out.push(s..range.end);
    }
    out
}

fn wrap(
    text: &str,
    hard: Range<usize>,
    max_width: Option<f32>,
    measure: &dyn TextMeasure,
) -> Vec<Range<usize>> {
    let words = words(text, hard.clone());
    let (Some(first), Some(limit)) = (words.first(), max_width) else {
        // no wrapping: one line from the first word to the last
        return match (words.first(), words.last()) {
            (Some(first), Some(last)) => vec![first.start..last.end],
            _ => vec![hard.start..hard.start],
        };
    };

    let mut out = Vec::new();
    let mut line = first.clone();
    for word in &words[1..] {
        let fits = measure
            .text_width(&text[line.start..word.end])
            .is_none_or(|width| width <= limit);
        if fits {
            line.end = word.end;
        } else {
            out.push(line);
            line = word.clone();
        }
    }
    out.push(line);
    out
}
