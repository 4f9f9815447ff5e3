/// One visual line of a paragraph, as produced by the host's line layout.
///
/// **Y-axis goes down**: `top < baseline < bottom`. Lines of one pass are fed
/// to the renderer in increasing `line_number` order, starting at `0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line<'a> {
    /// The whole paragraph; the visual line is `text[start..end]`.
    pub text: &'a str,
    /// Byte offset of the first character of this line.
    pub start: usize,
    /// Byte offset one past the last character of this line.
    pub end: usize,
    pub top: f32,
    pub baseline: f32,
    pub bottom: f32,
    /// Right bound of the text container.
    pub right: f32,
    pub line_number: usize,
    /// Width already measured by the host. When `None` the renderer asks its
    /// [`TextMeasure`](crate::measure::TextMeasure).
    pub measured_width: Option<f32>,
}

impl<'a> Line<'a> {
    /// A line spanning all of `text`, with empty vertical metrics.
    pub fn new(text: &'a str, line_number: usize) -> Self {
        Self {
            text,
            start: 0,
            end: text.len(),
            top: 0.0,
            baseline: 0.0,
            bottom: 0.0,
            right: 0.0,
            line_number,
            measured_width: None,
        }
    }

    pub fn with_range(mut self, start: usize, end: usize) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn with_vertical(mut self, top: f32, baseline: f32, bottom: f32) -> Self {
        self.top = top;
        self.baseline = baseline;
        self.bottom = bottom;
        self
    }

    pub fn with_right(mut self, right: f32) -> Self {
        self.right = right;
        self
    }

    pub fn with_measured_width(mut self, width: f32) -> Self {
        self.measured_width = Some(width);
        self
    }

    /// Characters of this visual line.
    ///
    /// `None` when the offsets are out of range or split a character.
    pub fn slice(&self) -> Option<&'a str> {
        self.text.get(self.start..self.end)
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}
