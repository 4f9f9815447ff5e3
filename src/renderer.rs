//! Line background renderers.
//!
//! A pass walks the visible lines top to bottom. For every line the renderer
//! resolves a drawn width with the [stepper](crate::stepper), paints a rounded
//! rectangle, and, from the second line on, paints the join shapes that blend
//! it into the line above. The only state carried between lines is the
//! previous line's [`LineGeometry`], held in an explicit [`RenderState`].

pub mod joins;
mod outline_renderer;
mod step_renderer;

pub use joins::{Corner, Join, Side, join_table};
pub use outline_renderer::OutlineRenderer;
pub use step_renderer::StepRenderer;

use crate::error::RenderError;
use crate::geometry::{Point, ResolvedRect};
use crate::measure::TextMeasure;
use crate::surface::Surface;
use crate::text::Line;

/// Resolved horizontal and vertical extent of one painted line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineGeometry {
    pub line_number: usize,
    /// Width after step smoothing; equals `right - left`.
    pub drawn_width: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl LineGeometry {
    pub fn rect(&self) -> ResolvedRect {
        ResolvedRect::new(
            Point::new(self.left, self.top),
            Point::new(self.right, self.bottom),
        )
    }

    pub fn edge(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Grows the geometry by `amount` on all four sides.
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            line_number: self.line_number,
            drawn_width: self.drawn_width + 2.0 * amount,
            left: self.left - amount,
            right: self.right + amount,
            top: self.top - amount,
            bottom: self.bottom + amount,
        }
    }
}

/// State carried from one line to the next within a pass.
///
/// `previous == None` is the uninitialized state: the next line is drawn
/// without joins and keeps its measured width. Reset it whenever the text
/// changes, otherwise the first line of the new text joins to stale geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderState {
    previous: Option<LineGeometry>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }

    pub fn is_active(&self) -> bool {
        self.previous.is_some()
    }

    pub fn previous(&self) -> Option<&LineGeometry> {
        self.previous.as_ref()
    }
}

/// Outcome of a whole pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassReport {
    /// Lines whose background was painted.
    pub painted: usize,
    /// Lines that were skipped, in line order.
    pub failures: Vec<RenderError>,
}

impl PassReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub(crate) fn record(&mut self, result: Result<ResolvedRect, RenderError>) {
        match result {
            Ok(_) => self.painted += 1,
            Err(e) => {
                log::warn!("skipping line background: {e}");
                self.failures.push(e);
            }
        }
    }
}

/// A background style that can be painted line by line.
pub trait LineBackground {
    /// Paints the background of one line and advances `state`.
    ///
    /// Lines must arrive in increasing `line_number` order. On error nothing
    /// more is drawn for this line and `state` is reset, so the following line
    /// starts a fresh shape instead of joining to a gap.
    fn render_line(
        &self,
        surface: &mut dyn Surface,
        line: &Line<'_>,
        measure: &dyn TextMeasure,
        state: &mut RenderState,
    ) -> Result<ResolvedRect, RenderError>;

    /// Paints every line of `lines` with a fresh [`RenderState`].
    ///
    /// A failing line is skipped and reported; the rest are still painted.
    fn render_pass(
        &self,
        surface: &mut dyn Surface,
        lines: &[Line<'_>],
        measure: &dyn TextMeasure,
    ) -> PassReport {
        let mut state = RenderState::new();
        let mut report = PassReport::default();
        for line in lines {
            report.record(self.render_line(surface, line, measure, &mut state));
        }
        log::debug!(
            "background pass: {} painted, {} skipped",
            report.painted,
            report.failures.len()
        );
        report
    }
}
