use crate::error::RenderError;
use crate::geometry::ResolvedRect;
use crate::measure::TextMeasure;
use crate::style::{OutlineStyle, StyleConfig};
use crate::surface::Surface;
use crate::text::Line;

use super::step_renderer::{ResolvedLine, paint_ring, resolve_line};
use super::{LineBackground, PassReport, RenderState};

/// Bordered stepped background.
///
/// The width of each line is resolved once, against the inner cutout. The
/// outer ring is the same shape grown by [`OutlineStyle::ring_width`] on every
/// side, so both layers step together.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OutlineRenderer {
    style: OutlineStyle,
}

impl OutlineRenderer {
    pub fn new(style: OutlineStyle) -> Self {
        Self {
            style: style.sanitized(),
        }
    }

    pub fn style(&self) -> &OutlineStyle {
        &self.style
    }

    fn paint_outer(
        &self,
        surface: &mut dyn Surface,
        inner: &StyleConfig,
        resolved: &ResolvedLine,
    ) -> Result<ResolvedRect, RenderError> {
        let ring = self.style.ring_width();
        let geometry = resolved.geometry.inflate(ring);
        let previous = resolved.previous.map(|p| p.inflate(ring));
        paint_ring(
            surface,
            &geometry,
            previous.as_ref(),
            inner,
            self.style.outer_color,
        )
        .map_err(|e| e.at_line(geometry.line_number))?;
        Ok(geometry.rect())
    }

    fn paint_inner(
        &self,
        surface: &mut dyn Surface,
        inner: &StyleConfig,
        resolved: &ResolvedLine,
    ) -> Result<(), RenderError> {
        paint_ring(
            surface,
            &resolved.geometry,
            resolved.previous.as_ref(),
            inner,
            self.style.inner_color,
        )
        .map_err(|e| e.at_line(resolved.geometry.line_number))
    }
}

impl LineBackground for OutlineRenderer {
    /// Paints the ring and then the cutout of a single line.
    ///
    /// Painting line by line lets the next line's ring cover the bottom of
    /// this line's cutout where the two overlap; [`render_pass`] avoids that
    /// by painting every ring first.
    ///
    /// [`render_pass`]: LineBackground::render_pass
    fn render_line(
        &self,
        surface: &mut dyn Surface,
        line: &Line<'_>,
        measure: &dyn TextMeasure,
        state: &mut RenderState,
    ) -> Result<ResolvedRect, RenderError> {
        let inner = self.style.inner();
        let resolved = resolve_line(&inner, line, measure, state)?;
        let painted = self
            .paint_outer(surface, &inner, &resolved)
            .and_then(|rect| {
                self.paint_inner(surface, &inner, &resolved)?;
                Ok(rect)
            });
        if painted.is_err() {
            state.reset();
        }
        painted
    }

    fn render_pass(
        &self,
        surface: &mut dyn Surface,
        lines: &[Line<'_>],
        measure: &dyn TextMeasure,
    ) -> PassReport {
        let inner = self.style.inner();
        let mut state = RenderState::new();
        let mut report = PassReport::default();
        let mut rings = Vec::with_capacity(lines.len());

        for line in lines {
            let result = resolve_line(&inner, line, measure, &mut state).and_then(|resolved| {
                self.paint_outer(surface, &inner, &resolved)?;
                Ok(resolved)
            });
            match result {
                Ok(resolved) => rings.push(resolved),
                Err(e) => {
                    state.reset();
                    report.record(Err(e));
                }
            }
        }

        for resolved in &rings {
            let result = self
                .paint_inner(surface, &inner, resolved)
                .map(|()| resolved.geometry.rect());
            report.record(result);
        }
        report.failures.sort_by_key(RenderError::line);

        log::debug!(
            "outline pass: {} painted, {} skipped",
            report.painted,
            report.failures.len()
        );
        report
    }
}
