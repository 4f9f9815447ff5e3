use crate::error::{RenderError, SurfaceError};
use crate::geometry::{Color, ResolvedRect};
use crate::measure::TextMeasure;
use crate::stepper::{WidthDelta, resolve_width};
use crate::style::StyleConfig;
use crate::surface::Surface;
use crate::text::Line;

use super::{LineBackground, LineGeometry, RenderState, join_table};

/// Filled stepped background: one rounded rectangle per line plus joins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepRenderer {
    style: StyleConfig,
}

impl StepRenderer {
    pub fn new(style: StyleConfig) -> Self {
        Self {
            style: style.sanitized(),
        }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

impl LineBackground for StepRenderer {
    fn render_line(
        &self,
        surface: &mut dyn Surface,
        line: &Line<'_>,
        measure: &dyn TextMeasure,
        state: &mut RenderState,
    ) -> Result<ResolvedRect, RenderError> {
        let resolved = resolve_line(&self.style, line, measure, state)?;
        paint_ring(
            surface,
            &resolved.geometry,
            resolved.previous.as_ref(),
            &self.style,
            self.style.fill_color,
        )
        .map_err(|e| {
            state.reset();
            e.at_line(line.line_number)
        })?;
        Ok(resolved.geometry.rect())
    }
}

/// A line's geometry together with the geometry it joins to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ResolvedLine {
    pub geometry: LineGeometry,
    pub previous: Option<LineGeometry>,
}

/// Measures a line, steps its width and advances `state`.
///
/// Line `0` always starts over. A line that does not follow the carried one
/// is treated the same way; a pass that restarts mid-block just loses its
/// joins for that line instead of borrowing stale geometry.
pub(crate) fn resolve_line(
    style: &StyleConfig,
    line: &Line<'_>,
    measure: &dyn TextMeasure,
    state: &mut RenderState,
) -> Result<ResolvedLine, RenderError> {
    let line_number = line.line_number;
    let previous = match state.previous {
        _ if line_number == 0 => None,
        Some(prev) if prev.line_number < line_number => Some(prev),
        Some(prev) => {
            log::warn!(
                "line {line_number} arrived after line {}; restarting the shape",
                prev.line_number
            );
            None
        }
        None => {
            log::debug!("line {line_number} has no line above it; starting a new shape");
            None
        }
    };

    let text_width = match line
        .measured_width
        .or_else(|| line.slice().and_then(|text| measure.text_width(text)))
    {
        Some(width) => width,
        None => {
            log::warn!(
                "{}; using zero width",
                RenderError::MeasurementUnavailable { line: line_number }
            );
            0.0
        }
    };

    let mut invalid = |reason: String| {
        state.reset();
        RenderError::InvalidGeometry {
            line: line_number,
            reason,
        }
    };

    if !text_width.is_finite() || text_width < 0.0 {
        return Err(invalid(format!("text width {text_width}")));
    }
    if !line.top.is_finite() || !line.bottom.is_finite() || line.height() < 0.0 {
        return Err(invalid(format!(
            "vertical bounds {}..{}",
            line.top, line.bottom
        )));
    }

    let measured_width = text_width + 2.0 * style.padding;
    let drawn_width = resolve_width(
        measured_width,
        previous.map_or(0.0, |p| p.drawn_width),
        style.corner_radius,
        previous.is_none(),
    );
    let (left, right) = style
        .alignment
        .horizontal_bounds(drawn_width, line.right, style.padding);

    if !left.is_finite() || !right.is_finite() || right < left {
        return Err(invalid(format!("horizontal bounds {left}..{right}")));
    }

    let geometry = LineGeometry {
        line_number,
        drawn_width,
        left,
        right,
        top: line.top,
        bottom: line.bottom,
    };
    state.previous = Some(geometry);

    Ok(ResolvedLine { geometry, previous })
}

/// Paints one line's rectangle and, if there is a line above, its joins.
pub(crate) fn paint_ring(
    surface: &mut dyn Surface,
    geometry: &LineGeometry,
    previous: Option<&LineGeometry>,
    style: &StyleConfig,
    color: Color,
) -> Result<(), SurfaceError> {
    let radius = style.corner_radius;
    surface.fill_round_rect(geometry.rect(), radius, color)?;

    let Some(previous) = previous else {
        return Ok(());
    };
    let delta = WidthDelta::between(previous.drawn_width, geometry.drawn_width);
    for join in join_table(style.alignment, delta) {
        surface.fill_path(&join.path(previous, geometry, radius), color)?;
    }
    Ok(())
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::measure::FixedAdvance;
    use crate::renderer::{Corner, Join, Side};
    use crate::style::Alignment;
    use crate::surface::{CpuSurface, DrawCommand, RecordingSurface};

    const LINE_HEIGHT: f32 = 20.0;

    fn lines<'a>(texts: &[&'a str], right: f32) -> Vec<Line<'a>> {
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let top = i as f32 * LINE_HEIGHT;
                Line::new(text, i)
                    .with_vertical(top, top + 15.0, top + LINE_HEIGHT)
                    .with_right(right)
            })
            .collect()
    }

    fn widths<'a>(widths: &[f32], right: f32) -> Vec<Line<'a>> {
        let mut out = lines(&vec![""; widths.len()], right);
        for (line, &w) in out.iter_mut().zip(widths) {
            line.measured_width = Some(w);
        }
        out
    }

    fn style(alignment: Alignment) -> StyleConfig {
        StyleConfig::default()
            .with_padding(4.0)
            .with_corner_radius(5.0)
            .with_alignment(alignment)
    }

    fn rects(surface: &RecordingSurface) -> Vec<(f32, f32)> {
        surface.round_rects().map(|r| (r.min.x, r.max.x)).collect()
    }

    #[test]
    fn three_line_scenario_resolves_exact_widths() {
        let renderer = StepRenderer::new(style(Alignment::Start));
        let mut surface = RecordingSurface::new();
        let report = renderer.render_pass(
            &mut surface,
            &widths(&[100.0, 96.0, 150.0], 300.0),
            &FixedAdvance(10.0),
        );

        assert!(report.is_complete());
        assert_eq!(report.painted, 3);
        // 108; 104 snaps up to 108; 158 is a hard step
        assert_eq!(
            rects(&surface),
            vec![(-4.0, 104.0), (-4.0, 104.0), (-4.0, 154.0)]
        );
    }

    #[test]
    fn single_line_draws_only_its_rectangle() {
        let renderer = StepRenderer::new(style(Alignment::Center));
        let mut surface = RecordingSurface::new();
        renderer.render_pass(&mut surface, &lines(&["hello"], 300.0), &FixedAdvance(10.0));

        assert_eq!(surface.commands.len(), 1);
        assert!(matches!(surface.commands[0], DrawCommand::RoundRect { .. }));
    }

    #[test]
    fn equal_widths_join_with_two_bevels() {
        for alignment in [Alignment::Start, Alignment::Center, Alignment::End] {
            let renderer = StepRenderer::new(style(alignment));
            let mut surface = RecordingSurface::new();
            renderer.render_pass(
                &mut surface,
                &lines(&["same", "size"], 300.0),
                &FixedAdvance(10.0),
            );

            let previous = LineGeometry {
                line_number: 0,
                drawn_width: 48.0,
                left: 0.0,
                right: 0.0,
                top: 0.0,
                bottom: LINE_HEIGHT,
            };
            let (left, right) = alignment.horizontal_bounds(48.0, 300.0, 4.0);
            let previous = LineGeometry {
                left,
                right,
                ..previous
            };
            let current = LineGeometry {
                line_number: 1,
                top: LINE_HEIGHT,
                bottom: 2.0 * LINE_HEIGHT,
                ..previous
            };

            let paths: Vec<_> = surface.paths().cloned().collect();
            assert_eq!(paths.len(), 2, "{alignment:?}");
            for path in &paths {
                let is_bevel = [Side::Left, Side::Right]
                    .iter()
                    .any(|&side| *path == Join::Bevel(side).path(&previous, &current, 5.0));
                assert!(is_bevel, "{alignment:?} drew a hook");
            }
        }
    }

    #[test]
    fn start_alignment_picks_hooks_on_the_right() {
        let renderer = StepRenderer::new(style(Alignment::Start));
        let mut surface = RecordingSurface::new();
        // 108 -> 158 (widen) -> 58 (narrow)
        renderer.render_pass(
            &mut surface,
            &widths(&[100.0, 150.0, 50.0], 300.0),
            &FixedAdvance(10.0),
        );

        let l0 = LineGeometry {
            line_number: 0,
            drawn_width: 108.0,
            left: -4.0,
            right: 104.0,
            top: 0.0,
            bottom: 20.0,
        };
        let l1 = LineGeometry {
            line_number: 1,
            drawn_width: 158.0,
            right: 154.0,
            top: 20.0,
            bottom: 40.0,
            ..l0
        };
        let l2 = LineGeometry {
            line_number: 2,
            drawn_width: 58.0,
            right: 54.0,
            top: 40.0,
            bottom: 60.0,
            ..l0
        };

        let paths: Vec<_> = surface.paths().cloned().collect();
        assert_eq!(
            paths,
            vec![
                Join::Bevel(Side::Left).path(&l0, &l1, 5.0),
                Join::Hook(Side::Right, Corner::Convex).path(&l0, &l1, 5.0),
                Join::Bevel(Side::Left).path(&l1, &l2, 5.0),
                Join::Hook(Side::Right, Corner::Concave).path(&l1, &l2, 5.0),
            ]
        );
    }

    #[test]
    fn end_alignment_mirrors_start() {
        let right = 300.0;
        let start = StepRenderer::new(style(Alignment::Start));
        let end = StepRenderer::new(style(Alignment::End));
        let input = widths(&[100.0, 96.0, 150.0, 20.0], right);

        let mut start_surface = RecordingSurface::new();
        let mut end_surface = RecordingSurface::new();
        start.render_pass(&mut start_surface, &input, &FixedAdvance(10.0));
        end.render_pass(&mut end_surface, &input, &FixedAdvance(10.0));

        for (s, e) in start_surface.round_rects().zip(end_surface.round_rects()) {
            assert_eq!(s.min.x, right - e.max.x);
            assert_eq!(s.width(), e.width());
        }
    }

    #[test]
    fn center_alignment_hooks_both_sides() {
        let renderer = StepRenderer::new(style(Alignment::Center));
        let mut surface = RecordingSurface::new();
        renderer.render_pass(
            &mut surface,
            &widths(&[100.0, 200.0], 300.0),
            &FixedAdvance(10.0),
        );

        let bounds: Vec<_> = surface.paths().map(|p| p.bounds().unwrap()).collect();
        assert_eq!(bounds.len(), 2);
        // previous edges are 96 and 204, both hooks sit above the seam at y = 20
        assert_eq!(bounds[0].min, Point::new(91.0, 15.0));
        assert_eq!(bounds[1].max, Point::new(209.0, 20.0));
    }

    #[test]
    fn end_alignment_picks_hooks_on_the_left() {
        let renderer = StepRenderer::new(style(Alignment::End));
        let mut surface = RecordingSurface::new();
        // 58 -> 108 (widen) -> 28 (narrow), all flush with x = 154
        renderer.render_pass(
            &mut surface,
            &widths(&[50.0, 100.0, 20.0], 150.0),
            &FixedAdvance(10.0),
        );

        let l0 = LineGeometry {
            line_number: 0,
            drawn_width: 58.0,
            left: 96.0,
            right: 154.0,
            top: 0.0,
            bottom: 20.0,
        };
        let l1 = LineGeometry {
            line_number: 1,
            drawn_width: 108.0,
            left: 46.0,
            top: 20.0,
            bottom: 40.0,
            ..l0
        };
        let l2 = LineGeometry {
            line_number: 2,
            drawn_width: 28.0,
            left: 126.0,
            top: 40.0,
            bottom: 60.0,
            ..l0
        };

        let paths: Vec<_> = surface.paths().cloned().collect();
        assert_eq!(
            paths,
            vec![
                Join::Bevel(Side::Right).path(&l0, &l1, 5.0),
                Join::Hook(Side::Left, Corner::Convex).path(&l0, &l1, 5.0),
                Join::Bevel(Side::Right).path(&l1, &l2, 5.0),
                Join::Hook(Side::Left, Corner::Concave).path(&l1, &l2, 5.0),
            ]
        );

        // widening hangs off the upper line's left edge, narrowing off the lower one's
        let convex = paths[1].bounds().unwrap();
        assert_eq!((convex.min, convex.max), (Point::new(91.0, 15.0), Point::new(101.0, 20.0)));
        let concave = paths[3].bounds().unwrap();
        assert_eq!(
            (concave.min, concave.max),
            (Point::new(121.0, 40.0), Point::new(131.0, 45.0))
        );
    }

    #[test]
    fn center_narrowing_hooks_below_the_seam_on_both_sides() {
        let renderer = StepRenderer::new(style(Alignment::Center));
        let mut surface = RecordingSurface::new();
        // 158 -> 58
        renderer.render_pass(
            &mut surface,
            &widths(&[150.0, 50.0], 300.0),
            &FixedAdvance(10.0),
        );

        let l0 = LineGeometry {
            line_number: 0,
            drawn_width: 158.0,
            left: 71.0,
            right: 229.0,
            top: 0.0,
            bottom: 20.0,
        };
        let l1 = LineGeometry {
            line_number: 1,
            drawn_width: 58.0,
            left: 121.0,
            right: 179.0,
            top: 20.0,
            bottom: 40.0,
        };

        let paths: Vec<_> = surface.paths().cloned().collect();
        assert_eq!(
            paths,
            vec![
                Join::Hook(Side::Left, Corner::Concave).path(&l0, &l1, 5.0),
                Join::Hook(Side::Right, Corner::Concave).path(&l0, &l1, 5.0),
            ]
        );
        let left = paths[0].bounds().unwrap();
        assert_eq!((left.min, left.max), (Point::new(116.0, 20.0), Point::new(126.0, 25.0)));
        let right = paths[1].bounds().unwrap();
        assert_eq!((right.min, right.max), (Point::new(174.0, 20.0), Point::new(184.0, 25.0)));
    }

    #[test]
    fn inverted_line_is_reported() {
        let renderer = StepRenderer::new(style(Alignment::Start));
        let mut surface = RecordingSurface::new();
        let mut state = RenderState::new();
        let line = Line::new("upside down", 0).with_vertical(30.0, 25.0, 10.0);

        let err = renderer
            .render_line(&mut surface, &line, &FixedAdvance(1.0), &mut state)
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidGeometry { line: 0, .. }));
        assert!(surface.commands.is_empty());
        assert!(!state.is_active());
    }

    #[test]
    fn fresh_state_matches_a_fresh_renderer() {
        let renderer = StepRenderer::new(style(Alignment::Center));
        let first = widths(&[300.0, 10.0, 120.0], 400.0);
        let second = widths(&[80.0, 84.0], 400.0);

        let mut state = RenderState::new();
        let mut reused = RecordingSurface::new();
        for line in &first {
            renderer
                .render_line(&mut reused, line, &FixedAdvance(1.0), &mut state)
                .unwrap();
        }
        state.reset();
        reused.clear();
        for line in &second {
            renderer
                .render_line(&mut reused, line, &FixedAdvance(1.0), &mut state)
                .unwrap();
        }

        let mut fresh = RecordingSurface::new();
        StepRenderer::new(style(Alignment::Center)).render_pass(
            &mut fresh,
            &second,
            &FixedAdvance(1.0),
        );

        assert_eq!(reused.commands, fresh.commands);
    }

    #[test]
    fn line_zero_ignores_stale_state() {
        let renderer = StepRenderer::new(style(Alignment::Start));
        let mut state = RenderState::new();
        let mut surface = RecordingSurface::new();
        let stale = widths(&[100.0, 100.0], 300.0);
        for line in &stale {
            renderer
                .render_line(&mut surface, line, &FixedAdvance(1.0), &mut state)
                .unwrap();
        }

        surface.clear();
        let restart = widths(&[97.0], 300.0);
        let rect = renderer
            .render_line(&mut surface, &restart[0], &FixedAdvance(1.0), &mut state)
            .unwrap();

        assert_eq!(rect.width(), 105.0);
        assert_eq!(surface.commands.len(), 1);
    }

    #[test]
    fn unmeasurable_text_falls_back_to_padding_only() {
        let renderer = StepRenderer::new(style(Alignment::Start));
        let mut surface = RecordingSurface::new();
        let unavailable = |_: &str| -> Option<f32> { None };
        let report = renderer.render_pass(&mut surface, &lines(&["???"], 300.0), &unavailable);

        assert!(report.is_complete());
        assert_eq!(rects(&surface), vec![(-4.0, 4.0)]);
    }

    #[test]
    fn invalid_line_is_skipped_and_the_rest_still_render() {
        let renderer = StepRenderer::new(style(Alignment::Start));
        let mut surface = RecordingSurface::new();
        let input = widths(&[100.0, f32::NAN, 100.0], 300.0);
        let report = renderer.render_pass(&mut surface, &input, &FixedAdvance(1.0));

        assert_eq!(report.painted, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].line(), 1);
        // the line after the failure starts a fresh shape: no joins
        assert_eq!(surface.round_rects().count(), 2);
        assert_eq!(surface.paths().count(), 0);
    }

    #[test]
    fn out_of_order_line_restarts_the_shape() {
        let renderer = StepRenderer::new(style(Alignment::Start));
        let mut state = RenderState::new();
        let mut surface = RecordingSurface::new();
        let input = widths(&[100.0, 100.0, 100.0], 300.0);

        renderer
            .render_line(&mut surface, &input[2], &FixedAdvance(1.0), &mut state)
            .unwrap();
        renderer
            .render_line(&mut surface, &input[1], &FixedAdvance(1.0), &mut state)
            .unwrap();

        assert_eq!(surface.paths().count(), 0);
        assert_eq!(state.previous().unwrap().line_number, 1);
    }

    #[test]
    fn stepped_shape_has_no_seam_on_the_cpu_surface() {
        let renderer = StepRenderer::new(
            style(Alignment::Start).with_fill_color(Color::BLACK),
        );
        let mut surface = CpuSurface::new(200, 60).unwrap();
        let input: Vec<_> = widths(&[100.0, 100.0, 150.0], 300.0)
            .into_iter()
            .map(|l| Line {
                top: l.top + 5.0,
                bottom: l.bottom + 5.0,
                ..l
            })
            .collect();
        renderer.render_pass(&mut surface, &input, &FixedAdvance(1.0));

        // left edge at x = -4 is off-surface; check the straight right edge
        // between the first two lines, right at the seam (y = 25)
        assert_eq!(surface.pixel(102, 24).unwrap()[3], 255);
        assert_eq!(surface.pixel(102, 25).unwrap()[3], 255);
        // the concave corner above the wider third line is filled
        assert_eq!(surface.pixel(104, 44).unwrap()[3], 255);
        // well outside every shape
        assert_eq!(surface.pixel(180, 10).unwrap()[3], 0);
    }
}
