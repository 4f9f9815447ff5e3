//! Width hysteresis between consecutive lines.
//!
//! A line whose measured width is close to the previous line's drawn width is
//! nudged so the pair either lines up exactly (narrower line snaps up) or steps
//! out far enough for a rounded join to fit (wider line grows by the
//! threshold). Larger differences are drawn as-is.

/// Multiplier applied to the corner radius to get the smoothing threshold.
pub const STEP_THRESHOLD_FACTOR: f32 = 2.0;

/// Largest width difference that is still smoothed.
pub fn step_threshold(radius: f32) -> f32 {
    STEP_THRESHOLD_FACTOR * radius
}

/// Resolves the drawn width of a line.
///
/// `measured_width` already includes padding. `previous_drawn_width` is
/// ignored for the first line of a pass.
pub fn resolve_width(
    measured_width: f32,
    previous_drawn_width: f32,
    radius: f32,
    is_first_line: bool,
) -> f32 {
    if is_first_line {
        return measured_width;
    }

    let threshold = step_threshold(radius);
    let diff = (previous_drawn_width - measured_width).abs();

    if diff > threshold {
        measured_width
    } else if measured_width < previous_drawn_width {
        previous_drawn_width
    } else if measured_width > previous_drawn_width {
        measured_width + threshold
    } else {
        measured_width
    }
}

/// How a line's drawn width compares to the line above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidthDelta {
    Widening,
    Narrowing,
    Equal,
}

impl WidthDelta {
    pub fn between(previous_drawn_width: f32, drawn_width: f32) -> Self {
        if drawn_width > previous_drawn_width {
            WidthDelta::Widening
        } else if drawn_width < previous_drawn_width {
            WidthDelta::Narrowing
        } else {
            WidthDelta::Equal
        }
    }
}
