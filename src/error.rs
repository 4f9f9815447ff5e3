use thiserror::Error;

/// Per-line failure raised while painting a background.
///
/// None of these abort a pass: the affected line is skipped (or measured with
/// the zero-width fallback) and the remaining lines are still drawn.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum RenderError {
    #[error("line {line}: invalid geometry: {reason}")]
    InvalidGeometry { line: usize, reason: String },
    /// Only logged at `warn` when a line falls back to zero text width. Render
    /// calls never return it and [`PassReport`](crate::renderer::PassReport)
    /// does not list it.
    #[error("line {line}: text width is unavailable")]
    MeasurementUnavailable { line: usize },
}

impl RenderError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::InvalidGeometry { line, .. } | Self::MeasurementUnavailable { line } => *line,
        }
    }
}

/// Rejection raised by a [`Surface`](crate::surface::Surface) draw call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("non-finite coordinates")]
    NonFinite,
    #[error("inverted rectangle {left},{top} .. {right},{bottom}")]
    Inverted {
        left: f32,
        top: f32,
        right: f32,
        bottom: f32,
    },
}

impl SurfaceError {
    pub(crate) fn at_line(self, line: usize) -> RenderError {
        RenderError::InvalidGeometry {
            line,
            reason: self.to_string(),
        }
    }
}
