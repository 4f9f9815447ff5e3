use crate::error::SurfaceError;
use crate::geometry::{Color, Path, ResolvedRect};

use super::{Surface, check_rect};

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    RoundRect {
        rect: ResolvedRect,
        radius: f32,
        color: Color,
    },
    Path { path: Path, color: Color },
}

/// Surface that stores draw calls instead of painting them.
///
/// Useful for hosts that replay a display list on their own canvas, and for
/// checking which shapes a pass emits.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded rounded rectangles, in draw order.
    pub fn round_rects(&self) -> impl Iterator<Item = &ResolvedRect> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::RoundRect { rect, .. } => Some(rect),
            DrawCommand::Path { .. } => None,
        })
    }

    /// Recorded paths, in draw order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Path { path, .. } => Some(path),
            DrawCommand::RoundRect { .. } => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn fill_round_rect(
        &mut self,
        rect: ResolvedRect,
        radius: f32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        check_rect(&rect, radius)?;
        self.commands.push(DrawCommand::RoundRect {
            rect,
            radius,
            color,
        });
        Ok(())
    }

    fn fill_path(&mut self, path: &Path, color: Color) -> Result<(), SurfaceError> {
        if !path.is_finite() {
            return Err(SurfaceError::NonFinite);
        }
        self.commands.push(DrawCommand::Path {
            path: path.clone(),
            color,
        });
        Ok(())
    }
}
