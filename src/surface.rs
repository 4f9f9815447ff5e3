//! Drawing targets for line backgrounds.
//!
//! The renderer only ever issues two kinds of draw calls, so a host can wire
//! its own canvas by implementing [`Surface`]. Two implementations ship with
//! the crate: [`RecordingSurface`] keeps a display list, and [`CpuSurface`]
//! rasterizes into a `tiny_skia` pixmap.

mod cpu_surface;
mod recording;

pub use cpu_surface::CpuSurface;
pub use recording::{DrawCommand, RecordingSurface};

use crate::error::SurfaceError;
use crate::geometry::{Color, Path, ResolvedRect};

/// A canvas that can fill rounded rectangles and paths.
pub trait Surface {
    fn fill_round_rect(
        &mut self,
        rect: ResolvedRect,
        radius: f32,
        color: Color,
    ) -> Result<(), SurfaceError>;

    fn fill_path(&mut self, path: &Path, color: Color) -> Result<(), SurfaceError>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn fill_round_rect(
        &mut self,
        rect: ResolvedRect,
        radius: f32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        (**self).fill_round_rect(rect, radius, color)
    }

    fn fill_path(&mut self, path: &Path, color: Color) -> Result<(), SurfaceError> {
        (**self).fill_path(path, color)
    }
}

/// Rejects rectangles a surface cannot paint.
pub(crate) fn check_rect(rect: &ResolvedRect, radius: f32) -> Result<(), SurfaceError> {
    let finite = [rect.min.x, rect.min.y, rect.max.x, rect.max.y, radius]
        .iter()
        .all(|v| v.is_finite());
    if !finite {
        return Err(SurfaceError::NonFinite);
    }
    if rect.max.x < rect.min.x || rect.max.y < rect.min.y {
        return Err(SurfaceError::Inverted {
            left: rect.min.x,
            top: rect.min.y,
            right: rect.max.x,
            bottom: rect.max.y,
        });
    }
    Ok(())
}
