use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::error::SurfaceError;
use crate::geometry::{Color, Path, PathEl, ResolvedRect};

use super::{Surface, check_rect};

/// Raster target backed by a `tiny_skia` pixmap.
///
/// Shapes are filled anti-aliased with the nonzero winding rule and blended
/// source-over. The optional translation is applied to everything drawn, so a
/// host can place line coordinates inside a larger canvas.
pub struct CpuSurface {
    pixmap: Pixmap,
    transform: Transform,
    anti_alias: bool,
}

impl CpuSurface {
    /// Creates a transparent surface.
    ///
    /// Returns `None` if either dimension is zero or the buffer is too large.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            transform: Transform::identity(),
            anti_alias: true,
        })
    }

    /// Offsets everything drawn afterwards by `(dx, dy)`.
    pub fn with_translation(mut self, dx: f32, dy: f32) -> Self {
        self.transform = Transform::from_translate(dx, dy);
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fills the whole surface with `color`, ignoring what was there.
    pub fn clear(&mut self, color: Color) {
        let [r, g, b, a] = color.to_rgba8();
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
    }

    /// Straight-alpha RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Row-major straight-alpha RGBA8 bytes, ready for image encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|px| {
                let c = px.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    fn fill(&mut self, path: &Path, color: Color) {
        // empty or zero-area shapes have nothing to paint
        let Some(path) = to_skia_path(path) else {
            return;
        };

        let [r, g, b, a] = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = self.anti_alias;

        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, self.transform, None);
    }
}

fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x, p.y),
            PathEl::LineTo(p) => pb.line_to(p.x, p.y),
            PathEl::CubicTo(c1, c2, p) => pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::Close => pb.close(),
        }
    }
    pb.finish()
}

impl Surface for CpuSurface {
    fn fill_round_rect(
        &mut self,
        rect: ResolvedRect,
        radius: f32,
        color: Color,
    ) -> Result<(), SurfaceError> {
        check_rect(&rect, radius)?;
        self.fill(&Path::rounded_rect(rect, radius), color);
        Ok(())
    }

    fn fill_path(&mut self, path: &Path, color: Color) -> Result<(), SurfaceError> {
        if !path.is_finite() {
            return Err(SurfaceError::NonFinite);
        }
        self.fill(path, color);
        Ok(())
    }
}
