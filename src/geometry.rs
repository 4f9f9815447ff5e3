//! Geometry primitives shared by the stepper, the join library and surfaces.
//!
//! **Y-axis goes down**, matching the coordinates produced by the host's line
//! layout.

/// A point in surface coordinates.
pub type Point = euclid::default::Point2D<f32>;
/// A displacement in surface coordinates.
pub type Vector = euclid::default::Vector2D<f32>;
/// Bounds of the rounded rectangle painted for one line.
pub type ResolvedRect = euclid::default::Box2D<f32>;

/// Magic number for approximating a quarter circle with one cubic.
pub const KAPPA: f32 = 0.552_284_8;

/// Straight (non-premultiplied) RGBA color in the `0.0..=1.0` range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgba(1.0, 0.0, 0.0, 1.0);
    pub const BLUE: Self = Self::rgba(0.0, 0.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// A single path command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathEl {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic bezier: two control points, then the end point.
    CubicTo(Point, Point, Point),
    Close,
}

/// A filled outline made of one or more subpaths.
///
/// Every subpath is implicitly closed when filled, so a missing [`PathEl::Close`]
/// does not change the covered area.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    els: Vec<PathEl>,
}

impl Path {
    pub fn new() -> Self {
        Self { els: Vec::new() }
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.els.push(PathEl::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.els.push(PathEl::LineTo(p));
        self
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) -> &mut Self {
        self.els.push(PathEl::CubicTo(c1, c2, p));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.els.push(PathEl::Close);
        self
    }

    pub fn elements(&self) -> &[PathEl] {
        &self.els
    }

    pub fn is_empty(&self) -> bool {
        self.els.is_empty()
    }

    /// Builds a rounded rectangle outline.
    ///
    /// The radius is clamped to half of the shorter side, and a radius of zero
    /// produces a plain rectangle. Corners are emitted clockwise starting from
    /// the top-left arc end.
    pub fn rounded_rect(rect: ResolvedRect, radius: f32) -> Self {
        let r = radius
            .min(rect.width() / 2.0)
            .min(rect.height() / 2.0)
            .max(0.0);
        let (l, t, rt, b) = (rect.min.x, rect.min.y, rect.max.x, rect.max.y);
        let k = r * (1.0 - KAPPA);

        let mut path = Path::new();
        path.move_to(Point::new(l + r, t))
            .line_to(Point::new(rt - r, t))
            .cubic_to(Point::new(rt - k, t), Point::new(rt, t + k), Point::new(rt, t + r))
            .line_to(Point::new(rt, b - r))
            .cubic_to(Point::new(rt, b - k), Point::new(rt - k, b), Point::new(rt - r, b))
            .line_to(Point::new(l + r, b))
            .cubic_to(Point::new(l + k, b), Point::new(l, b - k), Point::new(l, b - r))
            .line_to(Point::new(l, t + r))
            .cubic_to(Point::new(l, t + k), Point::new(l + k, t), Point::new(l + r, t))
            .close();
        path
    }

    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.els.iter().flat_map(|el| {
            let (pts, count) = match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => ([p, p, p], 1),
                PathEl::CubicTo(a, b, c) => ([a, b, c], 3),
                PathEl::Close => ([Point::zero(); 3], 0),
            };
            pts.into_iter().take(count)
        })
    }

    /// Returns `false` if any coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.points().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Bounding box of all points, including control points.
    pub fn bounds(&self) -> Option<ResolvedRect> {
        let mut points = self.points();
        let first = points.next()?;
        let mut bounds = ResolvedRect::new(first, first);
        for p in points {
            bounds.min = bounds.min.min(p);
            bounds.max = bounds.max.max(p);
        }
        Some(bounds)
    }
}
