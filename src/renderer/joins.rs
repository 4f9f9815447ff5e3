//! Join shapes between vertically adjacent line backgrounds.
//!
//! Every join sits on the seam between the previous line and the current one
//! (`y = current.top`) and is at most one radius away from it. Two shapes
//! exist:
//!
//! * a **bevel**, used where both lines share an edge: a triangle that covers
//!   the rounded corner notches of both rectangles so the edge runs straight.
//! * a **hook**, used where the edges differ: the same notch cover for the
//!   line whose corner is hidden, plus a quarter-circle fillet in the concave
//!   corner of the combined outline.

use crate::geometry::{KAPPA, Path, Point};
use crate::stepper::WidthDelta;
use crate::style::Alignment;

use super::LineGeometry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal direction pointing away from the line's interior.
    fn outward(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Which of the two lines sticks out at a hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    /// The current line is wider; the fillet sits above the seam, anchored on
    /// the previous line's edge.
    Convex,
    /// The current line is narrower; the fillet sits below the seam, anchored
    /// on the current line's edge.
    Concave,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Join {
    Bevel(Side),
    Hook(Side, Corner),
}

use Corner::{Concave, Convex};
use Side::{Left, Right};

/// Joins to paint for each alignment and width change, in draw order.
pub fn join_table(alignment: Alignment, delta: WidthDelta) -> &'static [Join] {
    use WidthDelta::{Equal, Narrowing, Widening};

    match (alignment, delta) {
        (Alignment::Start, Widening) => &[Join::Bevel(Left), Join::Hook(Right, Convex)],
        (Alignment::Start, Narrowing) => &[Join::Bevel(Left), Join::Hook(Right, Concave)],
        (Alignment::Start, Equal) => &[Join::Bevel(Left), Join::Bevel(Right)],
        (Alignment::End, Widening) => &[Join::Bevel(Right), Join::Hook(Left, Convex)],
        (Alignment::End, Narrowing) => &[Join::Bevel(Right), Join::Hook(Left, Concave)],
        (Alignment::End, Equal) => &[Join::Bevel(Right), Join::Bevel(Left)],
        (Alignment::Center, Widening) => &[Join::Hook(Left, Convex), Join::Hook(Right, Convex)],
        (Alignment::Center, Narrowing) => &[Join::Hook(Left, Concave), Join::Hook(Right, Concave)],
        (Alignment::Center, Equal) => &[Join::Bevel(Left), Join::Bevel(Right)],
    }
}

impl Join {
    /// Point the shape is built around.
    pub fn anchor(self, previous: &LineGeometry, current: &LineGeometry) -> Point {
        let x = match self {
            Join::Bevel(side) | Join::Hook(side, Convex) => previous.edge(side),
            Join::Hook(side, Concave) => current.edge(side),
        };
        Point::new(x, current.top)
    }

    pub fn path(self, previous: &LineGeometry, current: &LineGeometry, radius: f32) -> Path {
        let anchor = self.anchor(previous, current);
        match self {
            Join::Bevel(side) => bevel(anchor, radius, side),
            Join::Hook(side, corner) => hook(anchor, radius, side, corner),
        }
    }
}

fn bevel(anchor: Point, r: f32, side: Side) -> Path {
    let s = side.outward();
    let mut path = Path::new();
    path.move_to(Point::new(anchor.x, anchor.y - r))
        .line_to(Point::new(anchor.x, anchor.y + r))
        .line_to(Point::new(anchor.x - s * r, anchor.y))
        .close();
    path
}

fn hook(anchor: Point, r: f32, side: Side, corner: Corner) -> Path {
    let s = side.outward();
    let v = match corner {
        Convex => -1.0,
        Concave => 1.0,
    };
    let (ax, ay) = (anchor.x, anchor.y);
    let k = r * (1.0 - KAPPA);

    let mut path = Path::new();
    path.move_to(Point::new(ax + s * r, ay))
        .line_to(Point::new(ax - s * r, ay))
        .line_to(Point::new(ax, ay + v * r))
        // fillet centered at (ax + s*r, ay + v*r), bulging toward the anchor
        .cubic_to(
            Point::new(ax, ay + v * k),
            Point::new(ax + s * k, ay),
            Point::new(ax + s * r, ay),
        )
        .close();
    path
}
