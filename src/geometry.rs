use serde::{Deserialize, Serialize};

use crate::error::ViewError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Axis-aligned rectangle in unscaled surface coordinates.
///
/// `top_left` is never below or right of `bottom_right`; zero-area boxes
/// stand for components that have not been sized yet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bbox {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Bbox {
    /// Builds a box from two opposite corners in any order.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            top_left: Point::new(a.x.min(b.x), a.y.min(b.y)),
            bottom_right: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Builds a box from its origin and size; negative sizes clamp to zero.
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            top_left: Point::new(x, y),
            bottom_right: Point::new(x + width.max(0.0), y + height.max(0.0)),
        }
    }

    pub fn point(at: Point) -> Self {
        Self {
            top_left: at,
            bottom_right: at,
        }
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.bottom_right.x, self.top_left.y)
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.top_left.x, self.bottom_right.y)
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right(),
            self.bottom_right,
            self.bottom_left(),
        ]
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.top_left.x + self.bottom_right.x) / 2.0,
            (self.top_left.y + self.bottom_right.y) / 2.0,
        )
    }

    /// Closed intersection test: boxes that only touch count as intersecting.
    pub fn intersects(&self, other: &Bbox) -> bool {
        self.top_left.x <= other.bottom_right.x
            && other.top_left.x <= self.bottom_right.x
            && self.top_left.y <= other.bottom_right.y
            && other.top_left.y <= self.bottom_right.y
    }

    pub fn contains(&self, other: &Bbox) -> bool {
        self.top_left.x <= other.top_left.x
            && self.top_left.y <= other.top_left.y
            && other.bottom_right.x <= self.bottom_right.x
            && other.bottom_right.y <= self.bottom_right.y
    }

    pub fn expand(&self, dx: f64, dy: f64) -> Bbox {
        Bbox {
            top_left: Point::new(self.top_left.x - dx, self.top_left.y - dy),
            bottom_right: Point::new(self.bottom_right.x + dx, self.bottom_right.y + dy),
        }
    }

    /// Shrinks towards the center, collapsing to the center line when the
    /// inset exceeds half the extent.
    pub fn shrink(&self, inset: f64) -> Bbox {
        let center = self.center();
        let half_w = (self.width() / 2.0 - inset).max(0.0);
        let half_h = (self.height() / 2.0 - inset).max(0.0);
        Bbox {
            top_left: Point::new(center.x - half_w, center.y - half_h),
            bottom_right: Point::new(center.x + half_w, center.y + half_h),
        }
    }
}

/// Smallest box enclosing every box in `boxes`.
pub fn bounding_box_of(boxes: &[Bbox]) -> Result<Bbox, ViewError> {
    let (first, rest) = boxes.split_first().ok_or(ViewError::NotRepresentable)?;
    let mut out = *first;
    for bbox in rest {
        out.top_left.x = out.top_left.x.min(bbox.top_left.x);
        out.top_left.y = out.top_left.y.min(bbox.top_left.y);
        out.bottom_right.x = out.bottom_right.x.max(bbox.bottom_right.x);
        out.bottom_right.y = out.bottom_right.y.max(bbox.bottom_right.y);
    }
    Ok(out)
}
