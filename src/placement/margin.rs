// Safety margin of a candidate box against existing components.
// Positive: clear distance to the nearest obstacle. Negative: overlap depth.

use crate::config::PlacementConfig;
use crate::geometry::{Bbox, Point};
use crate::viewport::ScrollPos;

/// Where a candidate lies relative to an obstacle, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    TopLeft,
    TopMid,
    TopRight,
    MidLeft,
    MidMid,
    MidRight,
    BottomLeft,
    BottomMid,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Before,
    Mid,
    After,
}

fn band(lo: f64, hi: f64, obstacle_lo: f64, obstacle_hi: f64) -> Band {
    if hi < obstacle_lo {
        Band::Before
    } else if lo > obstacle_hi {
        Band::After
    } else {
        Band::Mid
    }
}

impl Zone {
    /// Classifies the candidate as a whole: its extents, not a single
    /// reference corner, are compared per axis. Extents that touch or
    /// overlap the obstacle on an axis fall into the MID band of that axis,
    /// so a box straddling an obstacle edge is MID-MID however far its
    /// top-left corner lies outside.
    pub fn classify(candidate: &Bbox, obstacle: &Bbox) -> Zone {
        let vertical = band(
            candidate.top_left.y,
            candidate.bottom_right.y,
            obstacle.top_left.y,
            obstacle.bottom_right.y,
        );
        let horizontal = band(
            candidate.top_left.x,
            candidate.bottom_right.x,
            obstacle.top_left.x,
            obstacle.bottom_right.x,
        );
        match (vertical, horizontal) {
            (Band::Before, Band::Before) => Zone::TopLeft,
            (Band::Before, Band::Mid) => Zone::TopMid,
            (Band::Before, Band::After) => Zone::TopRight,
            (Band::Mid, Band::Before) => Zone::MidLeft,
            (Band::Mid, Band::Mid) => Zone::MidMid,
            (Band::Mid, Band::After) => Zone::MidRight,
            (Band::After, Band::Before) => Zone::BottomLeft,
            (Band::After, Band::Mid) => Zone::BottomMid,
            (Band::After, Band::After) => Zone::BottomRight,
        }
    }

    /// Point of the obstacle facing this zone: a corner, or the midpoint of
    /// an edge. `None` inside the obstacle.
    fn facing_point(self, obstacle: &Bbox) -> Option<Point> {
        let (tl, tr) = (obstacle.top_left, obstacle.top_right());
        let (bl, br) = (obstacle.bottom_left(), obstacle.bottom_right);
        match self {
            Zone::TopLeft => Some(tl),
            Zone::TopMid => Some(tl.midpoint(tr)),
            Zone::TopRight => Some(tr),
            Zone::MidLeft => Some(tl.midpoint(bl)),
            Zone::MidMid => None,
            Zone::MidRight => Some(tr.midpoint(br)),
            Zone::BottomLeft => Some(bl),
            Zone::BottomMid => Some(bl.midpoint(br)),
            Zone::BottomRight => Some(br),
        }
    }
}

/// Nearest directional distance between `candidate` and `obstacle`, taken
/// over the candidate's four corners. Zero means the boxes overlap or touch.
pub fn directional_distance(candidate: &Bbox, obstacle: &Bbox) -> f64 {
    let Some(target) = Zone::classify(candidate, obstacle).facing_point(obstacle) else {
        return 0.0;
    };
    candidate
        .corners()
        .iter()
        .map(|corner| corner.distance(target))
        .fold(f64::INFINITY, f64::min)
}

/// Never positive: the center distance of two overlapping boxes is bounded
/// by the sum of their half extents.
pub fn overlap_penalty(candidate: &Bbox, obstacle: &Bbox) -> f64 {
    let half_extents = (candidate.width() + obstacle.width()) / 2.0
        + (candidate.height() + obstacle.height()) / 2.0;
    -half_extents + candidate.center().distance(obstacle.center())
}

pub fn obstacle_margin(candidate: &Bbox, obstacle: &Bbox) -> f64 {
    let distance = directional_distance(candidate, obstacle);
    if distance == 0.0 {
        overlap_penalty(candidate, obstacle)
    } else {
        distance
    }
}

/// Scores candidate boxes against a set of obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginEstimator {
    reach_x: f64,
    reach_y: f64,
    unconstrained: f64,
}

impl MarginEstimator {
    pub fn new(config: &PlacementConfig, viewport: &ScrollPos) -> Self {
        let viewable = viewport.viewable();
        Self {
            reach_x: config.component_width * config.neighborhood_factor,
            reach_y: config.component_height * config.neighborhood_factor,
            unconstrained: viewable.width() + viewable.height(),
        }
    }

    /// Score returned when no obstacle is in reach.
    pub fn unconstrained(&self) -> f64 {
        self.unconstrained
    }

    /// Minimum margin against every obstacle within reach of `candidate`.
    pub fn safety_margin<'a, I>(&self, candidate: &Bbox, obstacles: I) -> f64
    where
        I: IntoIterator<Item = &'a Bbox>,
    {
        let reach = candidate.expand(self.reach_x, self.reach_y);
        obstacles
            .into_iter()
            .filter(|obstacle| reach.intersects(obstacle))
            .map(|obstacle| obstacle_margin(candidate, obstacle))
            .reduce(f64::min)
            .unwrap_or(self.unconstrained)
    }
}
