use super::margin::MarginEstimator;
use crate::config::PlacementConfig;
use crate::geometry::{Bbox, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Candidate {
    pub origin: Point,
    pub margin: f64,
}

/// Coarse-to-fine scan of the viewable area for the origin whose default
/// sized box has the largest safety margin.
pub(crate) struct GridSearch<'a> {
    viewable: Bbox,
    obstacles: &'a [Bbox],
    estimator: &'a MarginEstimator,
    config: &'a PlacementConfig,
    evaluations: usize,
}

impl<'a> GridSearch<'a> {
    pub fn new(
        viewable: Bbox,
        obstacles: &'a [Bbox],
        estimator: &'a MarginEstimator,
        config: &'a PlacementConfig,
    ) -> Self {
        Self {
            viewable,
            obstacles,
            estimator,
            config,
            evaluations: 0,
        }
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    fn evaluate(&mut self, origin: Point) -> Candidate {
        self.evaluations += 1;
        let candidate = Bbox::from_rect(
            origin.x,
            origin.y,
            self.config.component_width,
            self.config.component_height,
        );
        Candidate {
            origin,
            margin: self.estimator.safety_margin(&candidate, self.obstacles),
        }
    }

    fn pitch(&self) -> (f64, f64) {
        let span_x = (self.viewable.width() - self.config.component_width).max(0.0);
        let span_y = (self.viewable.height() - self.config.component_height).max(0.0);
        let step = |span: f64, count: usize| {
            if count > 1 {
                span / (count - 1) as f64
            } else {
                0.0
            }
        };
        (
            step(span_x, self.config.coarse_columns),
            step(span_y, self.config.coarse_rows),
        )
    }

    /// Row-major grid; the best `top_candidates` survive a stable sort so
    /// equal margins keep scan order.
    fn coarse_pass(&mut self, pitch: (f64, f64)) -> Vec<Candidate> {
        let origin = self.viewable.top_left;
        let mut cells = Vec::new();
        for row in 0..self.config.coarse_rows.max(1) {
            for col in 0..self.config.coarse_columns.max(1) {
                let point = Point::new(
                    origin.x + col as f64 * pitch.0,
                    origin.y + row as f64 * pitch.1,
                );
                cells.push(self.evaluate(point));
            }
        }
        cells.sort_by(|a, b| b.margin.total_cmp(&a.margin));
        cells.truncate(self.config.top_candidates.max(1));
        cells
    }

    fn refine(&mut self, coarse: Candidate, pitch: (f64, f64)) -> Candidate {
        let steps = self.config.refinement.max(1);
        let fine = (pitch.0 / steps as f64, pitch.1 / steps as f64);
        let inner = self.viewable.shrink(self.config.edge_clearance);
        let half = (steps / 2) as isize;
        let mut best = coarse;
        for j in -half..=(steps as isize - half) {
            for i in -half..=(steps as isize - half) {
                if i == 0 && j == 0 {
                    continue;
                }
                let point = Point::new(
                    coarse.origin.x + i as f64 * fine.0,
                    coarse.origin.y + j as f64 * fine.1,
                );
                let bbox = Bbox::from_rect(
                    point.x,
                    point.y,
                    self.config.component_width,
                    self.config.component_height,
                );
                if !inner.contains(&bbox) {
                    continue;
                }
                let candidate = self.evaluate(point);
                if candidate.margin > best.margin {
                    best = candidate;
                }
            }
        }
        best
    }

    pub fn run(&mut self) -> Candidate {
        let pitch = self.pitch();
        let coarse = self.coarse_pass(pitch);
        let mut best: Option<Candidate> = None;
        for candidate in coarse {
            let refined = self.refine(candidate, pitch);
            if best.is_none_or(|current| refined.margin > current.margin) {
                best = Some(refined);
            }
        }
        tracing::trace!(evaluations = self.evaluations, "grid search finished");
        best.unwrap_or(Candidate {
            origin: self.viewable.top_left,
            margin: f64::NEG_INFINITY,
        })
    }
}
