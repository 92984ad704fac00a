//! Automatic placement of newly inserted components.
//!
//! The planner tries a fixed sequence of strategies and takes the first
//! one whose precondition holds:
//!
//! 1. empty sheet: centred at the top of the viewport;
//! 2. directly below the last inserted component;
//! 3. below everything visible, aligned with the top-most component;
//! 4. right of everything visible, aligned with the left-most component;
//! 5. a coarse-to-fine grid search maximising the safety margin.
//!
//! It is a pure function of its inputs. Ties always go to the first
//! element in iteration order so identical snapshots give identical output.

pub mod margin;
mod search;

use serde::{Deserialize, Serialize};

use crate::config::{PlacementConfig, ViewportConfig};
use crate::geometry::{Bbox, bounding_box_of};
use crate::surface::{ComponentRecord, RenderSurface, extract_components};
use crate::viewport::ScrollPos;

pub use margin::{MarginEstimator, Zone};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    EmptySheet,
    BelowLast,
    VerticalStack,
    HorizontalStack,
    GridSearch,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub strategy: Strategy,
}

struct Planner<'a> {
    viewport: &'a ScrollPos,
    viewable: Bbox,
    visible: Vec<&'a ComponentRecord>,
    obstacles: Vec<Bbox>,
    estimator: MarginEstimator,
    config: &'a PlacementConfig,
}

impl<'a> Planner<'a> {
    fn new(
        viewport: &'a ScrollPos,
        components: &'a [ComponentRecord],
        config: &'a PlacementConfig,
    ) -> Self {
        let viewable = viewport.viewable();
        let visible: Vec<&ComponentRecord> = components
            .iter()
            .filter(|component| viewable.intersects(&component.bbox()))
            .collect();
        let obstacles = visible.iter().map(|component| component.bbox()).collect();
        Self {
            viewport,
            viewable,
            visible,
            obstacles,
            estimator: MarginEstimator::new(config, viewport),
            config,
        }
    }

    fn default_box(&self, x: f64, y: f64) -> Bbox {
        Bbox::from_rect(x, y, self.config.component_width, self.config.component_height)
    }

    fn is_clear(&self, candidate: &Bbox) -> bool {
        self.estimator.safety_margin(candidate, &self.obstacles) > 0.0
    }

    fn empty_sheet(&self) -> Option<(f64, f64)> {
        if !self.visible.is_empty() {
            return None;
        }
        let x = self.viewable.top_left.x + self.viewable.width() / 2.0
            - self.config.component_width / 2.0;
        Some((x, self.viewable.top_left.y))
    }

    /// The probe box reuses the last component's own size. The box of the
    /// component being inserted must fit at the same spot as well.
    fn below_last(
        &self,
        components: &[ComponentRecord],
        last_placed: Option<&str>,
    ) -> Option<(f64, f64)> {
        let id = last_placed?;
        let last = components.iter().find(|component| component.id == id)?;
        let y = last.y + last.height.max(0.0) + self.config.stack_gap;
        let probe = Bbox::from_rect(last.x, y, last.width, last.height);
        let inserted = self.default_box(last.x, y);
        let fits = [probe, inserted].iter().all(|candidate| {
            candidate.top_left.y >= self.viewable.top_left.y
                && candidate.bottom_right.y <= self.viewable.bottom_right.y
                && self.is_clear(candidate)
        });
        if fits {
            Some((last.x, y))
        } else {
            tracing::trace!(id, "no room below the last placed component");
            None
        }
    }

    fn vertical_stack(&self) -> Option<(f64, f64)> {
        let extent = bounding_box_of(&self.obstacles).ok()?;
        let anchor = first_min_by(&self.visible, |component| component.y)?;
        let candidate =
            self.default_box(anchor.x, extent.bottom_right.y + self.config.stack_gap);
        self.accept(candidate, "vertical")
    }

    fn horizontal_stack(&self) -> Option<(f64, f64)> {
        let extent = bounding_box_of(&self.obstacles).ok()?;
        let anchor = first_min_by(&self.visible, |component| component.x)?;
        let candidate =
            self.default_box(extent.bottom_right.x + self.config.stack_gap, anchor.y);
        self.accept(candidate, "horizontal")
    }

    fn accept(&self, candidate: Bbox, direction: &str) -> Option<(f64, f64)> {
        if self.viewport.is_fully_visible(&candidate) && self.is_clear(&candidate) {
            Some((candidate.top_left.x, candidate.top_left.y))
        } else {
            tracing::trace!(direction, "stacking does not fit the viewport");
            None
        }
    }

    fn grid_search(&self) -> (f64, f64) {
        let mut search =
            search::GridSearch::new(self.viewable, &self.obstacles, &self.estimator, self.config);
        let best = search.run();
        tracing::debug!(
            evaluations = search.evaluations(),
            margin = best.margin,
            "grid search placement"
        );
        (best.origin.x, best.origin.y)
    }
}

/// First element with the smallest key; later equal keys never win.
fn first_min_by<'a, T, F>(items: &[&'a T], key: F) -> Option<&'a T>
where
    F: Fn(&T) -> f64,
{
    let mut best: Option<(&'a T, f64)> = None;
    for item in items {
        let value = key(*item);
        if best.is_none_or(|(_, current)| value < current) {
            best = Some((*item, value));
        }
    }
    best.map(|(item, _)| item)
}

/// Picks the position of a new component.
///
/// `components` may include off-screen records; only the ones intersecting
/// the viewable area act as obstacles. `last_placed` is the id of the
/// previously inserted component, if the caller tracks one.
pub fn choose_placement(
    viewport: &ScrollPos,
    components: &[ComponentRecord],
    last_placed: Option<&str>,
    config: &PlacementConfig,
) -> Placement {
    let planner = Planner::new(viewport, components, config);

    let ((x, y), strategy) = if let Some(pos) = planner.empty_sheet() {
        (pos, Strategy::EmptySheet)
    } else if let Some(pos) = planner.below_last(components, last_placed) {
        (pos, Strategy::BelowLast)
    } else if let Some(pos) = planner.vertical_stack() {
        (pos, Strategy::VerticalStack)
    } else if let Some(pos) = planner.horizontal_stack() {
        (pos, Strategy::HorizontalStack)
    } else {
        (planner.grid_search(), Strategy::GridSearch)
    };

    tracing::debug!(
        ?strategy,
        x,
        y,
        visible = planner.visible.len(),
        "placement chosen"
    );
    Placement { x, y, strategy }
}

/// Queries the surface (geometry first, then canvas state) and plans a
/// placement. The two queries must not be separated by anything that lets
/// the surface change.
pub fn placement_for_surface<S: RenderSurface + ?Sized>(
    surface: &S,
    last_placed: Option<&str>,
    config: &PlacementConfig,
    defaults: &ViewportConfig,
) -> Placement {
    let viewport = ScrollPos::from_surface(surface.scroll_area(), surface.zoom(), defaults);
    let components = surface
        .canvas_state()
        .map(|state| extract_components(&state))
        .unwrap_or_default();
    choose_placement(&viewport, &components, last_placed, config)
}
