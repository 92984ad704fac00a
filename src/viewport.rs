use serde::{Deserialize, Serialize};

use crate::config::ViewportConfig;
use crate::error::ViewError;
use crate::geometry::{Bbox, Point};

/// Scroll geometry as reported by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollArea {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_height: Option<f64>,
}

/// The visible window onto the drawing surface.
///
/// `width`/`height` are unscaled screen pixels, `left`/`top` are scaled
/// scroll offsets. A zoom above 1 shrinks what is drawn, so more of the
/// surface is visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollPos {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
    /// Drawable surface size as reported, or `left + width` when the
    /// surface does not say. Carried through for callers; placement only
    /// looks at the viewable rectangle.
    pub total_width: f64,
    pub total_height: f64,
    pub zoom: f64,
}

impl ScrollPos {
    pub fn fallback(defaults: &ViewportConfig) -> Self {
        Self {
            width: defaults.width,
            height: defaults.height,
            left: 0.0,
            top: 0.0,
            total_width: defaults.width,
            total_height: defaults.height,
            zoom: defaults.zoom,
        }
    }

    /// Combines the two surface queries; if either is missing, or the zoom
    /// is unusable, the whole viewport falls back to `defaults`.
    pub fn from_surface(
        area: Option<ScrollArea>,
        zoom: Option<f64>,
        defaults: &ViewportConfig,
    ) -> Self {
        match (area, zoom) {
            (Some(area), Some(zoom)) if zoom.is_finite() && zoom > 0.0 => Self {
                width: area.width,
                height: area.height,
                left: area.left,
                top: area.top,
                total_width: area.total_width.unwrap_or(area.left + area.width),
                total_height: area.total_height.unwrap_or(area.top + area.height),
                zoom,
            },
            _ => {
                tracing::debug!("surface geometry unavailable, using default viewport");
                Self::fallback(defaults)
            }
        }
    }

    /// Region of the surface currently on screen, in surface coordinates.
    pub fn viewable(&self) -> Bbox {
        let x = self.left * self.zoom;
        let y = self.top * self.zoom;
        Bbox {
            top_left: Point::new(x, y),
            bottom_right: Point::new(x + self.width * self.zoom, y + self.height * self.zoom),
        }
    }

    pub fn is_fully_visible(&self, bbox: &Bbox) -> bool {
        self.viewable().contains(bbox)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self { min: 0.25, max: 4.0 }
    }
}

/// Viewport that shows `target` (plus `padding` on every side) centred.
///
/// The zoom is the smallest one that fits the box, but never below
/// `bounds.min`. A box that only fits above `bounds.max` is reported as
/// [`ViewError::NotViewable`] so the caller can pick other bounds.
pub fn view_to_box(
    viewport: &ScrollPos,
    target: &Bbox,
    bounds: ZoomBounds,
    padding: f64,
) -> Result<ScrollPos, ViewError> {
    let width = target.width() + 2.0 * padding;
    let height = target.height() + 2.0 * padding;
    let required_zoom = (width / viewport.width.max(f64::EPSILON))
        .max(height / viewport.height.max(f64::EPSILON));
    let zoom = required_zoom.max(bounds.min);
    if zoom > bounds.max || !zoom.is_finite() {
        return Err(ViewError::NotViewable {
            width: target.width(),
            height: target.height(),
            min_zoom: bounds.min,
            max_zoom: bounds.max,
            required_zoom,
        });
    }

    let center = target.center();
    let left = (center.x - viewport.width * zoom / 2.0).max(0.0) / zoom;
    let top = (center.y - viewport.height * zoom / 2.0).max(0.0) / zoom;
    Ok(ScrollPos {
        left,
        top,
        zoom,
        ..*viewport
    })
}
