use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning of the placement heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacementConfig {
    /// Size assumed for a component that has not been created yet.
    pub component_width: f64,
    pub component_height: f64,
    /// Gap left between a stacked component and its neighbour.
    pub stack_gap: f64,
    /// Obstacles further than this many component sizes are ignored.
    pub neighborhood_factor: f64,
    pub coarse_columns: usize,
    pub coarse_rows: usize,
    /// Fine pitch is the coarse pitch divided by this.
    pub refinement: usize,
    pub top_candidates: usize,
    /// Fine candidates closer than this to the viewport edge are skipped.
    pub edge_clearance: f64,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            component_width: 60.0,
            component_height: 50.0,
            stack_gap: 20.0,
            neighborhood_factor: 3.0,
            coarse_columns: 16,
            coarse_rows: 16,
            refinement: 8,
            top_candidates: 10,
            edge_clearance: 4.0,
        }
    }
}

impl PlacementConfig {
    /// Same tuning, planning for a component of the given size.
    pub fn for_size(&self, (width, height): (f64, f64)) -> Self {
        Self {
            component_width: width,
            component_height: height,
            ..self.clone()
        }
    }

    /// Upper bound on margin evaluations performed by the grid search.
    pub fn max_grid_evaluations(&self) -> usize {
        let coarse = self.coarse_columns.max(1) * self.coarse_rows.max(1);
        let fine = (self.refinement.max(1) + 1).pow(2) + 1;
        coarse + self.top_candidates.max(1).min(coarse) * fine
    }
}

/// Viewport assumed when the surface cannot report its geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
    pub zoom: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            zoom: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub placement: PlacementConfig,
    pub viewport: ViewportConfig,
}

/// Loads a JSON or JSON5 config file; missing keys keep their defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = json5::from_str(contents)?;
    if config.viewport.zoom <= 0.0 || !config.viewport.zoom.is_finite() {
        return Err(anyhow::anyhow!(
            "viewport.zoom must be positive, got {}",
            config.viewport.zoom
        ));
    }
    if config.placement.component_width < 0.0 || config.placement.component_height < 0.0 {
        return Err(anyhow::anyhow!("component size must not be negative"));
    }
    Ok(config)
}
