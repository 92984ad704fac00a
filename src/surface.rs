//! Boundary to the external rendering surface.
//!
//! The surface owns the real component objects. This crate only sees its
//! scroll geometry, an untyped canvas snapshot, and a factory for new
//! components. [`extract_components`] is the single place where the
//! snapshot's foreign shape is read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::catalogue::ComponentSpec;
use crate::error::SurfaceError;
use crate::geometry::Bbox;
use crate::viewport::ScrollArea;

pub trait RenderSurface {
    fn scroll_area(&self) -> Option<ScrollArea>;
    fn zoom(&self) -> Option<f64>;
    fn canvas_state(&self) -> Option<Value>;
    /// Creates a component with its top-left corner at `(x, y)` and
    /// returns the id the surface assigned to it.
    fn create_component_at(
        &mut self,
        component: &ComponentSpec,
        label: &str,
        x: f64,
        y: f64,
    ) -> Result<String, SurfaceError>;
}

/// A placed component as seen by the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ComponentRecord {
    pub fn bbox(&self) -> Bbox {
        Bbox::from_rect(self.x, self.y, self.width, self.height)
    }
}

fn cells(snapshot: &Value) -> Option<&Vec<Value>> {
    match snapshot {
        Value::Array(cells) => Some(cells),
        Value::Object(map) => map.get("cells").and_then(Value::as_array),
        _ => None,
    }
}

fn cell_id(cell: &Value) -> Option<String> {
    match cell.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn pair(value: Option<&Value>, a: &str, b: &str) -> Option<(f64, f64)> {
    let value = value?;
    Some((value.get(a)?.as_f64()?, value.get(b)?.as_f64()?))
}

/// Typed records for every positioned cell of a canvas snapshot.
///
/// Accepts `{"cells": [...]}` or a bare array. Cells without an id or a
/// position (wires, for instance) are skipped; a missing size yields a
/// zero-size record.
pub fn extract_components(snapshot: &Value) -> Vec<ComponentRecord> {
    let Some(cells) = cells(snapshot) else {
        tracing::debug!("canvas snapshot has no cells");
        return Vec::new();
    };
    cells
        .iter()
        .filter_map(|cell| {
            let id = cell_id(cell)?;
            let (x, y) = pair(cell.get("position"), "x", "y")?;
            let (width, height) = pair(cell.get("size"), "width", "height").unwrap_or((0.0, 0.0));
            Some(ComponentRecord {
                id,
                x,
                y,
                width: width.max(0.0),
                height: height.max(0.0),
            })
        })
        .collect()
}

/// Serializable in-memory surface: scroll geometry, canvas cells and the
/// editor's last-placed hint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_area: Option<ScrollArea>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_placed: Option<String>,
}

impl SheetSnapshot {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn components(&self) -> Vec<ComponentRecord> {
        self.canvas.as_ref().map(extract_components).unwrap_or_default()
    }

    fn cells_mut(&mut self) -> Result<&mut Vec<Value>, SurfaceError> {
        let canvas = self.canvas.get_or_insert_with(|| json!({ "cells": [] }));
        match canvas {
            Value::Array(cells) => Ok(cells),
            Value::Object(map) => map
                .entry("cells")
                .or_insert_with(|| Value::Array(Vec::new()))
                .as_array_mut()
                .ok_or_else(|| SurfaceError::MalformedCanvas("'cells' is not an array".into())),
            other => Err(SurfaceError::MalformedCanvas(format!(
                "expected object or array, found {other}"
            ))),
        }
    }
}

impl RenderSurface for SheetSnapshot {
    fn scroll_area(&self) -> Option<ScrollArea> {
        self.scroll_area
    }

    fn zoom(&self) -> Option<f64> {
        self.zoom
    }

    fn canvas_state(&self) -> Option<Value> {
        self.canvas.clone()
    }

    fn create_component_at(
        &mut self,
        component: &ComponentSpec,
        label: &str,
        x: f64,
        y: f64,
    ) -> Result<String, SurfaceError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(SurfaceError::Rejected(format!(
                "position ({x}, {y}) is not finite"
            )));
        }
        let entry = component.kind.entry();
        let cells = self.cells_mut()?;
        let taken: Vec<String> = cells.iter().filter_map(cell_id).collect();
        let mut n = cells.len() + 1;
        let id = loop {
            let candidate = format!("{}{}", entry.id_prefix, n);
            if !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };

        let mut cell = Map::new();
        cell.insert("type".into(), json!(entry.cell_type));
        cell.insert("id".into(), json!(id));
        cell.insert("label".into(), json!(label));
        if let Some(bits) = component.bits {
            cell.insert("bits".into(), json!(bits));
        }
        cell.insert("position".into(), json!({ "x": x, "y": y }));
        cell.insert(
            "size".into(),
            json!({ "width": entry.size.0, "height": entry.size.1 }),
        );
        cells.push(Value::Object(cell));
        Ok(id)
    }
}
