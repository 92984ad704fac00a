use schematic_placer::{
    CataloguePanel, ComponentKind, ComponentSpec, Config, SheetSnapshot, placement_for_surface,
};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementOptions {
    component_width: Option<f64>,
    component_height: Option<f64>,
    stack_gap: Option<f64>,
}

fn build_config(options: PlacementOptions) -> Config {
    let mut config = Config::default();
    if let Some(width) = options.component_width {
        config.placement.component_width = width;
    }
    if let Some(height) = options.component_height {
        config.placement.component_height = height;
    }
    if let Some(gap) = options.stack_gap {
        config.placement.stack_gap = gap;
    }
    config
}

fn parse_options(options_json: Option<String>) -> Result<PlacementOptions, String> {
    match options_json {
        Some(raw) => serde_json::from_str(&raw).map_err(|error| error.to_string()),
        None => Ok(PlacementOptions::default()),
    }
}

fn position_json(sheet_json: &str, options_json: Option<String>) -> Result<String, String> {
    let sheet = SheetSnapshot::from_json(sheet_json).map_err(|error| error.to_string())?;
    let config = build_config(parse_options(options_json)?);
    let placement = placement_for_surface(
        &sheet,
        sheet.last_placed.as_deref(),
        &config.placement,
        &config.viewport,
    );
    serde_json::to_string(&placement).map_err(|error| error.to_string())
}

fn insert_json(
    sheet_json: &str,
    kind: &str,
    bits: Option<u32>,
    name: Option<String>,
) -> Result<String, String> {
    let mut sheet = SheetSnapshot::from_json(sheet_json).map_err(|error| error.to_string())?;
    let kind: ComponentKind = kind
        .parse()
        .map_err(|error: schematic_placer::InsertError| error.to_string())?;
    let spec = ComponentSpec { kind, bits, name };
    let mut panel =
        CataloguePanel::new(Config::default()).with_last_placed(sheet.last_placed.clone());
    let inserted = panel.insert(&mut sheet, &spec).map_err(|error| error.to_string())?;
    sheet.last_placed = Some(inserted.id);
    serde_json::to_string(&sheet).map_err(|error| error.to_string())
}

/// Position (`{"x", "y", "strategy"}` JSON) for a component about to be
/// inserted into the given sheet snapshot.
#[wasm_bindgen]
pub fn choose_component_position(
    sheet_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    position_json(sheet_json, options_json).map_err(|error| JsValue::from_str(&error))
}

/// Inserts a catalogue component and returns the updated sheet snapshot.
#[wasm_bindgen]
pub fn insert_component(
    sheet_json: &str,
    kind: &str,
    bits: Option<u32>,
    name: Option<String>,
) -> Result<String, JsValue> {
    insert_json(sheet_json, kind, bits, name).map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = r#"{
        "scrollArea": { "width": 800, "height": 600, "left": 0, "top": 0 },
        "zoom": 1,
        "canvas": { "cells": [
            { "type": "And", "id": "and1", "position": { "x": 100, "y": 40 }, "size": { "width": 60, "height": 50 } }
        ] },
        "lastPlaced": "and1"
    }"#;

    #[test]
    fn positions_below_last_placed() {
        let json = position_json(SHEET, None).expect("position should be computed");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["x"], 100.0);
        assert_eq!(value["y"], 110.0);
        assert_eq!(value["strategy"], "below_last");
    }

    #[test]
    fn honours_option_overrides() {
        let json = position_json(SHEET, Some(r#"{"stackGap": 5}"#.to_string())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["y"], 95.0);
    }

    #[test]
    fn insert_updates_the_sheet() {
        let json = insert_json(SHEET, "lamp", None, Some("led".to_string())).unwrap();
        let sheet = SheetSnapshot::from_json(&json).unwrap();
        assert_eq!(sheet.components().len(), 2);
        assert_eq!(sheet.last_placed.as_deref(), Some("lamp2"));
    }

    #[test]
    fn reports_unknown_kinds() {
        let err = insert_json(SHEET, "warp_core", Some(1), None).unwrap_err();
        assert!(err.contains("warp_core"));
    }
}
