use std::path::Path;

use schematic_placer::{
    Bbox, CataloguePanel, ComponentKind, ComponentRecord, ComponentSpec, Config, MarginEstimator,
    Placement, PlacementConfig, RenderSurface, ScrollArea, ScrollPos, SheetSnapshot, Strategy,
    ViewportConfig, choose_placement, placement_for_surface,
};

fn load_fixture(rel: &str) -> SheetSnapshot {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    SheetSnapshot::from_json(&input).expect("fixture parse failed")
}

fn viewport_of(sheet: &SheetSnapshot) -> ScrollPos {
    ScrollPos::from_surface(sheet.scroll_area(), sheet.zoom(), &ViewportConfig::default())
}

fn default_box(placement: &Placement) -> Bbox {
    let config = PlacementConfig::default();
    Bbox::from_rect(
        placement.x,
        placement.y,
        config.component_width,
        config.component_height,
    )
}

fn margin_against_visible(placement: &Placement, sheet: &SheetSnapshot) -> f64 {
    let viewport = viewport_of(sheet);
    let viewable = viewport.viewable();
    let obstacles: Vec<Bbox> = sheet
        .components()
        .iter()
        .map(ComponentRecord::bbox)
        .filter(|bbox| viewable.intersects(bbox))
        .collect();
    MarginEstimator::new(&PlacementConfig::default(), &viewport)
        .safety_margin(&default_box(placement), &obstacles)
}

fn place(sheet: &SheetSnapshot) -> Placement {
    placement_for_surface(
        sheet,
        sheet.last_placed.as_deref(),
        &PlacementConfig::default(),
        &ViewportConfig::default(),
    )
}

#[test]
fn place_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let cases = [
        ("empty_sheet.json", Strategy::EmptySheet),
        ("below_last.json", Strategy::BelowLast),
        ("vertical_stack.json", Strategy::VerticalStack),
        ("horizontal_stack.json", Strategy::HorizontalStack),
        ("grid_search.json", Strategy::GridSearch),
        ("zoomed_out.json", Strategy::VerticalStack),
        ("point_components.json", Strategy::BelowLast),
    ];

    for (rel, strategy) in cases {
        let sheet = load_fixture(rel);
        let placement = place(&sheet);
        assert_eq!(placement.strategy, strategy, "{rel}: unexpected strategy");
        assert!(
            viewport_of(&sheet).is_fully_visible(&default_box(&placement)),
            "{rel}: placement {placement:?} leaves the viewport"
        );
        let margin = margin_against_visible(&placement, &sheet);
        assert!(margin > 0.0, "{rel}: placement overlaps (margin {margin})");
        assert_eq!(place(&sheet), placement, "{rel}: not deterministic");
    }
}

#[test]
fn exact_positions_for_heuristic_strategies() {
    let cases = [
        ("empty_sheet.json", (570.0, 0.0)),
        ("below_last.json", (200.0, 170.0)),
        ("vertical_stack.json", (120.0, 340.0)),
        ("horizontal_stack.json", (100.0, 20.0)),
        ("zoomed_out.json", (250.0, 220.0)),
        ("point_components.json", (300.0, 320.0)),
    ];
    for (rel, expected) in cases {
        let placement = place(&load_fixture(rel));
        assert_eq!((placement.x, placement.y), expected, "{rel}");
    }
}

#[test]
fn hint_is_required_to_stack_below() {
    let mut sheet = load_fixture("below_last.json");
    sheet.last_placed = None;
    let placement = place(&sheet);
    assert_ne!(placement.strategy, Strategy::BelowLast);

    sheet.last_placed = Some("missing".to_string());
    assert_ne!(place(&sheet).strategy, Strategy::BelowLast);
}

#[test]
fn missing_geometry_uses_default_viewport() {
    let sheet = SheetSnapshot {
        canvas: None,
        scroll_area: Some(ScrollArea {
            width: 300.0,
            height: 300.0,
            left: 0.0,
            top: 0.0,
            total_width: None,
            total_height: None,
        }),
        zoom: None,
        last_placed: None,
    };
    let placement = place(&sheet);
    assert_eq!(placement.strategy, Strategy::EmptySheet);
    assert_eq!((placement.x, placement.y), (470.0, 0.0));
}

#[test]
fn packed_viewport_still_places_inside() {
    let viewport = ScrollPos::fallback(&ViewportConfig {
        width: 800.0,
        height: 600.0,
        zoom: 1.0,
    });
    let mut components = Vec::new();
    for row in 0..12 {
        for col in 0..14 {
            components.push(ComponentRecord {
                id: format!("c{row}_{col}"),
                x: col as f64 * 60.0,
                y: row as f64 * 50.0,
                width: 60.0,
                height: 50.0,
            });
        }
    }
    let config = PlacementConfig::default();
    let placement = choose_placement(&viewport, &components, Some("c11_13"), &config);
    assert_eq!(placement.strategy, Strategy::GridSearch);
    assert!(viewport.is_fully_visible(&default_box(&placement)));
}

#[test]
fn repeated_inserts_never_overlap() {
    let mut sheet = load_fixture("empty_sheet.json");
    let mut panel = CataloguePanel::new(Config::default());
    let spec = ComponentSpec::new(ComponentKind::Nand).with_bits(1);
    for _ in 0..20 {
        panel.insert(&mut sheet, &spec).expect("insert failed");
    }

    let boxes: Vec<Bbox> = sheet.components().iter().map(ComponentRecord::bbox).collect();
    assert_eq!(boxes.len(), 20);
    for (i, a) in boxes.iter().enumerate() {
        assert!(viewport_of(&sheet).is_fully_visible(a), "component {i} off screen");
        for b in &boxes[i + 1..] {
            assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
        }
    }
    assert_eq!(boxes[11].top_left.x, 650.0);
    assert_eq!(boxes[11].top_left.y, 0.0);
}
