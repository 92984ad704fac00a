use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use schematic_placer::config::{PlacementConfig, ViewportConfig};
use schematic_placer::placement::choose_placement;
use schematic_placer::surface::ComponentRecord;
use schematic_placer::viewport::ScrollPos;
use std::hint::black_box;

/// `count` components on a regular lattice with `pitch` spacing, leaving a
/// hole near the centre so the grid search has somewhere to go.
fn lattice(count: usize, pitch: f64) -> Vec<ComponentRecord> {
    let per_row = (count as f64).sqrt().ceil() as usize;
    let hole = per_row / 2;
    (0..count)
        .filter(|idx| {
            let (row, col) = (idx / per_row, idx % per_row);
            !(row.abs_diff(hole) <= 1 && col.abs_diff(hole) <= 1)
        })
        .map(|idx| ComponentRecord {
            id: format!("c{idx}"),
            x: (idx % per_row) as f64 * pitch,
            y: (idx / per_row) as f64 * pitch,
            width: 60.0,
            height: 50.0,
        })
        .collect()
}

fn bench_grid_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_search");
    let config = PlacementConfig::default();
    for count in [25usize, 100, 400] {
        let pitch = 1000.0 / (count as f64).sqrt();
        let components = lattice(count, pitch);
        let viewport = ScrollPos::fallback(&ViewportConfig::default());
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &components,
            |b, components| {
                b.iter(|| {
                    let placement =
                        choose_placement(&viewport, black_box(components), None, &config);
                    black_box(placement.x);
                });
            },
        );
    }
    group.finish();
}

fn bench_stacking(c: &mut Criterion) {
    let mut group = c.benchmark_group("stacking");
    let config = PlacementConfig::default();
    let viewport = ScrollPos::fallback(&ViewportConfig::default());
    let components = lattice(16, 70.0);
    let last = components.last().map(|component| component.id.clone());
    group.bench_function("below_last", |b| {
        b.iter(|| {
            let placement =
                choose_placement(&viewport, black_box(&components), last.as_deref(), &config);
            black_box(placement.y);
        });
    });
    group.bench_function("vertical", |b| {
        b.iter(|| {
            let placement = choose_placement(&viewport, black_box(&components), None, &config);
            black_box(placement.y);
        });
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_grid_search, bench_stacking
);
criterion_main!(benches);
