#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for style resolution and full figure builds.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gridfig::prelude::*;
use gridfig::style_map;

fn experiment_grid(rows: usize, cols: usize, items: usize) -> PanelGrid {
    let shape = GridShape::new(rows, cols).expect("shape should be valid");
    PanelGrid::new(Grid::from_fn(shape, |idx| {
        let mut panel = PanelMeta::new().group_by("condition");
        if idx.row % 2 == 1 {
            panel = panel.tag("log");
        }
        for k in 0..items {
            let condition = if k % 2 == 0 { "control" } else { "drug" };
            panel = panel.item(ItemMeta::new().tag("line").prop("condition", condition));
        }
        panel
    }))
}

fn configured_manager() -> StyleManager {
    let mut manager = StyleManager::with_defaults();
    manager
        .set_args(elements::AXIS, &style_map! { "yscale" => "log" }, Condition::tag("log"))
        .expect("axis args should apply");
    manager
        .set_args(elements::PLOT, &style_map! { "linewidth" => 1.0 }, Condition::tag("line"))
        .expect("plot args should apply");
    manager
        .set_colors("condition", vec!["control", "drug"], &["black", "red"])
        .expect("colors should apply");
    manager.set_legend_panels(PanelSelection::LastCol).expect("legend should apply");
    manager
}

fn style_resolve_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("style_resolve");
    let manager = configured_manager();

    for (rows, cols, items) in [(2, 2, 2), (5, 5, 4), (10, 10, 8)] {
        let grid = experiment_grid(rows, cols, items);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{cols}x{items}")),
            &grid,
            |b, grid| {
                b.iter(|| manager.resolve(black_box(grid)).expect("resolution should succeed"));
            },
        );
    }

    group.finish();
}

fn figure_build_benchmark(c: &mut Criterion) {
    let manager = configured_manager();
    let grid = experiment_grid(4, 6, 4);

    c.bench_function("figure_build_4x6", |b| {
        b.iter(|| {
            let plan = FigurePlan::build(&manager, black_box(&grid)).expect("build should succeed");
            plan.placements().expect("placements should succeed")
        });
    });
}

criterion_group!(benches, style_resolve_benchmark, figure_build_benchmark);
criterion_main!(benches);
