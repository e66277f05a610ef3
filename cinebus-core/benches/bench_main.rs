use std::hint::black_box;

use cinebus_core::model::{
    LineSet, StreetEdge, StreetGraph, StreetNode, TransitGraph, TransitStop,
};
use cinebus_core::{RoutingParams, build_city_graph, find_path};
use criterion::{Criterion, criterion_group, criterion_main};
use geo::Point;
use petgraph::graph::{DiGraph, NodeIndex};

const GRID: usize = 60;
const SPACING: f64 = 0.001;
const ORIGIN: (f64, f64) = (2.10, 41.35);

fn grid_point(row: usize, col: usize) -> Point<f64> {
    Point::new(
        ORIGIN.0 + SPACING * col as f64,
        ORIGIN.1 + SPACING * row as f64,
    )
}

/// Square street grid, two-way segments of about 100 m
fn grid_streets() -> StreetGraph {
    let mut graph = DiGraph::new();
    let mut nodes: Vec<NodeIndex> = Vec::with_capacity(GRID * GRID);
    for row in 0..GRID {
        for col in 0..GRID {
            nodes.push(graph.add_node(StreetNode {
                id: (row * GRID + col) as i64,
                geometry: grid_point(row, col),
            }));
        }
    }
    for row in 0..GRID {
        for col in 0..GRID {
            let here = nodes[row * GRID + col];
            let mut link = |there: NodeIndex| {
                graph.add_edge(here, there, StreetEdge { length: 100.0 });
                graph.add_edge(there, here, StreetEdge { length: 100.0 });
            };
            if col + 1 < GRID {
                link(nodes[row * GRID + col + 1]);
            }
            if row + 1 < GRID {
                link(nodes[(row + 1) * GRID + col]);
            }
        }
    }
    StreetGraph::new(graph)
}

/// East-west bus lines every ten rows with a stop every five intersections
fn grid_transit() -> TransitGraph {
    let mut transit = TransitGraph::new();
    for row in (0..GRID).step_by(10) {
        let line: LineSet = [format!("H{row}")].into_iter().collect();
        let mut previous = None;
        for col in (0..GRID).step_by(5) {
            let street = grid_point(row, col);
            let stop = transit.add_stop(TransitStop {
                code: format!("{row}-{col}"),
                name: format!("Row {row} / Col {col}"),
                geometry: Point::new(street.x(), street.y() + 0.0001),
                lines: line.clone(),
            });
            if let Some(previous) = previous {
                transit.add_hop(previous, stop, line.clone());
            }
            previous = Some(stop);
        }
    }
    transit
}

fn bench_fusion(c: &mut Criterion) {
    let streets = grid_streets();
    let transit = grid_transit();
    let params = RoutingParams::default();

    c.bench_function("build_city_graph", |b| {
        b.iter(|| build_city_graph(black_box(&streets), black_box(&transit), &params));
    });
}

fn bench_find_path(c: &mut Criterion) {
    let streets = grid_streets();
    let transit = grid_transit();
    let params = RoutingParams::default();
    let city = build_city_graph(&streets, &transit, &params).expect("grid city builds");
    let from = grid_point(0, 0);
    let to = grid_point(GRID - 1, GRID - 1);

    c.bench_function("find_path_corner_to_corner", |b| {
        b.iter(|| find_path(&streets, &city, black_box(&from), black_box(&to), &params));
    });
}

criterion_group!(benches, bench_fusion, bench_find_path);
criterion_main!(benches);
