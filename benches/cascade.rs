use criterion::{black_box, criterion_group, criterion_main, Criterion};

use atom_lattice::cells::{AtomColor, Cell};
use atom_lattice::combat::{next_cascade_choice, resolve_with};
use atom_lattice::core::{GameRng, DEFAULT_HEX_CENTER, DEFAULT_HEX_RADIUS};
use atom_lattice::lattice::Region;
use atom_lattice::placement::greedy_black_points;

fn full_hexagon() -> Cell {
    let region = Region::hexagon(DEFAULT_HEX_CENTER, DEFAULT_HEX_RADIUS);
    let mut cell = Cell::new(region);
    for (i, p) in region.points().into_iter().enumerate() {
        let color = if i % 5 == 0 { AtomColor::Green } else { AtomColor::Black };
        cell.place(p, color);
    }
    cell
}

/// Full hexagon with its center row removed, splitting it in two.
fn split_hexagon() -> Cell {
    let mut cell = full_hexagon();
    let doomed: Vec<_> = cell
        .occupied_points()
        .into_iter()
        .filter(|p| p.row == DEFAULT_HEX_CENTER.row)
        .collect();
    cell.remove_all(&doomed);
    cell
}

fn bench_components(c: &mut Criterion) {
    let cell = full_hexagon();
    c.bench_function("connected_components_full_hexagon", |b| {
        b.iter(|| black_box(&cell).connected_components())
    });
    c.bench_function("black_components_full_hexagon", |b| {
        b.iter(|| black_box(&cell).black_connected_components())
    });
}

fn bench_cascade(c: &mut Criterion) {
    let split = split_hexagon();
    c.bench_function("cascade_choice_split_hexagon", |b| {
        b.iter(|| {
            let mut working = split.clone();
            next_cascade_choice(black_box(&mut working))
        })
    });
    c.bench_function("cascade_resolve_split_hexagon", |b| {
        b.iter(|| {
            let mut working = split.clone();
            resolve_with(black_box(&mut working), |_| 0);
            working
        })
    });
}

fn bench_greedy(c: &mut Criterion) {
    let empty = Cell::new(Region::hexagon(DEFAULT_HEX_CENTER, DEFAULT_HEX_RADIUS));
    c.bench_function("greedy_black_points_20", |b| {
        let mut rng = GameRng::new(42);
        b.iter(|| greedy_black_points(black_box(&empty), 20, &mut rng))
    });
}

criterion_group!(benches, bench_components, bench_cascade, bench_greedy);
criterion_main!(benches);
