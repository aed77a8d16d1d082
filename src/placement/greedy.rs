//! Greedy black-atom growth.
//!
//! The first atom seeds the batch: the region center for an empty Cell,
//! otherwise a random empty point next to an existing black atom. Every
//! further atom goes to the black frontier point that leaves the largest
//! black frontier behind it.

use tracing::trace;

use crate::cells::{AtomColor, Cell};
use crate::core::GameRng;
use crate::lattice::LatticePoint;

/// Plan `count` black placements into `cell`.
///
/// Works on a clone; `cell` itself is never touched. Returns the points in
/// placement order, or `None` if the Cell runs out of room before the
/// batch is complete.
pub fn greedy_black_points(
    cell: &Cell,
    count: u32,
    rng: &mut GameRng,
) -> Option<Vec<LatticePoint>> {
    let mut scratch = cell.clone();
    let mut planned = Vec::with_capacity(count as usize);

    for step in 0..count {
        let next = if step == 0 {
            seed_point(&scratch, rng)?
        } else {
            best_growth_point(&scratch)?
        };
        scratch.place(next, AtomColor::Black);
        trace!(step, point = %next, "greedy black placement");
        planned.push(next);
    }

    Some(planned)
}

/// Where the first atom of a batch goes.
fn seed_point(cell: &Cell, rng: &mut GameRng) -> Option<LatticePoint> {
    if cell.is_empty() {
        let center = cell.region().center();
        if cell.region().contains(center) {
            return Some(center);
        }
        return rng.choose(&cell.region().points()).copied();
    }
    if cell.has_black() {
        return rng.choose(&cell.black_frontier()).copied();
    }
    cell.random_empty_neighbor(rng)
}

/// Frontier point maximizing the frontier left after placing there.
/// Ties keep the earliest candidate.
fn best_growth_point(cell: &Cell) -> Option<LatticePoint> {
    let mut best: Option<(LatticePoint, usize)> = None;
    for candidate in cell.black_frontier() {
        let growth = growth_after(cell, candidate);
        if best.map_or(true, |(_, top)| growth > top) {
            best = Some((candidate, growth));
        }
    }
    best.map(|(p, _)| p)
}

/// Size of the black frontier if a black atom were placed at `p`.
fn growth_after(cell: &Cell, p: LatticePoint) -> usize {
    let mut probe = cell.clone();
    probe.place(p, AtomColor::Black);
    probe.black_frontier().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Region;

    fn p(row: i32, col: i32) -> LatticePoint {
        LatticePoint::new(row, col)
    }

    #[test]
    fn test_empty_cell_seeds_at_center() {
        let cell = Cell::new(Region::rect(5, 5));
        let mut rng = GameRng::new(7);

        let planned = greedy_black_points(&cell, 1, &mut rng).unwrap();
        assert_eq!(planned, vec![p(2, 2)]);
    }

    #[test]
    fn test_batch_stays_connected() {
        let cell = Cell::new(Region::rect(6, 6));
        let mut rng = GameRng::new(11);

        let planned = greedy_black_points(&cell, 8, &mut rng).unwrap();
        assert_eq!(planned.len(), 8);

        let mut grown = cell.clone();
        for &q in &planned {
            assert!(grown.place(q, AtomColor::Black));
            assert!(grown.is_connected());
        }
        assert!(cell.is_empty());
    }

    #[test]
    fn test_seed_touches_existing_black() {
        let mut cell = Cell::new(Region::rect(6, 6));
        cell.place(p(0, 0), AtomColor::Black);
        let mut rng = GameRng::new(2);

        let planned = greedy_black_points(&cell, 1, &mut rng).unwrap();
        assert!(cell.black_frontier().contains(&planned[0]));
    }

    #[test]
    fn test_greedy_prefers_open_space() {
        let mut cell = Cell::new(Region::rect(3, 3));
        cell.place(p(1, 1), AtomColor::Black);

        let best = best_growth_point(&cell).unwrap();
        let chosen = growth_after(&cell, best);
        for candidate in cell.black_frontier() {
            assert!(growth_after(&cell, candidate) <= chosen);
        }
    }

    #[test]
    fn test_runs_out_of_room() {
        let cell = Cell::new(Region::rect(2, 2));
        let mut rng = GameRng::new(0);

        assert!(greedy_black_points(&cell, 4, &mut rng).is_some());
        assert!(greedy_black_points(&cell, 5, &mut rng).is_none());
    }

    #[test]
    fn test_zero_count_is_empty_plan() {
        let cell = Cell::new(Region::rect(2, 2));
        let mut rng = GameRng::new(0);
        assert_eq!(greedy_black_points(&cell, 0, &mut rng), Some(Vec::new()));
    }
}
