//! Persistent-atom effects, as pure functions over Cells.
//!
//! Every non-black atom has a potency `y`: the number of black atoms
//! adjacent to it in its own Cell.
//!
//! - Red (click): consumed; destroys up to `y` opposing black atoms.
//! - Blue (click): consumed; shields its adjacent black atoms.
//! - Green (click): turns into a black atom in place.
//! - Green (end of action phase): yields `y` black atoms to the pool.
//!
//! Consuming a red or blue atom must not split its Cell, so the rules
//! layer checks `removal_keeps_connected` before triggering them.

use crate::cells::{AtomColor, Cell};
use crate::lattice::LatticePoint;

/// Potency of the atom at `p` if it has the given color.
#[must_use]
pub fn potency_if(cell: &Cell, p: LatticePoint, color: AtomColor) -> Option<usize> {
    (cell.get(p) == Some(color)).then(|| cell.count_black_neighbors(p))
}

/// Whether removing the atom at `p` leaves the rest of the Cell connected.
#[must_use]
pub fn removal_keeps_connected(cell: &Cell, p: LatticePoint) -> bool {
    let mut probe = cell.clone();
    probe.remove(p).is_some() && probe.is_connected()
}

/// Black atoms a blue atom at `p` would shield.
#[must_use]
pub fn blue_shield_targets(cell: &Cell, p: LatticePoint) -> Vec<LatticePoint> {
    if cell.get(p) != Some(AtomColor::Blue) {
        return Vec::new();
    }
    cell.black_neighbors_of(p)
}

/// Replace the green atom at `p` with a black atom. Returns false if `p` is not green.
pub fn convert_green(cell: &mut Cell, p: LatticePoint) -> bool {
    if cell.get(p) != Some(AtomColor::Green) {
        return false;
    }
    cell.remove(p);
    cell.place(p, AtomColor::Black)
}

/// Black atoms earned at the end of an action phase: total green potency over `cells`.
#[must_use]
pub fn green_yield<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> u32 {
    let total: usize = cells
        .into_iter()
        .flat_map(|cell| {
            cell.points_of(AtomColor::Green)
                .into_iter()
                .map(move |p| cell.count_black_neighbors(p))
        })
        .sum();
    u32::try_from(total).unwrap_or(u32::MAX)
}
