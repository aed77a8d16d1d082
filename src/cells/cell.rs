//! Cell storage: lattice point -> atom color.
//!
//! Atoms live in an `im::OrdMap`, so cloning a Cell is O(1). The rules
//! layer leans on this for snapshots: multi-step selections work on a
//! cloned Cell and swap it in on commit, and batch placement plans its
//! points on a clone before touching the live Cell.
//!
//! `place` and `remove` are raw primitives. They only check the region
//! and occupancy; connectivity and the black-atom requirement are
//! validated by the callers in `rules` before anything is committed.

use std::collections::BTreeSet;

use im::OrdMap;

use super::atom::{AtomColor, ColorCounts};
use crate::lattice::{LatticePoint, Region};

/// A set of points forming one connected component.
pub type Component = BTreeSet<LatticePoint>;

/// One of a player's three lattice regions holding atoms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    region: Region,
    atoms: OrdMap<LatticePoint, AtomColor>,
}

impl Cell {
    /// Create an empty Cell over `region`.
    #[must_use]
    pub fn new(region: Region) -> Self {
        Self {
            region,
            atoms: OrdMap::new(),
        }
    }

    /// The region this Cell may occupy.
    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Put an atom at `p`.
    ///
    /// Returns false without changing anything if `p` is outside the
    /// region or already occupied.
    pub fn place(&mut self, p: LatticePoint, color: AtomColor) -> bool {
        if !self.region.contains(p) || self.atoms.contains_key(&p) {
            return false;
        }
        self.atoms.insert(p, color);
        true
    }

    /// Remove the atom at `p`, returning its color.
    pub fn remove(&mut self, p: LatticePoint) -> Option<AtomColor> {
        self.atoms.remove(&p)
    }

    /// Color of the atom at `p`, if any.
    #[must_use]
    pub fn get(&self, p: LatticePoint) -> Option<AtomColor> {
        self.atoms.get(&p).copied()
    }

    /// Whether `p` holds an atom.
    #[must_use]
    pub fn is_occupied(&self, p: LatticePoint) -> bool {
        self.atoms.contains_key(&p)
    }

    /// Whether the Cell holds no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Number of atoms in the Cell.
    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether at least one black atom is present.
    #[must_use]
    pub fn has_black(&self) -> bool {
        self.atoms.values().any(|&c| c == AtomColor::Black)
    }

    /// Snapshot of every atom (O(1) structural clone).
    #[must_use]
    pub fn all_atoms(&self) -> OrdMap<LatticePoint, AtomColor> {
        self.atoms.clone()
    }

    /// Iterate over `(point, color)` pairs in row-major order.
    pub fn atoms(&self) -> impl Iterator<Item = (LatticePoint, AtomColor)> + '_ {
        self.atoms.iter().map(|(&p, &c)| (p, c))
    }

    /// Occupied points in row-major order.
    #[must_use]
    pub fn occupied_points(&self) -> Vec<LatticePoint> {
        self.atoms.keys().copied().collect()
    }

    /// Points holding a black atom, in row-major order.
    #[must_use]
    pub fn black_points(&self) -> Vec<LatticePoint> {
        self.points_of(AtomColor::Black)
    }

    /// Points holding an atom of `color`, in row-major order.
    #[must_use]
    pub fn points_of(&self, color: AtomColor) -> Vec<LatticePoint> {
        self.atoms
            .iter()
            .filter(|&(_, &c)| c == color)
            .map(|(&p, _)| p)
            .collect()
    }

    /// Atom tally per color.
    #[must_use]
    pub fn count_by_color(&self) -> ColorCounts {
        self.atoms.values().copied().collect()
    }

    /// Remove every atom.
    pub fn clear(&mut self) {
        self.atoms = OrdMap::new();
    }

    /// Remove every atom whose point is in `points`.
    pub fn remove_all<'a>(&mut self, points: impl IntoIterator<Item = &'a LatticePoint>) {
        for p in points {
            self.atoms.remove(p);
        }
    }

    /// Whether the Cell satisfies its standing invariant: empty, or a
    /// single connected component containing at least one black atom.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.is_empty() || (self.has_black() && self.is_connected())
    }
}
