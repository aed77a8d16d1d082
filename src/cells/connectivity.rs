//! Connectivity queries over a Cell.
//!
//! All traversals are breadth-first over lattice adjacency restricted to
//! the Cell's region. Component lists are ordered by their smallest
//! point so repeated calls on the same Cell agree.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use super::atom::AtomColor;
use super::cell::{Cell, Component};
use crate::core::GameRng;
use crate::lattice::LatticePoint;

impl Cell {
    /// Whether all occupied points form one component. True for 0 or 1 atoms.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let Some((start, _)) = self.atoms().next() else {
            return true;
        };
        let reached = self.flood(start, |_| true);
        reached.len() == self.len()
    }

    /// Partition every occupied point into connected components.
    #[must_use]
    pub fn connected_components(&self) -> Vec<Component> {
        self.components_where(|_| true)
    }

    /// Partition black points into components using black-to-black edges only.
    #[must_use]
    pub fn black_connected_components(&self) -> Vec<Component> {
        self.components_where(|c| c == AtomColor::Black)
    }

    /// Black atoms adjacent to a non-black atom at `p` (its potency `y`).
    ///
    /// Zero when `p` is empty or holds a black atom.
    #[must_use]
    pub fn count_black_neighbors(&self, p: LatticePoint) -> usize {
        match self.get(p) {
            None | Some(AtomColor::Black) => 0,
            Some(_) => self.black_neighbors_of(p).len(),
        }
    }

    /// Lattice neighbors of `p` holding a black atom.
    #[must_use]
    pub fn black_neighbors_of(&self, p: LatticePoint) -> Vec<LatticePoint> {
        self.region()
            .neighbors_of(p)
            .into_iter()
            .filter(|&n| self.get(n) == Some(AtomColor::Black))
            .collect()
    }

    /// Empty region points adjacent to at least one occupied point.
    #[must_use]
    pub fn empty_frontier(&self) -> Vec<LatticePoint> {
        self.empty_neighbors_of(self.atoms().map(|(p, _)| p))
    }

    /// Empty region points adjacent to at least one black atom.
    #[must_use]
    pub fn black_frontier(&self) -> Vec<LatticePoint> {
        self.empty_neighbors_of(self.black_points())
    }

    /// Uniformly sample one empty point adjacent to any occupied point.
    pub fn random_empty_neighbor(&self, rng: &mut GameRng) -> Option<LatticePoint> {
        rng.choose(&self.empty_frontier()).copied()
    }

    /// Sorted, deduplicated empty neighbors of `sources`.
    pub(crate) fn empty_neighbors_of(
        &self,
        sources: impl IntoIterator<Item = LatticePoint>,
    ) -> Vec<LatticePoint> {
        let mut out: Vec<LatticePoint> = sources
            .into_iter()
            .flat_map(|p| self.region().neighbors_of(p))
            .filter(|&n| !self.is_occupied(n))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Components over atoms whose color passes `include`.
    fn components_where(&self, include: impl Fn(AtomColor) -> bool + Copy) -> Vec<Component> {
        let mut seen: FxHashSet<LatticePoint> = FxHashSet::default();
        let mut components = Vec::new();

        for (p, color) in self.atoms() {
            if !include(color) || seen.contains(&p) {
                continue;
            }
            let component = self.flood(p, include);
            seen.extend(component.iter().copied());
            components.push(component);
        }

        components
    }

    /// Breadth-first fill from `start` over atoms whose color passes `include`.
    fn flood(&self, start: LatticePoint, include: impl Fn(AtomColor) -> bool) -> Component {
        let mut component = Component::new();
        let mut queue = VecDeque::new();
        component.insert(start);
        queue.push_back(start);

        while let Some(p) = queue.pop_front() {
            for n in self.region().neighbors_of(p) {
                if component.contains(&n) {
                    continue;
                }
                if self.get(n).is_some_and(&include) {
                    component.insert(n);
                    queue.push_back(n);
                }
            }
        }

        component
    }
}
