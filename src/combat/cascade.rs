//! Post-destruction cascade.
//!
//! After atoms are destroyed in a Cell, the Cell is reduced back to its
//! invariant (empty, or one connected component holding black):
//!
//! 1. Every component without a black atom is destroyed outright.
//! 2. If several components remain, the owner keeps exactly one.
//! 3. If the survivor's black atoms form several black-only clusters,
//!    the owner keeps exactly one cluster; the other black atoms go, and
//!    step 1 runs again to sweep whatever they were holding together.
//!
//! `next_cascade_choice` runs the automatic parts and stops whenever the
//! owner has to choose. Applying the choice with `retain_component` or
//! `retain_black_cluster` and calling it again continues the reduction.

use tracing::trace;

use crate::cells::{AtomColor, Cell, Component};

/// A decision the Cell's owner must make before the cascade can continue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CascadeChoice {
    /// Keep one of several components (each holds a black atom).
    Component(Vec<Component>),
    /// Keep one of several black-only clusters inside the last component.
    BlackCluster(Vec<Component>),
}

impl CascadeChoice {
    /// The options to choose from.
    #[must_use]
    pub fn options(&self) -> &[Component] {
        match self {
            CascadeChoice::Component(options) | CascadeChoice::BlackCluster(options) => options,
        }
    }
}

/// Destroy every component holding no black atom. Returns the number of atoms removed.
pub fn remove_blackless_components(cell: &mut Cell) -> usize {
    let mut removed = 0;
    for component in cell.connected_components() {
        let has_black = component
            .iter()
            .any(|&p| cell.get(p) == Some(AtomColor::Black));
        if !has_black {
            trace!(size = component.len(), "sweeping blackless component");
            removed += component.len();
            cell.remove_all(&component);
        }
    }
    removed
}

/// Destroy every atom outside `keep`.
pub fn retain_component(cell: &mut Cell, keep: &Component) {
    let doomed: Vec<_> = cell
        .occupied_points()
        .into_iter()
        .filter(|p| !keep.contains(p))
        .collect();
    cell.remove_all(&doomed);
}

/// Destroy every black atom outside `keep`, then every component left without black.
pub fn retain_black_cluster(cell: &mut Cell, keep: &Component) {
    let doomed: Vec<_> = cell
        .black_points()
        .into_iter()
        .filter(|p| !keep.contains(p))
        .collect();
    cell.remove_all(&doomed);
    remove_blackless_components(cell);
}

/// Empty the Cell if it holds no black atom. Returns whether it was cleared.
pub fn clear_if_no_black(cell: &mut Cell) -> bool {
    if cell.is_empty() || cell.has_black() {
        return false;
    }
    cell.clear();
    true
}

/// Run the automatic cascade steps until the owner must choose or the Cell is settled.
///
/// Returns `None` once the Cell satisfies its invariant. Calling it on a
/// settled Cell changes nothing.
pub fn next_cascade_choice(cell: &mut Cell) -> Option<CascadeChoice> {
    if cell.is_empty() {
        return None;
    }

    remove_blackless_components(cell);

    let components = cell.connected_components();
    if components.len() > 1 {
        return Some(CascadeChoice::Component(components));
    }

    let clusters = cell.black_connected_components();
    if clusters.len() > 1 {
        return Some(CascadeChoice::BlackCluster(clusters));
    }

    clear_if_no_black(cell);
    None
}

/// Apply the option at `index` of `choice` to `cell`.
///
/// Returns false (and changes nothing) if `index` is out of range.
pub fn apply_choice(cell: &mut Cell, choice: &CascadeChoice, index: usize) -> bool {
    match choice {
        CascadeChoice::Component(options) => match options.get(index) {
            Some(keep) => retain_component(cell, keep),
            None => return false,
        },
        CascadeChoice::BlackCluster(options) => match options.get(index) {
            Some(keep) => retain_black_cluster(cell, keep),
            None => return false,
        },
    }
    true
}

/// Reduce `cell` completely, asking `choose` for every owner decision.
///
/// Out-of-range answers fall back to the first option.
pub fn resolve_with(cell: &mut Cell, mut choose: impl FnMut(&CascadeChoice) -> usize) {
    while let Some(choice) = next_cascade_choice(cell) {
        let index = choose(&choice);
        if !apply_choice(cell, &choice, index) {
            apply_choice(cell, &choice, 0);
        }
    }
}
