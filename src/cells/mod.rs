//! Cells and the atoms they hold.
//!
//! - `AtomColor` / `ColorCounts`: the closed color set and per-color tallies
//! - `Cell`: region-bounded point -> color map with connectivity queries
//!
//! A Cell never checks its own invariant on `place`/`remove`; the rules
//! layer validates a tentative change and rolls it back when the Cell
//! would end up split or without a black atom.

mod atom;
mod cell;
mod connectivity;

pub use atom::{AtomColor, ColorCounts};
pub use cell::{Cell, Component};
