//! Triangular lattice geometry.
//!
//! Pure functions and value types with no mutable state:
//! - `LatticePoint`: `(row, col)` location and its plane mapping
//! - `Region`: rectangle or hexagon a Cell may occupy
//! - `vertical_span` / `horizontal_span`: attack and defense metrics

mod metrics;
mod point;
mod region;

pub use metrics::{horizontal_span, vertical_span};
pub use point::{LatticePoint, TRI_HEIGHT, UNIT_DISTANCE_TOLERANCE};
pub use region::{hex_distance, in_hexagon, Neighbors, Region};
