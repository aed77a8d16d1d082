//! Addressable regions of the lattice.
//!
//! A Cell only accepts atoms on points of its region. Two shapes exist:
//! a plain rectangle anchored at the origin, and a hexagon of a given
//! radius around a center point. Hexagon membership converts offset
//! coordinates to axial ones and measures hex-grid distance there.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::point::LatticePoint;

/// Neighbor list of a single point (at most six entries).
pub type Neighbors = SmallVec<[LatticePoint; 6]>;

/// Immutable set of points a Cell may occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Every point with `0 <= row < rows` and `0 <= col < cols`.
    Rect {
        /// Number of rows.
        rows: i32,
        /// Number of columns.
        cols: i32,
    },
    /// Every point whose hex distance from `center` is at most `radius`.
    Hexagon {
        /// Center of the hexagon.
        center: LatticePoint,
        /// Radius in lattice steps.
        radius: i32,
    },
}

impl Region {
    /// Rectangle anchored at the origin.
    #[must_use]
    pub const fn rect(rows: i32, cols: i32) -> Self {
        Self::Rect { rows, cols }
    }

    /// Hexagon of `radius` around `center`.
    #[must_use]
    pub const fn hexagon(center: LatticePoint, radius: i32) -> Self {
        Self::Hexagon { center, radius }
    }

    /// Whether `p` belongs to the region.
    #[must_use]
    pub fn contains(&self, p: LatticePoint) -> bool {
        match *self {
            Self::Rect { rows, cols } => (0..rows).contains(&p.row) && (0..cols).contains(&p.col),
            Self::Hexagon { center, radius } => in_hexagon(p, center, radius),
        }
    }

    /// Geometric center used to seed placements in an empty Cell.
    #[must_use]
    pub fn center(&self) -> LatticePoint {
        match *self {
            Self::Rect { rows, cols } => LatticePoint::new(rows / 2, cols / 2),
            Self::Hexagon { center, .. } => center,
        }
    }

    /// Lattice-adjacent points of `p` that also lie in the region.
    ///
    /// Each candidate is re-checked against the unit distance so rounding
    /// can never make adjacency asymmetric.
    #[must_use]
    pub fn neighbors_of(&self, p: LatticePoint) -> Neighbors {
        p.lattice_neighbors()
            .into_iter()
            .filter(|&n| self.contains(n) && p.is_adjacent(n))
            .collect()
    }

    /// All points of the region in row-major order.
    #[must_use]
    pub fn points(&self) -> Vec<LatticePoint> {
        match *self {
            Self::Rect { rows, cols } => (0..rows)
                .flat_map(|r| (0..cols).map(move |c| LatticePoint::new(r, c)))
                .collect(),
            Self::Hexagon { center, radius } => {
                if radius < 0 {
                    return Vec::new();
                }
                // Offset columns drift by half a row per row, so scan a wide band.
                let span = 2 * radius + 1;
                let mut out = Vec::new();
                for r in (center.row - radius)..=(center.row + radius) {
                    for c in (center.col - span)..=(center.col + span) {
                        let p = LatticePoint::new(r, c);
                        if in_hexagon(p, center, radius) {
                            out.push(p);
                        }
                    }
                }
                out
            }
        }
    }

    /// Number of points in the region.
    #[must_use]
    pub fn len(&self) -> usize {
        match *self {
            Self::Rect { rows, cols } => {
                usize::try_from(rows.max(0)).unwrap_or(0) * usize::try_from(cols.max(0)).unwrap_or(0)
            }
            Self::Hexagon { .. } => self.points().len(),
        }
    }

    /// Whether the region holds no points at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match *self {
            Self::Rect { rows, cols } => rows <= 0 || cols <= 0,
            Self::Hexagon { radius, .. } => radius < 0,
        }
    }
}

/// Convert offset `(row, col)` coordinates to axial `(q, r)`.
fn offset_to_axial(p: LatticePoint) -> (i32, i32) {
    let q = p.col - (p.row - (p.row & 1)).div_euclid(2);
    (q, p.row)
}

/// Hex-grid distance between `p` and `center`.
#[must_use]
pub fn hex_distance(p: LatticePoint, center: LatticePoint) -> i32 {
    let (q, r) = offset_to_axial(p);
    let (q0, r0) = offset_to_axial(center);
    let dq = q - q0;
    let dr = r - r0;
    (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
}

/// Whether `p` lies within `radius` hex steps of `center`.
#[must_use]
pub fn in_hexagon(p: LatticePoint, center: LatticePoint, radius: i32) -> bool {
    hex_distance(p, center) <= radius
}
