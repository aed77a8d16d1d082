//! Lattice points and plane mapping.
//!
//! The lattice is made of equilateral triangles with unit edge length.
//! A point `(row, col)` sits at `x = col + row / 2`, `y = row * √3/2`,
//! so each row is shifted half an edge to the right of the row above.

use serde::{Deserialize, Serialize};

/// Height of a unit equilateral triangle.
pub const TRI_HEIGHT: f64 = 0.866_025_403_784_438_6;

/// Tolerance used when comparing a plane distance against one edge length.
pub const UNIT_DISTANCE_TOLERANCE: f64 = 1e-6;

/// Offsets of the six candidate neighbors in `(row, col)` space.
const NEIGHBOR_OFFSETS: [(i32, i32); 6] = [
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
];

/// A location in the infinite triangular lattice.
///
/// Ordering is row-major, which keeps iteration over point sets stable
/// and makes seeded random sampling reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LatticePoint {
    /// Vertical index (along triangle heights).
    pub row: i32,
    /// Horizontal index (along triangle bases).
    pub col: i32,
}

impl LatticePoint {
    /// Create a new point.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Horizontal plane coordinate (unit = edge length).
    #[must_use]
    pub fn plane_x(self) -> f64 {
        f64::from(self.col) + 0.5 * f64::from(self.row)
    }

    /// Vertical plane coordinate.
    #[must_use]
    pub fn plane_y(self) -> f64 {
        f64::from(self.row) * TRI_HEIGHT
    }

    /// Plane position as `(x, y)`.
    #[must_use]
    pub fn to_plane(self) -> (f64, f64) {
        (self.plane_x(), self.plane_y())
    }

    /// Euclidean distance between two points in the plane.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let (x1, y1) = self.to_plane();
        let (x2, y2) = other.to_plane();
        (x2 - x1).hypot(y2 - y1)
    }

    /// Whether `other` lies exactly one edge length away.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        (self.distance(other) - 1.0).abs() < UNIT_DISTANCE_TOLERANCE
    }

    /// The six candidate neighbors, with no region bounds applied.
    #[must_use]
    pub fn lattice_neighbors(self) -> [LatticePoint; 6] {
        NEIGHBOR_OFFSETS.map(|(dr, dc)| Self::new(self.row + dr, self.col + dc))
    }
}

impl From<(i32, i32)> for LatticePoint {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_mapping() {
        let p = LatticePoint::new(2, 1);
        assert!((p.plane_x() - 2.0).abs() < 1e-9);
        assert!((p.plane_y() - 2.0 * TRI_HEIGHT).abs() < 1e-9);
    }

    #[test]
    fn test_tri_height_constant() {
        assert!((TRI_HEIGHT - 3f64.sqrt() / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_lattice_neighbors_at_unit_distance() {
        let p = LatticePoint::new(2, 2);
        let neighbors = p.lattice_neighbors();
        assert_eq!(neighbors.len(), 6);
        for n in neighbors {
            assert!(p.is_adjacent(n), "{n} should be adjacent to {p}");
        }
        assert!(neighbors.contains(&LatticePoint::new(1, 2)));
        assert!(neighbors.contains(&LatticePoint::new(1, 3)));
        assert!(neighbors.contains(&LatticePoint::new(3, 1)));
    }

    #[test]
    fn test_non_neighbors_rejected() {
        let p = LatticePoint::new(0, 0);
        assert!(!p.is_adjacent(LatticePoint::new(0, 2)));
        assert!(!p.is_adjacent(LatticePoint::new(1, 1)));
        assert!(!p.is_adjacent(LatticePoint::new(-1, -1)));
        assert!(!p.is_adjacent(p));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", LatticePoint::new(3, -1)), "(3, -1)");
    }
}
