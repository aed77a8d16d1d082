//! Span metrics over point sets.
//!
//! Vertical span is measured in triangle heights (row difference) and
//! drives attack power. Horizontal span is measured in edge lengths along
//! the plane x axis and drives defense power.

use super::point::LatticePoint;

/// `max(row) - min(row)` over `points`; 0 for empty or singleton sets.
#[must_use]
pub fn vertical_span<'a>(points: impl IntoIterator<Item = &'a LatticePoint>) -> f64 {
    let mut bounds: Option<(i32, i32)> = None;
    for p in points {
        bounds = Some(match bounds {
            None => (p.row, p.row),
            Some((lo, hi)) => (lo.min(p.row), hi.max(p.row)),
        });
    }
    bounds.map_or(0.0, |(lo, hi)| f64::from(hi - lo))
}

/// `max(x) - min(x)` with `x = col + row / 2`; 0 for empty or singleton sets.
#[must_use]
pub fn horizontal_span<'a>(points: impl IntoIterator<Item = &'a LatticePoint>) -> f64 {
    let mut bounds: Option<(f64, f64)> = None;
    for p in points {
        let x = p.plane_x();
        bounds = Some(match bounds {
            None => (x, x),
            Some((lo, hi)) => (lo.min(x), hi.max(x)),
        });
    }
    bounds.map_or(0.0, |(lo, hi)| hi - lo)
}
