//! Atom colors and per-color counts.
//!
//! ## AtomColor
//!
//! Closed set of four colors. Effect resolution matches on it
//! exhaustively, so an unknown color cannot exist.
//!
//! ## ColorCounts
//!
//! One counter per color, indexable by `AtomColor`. Used for player
//! pools, Cell color tallies, starting pools, and draw weights.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Color of an atom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AtomColor {
    /// Structural atom. Sets attack and defense power; must exist in every non-empty Cell.
    Black,
    /// Grants extra destructions on attack; click effect destroys opposing black atoms.
    Red,
    /// Reduces incoming extra destructions; click effect protects adjacent black atoms.
    Blue,
    /// Converts into black on click; yields black atoms at the end of the action phase.
    Green,
}

impl AtomColor {
    /// All colors in draw-weight order.
    pub const ALL: [AtomColor; 4] = [
        AtomColor::Black,
        AtomColor::Red,
        AtomColor::Blue,
        AtomColor::Green,
    ];

    /// Position of this color in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            AtomColor::Black => 0,
            AtomColor::Red => 1,
            AtomColor::Blue => 2,
            AtomColor::Green => 3,
        }
    }

    /// Whether this color carries a click effect.
    #[must_use]
    pub const fn has_effect(self) -> bool {
        !matches!(self, AtomColor::Black)
    }
}

impl std::fmt::Display for AtomColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AtomColor::Black => "black",
            AtomColor::Red => "red",
            AtomColor::Blue => "blue",
            AtomColor::Green => "green",
        };
        f.write_str(name)
    }
}

/// A counter per atom color.
///
/// ```
/// use atom_lattice::cells::{AtomColor, ColorCounts};
///
/// let mut pool = ColorCounts::new(7, 1, 1, 1);
/// pool[AtomColor::Red] += 2;
/// assert_eq!(pool[AtomColor::Red], 3);
/// assert_eq!(pool.total(), 12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorCounts {
    counts: [u32; 4],
}

impl ColorCounts {
    /// Create counts in black, red, blue, green order.
    #[must_use]
    pub const fn new(black: u32, red: u32, blue: u32, green: u32) -> Self {
        Self {
            counts: [black, red, blue, green],
        }
    }

    /// All counters at zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self { counts: [0; 4] }
    }

    /// Count for one color.
    #[must_use]
    pub const fn get(&self, color: AtomColor) -> u32 {
        self.counts[color.index()]
    }

    /// Sum over all colors.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Add `n` atoms of `color`.
    pub fn add(&mut self, color: AtomColor, n: u32) {
        self.counts[color.index()] = self.counts[color.index()].saturating_add(n);
    }

    /// Take one atom of `color`; returns false (and changes nothing) if none is left.
    pub fn take(&mut self, color: AtomColor) -> bool {
        let slot = &mut self.counts[color.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Iterate over `(color, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (AtomColor, u32)> + '_ {
        AtomColor::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Counts as a weight slice in `AtomColor::ALL` order.
    #[must_use]
    pub const fn as_weights(&self) -> &[u32; 4] {
        &self.counts
    }
}

impl Index<AtomColor> for ColorCounts {
    type Output = u32;

    fn index(&self, color: AtomColor) -> &Self::Output {
        &self.counts[color.index()]
    }
}

impl IndexMut<AtomColor> for ColorCounts {
    fn index_mut(&mut self, color: AtomColor) -> &mut Self::Output {
        &mut self.counts[color.index()]
    }
}

impl FromIterator<AtomColor> for ColorCounts {
    fn from_iter<I: IntoIterator<Item = AtomColor>>(iter: I) -> Self {
        let mut counts = Self::zero();
        for color in iter {
            counts.add(color, 1);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_index_matches_all() {
        for (i, color) in AtomColor::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
        }
    }

    #[test]
    fn test_only_black_has_no_effect() {
        assert!(!AtomColor::Black.has_effect());
        assert!(AtomColor::Red.has_effect());
        assert!(AtomColor::Blue.has_effect());
        assert!(AtomColor::Green.has_effect());
    }

    #[test]
    fn test_take_stops_at_zero() {
        let mut pool = ColorCounts::new(1, 0, 0, 0);
        assert!(pool.take(AtomColor::Black));
        assert!(!pool.take(AtomColor::Black));
        assert!(!pool.take(AtomColor::Red));
        assert_eq!(pool, ColorCounts::zero());
    }

    #[test]
    fn test_from_iter() {
        let counts: ColorCounts = [AtomColor::Black, AtomColor::Black, AtomColor::Green]
            .into_iter()
            .collect();
        assert_eq!(counts.get(AtomColor::Black), 2);
        assert_eq!(counts.get(AtomColor::Green), 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_serialization() {
        let counts = ColorCounts::new(3, 1, 1, 1);
        let json = serde_json::to_string(&counts).unwrap();
        let back: ColorCounts = serde_json::from_str(&json).unwrap();
        assert_eq!(counts, back);
    }

    #[test]
    fn test_display() {
        assert_eq!(AtomColor::Blue.to_string(), "blue");
    }
}
