//! Attack and defense power.
//!
//! Power comes from the shape of a Cell's black atoms: attack is their
//! vertical span (in triangle heights), defense their horizontal span
//! (in edge lengths). An attack lands only when attack power is strictly
//! greater than defense power.

use crate::cells::{AtomColor, Cell};
use crate::lattice::{horizontal_span, vertical_span};

/// Vertical span of the Cell's black atoms.
#[must_use]
pub fn attack_power(cell: &Cell) -> f64 {
    vertical_span(&cell.black_points())
}

/// Horizontal span of the Cell's black atoms.
#[must_use]
pub fn defense_power(cell: &Cell) -> f64 {
    horizontal_span(&cell.black_points())
}

/// Whether `attacker` out-powers `defender`. Equal power never wins.
#[must_use]
pub fn attack_beats_defense(attacker: &Cell, defender: &Cell) -> bool {
    attack_power(attacker) > defense_power(defender)
}

/// Destructions granted beyond the first black kill.
///
/// Each red atom in the attacking Cell adds one, each blue atom in the
/// defending Cell takes one away, floored at zero.
#[must_use]
pub fn extra_destroys(attacker: &Cell, defender: &Cell) -> u32 {
    let reds = attacker.count_by_color()[AtomColor::Red];
    let blues = defender.count_by_color()[AtomColor::Blue];
    reds.saturating_sub(blues)
}

/// Damage of an attack that meets no opposing atoms: attack power, truncated.
#[must_use]
pub fn direct_attack_damage(attacker: &Cell) -> u32 {
    let power = attack_power(attacker);
    if power.is_finite() && power > 0.0 {
        // Spans are bounded by the region, far below u32::MAX.
        power.trunc() as u32
    } else {
        0
    }
}
