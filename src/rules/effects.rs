//! Triggering atom effects during the action phase.

use tracing::debug;

use crate::cells::AtomColor;
use crate::combat;
use crate::core::{GameState, Phase};
use crate::error::RuleError;
use crate::lattice::LatticePoint;

/// What a triggered effect did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    /// Blue consumed; these black atoms are now shielded.
    Shielded(Vec<LatticePoint>),
    /// Green turned into black.
    Converted,
    /// Red armed; the selection now waits for an opposing Cell.
    RedArmed { potency: usize },
}

impl GameState {
    /// Trigger the effect of the acting player's atom at `point` in Cell `cell`.
    ///
    /// # Errors
    ///
    /// - `GameOver`, `WrongPhase`, `SelectionInProgress`
    /// - `NotYourAtom` if there is no red, blue or green atom there
    /// - `WouldDisconnect` if consuming a red or blue atom would split its Cell
    /// - `NoPotency` for a red atom without adjacent black
    /// - `NoEligibleTargets` for a red atom when no opposing black can be hit
    pub fn trigger_effect(
        &mut self,
        cell: usize,
        point: LatticePoint,
    ) -> Result<EffectOutcome, RuleError> {
        self.ensure_live()?;
        self.expect_phase(Phase::Action)?;
        self.ensure_idle()?;

        let player = self.current;
        let own = self.own_cell(cell).map_err(|_| RuleError::NotYourAtom(point))?;
        let color = own.get(point).ok_or(RuleError::NotYourAtom(point))?;

        let outcome = match color {
            AtomColor::Black => return Err(RuleError::NotYourAtom(point)),
            AtomColor::Green => {
                combat::convert_green(&mut self.players[player].cells[cell], point);
                EffectOutcome::Converted
            }
            AtomColor::Blue => {
                if !combat::removal_keeps_connected(own, point) {
                    return Err(RuleError::WouldDisconnect(point));
                }
                let shielded = combat::blue_shield_targets(own, point);
                let expires_after = self.turn_number + 1;
                self.protection[player].grant(cell, shielded.iter().copied(), expires_after);
                self.players[player].cells[cell].remove(point);
                EffectOutcome::Shielded(shielded)
            }
            AtomColor::Red => {
                let potency = own.count_black_neighbors(point);
                if potency == 0 {
                    return Err(RuleError::NoPotency(point));
                }
                if !combat::removal_keeps_connected(own, point) {
                    return Err(RuleError::WouldDisconnect(point));
                }
                let defender = player.opponent();
                let any_target = self.players[defender]
                    .cells
                    .iter()
                    .enumerate()
                    .any(|(i, c)| !self.eligible_blacks(defender, i, c).is_empty());
                if !any_target {
                    return Err(RuleError::NoEligibleTargets);
                }
                self.arm_red(cell, point, potency);
                EffectOutcome::RedArmed { potency }
            }
        };

        debug!(%player, cell, %point, %color, ?outcome, "effect triggered");
        Ok(outcome)
    }
}
