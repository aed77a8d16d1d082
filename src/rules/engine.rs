//! Command dispatch.
//!
//! `apply_action` executes any `Action` value against the game and logs
//! it to the history when it succeeds. It is the data-driven twin of the
//! individual command methods; both paths share the same validation.

use tracing::debug;

use super::effects::EffectOutcome;
use super::selection::Progress;
use crate::cells::ColorCounts;
use crate::core::{Action, GameState, PlacementRecord};
use crate::error::RuleError;
use crate::lattice::LatticePoint;

/// What an applied action produced.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    /// Atoms drawn into the pool.
    Drawn(ColorCounts),
    /// One atom placed.
    Placed,
    /// Placement reverted.
    Undone(PlacementRecord),
    /// Placement closed with this attack budget.
    ActionPhase { attack_limit: u32 },
    /// Black atoms placed in bulk.
    BatchPlaced(Vec<LatticePoint>),
    /// Selection advanced or resolved.
    Selection(Progress),
    /// Whether a selection was discarded.
    Cancelled(bool),
    /// Effect triggered.
    Effect(EffectOutcome),
    /// Turn handed over; green yield added to the pool.
    TurnEnded { green_yield: u32 },
}

impl GameState {
    /// Execute `action` for the acting player.
    ///
    /// ## Example
    ///
    /// ```
    /// use atom_lattice::core::{Action, GameConfig, GameState, Phase};
    ///
    /// let mut state = GameState::new(GameConfig::default()).unwrap();
    /// state.apply_action(&Action::BeginDraw).unwrap();
    /// assert_eq!(state.phase(), Phase::Place);
    /// assert_eq!(state.history().len(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Whatever the underlying command returns; nothing is recorded then.
    pub fn apply_action(&mut self, action: &Action) -> Result<ActionOutcome, RuleError> {
        let stamp = self.stamp();
        let outcome = match *action {
            Action::BeginDraw => self.begin_draw().map(ActionOutcome::Drawn),
            Action::Place { cell, point, color } => {
                self.place(cell, point, color).map(|()| ActionOutcome::Placed)
            }
            Action::UndoPlacement => self.undo_placement().map(ActionOutcome::Undone),
            Action::EndPlacement => self
                .end_placement()
                .map(|attack_limit| ActionOutcome::ActionPhase { attack_limit }),
            Action::PlaceBlackBatch { cell, count } => self
                .place_black_batch(cell, count)
                .map(ActionOutcome::BatchPlaced),
            Action::Select(input) => self.select(input).map(ActionOutcome::Selection),
            Action::CancelSelection => self.cancel_selection().map(ActionOutcome::Cancelled),
            Action::TriggerEffect { cell, point } => {
                self.trigger_effect(cell, point).map(ActionOutcome::Effect)
            }
            Action::EndTurn => self
                .end_turn()
                .map(|green_yield| ActionOutcome::TurnEnded { green_yield }),
        };

        match outcome {
            Ok(outcome) => {
                self.record(stamp, action.clone());
                Ok(outcome)
            }
            Err(err) => {
                debug!(?action, %err, "action rejected");
                Err(err)
            }
        }
    }
}
