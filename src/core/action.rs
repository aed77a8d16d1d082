//! Commands a host can issue, and the record kept of applied ones.
//!
//! Every command on the `GameState` surface has an `Action` variant so a
//! scripted host can drive a game from data. Applied actions are logged as
//! `ActionRecord`s with the acting player, turn and a per-turn sequence.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cells::AtomColor;
use crate::lattice::LatticePoint;

/// One step of an interactive multi-step selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionInput {
    /// A Cell by index: the attack source (own) or a target (opposing).
    Cell(usize),
    /// A point inside the Cell the current step is about.
    Point(LatticePoint),
    /// Stop choosing optional extra targets.
    Finish,
}

/// A complete game command.
///
/// ## Example
///
/// ```
/// use atom_lattice::cells::AtomColor;
/// use atom_lattice::core::{Action, SelectionInput};
/// use atom_lattice::lattice::LatticePoint;
///
/// let place = Action::Place {
///     cell: 0,
///     point: LatticePoint::new(50, 50),
///     color: AtomColor::Black,
/// };
/// let attack = Action::Select(SelectionInput::Cell(0));
/// assert_ne!(place, attack);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draw this turn's atoms and move to placement.
    BeginDraw,
    /// Place one atom from the pool.
    Place {
        cell: usize,
        point: LatticePoint,
        color: AtomColor,
    },
    /// Revert the most recent placement of this turn.
    UndoPlacement,
    /// Close placement and fix the attack budget.
    EndPlacement,
    /// Bulk-place black atoms with the greedy heuristic.
    PlaceBlackBatch { cell: usize, count: u32 },
    /// Feed one input to the selection sub-state machine.
    Select(SelectionInput),
    /// Discard the selection in progress.
    CancelSelection,
    /// Trigger the effect of one of the acting player's atoms.
    TriggerEffect { cell: usize, point: LatticePoint },
    /// Finish the action phase and hand over to the opponent.
    EndTurn,
}

impl Action {
    /// Whether this action belongs to the placement phase.
    #[must_use]
    pub fn is_placement(&self) -> bool {
        matches!(
            self,
            Action::Place { .. } | Action::UndoPlacement | Action::PlaceBlackBatch { .. }
        )
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
