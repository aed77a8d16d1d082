//! Error types.
//!
//! Every expected rule violation is an ordinary `Err` value and leaves the
//! game untouched. The three families mirror where a request can fail:
//!
//! - `PlacementError`: a prospective placement is illegal
//! - `RuleError`: a command is not allowed in the current state, or a
//!   selection step was invalid (the selection stays where it was)
//! - `ConfigError`: a game cannot be built from the given configuration

use thiserror::Error;

use crate::cells::AtomColor;
use crate::core::Phase;
use crate::lattice::LatticePoint;

/// Why a placement was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("no cell with index {0}")]
    NoSuchCell(usize),

    #[error("point {0} lies outside the cell's region")]
    OutOfRegion(LatticePoint),

    #[error("point {0} is already occupied")]
    Occupied(LatticePoint),

    #[error("placement would leave the cell split into several components")]
    Disconnected,

    #[error("placement would leave the cell without a black atom")]
    NoBlack,

    #[error("no {0} atoms left in the pool")]
    EmptyPool(AtomColor),

    #[error("placement limit of {0} reached for this turn")]
    LimitReached(u32),
}

/// Why a command was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("command requires the {expected} phase, game is in the {actual} phase")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error("no attacks left this turn")]
    AttackBudgetExhausted,

    #[error("attacking is not allowed on the first turn")]
    FirstTurnNoAttack,

    #[error("no red, blue or green atom of the acting player at {0}")]
    NotYourAtom(LatticePoint),

    #[error("the atom at {0} has no adjacent black atom")]
    NoPotency(LatticePoint),

    #[error("removing the atom at {0} would split its cell")]
    WouldDisconnect(LatticePoint),

    #[error("no opposing black atom can be targeted")]
    NoEligibleTargets,

    #[error("invalid selection: {0}")]
    InvalidSelection(&'static str),

    #[error("a selection is in progress")]
    SelectionInProgress,

    #[error("no placement to undo this turn")]
    NothingToUndo,

    #[error("random black placement is disabled")]
    AutomationDisabled,

    #[error("no room to place {0} more black atoms")]
    NoRoom(u32),
}

/// Why a configuration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("starting hit points must be positive, got {0}")]
    NonPositiveHp(i32),

    #[error("draw weights are all zero")]
    ZeroDrawWeights,

    #[error("cell region contains no points")]
    EmptyRegion,
}
