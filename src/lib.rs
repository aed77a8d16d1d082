//! # atom-lattice
//!
//! Rules engine for a two-player strategy game played with colored atoms
//! on a triangular lattice.
//!
//! Each player owns three Cells. A Cell is a bounded lattice region holding
//! black, red, blue and green atoms that must always form one connected
//! group containing at least one black atom. Combat strength comes from
//! geometry: the vertical span of a Cell's black atoms is its attack power,
//! the horizontal span its defense.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: every command checks its preconditions
//!    against the current state first and returns a `Result`; a rejected
//!    command changes nothing.
//!
//! 2. **Atomic multi-step selections**: attacks and red effects are resolved
//!    through a selection sub-state working on cloned Cells. Nothing is
//!    committed until the final step, and cancelling discards the copies.
//!
//! 3. **Persistent Data Structures**: Cells are backed by `im::OrdMap`, so
//!    working copies and snapshots are O(1).
//!
//! 4. **Deterministic**: all randomness comes from a seeded `GameRng`, so a
//!    game replays identically from its `GameConfig`.
//!
//! ## Modules
//!
//! - `lattice`: points, adjacency, regions, span metrics
//! - `cells`: atom colors, pools, Cells and their connectivity queries
//! - `combat`: attack/defense power, cascades, atom effects, target policies
//! - `core`: players, RNG, configuration, actions, game state
//! - `rules`: turn flow, effects, the selection state machine, action dispatch
//! - `placement`: greedy bulk placement of black atoms
//! - `error`: rejection types

pub mod lattice;
pub mod cells;
pub mod combat;
pub mod core;
pub mod rules;
pub mod placement;
pub mod error;

// Re-export commonly used types
pub use crate::lattice::{LatticePoint, Region};

pub use crate::cells::{AtomColor, Cell, ColorCounts, Component};

pub use crate::combat::{CascadeChoice, Interactive, TargetPolicy, UniformRandom};

pub use crate::core::{
    Action, ActionRecord, SelectionInput,
    GameConfig, GameRng,
    PlayerId, PlayerMap,
    GameState, Phase, PlacementRecord, PlayerState, Protection, TurnCounters,
    CELLS_PER_PLAYER,
};

pub use crate::rules::{
    ActionOutcome, EffectOutcome,
    Progress, Prompt, Resolution, Selection, Strike, StrikeCause,
};

pub use crate::error::{ConfigError, PlacementError, RuleError};
