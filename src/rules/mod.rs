//! Rules: everything that mutates a `GameState`.
//!
//! - `turn`: draw, placement, undo, phase changes, end of turn
//! - `effects`: triggering red, blue and green atoms
//! - `selection`: the interactive sub-state machine for attacks and red effects
//! - `engine`: data-driven dispatch of `Action` values
//!
//! Queries go down to `combat`, `cells` and `lattice`; the state is only
//! mutated here after a request has been fully validated.

pub mod effects;
pub mod engine;
pub mod selection;
pub mod turn;

pub use effects::EffectOutcome;
pub use engine::ActionOutcome;
pub use selection::{Progress, Prompt, Resolution, Selection, Strike, StrikeCause};
