//! Core engine types: players, RNG, configuration, commands, state.
//!
//! `GameState` is the one owned, mutable aggregate; every other entity is
//! reached through it. Commands that mutate it are implemented in
//! `rules` and `placement`.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, SelectionInput};
pub use config::{GameConfig, DEFAULT_HEX_CENTER, DEFAULT_HEX_RADIUS};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{
    GameState, Phase, PlacementRecord, PlayerState, Protection, TurnCounters, CELLS_PER_PLAYER,
};
