//! Combat resolution.
//!
//! Stateless functions over one or two Cells:
//! - `power`: attack/defense power and the strict comparison between them
//! - `cascade`: reduction of a damaged Cell back to its invariant
//! - `effect`: red/blue/green atom effects
//! - `targeting`: swappable strategies for destruction and retention choices
//!
//! The `GameState` side of combat (working copies, budgets, hit points)
//! lives in `rules`.

pub mod cascade;
pub mod effect;
pub mod power;
pub mod targeting;

pub use cascade::{
    apply_choice, clear_if_no_black, next_cascade_choice, remove_blackless_components,
    resolve_with, retain_black_cluster, retain_component, CascadeChoice,
};
pub use effect::{
    blue_shield_targets, convert_green, green_yield, potency_if, removal_keeps_connected,
};
pub use power::{
    attack_beats_defense, attack_power, defense_power, direct_attack_damage, extra_destroys,
};
pub use targeting::{Interactive, TargetPolicy, UniformRandom};
