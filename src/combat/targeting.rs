//! Target-selection strategies.
//!
//! Multi-step selections ask a `TargetPolicy` before waiting on the host.
//! A policy answers with a choice, or `None` to leave the step to the
//! host. Two policies ship with the crate:
//!
//! - `Interactive`: always defers to the host
//! - `UniformRandom`: picks uniformly with the game's RNG
//!
//! A `GameState` holds one policy for attacker-side destruction targets
//! and one for the defender's retention choices.

use crate::cells::Component;
use crate::core::GameRng;
use crate::lattice::LatticePoint;

/// Strategy for answering selection steps without host input.
pub trait TargetPolicy: std::fmt::Debug {
    /// Pick one of `candidates`, or `None` to wait for the host.
    fn pick_point(&self, candidates: &[LatticePoint], rng: &mut GameRng) -> Option<LatticePoint>;

    /// Pick the index of one of `options`, or `None` to wait for the host.
    fn pick_component(&self, options: &[Component], rng: &mut GameRng) -> Option<usize>;
}

/// Leaves every choice to the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Interactive;

impl TargetPolicy for Interactive {
    fn pick_point(&self, _candidates: &[LatticePoint], _rng: &mut GameRng) -> Option<LatticePoint> {
        None
    }

    fn pick_component(&self, _options: &[Component], _rng: &mut GameRng) -> Option<usize> {
        None
    }
}

/// Chooses uniformly at random among the candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UniformRandom;

impl TargetPolicy for UniformRandom {
    fn pick_point(&self, candidates: &[LatticePoint], rng: &mut GameRng) -> Option<LatticePoint> {
        rng.choose(candidates).copied()
    }

    fn pick_component(&self, options: &[Component], rng: &mut GameRng) -> Option<usize> {
        if options.is_empty() {
            return None;
        }
        Some(rng.gen_range_usize(0..options.len()))
    }
}
