//! Game configuration.
//!
//! A `GameConfig` is consumed once, when a `GameState` is created or
//! restarted. It fixes:
//! - starting pools and hit points
//! - per-turn draw and placement budgets
//! - the draw color distribution
//! - the region every Cell is built over
//! - the automation toggles and the RNG seed

use serde::{Deserialize, Serialize};

use crate::cells::ColorCounts;
use crate::error::ConfigError;
use crate::lattice::{LatticePoint, Region};

/// Radius of the default hexagonal Cell region.
pub const DEFAULT_HEX_RADIUS: i32 = 15;

/// Center of the default hexagonal Cell region.
pub const DEFAULT_HEX_CENTER: LatticePoint = LatticePoint::new(50, 50);

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use atom_lattice::cells::ColorCounts;
/// use atom_lattice::core::GameConfig;
///
/// let config = GameConfig::default()
///     .with_starting_hp(10)
///     .with_draw_weights(ColorCounts::new(1, 1, 1, 1))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Atoms in each player's pool at game start.
    pub starting_pool: ColorCounts,

    /// Hit points each player starts with.
    pub starting_hp: i32,

    /// Atoms drawn at the start of every turn.
    pub base_draw_count: u32,

    /// Placements allowed per turn.
    pub base_place_limit: u32,

    /// Relative weight of each color when drawing.
    pub draw_weights: ColorCounts,

    /// Pick attack and red-effect destruction targets uniformly at random.
    pub random_destroy: bool,

    /// Allow bulk black placement seeded from random frontier points.
    pub random_black_placement: bool,

    /// Region every Cell is built over.
    pub region: Region,

    /// Seed for the game's RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_pool: ColorCounts::new(7, 1, 1, 1),
            starting_hp: 20,
            base_draw_count: 5,
            base_place_limit: 4,
            draw_weights: ColorCounts::new(3, 1, 1, 1),
            random_destroy: false,
            random_black_placement: false,
            region: Region::hexagon(DEFAULT_HEX_CENTER, DEFAULT_HEX_RADIUS),
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Set the starting pool.
    #[must_use]
    pub fn with_starting_pool(mut self, pool: ColorCounts) -> Self {
        self.starting_pool = pool;
        self
    }

    /// Set the starting hit points.
    #[must_use]
    pub fn with_starting_hp(mut self, hp: i32) -> Self {
        self.starting_hp = hp;
        self
    }

    /// Set the number of atoms drawn per turn.
    #[must_use]
    pub fn with_draw_count(mut self, count: u32) -> Self {
        self.base_draw_count = count;
        self
    }

    /// Set the number of placements allowed per turn.
    #[must_use]
    pub fn with_place_limit(mut self, limit: u32) -> Self {
        self.base_place_limit = limit;
        self
    }

    /// Set the draw color weights.
    #[must_use]
    pub fn with_draw_weights(mut self, weights: ColorCounts) -> Self {
        self.draw_weights = weights;
        self
    }

    /// Enable or disable random destruction targets.
    #[must_use]
    pub fn with_random_destroy(mut self, enabled: bool) -> Self {
        self.random_destroy = enabled;
        self
    }

    /// Enable or disable bulk random black placement.
    #[must_use]
    pub fn with_random_black_placement(mut self, enabled: bool) -> Self {
        self.random_black_placement = enabled;
        self
    }

    /// Set the Cell region.
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that a game can be built from this configuration.
    ///
    /// # Errors
    ///
    /// - `NonPositiveHp` if `starting_hp <= 0`
    /// - `ZeroDrawWeights` if draws are requested but every weight is zero
    /// - `EmptyRegion` if the region holds no point
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_hp <= 0 {
            return Err(ConfigError::NonPositiveHp(self.starting_hp));
        }
        if self.base_draw_count > 0 && self.draw_weights.total() == 0 {
            return Err(ConfigError::ZeroDrawWeights);
        }
        if self.region.is_empty() {
            return Err(ConfigError::EmptyRegion);
        }
        Ok(())
    }
}
