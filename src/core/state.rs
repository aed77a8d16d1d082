//! Game state: the single mutable root of a game.
//!
//! ## PlayerState
//!
//! Per-player data:
//! - Atom pool (`ColorCounts`)
//! - Hit points
//! - Exactly three Cells
//!
//! ## GameState
//!
//! Owns both players plus everything that drives a turn:
//! - Phase, current player, turn number, first-turn flag
//! - Per-turn counters and the LIFO placement log for undo
//! - Blue protection windows
//! - The interactive selection sub-state and target policies
//! - RNG and the applied-action history
//!
//! Commands live in `rules` and `placement` as further `impl GameState`
//! blocks. Every one of them is rejected once a winner exists.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::action::{Action, ActionRecord};
use super::config::GameConfig;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cells::{AtomColor, Cell, ColorCounts};
use crate::combat::{self, Interactive, TargetPolicy, UniformRandom};
use crate::error::{ConfigError, PlacementError, RuleError};
use crate::lattice::LatticePoint;
use crate::rules::{Prompt, Selection};

/// Number of Cells each player owns.
pub const CELLS_PER_PLAYER: usize = 3;

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the acting player to start their draw.
    Setup,
    /// Atoms are being drawn (transient).
    Draw,
    /// The acting player places atoms from their pool.
    Place,
    /// Attacks and atom effects.
    Action,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Draw => "draw",
            Phase::Place => "place",
            Phase::Action => "action",
        };
        f.write_str(name)
    }
}

/// One player's pool, hit points and Cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub(crate) pool: ColorCounts,
    pub(crate) hp: i32,
    pub(crate) cells: [Cell; CELLS_PER_PLAYER],
}

impl PlayerState {
    fn new(config: &GameConfig) -> Self {
        Self {
            pool: config.starting_pool,
            hp: config.starting_hp,
            cells: std::array::from_fn(|_| Cell::new(config.region)),
        }
    }

    /// Atoms available for placement.
    #[must_use]
    pub fn pool(&self) -> &ColorCounts {
        &self.pool
    }

    /// Remaining hit points (never below zero).
    #[must_use]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// All three Cells.
    #[must_use]
    pub fn cells(&self) -> &[Cell; CELLS_PER_PLAYER] {
        &self.cells
    }

    /// One Cell by index.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Number of Cells holding at least one black atom.
    #[must_use]
    pub fn cells_with_black(&self) -> usize {
        self.cells.iter().filter(|c| c.has_black()).count()
    }

    /// Whether every Cell is empty.
    #[must_use]
    pub fn all_cells_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

/// Budgets and usage for the current turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCounters {
    /// Atoms drawn at the start of this turn.
    pub draw_count: u32,
    /// Placements allowed this turn.
    pub place_limit: u32,
    /// Placements made this turn.
    pub placed: u32,
    /// Attacks allowed this turn (fixed when the action phase starts).
    pub attack_limit: u32,
    /// Attacks resolved this turn.
    pub attacks_used: u32,
}

impl TurnCounters {
    fn fresh(config: &GameConfig) -> Self {
        Self {
            draw_count: config.base_draw_count,
            place_limit: config.base_place_limit,
            ..Self::default()
        }
    }

    /// Placements still available.
    #[must_use]
    pub fn placements_remaining(&self) -> u32 {
        self.place_limit.saturating_sub(self.placed)
    }

    /// Attacks still available.
    #[must_use]
    pub fn attacks_remaining(&self) -> u32 {
        self.attack_limit.saturating_sub(self.attacks_used)
    }
}

/// One placement of the current turn, kept for undo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub cell: usize,
    pub point: LatticePoint,
    pub color: AtomColor,
}

/// Black atoms a player has shielded with blue effects.
///
/// Entries are `(cell index, point)`. The whole set lapses at once: it is
/// cleared at the start of an owner's turn whose number exceeds
/// `expires_after`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Protection {
    points: FxHashSet<(usize, LatticePoint)>,
    expires_after: u32,
}

impl Protection {
    /// Whether `(cell, p)` is in the protected set.
    #[must_use]
    pub fn contains(&self, cell: usize, p: LatticePoint) -> bool {
        self.points.contains(&(cell, p))
    }

    /// Number of protected points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether nothing is protected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last turn number on which the protection still holds.
    #[must_use]
    pub fn expires_after(&self) -> u32 {
        self.expires_after
    }

    pub(crate) fn grant(
        &mut self,
        cell: usize,
        points: impl IntoIterator<Item = LatticePoint>,
        expires_after: u32,
    ) {
        self.points.extend(points.into_iter().map(|p| (cell, p)));
        self.expires_after = expires_after;
    }

    /// Clear the set if `turn` is past the expiry. Returns whether it was cleared.
    pub(crate) fn expire(&mut self, turn: u32) -> bool {
        if self.points.is_empty() || turn <= self.expires_after {
            return false;
        }
        self.points.clear();
        true
    }
}

/// Complete game state.
///
/// ## Example
///
/// ```
/// use atom_lattice::core::{GameConfig, GameState, Phase, PlayerId};
///
/// let state = GameState::new(GameConfig::default()).unwrap();
/// assert_eq!(state.phase(), Phase::Setup);
/// assert_eq!(state.current_player(), PlayerId::FIRST);
/// assert!(state.is_first_turn());
/// assert_eq!(state.winner(), None);
/// ```
#[derive(Debug)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) players: PlayerMap<PlayerState>,
    pub(crate) current: PlayerId,
    pub(crate) phase: Phase,
    pub(crate) turn_number: u32,
    pub(crate) first_turn: bool,
    pub(crate) counters: TurnCounters,
    pub(crate) placements: Vec<PlacementRecord>,
    pub(crate) protection: PlayerMap<Protection>,
    pub(crate) selection: Selection,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) history: Vector<ActionRecord>,
    pub(crate) sequence: u32,
    pub(crate) rng: GameRng,
    pub(crate) destroy_policy: Box<dyn TargetPolicy>,
    pub(crate) retain_policy: Box<dyn TargetPolicy>,
}

impl GameState {
    /// Create a game at the first player's setup phase.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` from `GameConfig::validate`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let destroy_policy: Box<dyn TargetPolicy> = if config.random_destroy {
            Box::new(UniformRandom)
        } else {
            Box::new(Interactive)
        };

        info!(seed = config.seed, hp = config.starting_hp, "new game");

        Ok(Self {
            players: PlayerMap::new(|_| PlayerState::new(&config)),
            current: PlayerId::FIRST,
            phase: Phase::Setup,
            turn_number: 0,
            first_turn: true,
            counters: TurnCounters::fresh(&config),
            placements: Vec::new(),
            protection: PlayerMap::with_value(Protection::default()),
            selection: Selection::Idle,
            winner: None,
            history: Vector::new(),
            sequence: 0,
            rng: GameRng::new(config.seed),
            destroy_policy,
            retain_policy: Box::new(Interactive),
            config,
        })
    }

    /// Throw the current game away and start a new one from `config`.
    ///
    /// The retention policy installed with `set_retain_policy` survives a
    /// restart; the destruction policy is rebuilt from `random_destroy`.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` from `GameConfig::validate`; the current
    /// game is left untouched in that case.
    pub fn restart(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        let mut fresh = Self::new(config)?;
        std::mem::swap(&mut fresh.retain_policy, &mut self.retain_policy);
        *self = fresh;
        info!("game restarted");
        Ok(())
    }

    /// Replace the policy that picks attacker-side destruction targets.
    pub fn set_destroy_policy(&mut self, policy: impl TargetPolicy + 'static) {
        self.destroy_policy = Box::new(policy);
    }

    /// Replace the policy that picks which component or cluster a defender keeps.
    pub fn set_retain_policy(&mut self, policy: impl TargetPolicy + 'static) {
        self.retain_policy = Box::new(policy);
    }

    // === Queries ===

    /// Configuration this game was built from.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Number of completed turns (0 during the opening turn).
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Whether this is the opening turn, on which attacking is disabled.
    #[must_use]
    pub fn is_first_turn(&self) -> bool {
        self.first_turn
    }

    /// Budgets and usage for the current turn.
    #[must_use]
    pub fn counters(&self) -> &TurnCounters {
        &self.counters
    }

    /// A player's pool, hit points and Cells.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    /// A player's atom pool.
    #[must_use]
    pub fn pool(&self, player: PlayerId) -> &ColorCounts {
        &self.players[player].pool
    }

    /// A player's hit points.
    #[must_use]
    pub fn hp(&self, player: PlayerId) -> i32 {
        self.players[player].hp
    }

    /// One of a player's Cells.
    #[must_use]
    pub fn cell(&self, player: PlayerId, index: usize) -> Option<&Cell> {
        self.players[player].cell(index)
    }

    /// Attack power of one of a player's Cells.
    #[must_use]
    pub fn attack_power_of(&self, player: PlayerId, index: usize) -> Option<f64> {
        self.cell(player, index).map(combat::attack_power)
    }

    /// Defense power of one of a player's Cells.
    #[must_use]
    pub fn defense_power_of(&self, player: PlayerId, index: usize) -> Option<f64> {
        self.cell(player, index).map(combat::defense_power)
    }

    /// The winner, once either player's hit points reached zero.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// A player's protected black atoms.
    #[must_use]
    pub fn protection(&self, player: PlayerId) -> &Protection {
        &self.protection[player]
    }

    /// Whether the black atom at `p` in `owner`'s Cell is shielded.
    #[must_use]
    pub fn is_protected(&self, owner: PlayerId, cell: usize, p: LatticePoint) -> bool {
        self.cell(owner, cell)
            .is_some_and(|c| self.protected_in(owner, cell, c, p))
    }

    /// Placements made this turn, oldest first.
    #[must_use]
    pub fn placements(&self) -> &[PlacementRecord] {
        &self.placements
    }

    /// The selection sub-state.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// What the action phase is waiting for; `None` outside it or after the game ended.
    #[must_use]
    pub fn prompt(&self) -> Option<Prompt> {
        (self.phase == Phase::Action && !self.is_over()).then(|| self.selection.prompt())
    }

    /// Every action applied through `apply_action`.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Internal helpers ===

    /// Reject any command once the game is decided.
    pub(crate) fn ensure_live(&self) -> Result<(), RuleError> {
        if self.winner.is_some() {
            return Err(RuleError::GameOver);
        }
        Ok(())
    }

    pub(crate) fn expect_phase(&self, expected: Phase) -> Result<(), RuleError> {
        if self.phase != expected {
            return Err(RuleError::WrongPhase {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }

    pub(crate) fn ensure_idle(&self) -> Result<(), RuleError> {
        if !self.selection.is_idle() {
            return Err(RuleError::SelectionInProgress);
        }
        Ok(())
    }

    pub(crate) fn own_cell(&self, index: usize) -> Result<&Cell, PlacementError> {
        self.players[self.current]
            .cell(index)
            .ok_or(PlacementError::NoSuchCell(index))
    }

    /// Protection check against an arbitrary view of `owner`'s Cell, such
    /// as a working copy mid-selection.
    pub(crate) fn protected_in(
        &self,
        owner: PlayerId,
        index: usize,
        cell: &Cell,
        p: LatticePoint,
    ) -> bool {
        cell.get(p) == Some(AtomColor::Black) && self.protection[owner].contains(index, p)
    }

    /// Black atoms of `cell` that may be chosen as destruction targets.
    pub(crate) fn eligible_blacks(
        &self,
        owner: PlayerId,
        index: usize,
        cell: &Cell,
    ) -> Vec<LatticePoint> {
        cell.black_points()
            .into_iter()
            .filter(|&p| !self.protected_in(owner, index, cell, p))
            .collect()
    }

    /// Subtract hit points (floored at zero) and settle the winner.
    pub(crate) fn apply_damage(&mut self, target: PlayerId, damage: u32) {
        if damage == 0 {
            return;
        }
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        let state = &mut self.players[target];
        state.hp = state.hp.saturating_sub(damage).max(0);

        if state.hp == 0 && self.winner.is_none() {
            let winner = target.opponent();
            self.winner = Some(winner);
            info!(%winner, "game over");
        }
    }

    /// Who is acting, on which turn, at which sequence number.
    pub(crate) fn stamp(&self) -> (PlayerId, u32, u32) {
        (self.current, self.turn_number, self.sequence)
    }

    /// Log an applied action under the stamp taken before it ran.
    pub(crate) fn record(&mut self, stamp: (PlayerId, u32, u32), action: Action) {
        let (player, turn, sequence) = stamp;
        self.history
            .push_back(ActionRecord::new(player, action, turn, sequence));
        if turn == self.turn_number {
            self.sequence = sequence + 1;
        }
    }

    pub(crate) fn reset_turn(&mut self) {
        self.counters = TurnCounters::fresh(&self.config);
        self.placements.clear();
        self.sequence = 0;
    }
}
