//! Automated bulk placement of black atoms.
//!
//! `greedy` plans the points; `GameState::place_black_batch` validates the
//! request against the turn budgets and commits the whole plan or nothing.

pub mod greedy;

pub use greedy::greedy_black_points;

use tracing::debug;

use crate::cells::AtomColor;
use crate::core::{GameState, Phase, PlacementRecord};
use crate::error::{PlacementError, RuleError};
use crate::lattice::LatticePoint;

impl GameState {
    /// Place `count` black atoms into own Cell `cell` using greedy growth.
    ///
    /// Each atom counts against the placement limit and can be undone
    /// individually afterwards. Returns the points in placement order.
    ///
    /// # Errors
    ///
    /// - `GameOver`, `WrongPhase` outside placement
    /// - `AutomationDisabled` unless `random_black_placement` is on
    /// - `Placement(NoSuchCell | EmptyPool | LimitReached)` when the
    ///   request exceeds the Cell index, pool or remaining placements
    /// - `NoRoom` if the Cell fills up before the batch completes;
    ///   nothing is placed in that case
    pub fn place_black_batch(
        &mut self,
        cell: usize,
        count: u32,
    ) -> Result<Vec<LatticePoint>, RuleError> {
        self.ensure_live()?;
        self.expect_phase(Phase::Place)?;
        if !self.config.random_black_placement {
            return Err(RuleError::AutomationDisabled);
        }

        let player = self.current;
        let target = self.players[player]
            .cells
            .get(cell)
            .ok_or(PlacementError::NoSuchCell(cell))?;
        if self.counters.placements_remaining() < count {
            return Err(PlacementError::LimitReached(self.counters.place_limit).into());
        }
        if self.players[player].pool[AtomColor::Black] < count {
            return Err(PlacementError::EmptyPool(AtomColor::Black).into());
        }

        let Some(points) = greedy_black_points(target, count, &mut self.rng) else {
            debug!(%player, cell, count, "batch placement has no room");
            return Err(RuleError::NoRoom(count));
        };

        let state = &mut self.players[player];
        for &point in &points {
            state.pool.take(AtomColor::Black);
            state.cells[cell].place(point, AtomColor::Black);
            self.placements.push(PlacementRecord {
                cell,
                point,
                color: AtomColor::Black,
            });
        }
        self.counters.placed += count;

        debug!(%player, cell, count, "black batch placed");
        Ok(points)
    }
}
