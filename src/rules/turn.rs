//! Turn and phase state machine.
//!
//! `Setup -> Draw -> Place -> Action -> (end turn) -> Setup` for the
//! other player. Draw is transient: `begin_draw` performs it and lands in
//! Place.

use tracing::{debug, info};

use crate::cells::{AtomColor, ColorCounts};
use crate::combat;
use crate::core::{GameState, Phase, PlacementRecord};
use crate::error::{PlacementError, RuleError};
use crate::lattice::LatticePoint;

impl GameState {
    /// Draw this turn's atoms into the acting player's pool and move to placement.
    ///
    /// Each atom's color is drawn independently from the configured weights.
    /// Returns the atoms drawn.
    ///
    /// # Errors
    ///
    /// `GameOver`, or `WrongPhase` outside setup.
    pub fn begin_draw(&mut self) -> Result<ColorCounts, RuleError> {
        self.ensure_live()?;
        self.expect_phase(Phase::Setup)?;
        self.phase = Phase::Draw;

        let weights = *self.config.draw_weights.as_weights();
        let mut drawn = ColorCounts::zero();
        for _ in 0..self.counters.draw_count {
            if let Some(index) = self.rng.choose_weighted(&weights) {
                drawn.add(AtomColor::ALL[index], 1);
            }
        }

        let player = self.current;
        for (color, n) in drawn.iter() {
            self.players[player].pool.add(color, n);
        }

        self.phase = Phase::Place;
        info!(%player, turn = self.turn_number, ?drawn, "draw");
        Ok(drawn)
    }

    /// Check a prospective placement for the acting player without changing anything.
    ///
    /// # Errors
    ///
    /// The first `PlacementError` that applies, checked in the order
    /// cell index, turn limit, pool, region, occupancy, connectivity, black.
    pub fn placement_legality(
        &self,
        cell: usize,
        point: LatticePoint,
        color: AtomColor,
    ) -> Result<(), PlacementError> {
        let target = self.own_cell(cell)?;

        if self.counters.placements_remaining() == 0 {
            return Err(PlacementError::LimitReached(self.counters.place_limit));
        }
        if self.players[self.current].pool[color] == 0 {
            return Err(PlacementError::EmptyPool(color));
        }
        if !target.region().contains(point) {
            return Err(PlacementError::OutOfRegion(point));
        }
        if target.is_occupied(point) {
            return Err(PlacementError::Occupied(point));
        }

        let mut probe = target.clone();
        probe.place(point, color);
        if !probe.is_connected() {
            return Err(PlacementError::Disconnected);
        }
        if !probe.has_black() {
            return Err(PlacementError::NoBlack);
        }
        Ok(())
    }

    /// Every point of an own Cell where an atom of `color` may go right now.
    #[must_use]
    pub fn legal_placements(&self, cell: usize, color: AtomColor) -> Vec<LatticePoint> {
        let Some(target) = self.players[self.current].cell(cell) else {
            return Vec::new();
        };
        let candidates = if target.is_empty() {
            target.region().points()
        } else {
            target.empty_frontier()
        };
        candidates
            .into_iter()
            .filter(|&p| self.placement_legality(cell, p, color).is_ok())
            .collect()
    }

    /// Place one atom from the pool into an own Cell.
    ///
    /// # Errors
    ///
    /// `GameOver`, `WrongPhase` outside placement, or the
    /// `PlacementError` from `placement_legality`.
    pub fn place(
        &mut self,
        cell: usize,
        point: LatticePoint,
        color: AtomColor,
    ) -> Result<(), RuleError> {
        self.ensure_live()?;
        self.expect_phase(Phase::Place)?;
        if let Err(err) = self.placement_legality(cell, point, color) {
            debug!(cell, %point, %color, %err, "placement rejected");
            return Err(err.into());
        }

        let player = self.current;
        let state = &mut self.players[player];
        state.pool.take(color);
        state.cells[cell].place(point, color);
        self.counters.placed += 1;
        self.placements.push(PlacementRecord { cell, point, color });
        debug!(%player, cell, %point, %color, "placed");
        Ok(())
    }

    /// Revert the most recent placement of this turn, refunding pool and counter.
    ///
    /// # Errors
    ///
    /// `GameOver`, `WrongPhase` outside placement, or `NothingToUndo`.
    pub fn undo_placement(&mut self) -> Result<PlacementRecord, RuleError> {
        self.ensure_live()?;
        self.expect_phase(Phase::Place)?;
        let record = self.placements.pop().ok_or(RuleError::NothingToUndo)?;

        let state = &mut self.players[self.current];
        state.cells[record.cell].remove(record.point);
        state.pool.add(record.color, 1);
        self.counters.placed = self.counters.placed.saturating_sub(1);
        debug!(cell = record.cell, point = %record.point, "placement undone");
        Ok(record)
    }

    /// Close placement and fix this turn's attack budget: one attack per
    /// own Cell holding a black atom. Returns the budget.
    ///
    /// # Errors
    ///
    /// `GameOver`, or `WrongPhase` outside placement.
    pub fn end_placement(&mut self) -> Result<u32, RuleError> {
        self.ensure_live()?;
        self.expect_phase(Phase::Place)?;

        let limit = self.players[self.current].cells_with_black();
        self.counters.attack_limit = u32::try_from(limit).unwrap_or(u32::MAX);
        self.placements.clear();
        self.selection = Default::default();
        self.phase = Phase::Action;
        info!(player = %self.current, attacks = limit, "action phase");
        Ok(self.counters.attack_limit)
    }

    /// Finish the action phase and hand the turn to the opponent.
    ///
    /// Applies the green yield, resets the turn counters, flips the
    /// current player, clears their expired protection and returns to
    /// setup. Returns the number of black atoms the green yield added.
    ///
    /// # Errors
    ///
    /// `GameOver`, `WrongPhase` outside the action phase, or
    /// `SelectionInProgress`.
    pub fn end_turn(&mut self) -> Result<u32, RuleError> {
        self.ensure_live()?;
        self.expect_phase(Phase::Action)?;
        self.ensure_idle()?;

        let player = self.current;
        let yielded = combat::green_yield(self.players[player].cells.iter());
        self.players[player].pool.add(AtomColor::Black, yielded);

        self.reset_turn();
        self.current = player.opponent();
        self.turn_number += 1;
        self.first_turn = false;
        if self.protection[self.current].expire(self.turn_number) {
            debug!(player = %self.current, "protection expired");
        }
        self.phase = Phase::Setup;

        info!(%player, yielded, next = %self.current, turn = self.turn_number, "turn ended");
        Ok(yielded)
    }
}
