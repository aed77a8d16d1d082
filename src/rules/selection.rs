//! Interactive multi-step selection.
//!
//! Attacks and red effects unfold over several host inputs. `Selection` is
//! the sub-state of the action phase that tracks where such a sequence
//! stands; `GameState::select` is its single transition.
//!
//! ```text
//! Idle --Cell(own)--> AwaitingTargetCell --Cell(opp)--> AwaitingBlackAtom
//!   |                                                      |
//!   | (trigger red)                                        v
//!   v                                            AwaitingExtraTargets
//! AwaitingRedTargetCell --Cell(opp)--> AwaitingRedTargets  |
//!                                            |             |
//!                                            v             v
//!                       AwaitingComponentChoice <-> AwaitingBlackComponentChoice
//!                                            |
//!                                            v
//!                                   commit, back to Idle
//! ```
//!
//! All destruction happens on a working copy of the target Cell (a cheap
//! persistent clone). Nothing touches the live game until the cascade is
//! settled; the commit then swaps the copy in, applies damage and budgets
//! in one go. Cancelling just drops the copy.
//!
//! An invalid input leaves the selection exactly where it was.

use tracing::debug;

use crate::cells::{AtomColor, Cell, Component};
use crate::combat::{self, CascadeChoice};
use crate::core::{GameState, Phase, SelectionInput, CELLS_PER_PLAYER};
use crate::error::RuleError;
use crate::lattice::LatticePoint;

/// What started a strike on an opposing Cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikeCause {
    /// An attack from one of the acting player's Cells.
    Attack { source: usize },
    /// A red atom's effect; the atom is consumed on commit.
    Red { cell: usize, point: LatticePoint },
}

/// Destruction in progress against one opposing Cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Strike {
    cause: StrikeCause,
    target: usize,
    working: Cell,
    damage: u32,
}

impl Strike {
    fn new(cause: StrikeCause, target: usize, live: &Cell) -> Self {
        Self {
            cause,
            target,
            working: live.clone(),
            damage: 0,
        }
    }

    /// What started this strike.
    #[must_use]
    pub fn cause(&self) -> StrikeCause {
        self.cause
    }

    /// Index of the opposing Cell under attack.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// The target Cell as it would look if committed now.
    #[must_use]
    pub fn working(&self) -> &Cell {
        &self.working
    }

    /// Damage accumulated so far.
    #[must_use]
    pub fn damage(&self) -> u32 {
        self.damage
    }
}

/// Sub-state of the action phase.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Attack source chosen; waiting for an opposing Cell.
    AwaitingTargetCell { source: usize },
    /// Attack landed; waiting for the black atom to destroy.
    AwaitingBlackAtom { strike: Strike, extra: u32 },
    /// Waiting for up to `remaining` more atoms to destroy.
    AwaitingExtraTargets { strike: Strike, remaining: u32 },
    /// Defender keeps one of several components.
    AwaitingComponentChoice { strike: Strike, options: Vec<Component> },
    /// Defender keeps one of several black clusters.
    AwaitingBlackComponentChoice { strike: Strike, options: Vec<Component> },
    /// Red effect armed; waiting for an opposing Cell.
    AwaitingRedTargetCell {
        cell: usize,
        point: LatticePoint,
        potency: usize,
    },
    /// Waiting for `remaining` more black atoms to destroy.
    AwaitingRedTargets { strike: Strike, remaining: usize },
}

/// What the action phase is waiting for.
///
/// `ComponentChoice` and `BlackClusterChoice` are answered by the
/// defending player; every other prompt by the acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// An own Cell to attack from (or an atom effect to trigger).
    AttackSource,
    /// An opposing Cell to attack.
    TargetCell,
    /// An unprotected black atom in the target Cell.
    BlackAtom { cell: usize },
    /// Optional extra atoms in the target Cell, or `Finish`.
    ExtraTargets { cell: usize, remaining: u32 },
    /// A point inside the component to keep.
    ComponentChoice { cell: usize, options: usize },
    /// A point inside the black cluster to keep.
    BlackClusterChoice { cell: usize, options: usize },
    /// An opposing Cell for the red effect.
    RedTargetCell { potency: usize },
    /// More unprotected black atoms for the red effect.
    RedTargets { cell: usize, remaining: usize },
}

/// Result of one accepted selection input.
#[derive(Clone, Debug, PartialEq)]
pub enum Progress {
    /// The selection advanced and waits for more input.
    Awaiting(Prompt),
    /// The strike was committed.
    Resolved(Resolution),
    /// Attack power did not exceed defense power. Nothing happened and
    /// the attack budget is untouched.
    Repelled { attack: f64, defense: f64 },
}

/// Outcome of a committed strike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Hit points taken from the defender.
    pub damage: u32,
    /// Atoms removed from the target Cell, cascade included.
    pub destroyed: usize,
}

impl Selection {
    /// Whether nothing is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    /// What this state waits for.
    #[must_use]
    pub fn prompt(&self) -> Prompt {
        match self {
            Selection::Idle => Prompt::AttackSource,
            Selection::AwaitingTargetCell { .. } => Prompt::TargetCell,
            Selection::AwaitingBlackAtom { strike, .. } => Prompt::BlackAtom {
                cell: strike.target,
            },
            Selection::AwaitingExtraTargets { strike, remaining } => Prompt::ExtraTargets {
                cell: strike.target,
                remaining: *remaining,
            },
            Selection::AwaitingComponentChoice { strike, options } => Prompt::ComponentChoice {
                cell: strike.target,
                options: options.len(),
            },
            Selection::AwaitingBlackComponentChoice { strike, options } => {
                Prompt::BlackClusterChoice {
                    cell: strike.target,
                    options: options.len(),
                }
            }
            Selection::AwaitingRedTargetCell { potency, .. } => Prompt::RedTargetCell {
                potency: *potency,
            },
            Selection::AwaitingRedTargets { strike, remaining } => Prompt::RedTargets {
                cell: strike.target,
                remaining: *remaining,
            },
        }
    }

    /// The strike in progress, if destruction has started.
    #[must_use]
    pub fn strike(&self) -> Option<&Strike> {
        match self {
            Selection::AwaitingBlackAtom { strike, .. }
            | Selection::AwaitingExtraTargets { strike, .. }
            | Selection::AwaitingComponentChoice { strike, .. }
            | Selection::AwaitingBlackComponentChoice { strike, .. }
            | Selection::AwaitingRedTargets { strike, .. } => Some(strike),
            Selection::Idle
            | Selection::AwaitingTargetCell { .. }
            | Selection::AwaitingRedTargetCell { .. } => None,
        }
    }

    /// Options of a pending retention choice.
    #[must_use]
    pub fn options(&self) -> Option<&[Component]> {
        match self {
            Selection::AwaitingComponentChoice { options, .. }
            | Selection::AwaitingBlackComponentChoice { options, .. } => Some(options),
            _ => None,
        }
    }

    fn expected_input(&self) -> &'static str {
        match self {
            Selection::Idle => "expected an own cell to attack from",
            Selection::AwaitingTargetCell { .. } | Selection::AwaitingRedTargetCell { .. } => {
                "expected an opposing cell"
            }
            Selection::AwaitingBlackAtom { .. } | Selection::AwaitingRedTargets { .. } => {
                "expected a point in the target cell"
            }
            Selection::AwaitingExtraTargets { .. } => "expected a point in the target cell or finish",
            Selection::AwaitingComponentChoice { .. }
            | Selection::AwaitingBlackComponentChoice { .. } => "expected a point inside an option",
        }
    }
}

/// Result of one transition before automatic steps run.
enum Step {
    Next(Selection),
    Cascade(Strike),
    Done(Progress),
}

/// A rejected input, carrying the state to restore.
type Rejected = (Selection, RuleError);

impl GameState {
    /// Feed one input to the selection sub-state machine.
    ///
    /// After each accepted input the target policies get a chance to
    /// answer the following steps; the call returns once the machine needs
    /// the host again or the strike is committed.
    ///
    /// # Errors
    ///
    /// - `GameOver` / `WrongPhase` before anything is looked at
    /// - `FirstTurnNoAttack` / `AttackBudgetExhausted` when starting an attack
    /// - `InvalidSelection` for an input the current step cannot take; the
    ///   step stays as it was
    pub fn select(&mut self, input: SelectionInput) -> Result<Progress, RuleError> {
        self.ensure_live()?;
        self.expect_phase(Phase::Action)?;

        let selection = std::mem::take(&mut self.selection);
        match self
            .step(selection, input)
            .and_then(|step| self.settle(step))
        {
            Ok(progress) => {
                debug!(?input, ?progress, "selection advanced");
                Ok(progress)
            }
            Err((previous, err)) => {
                debug!(?input, %err, "selection input rejected");
                self.selection = previous;
                Err(err)
            }
        }
    }

    /// Choose the own Cell to attack from.
    ///
    /// # Errors
    ///
    /// See `select`.
    pub fn select_attack_source(&mut self, cell: usize) -> Result<Progress, RuleError> {
        self.select(SelectionInput::Cell(cell))
    }

    /// Choose the opposing Cell for the pending attack or red effect.
    ///
    /// # Errors
    ///
    /// See `select`.
    pub fn select_target_cell(&mut self, cell: usize) -> Result<Progress, RuleError> {
        self.select(SelectionInput::Cell(cell))
    }

    /// Choose a point: a destruction target, or an atom of the option to keep.
    ///
    /// # Errors
    ///
    /// See `select`.
    pub fn select_point(&mut self, point: LatticePoint) -> Result<Progress, RuleError> {
        self.select(SelectionInput::Point(point))
    }

    /// Stop choosing extra destruction targets.
    ///
    /// # Errors
    ///
    /// See `select`.
    pub fn finish_extra_targets(&mut self) -> Result<Progress, RuleError> {
        self.select(SelectionInput::Finish)
    }

    /// Drop the selection in progress without changing the game.
    ///
    /// Returns whether anything was discarded.
    ///
    /// # Errors
    ///
    /// `GameOver` once the game is decided.
    pub fn cancel_selection(&mut self) -> Result<bool, RuleError> {
        self.ensure_live()?;
        if self.selection.is_idle() {
            return Ok(false);
        }
        let dropped = std::mem::take(&mut self.selection);
        debug!(prompt = ?dropped.prompt(), "selection cancelled");
        Ok(true)
    }

    /// Arm a red effect; the atom stays in place until the strike commits.
    pub(crate) fn arm_red(&mut self, cell: usize, point: LatticePoint, potency: usize) {
        self.selection = Selection::AwaitingRedTargetCell {
            cell,
            point,
            potency,
        };
    }

    fn step(&mut self, selection: Selection, input: SelectionInput) -> Result<Step, Rejected> {
        match (selection, input) {
            (Selection::Idle, SelectionInput::Cell(source)) => self.begin_attack(source),

            (Selection::AwaitingTargetCell { source }, SelectionInput::Cell(target)) => {
                self.aim_attack(source, target)
            }

            (Selection::AwaitingBlackAtom { strike, extra }, SelectionInput::Point(p)) => {
                self.destroy_first_black(strike, extra, p)
            }

            (Selection::AwaitingExtraTargets { strike, remaining }, SelectionInput::Point(p)) => {
                self.destroy_extra(strike, remaining, p)
            }

            (Selection::AwaitingExtraTargets { strike, .. }, SelectionInput::Finish) => {
                Ok(Step::Cascade(strike))
            }

            (
                Selection::AwaitingComponentChoice {
                    mut strike,
                    options,
                },
                SelectionInput::Point(p),
            ) => match options.iter().find(|c| c.contains(&p)) {
                Some(keep) => {
                    combat::retain_component(&mut strike.working, keep);
                    Ok(Step::Cascade(strike))
                }
                None => Err((
                    Selection::AwaitingComponentChoice { strike, options },
                    RuleError::InvalidSelection("point is not inside any component"),
                )),
            },

            (
                Selection::AwaitingBlackComponentChoice {
                    mut strike,
                    options,
                },
                SelectionInput::Point(p),
            ) => match options.iter().find(|c| c.contains(&p)) {
                Some(keep) => {
                    combat::retain_black_cluster(&mut strike.working, keep);
                    Ok(Step::Cascade(strike))
                }
                None => Err((
                    Selection::AwaitingBlackComponentChoice { strike, options },
                    RuleError::InvalidSelection("point is not inside any black cluster"),
                )),
            },

            (
                Selection::AwaitingRedTargetCell {
                    cell,
                    point,
                    potency,
                },
                SelectionInput::Cell(target),
            ) => self.aim_red(cell, point, potency, target),

            (Selection::AwaitingRedTargets { strike, remaining }, SelectionInput::Point(p)) => {
                self.destroy_red_target(strike, remaining, p)
            }

            (selection, _) => {
                let reason = selection.expected_input();
                Err((selection, RuleError::InvalidSelection(reason)))
            }
        }
    }

    /// Run cascade steps and policy answers until the host is needed.
    fn settle(&mut self, mut step: Step) -> Result<Progress, Rejected> {
        loop {
            step = match step {
                Step::Done(progress) => return Ok(progress),
                Step::Cascade(mut strike) => match combat::next_cascade_choice(&mut strike.working) {
                    None => return Ok(self.commit(strike)),
                    Some(CascadeChoice::Component(options)) => {
                        Step::Next(Selection::AwaitingComponentChoice { strike, options })
                    }
                    Some(CascadeChoice::BlackCluster(options)) => {
                        Step::Next(Selection::AwaitingBlackComponentChoice { strike, options })
                    }
                },
                Step::Next(selection) => match self.automatic_input(&selection) {
                    Some(input) => self.step(selection, input)?,
                    None => {
                        let prompt = selection.prompt();
                        self.selection = selection;
                        return Ok(Progress::Awaiting(prompt));
                    }
                },
            };
        }
    }

    /// Ask the target policies to answer `selection`.
    fn automatic_input(&mut self, selection: &Selection) -> Option<SelectionInput> {
        let defender = self.current.opponent();
        match selection {
            Selection::AwaitingBlackAtom { strike, .. }
            | Selection::AwaitingRedTargets { strike, .. } => {
                let candidates = self.eligible_blacks(defender, strike.target, &strike.working);
                self.destroy_policy
                    .pick_point(&candidates, &mut self.rng)
                    .map(SelectionInput::Point)
            }
            Selection::AwaitingExtraTargets { strike, .. } => {
                let candidates = self.extra_candidates(strike);
                self.destroy_policy
                    .pick_point(&candidates, &mut self.rng)
                    .map(SelectionInput::Point)
            }
            Selection::AwaitingComponentChoice { options, .. }
            | Selection::AwaitingBlackComponentChoice { options, .. } => {
                let index = self.retain_policy.pick_component(options, &mut self.rng)?;
                let point = options.get(index)?.first().copied()?;
                Some(SelectionInput::Point(point))
            }
            Selection::Idle
            | Selection::AwaitingTargetCell { .. }
            | Selection::AwaitingRedTargetCell { .. } => None,
        }
    }

    fn begin_attack(&mut self, source: usize) -> Result<Step, Rejected> {
        let reject = |err| Err((Selection::Idle, err));

        if self.first_turn {
            return reject(RuleError::FirstTurnNoAttack);
        }
        if self.counters.attacks_remaining() == 0 {
            return reject(RuleError::AttackBudgetExhausted);
        }
        let Some(cell) = self.players[self.current].cell(source) else {
            return reject(RuleError::InvalidSelection("no such cell"));
        };
        if !cell.has_black() {
            return reject(RuleError::InvalidSelection("attack source holds no black atom"));
        }

        let defender = self.current.opponent();
        if self.players[defender].all_cells_empty() {
            let damage = combat::direct_attack_damage(cell);
            self.counters.attacks_used += 1;
            self.apply_damage(defender, damage);
            debug!(source, damage, "direct attack");
            return Ok(Step::Done(Progress::Resolved(Resolution {
                damage,
                destroyed: 0,
            })));
        }

        Ok(Step::Next(Selection::AwaitingTargetCell { source }))
    }

    fn aim_attack(&mut self, source: usize, target: usize) -> Result<Step, Rejected> {
        let reject = |reason| {
            Err((
                Selection::AwaitingTargetCell { source },
                RuleError::InvalidSelection(reason),
            ))
        };

        let attacker = self.current;
        let defender = attacker.opponent();
        let Some(defending) = self.players[defender].cell(target) else {
            return reject("no such cell");
        };
        if defending.is_empty() {
            return reject("target cell is empty");
        }

        let attacking = &self.players[attacker].cells[source];
        let attack = combat::attack_power(attacking);
        let defense = combat::defense_power(defending);
        if !combat::attack_beats_defense(attacking, defending) {
            debug!(source, target, attack, defense, "attack repelled");
            return Ok(Step::Done(Progress::Repelled { attack, defense }));
        }

        if self.eligible_blacks(defender, target, defending).is_empty() {
            // Every black atom is shielded: the hit still lands for one point.
            self.counters.attacks_used += 1;
            self.apply_damage(defender, 1);
            debug!(source, target, "attack absorbed by protection");
            return Ok(Step::Done(Progress::Resolved(Resolution {
                damage: 1,
                destroyed: 0,
            })));
        }

        let extra = combat::extra_destroys(attacking, defending);
        let strike = Strike::new(StrikeCause::Attack { source }, target, defending);
        Ok(Step::Next(Selection::AwaitingBlackAtom { strike, extra }))
    }

    fn destroy_first_black(
        &mut self,
        mut strike: Strike,
        extra: u32,
        p: LatticePoint,
    ) -> Result<Step, Rejected> {
        if !self.is_eligible_black(&strike, p) {
            return Err((
                Selection::AwaitingBlackAtom { strike, extra },
                RuleError::InvalidSelection("choose an unprotected black atom in the target cell"),
            ));
        }

        strike.working.remove(p);
        strike.damage += 1;
        Ok(self.extra_or_cascade(strike, extra))
    }

    fn destroy_extra(
        &mut self,
        mut strike: Strike,
        remaining: u32,
        p: LatticePoint,
    ) -> Result<Step, Rejected> {
        let defender = self.current.opponent();
        if !strike.working.is_occupied(p)
            || self.protected_in(defender, strike.target, &strike.working, p)
        {
            return Err((
                Selection::AwaitingExtraTargets { strike, remaining },
                RuleError::InvalidSelection("choose an unprotected atom in the target cell"),
            ));
        }

        strike.working.remove(p);
        Ok(self.extra_or_cascade(strike, remaining - 1))
    }

    fn extra_or_cascade(&self, strike: Strike, remaining: u32) -> Step {
        if remaining == 0 || self.extra_candidates(&strike).is_empty() {
            Step::Cascade(strike)
        } else {
            Step::Next(Selection::AwaitingExtraTargets { strike, remaining })
        }
    }

    fn aim_red(
        &mut self,
        cell: usize,
        point: LatticePoint,
        potency: usize,
        target: usize,
    ) -> Result<Step, Rejected> {
        let reject = |reason| {
            Err((
                Selection::AwaitingRedTargetCell {
                    cell,
                    point,
                    potency,
                },
                RuleError::InvalidSelection(reason),
            ))
        };

        if target >= CELLS_PER_PLAYER {
            return reject("no such cell");
        }
        let defender = self.current.opponent();
        let defending = &self.players[defender].cells[target];
        let eligible = self.eligible_blacks(defender, target, defending).len();
        if eligible == 0 {
            return reject("target cell has no unprotected black atom");
        }

        let strike = Strike::new(StrikeCause::Red { cell, point }, target, defending);
        Ok(Step::Next(Selection::AwaitingRedTargets {
            strike,
            remaining: potency.min(eligible),
        }))
    }

    fn destroy_red_target(
        &mut self,
        mut strike: Strike,
        remaining: usize,
        p: LatticePoint,
    ) -> Result<Step, Rejected> {
        if !self.is_eligible_black(&strike, p) {
            return Err((
                Selection::AwaitingRedTargets { strike, remaining },
                RuleError::InvalidSelection("choose an unprotected black atom in the target cell"),
            ));
        }

        strike.working.remove(p);
        match remaining - 1 {
            0 => Ok(Step::Cascade(strike)),
            remaining => Ok(Step::Next(Selection::AwaitingRedTargets { strike, remaining })),
        }
    }

    fn is_eligible_black(&self, strike: &Strike, p: LatticePoint) -> bool {
        let defender = self.current.opponent();
        strike.working.get(p) == Some(AtomColor::Black)
            && !self.protected_in(defender, strike.target, &strike.working, p)
    }

    /// Atoms an extra destruction may hit: anything but shielded black atoms.
    fn extra_candidates(&self, strike: &Strike) -> Vec<LatticePoint> {
        let defender = self.current.opponent();
        strike
            .working
            .occupied_points()
            .into_iter()
            .filter(|&p| !self.protected_in(defender, strike.target, &strike.working, p))
            .collect()
    }

    /// Swap the working copy in and settle damage, budgets and the winner.
    fn commit(&mut self, strike: Strike) -> Progress {
        let attacker = self.current;
        let defender = attacker.opponent();
        let Strike {
            cause,
            target,
            working,
            damage,
        } = strike;

        let destroyed = self.players[defender].cells[target]
            .len()
            .saturating_sub(working.len());
        self.players[defender].cells[target] = working;
        for cell in &mut self.players[defender].cells {
            combat::clear_if_no_black(cell);
        }

        match cause {
            StrikeCause::Attack { source } => {
                self.counters.attacks_used += 1;
                debug!(source, target, damage, destroyed, "attack resolved");
            }
            StrikeCause::Red { cell, point } => {
                self.players[attacker].cells[cell].remove(point);
                debug!(cell, %point, target, destroyed, "red effect resolved");
            }
        }

        self.apply_damage(defender, damage);
        Progress::Resolved(Resolution { damage, destroyed })
    }
}
