//! Attack and effect integration tests.
//!
//! Every position is built through the public command surface: the first
//! player lays out the defending Cells on the opening turn, then the
//! second player lays out the attacking Cells and acts on turn 1.

use atom_lattice::cells::{AtomColor, ColorCounts};
use atom_lattice::combat::UniformRandom;
use atom_lattice::core::{GameConfig, GameState, Phase, PlayerId};
use atom_lattice::error::RuleError;
use atom_lattice::lattice::{LatticePoint, Region};
use atom_lattice::rules::{EffectOutcome, Progress, Prompt, Resolution, StrikeCause};

use AtomColor::{Black, Blue, Green, Red};

const DEFENDER: PlayerId = PlayerId::FIRST;
const ATTACKER: PlayerId = PlayerId::SECOND;

type Layout<'a> = &'a [(usize, i32, i32, AtomColor)];

fn p(row: i32, col: i32) -> LatticePoint {
    LatticePoint::new(row, col)
}

fn config() -> GameConfig {
    GameConfig::default()
        .with_region(Region::rect(8, 8))
        .with_starting_pool(ColorCounts::new(40, 10, 10, 10))
        .with_draw_count(0)
        .with_place_limit(64)
        .with_seed(17)
}

fn place_all(state: &mut GameState, layout: Layout<'_>) {
    state.begin_draw().unwrap();
    for &(cell, row, col, color) in layout {
        state.place(cell, p(row, col), color).unwrap();
    }
    state.end_placement().unwrap();
}

/// Defender laid out and sitting in its opening action phase.
fn defender_ready(config: GameConfig, defender: Layout<'_>) -> GameState {
    let mut state = GameState::new(config).unwrap();
    place_all(&mut state, defender);
    state
}

/// Hand the turn over and lay out the attacker.
fn attacker_ready(mut state: GameState, attacker: Layout<'_>) -> GameState {
    state.end_turn().unwrap();
    place_all(&mut state, attacker);
    assert_eq!(state.current_player(), ATTACKER);
    assert_eq!(state.phase(), Phase::Action);
    state
}

fn arena(defender: Layout<'_>, attacker: Layout<'_>) -> GameState {
    attacker_ready(defender_ready(config(), defender), attacker)
}

/// Attack power 2 from Cell 0.
const TOWER_2: Layout<'static> = &[(0, 0, 0, Black), (0, 1, 0, Black), (0, 2, 0, Black)];

/// Attack power 3 from Cell 0.
const TOWER_3: Layout<'static> = &[
    (0, 0, 0, Black),
    (0, 1, 0, Black),
    (0, 2, 0, Black),
    (0, 3, 0, Black),
];

fn resolved(damage: u32, destroyed: usize) -> Progress {
    Progress::Resolved(Resolution { damage, destroyed })
}

// =============================================================================
// Basic attacks
// =============================================================================

/// Destroying the only atom of a Cell empties it and deals one damage.
#[test]
fn test_attack_destroys_single_black() {
    let mut state = arena(&[(0, 0, 0, Black)], TOWER_2);

    assert_eq!(
        state.select_attack_source(0).unwrap(),
        Progress::Awaiting(Prompt::TargetCell)
    );
    assert_eq!(
        state.select_target_cell(0).unwrap(),
        Progress::Awaiting(Prompt::BlackAtom { cell: 0 })
    );

    let strike = state.selection().strike().unwrap();
    assert_eq!(strike.cause(), StrikeCause::Attack { source: 0 });
    assert_eq!(strike.target(), 0);

    assert_eq!(state.select_point(p(0, 0)).unwrap(), resolved(1, 1));
    assert!(state.cell(DEFENDER, 0).unwrap().is_empty());
    assert_eq!(state.hp(DEFENDER), 19);
    assert_eq!(state.counters().attacks_used, 1);
    assert!(state.selection().is_idle());
}

/// Equal or lower attack power is repelled without spending the attack.
#[test]
fn test_weak_attack_is_repelled() {
    let mut state = arena(
        &[(0, 0, 0, Black), (0, 0, 1, Black), (0, 0, 2, Black)],
        &[(0, 0, 0, Black), (0, 1, 0, Black), (0, 2, 0, Black)],
    );

    state.select_attack_source(0).unwrap();
    assert_eq!(
        state.select_target_cell(0).unwrap(),
        Progress::Repelled {
            attack: 2.0,
            defense: 2.0
        }
    );
    assert_eq!(state.counters().attacks_used, 0);
    assert_eq!(state.cell(DEFENDER, 0).unwrap().len(), 3);
    assert!(state.selection().is_idle());
}

/// Once every opposing Cell is empty, an attack hits the player directly.
#[test]
fn test_direct_attack_on_empty_board() {
    let mut state = arena(&[], TOWER_3);

    assert_eq!(state.select_attack_source(0).unwrap(), resolved(3, 0));
    assert_eq!(state.hp(DEFENDER), 17);
    assert_eq!(state.counters().attacks_used, 1);
}

/// The attack budget is one per Cell holding black, fixed at end of placement.
#[test]
fn test_attack_budget() {
    let mut state = arena(&[], TOWER_2);
    assert_eq!(state.counters().attack_limit, 1);

    state.select_attack_source(0).unwrap();
    assert_eq!(
        state.select_attack_source(0),
        Err(RuleError::AttackBudgetExhausted)
    );
}

/// Sources and targets are validated without losing the current step.
#[test]
fn test_invalid_attack_inputs() {
    let mut state = arena(&[(1, 0, 0, Black)], TOWER_2);

    assert!(matches!(
        state.select_attack_source(2),
        Err(RuleError::InvalidSelection(_))
    ));
    assert!(matches!(
        state.select_attack_source(9),
        Err(RuleError::InvalidSelection(_))
    ));

    state.select_attack_source(0).unwrap();
    assert!(matches!(
        state.select_target_cell(0),
        Err(RuleError::InvalidSelection(_))
    ));
    assert!(matches!(
        state.select_point(p(0, 0)),
        Err(RuleError::InvalidSelection(_))
    ));
    assert_eq!(state.prompt(), Some(Prompt::TargetCell));

    state.select_target_cell(1).unwrap();
    assert!(matches!(
        state.select_point(p(4, 4)),
        Err(RuleError::InvalidSelection(_))
    ));
    assert_eq!(state.prompt(), Some(Prompt::BlackAtom { cell: 1 }));
}

/// Nobody attacks on the opening turn.
#[test]
fn test_first_turn_cannot_attack() {
    let mut state = defender_ready(config(), TOWER_2);
    assert!(state.is_first_turn());
    assert_eq!(
        state.select_attack_source(0),
        Err(RuleError::FirstTurnNoAttack)
    );
}

// =============================================================================
// Extra destructions and cascades
// =============================================================================

/// Red atoms in the attacking Cell grant extra destructions; Finish stops early.
#[test]
fn test_extra_targets_then_finish() {
    let mut state = arena(
        &[(0, 0, 0, Black), (0, 0, 1, Black), (0, 0, 2, Green)],
        &[
            (0, 0, 0, Black),
            (0, 1, 0, Black),
            (0, 2, 0, Black),
            (0, 0, 1, Red),
            (0, 1, 1, Red),
        ],
    );

    state.select_attack_source(0).unwrap();
    state.select_target_cell(0).unwrap();
    assert_eq!(
        state.select_point(p(0, 0)).unwrap(),
        Progress::Awaiting(Prompt::ExtraTargets {
            cell: 0,
            remaining: 2
        })
    );
    assert_eq!(
        state.select_point(p(0, 2)).unwrap(),
        Progress::Awaiting(Prompt::ExtraTargets {
            cell: 0,
            remaining: 1
        })
    );

    // Nothing is committed until the strike resolves
    assert_eq!(state.cell(DEFENDER, 0).unwrap().len(), 3);

    assert_eq!(state.finish_extra_targets().unwrap(), resolved(1, 2));
    let cell = state.cell(DEFENDER, 0).unwrap();
    assert_eq!(cell.occupied_points(), vec![p(0, 1)]);
}

/// Finish is only accepted while extra targets are pending.
#[test]
fn test_finish_out_of_place() {
    let mut state = arena(&[(0, 0, 0, Black)], TOWER_2);
    state.select_attack_source(0).unwrap();
    assert!(matches!(
        state.finish_extra_targets(),
        Err(RuleError::InvalidSelection(_))
    ));
}

/// Atoms cut off from every black atom are swept away.
#[test]
fn test_orphaned_atoms_are_swept() {
    let mut state = arena(&[(0, 0, 0, Black), (0, 0, 1, Red)], TOWER_2);

    state.select_attack_source(0).unwrap();
    state.select_target_cell(0).unwrap();
    assert_eq!(state.select_point(p(0, 0)).unwrap(), resolved(1, 2));
    assert!(state.cell(DEFENDER, 0).unwrap().is_empty());
}

/// Splitting a Cell lets the defender keep one component.
#[test]
fn test_component_choice() {
    let mut state = arena(
        &[(0, 0, 0, Black), (0, 0, 1, Black), (0, 0, 2, Black)],
        TOWER_3,
    );

    state.select_attack_source(0).unwrap();
    state.select_target_cell(0).unwrap();
    assert_eq!(
        state.select_point(p(0, 1)).unwrap(),
        Progress::Awaiting(Prompt::ComponentChoice {
            cell: 0,
            options: 2
        })
    );
    assert_eq!(state.selection().options().unwrap().len(), 2);

    assert!(matches!(
        state.select_point(p(0, 1)),
        Err(RuleError::InvalidSelection(_))
    ));

    assert_eq!(state.select_point(p(0, 2)).unwrap(), resolved(1, 2));
    let cell = state.cell(DEFENDER, 0).unwrap();
    assert_eq!(cell.occupied_points(), vec![p(0, 2)]);
    assert!(cell.is_connected());
}

/// Separate black clusters inside one component: the defender keeps one
/// cluster and the non-black atoms still attached to it.
#[test]
fn test_black_cluster_choice() {
    let mut state = arena(
        &[
            (0, 0, 0, Black),
            (0, 0, 1, Green),
            (0, 0, 2, Black),
            (0, 0, 3, Black),
        ],
        &[
            (0, 0, 0, Black),
            (0, 1, 0, Black),
            (0, 2, 0, Black),
            (0, 3, 0, Black),
            (0, 4, 0, Black),
        ],
    );

    state.select_attack_source(0).unwrap();
    state.select_target_cell(0).unwrap();
    assert_eq!(
        state.select_point(p(0, 3)).unwrap(),
        Progress::Awaiting(Prompt::BlackClusterChoice {
            cell: 0,
            options: 2
        })
    );

    assert_eq!(state.select_point(p(0, 0)).unwrap(), resolved(1, 2));
    let cell = state.cell(DEFENDER, 0).unwrap();
    assert_eq!(cell.get(p(0, 0)), Some(Black));
    assert_eq!(cell.get(p(0, 1)), Some(Green));
    assert_eq!(cell.len(), 2);
}

// =============================================================================
// Protection
// =============================================================================

/// Shield both black atoms of Cell 0 with the blue atom between them.
fn shielded_defender(extra: Layout<'_>) -> GameState {
    let mut layout = vec![(0, 0, 0, Black), (0, 0, 1, Black), (0, 1, 0, Blue)];
    layout.extend_from_slice(extra);
    let mut state = defender_ready(config(), &layout);

    assert_eq!(
        state.trigger_effect(0, p(1, 0)).unwrap(),
        EffectOutcome::Shielded(vec![p(0, 0), p(0, 1)])
    );
    state
}

/// An attack landing on fully shielded black atoms deals one damage and
/// destroys nothing.
#[test]
fn test_fully_protected_target() {
    let state = shielded_defender(&[]);
    let mut state = attacker_ready(state, TOWER_2);

    state.select_attack_source(0).unwrap();
    assert_eq!(state.select_target_cell(0).unwrap(), resolved(1, 0));
    assert_eq!(state.cell(DEFENDER, 0).unwrap().len(), 2);
    assert_eq!(state.hp(DEFENDER), 19);
    assert_eq!(state.counters().attacks_used, 1);
}

/// Shielded black atoms cannot be picked; unshielded ones can.
#[test]
fn test_protected_atom_rejected() {
    let state = shielded_defender(&[(0, 0, 2, Black)]);
    let mut state = attacker_ready(state, TOWER_3);

    assert!(state.is_protected(DEFENDER, 0, p(0, 0)));
    assert!(!state.is_protected(DEFENDER, 0, p(0, 2)));

    state.select_attack_source(0).unwrap();
    state.select_target_cell(0).unwrap();
    assert!(matches!(
        state.select_point(p(0, 0)),
        Err(RuleError::InvalidSelection(_))
    ));
    assert_eq!(state.select_point(p(0, 2)).unwrap(), resolved(1, 1));
}

/// Protection lasts through the opponent's next turn only.
#[test]
fn test_protection_expires_on_owners_next_turn() {
    let state = shielded_defender(&[]);
    assert_eq!(state.protection(DEFENDER).expires_after(), 1);

    let mut state = attacker_ready(state, TOWER_2);
    assert_eq!(state.protection(DEFENDER).len(), 2);

    state.end_turn().unwrap();
    assert_eq!(state.current_player(), DEFENDER);
    assert!(state.protection(DEFENDER).is_empty());
    assert!(!state.is_protected(DEFENDER, 0, p(0, 0)));
}

// =============================================================================
// Red effect
// =============================================================================

/// A red atom next to two black atoms destroys two black atoms of the
/// chosen Cell, deals no damage and is consumed.
#[test]
fn test_red_effect_flow() {
    let mut state = arena(
        &[(1, 0, 0, Black), (1, 0, 1, Black), (1, 0, 2, Black)],
        &[(0, 0, 0, Black), (0, 1, 0, Black), (0, 0, 1, Red)],
    );

    assert_eq!(
        state.trigger_effect(0, p(0, 1)).unwrap(),
        EffectOutcome::RedArmed { potency: 2 }
    );
    assert_eq!(state.prompt(), Some(Prompt::RedTargetCell { potency: 2 }));

    assert!(matches!(
        state.select_target_cell(0),
        Err(RuleError::InvalidSelection(_))
    ));
    assert_eq!(
        state.select_target_cell(1).unwrap(),
        Progress::Awaiting(Prompt::RedTargets {
            cell: 1,
            remaining: 2
        })
    );
    assert_eq!(
        state.select_point(p(0, 0)).unwrap(),
        Progress::Awaiting(Prompt::RedTargets {
            cell: 1,
            remaining: 1
        })
    );
    assert_eq!(state.select_point(p(0, 2)).unwrap(), resolved(0, 2));

    assert_eq!(
        state.cell(DEFENDER, 1).unwrap().occupied_points(),
        vec![p(0, 1)]
    );
    assert_eq!(state.cell(ATTACKER, 0).unwrap().get(p(0, 1)), None);
    assert_eq!(state.hp(DEFENDER), 20);
    assert_eq!(state.counters().attacks_used, 0);
}

/// Picks are capped by the black atoms actually available.
#[test]
fn test_red_picks_capped_by_targets() {
    let mut state = arena(
        &[(2, 0, 0, Black)],
        &[(0, 0, 0, Black), (0, 1, 0, Black), (0, 0, 1, Red)],
    );

    state.trigger_effect(0, p(0, 1)).unwrap();
    assert_eq!(
        state.select_target_cell(2).unwrap(),
        Progress::Awaiting(Prompt::RedTargets {
            cell: 2,
            remaining: 1
        })
    );
    assert_eq!(state.select_point(p(0, 0)).unwrap(), resolved(0, 1));
    assert!(state.player(DEFENDER).all_cells_empty());
}

// =============================================================================
// Policies and cancellation
// =============================================================================

/// With random destruction on, the attacker's picks resolve by themselves.
#[test]
fn test_random_destroy_resolves_automatically() {
    let state = defender_ready(config().with_random_destroy(true), &[(0, 0, 0, Black)]);
    let mut state = attacker_ready(state, TOWER_2);

    state.select_attack_source(0).unwrap();
    assert_eq!(state.select_target_cell(0).unwrap(), resolved(1, 1));
    assert!(state.cell(DEFENDER, 0).unwrap().is_empty());
}

/// A random retention policy answers the defender's component choice.
#[test]
fn test_random_retention_policy() {
    let mut state = arena(
        &[(0, 0, 0, Black), (0, 0, 1, Black), (0, 0, 2, Black)],
        TOWER_3,
    );
    state.set_retain_policy(UniformRandom);

    state.select_attack_source(0).unwrap();
    state.select_target_cell(0).unwrap();
    assert_eq!(state.select_point(p(0, 1)).unwrap(), resolved(1, 2));
    assert_eq!(state.cell(DEFENDER, 0).unwrap().len(), 1);
}

/// Cancelling discards the selection, even mid-cascade, and changes nothing.
#[test]
fn test_cancel_selection() {
    let mut state = arena(
        &[(0, 0, 0, Black), (0, 0, 1, Black), (0, 0, 2, Black)],
        TOWER_3,
    );
    assert_eq!(state.cancel_selection(), Ok(false));

    state.select_attack_source(0).unwrap();
    state.select_target_cell(0).unwrap();
    state.select_point(p(0, 1)).unwrap();
    assert_eq!(
        state.end_turn(),
        Err(RuleError::SelectionInProgress)
    );

    assert_eq!(state.cancel_selection(), Ok(true));
    assert!(state.selection().is_idle());
    assert_eq!(state.cell(DEFENDER, 0).unwrap().len(), 3);
    assert_eq!(state.counters().attacks_used, 0);
    assert_eq!(state.hp(DEFENDER), 20);
}

// =============================================================================
// End of game
// =============================================================================

/// Hit points floor at zero, the attacker wins and every command is refused.
#[test]
fn test_lethal_attack_ends_game() {
    let state = defender_ready(config().with_starting_hp(2), &[]);
    let mut state = attacker_ready(state, TOWER_3);

    assert_eq!(state.select_attack_source(0).unwrap(), resolved(3, 0));
    assert_eq!(state.hp(DEFENDER), 0);
    assert_eq!(state.winner(), Some(ATTACKER));
    assert!(state.is_over());
    assert_eq!(state.prompt(), None);

    assert_eq!(state.end_turn(), Err(RuleError::GameOver));
    assert_eq!(state.select_attack_source(0), Err(RuleError::GameOver));
    assert_eq!(state.cancel_selection(), Err(RuleError::GameOver));
    assert_eq!(state.begin_draw(), Err(RuleError::GameOver));
}
