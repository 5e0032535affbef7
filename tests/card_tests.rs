//! Card system tests.
//!
//! Covers the selection protocol through the engine and the resolver on
//! hand-built boards.

use roguetac::cards::SHIELD_TURNS;
use roguetac::{
    Board, CardKind, CardResolver, Cell, EncounterId, Engine, GameConfig, LockMap, Mode, Outcome,
    Rejection, Side,
};

fn engine(seed: u64) -> Engine {
    let config = GameConfig::new(Mode::Classic)
        .with_seed(seed)
        .with_fixed_encounter(EncounterId::Jailer);
    Engine::new(config).unwrap()
}

/// Play one full exchange so both sides have a mark on the board.
fn exchange(engine: &mut Engine, cell: usize) {
    engine.play_move(cell).unwrap();
    let delay = engine.config().enemy_delay_ms;
    assert!(matches!(engine.advance_clock(delay), Ok(Outcome::EnemyPlayed(_))));
}

// =============================================================================
// Engine Card Flow Tests
// =============================================================================

/// Test Erase on an empty cell: rejected, nothing spent, nothing recorded.
#[test]
fn test_erase_empty_cell_costs_nothing() {
    let mut engine = engine(1);
    let history = engine.history().len();

    engine.arm_card(CardKind::Erase).unwrap();
    let outcome = engine.target_cell(0).unwrap();

    assert!(matches!(outcome, Outcome::CardFizzled { reason: Rejection::InvalidTarget, .. }));
    assert_eq!(engine.energy().current(), 1);
    assert_eq!(engine.hand().get(CardKind::Erase).unwrap().charges, 1);
    assert_eq!(engine.history().len(), history);
}

/// Test Erase removes an enemy mark without passing the turn.
#[test]
fn test_erase_enemy_mark() {
    let mut engine = engine(2);
    exchange(&mut engine, 4);
    let enemy = engine.board().cells_of(Side::ENEMY).next().unwrap();
    let history = engine.history().len();
    let locks_before = engine.locks().active();

    engine.arm_card(CardKind::Erase).unwrap();
    let outcome = engine.target_cell(enemy).unwrap();

    assert!(matches!(outcome, Outcome::CardResolved { board_changed: true, .. }));
    assert_eq!(engine.board().get(enemy), Some(Cell::Empty));
    assert_eq!(engine.history().len(), history + 1);
    assert_eq!(engine.turn(), Side::PLAYER);
    assert!(!engine.is_enemy_thinking());
    // Cards never tick locks
    assert_eq!(engine.locks().active(), locks_before);
}

/// Test a second Erase in the same turn fails for lack of energy.
#[test]
fn test_energy_gates_second_card() {
    let mut engine = engine(3);
    exchange(&mut engine, 4);

    engine.arm_card(CardKind::Shield).unwrap();
    let free = roguetac::playable_cells(engine.board(), engine.locks())[0];
    engine.target_cell(free).unwrap();
    assert_eq!(engine.energy().current(), 0);

    assert_eq!(
        engine.arm_card(CardKind::Erase),
        Err(Rejection::InsufficientEnergy { needed: 1, available: 0 })
    );
}

/// Test charges are spent once per resolution, not per target.
#[test]
fn test_swap_spends_one_charge() {
    let mut engine = engine(4);
    exchange(&mut engine, 0);
    let enemy = engine.board().cells_of(Side::ENEMY).next().unwrap();

    engine.arm_card(CardKind::Swap).unwrap();
    assert_eq!(
        engine.target_cell(0),
        Ok(Outcome::TargetAdded { kind: CardKind::Swap, remaining: 1 })
    );
    let outcome = engine.target_cell(enemy).unwrap();

    assert!(matches!(outcome, Outcome::CardResolved { kind: CardKind::Swap, .. }));
    assert_eq!(engine.board().get(0), Some(Cell::Mark(Side::ENEMY)));
    assert_eq!(engine.board().get(enemy), Some(Cell::Mark(Side::PLAYER)));
    assert_eq!(engine.hand().get(CardKind::Swap).unwrap().charges, 0);
    assert_eq!(engine.energy().current(), 0);
}

/// Test a degenerate Swap pair clears the selection at no cost.
#[test]
fn test_swap_same_cell_fizzles() {
    let mut engine = engine(5);
    engine.arm_card(CardKind::Swap).unwrap();
    engine.target_cell(3).unwrap();

    let outcome = engine.target_cell(3).unwrap();
    assert!(matches!(outcome, Outcome::CardFizzled { kind: CardKind::Swap, .. }));
    assert_eq!(engine.pending_card(), None);
    assert_eq!(engine.hand().get(CardKind::Swap).unwrap().charges, 1);
    assert_eq!(engine.energy().current(), 1);
}

/// Test Shield on a locked cell fizzles.
#[test]
fn test_card_on_locked_cell_fizzles() {
    let mut engine = engine(6);
    exchange(&mut engine, 4);
    let (locked, _) = engine.locks().active()[0];

    engine.arm_card(CardKind::Shield).unwrap();
    assert_eq!(
        engine.target_cell(locked),
        Ok(Outcome::CardFizzled {
            kind: CardKind::Shield,
            reason: Rejection::CellLocked(locked),
        })
    );
    assert_eq!(engine.hand().get(CardKind::Shield).unwrap().charges, 1);
}

/// Test charges come back with a fresh run.
#[test]
fn test_charges_refill_on_new_run() {
    let mut engine = engine(7);
    engine.arm_card(CardKind::Shield).unwrap();
    engine.target_cell(0).unwrap();
    assert_eq!(engine.hand().get(CardKind::Shield).unwrap().charges, 0);

    engine.start_run().unwrap();
    assert!(engine.hand().slots().iter().all(|s| s.charges == s.max_charges));
    assert_eq!(engine.energy().current(), engine.energy().max());
}

// =============================================================================
// Resolver Tests
// =============================================================================

/// Test resolver: Shield locks occupied and empty cells alike.
#[test]
fn test_resolver_shield_any_occupancy() {
    let mut board = Board::new(3).unwrap();
    board.set(0, Cell::Mark(Side::O));
    let mut locks = LockMap::new(9);

    for target in [0, 1] {
        let effect = CardResolver::resolve(CardKind::Shield, &[target], &mut board, &mut locks).unwrap();
        assert!(!effect.board_changed);
        assert_eq!(locks.remaining(target), SHIELD_TURNS);
    }
}

/// Test resolver: swapping two empty cells succeeds without changing the board.
#[test]
fn test_resolver_swap_empties() {
    let mut board = Board::new(3).unwrap();
    let mut locks = LockMap::new(9);
    let effect = CardResolver::resolve(CardKind::Swap, &[1, 2], &mut board, &mut locks).unwrap();
    assert!(!effect.board_changed);
}

/// Test resolver: a locked second target leaves the board untouched.
#[test]
fn test_resolver_swap_locked_target() {
    let mut board = Board::new(3).unwrap();
    board.set(0, Cell::Mark(Side::X));
    let mut locks = LockMap::new(9);
    locks.lock(8, 1);
    let before = board.clone();

    assert_eq!(
        CardResolver::resolve(CardKind::Swap, &[0, 8], &mut board, &mut locks),
        Err(Rejection::CellLocked(8))
    );
    assert_eq!(board, before);
}
