//! Turn engine scenarios with scripted randomness.
//!
//! Each test builds a small table, scripts the uniform draws and pool picks,
//! and checks the exact events a turn produces.

use white_elephant::core::{ActionEvent, GameState, PlayerId, ScriptedRng, StealPolicy};
use white_elephant::gifts::{GiftDefinition, GiftId, GiftRegistry};
use white_elephant::rules::{ChainEnd, Decision, TurnEngine, UnwrapFirst};

fn table(players: usize, gifts: &[(u32, u32)], lock_threshold: u32) -> GameState {
    let registry = GiftRegistry::from_definitions(
        gifts
            .iter()
            .map(|&(id, value)| GiftDefinition::new(GiftId(id), format!("Gift {id}"), value)),
    )
    .unwrap();
    GameState::new(players, registry, lock_threshold)
}

fn p(seat: u8) -> PlayerId {
    PlayerId::new(seat)
}

/// Test the two-player game where the second player declines to steal.
#[test]
fn test_two_players_no_steal() {
    let mut state = table(2, &[(1, 10), (2, 90)], 3);
    let engine = TurnEngine::new(StealPolicy::default());
    let mut rng = ScriptedRng::new().with_uniforms([0.99]);

    let first = engine.resolve_turn(&mut state, p(0), &mut rng).unwrap();
    let second = engine.resolve_turn(&mut state, p(1), &mut rng).unwrap();

    assert_eq!(first.events.len(), 1);
    assert_eq!(second.events.len(), 1);
    assert_eq!(first.steal_count() + second.steal_count(), 0);
    assert_eq!(state.ownership().held_by(p(0)), Some(GiftId(1)));
    assert_eq!(state.ownership().held_by(p(1)), Some(GiftId(2)));
    assert!(!state.is_locked(GiftId(1)) && !state.is_locked(GiftId(2)));
    // Only the second turn had something to steal.
    assert_eq!(rng.uniform_draws(), 1);
}

/// Test that an empty pool forces a steal without a random draw.
#[test]
fn test_forced_steal_when_pool_empty() {
    let mut state = table(2, &[(1, 10)], 3);
    let engine = TurnEngine::new(StealPolicy::default());
    let mut rng = ScriptedRng::new();

    engine.resolve_turn(&mut state, p(0), &mut rng).unwrap();
    let draws_before = rng.uniform_draws();

    assert_eq!(
        engine.decide(&state, p(1), None, &mut rng),
        Decision::Steal(GiftId(1))
    );
    assert_eq!(rng.uniform_draws(), draws_before);

    let outcome = engine.resolve_turn(&mut state, p(1), &mut rng).unwrap();
    assert_eq!(outcome.steal_count(), 1);
    // The robbed player has nothing left to take.
    assert_eq!(outcome.end, ChainEnd::Stalled(p(0)));
    assert_eq!(state.ownership().held_by(p(1)), Some(GiftId(1)));
}

/// Test that the victim of a lock-causing steal acts in the very next event.
#[test]
fn test_lock_propagation_continues_with_victim() {
    let mut state = table(3, &[(1, 90), (2, 10), (3, 20)], 1);
    let engine = TurnEngine::new(StealPolicy::default());
    let mut rng = ScriptedRng::new().with_uniforms([0.0]);

    engine.resolve_turn(&mut state, p(0), &mut rng).unwrap();
    let outcome = engine.resolve_turn(&mut state, p(1), &mut rng).unwrap();

    assert_eq!(outcome.events.len(), 2);
    match &outcome.events[0] {
        ActionEvent::Steal {
            actor,
            victim,
            locked,
            steals,
            ..
        } => {
            assert_eq!(*actor, p(1));
            assert_eq!(*victim, p(0));
            assert!(*locked);
            assert_eq!(*steals, 1);
        }
        other => panic!("expected a steal, got {other:?}"),
    }
    assert_eq!(outcome.events[1].actor(), p(0));
    assert!(!outcome.events[1].is_steal());
    assert!(state.is_locked(GiftId(1)));
    assert_eq!(outcome.end, ChainEnd::Unwrapped);
}

/// Test that a robbed player never takes the same gift straight back.
#[test]
fn test_no_immediate_steal_back() {
    let mut state = table(2, &[(1, 90), (2, 80), (3, 10)], 3);
    let engine = TurnEngine::new(StealPolicy::default());
    // Every roll says "steal".
    let mut rng = ScriptedRng::new().with_fallback_uniform(0.0);

    engine.resolve_turn(&mut state, p(0), &mut rng).unwrap();
    let outcome = engine.resolve_turn(&mut state, p(1), &mut rng).unwrap();

    assert_eq!(outcome.events.len(), 2);
    assert!(outcome.events[0].is_steal());
    assert_eq!(outcome.events[0].gift(), GiftId(1));
    assert_eq!(outcome.events[1].actor(), p(0));
    assert!(!outcome.events[1].is_steal());
    assert_ne!(outcome.events[1].gift(), GiftId(1));
}

/// Test a chain that passes through several victims.
#[test]
fn test_chain_through_three_players() {
    let mut state = table(3, &[(1, 90), (2, 80), (3, 10)], 3);
    let engine = TurnEngine::new(StealPolicy::default());
    // Turn 2 declines; turn 3 always steals.
    let mut rng = ScriptedRng::new().with_uniforms([0.99]).with_fallback_uniform(0.0);

    engine.resolve_turn(&mut state, p(0), &mut rng).unwrap();
    engine.resolve_turn(&mut state, p(1), &mut rng).unwrap();
    assert_eq!(state.ownership().held_by(p(1)), Some(GiftId(2)));

    let outcome = engine.resolve_turn(&mut state, p(2), &mut rng).unwrap();

    // The two top gifts trade hands until both lock, then P3 unwraps.
    let actors: Vec<_> = outcome.events.iter().map(|e| e.actor()).collect();
    assert_eq!(actors, vec![p(2), p(0), p(1), p(2), p(0), p(1), p(2)]);
    let gifts: Vec<_> = outcome.events.iter().map(|e| e.gift().raw()).collect();
    assert_eq!(gifts, vec![1, 2, 1, 2, 1, 2, 3]);
    assert_eq!(outcome.steal_count(), 6);
    assert!(outcome.events[4].caused_lock());
    assert!(outcome.events[5].caused_lock());

    assert_eq!(state.ownership().held_by(p(0)), Some(GiftId(1)));
    assert_eq!(state.ownership().held_by(p(1)), Some(GiftId(2)));
    assert_eq!(state.ownership().held_by(p(2)), Some(GiftId(3)));
    assert_eq!(state.status(GiftId(1)).unwrap().steals, 3);
    assert!(state.is_locked(GiftId(1)) && state.is_locked(GiftId(2)));
}

/// Test that a player holding a gift at turn start gets a no-op turn.
#[test]
fn test_already_holding_is_noop() {
    let mut state = table(2, &[(1, 10), (2, 20)], 3);
    let engine = TurnEngine::new(UnwrapFirst);
    let mut rng = ScriptedRng::new();

    engine.resolve_turn(&mut state, p(0), &mut rng).unwrap();
    let again = engine.resolve_turn(&mut state, p(0), &mut rng).unwrap();

    assert!(again.events.is_empty());
    assert_eq!(again.end, ChainEnd::AlreadyHolding(GiftId(1)));
    assert_eq!(state.available(), &[GiftId(2)]);
}

/// Test that ties on desirability go to the lowest gift identity.
#[test]
fn test_tie_breaks_on_lowest_identity() {
    let mut state = table(3, &[(4, 50), (2, 50), (9, 5)], 3);
    let engine = TurnEngine::new(UnwrapFirst);
    // Unwrap G4 then G2 (pool is in identity order: 2, 4, 9).
    let mut rng = ScriptedRng::new().with_picks([1, 0]);
    engine.resolve_turn(&mut state, p(0), &mut rng).unwrap();
    engine.resolve_turn(&mut state, p(1), &mut rng).unwrap();

    let policy = StealPolicy::default();
    let engine = TurnEngine::new(policy);
    let mut rng = ScriptedRng::new().with_fallback_uniform(0.0);
    assert_eq!(
        engine.decide(&state, p(2), None, &mut rng),
        Decision::Steal(GiftId(2))
    );
}

/// Test that an unknown seat is an engine error.
#[test]
fn test_unknown_player_is_error() {
    let mut state = table(2, &[(1, 10)], 3);
    let engine = TurnEngine::new(StealPolicy::default());
    assert!(engine
        .resolve_turn(&mut state, p(7), &mut ScriptedRng::new())
        .is_err());
}
