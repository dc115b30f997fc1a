//! Turn rules: the steal-or-unwrap policy and the steal-chain resolver.
//!
//! `TurnEngine::resolve_turn` is the only code that mutates the ownership
//! table, steal counters, pool and opened set during a game.

pub mod engine;
pub mod policy;

pub use engine::{ChainEnd, TurnEngine, TurnOutcome};
pub use policy::{best_stealable, stealable_gifts, Decision, DecisionPolicy, UnwrapFirst};
