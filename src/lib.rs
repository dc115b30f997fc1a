//! # white-elephant
//!
//! A White Elephant gift-exchange simulator built around a steal-chain turn
//! engine.
//!
//! ## Rules
//!
//! Players take turns in seat order. On a turn the active player either
//! unwraps a gift from the pool or steals an opened gift. A robbed player
//! immediately becomes active and chooses in turn, but may not take back the
//! gift just taken from them. A gift locks permanently once it has been
//! stolen `lock_threshold` times (3 by default). The chain ends when someone
//! unwraps.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: the engine mutates a `GameState` it is handed;
//!    there are no globals.
//!
//! 2. **Injected Randomness**: every draw goes through `RandomSource`, so a
//!    seed (or a scripted source in tests) fixes the whole game.
//!
//! 3. **Replayable Events**: each `ActionEvent` carries its own delta, so
//!    the log can rebuild every intermediate table state.
//!
//! ## Modules
//!
//! - `core`: seats, RNG, configuration, events, game state
//! - `gifts`: gift definitions and the registry
//! - `rules`: steal policy and the turn engine
//! - `game`: game driver, log, summary, batch runs
//! - `report`: text log, records, SVG charts
//! - `error`: error types

pub mod core;
pub mod error;
pub mod game;
pub mod gifts;
pub mod report;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    ActionEvent, EventKind,
    GameConfig, StealPolicy, StealTier,
    GameRng, GameRngState, RandomSource, ScriptedRng,
    GameState, StateSnapshot,
    PlayerId, PlayerMap,
};

pub use crate::gifts::{classic_gifts, GiftDefinition, GiftId, GiftRegistry};

pub use crate::rules::{ChainEnd, Decision, DecisionPolicy, TurnEngine, TurnOutcome};

pub use crate::game::{
    run_batch, BatchReport,
    GameLog, GameRecord, GameSummary, ValidationReport,
    WhiteElephant,
};

pub use crate::error::{ConfigError, EngineError, Error, ReportError, Result};
