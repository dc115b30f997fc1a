//! Core types: seats, random sources, configuration, state and events.
//!
//! These are the pieces the turn engine works on. None of them know the
//! steal rules; those live in `rules`.

pub mod player;
pub mod rng;
pub mod config;
pub mod event;
pub mod state;

pub use player::{ParsePlayerError, PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::{GameRng, GameRngState, RandomSource, ScriptedRng};
pub use config::{GameConfig, StealPolicy, StealTier, DEFAULT_LOCK_THRESHOLD, DEFAULT_SEED};
pub use event::{ActionEvent, EventKind};
pub use state::{GameState, GiftSnapshot, GiftStatus, OwnershipTable, StateSnapshot};
