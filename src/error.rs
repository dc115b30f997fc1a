//! Error types.
//!
//! - `ConfigError`: a game cannot be built from the given configuration.
//! - `EngineError`: the ownership table is corrupt. These are logic faults,
//!   never a normal rule outcome.
//! - `ReportError`: reading or writing logs, records and charts.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::PlayerId;
use crate::gifts::GiftId;

/// A configuration that cannot produce a game.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("at most {max} players are supported, got {requested}")]
    TooManyPlayers { requested: usize, max: usize },

    #[error("a game needs at least one gift")]
    NoGifts,

    #[error("gift {0} is registered twice")]
    DuplicateGift(GiftId),

    #[error("gift {0} must have a positive desirability")]
    ZeroDesirability(GiftId),

    #[error("lock threshold must be at least 1")]
    ZeroLockThreshold,

    #[error("steal probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("invalid TOML configuration: {0}")]
    Toml(String),

    #[error("cannot read configuration {path}: {message}")]
    Read { path: PathBuf, message: String },
}

/// Ownership-table corruption detected by the turn engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("{0} is not a seat at this table")]
    UnknownPlayer(PlayerId),

    #[error("gift {0} is not in the registry")]
    UnknownGift(GiftId),

    #[error("gift {gift} was chosen to steal but nobody holds it")]
    MissingHolder { gift: GiftId },

    #[error("gift {gift} is still wrapped but was chosen to steal")]
    StealWrapped { gift: GiftId },

    #[error("gift {gift} is locked and cannot be stolen")]
    StealLocked { gift: GiftId },

    #[error("pool index {index} out of range for {len} wrapped gifts")]
    PoolIndex { index: usize, len: usize },
}

/// Failures while producing or reading reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("game log line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("record holds an invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Any error the library can return.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

pub type Result<T> = std::result::Result<T, Error>;
