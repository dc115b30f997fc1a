//! Game configuration.
//!
//! `GameConfig` is everything a driver needs to set a table: seat count,
//! gift list, lock threshold, steal policy and seed. It is plain serde data,
//! so it round-trips through JSON records and loads from TOML:
//!
//! ```toml
//! players = 3
//! seed = 7
//! lock_threshold = 3
//!
//! [[gifts]]
//! id = 1
//! name = "Mug"
//! desirability = 40
//!
//! [steal_policy]
//! fallback_probability = 0.3
//!
//! [[steal_policy.tiers]]
//! min_desirability = 75
//! probability = 0.8
//! ```
//!
//! Any field left out takes its value from `GameConfig::default()`, the
//! classic eight-player game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::player::MAX_PLAYERS;
use crate::error::ConfigError;
use crate::gifts::{classic_gifts, GiftDefinition, GiftRegistry};

/// Steals needed to lock a gift.
pub const DEFAULT_LOCK_THRESHOLD: u32 = 3;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// One band of the steal policy: gifts at least this desirable are stolen
/// with this probability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StealTier {
    pub min_desirability: u32,
    pub probability: f64,
}

impl StealTier {
    #[must_use]
    pub const fn new(min_desirability: u32, probability: f64) -> Self {
        Self {
            min_desirability,
            probability,
        }
    }
}

/// Desirability-tiered steal probabilities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StealPolicy {
    pub tiers: Vec<StealTier>,
    /// Probability when no tier matches.
    pub fallback_probability: f64,
}

impl Default for StealPolicy {
    fn default() -> Self {
        Self {
            tiers: vec![StealTier::new(75, 0.8), StealTier::new(65, 0.6)],
            fallback_probability: 0.3,
        }
    }
}

impl StealPolicy {
    /// Probability of stealing a gift of the given desirability.
    ///
    /// The matching tier with the highest `min_desirability` wins, so tier
    /// order in the configuration does not matter.
    ///
    /// ```
    /// use white_elephant::core::StealPolicy;
    ///
    /// let policy = StealPolicy::default();
    /// assert_eq!(policy.probability_for(90), 0.8);
    /// assert_eq!(policy.probability_for(65), 0.6);
    /// assert_eq!(policy.probability_for(64), 0.3);
    /// ```
    #[must_use]
    pub fn probability_for(&self, desirability: u32) -> f64 {
        self.tiers
            .iter()
            .filter(|t| desirability >= t.min_desirability)
            .max_by_key(|t| t.min_desirability)
            .map_or(self.fallback_probability, |t| t.probability)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = self
            .tiers
            .iter()
            .map(|t| t.probability)
            .chain(std::iter::once(self.fallback_probability));
        for p in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::InvalidProbability(p));
            }
        }
        Ok(())
    }
}

/// Full configuration of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seats at the table; turn order is seat order.
    pub players: usize,
    pub gifts: Vec<GiftDefinition>,
    pub lock_threshold: u32,
    pub steal_policy: StealPolicy,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        let gifts = classic_gifts();
        Self {
            players: gifts.len(),
            gifts,
            lock_threshold: DEFAULT_LOCK_THRESHOLD,
            steal_policy: StealPolicy::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    #[must_use]
    pub fn with_gifts(mut self, gifts: Vec<GiftDefinition>) -> Self {
        self.gifts = gifts;
        self
    }

    #[must_use]
    pub fn with_lock_threshold(mut self, threshold: u32) -> Self {
        self.lock_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_steal_policy(mut self, policy: StealPolicy) -> Self {
        self.steal_policy = policy;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Check everything a game needs, and build the registry on success.
    pub fn validate(&self) -> Result<GiftRegistry, ConfigError> {
        if self.players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers {
                requested: self.players,
                max: MAX_PLAYERS,
            });
        }
        if self.gifts.is_empty() {
            return Err(ConfigError::NoGifts);
        }
        if self.lock_threshold == 0 {
            return Err(ConfigError::ZeroLockThreshold);
        }
        self.steal_policy.validate()?;
        GiftRegistry::from_definitions(self.gifts.iter().cloned())
    }
}
