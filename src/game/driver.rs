//! Game driver: seats the table, runs every turn, keeps the log.

use serde::{Deserialize, Serialize};

use super::log::{ActionRecord, GameLog, TurnRecord};
use super::summary::GameSummary;
use crate::core::{
    GameConfig, GameRng, GameRngState, GameState, PlayerId, RandomSource, StealPolicy,
};
use crate::error::{ConfigError, EngineError};
use crate::rules::{DecisionPolicy, TurnEngine};

/// A finished game: configuration, full log and summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub config: GameConfig,
    /// Where the random stream started, when a seeded RNG drove the game.
    pub rng_start: Option<GameRngState>,
    pub log: GameLog,
    pub summary: GameSummary,
}

/// One game in progress.
///
/// ```
/// use white_elephant::{GameConfig, WhiteElephant};
///
/// let record = WhiteElephant::new(GameConfig::default().with_seed(7))
///     .unwrap()
///     .play()
///     .unwrap();
/// assert!(record.summary.validation.is_clean());
/// ```
pub struct WhiteElephant<P = StealPolicy, R = GameRng> {
    config: GameConfig,
    engine: TurnEngine<P>,
    state: GameState,
    rng: R,
    rng_start: Option<GameRngState>,
    log: GameLog,
    next_seat: usize,
}

impl WhiteElephant {
    /// Standard game: the configured steal tiers, seeded from `config.seed`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = GameRng::new(config.seed);
        Self::with_rng(config, rng)
    }

    /// Standard policy with an explicit seeded stream (batch runs use forks).
    pub fn with_rng(config: GameConfig, rng: GameRng) -> Result<Self, ConfigError> {
        let engine = TurnEngine::new(config.steal_policy.clone());
        let start = rng.state();
        let mut game = Self::with_parts(config, engine, rng)?;
        game.rng_start = Some(start);
        Ok(game)
    }
}

impl<P: DecisionPolicy, R: RandomSource> WhiteElephant<P, R> {
    /// Any policy, any random source.
    pub fn with_parts(
        config: GameConfig,
        engine: TurnEngine<P>,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let registry = config.validate()?;
        if registry.len() != config.players {
            tracing::warn!(
                players = config.players,
                gifts = registry.len(),
                "gift count differs from player count"
            );
        }
        let state = GameState::new(config.players, registry, config.lock_threshold);
        let log = GameLog::new(state.snapshot());
        Ok(Self {
            config,
            engine,
            state,
            rng,
            rng_start: None,
            log,
            next_seat: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next_seat >= self.config.players
    }

    /// Seat whose turn is next.
    #[must_use]
    pub fn next_player(&self) -> Option<PlayerId> {
        (!self.is_finished()).then(|| PlayerId::new(self.next_seat as u8))
    }

    /// Play the next seat's turn. `None` once every seat has played.
    pub fn play_turn(&mut self) -> Result<Option<&TurnRecord>, EngineError> {
        let Some(player) = self.next_player() else {
            return Ok(None);
        };
        let turn = self.next_seat as u32 + 1;
        self.next_seat += 1;

        let start = self.state.snapshot();
        let outcome = self.engine.resolve_turn(&mut self.state, player, &mut self.rng)?;

        // Rebuild the per-event states by replaying the deltas from the
        // turn's start; the last one must match the live table.
        let mut running = start.clone();
        let actions = outcome
            .events
            .into_iter()
            .enumerate()
            .map(|(sequence, event)| {
                running.apply(&event);
                ActionRecord {
                    turn,
                    sequence: sequence as u32,
                    event,
                    after: running.clone(),
                }
            })
            .collect();
        debug_assert_eq!(running, self.state.snapshot());

        let record = TurnRecord {
            turn,
            player,
            start,
            actions,
            end: outcome.end,
        };
        tracing::debug!(
            turn,
            %player,
            events = record.actions.len(),
            holding = ?record.final_gift(),
            "turn resolved"
        );
        self.log.push_turn(record);
        Ok(self.log.turns().last())
    }

    /// Play every remaining turn and summarize.
    pub fn play(mut self) -> Result<GameRecord, EngineError> {
        while self.play_turn()?.is_some() {}
        Ok(self.finish())
    }

    fn finish(self) -> GameRecord {
        let summary = GameSummary::from_game(&self.state, &self.log);
        let validation = &summary.validation;
        if !validation.giftless_players.is_empty() {
            tracing::warn!(players = ?validation.giftless_players, "players ended without a gift");
        }
        if !validation.unopened_gifts.is_empty() {
            tracing::warn!(gifts = ?validation.unopened_gifts, "gifts were never opened");
        }
        tracing::debug!(
            steals = summary.stats.steals,
            locked = summary.stats.locked_gifts,
            longest_chain = summary.stats.longest_chain,
            "game finished"
        );
        GameRecord {
            config: self.config,
            rng_start: self.rng_start,
            log: self.log,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventKind, ScriptedRng};
    use crate::gifts::{GiftDefinition, GiftId};
    use crate::rules::UnwrapFirst;

    #[test]
    fn test_default_game_completes_cleanly() {
        let record = WhiteElephant::new(GameConfig::default()).unwrap().play().unwrap();

        assert_eq!(record.log.turn_count(), 8);
        assert_eq!(record.log.count(EventKind::Unwrap), 8);
        assert!(record.summary.validation.is_clean());
        assert!(record.rng_start.is_some());
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = WhiteElephant::new(GameConfig::default().with_seed(11)).unwrap().play().unwrap();
        let b = WhiteElephant::new(GameConfig::default().with_seed(11)).unwrap().play().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_play_turn_by_turn() {
        let mut game = WhiteElephant::new(GameConfig::default()).unwrap();
        assert_eq!(game.next_player(), Some(PlayerId::new(0)));

        let first = game.play_turn().unwrap().unwrap();
        assert_eq!(first.turn, 1);
        assert_eq!(first.actions.len(), 1);
        assert_eq!(game.next_player(), Some(PlayerId::new(1)));

        while game.play_turn().unwrap().is_some() {}
        assert!(game.is_finished());
        assert!(game.play_turn().unwrap().is_none());
    }

    #[test]
    fn test_custom_policy_and_rng() {
        let engine = TurnEngine::new(UnwrapFirst);
        let record = WhiteElephant::with_parts(GameConfig::default(), engine, ScriptedRng::new())
            .unwrap()
            .play()
            .unwrap();

        assert_eq!(record.summary.stats.steals, 0);
        assert!(record.rng_start.is_none());
        // Always picking the first wrapped gift hands them out in order.
        for holding in &record.summary.holdings {
            assert_eq!(
                holding.gift.as_ref().map(|g| g.id.raw()),
                Some(holding.player.number() as u32)
            );
        }
    }

    #[test]
    fn test_more_gifts_than_players_reports_unopened() {
        let gifts = (1..=3)
            .map(|id| GiftDefinition::new(GiftId(id), format!("Gift {id}"), 10 * id))
            .collect();
        let config = GameConfig::default().with_players(2).with_gifts(gifts);
        let record = WhiteElephant::new(config).unwrap().play().unwrap();

        assert_eq!(record.summary.validation.unopened_gifts.len(), 1);
        assert!(record.summary.validation.giftless_players.is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = WhiteElephant::new(GameConfig::default().with_players(0)).err();
        assert_eq!(err, Some(ConfigError::NoPlayers));
    }
}
