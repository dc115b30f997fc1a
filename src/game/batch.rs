//! Many games from one seed, aggregated per gift.

use serde::{Deserialize, Serialize};

use super::driver::WhiteElephant;
use crate::core::{GameConfig, GameRng};
use crate::error::Error;
use crate::gifts::GiftId;

/// Per-gift averages over a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GiftBatchStats {
    pub id: GiftId,
    pub name: String,
    pub desirability: u32,
    pub mean_steals: f64,
    /// Fraction of games in which the gift ended locked.
    pub lock_rate: f64,
}

/// Aggregate of a batch of games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub games: usize,
    pub seed: u64,
    pub mean_steals: f64,
    pub mean_longest_chain: f64,
    pub max_chain: usize,
    /// Games that ended with a giftless player or an unopened gift.
    pub unclean_games: usize,
    pub gifts: Vec<GiftBatchStats>,
}

/// Play `games` games, each with its own fork of a stream seeded by `seed`.
pub fn run_batch(config: &GameConfig, games: usize, seed: u64) -> Result<BatchReport, Error> {
    let mut root = GameRng::new(seed);
    let mut gifts: Vec<GiftBatchStats> = config
        .validate()?
        .iter()
        .map(|def| GiftBatchStats {
            id: def.id,
            name: def.name.clone(),
            desirability: def.desirability,
            mean_steals: 0.0,
            lock_rate: 0.0,
        })
        .collect();

    let mut total_steals = 0usize;
    let mut total_longest = 0usize;
    let mut max_chain = 0usize;
    let mut unclean_games = 0usize;

    for game in 0..games {
        let record = WhiteElephant::with_rng(config.clone(), root.fork())?.play()?;
        let summary = &record.summary;
        tracing::debug!(game, steals = summary.stats.steals, "batch game finished");

        total_steals += summary.stats.steals;
        total_longest += summary.stats.longest_chain;
        max_chain = max_chain.max(summary.stats.longest_chain);
        if !summary.validation.is_clean() {
            unclean_games += 1;
        }
        for (stats, outcome) in gifts.iter_mut().zip(&summary.gifts) {
            stats.mean_steals += f64::from(outcome.steals);
            if outcome.locked {
                stats.lock_rate += 1.0;
            }
        }
    }

    let n = games.max(1) as f64;
    for stats in &mut gifts {
        stats.mean_steals /= n;
        stats.lock_rate /= n;
    }

    tracing::info!(games, seed, unclean_games, "batch finished");
    Ok(BatchReport {
        games,
        seed,
        mean_steals: total_steals as f64 / n,
        mean_longest_chain: total_longest as f64 / n,
        max_chain,
        unclean_games,
        gifts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_is_deterministic() {
        let config = GameConfig::default();
        let a = run_batch(&config, 20, 5).unwrap();
        let b = run_batch(&config, 20, 5).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.games, 20);
        assert_eq!(a.gifts.len(), 8);
        assert_eq!(a.unclean_games, 0);
    }

    #[test]
    fn test_batch_rates_are_fractions() {
        let report = run_batch(&GameConfig::default(), 30, 1).unwrap();
        for gift in &report.gifts {
            assert!((0.0..=1.0).contains(&gift.lock_rate));
            assert!(gift.mean_steals >= 0.0);
        }
        assert!(report.mean_longest_chain >= 1.0);
        assert!(report.max_chain as f64 >= report.mean_longest_chain);
    }

    #[test]
    fn test_empty_batch() {
        let report = run_batch(&GameConfig::default(), 0, 1).unwrap();
        assert_eq!(report.games, 0);
        assert_eq!(report.mean_steals, 0.0);
    }
}
