//! Random sources for the turn engine.
//!
//! The engine only ever asks two questions of randomness: "give me a
//! uniform draw in `[0, 1)`" (steal coin flips) and "pick one of these"
//! (which wrapped gift to open). `RandomSource` is that narrow interface.
//!
//! - `GameRng`: seeded ChaCha8, forkable for batch runs, with a serializable
//!   position so a record can say exactly where its stream started.
//! - `ScriptedRng`: replays fixed draws, for tests that need a particular
//!   decision sequence.
//!
//! ```
//! use white_elephant::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.next_uniform(), b.next_uniform());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Narrow randomness interface consumed by the turn engine.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Choose one element uniformly, `None` for an empty slice.
    fn choose_uniform<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let index = self.pick_index(items.len());
        items.get(index)
    }
}

/// Deterministic seeded RNG.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent stream, one per game of a batch.
    ///
    /// Forks are deterministic: the n-th fork of a given seed always has the
    /// same seed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Current position, for recording alongside a game.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Resume a stream from a recorded position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl RandomSource for GameRng {
    fn next_uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }
}

/// Serializable position of a `GameRng`.
///
/// ChaCha8's word position makes this O(1) regardless of how many draws were
/// taken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
    pub fork_counter: u64,
}

/// Replays scripted draws.
///
/// Uniform draws and picks are consumed from separate queues. When a queue
/// runs dry the fallback is used: `fallback_uniform` for draws (default
/// `0.999`, i.e. "do not steal") and index 0 for picks.
///
/// ```
/// use white_elephant::core::{RandomSource, ScriptedRng};
///
/// let mut rng = ScriptedRng::new().with_uniforms([0.1]).with_picks([2]);
/// assert_eq!(rng.next_uniform(), 0.1);
/// assert_eq!(rng.pick_index(3), 2);
/// assert_eq!(rng.pick_index(3), 0);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    uniforms: VecDeque<f64>,
    picks: VecDeque<usize>,
    fallback_uniform: f64,
    uniform_draws: usize,
    pick_draws: usize,
}

impl Default for ScriptedRng {
    fn default() -> Self {
        Self {
            uniforms: VecDeque::new(),
            picks: VecDeque::new(),
            fallback_uniform: 0.999,
            uniform_draws: 0,
            pick_draws: 0,
        }
    }
}

impl ScriptedRng {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_uniforms(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms.extend(draws);
        self
    }

    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    #[must_use]
    pub fn with_fallback_uniform(mut self, value: f64) -> Self {
        self.fallback_uniform = value;
        self
    }

    /// Number of uniform draws taken so far.
    #[must_use]
    pub fn uniform_draws(&self) -> usize {
        self.uniform_draws
    }

    /// Number of picks taken so far.
    #[must_use]
    pub fn pick_draws(&self) -> usize {
        self.pick_draws
    }
}

impl RandomSource for ScriptedRng {
    fn next_uniform(&mut self) -> f64 {
        self.uniform_draws += 1;
        self.uniforms.pop_front().unwrap_or(self.fallback_uniform)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.pick_draws += 1;
        // Out-of-range scripted picks clamp to the last element.
        self.picks.pop_front().unwrap_or(0).min(len.saturating_sub(1))
    }
}
