//! Steal-or-unwrap decisions.
//!
//! `DecisionPolicy` is the seam between the chain resolver and the choice
//! an active player makes. `StealPolicy` (the configured desirability
//! tiers) is the policy real games use:
//!
//! 1. Nothing opened yet → unwrap.
//! 2. Stealable = opened, unlocked, not the excluded gift, not already held
//!    by the active player.
//! 3. Nothing stealable → unwrap.
//! 4. Pool empty → forced steal of the most desirable stealable gift.
//! 5. Otherwise steal the most desirable stealable gift with its tier's
//!    probability.
//!
//! Ties on desirability go to the lowest gift identity.

use crate::core::{GameState, PlayerId, RandomSource, StealPolicy};
use crate::gifts::GiftId;

/// Outcome of one decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Take a wrapped gift (or, with an empty pool, end the chain).
    Unwrap,
    /// Steal this opened gift.
    Steal(GiftId),
}

/// Chooses between stealing and unwrapping for the active player.
pub trait DecisionPolicy {
    /// Decide for `active`. `excluded` is the gift just taken from `active`
    /// in this chain and must not be returned.
    fn decide<R: RandomSource>(
        &self,
        state: &GameState,
        active: PlayerId,
        excluded: Option<GiftId>,
        rng: &mut R,
    ) -> Decision;
}

/// Gifts `active` may steal right now, in unwrap order.
pub fn stealable_gifts(
    state: &GameState,
    active: PlayerId,
    excluded: Option<GiftId>,
) -> impl Iterator<Item = GiftId> + '_ {
    state.opened().iter().copied().filter(move |&gift| {
        Some(gift) != excluded
            && !state.is_locked(gift)
            && state.ownership().holder_of(gift) != Some(active)
    })
}

/// Most desirable stealable gift, lowest identity on ties.
#[must_use]
pub fn best_stealable(
    state: &GameState,
    active: PlayerId,
    excluded: Option<GiftId>,
) -> Option<GiftId> {
    let registry = state.registry();
    stealable_gifts(state, active, excluded)
        .max_by_key(|&gift| (registry.desirability(gift), std::cmp::Reverse(gift)))
}

impl DecisionPolicy for StealPolicy {
    fn decide<R: RandomSource>(
        &self,
        state: &GameState,
        active: PlayerId,
        excluded: Option<GiftId>,
        rng: &mut R,
    ) -> Decision {
        if state.opened().is_empty() {
            return Decision::Unwrap;
        }
        let Some(best) = best_stealable(state, active, excluded) else {
            return Decision::Unwrap;
        };
        if state.available().is_empty() {
            tracing::debug!(player = %active, gift = %best, "pool empty, forced steal");
            return Decision::Steal(best);
        }

        let probability = self.probability_for(state.registry().desirability(best));
        let draw = rng.next_uniform();
        tracing::debug!(player = %active, gift = %best, probability, draw, "steal roll");
        if draw < probability {
            Decision::Steal(best)
        } else {
            Decision::Unwrap
        }
    }
}

/// A policy that never steals unless forced. Handy baseline for batch
/// comparisons.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnwrapFirst;

impl DecisionPolicy for UnwrapFirst {
    fn decide<R: RandomSource>(
        &self,
        state: &GameState,
        active: PlayerId,
        excluded: Option<GiftId>,
        _rng: &mut R,
    ) -> Decision {
        if !state.available().is_empty() {
            return Decision::Unwrap;
        }
        best_stealable(state, active, excluded).map_or(Decision::Unwrap, Decision::Steal)
    }
}
