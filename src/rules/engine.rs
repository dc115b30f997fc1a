//! Turn engine: resolves one player's turn and its steal chain.
//!
//! The chain starts with the turn player as the active player and no
//! excluded gift, then repeats:
//!
//! - **Unwrap**: open a uniformly chosen wrapped gift for the active player
//!   and end the chain. With an empty pool there is nothing left to do; the
//!   chain ends without an event and the active player keeps whatever they
//!   hold (a stall, reported in the outcome and logged).
//! - **Steal**: move the target from its holder to the active player and
//!   count the steal. The victim becomes the active player. If this steal
//!   locked the gift nothing is excluded; otherwise the victim may not take
//!   the same gift straight back.
//!
//! Every iteration either shrinks the pool or moves some gift's steal
//! counter toward the lock threshold, so the chain always ends.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::policy::{Decision, DecisionPolicy};
use crate::core::{ActionEvent, GameState, PlayerId, RandomSource, StealPolicy};
use crate::error::EngineError;
use crate::gifts::GiftId;

/// How a turn's chain ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainEnd {
    /// Someone opened a wrapped gift.
    Unwrapped,
    /// The active player had no wrapped gift and nothing stealable.
    Stalled(PlayerId),
    /// The turn player already held this gift; nothing happened.
    AlreadyHolding(GiftId),
}

/// Everything one call to `resolve_turn` produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub player: PlayerId,
    /// Events in the order they happened.
    pub events: SmallVec<[ActionEvent; 4]>,
    pub end: ChainEnd,
}

impl TurnOutcome {
    #[must_use]
    pub fn steal_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_steal()).count()
    }

    /// The seat left without a move, if the chain stalled.
    #[must_use]
    pub fn stalled(&self) -> Option<PlayerId> {
        match self.end {
            ChainEnd::Stalled(player) => Some(player),
            _ => None,
        }
    }
}

/// Resolves turns with a decision policy.
#[derive(Clone, Debug, Default)]
pub struct TurnEngine<P = StealPolicy> {
    policy: P,
}

impl<P: DecisionPolicy> TurnEngine<P> {
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Ask the policy what `active` does next.
    pub fn decide<R: RandomSource>(
        &self,
        state: &GameState,
        active: PlayerId,
        excluded: Option<GiftId>,
        rng: &mut R,
    ) -> Decision {
        self.policy.decide(state, active, excluded, rng)
    }

    /// Resolve `player`'s full turn, including every steal it triggers.
    ///
    /// The outcome carries at least one event except in two cases, both
    /// with an empty `events`:
    ///
    /// - the seat already holds a gift when its turn starts and takes no
    ///   action (`ChainEnd::AlreadyHolding`);
    /// - the seat itself has nothing to unwrap or steal
    ///   (`ChainEnd::Stalled` naming the turn player).
    ///
    /// Errors only on ownership-table corruption (a steal target nobody
    /// holds, an unknown seat); a stall is a normal outcome.
    pub fn resolve_turn<R: RandomSource>(
        &self,
        state: &mut GameState,
        player: PlayerId,
        rng: &mut R,
    ) -> Result<TurnOutcome, EngineError> {
        if !state.ownership().holdings().contains(player) {
            return Err(EngineError::UnknownPlayer(player));
        }
        if let Some(gift) = state.ownership().held_by(player) {
            tracing::debug!(%player, %gift, "already holding a gift, turn skipped");
            return Ok(TurnOutcome {
                player,
                events: SmallVec::new(),
                end: ChainEnd::AlreadyHolding(gift),
            });
        }

        let mut events = SmallVec::new();
        let mut active = player;
        let mut excluded: Option<GiftId> = None;

        loop {
            match self.decide(state, active, excluded, rng) {
                Decision::Unwrap => {
                    let pool = state.available().len();
                    if pool == 0 {
                        tracing::warn!(
                            player = %active,
                            "no wrapped or stealable gift left, keeps current gift"
                        );
                        return Ok(TurnOutcome {
                            player,
                            events,
                            end: ChainEnd::Stalled(active),
                        });
                    }

                    let gift = state.unwrap_at(active, rng.pick_index(pool))?;
                    let event = ActionEvent::Unwrap {
                        actor: active,
                        gift,
                        gift_name: state.registry().name(gift).to_string(),
                    };
                    tracing::debug!("{event}");
                    events.push(event);
                    return Ok(TurnOutcome {
                        player,
                        events,
                        end: ChainEnd::Unwrapped,
                    });
                }
                Decision::Steal(gift) => {
                    let (victim, status) = state.steal(active, gift)?;
                    let event = ActionEvent::Steal {
                        actor: active,
                        gift,
                        gift_name: state.registry().name(gift).to_string(),
                        victim,
                        steals: status.steals,
                        locked: status.locked,
                    };
                    tracing::debug!("{event}");
                    if status.locked {
                        tracing::debug!(%gift, steals = status.steals, "gift locked");
                    }
                    events.push(event);

                    excluded = if status.locked { None } else { Some(gift) };
                    active = victim;
                }
            }
        }
    }
}
