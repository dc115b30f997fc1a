//! Game state: who holds what, and what is still wrapped.
//!
//! ## OwnershipTable
//!
//! Seat → held gift, plus the reverse index gift → holder. Both sides are
//! updated together, so a gift can never appear under two seats and "who
//! holds gift G" is a map lookup.
//!
//! ## GameState
//!
//! Everything the turn engine reads and mutates:
//! - the gift registry and per-gift steal counters/lock flags
//! - the ownership table
//! - the available pool (wrapped gifts, shrinks monotonically)
//! - the opened set (unwrap order, grows monotonically)
//!
//! The state is an explicit value owned by the driver; nothing is global.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::event::ActionEvent;
use super::player::{PlayerId, PlayerMap};
use crate::error::EngineError;
use crate::gifts::{GiftId, GiftRegistry};

/// Mutable per-gift counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftStatus {
    pub steals: u32,
    /// Once set, never cleared.
    pub locked: bool,
}

impl GiftStatus {
    /// Count a steal. Returns true if this steal locked the gift.
    pub fn record_steal(&mut self, lock_threshold: u32) -> bool {
        self.steals += 1;
        if !self.locked && self.steals >= lock_threshold {
            self.locked = true;
            return true;
        }
        false
    }
}

/// Exclusive seat ↔ gift ownership.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnershipTable {
    holdings: PlayerMap<Option<GiftId>>,
    holders: FxHashMap<GiftId, PlayerId>,
}

impl OwnershipTable {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            holdings: PlayerMap::with_default(player_count),
            holders: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.holdings.player_count()
    }

    /// The gift a seat holds.
    #[must_use]
    pub fn held_by(&self, player: PlayerId) -> Option<GiftId> {
        if !self.holdings.contains(player) {
            return None;
        }
        self.holdings[player]
    }

    /// The seat holding a gift.
    #[must_use]
    pub fn holder_of(&self, gift: GiftId) -> Option<PlayerId> {
        self.holders.get(&gift).copied()
    }

    /// Give `gift` to `player`.
    ///
    /// Whatever `player` held before is released, and whoever held `gift`
    /// before loses it. Returns that previous holder.
    pub fn assign(&mut self, player: PlayerId, gift: GiftId) -> Option<PlayerId> {
        self.release(player);
        let previous = self.holders.insert(gift, player);
        if let Some(previous) = previous {
            self.holdings[previous] = None;
        }
        self.holdings[player] = Some(gift);
        previous
    }

    /// Empty a seat's hands. Returns the gift it held.
    pub fn release(&mut self, player: PlayerId) -> Option<GiftId> {
        let gift = self.holdings[player].take()?;
        self.holders.remove(&gift);
        Some(gift)
    }

    /// (seat, held gift) in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, Option<GiftId>)> + '_ {
        self.holdings.iter().map(|(p, g)| (p, *g))
    }

    /// Seats holding nothing.
    pub fn giftless(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.iter().filter(|(_, g)| g.is_none()).map(|(p, _)| p)
    }

    #[must_use]
    pub fn holdings(&self) -> &PlayerMap<Option<GiftId>> {
        &self.holdings
    }
}

/// Per-gift view captured in snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftSnapshot {
    pub id: GiftId,
    pub owner: Option<PlayerId>,
    pub steals: u32,
    pub locked: bool,
    pub opened: bool,
}

/// Whole-table view at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// One entry per gift, identity order.
    pub gifts: Vec<GiftSnapshot>,
    /// Held gift per seat, turn order.
    pub holdings: Vec<Option<GiftId>>,
}

impl StateSnapshot {
    /// All gifts wrapped, all seats empty.
    #[must_use]
    pub fn initial(registry: &GiftRegistry, player_count: usize) -> Self {
        let gifts = registry
            .ids()
            .map(|id| GiftSnapshot {
                id,
                owner: None,
                steals: 0,
                locked: false,
                opened: false,
            })
            .collect();
        Self {
            gifts,
            holdings: vec![None; player_count],
        }
    }

    #[must_use]
    pub fn gift(&self, id: GiftId) -> Option<&GiftSnapshot> {
        self.gifts.iter().find(|g| g.id == id)
    }

    /// Apply one event's delta. Events naming unknown gifts or seats are
    /// ignored.
    pub fn apply(&mut self, event: &ActionEvent) {
        let gift_id = event.gift();
        let actor = event.actor();
        let Some(gift) = self.gifts.iter_mut().find(|g| g.id == gift_id) else {
            return;
        };
        if let Some(previous) = gift.owner {
            if let Some(slot) = self.holdings.get_mut(previous.index()) {
                *slot = None;
            }
        }
        gift.owner = Some(actor);
        gift.opened = true;
        if let ActionEvent::Steal { steals, locked, .. } = event {
            gift.steals = *steals;
            gift.locked |= *locked;
        }
        if let Some(slot) = self.holdings.get_mut(actor.index()) {
            if let Some(old) = slot.replace(gift_id) {
                if old != gift_id {
                    if let Some(released) = self.gifts.iter_mut().find(|g| g.id == old) {
                        released.owner = None;
                    }
                }
            }
        }
    }

    #[must_use]
    pub fn held_by(&self, player: PlayerId) -> Option<GiftId> {
        self.holdings.get(player.index()).copied().flatten()
    }
}

/// Complete mutable state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    registry: GiftRegistry,
    statuses: FxHashMap<GiftId, GiftStatus>,
    ownership: OwnershipTable,
    available: Vec<GiftId>,
    opened: Vec<GiftId>,
    lock_threshold: u32,
}

impl GameState {
    /// Fresh table: every gift wrapped, every seat empty-handed.
    #[must_use]
    pub fn new(player_count: usize, registry: GiftRegistry, lock_threshold: u32) -> Self {
        let statuses = registry.ids().map(|id| (id, GiftStatus::default())).collect();
        let available = registry.ids().collect();
        Self {
            registry,
            statuses,
            ownership: OwnershipTable::new(player_count),
            available,
            opened: Vec::new(),
            lock_threshold,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.ownership.player_count()
    }

    #[must_use]
    pub fn registry(&self) -> &GiftRegistry {
        &self.registry
    }

    #[must_use]
    pub fn lock_threshold(&self) -> u32 {
        self.lock_threshold
    }

    #[must_use]
    pub fn ownership(&self) -> &OwnershipTable {
        &self.ownership
    }

    #[must_use]
    pub fn status(&self, gift: GiftId) -> Option<GiftStatus> {
        self.statuses.get(&gift).copied()
    }

    #[must_use]
    pub fn is_locked(&self, gift: GiftId) -> bool {
        self.status(gift).is_some_and(|s| s.locked)
    }

    /// Wrapped gifts, ascending identity.
    #[must_use]
    pub fn available(&self) -> &[GiftId] {
        &self.available
    }

    /// Unwrapped gifts, in unwrap order.
    #[must_use]
    pub fn opened(&self) -> &[GiftId] {
        &self.opened
    }

    #[must_use]
    pub fn is_opened(&self, gift: GiftId) -> bool {
        self.opened.contains(&gift)
    }

    /// Take the wrapped gift at `pool_index`, open it and hand it to
    /// `player`.
    pub(crate) fn unwrap_at(
        &mut self,
        player: PlayerId,
        pool_index: usize,
    ) -> Result<GiftId, EngineError> {
        if !self.ownership.holdings.contains(player) {
            return Err(EngineError::UnknownPlayer(player));
        }
        if pool_index >= self.available.len() {
            return Err(EngineError::PoolIndex {
                index: pool_index,
                len: self.available.len(),
            });
        }
        let gift = self.available.remove(pool_index);
        self.opened.push(gift);
        self.ownership.assign(player, gift);
        Ok(gift)
    }

    /// Move an opened gift from its holder to `thief`, counting the steal.
    ///
    /// Returns the victim and the gift's status after the steal. Locked
    /// gifts are refused, so a locked status in the result means this steal
    /// locked it.
    pub(crate) fn steal(
        &mut self,
        thief: PlayerId,
        gift: GiftId,
    ) -> Result<(PlayerId, GiftStatus), EngineError> {
        if !self.ownership.holdings.contains(thief) {
            return Err(EngineError::UnknownPlayer(thief));
        }
        if self.available.contains(&gift) {
            return Err(EngineError::StealWrapped { gift });
        }
        let victim = self
            .ownership
            .holder_of(gift)
            .ok_or(EngineError::MissingHolder { gift })?;
        let threshold = self.lock_threshold;
        let status = self
            .statuses
            .get_mut(&gift)
            .ok_or(EngineError::UnknownGift(gift))?;
        if status.locked {
            return Err(EngineError::StealLocked { gift });
        }
        status.record_steal(threshold);
        let status = *status;

        self.ownership.assign(thief, gift);
        Ok((victim, status))
    }

    /// Capture the current table.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        let gifts = self
            .registry
            .ids()
            .map(|id| {
                let status = self.status(id).unwrap_or_default();
                GiftSnapshot {
                    id,
                    owner: self.ownership.holder_of(id),
                    steals: status.steals,
                    locked: status.locked,
                    opened: self.is_opened(id),
                }
            })
            .collect();
        let holdings = self.ownership.iter().map(|(_, g)| g).collect();
        StateSnapshot { gifts, holdings }
    }
}
