//! End-of-game validation and summary statistics.

use serde::{Deserialize, Serialize};

use super::log::GameLog;
use crate::core::{EventKind, GameState, PlayerId};
use crate::gifts::GiftId;

/// Problems found once every turn has been played. These are warnings
/// about the configuration or the rules, never engine failures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub giftless_players: Vec<PlayerId>,
    pub unopened_gifts: Vec<GiftId>,
}

impl ValidationReport {
    #[must_use]
    pub fn check(state: &GameState) -> Self {
        Self {
            giftless_players: state.ownership().giftless().collect(),
            unopened_gifts: state.available().to_vec(),
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.giftless_players.is_empty() && self.unopened_gifts.is_empty()
    }
}

/// What a seat ended the game with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingSummary {
    pub player: PlayerId,
    pub gift: Option<HeldGift>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldGift {
    pub id: GiftId,
    pub name: String,
    pub desirability: u32,
    pub steals: u32,
    pub locked: bool,
}

/// Final status of one gift.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftOutcome {
    pub id: GiftId,
    pub name: String,
    pub desirability: u32,
    pub steals: u32,
    pub locked: bool,
    pub opened: bool,
    /// `None` for a gift that was never opened (or was left ownerless by a
    /// stall).
    pub owner: Option<PlayerId>,
}

/// Aggregate numbers for one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub turns: usize,
    /// Unwraps plus steals.
    pub actions: usize,
    pub unwraps: usize,
    pub steals: usize,
    pub locked_gifts: usize,
    pub longest_chain: usize,
    pub stalls: usize,
    /// Highest steal count, lowest identity on ties; `None` without steals.
    pub most_stolen: Option<GiftId>,
}

/// Everything reporting needs about a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Turn order.
    pub holdings: Vec<HoldingSummary>,
    /// Identity order.
    pub gifts: Vec<GiftOutcome>,
    pub stats: GameStats,
    pub validation: ValidationReport,
}

impl GameSummary {
    #[must_use]
    pub fn from_game(state: &GameState, log: &GameLog) -> Self {
        let registry = state.registry();
        let ownership = state.ownership();

        let gifts: Vec<GiftOutcome> = registry
            .iter()
            .map(|def| {
                let status = state.status(def.id).unwrap_or_default();
                GiftOutcome {
                    id: def.id,
                    name: def.name.clone(),
                    desirability: def.desirability,
                    steals: status.steals,
                    locked: status.locked,
                    opened: state.is_opened(def.id),
                    owner: ownership.holder_of(def.id),
                }
            })
            .collect();

        let holdings = ownership
            .iter()
            .map(|(player, held)| HoldingSummary {
                player,
                gift: held.and_then(|id| gifts.iter().find(|g| g.id == id)).map(|g| HeldGift {
                    id: g.id,
                    name: g.name.clone(),
                    desirability: g.desirability,
                    steals: g.steals,
                    locked: g.locked,
                }),
            })
            .collect();

        let unwraps = log.count(EventKind::Unwrap);
        let steals = log.count(EventKind::Steal);
        let most_stolen = gifts
            .iter()
            .filter(|g| g.steals > 0)
            .max_by(|a, b| a.steals.cmp(&b.steals).then(b.id.cmp(&a.id)))
            .map(|g| g.id);
        let stats = GameStats {
            turns: log.turn_count(),
            actions: unwraps + steals,
            unwraps,
            steals,
            locked_gifts: gifts.iter().filter(|g| g.locked).count(),
            longest_chain: log.longest_chain(),
            stalls: log.stalls().count(),
            most_stolen,
        };

        Self {
            holdings,
            gifts,
            stats,
            validation: ValidationReport::check(state),
        }
    }

    #[must_use]
    pub fn gift(&self, id: GiftId) -> Option<&GiftOutcome> {
        self.gifts.iter().find(|g| g.id == id)
    }

    /// Gifts ordered by steal count, most stolen first; ties by identity.
    #[must_use]
    pub fn gifts_by_steals(&self) -> Vec<&GiftOutcome> {
        let mut gifts: Vec<_> = self.gifts.iter().collect();
        gifts.sort_by(|a, b| b.steals.cmp(&a.steals).then(a.id.cmp(&b.id)));
        gifts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateSnapshot;
    use crate::gifts::{GiftDefinition, GiftRegistry};

    fn state() -> GameState {
        let registry = GiftRegistry::from_definitions([
            GiftDefinition::new(GiftId(1), "Mug", 40),
            GiftDefinition::new(GiftId(2), "Lamp", 70),
            GiftDefinition::new(GiftId(3), "Hat", 20),
        ])
        .unwrap();
        GameState::new(3, registry, 3)
    }

    #[test]
    fn test_validation_reports_leftovers() {
        let mut state = state();
        state.unwrap_at(PlayerId::new(0), 1).unwrap();

        let report = ValidationReport::check(&state);
        assert!(!report.is_clean());
        assert_eq!(report.giftless_players, vec![PlayerId::new(1), PlayerId::new(2)]);
        assert_eq!(report.unopened_gifts, vec![GiftId(1), GiftId(3)]);
    }

    #[test]
    fn test_summary_from_game() {
        let mut state = state();
        let log = GameLog::new(StateSnapshot::initial(state.registry(), 3));
        state.unwrap_at(PlayerId::new(0), 1).unwrap();
        state.unwrap_at(PlayerId::new(1), 0).unwrap();
        state.steal(PlayerId::new(2), GiftId(2)).unwrap();

        let summary = GameSummary::from_game(&state, &log);

        let lamp = summary.gift(GiftId(2)).unwrap();
        assert_eq!(lamp.owner, Some(PlayerId::new(2)));
        assert_eq!(lamp.steals, 1);
        assert!(lamp.opened);
        assert_eq!(summary.gift(GiftId(3)).unwrap().owner, None);
        assert!(summary.holdings[0].gift.is_none());
        assert_eq!(summary.holdings[2].gift.as_ref().map(|g| g.desirability), Some(70));
        assert_eq!(summary.stats.locked_gifts, 0);
        assert_eq!(summary.gifts_by_steals()[0].id, GiftId(2));
        assert_eq!(summary.stats.most_stolen, Some(GiftId(2)));
    }

    #[test]
    fn test_most_stolen_needs_a_steal() {
        let mut state = state();
        let log = GameLog::new(StateSnapshot::initial(state.registry(), 3));
        state.unwrap_at(PlayerId::new(0), 0).unwrap();

        let summary = GameSummary::from_game(&state, &log);
        assert_eq!(summary.stats.most_stolen, None);
        assert_eq!(summary.stats.actions, 0);
    }

    #[test]
    fn test_most_stolen_ties_go_to_lowest_identity() {
        let mut state = state();
        let log = GameLog::new(StateSnapshot::initial(state.registry(), 3));
        state.unwrap_at(PlayerId::new(0), 2).unwrap();
        state.unwrap_at(PlayerId::new(1), 0).unwrap();
        state.steal(PlayerId::new(2), GiftId(3)).unwrap();
        state.steal(PlayerId::new(0), GiftId(1)).unwrap();

        let summary = GameSummary::from_game(&state, &log);
        assert_eq!(summary.stats.most_stolen, Some(GiftId(1)));
    }
}
