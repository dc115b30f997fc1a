//! Game log: every event of a game with the table state around it.
//!
//! The log is append-only. Each turn keeps the snapshot taken when it began
//! and, per event, the snapshot right after that event. `action_states`
//! flattens this into the row sequence the matrix chart draws.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{ActionEvent, EventKind, PlayerId, StateSnapshot};
use crate::gifts::GiftId;
use crate::rules::ChainEnd;

/// One event and the table right after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// 1-based turn number.
    pub turn: u32,
    /// 0-based position within the turn.
    pub sequence: u32,
    pub event: ActionEvent,
    pub after: StateSnapshot,
}

/// One player's turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based turn number.
    pub turn: u32,
    pub player: PlayerId,
    pub start: StateSnapshot,
    pub actions: Vec<ActionRecord>,
    pub end: ChainEnd,
}

impl TurnRecord {
    /// Table state when the turn finished.
    #[must_use]
    pub fn end_state(&self) -> &StateSnapshot {
        self.actions.last().map_or(&self.start, |a| &a.after)
    }

    /// What the turn player held when the turn finished.
    #[must_use]
    pub fn final_gift(&self) -> Option<GiftId> {
        self.end_state().held_by(self.player)
    }

    pub fn events(&self) -> impl Iterator<Item = &ActionEvent> {
        self.actions.iter().map(|a| &a.event)
    }
}

/// Which row of the action sequence a state is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStateKind {
    Initial,
    TurnStart(PlayerId),
    Action(ActionEvent),
}

/// A labelled table state, one row of the matrix chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    pub kind: ActionStateKind,
    pub snapshot: StateSnapshot,
}

impl ActionState {
    /// Row label.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.kind {
            ActionStateKind::Initial => "Initial State - All Gifts Wrapped".to_string(),
            ActionStateKind::TurnStart(player) => format!("--- Start of {player} Turn ---"),
            ActionStateKind::Action(event) => event.to_string(),
        }
    }

    #[must_use]
    pub fn is_turn_start(&self) -> bool {
        matches!(self.kind, ActionStateKind::TurnStart(_))
    }
}

/// Ordered record of a whole game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    initial: StateSnapshot,
    turns: Vector<TurnRecord>,
}

impl GameLog {
    #[must_use]
    pub fn new(initial: StateSnapshot) -> Self {
        Self {
            initial,
            turns: Vector::new(),
        }
    }

    pub fn push_turn(&mut self, turn: TurnRecord) {
        self.turns.push_back(turn);
    }

    #[must_use]
    pub fn initial(&self) -> &StateSnapshot {
        &self.initial
    }

    pub fn turns(&self) -> impl Iterator<Item = &TurnRecord> {
        self.turns.iter()
    }

    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Table state after the last event.
    #[must_use]
    pub fn final_state(&self) -> &StateSnapshot {
        self.turns.last().map_or(&self.initial, TurnRecord::end_state)
    }

    /// Every event, in order.
    pub fn events(&self) -> impl Iterator<Item = &ActionEvent> {
        self.turns.iter().flat_map(TurnRecord::events)
    }

    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.events().filter(|e| e.kind() == kind).count()
    }

    /// Most events in a single turn.
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.turns.iter().map(|t| t.actions.len()).max().unwrap_or(0)
    }

    /// Seats whose chains stalled, by turn.
    pub fn stalls(&self) -> impl Iterator<Item = (u32, PlayerId)> + '_ {
        self.turns.iter().filter_map(|t| match t.end {
            ChainEnd::Stalled(player) => Some((t.turn, player)),
            _ => None,
        })
    }

    /// Initial state, then each turn start followed by its events.
    #[must_use]
    pub fn action_states(&self) -> Vec<ActionState> {
        let mut states = vec![ActionState {
            kind: ActionStateKind::Initial,
            snapshot: self.initial.clone(),
        }];
        for turn in &self.turns {
            states.push(ActionState {
                kind: ActionStateKind::TurnStart(turn.player),
                snapshot: turn.start.clone(),
            });
            states.extend(turn.actions.iter().map(|a| ActionState {
                kind: ActionStateKind::Action(a.event.clone()),
                snapshot: a.after.clone(),
            }));
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gifts::{classic_gifts, GiftRegistry};

    fn unwrap(actor: u8, gift: u32) -> ActionEvent {
        ActionEvent::Unwrap {
            actor: PlayerId::new(actor),
            gift: GiftId(gift),
            gift_name: String::new(),
        }
    }

    fn sample_log() -> GameLog {
        let registry = GiftRegistry::from_definitions(classic_gifts()).unwrap();
        let initial = StateSnapshot::initial(&registry, 2);
        let mut log = GameLog::new(initial.clone());

        let mut after_first = initial.clone();
        after_first.apply(&unwrap(0, 3));
        log.push_turn(TurnRecord {
            turn: 1,
            player: PlayerId::new(0),
            start: initial,
            actions: vec![ActionRecord {
                turn: 1,
                sequence: 0,
                event: unwrap(0, 3),
                after: after_first.clone(),
            }],
            end: ChainEnd::Unwrapped,
        });
        log.push_turn(TurnRecord {
            turn: 2,
            player: PlayerId::new(1),
            start: after_first.clone(),
            actions: vec![],
            end: ChainEnd::Stalled(PlayerId::new(1)),
        });
        log
    }

    #[test]
    fn test_counts_and_final_state() {
        let log = sample_log();

        assert_eq!(log.turn_count(), 2);
        assert_eq!(log.count(EventKind::Unwrap), 1);
        assert_eq!(log.count(EventKind::Steal), 0);
        assert_eq!(log.longest_chain(), 1);
        assert_eq!(log.final_state().held_by(PlayerId::new(0)), Some(GiftId(3)));
        assert_eq!(log.stalls().collect::<Vec<_>>(), vec![(2, PlayerId::new(1))]);
    }

    #[test]
    fn test_action_states_order() {
        let states = sample_log().action_states();

        assert_eq!(states.len(), 4);
        assert_eq!(states[0].kind, ActionStateKind::Initial);
        assert!(states[1].is_turn_start());
        assert_eq!(states[2].label(), "Player 1 unwraps Gift #3: ");
        assert_eq!(states[3].label(), "--- Start of Player 2 Turn ---");
    }

    #[test]
    fn test_turn_record_final_gift() {
        let log = sample_log();
        let turns: Vec<_> = log.turns().collect();
        assert_eq!(turns[0].final_gift(), Some(GiftId(3)));
        assert_eq!(turns[1].final_gift(), None);
    }
}
