//! Action events: the atomic changes the turn engine makes.
//!
//! An unwrap moves a gift from the pool to a seat; a steal moves an opened
//! gift between seats and bumps its counter. Each event carries enough to
//! replay its owner/steal/lock delta without looking at the state.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::gifts::GiftId;

/// Event kind, for filtering and counting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Unwrap,
    Steal,
}

/// One atomic change. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionEvent {
    /// `actor` opened a wrapped gift.
    Unwrap {
        actor: PlayerId,
        gift: GiftId,
        gift_name: String,
    },
    /// `actor` took `gift` from `victim`.
    Steal {
        actor: PlayerId,
        gift: GiftId,
        gift_name: String,
        victim: PlayerId,
        /// Steal counter after this steal.
        steals: u32,
        /// Whether this steal locked the gift.
        locked: bool,
    },
}

impl ActionEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            ActionEvent::Unwrap { .. } => EventKind::Unwrap,
            ActionEvent::Steal { .. } => EventKind::Steal,
        }
    }

    #[must_use]
    pub fn actor(&self) -> PlayerId {
        match self {
            ActionEvent::Unwrap { actor, .. } | ActionEvent::Steal { actor, .. } => *actor,
        }
    }

    #[must_use]
    pub fn gift(&self) -> GiftId {
        match self {
            ActionEvent::Unwrap { gift, .. } | ActionEvent::Steal { gift, .. } => *gift,
        }
    }

    #[must_use]
    pub fn gift_name(&self) -> &str {
        match self {
            ActionEvent::Unwrap { gift_name, .. } | ActionEvent::Steal { gift_name, .. } => {
                gift_name
            }
        }
    }

    #[must_use]
    pub fn victim(&self) -> Option<PlayerId> {
        match self {
            ActionEvent::Unwrap { .. } => None,
            ActionEvent::Steal { victim, .. } => Some(*victim),
        }
    }

    #[must_use]
    pub fn is_steal(&self) -> bool {
        self.kind() == EventKind::Steal
    }

    /// True for the steal that locked its gift.
    #[must_use]
    pub fn caused_lock(&self) -> bool {
        matches!(self, ActionEvent::Steal { locked: true, .. })
    }
}

impl std::fmt::Display for ActionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionEvent::Unwrap {
                actor,
                gift,
                gift_name,
            } => write!(f, "{actor} unwraps Gift {gift}: {gift_name}"),
            ActionEvent::Steal {
                actor,
                gift,
                gift_name,
                victim,
                ..
            } => write!(f, "{actor} steals Gift {gift}: {gift_name} from {victim}"),
        }
    }
}
