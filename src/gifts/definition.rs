//! Gift identity and static attributes.

use serde::{Deserialize, Serialize};

/// Stable gift identity, numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GiftId(pub u32);

impl GiftId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Chart label ("G3").
    #[must_use]
    pub fn short_label(self) -> String {
        format!("G{}", self.0)
    }
}

impl std::fmt::Display for GiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The fixed attributes of a gift.
///
/// Steal counters and lock flags are game state and live in
/// [`GiftStatus`](crate::core::GiftStatus).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GiftDefinition {
    pub id: GiftId,
    pub name: String,
    /// Higher is more desirable. Drives the steal policy.
    pub desirability: u32,
}

impl GiftDefinition {
    #[must_use]
    pub fn new(id: GiftId, name: impl Into<String>, desirability: u32) -> Self {
        Self {
            id,
            name: name.into(),
            desirability,
        }
    }
}

/// The classic eight-gift table.
#[must_use]
pub fn classic_gifts() -> Vec<GiftDefinition> {
    [
        ("Bluetooth Speaker", 85),
        ("Luxury Candle Set", 60),
        ("Board Game Collection", 75),
        ("Electric Wine Opener", 50),
        ("Cozy Throw Blanket", 70),
        ("Gourmet Coffee Set", 55),
        ("Portable Phone Charger", 90),
        ("Kitchen Gadget Bundle", 65),
    ]
    .into_iter()
    .zip(1u32..)
    .map(|((name, desirability), id)| GiftDefinition::new(GiftId(id), name, desirability))
    .collect()
}
