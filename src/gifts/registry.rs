//! Gift registry.
//!
//! Holds every gift definition of a game in identity order and answers
//! lookups by `GiftId` through an index map.

use rustc_hash::FxHashMap;

use super::definition::{GiftDefinition, GiftId};
use crate::error::ConfigError;

/// Registry of gift definitions.
///
/// ```
/// use white_elephant::gifts::{GiftDefinition, GiftId, GiftRegistry};
///
/// let mut registry = GiftRegistry::new();
/// registry.register(GiftDefinition::new(GiftId::new(1), "Mug", 40)).unwrap();
///
/// assert_eq!(registry.get(GiftId::new(1)).unwrap().name, "Mug");
/// assert!(registry.get(GiftId::new(2)).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct GiftRegistry {
    gifts: Vec<GiftDefinition>,
    index: FxHashMap<GiftId, usize>,
}

impl GiftRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of definitions.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = GiftDefinition>,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for gift in definitions {
            registry.register(gift)?;
        }
        Ok(registry)
    }

    /// Register a gift, keeping the registry sorted by identity.
    pub fn register(&mut self, gift: GiftDefinition) -> Result<(), ConfigError> {
        if self.index.contains_key(&gift.id) {
            return Err(ConfigError::DuplicateGift(gift.id));
        }
        if gift.desirability == 0 {
            return Err(ConfigError::ZeroDesirability(gift.id));
        }

        let position = self.gifts.partition_point(|g| g.id < gift.id);
        self.gifts.insert(position, gift);
        self.reindex();
        Ok(())
    }

    fn reindex(&mut self) {
        self.index = self
            .gifts
            .iter()
            .enumerate()
            .map(|(i, g)| (g.id, i))
            .collect();
    }

    #[must_use]
    pub fn get(&self, id: GiftId) -> Option<&GiftDefinition> {
        self.index.get(&id).map(|&i| &self.gifts[i])
    }

    #[must_use]
    pub fn contains(&self, id: GiftId) -> bool {
        self.index.contains_key(&id)
    }

    /// Display name, or an empty string for an unknown gift.
    #[must_use]
    pub fn name(&self, id: GiftId) -> &str {
        self.get(id).map_or("", |g| g.name.as_str())
    }

    /// Desirability, or 0 for an unknown gift.
    #[must_use]
    pub fn desirability(&self, id: GiftId) -> u32 {
        self.get(id).map_or(0, |g| g.desirability)
    }

    /// Look a gift up by its display name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&GiftDefinition> {
        self.gifts.iter().find(|g| g.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.gifts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gifts.is_empty()
    }

    /// Definitions in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &GiftDefinition> {
        self.gifts.iter()
    }

    /// Identities in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = GiftId> + '_ {
        self.gifts.iter().map(|g| g.id)
    }
}
