//! Gift definitions and the gift registry.
//!
//! Gifts are static data: an identity, a display name and a desirability
//! score. Everything that changes during a game lives in `core::state`.

pub mod definition;
pub mod registry;

pub use definition::{classic_gifts, GiftDefinition, GiftId};
pub use registry::GiftRegistry;
