//! Running whole games.
//!
//! - `driver`: `WhiteElephant`, one turn per seat in seat order
//! - `log`: the append-only game log with per-event snapshots
//! - `summary`: end-of-game validation and statistics
//! - `batch`: many seeded games aggregated per gift

pub mod batch;
pub mod driver;
pub mod log;
pub mod summary;

pub use batch::{run_batch, BatchReport, GiftBatchStats};
pub use driver::{GameRecord, WhiteElephant};
pub use log::{ActionRecord, ActionState, ActionStateKind, GameLog, TurnRecord};
pub use summary::{GameStats, GameSummary, GiftOutcome, HeldGift, HoldingSummary, ValidationReport};
