// Mahjong Score Ledger - Core Library
// Players, seats, settlements, dealer rotation, undo and replay.
// Exposes the whole core for the CLI host and tests; rendering,
// persistence transport and charting live in the hosting application.

pub mod error;
pub mod registry;
pub mod seating;
pub mod history;
pub mod rotation;
pub mod ledger;
pub mod replay;
pub mod state;
pub mod export;

// Re-export commonly used types
pub use error::LedgerError;
pub use registry::{Player, PlayerRegistry};
pub use seating::{Seating, SEAT_COUNT};
pub use history::{History, HistoryEntry, Transaction};
pub use rotation::RotationState;
pub use ledger::Ledger;
pub use replay::{reconstruct_timeline, RoundSnapshot, Timeline};
pub use state::SavedState;
pub use export::{export_history_csv, export_history_to_path};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
