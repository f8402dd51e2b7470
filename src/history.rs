// 📜 History Ledger - Append-only record of settlements
//
// Entries are stored newest-first: a settlement is prepended at index 0
// and undo only ever removes index 0. Each entry carries the round and
// dealer seat that were active when it was recorded, so the ledger alone
// is enough to reconstruct per-round balances later.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// TRANSACTION
// ============================================================================

/// A single point transfer. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Paying player name
    pub from: String,

    /// Receiving player name
    pub to: String,

    /// Strictly positive transfer amount
    pub amount: i64,
}

// ============================================================================
// HISTORY ENTRY
// ============================================================================

/// One recorded settlement event. The `transactions` sequence is ordered
/// and non-empty; the current producer always writes exactly one
/// transaction per entry, but undo and replay iterate the full sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Milliseconds since the Unix epoch
    pub time: i64,

    /// Round number active when recorded
    pub round: u32,

    /// Dealer seat active when recorded
    pub dealer_index: usize,

    pub transactions: Vec<Transaction>,
}

impl HistoryEntry {
    /// Entry time as "HH:MM:SS" for history views and exports.
    pub fn formatted_time(&self) -> String {
        match Utc.timestamp_millis_opt(self.time).single() {
            Some(dt) => dt.format("%H:%M:%S").to_string(),
            None => "--:--:--".to_string(),
        }
    }
}

// ============================================================================
// HISTORY
// ============================================================================

/// Newest-first append-only ledger of settlement entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        History {
            entries: Vec::new(),
        }
    }

    /// Prepend a new entry (most recent first).
    pub(crate) fn push_recent(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
    }

    /// Remove and return the most recent entry.
    pub(crate) fn pop_recent(&mut self) -> Option<HistoryEntry> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.entries.remove(0))
        }
    }

    /// Whether any entry was recorded for `round`. Drives the hosting
    /// layer's soft warning before advancing an unsettled round.
    pub fn has_settlement_for_round(&self, round: u32) -> bool {
        self.entries.iter().any(|e| e.round == round)
    }

    /// Entries newest-first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        History { entries }
    }
}

// ============================================================================
// TESTS
// ============================================================================
