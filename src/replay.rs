// 📈 Score Reconstruction - Per-round balance snapshots from the ledger
//
// The charting layer wants one balance series per player across rounds.
// Rather than caching running totals anywhere, the full timeline is
// rebuilt on demand from the immutable history plus the registry's origin
// baselines. Pure and idempotent: same inputs, same timeline.

use crate::history::History;
use crate::registry::PlayerRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// SNAPSHOT TYPES
// ============================================================================

/// Balances at the end of one round. Round 0 is the starting state
/// (origins only, before any play).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round: u32,
    pub scores: BTreeMap<String, i64>,
}

impl RoundSnapshot {
    /// Balance for `name`, 0 if the player is absent from this snapshot.
    pub fn score_of(&self, name: &str) -> i64 {
        self.scores.get(name).copied().unwrap_or(0)
    }
}

/// Snapshots for every round `0..=max_round`, gaps carry-forward filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub rounds: Vec<RoundSnapshot>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn snapshot(&self, round: u32) -> Option<&RoundSnapshot> {
        self.rounds.get(round as usize)
    }

    /// One balance per round for `name`, in round order. This is the
    /// dataset shape the chart layer consumes.
    pub fn series_for(&self, name: &str) -> Vec<i64> {
        self.rounds.iter().map(|s| s.score_of(name)).collect()
    }
}

// ============================================================================
// RECONSTRUCTION
// ============================================================================

/// Rebuild the per-round timeline. Read-only over both inputs.
///
/// Snapshot 0 holds each player's origin. History entries are replayed in
/// timestamp order; each entry overwrites the snapshot for its round with
/// the balances after all of its transactions, so several entries in one
/// round leave the round-end state. Rounds with no entry inherit the
/// previous round's snapshot. Transactions naming players missing from
/// the registry are ignored.
pub fn reconstruct_timeline(registry: &PlayerRegistry, history: &History) -> Timeline {
    let initial: BTreeMap<String, i64> = registry
        .players()
        .iter()
        .map(|p| (p.name.clone(), p.origin))
        .collect();

    let mut snapshots: BTreeMap<u32, BTreeMap<String, i64>> = BTreeMap::new();
    snapshots.insert(0, initial.clone());

    // Ledger storage is newest-first; replay needs chronological order.
    let mut entries: Vec<_> = history.entries().to_vec();
    entries.sort_by_key(|e| e.time);

    let mut running = initial;
    for entry in &entries {
        for tx in &entry.transactions {
            if let Some(balance) = running.get_mut(&tx.from) {
                *balance -= tx.amount;
            }
            if let Some(balance) = running.get_mut(&tx.to) {
                *balance += tx.amount;
            }
        }
        snapshots.insert(entry.round, running.clone());
    }

    let max_round = snapshots.keys().copied().max().unwrap_or(0);

    let mut rounds = Vec::with_capacity(max_round as usize + 1);
    let mut last = snapshots.get(&0).cloned().unwrap_or_default();
    for round in 0..=max_round {
        if let Some(scores) = snapshots.get(&round) {
            last = scores.clone();
        }
        rounds.push(RoundSnapshot {
            round,
            scores: last.clone(),
        });
    }

    Timeline { rounds }
}

// ============================================================================
// TESTS
// ============================================================================
