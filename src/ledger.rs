// ⚖️ Ledger - Settlement engine, undo, and the state value object
//
// One explicit value object holds the whole core state (registry, seats,
// rotation, history) behind the public operations. There is no ambient
// singleton: the hosting layer owns a `Ledger` and passes it around.
//
// Settlements are validated fully before any mutation, so a failed
// proposal leaves the ledger byte-for-byte unchanged and a successful one
// changes exactly one balance pair plus one prepended history entry.

use crate::error::LedgerError;
use crate::history::{History, HistoryEntry, Transaction};
use crate::registry::PlayerRegistry;
use crate::replay::{reconstruct_timeline, Timeline};
use crate::rotation::RotationState;
use crate::seating::Seating;
use chrono::Utc;
use log::debug;

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    registry: PlayerRegistry,
    seating: Seating,
    rotation: RotationState,
    history: History,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            registry: PlayerRegistry::new(),
            seating: Seating::new(),
            rotation: RotationState::new(),
            history: History::new(),
        }
    }

    pub(crate) fn from_parts(
        registry: PlayerRegistry,
        seating: Seating,
        rotation: RotationState,
        history: History,
    ) -> Self {
        Ledger {
            registry,
            seating,
            rotation,
            history,
        }
    }

    // ========================================================================
    // PLAYERS & SEATS
    // ========================================================================

    pub fn add_player(&mut self, name: &str) -> Result<(), LedgerError> {
        self.registry.add_player(name)
    }

    pub fn set_origin(&mut self, name: &str, value: i64) -> Result<(), LedgerError> {
        self.registry.set_origin(name, value)
    }

    /// Seat a registered player. The seating engine itself never checks
    /// registration or cross-seat uniqueness; the ledger at least requires
    /// the name to exist.
    pub fn seat_player(&mut self, index: usize, name: &str) -> Result<(), LedgerError> {
        if !self.registry.contains(name) {
            return Err(LedgerError::NotFound(name.to_string()));
        }
        self.seating.seat(index, name);
        Ok(())
    }

    pub fn vacate_seat(&mut self, index: usize) {
        self.seating.vacate(index);
    }

    // ========================================================================
    // SETTLEMENT
    // ========================================================================

    /// Validate and apply a point transfer. Each precondition is a
    /// distinct failure mode so the hosting layer can surface exactly
    /// which field is wrong. `from == to` is deliberately not rejected.
    pub fn propose_settlement(
        &mut self,
        from: Option<&str>,
        to: Option<&str>,
        amount: i64,
    ) -> Result<(), LedgerError> {
        let from = from.ok_or(LedgerError::MissingFrom)?;
        let to = to.ok_or(LedgerError::MissingTo)?;
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if !self.registry.contains(from) {
            return Err(LedgerError::NotFound(from.to_string()));
        }
        if !self.registry.contains(to) {
            return Err(LedgerError::NotFound(to.to_string()));
        }

        self.record_settlement(from, to, amount, Utc::now().timestamp_millis());
        Ok(())
    }

    /// All preconditions already checked. Split out so the entry time is
    /// injectable under test.
    pub(crate) fn record_settlement(&mut self, from: &str, to: &str, amount: i64, time: i64) {
        if let Some(p) = self.registry.get_mut(from) {
            p.score -= amount;
        }
        if let Some(p) = self.registry.get_mut(to) {
            p.score += amount;
        }

        self.history.push_recent(HistoryEntry {
            time,
            round: self.rotation.round,
            dealer_index: self.rotation.dealer_seat,
            transactions: vec![Transaction {
                from: from.to_string(),
                to: to.to_string(),
                amount,
            }],
        });
        debug!(
            "settled {} -> {} for {} in round {}",
            from, to, amount, self.rotation.round
        );
    }

    // ========================================================================
    // UNDO
    // ========================================================================

    /// Remove the most recent history entry and reverse its transactions
    /// in stored order. Never touches origins or rotation state. Repeated
    /// calls walk further back through history.
    pub fn undo_last(&mut self) -> Result<HistoryEntry, LedgerError> {
        let entry = self.history.pop_recent().ok_or(LedgerError::EmptyHistory)?;

        for tx in &entry.transactions {
            // Names missing from the registry are skipped, matching the
            // tolerance reporting contexts give unknown players.
            if let Some(p) = self.registry.get_mut(&tx.from) {
                p.score += tx.amount;
            }
            if let Some(p) = self.registry.get_mut(&tx.to) {
                p.score -= tx.amount;
            }
        }
        debug!("undid settlement recorded in round {}", entry.round);
        Ok(entry)
    }

    // ========================================================================
    // DEALER ROTATION
    // ========================================================================

    /// Designate `seat` as dealer. With a full table this is a played
    /// hand (streak/round rules apply); with any empty seat it is a setup
    /// action that holds the round.
    pub fn designate_dealer(&mut self, seat: usize) {
        let table_full = self.seating.is_full();
        self.rotation.designate_dealer(seat, table_full);
    }

    /// Rotate dealership to the next seat and start a new round. Never
    /// blocks; callers wanting the unsettled-round warning check
    /// `current_round_settled()` first.
    pub fn advance_dealer(&mut self) {
        self.rotation.advance();
    }

    /// Whether the active round has at least one recorded settlement.
    pub fn current_round_settled(&self) -> bool {
        self.history.has_settlement_for_round(self.rotation.round)
    }

    // ========================================================================
    // REPORTING
    // ========================================================================

    /// Per-round balance snapshots derived from the ledger. Read-only.
    pub fn reconstruct_timeline(&self) -> Timeline {
        reconstruct_timeline(&self.registry, &self.history)
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.registry
    }

    pub fn seating(&self) -> &Seating {
        &self.seating
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

// ============================================================================
// TESTS
// ============================================================================
