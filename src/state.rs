// 💾 Persisted State - The blob the hosting layer stores and restores
//
// The core is transport-agnostic: it hands the host one JSON snapshot and
// accepts one back. Loading is lenient field-by-field, exactly like the
// stored-data migrations this format grew out of: any missing or
// malformed field falls back to its initial default (with a warning), so
// a partial or corrupt snapshot can never prevent startup.

use crate::error::LedgerError;
use crate::history::{History, HistoryEntry};
use crate::ledger::Ledger;
use crate::registry::{Player, PlayerRegistry};
use crate::rotation::RotationState;
use crate::seating::{Seating, SEAT_COUNT};
use anyhow::{Context, Result};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// SAVED STATE
// ============================================================================

/// The persisted shape. Field names match the stored JSON (camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedState {
    pub players: Vec<Player>,
    pub seats: Vec<Option<String>>,
    pub current_round: u32,
    pub dealer_index: usize,
    pub dealer_streak: u32,
    pub history: Vec<HistoryEntry>,
}

impl Default for SavedState {
    fn default() -> Self {
        SavedState {
            players: Vec::new(),
            seats: vec![None; SEAT_COUNT],
            current_round: 1,
            dealer_index: 0,
            dealer_streak: 0,
            history: Vec::new(),
        }
    }
}

fn field_or_default<T: DeserializeOwned>(blob: &Value, key: &str, default: T) -> T {
    match blob.get(key) {
        None => default,
        Some(value) => match serde_json::from_value(value.clone()) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("state field '{}' is malformed ({}), using default", key, err);
                default
            }
        },
    }
}

impl SavedState {
    /// Lenient decode: never fails. Unparseable JSON yields the full
    /// default state; otherwise each field is recovered independently.
    pub fn from_json(blob: &str) -> SavedState {
        let value: Value = match serde_json::from_str(blob) {
            Ok(value) => value,
            Err(err) => {
                warn!("state blob is not valid JSON ({}), starting fresh", err);
                return SavedState::default();
            }
        };

        let defaults = SavedState::default();
        let mut state = SavedState {
            players: field_or_default(&value, "players", defaults.players),
            seats: field_or_default(&value, "seats", defaults.seats),
            current_round: field_or_default(&value, "currentRound", defaults.current_round),
            dealer_index: field_or_default(&value, "dealerIndex", defaults.dealer_index),
            dealer_streak: field_or_default(&value, "dealerStreak", defaults.dealer_streak),
            history: field_or_default(&value, "history", defaults.history),
        };
        state.normalize();
        state
    }

    /// Strict decode for hosts that want to report a bad file before
    /// falling back to the lenient path.
    pub fn from_json_strict(blob: &str) -> Result<SavedState, LedgerError> {
        let mut state: SavedState = serde_json::from_str(blob)
            .map_err(|err| LedgerError::MalformedState(err.to_string()))?;
        state.normalize();
        Ok(state)
    }

    /// Clamp loaded fields back into the core invariants: 4 seats,
    /// round >= 1, dealer seat in range.
    fn normalize(&mut self) {
        if self.seats.len() != SEAT_COUNT {
            warn!(
                "state held {} seats, normalizing to {}",
                self.seats.len(),
                SEAT_COUNT
            );
            self.seats.resize(SEAT_COUNT, None);
        }
        if self.current_round < 1 {
            warn!("state round was 0, resetting to 1");
            self.current_round = 1;
        }
        if self.dealer_index >= SEAT_COUNT {
            warn!(
                "state dealer seat {} out of range, resetting to 0",
                self.dealer_index
            );
            self.dealer_index = 0;
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize ledger state")
    }

    pub fn from_ledger(ledger: &Ledger) -> SavedState {
        SavedState {
            players: ledger.registry().players().to_vec(),
            seats: ledger.seating().slots().to_vec(),
            current_round: ledger.rotation().round,
            dealer_index: ledger.rotation().dealer_seat,
            dealer_streak: ledger.rotation().dealer_streak,
            history: ledger.history().entries().to_vec(),
        }
    }

    pub fn into_ledger(self) -> Ledger {
        let mut slots: [Option<String>; SEAT_COUNT] = Default::default();
        for (slot, seat) in slots.iter_mut().zip(self.seats) {
            *slot = seat;
        }

        Ledger::from_parts(
            PlayerRegistry::from_players(self.players),
            Seating::from_slots(slots),
            RotationState {
                round: self.current_round,
                dealer_seat: self.dealer_index,
                dealer_streak: self.dealer_streak,
            },
            History::from_entries(self.history),
        )
    }
}

// ============================================================================
// LEDGER ROUND-TRIP
// ============================================================================

impl Ledger {
    /// Restore a ledger from a persisted blob. Lenient per field; a
    /// wholly corrupt blob yields a fresh ledger.
    pub fn load_state(blob: &str) -> Ledger {
        SavedState::from_json(blob).into_ledger()
    }

    /// Snapshot the full core state for the host to persist.
    pub fn serialize_state(&self) -> Result<String> {
        SavedState::from_ledger(self).to_json()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        for (i, name) in ["East", "South", "West", "North"].iter().enumerate() {
            ledger.add_player(name).unwrap();
            ledger.seat_player(i, name).unwrap();
        }
        ledger.set_origin("East", 25000).unwrap();
        ledger
            .propose_settlement(Some("East"), Some("South"), 1200)
            .unwrap();
        ledger.designate_dealer(1);
        ledger
    }

    #[test]
    fn test_round_trip() {
        let ledger = sample_ledger();
        let blob = ledger.serialize_state().unwrap();
        let restored = Ledger::load_state(&blob);

        assert_eq!(restored, ledger);
    }

    #[test]
    fn test_blob_shape() {
        let ledger = sample_ledger();
        let blob = ledger.serialize_state().unwrap();
        let value: Value = serde_json::from_str(&blob).unwrap();

        assert!(value["players"].is_array());
        assert_eq!(value["players"][0]["name"], "East");
        assert_eq!(value["players"][0]["origin"], 25000);
        assert_eq!(value["seats"].as_array().unwrap().len(), 4);
        assert_eq!(value["currentRound"], 2);
        assert_eq!(value["dealerIndex"], 1);
        assert_eq!(value["dealerStreak"], 0);
        assert_eq!(value["history"][0]["transactions"][0]["amount"], 1200);
    }

    #[test]
    fn test_missing_fields_default() {
        let state = SavedState::from_json("{}");

        assert!(state.players.is_empty());
        assert_eq!(state.seats, vec![None, None, None, None]);
        assert_eq!(state.current_round, 1);
        assert_eq!(state.dealer_index, 0);
        assert_eq!(state.dealer_streak, 0);
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_missing_origin_defaults_to_zero() {
        let state =
            SavedState::from_json(r#"{"players": [{"name": "Alice", "score": -300}]}"#);

        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].origin, 0);
        assert_eq!(state.players[0].score, -300);
    }

    #[test]
    fn test_malformed_field_recovered_independently() {
        // currentRound is garbage; the rest of the blob must survive.
        let blob = r#"{
            "players": [{"name": "Alice", "score": 5, "origin": 0}],
            "currentRound": "soon",
            "dealerIndex": 2
        }"#;
        let state = SavedState::from_json(blob);

        assert_eq!(state.current_round, 1);
        assert_eq!(state.dealer_index, 2);
        assert_eq!(state.players[0].name, "Alice");
    }

    #[test]
    fn test_unparseable_blob_starts_fresh() {
        let state = SavedState::from_json("not json at all");
        assert_eq!(state, SavedState::default());

        let ledger = Ledger::load_state("{{{{");
        assert_eq!(ledger, Ledger::new());
    }

    #[test]
    fn test_out_of_range_fields_normalized() {
        let blob = r#"{"currentRound": 0, "dealerIndex": 9, "seats": ["A", null]}"#;
        let state = SavedState::from_json(blob);

        assert_eq!(state.current_round, 1);
        assert_eq!(state.dealer_index, 0);
        assert_eq!(state.seats.len(), 4);
        assert_eq!(state.seats[0].as_deref(), Some("A"));
        assert_eq!(state.seats[2], None);
    }

    #[test]
    fn test_strict_decode_reports_malformed() {
        let err = SavedState::from_json_strict(r#"{"currentRound": "soon"}"#).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedState(_)));

        let ok = SavedState::from_json_strict(r#"{"currentRound": 4}"#).unwrap();
        assert_eq!(ok.current_round, 4);
    }
}
