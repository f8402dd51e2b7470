// 🪑 Seating Assignment - 4 fixed slots mapped to player names
//
// Seats hold references to registry names, not copies. The engine does NOT
// enforce that a name occupies at most one seat: callers are expected to
// avoid it, but the surrounding UI's transient drag states may briefly
// violate it, so assignment stays permissive.

use crate::registry::PlayerRegistry;
use serde::{Deserialize, Serialize};

/// Number of table positions. Fixed for the 4-seat game.
pub const SEAT_COUNT: usize = 4;

// ============================================================================
// SEATING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seating {
    seats: [Option<String>; SEAT_COUNT],
}

impl Default for Seating {
    fn default() -> Self {
        Seating {
            seats: [None, None, None, None],
        }
    }
}

impl Seating {
    pub fn new() -> Self {
        Seating::default()
    }

    /// Assign `name` to seat `index`. Panics if `index >= SEAT_COUNT`
    /// (seat indices come from the fixed table layout, never user text).
    pub fn seat(&mut self, index: usize, name: &str) {
        self.seats[index] = Some(name.to_string());
    }

    /// Clear a seat back to empty.
    pub fn vacate(&mut self, index: usize) {
        self.seats[index] = None;
    }

    pub fn occupant(&self, index: usize) -> Option<&str> {
        self.seats[index].as_deref()
    }

    /// Non-empty assignments in seat order.
    pub fn active_occupants(&self) -> Vec<&str> {
        self.seats.iter().filter_map(|s| s.as_deref()).collect()
    }

    /// Registry players not currently present in any seat.
    pub fn unassigned_players<'a>(&self, registry: &'a PlayerRegistry) -> Vec<&'a str> {
        registry
            .players()
            .iter()
            .map(|p| p.name.as_str())
            .filter(|name| !self.seats.iter().any(|s| s.as_deref() == Some(*name)))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.seats.iter().all(|s| s.is_some())
    }

    pub fn has_empty_seat(&self) -> bool {
        !self.is_full()
    }

    pub fn slots(&self) -> &[Option<String>; SEAT_COUNT] {
        &self.seats
    }

    pub(crate) fn from_slots(slots: [Option<String>; SEAT_COUNT]) -> Self {
        Seating { seats: slots }
    }
}

// ============================================================================
// TESTS
// ============================================================================
