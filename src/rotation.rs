// 🀄 Dealer Rotation State Machine
//
// The state is just the (round, dealer seat, streak) tuple. Three
// transition families:
//   - designating a dealer seat while the table is full is a played hand:
//     same seat extends the streak, a new seat resets it, and either way
//     the round advances;
//   - designating a dealer while any seat is empty is a setup action:
//     the seat and streak change but the round does not;
//   - a simple advance rotates to the next seat and starts a new round.
//
// The machine never blocks: the "round has no settlement yet" check lives
// on the history ledger and is a soft warning for the hosting layer.

use crate::seating::SEAT_COUNT;
use log::debug;
use serde::{Deserialize, Serialize};

// ============================================================================
// ROTATION STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    /// Current round, starts at 1
    pub round: u32,

    /// Seat currently holding deal privilege (0..3), starts at 0
    pub dealer_seat: usize,

    /// Consecutive rounds the current dealer seat retained dealership
    pub dealer_streak: u32,
}

impl Default for RotationState {
    fn default() -> Self {
        RotationState {
            round: 1,
            dealer_seat: 0,
            dealer_streak: 0,
        }
    }
}

impl RotationState {
    pub fn new() -> Self {
        RotationState::default()
    }

    /// Designate `seat` as dealer. `table_full` decides whether this is a
    /// played hand (round advances) or a setup action (round unchanged).
    pub fn designate_dealer(&mut self, seat: usize, table_full: bool) {
        debug_assert!(seat < SEAT_COUNT);

        if !table_full {
            // Setup action before the table is full: move the dealer
            // marker, nothing else.
            self.dealer_seat = seat;
            self.dealer_streak = 0;
            debug!("dealer set to seat {} (table not full, round held)", seat);
            return;
        }

        if seat == self.dealer_seat {
            // Reconfirmation: dealer keeps the seat for another hand.
            self.dealer_streak += 1;
        } else {
            self.dealer_seat = seat;
            self.dealer_streak = 0;
        }
        self.round += 1;
        debug!(
            "round {} begins, dealer seat {} (streak {})",
            self.round, self.dealer_seat, self.dealer_streak
        );
    }

    /// Rotate dealership to the next seat and start a new round.
    pub fn advance(&mut self) {
        self.dealer_seat = (self.dealer_seat + 1) % SEAT_COUNT;
        self.dealer_streak = 0;
        self.round += 1;
        debug!(
            "round {} begins, dealer rotated to seat {}",
            self.round, self.dealer_seat
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = RotationState::new();

        assert_eq!(state.round, 1);
        assert_eq!(state.dealer_seat, 0);
        assert_eq!(state.dealer_streak, 0);
    }

    #[test]
    fn test_dealer_change_resets_streak() {
        let mut state = RotationState {
            round: 1,
            dealer_seat: 0,
            dealer_streak: 2,
        };

        state.designate_dealer(2, true);

        assert_eq!(state.round, 2);
        assert_eq!(state.dealer_seat, 2);
        assert_eq!(state.dealer_streak, 0);
    }

    #[test]
    fn test_reconfirmation_extends_streak_and_advances_round() {
        let mut state = RotationState {
            round: 5,
            dealer_seat: 1,
            dealer_streak: 0,
        };

        state.designate_dealer(1, true);
        assert_eq!(state.round, 6);
        assert_eq!(state.dealer_seat, 1);
        assert_eq!(state.dealer_streak, 1);

        state.designate_dealer(1, true);
        assert_eq!(state.round, 7);
        assert_eq!(state.dealer_streak, 2);
    }

    #[test]
    fn test_designation_with_empty_seat_holds_round() {
        let mut state = RotationState {
            round: 3,
            dealer_seat: 0,
            dealer_streak: 2,
        };

        state.designate_dealer(2, false);

        assert_eq!(state.round, 3);
        assert_eq!(state.dealer_seat, 2);
        assert_eq!(state.dealer_streak, 0);
    }

    #[test]
    fn test_simple_advance() {
        let mut state = RotationState {
            round: 1,
            dealer_seat: 1,
            dealer_streak: 3,
        };

        state.advance();

        assert_eq!(state.round, 2);
        assert_eq!(state.dealer_seat, 2);
        assert_eq!(state.dealer_streak, 0);
    }

    #[test]
    fn test_simple_advance_wraps() {
        let mut state = RotationState {
            round: 4,
            dealer_seat: 3,
            dealer_streak: 1,
        };

        state.advance();

        assert_eq!(state.dealer_seat, 0);
        assert_eq!(state.round, 5);
        assert_eq!(state.dealer_streak, 0);
    }

    #[test]
    fn test_machine_runs_indefinitely() {
        let mut state = RotationState::new();
        for _ in 0..16 {
            state.advance();
        }

        assert_eq!(state.round, 17);
        assert_eq!(state.dealer_seat, 0);
    }
}
