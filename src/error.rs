// ⚠️ Error Kinds - One enum per failed precondition
// The core only signals WHICH precondition failed; the hosting layer
// decides user-visible presentation (blocking a button, flashing a field).

use std::fmt;

// ============================================================================
// LEDGER ERROR
// ============================================================================

/// Every failure the core can report. All variants are local and
/// recoverable: no operation leaves the ledger half-mutated on error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Adding a player name that already exists (or is blank after trimming)
    DuplicateName(String),

    /// Referencing a player name the registry does not hold
    NotFound(String),

    /// Settlement amount that is zero or negative
    InvalidAmount(i64),

    /// Settlement proposed without a paying player selected
    MissingFrom,

    /// Settlement proposed without a receiving player selected
    MissingTo,

    /// Undo requested with nothing recorded
    EmptyHistory,

    /// Persisted state blob of the wrong shape (strict decode path only;
    /// the lenient loader recovers field-by-field instead)
    MalformedState(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::DuplicateName(name) => {
                write!(f, "player name already taken or blank: '{}'", name)
            }
            LedgerError::NotFound(name) => write!(f, "unknown player: '{}'", name),
            LedgerError::InvalidAmount(amount) => {
                write!(f, "settlement amount must be positive, got {}", amount)
            }
            LedgerError::MissingFrom => write!(f, "no paying player selected"),
            LedgerError::MissingTo => write!(f, "no receiving player selected"),
            LedgerError::EmptyHistory => write!(f, "history is empty, nothing to undo"),
            LedgerError::MalformedState(detail) => {
                write!(f, "persisted state is malformed: {}", detail)
            }
        }
    }
}

impl std::error::Error for LedgerError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            LedgerError::DuplicateName("Alice".to_string()).to_string(),
            "player name already taken or blank: 'Alice'"
        );
        assert_eq!(
            LedgerError::InvalidAmount(-5).to_string(),
            "settlement amount must be positive, got -5"
        );
        assert_eq!(
            LedgerError::EmptyHistory.to_string(),
            "history is empty, nothing to undo"
        );
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error<E: std::error::Error>(_e: E) {}
        takes_error(LedgerError::MissingFrom);
    }
}
