// 👤 Player Registry - Names, balances, origin offsets
//
// A player's `score` is the net of all settlements and always sums to zero
// across the registry. `origin` is a manually-set display baseline: it is
// added on top of `score` for presentation only and never participates in
// the zero-sum invariant.

use crate::error::LedgerError;
use serde::{Deserialize, Serialize};

// ============================================================================
// PLAYER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique within the registry, immutable once created
    pub name: String,

    /// Net of all settlements, starts at 0
    pub score: i64,

    /// Display-only baseline added to `score` for presentation
    #[serde(default)]
    pub origin: i64,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            score: 0,
            origin: 0,
        }
    }

    /// Score as shown to the table: raw score plus origin baseline
    pub fn display_score(&self) -> i64 {
        self.score + self.origin
    }
}

// ============================================================================
// PLAYER REGISTRY
// ============================================================================

/// Owns all player identities. Players are never deleted; scores are
/// mutated only through settlement and undo on the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRegistry {
    players: Vec<Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        PlayerRegistry {
            players: Vec::new(),
        }
    }

    /// Register a new player. Rejects blank names (after trimming) and
    /// names that already exist.
    pub fn add_player(&mut self, name: &str) -> Result<(), LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::DuplicateName(name.to_string()));
        }
        if self.contains(name) {
            return Err(LedgerError::DuplicateName(name.to_string()));
        }
        self.players.push(Player::new(name));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Raw score only (no origin). Errors for unknown names.
    pub fn raw_score(&self, name: &str) -> Result<i64, LedgerError> {
        self.get(name)
            .map(|p| p.score)
            .ok_or_else(|| LedgerError::NotFound(name.to_string()))
    }

    /// Raw score with a 0 fallback for unknown names (reporting contexts)
    pub fn raw_score_or_zero(&self, name: &str) -> i64 {
        self.get(name).map(|p| p.score).unwrap_or(0)
    }

    /// Score + origin. Errors for unknown names.
    pub fn display_score(&self, name: &str) -> Result<i64, LedgerError> {
        self.get(name)
            .map(|p| p.display_score())
            .ok_or_else(|| LedgerError::NotFound(name.to_string()))
    }

    /// Score + origin with a 0 fallback for unknown names
    pub fn display_score_or_zero(&self, name: &str) -> i64 {
        self.get(name).map(|p| p.display_score()).unwrap_or(0)
    }

    /// Overwrite a player's origin baseline. No validation beyond the name
    /// existing; does not affect `score` or the zero-sum invariant.
    pub fn set_origin(&mut self, name: &str, value: i64) -> Result<(), LedgerError> {
        let player = self
            .get_mut(name)
            .ok_or_else(|| LedgerError::NotFound(name.to_string()))?;
        player.origin = value;
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Sum of raw scores across the registry. Zero after any sequence of
    /// valid settlements and undos.
    pub fn total_raw(&self) -> i64 {
        self.players.iter().map(|p| p.score).sum()
    }

    pub(crate) fn from_players(players: Vec<Player>) -> Self {
        PlayerRegistry { players }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_player() {
        let mut registry = PlayerRegistry::new();
        registry.add_player("Alice").unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.raw_score("Alice").unwrap(), 0);
        assert_eq!(registry.display_score("Alice").unwrap(), 0);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = PlayerRegistry::new();
        registry.add_player("Alice").unwrap();

        let err = registry.add_player("Alice").unwrap_err();
        assert_eq!(err, LedgerError::DuplicateName("Alice".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut registry = PlayerRegistry::new();

        assert!(registry.add_player("").is_err());
        assert!(registry.add_player("   ").is_err());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_name_trimmed_before_checks() {
        let mut registry = PlayerRegistry::new();
        registry.add_player("  Bob  ").unwrap();

        assert!(registry.contains("Bob"));
        assert!(registry.add_player("Bob").is_err());
    }

    #[test]
    fn test_origin_offsets_display_only() {
        let mut registry = PlayerRegistry::new();
        registry.add_player("Alice").unwrap();
        registry.set_origin("Alice", 25000).unwrap();

        assert_eq!(registry.raw_score("Alice").unwrap(), 0);
        assert_eq!(registry.display_score("Alice").unwrap(), 25000);
        // Origin is excluded from the zero-sum quantity
        assert_eq!(registry.total_raw(), 0);
    }

    #[test]
    fn test_set_origin_unknown_player() {
        let mut registry = PlayerRegistry::new();
        let err = registry.set_origin("Ghost", 100).unwrap_err();
        assert_eq!(err, LedgerError::NotFound("Ghost".to_string()));
    }

    #[test]
    fn test_unknown_name_fallbacks() {
        let registry = PlayerRegistry::new();

        assert!(registry.raw_score("Ghost").is_err());
        assert_eq!(registry.raw_score_or_zero("Ghost"), 0);
        assert_eq!(registry.display_score_or_zero("Ghost"), 0);
    }
}
