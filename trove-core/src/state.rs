//! Session state: the persisted record of player identity and narrative
//! history.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a fresh player profile.
pub const DEFAULT_PLAYER_ID: &str = "123456";

/// Opaque player identifier.
///
/// Never generated or validated; a fresh profile carries
/// [`DEFAULT_PLAYER_ID`] until something external assigns another one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self(DEFAULT_PLAYER_ID.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The whole persisted session record.
///
/// History only grows by appending during an active run, and is cleared
/// wholesale on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub player_id: PlayerId,
    pub player_name: String,
    pub history: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = SessionState::default();
        assert_eq!(state.player_id.as_str(), DEFAULT_PLAYER_ID);
        assert!(state.player_name.is_empty());
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_serde_roundtrip() {
        let state = SessionState {
            player_id: PlayerId("abc".to_string()),
            player_name: "Mara".to_string(),
            history: vec!["first clue".to_string()],
        };

        let json = serde_json::to_string(&state).unwrap();
        let restored: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
