//! The treasure map: the set of asynchronous story operations the
//! expedition driver calls.
//!
//! Each operation resolves after a simulated latency with a line of story
//! text. The operations are stand-ins for slower real work; any
//! implementation honoring the same latency-bearing contract can be wired
//! in without changing callers.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Nominal latency of one scripted operation.
pub const STEP_DELAY: Duration = Duration::from_secs(1);

/// Errors from treasure map operations.
#[derive(Debug, Error)]
pub enum MapError {
    /// The operation could not produce its result.
    #[error("{0}")]
    Failed(String),
}

/// The narrative action provider.
#[async_trait]
pub trait TreasureMap: Send + Sync {
    /// Pick up the first clue.
    async fn initial_clue(&self) -> Result<String, MapError>;

    /// Decode the script found on the clue.
    async fn decode_script(&self, clue: &str) -> Result<String, MapError>;

    /// Search the location the decoded script points at.
    async fn search_location(&self, location: &str) -> Result<String, MapError>;

    /// Solve the puzzle sealing the found item.
    async fn solve_puzzle(&self, item: &str) -> Result<String, MapError>;

    /// Find a key at the named place.
    async fn find_key(&self, place: &str) -> Result<String, MapError>;

    /// Turn the three collected keys together.
    async fn combine_keys(&self, keys: &[String; 3]) -> Result<String, MapError>;

    /// Open the unlocked container.
    async fn open_container(&self) -> Result<String, MapError>;
}

/// Scripted operations resolving after a fixed delay with fixed text.
///
/// Always succeeds.
#[derive(Debug, Clone)]
pub struct ScriptedMap {
    delay: Duration,
}

impl ScriptedMap {
    pub fn new() -> Self {
        Self { delay: STEP_DELAY }
    }

    /// Override the simulated latency. Zero is useful for tests and fast
    /// headless runs.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn resolve(&self, text: impl Into<String>) -> Result<String, MapError> {
        tokio::time::sleep(self.delay).await;
        Ok(text.into())
    }
}

impl Default for ScriptedMap {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TreasureMap for ScriptedMap {
    async fn initial_clue(&self) -> Result<String, MapError> {
        self.resolve("You discover the first clue: an ancient symbol.")
            .await
    }

    async fn decode_script(&self, _clue: &str) -> Result<String, MapError> {
        self.resolve("The symbol is deciphered: it points to an abandoned temple.")
            .await
    }

    async fn search_location(&self, _location: &str) -> Result<String, MapError> {
        self.resolve("You find a hidden chest inside the temple.").await
    }

    async fn solve_puzzle(&self, _item: &str) -> Result<String, MapError> {
        self.resolve("The puzzle gives way and the chest creaks open.")
            .await
    }

    async fn find_key(&self, place: &str) -> Result<String, MapError> {
        self.resolve(format!("You found a key in the {place}.")).await
    }

    async fn combine_keys(&self, _keys: &[String; 3]) -> Result<String, MapError> {
        self.resolve("The three keys turn together and unlock the treasure chest.")
            .await
    }

    async fn open_container(&self) -> Result<String, MapError> {
        self.resolve("The chest opens, revealing gold and jewels!").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_map_resolves_with_fixed_text() {
        let map = ScriptedMap::new().with_delay(Duration::ZERO);

        let clue = map.initial_clue().await.unwrap();
        assert!(clue.contains("ancient symbol"));

        let key = map.find_key("north chamber").await.unwrap();
        assert_eq!(key, "You found a key in the north chamber.");
    }

    #[tokio::test]
    async fn test_scripted_map_threads_inputs_without_failing() {
        let map = ScriptedMap::new().with_delay(Duration::ZERO);
        let keys = [
            "key one".to_string(),
            "key two".to_string(),
            "key three".to_string(),
        ];

        assert!(map.decode_script("clue").await.is_ok());
        assert!(map.search_location("temple").await.is_ok());
        assert!(map.solve_puzzle("chest").await.is_ok());
        assert!(map.combine_keys(&keys).await.is_ok());
        assert!(map.open_container().await.is_ok());
    }
}
