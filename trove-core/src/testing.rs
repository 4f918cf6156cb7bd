//! Testing utilities for the expedition driver.
//!
//! `MockMap` resolves instantly with short fixed payloads and can be
//! scripted to fail at a given operation call, for deterministic driver
//! tests without wall-clock delays.

use crate::map::{MapError, TreasureMap};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A treasure map that resolves instantly and fails on cue.
pub struct MockMap {
    /// 0-based operation call index to fail at, if any.
    fail_at: Option<usize>,
    calls: AtomicUsize,
}

impl MockMap {
    /// A map where every operation succeeds.
    pub fn new() -> Self {
        Self {
            fail_at: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A map whose `call`-th operation (0-based) rejects.
    pub fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of operations invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self, text: String) -> Result<String, MapError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_at {
            Some(fail) if fail == call => Err(MapError::Failed(format!(
                "scripted failure at call {call}"
            ))),
            _ => Ok(text),
        }
    }
}

impl Default for MockMap {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TreasureMap for MockMap {
    async fn initial_clue(&self) -> Result<String, MapError> {
        self.next("clue".to_string())
    }

    async fn decode_script(&self, _clue: &str) -> Result<String, MapError> {
        self.next("location".to_string())
    }

    async fn search_location(&self, _location: &str) -> Result<String, MapError> {
        self.next("chest".to_string())
    }

    async fn solve_puzzle(&self, _item: &str) -> Result<String, MapError> {
        self.next("puzzle".to_string())
    }

    async fn find_key(&self, place: &str) -> Result<String, MapError> {
        self.next(format!("key from {place}"))
    }

    async fn combine_keys(&self, _keys: &[String; 3]) -> Result<String, MapError> {
        self.next("combined".to_string())
    }

    async fn open_container(&self) -> Result<String, MapError> {
        self.next("treasure".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_map_counts_calls() {
        let map = MockMap::new();
        map.initial_clue().await.unwrap();
        map.open_container().await.unwrap();
        assert_eq!(map.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_map_fails_on_cue() {
        let map = MockMap::failing_at(1);
        assert!(map.initial_clue().await.is_ok());
        assert!(map.decode_script("clue").await.is_err());
        // Later calls succeed again; only the scripted call rejects.
        assert!(map.open_container().await.is_ok());
    }
}
