//! Treasure-hunt narrative engine.
//!
//! This crate provides:
//! - The asynchronous story provider ([`TreasureMap`], [`ScriptedMap`])
//! - The expedition driver running the fixed nine-step plan
//! - Session persistence against a file-backed store
//! - Waypoint and path geometry for the map display
//!
//! # Quick Start
//!
//! ```ignore
//! use trove_core::{Expedition, ScriptedMap, StateStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = StateStore::new(".trove");
//!     let mut expedition = Expedition::new(ScriptedMap::new(), store).await?;
//!
//!     let welcome = expedition.login("Mara").await?;
//!     println!("{welcome}");
//!
//!     expedition.begin()?;
//!     while let Some(outcome) = expedition.advance().await? {
//!         println!("{}", outcome.message);
//!     }
//!     println!("{}", trove_core::VICTORY_MESSAGE);
//!     Ok(())
//! }
//! ```

pub mod expedition;
pub mod map;
pub mod notes;
pub mod path;
pub mod plan;
pub mod state;
pub mod store;
pub mod testing;

// Primary public API
pub use expedition::{
    Expedition, ExpeditionError, RunState, StepOutcome, CONSOLATION_MESSAGE, VICTORY_MESSAGE,
};
pub use map::{MapError, ScriptedMap, TreasureMap, STEP_DELAY};
pub use notes::{load_notes, NOTES_UNAVAILABLE};
pub use path::{segments, PathSegment, Waypoint, PATH_MARGIN};
pub use plan::{expedition_plan, Landmark, Step, StepAction, PLAN_LEN};
pub use state::{PlayerId, SessionState, DEFAULT_PLAYER_ID};
pub use store::{StateStore, StoreError};
