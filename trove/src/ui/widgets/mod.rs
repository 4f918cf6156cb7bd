//! Widgets for the treasure-hunt TUI.

pub mod input;
pub mod log;
pub mod map;

pub use input::InputWidget;
pub use log::LogWidget;
pub use map::MapWidget;
