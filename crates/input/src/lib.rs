//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. The mapping
//! depends on the [`crate::types::InputMode`] of the screen on display:
//! while a text field has focus, letters and digits are text.

pub mod map;

pub use eco_quest_types as types;

pub use map::{handle_key_event, should_quit};
