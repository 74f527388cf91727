//! Terminal rendering for the arcade.
//!
//! Screens are drawn into a plain framebuffer (no widget toolkit) and flushed
//! as a diff, so a frame only costs the cells that changed.
//!
//! - [`fb`]: cells, styles and wide-glyph aware text placement
//! - [`app_view`]: maps [`engine::App`] state into a framebuffer
//! - [`renderer`]: crossterm backend

pub mod app_view;
pub mod fb;
pub mod renderer;
pub mod theme;

pub use eco_quest_core as core;
pub use eco_quest_engine as engine;
pub use eco_quest_profile as profile;
pub use eco_quest_types as types;

pub use app_view::{AppView, Viewport};
pub use fb::{char_width, str_width, Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
