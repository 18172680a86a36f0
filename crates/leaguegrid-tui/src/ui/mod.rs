//! Terminal UI module using ratatui.
//!
//! - `render`: Main frame rendering and layout
//! - `input`: Keyboard event handling
//! - `grid`: Responsive card grid geometry
//! - `cards`: League and placeholder cards
//! - `styles`: Color schemes and text styling

pub mod cards;
pub mod grid;
pub mod input;
pub mod render;
pub mod styles;
