//! uc-tui: Terminal front end for the Undercroft dungeon crawler.
//!
//! Draws the first-person wireframe view and the minimap from the scene
//! descriptions produced by `uc-core`, and maps key presses to session
//! commands. The whole UI is synchronous: one key event, one batch of
//! session mutations, one repaint.

pub mod app;
pub mod icons;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::App;
