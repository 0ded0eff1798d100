//! UI widgets for the dungeon screen.

pub mod messages;
pub mod minimap;
pub mod status;
pub mod view;

pub use messages::MessagesWidget;
pub use minimap::MinimapWidget;
pub use status::StatusWidget;
pub use view::ViewWidget;
