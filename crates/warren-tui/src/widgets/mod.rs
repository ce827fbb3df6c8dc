//! UI Widgets

mod log;
mod map;
mod menu;
mod overlay;
mod status;

pub use log::LogWidget;
pub use map::MapWidget;
pub use menu::MenuWidget;
pub use overlay::FxOverlay;
pub use status::StatusWidget;
