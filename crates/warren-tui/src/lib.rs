//! warren-tui: Terminal UI layer using ratatui
//!
//! Renders a [`warren_core::GameSession`] and maps key events to
//! player orders.

pub mod app;
pub mod fx;
pub mod input;
pub mod theme;
pub mod widgets;

pub use app::{App, MenuKind, MenuPage, MenuState, UiMode};
pub use theme::Theme;
