//! warren-core: simulation core for the Warren Crawl dungeon game
//!
//! This crate contains all game logic with no I/O dependencies.
//! It is designed to be pure and testable.
//!
//! A front end owns a [`GameSession`], feeds player orders to
//! [`GameSession::act`], steps time with [`GameSession::frame`], and
//! drains [`GameSession::effects`] plus the combat log to draw.

pub mod ai;
pub mod behavior;
pub mod combat;
pub mod config;
pub mod effects;
pub mod entity;
pub mod geometry;
pub mod levelgen;
pub mod shop;
pub mod turn;

mod consts;
mod rng;
mod session;

pub use consts::*;
pub use rng::GameRng;
pub use session::{FrameOutcome, GameSession};
