//! Outbound visual effects and the combat log.
//!
//! The simulation never draws anything. It appends effect descriptors and
//! colored log lines; the front end drains both each frame and owns the
//! animation, expiry and layout of whatever it makes of them.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::LOG_CAPACITY;
use crate::rng::GameRng;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const DAMAGE: Color = Color(200, 0, 0);
    pub const MISS: Color = Color(20, 20, 20);
    pub const GOLD: Color = Color(255, 255, 0);
    pub const STRIKE: Color = Color(0, 255, 0);
    pub const RIPOSTE: Color = Color(0, 200, 0);
    pub const SPARK: Color = Color(255, 225, 0);
    pub const RUBBLE: Color = Color(139, 105, 20);
    pub const BORDER: Color = Color(255, 50, 50);
    pub const TOMATO: Color = Color(0, 220, 0);

    /// Uniformly random color, used by decorative floaters.
    pub fn random(rng: &mut GameRng) -> Self {
        Color(
            rng.below(256) as u8,
            rng.below(256) as u8,
            rng.below(256) as u8,
        )
    }
}

/// A piece of text that drifts across the board and fades out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub lifetime: f32,
    pub size: u16,
}

impl FloatingText {
    /// Default floater: white, size 22, drifting slowly north for 2 seconds.
    pub fn new(text: impl Into<String>, pos: Vec2) -> Self {
        Self {
            text: text.into(),
            pos,
            vel: Vec2::new(0.0, 5.0),
            color: Color::WHITE,
            lifetime: 2.0,
            size: 22,
        }
    }
}

/// A one-shot shower of sparks. Each spark picks its own angle (degrees,
/// counterclockwise from east), speed, lifetime and jittered color from
/// these ranges; that sampling belongs to the front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub origin: Vec2,
    pub min_angle: f32,
    pub max_angle: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_sparks: u32,
    pub max_sparks: u32,
    pub color: Color,
    pub jitter: (u8, u8, u8),
    pub gravity: Option<Vec2>,
    pub max_lifetime: f32,
}

impl ParticleBurst {
    /// Default burst: a full-circle yellow spray.
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            min_angle: 0.0,
            max_angle: 360.0,
            min_speed: 5.0,
            max_speed: 150.0,
            min_sparks: 5,
            max_sparks: 20,
            color: Color::SPARK,
            jitter: (0, 25, 0),
            gravity: None,
            max_lifetime: 3.0,
        }
    }
}

/// One outbound visual command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    FloatingText(FloatingText),
    ParticleBurst(ParticleBurst),
}

/// A colored line of combat narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogLine {
    pub color: Color,
    pub text: String,
}

/// Bounded scrollback of combat messages. Oldest lines fall off the front.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatLog {
    lines: VecDeque<LogLine>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, color: Color, text: impl Into<String>) {
        if self.lines.len() == LOG_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(LogLine {
            color,
            text: text.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &LogLine> {
        self.lines.iter()
    }

    /// The most recent `n` lines, oldest of those first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &LogLine> {
        self.lines.iter().skip(self.lines.len().saturating_sub(n))
    }
}
