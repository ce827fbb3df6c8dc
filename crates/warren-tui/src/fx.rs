//! Presentation state for drained simulation effects.
//!
//! The core queues effect descriptions; this module turns them into
//! live floaters and sparks that age out on their own. All randomness
//! here is cosmetic and runs on a private rng, never the session's.

use glam::Vec2;

use warren_core::GameRng;
use warren_core::effects::{Color, Effect, FloatingText, ParticleBurst};

/// A line of text drifting over the map.
#[derive(Debug, Clone)]
pub struct Floater {
    pub text: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub size: u16,
    pub age: f32,
    pub lifetime: f32,
}

/// One particle of a burst.
#[derive(Debug, Clone, Copy)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub gravity: Option<Vec2>,
    pub age: f32,
    pub lifetime: f32,
}

/// Live effects between frames.
#[derive(Debug)]
pub struct EffectsView {
    floaters: Vec<Floater>,
    sparks: Vec<Spark>,
    rng: GameRng,
}

impl EffectsView {
    pub fn new() -> Self {
        Self {
            floaters: Vec::new(),
            sparks: Vec::new(),
            rng: GameRng::from_entropy(),
        }
    }

    pub fn floaters(&self) -> &[Floater] {
        &self.floaters
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    /// Drain the session's pending effects into live ones.
    pub fn absorb(&mut self, pending: &mut Vec<Effect>) {
        for effect in pending.drain(..) {
            match effect {
                Effect::FloatingText(text) => self.spawn_floater(text),
                Effect::ParticleBurst(burst) => self.spawn_burst(burst),
            }
        }
    }

    fn spawn_floater(&mut self, text: FloatingText) {
        self.floaters.push(Floater {
            text: text.text,
            pos: text.pos,
            vel: text.vel,
            color: text.color,
            size: text.size,
            age: 0.0,
            lifetime: text.lifetime,
        });
    }

    fn spawn_burst(&mut self, burst: ParticleBurst) {
        let span = burst.max_sparks.saturating_sub(burst.min_sparks);
        let count = burst.min_sparks + self.rng.below(span + 1);
        for _ in 0..count {
            let angle = self
                .rng
                .float_range(burst.min_angle, burst.max_angle)
                .to_radians();
            let speed = self.rng.float_range(burst.min_speed, burst.max_speed);
            let lifetime = self.rng.float_range(0.3, burst.max_lifetime.max(0.3));
            let color = self.jittered(burst.color, burst.jitter);
            self.sparks.push(Spark {
                pos: burst.origin,
                vel: Vec2::from_angle(angle) * speed,
                color,
                gravity: burst.gravity,
                age: 0.0,
                lifetime,
            });
        }
    }

    fn jittered(&mut self, base: Color, jitter: (u8, u8, u8)) -> Color {
        let mut channel = |base: u8, jitter: u8| {
            let delta = self.rng.below(2 * jitter as u32 + 1) as i32 - jitter as i32;
            (base as i32 + delta).clamp(0, 255) as u8
        };
        Color(
            channel(base.0, jitter.0),
            channel(base.1, jitter.1),
            channel(base.2, jitter.2),
        )
    }

    /// Age everything by `dt` and drop what has expired.
    pub fn step(&mut self, dt: f32) {
        for floater in &mut self.floaters {
            let step = floater.vel * dt;
            floater.pos += step;
            floater.age += dt;
        }
        self.floaters.retain(|f| f.age < f.lifetime);

        for spark in &mut self.sparks {
            if let Some(gravity) = spark.gravity {
                // Gravity values are per-frame increments at a nominal 60 fps.
                spark.vel += gravity * (dt * 60.0);
            }
            let step = spark.vel * dt;
            spark.pos += step;
            spark.age += dt;
        }
        self.sparks.retain(|s| s.age < s.lifetime);
    }
}

impl Default for EffectsView {
    fn default() -> Self {
        Self::new()
    }
}
