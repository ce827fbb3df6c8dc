//! The game session: all simulation state and the per-frame update.
//!
//! A session is the single source of truth. Player orders go through
//! [`GameSession::act`]; everything time-driven (projectiles, lifetimes,
//! level progression) happens in [`GameSession::frame`], which the front
//! end calls once per rendered frame with the elapsed seconds.
//!
//! Serialization captures the full simulation state except the combat
//! log and the pending effect queue, which are presentation-only.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{ArenaConfig, ConfigError};
use crate::consts::{PLAYER_SPAWN_DEPTH, PLAYER_SPAWN_X, TILE_SIZE, WAVE_COLUMN, WAVE_TOP_DEPTH};
use crate::effects::{Color, CombatLog, Effect, FloatingText, ParticleBurst};
use crate::entity::{EntityId, EntityKind, Facing, Registry, PLAYER};
use crate::geometry::TilePos;
use crate::levelgen;
use crate::rng::GameRng;
use crate::shop::Inventory;
use crate::turn::{self, PlayerAction, TurnOutcome};

/// Result of one frame step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Running,
    PlayerDied,
}

/// Complete state of one dungeon run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub config: ArenaConfig,
    pub registry: Registry,
    pub rng: GameRng,
    pub level: u32,
    /// A warden wave has been sent for the current level.
    pub wave_spawned: bool,
    pub turn: u64,
    pub elapsed: f32,
    pub inventory: Inventory,
    #[serde(skip)]
    pub log: CombatLog,
    /// Effects spawned since the front end last drained them.
    #[serde(skip)]
    pub effects: Vec<Effect>,
}

impl GameSession {
    /// Start a run: validate the arena, drop the player in, build level 1.
    pub fn new(config: ArenaConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self {
            config,
            registry: Registry::new(),
            rng: GameRng::new(seed),
            level: 1,
            wave_spawned: false,
            turn: 0,
            elapsed: 0.0,
            inventory: Inventory::default(),
            log: CombatLog::new(),
            effects: Vec::new(),
        };
        let spawn = session.player_spawn();
        session
            .registry
            .spawn(EntityKind::Player, spawn.to_world(), &mut session.rng);
        levelgen::generate(&mut session);
        Ok(session)
    }

    /// Fixed spawn tile, pulled inside the border on small arenas.
    fn player_spawn(&self) -> TilePos {
        let tile = self.config.below_top(PLAYER_SPAWN_X, PLAYER_SPAWN_DEPTH);
        TilePos::new(
            tile.x.clamp(1, self.config.width - 2),
            tile.y.clamp(1, self.config.height - 2),
        )
    }

    /// Resolve one player order and the monster phase it triggers.
    pub fn act(&mut self, action: PlayerAction) -> TurnOutcome {
        turn::resolve(self, action)
    }

    /// Advance the continuous simulation by `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> FrameOutcome {
        self.elapsed += dt;
        self.sweep_fireballs();
        self.tick_entities(dt);
        self.face_player();
        self.advance_level();
        if self.registry.player().is_some() {
            FrameOutcome::Running
        } else {
            FrameOutcome::PlayerDied
        }
    }

    /// Remove an entity, crediting its bounty to the player.
    pub fn destroy(&mut self, id: EntityId) {
        let Some(dead) = self.registry.remove(id) else {
            return;
        };
        if dead.bounty > 0 {
            if let Some(player) = self.registry.entity_mut(PLAYER) {
                player.gold += dead.bounty;
                self.effects.push(Effect::FloatingText(FloatingText {
                    color: Color::GOLD,
                    lifetime: 5.0,
                    size: 33,
                    ..FloatingText::new(format!("{} gold", dead.bounty), dead.pos)
                }));
            }
        }
    }

    /// Fireballs burst on the first wall or hostile sharing their tile.
    /// Walls shrug the hit off; hostiles lose a single hitpoint.
    fn sweep_fireballs(&mut self) {
        let fireballs: Vec<(EntityId, Vec2, TilePos)> = self
            .registry
            .iter()
            .filter(|e| e.kind == EntityKind::Fireball)
            .map(|e| (e.id, e.pos, e.tile()))
            .collect();
        for (id, pos, tile) in fireballs {
            if self.registry.wall_at(tile).is_some() {
                self.effects
                    .push(Effect::ParticleBurst(ParticleBurst::new(pos)));
                self.destroy(id);
            } else if let Some(victim) = self.registry.hostile_at(tile) {
                self.effects
                    .push(Effect::ParticleBurst(ParticleBurst::new(pos)));
                self.destroy(id);
                if let Some(v) = self.registry.entity_mut(victim) {
                    v.hp -= 1;
                }
            }
        }
    }

    /// Lifecycle pass over every entity, in creation order: reap the
    /// dead, then either follow the owner or integrate motion.
    fn tick_entities(&mut self, dt: f32) {
        for id in self.registry.ids() {
            let Some(snapshot) = self.registry.entity(id) else {
                continue;
            };
            let owner = snapshot.owner;
            let mut dead = snapshot.hp <= 0
                || snapshot.max_age.is_some_and(|m| snapshot.age > m)
                || snapshot
                    .max_distance
                    .is_some_and(|m| snapshot.distance_traveled > m);
            if !dead {
                if let Some(o) = owner {
                    if o.kill_with_owner {
                        dead = self.registry.entity(o.id).is_none_or(|boss| boss.hp <= 0);
                    }
                }
            }
            if dead {
                self.destroy(id);
                continue;
            }
            let stick = owner
                .filter(|o| o.stick_to_owner)
                .and_then(|o| self.registry.entity(o.id))
                .map(|boss| (boss.pos, boss.facing));
            let Some(entity) = self.registry.entity_mut(id) else {
                continue;
            };
            if let Some((pos, facing)) = stick {
                entity.pos = pos;
                entity.facing = facing;
            } else {
                entity.pos += entity.vel * dt;
                entity.vel *= entity.friction;
                entity.distance_traveled += entity.vel.length() * dt;
                entity.age += dt;
            }
            if entity.hp > entity.hp_max {
                entity.hp = entity.hp_max;
            }
            // Border walls cannot be worn down between frames.
            if entity.kind == EntityKind::BorderWall {
                entity.hp = entity.hp_max;
            }
        }
    }

    /// Hostiles always turn to look at the player.
    fn face_player(&mut self) {
        let Some(px) = self.registry.player().map(|p| p.pos.x) else {
            return;
        };
        for e in self.registry.iter_mut() {
            if !e.kind.is_hostile() {
                continue;
            }
            if e.pos.x < px {
                e.facing = Facing::Right;
            } else if e.pos.x > px {
                e.facing = Facing::Left;
            }
        }
    }

    /// An empty board first summons a warden wave, one warden per level
    /// number; once those fall too, the level is done and the next one
    /// is generated.
    fn advance_level(&mut self) {
        if self.registry.hostile_count() > 0 {
            return;
        }
        if !self.wave_spawned {
            let depth_cap = self.config.height - 2;
            let column = WAVE_COLUMN.clamp(1, self.config.width - 2);
            for k in 0..self.level {
                let depth = (WAVE_TOP_DEPTH + k as i32).min(depth_cap);
                let tile = self.config.below_top(column, depth);
                self.registry
                    .spawn(EntityKind::Warden, tile.to_world(), &mut self.rng);
            }
            self.wave_spawned = true;
        } else {
            let pos = Vec2::new(self.config.width as f32 * TILE_SIZE / 2.0, 0.0);
            let color = Color::random(&mut self.rng);
            self.effects.push(Effect::FloatingText(FloatingText {
                vel: Vec2::new(0.0, 25.0),
                color,
                lifetime: 5.0,
                size: 128,
                ..FloatingText::new(format!("level {} cleared", self.level), pos)
            }));
            self.level += 1;
            levelgen::generate(self);
            self.wave_spawned = false;
        }
    }
}
