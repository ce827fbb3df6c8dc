//! Entities: the one flat struct behind everything on the board.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::behavior::BehaviorState;
use crate::consts::ATTACK_FLASH_SECS;
use crate::geometry::{TilePos, tile_of};

mod kind;
mod registry;

pub use kind::{EntityKind, KindPreset};
pub use registry::Registry;

/// Unique identifier for entities. Ids are handed out in spawn order and
/// never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// The player's id. The first spawn of every session is the player.
pub const PLAYER: EntityId = EntityId(1);

/// Which way a sprite faces. Drives fireball direction and wall placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Tile step toward the faced side.
    pub fn step(self) -> (i32, i32) {
        match self {
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }
}

/// Weak link to another entity. The owner is looked up by id every time;
/// a vanished owner is simply "gone", never a dangling reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: EntityId,
    /// Destroy this entity when the owner is missing or dead.
    pub kill_with_owner: bool,
    /// Snap to the owner's position and facing every tick.
    pub stick_to_owner: bool,
}

/// One thing on the board. Kinds share this struct; unused fields keep
/// their inert defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,

    pub pos: Vec2,
    pub vel: Vec2,
    pub angle: f32,
    pub mass: f32,
    pub radius: f32,
    /// Velocity multiplier per tick. 1.0 means no decay.
    pub friction: f32,

    pub hp: i32,
    pub hp_max: i32,
    pub attack: i32,
    pub defense: i32,

    pub age: f32,
    pub max_age: Option<f32>,
    pub distance_traveled: f32,
    pub max_distance: Option<f32>,

    pub owner: Option<Owner>,
    /// Gold credited to the player when this entity dies.
    pub bounty: i32,
    /// The purse. Only meaningful on the player.
    pub gold: i32,

    pub state: BehaviorState,
    /// Chase radius in whole tiles.
    pub perception: i32,
    pub tiredness: i32,
    pub facing: Facing,
    /// Holds the striking pose while age is below this.
    pub attack_until: f32,
}

impl Entity {
    /// A fresh entity of the given kind with its preset applied.
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2) -> Self {
        let preset = kind.preset();
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            mass: 10.0,
            radius: 5.0,
            friction: 1.0,
            hp: preset.hp,
            hp_max: preset.hp_max,
            attack: preset.attack,
            defense: preset.defense,
            age: 0.0,
            max_age: None,
            distance_traveled: 0.0,
            max_distance: None,
            owner: None,
            bounty: preset.bounty,
            gold: 0,
            state: preset.state,
            perception: preset.perception,
            tiredness: preset.tiredness,
            facing: Facing::Right,
            attack_until: 0.0,
        }
    }

    /// The tile this entity currently occupies.
    pub fn tile(&self) -> TilePos {
        tile_of(self.pos)
    }

    /// Begin the striking pose.
    pub fn start_attack_flash(&mut self) {
        self.attack_until = self.age + ATTACK_FLASH_SECS;
    }

    /// True while the striking pose is held.
    pub fn striking(&self) -> bool {
        self.age < self.attack_until
    }

    /// Remaining hp as a fraction of hp_max. Can exceed 1.0 transiently
    /// between a potion and the next tick's clamp.
    pub fn hp_fraction(&self) -> f32 {
        if self.hp_max <= 0 {
            return 0.0;
        }
        self.hp as f32 / self.hp_max as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_preset() {
        let e = Entity::new(EntityId(5), EntityKind::Warden, Vec2::new(100.0, 50.0));
        assert_eq!(e.attack, 10);
        assert_eq!(e.hp, 300);
        assert_eq!(e.state, BehaviorState::Aggressive);
        assert_eq!(e.tile(), TilePos::new(2, 1));
    }

    #[test]
    fn test_generic_defaults() {
        let e = Entity::new(EntityId(1), EntityKind::Player, Vec2::ZERO);
        assert_eq!(e.vel, Vec2::ZERO);
        assert_eq!(e.friction, 1.0);
        assert_eq!(e.mass, 10.0);
        assert_eq!(e.radius, 5.0);
        assert_eq!(e.angle, 0.0);
        assert!(e.max_age.is_none());
        assert!(e.max_distance.is_none());
        assert!(e.owner.is_none());
        assert_eq!(e.gold, 0);
        assert_eq!(e.facing, Facing::Right);
    }

    #[test]
    fn test_attack_flash_window() {
        let mut e = Entity::new(EntityId(2), EntityKind::Rat, Vec2::ZERO);
        assert!(!e.striking());
        e.start_attack_flash();
        assert!(e.striking());
        e.age += ATTACK_FLASH_SECS + 0.01;
        assert!(!e.striking());
    }

    #[test]
    fn test_hp_fraction() {
        let mut e = Entity::new(EntityId(3), EntityKind::Rat, Vec2::ZERO);
        assert!((e.hp_fraction() - 0.15).abs() < 1e-6);
        e.hp_max = 0;
        assert_eq!(e.hp_fraction(), 0.0);
    }

    #[test]
    fn test_facing_steps() {
        assert_eq!(Facing::Left.step(), (-1, 0));
        assert_eq!(Facing::Right.step(), (1, 0));
    }
}
