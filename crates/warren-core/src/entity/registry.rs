//! The entity registry: spawn-ordered storage and board queries.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityId, EntityKind, Owner, PLAYER};
use crate::consts::CHEST_BOUNTY_DIE;
use crate::geometry::TilePos;
use crate::rng::GameRng;

/// Holds every live entity in spawn order. Lookups are linear scans;
/// the board never holds more than a few hundred entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: PLAYER.0,
        }
    }

    /// Spawn an entity of the given kind. Chests roll their bounty here;
    /// kinds with a health bar get one attached in the same call.
    pub fn spawn(&mut self, kind: EntityKind, pos: Vec2, rng: &mut GameRng) -> EntityId {
        let id = self.push(kind, pos, rng);
        if kind.has_health_bar() {
            let bar = self.push(EntityKind::HealthBar, pos, rng);
            if let Some(bar) = self.entity_mut(bar) {
                bar.owner = Some(Owner {
                    id,
                    kill_with_owner: true,
                    stick_to_owner: true,
                });
            }
        }
        id
    }

    fn push(&mut self, kind: EntityKind, pos: Vec2, rng: &mut GameRng) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let mut entity = Entity::new(id, kind, pos);
        if kind == EntityKind::Chest {
            entity.bounty = rng.die(CHEST_BOUNTY_DIE) as i32;
        }
        self.entities.push(entity);
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entity(id).is_some()
    }

    /// Remove an entity, keeping spawn order for the rest.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entity(PLAYER)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Snapshot of all ids in spawn order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    /// Snapshot of hostile ids in spawn order.
    pub fn hostile_ids(&self) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.kind.is_hostile())
            .map(|e| e.id)
            .collect()
    }

    pub fn hostile_count(&self) -> usize {
        self.entities.iter().filter(|e| e.kind.is_hostile()).count()
    }

    /// First wall on the tile, in spawn order.
    pub fn wall_at(&self, tile: TilePos) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|e| e.kind.is_wall() && e.tile() == tile)
            .map(|e| e.id)
    }

    /// First hostile on the tile, in spawn order.
    pub fn hostile_at(&self, tile: TilePos) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|e| e.kind.is_hostile() && e.tile() == tile)
            .map(|e| e.id)
    }

    /// First hostile on the tile other than `me`.
    pub fn other_hostile_at(&self, tile: TilePos, me: EntityId) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|e| e.id != me && e.kind.is_hostile() && e.tile() == tile)
            .map(|e| e.id)
    }

    pub fn shop_at(&self, tile: TilePos) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|e| e.kind == EntityKind::Shop && e.tile() == tile)
            .map(|e| e.id)
    }
}
