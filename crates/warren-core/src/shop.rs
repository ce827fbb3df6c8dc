//! The shop: catalog, price parsing and transactions.
//!
//! Catalog labels carry their price in trailing parentheses, and that
//! label string doubles as the inventory key. A label that fails to
//! parse is simply not transactable; nothing crashes over it.

use glam::Vec2;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;
use crate::effects::{Color, Effect, FloatingText, ParticleBurst};
use crate::entity::PLAYER;
use crate::session::GameSession;

/// Everything the shop sells.
pub const CATALOG: [&str; 6] = [
    "wooden sword (10)",
    "old shield (15)",
    "ring mail (55)",
    "small health potion (1)",
    "medium health potion (5)",
    "big health potion (10)",
];

/// Price from a "name (N)" label. None for anything malformed.
pub fn parse_price(label: &str) -> Option<u32> {
    let open = label.find('(')?;
    let inner = label[open + 1..].strip_suffix(')')?;
    inner.parse().ok()
}

/// Healing granted by using this item. None for gear and junk.
pub fn heal_amount(label: &str) -> Option<i32> {
    if !label.contains("health potion") {
        return None;
    }
    if label.contains("small") {
        Some(10)
    } else if label.contains("medium") {
        Some(50)
    } else if label.contains("big") {
        Some(100)
    } else {
        None
    }
}

/// What the player carries, keyed by catalog label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    items: HashMap<String, u32>,
}

impl Inventory {
    pub fn add(&mut self, label: &str) {
        *self.items.entry(label.to_string()).or_insert(0) += 1;
    }

    /// Take one out. False if none were held.
    pub fn remove(&mut self, label: &str) -> bool {
        match self.items.get_mut(label) {
            Some(n) if *n > 1 => {
                *n -= 1;
                true
            }
            Some(_) => {
                self.items.remove(label);
                true
            }
            None => false,
        }
    }

    pub fn count(&self, label: &str) -> u32 {
        self.items.get(label).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Held labels, sorted for stable display.
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.items.keys().cloned().collect();
        labels.sort();
        labels
    }

    /// Held potion labels, sorted.
    pub fn usable_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .items
            .keys()
            .filter(|l| heal_amount(l).is_some())
            .cloned()
            .collect();
        labels.sort();
        labels
    }
}

/// Buy one of `label`. Fails softly on malformed labels and floats a
/// complaint over the player when the purse is short.
pub fn buy(session: &mut GameSession, label: &str) -> bool {
    let Some(price) = parse_price(label) else {
        return false;
    };
    let Some(player) = session.registry.entity_mut(PLAYER) else {
        return false;
    };
    if player.gold < price as i32 {
        let (have, pos) = (player.gold, player.pos);
        let color = Color::random(&mut session.rng);
        session.effects.push(Effect::FloatingText(FloatingText {
            text: format!("not enough gold. You have {have}, you need {price}"),
            pos,
            vel: Vec2::new(0.0, 5.0),
            color,
            lifetime: 2.0,
            size: 22,
        }));
        return false;
    }
    player.gold -= price as i32;
    session.inventory.add(label);
    true
}

/// Sell one of `label` back at full price.
pub fn sell(session: &mut GameSession, label: &str) -> bool {
    let Some(price) = parse_price(label) else {
        return false;
    };
    if !session.inventory.remove(label) {
        return false;
    }
    if let Some(player) = session.registry.entity_mut(PLAYER) {
        player.gold += price as i32;
    }
    true
}

/// Drink a held potion. The overshoot past hp_max survives only until
/// the next frame tick clamps it.
pub fn use_item(session: &mut GameSession, label: &str) -> bool {
    let Some(heal) = heal_amount(label) else {
        return false;
    };
    if !session.inventory.remove(label) {
        return false;
    }
    if let Some(player) = session.registry.entity_mut(PLAYER) {
        player.hp += heal;
    }
    true
}

/// The "earn money" menu's gardening option: a green fountain at a random
/// spot along the bottom edge, and not a single coin.
pub fn plant_tomatoes(session: &mut GameSession) {
    let span = session.config.width as f32 * TILE_SIZE;
    let x = session.rng.float_range(0.0, span);
    session.effects.push(Effect::ParticleBurst(ParticleBurst {
        min_angle: 70.0,
        max_angle: 110.0,
        max_speed: 250.0,
        color: Color::TOMATO,
        gravity: Some(Vec2::new(0.0, -5.0)),
        max_lifetime: 5.0,
        ..ParticleBurst::new(Vec2::new(x, 5.0))
    }));
}
