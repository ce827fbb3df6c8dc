//! Entity kinds and their spawn presets.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::behavior::BehaviorState;

/// Everything that can occupy the board. Kinds differ by stat preset and
/// classification, not by type: one flat [`super::Entity`] covers all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum EntityKind {
    Player,
    Wall,
    BorderWall,
    Shop,
    Chest,
    Rat,
    Serpent,
    Warden,
    Fireball,
    HealthBar,
}

/// Spawn-time stat block for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindPreset {
    pub attack: i32,
    pub defense: i32,
    pub hp: i32,
    pub hp_max: i32,
    pub bounty: i32,
    pub perception: i32,
    pub tiredness: i32,
    pub state: BehaviorState,
}

impl KindPreset {
    const fn inert(hp: i32) -> Self {
        Self {
            attack: 0,
            defense: 0,
            hp,
            hp_max: hp,
            bounty: 0,
            perception: 0,
            tiredness: 0,
            state: BehaviorState::Dormant,
        }
    }
}

impl EntityKind {
    /// Stats applied when an entity of this kind spawns.
    ///
    /// Rat and Serpent really do start below their hp_max; health bars
    /// show them wounded from the first frame.
    pub fn preset(self) -> KindPreset {
        match self {
            EntityKind::Player => KindPreset {
                attack: 7,
                defense: 5,
                hp: 200,
                hp_max: 200,
                bounty: 0,
                perception: 5,
                tiredness: 0,
                state: BehaviorState::Dormant,
            },
            EntityKind::Rat => KindPreset {
                attack: 8,
                defense: 3,
                hp: 30,
                hp_max: 200,
                bounty: 4,
                perception: 5,
                tiredness: 0,
                state: BehaviorState::Patrolling,
            },
            EntityKind::Serpent => KindPreset {
                attack: 5,
                defense: 2,
                hp: 50,
                hp_max: 200,
                bounty: 1,
                perception: 5,
                tiredness: 0,
                state: BehaviorState::Patrolling,
            },
            EntityKind::Warden => KindPreset {
                attack: 10,
                defense: 5,
                hp: 300,
                hp_max: 300,
                bounty: 20,
                perception: 15,
                tiredness: 0,
                state: BehaviorState::Aggressive,
            },
            // Chest bounty is rolled at spawn time.
            EntityKind::Chest => KindPreset {
                tiredness: 500,
                ..KindPreset::inert(1)
            },
            EntityKind::Wall => KindPreset::inert(1),
            EntityKind::BorderWall => KindPreset::inert(400),
            EntityKind::Shop => KindPreset::inert(100),
            EntityKind::Fireball => KindPreset::inert(1),
            EntityKind::HealthBar => KindPreset::inert(100),
        }
    }

    /// Monsters and chests: they block movement, get fought when bumped
    /// and must all die before a level counts as cleared.
    pub fn is_hostile(self) -> bool {
        matches!(
            self,
            EntityKind::Chest | EntityKind::Rat | EntityKind::Serpent | EntityKind::Warden
        )
    }

    /// Hostiles that actually take AI turns. Chests just sit there.
    pub fn takes_turns(self) -> bool {
        matches!(
            self,
            EntityKind::Rat | EntityKind::Serpent | EntityKind::Warden
        )
    }

    pub fn is_wall(self) -> bool {
        matches!(self, EntityKind::Wall | EntityKind::BorderWall)
    }

    /// Kinds that get a health bar attached at spawn.
    pub fn has_health_bar(self) -> bool {
        matches!(
            self,
            EntityKind::Player | EntityKind::Rat | EntityKind::Serpent | EntityKind::Warden
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_presets_sane() {
        for kind in EntityKind::iter() {
            let p = kind.preset();
            assert!(p.hp > 0, "{kind} must spawn alive");
            assert!(p.hp <= p.hp_max, "{kind} hp over hp_max");
            assert!(p.attack >= 0 && p.defense >= 0);
        }
    }

    #[test]
    fn test_wounded_spawns() {
        assert_eq!(EntityKind::Rat.preset().hp, 30);
        assert_eq!(EntityKind::Rat.preset().hp_max, 200);
        assert_eq!(EntityKind::Serpent.preset().hp, 50);
        assert_eq!(EntityKind::Serpent.preset().hp_max, 200);
    }

    #[test]
    fn test_warden_outclasses_lesser_monsters() {
        let warden = EntityKind::Warden.preset();
        assert!(warden.attack > EntityKind::Rat.preset().attack);
        assert!(warden.perception > EntityKind::Rat.preset().perception);
        assert_eq!(warden.state, BehaviorState::Aggressive);
    }

    #[test]
    fn test_classifications() {
        assert!(EntityKind::Chest.is_hostile());
        assert!(!EntityKind::Chest.takes_turns());
        assert!(EntityKind::Rat.takes_turns());
        assert!(!EntityKind::Player.is_hostile());
        assert!(EntityKind::BorderWall.is_wall());
        assert!(!EntityKind::Shop.is_wall());
        assert!(EntityKind::Player.has_health_bar());
        assert!(!EntityKind::Chest.has_health_bar());
        // Everything that takes turns is hostile.
        for kind in EntityKind::iter() {
            if kind.takes_turns() {
                assert!(kind.is_hostile());
            }
        }
    }
}
