//! Level generation.
//!
//! Each level is rebuilt in place: tear out the old architecture, ring
//! the arena with border walls, drop a shop, then scatter walls, chests
//! and monsters tile by tile. A final pass knocks out any wall that
//! landed under a creature so nobody starts entombed.

use hashbrown::{HashMap, HashSet};

use crate::consts::{CHEST_CHANCE, MONSTER_CHANCE, WALL_CHANCE};
use crate::entity::{EntityId, EntityKind};
use crate::geometry::TilePos;
use crate::session::GameSession;

/// Hostiles seeded per level. Rats outnumber serpents three to one.
const MONSTER_POOL: [EntityKind; 4] = [
    EntityKind::Rat,
    EntityKind::Rat,
    EntityKind::Rat,
    EntityKind::Serpent,
];

/// Rebuild the arena around whatever creatures are already in it.
pub fn generate(session: &mut GameSession) {
    clear_architecture(session);

    let (w, h) = (session.config.width, session.config.height);
    for x in 0..w {
        for y in 0..h {
            let tile = TilePos::new(x, y);
            if session.config.is_border(tile) {
                session
                    .registry
                    .spawn(EntityKind::BorderWall, tile.to_world(), &mut session.rng);
            }
        }
    }

    let shop = TilePos::new(
        1 + session.rng.below((w - 2) as u32) as i32,
        1 + session.rng.below((h - 2) as u32) as i32,
    );
    session
        .registry
        .spawn(EntityKind::Shop, shop.to_world(), &mut session.rng);

    let mut wall_index: HashMap<TilePos, EntityId> = HashMap::new();
    for x in 1..w - 1 {
        for y in 1..h - 1 {
            let tile = TilePos::new(x, y);
            if tile == shop {
                continue;
            }
            if session.rng.percent(WALL_CHANCE) {
                let id = session
                    .registry
                    .spawn(EntityKind::Wall, tile.to_world(), &mut session.rng);
                wall_index.insert(tile, id);
            }
        }
    }

    let mut chest_tiles: HashSet<TilePos> = HashSet::new();
    for x in 1..w - 1 {
        for y in 1..h - 1 {
            let tile = TilePos::new(x, y);
            if tile == shop || wall_index.contains_key(&tile) {
                continue;
            }
            if session.rng.percent(CHEST_CHANCE) {
                session
                    .registry
                    .spawn(EntityKind::Chest, tile.to_world(), &mut session.rng);
                chest_tiles.insert(tile);
            }
        }
    }

    // The shop bump always opens the shop, so nothing fightable may
    // share its tile.
    let player_tile = session.registry.player().map(|p| p.tile());
    for x in 1..w - 1 {
        for y in 1..h - 1 {
            let tile = TilePos::new(x, y);
            if tile == shop
                || Some(tile) == player_tile
                || wall_index.contains_key(&tile)
                || chest_tiles.contains(&tile)
            {
                continue;
            }
            if session.rng.percent(MONSTER_CHANCE) {
                let kind = *session.rng.choose(&MONSTER_POOL).unwrap_or(&EntityKind::Rat);
                session.registry.spawn(kind, tile.to_world(), &mut session.rng);
            }
        }
    }

    // Free anyone the wall pass boxed in.
    let mut occupied: Vec<TilePos> = session
        .registry
        .iter()
        .filter(|e| e.kind == EntityKind::Player || e.kind.is_hostile())
        .map(|e| e.tile())
        .collect();
    occupied.dedup();
    for tile in occupied {
        if let Some(id) = wall_index.remove(&tile) {
            session.registry.remove(id);
        }
    }
}

/// Remove all walls and the shop, leaving creatures in place.
fn clear_architecture(session: &mut GameSession) {
    let stale: Vec<EntityId> = session
        .registry
        .iter()
        .filter(|e| e.kind.is_wall() || e.kind == EntityKind::Shop)
        .map(|e| e.id)
        .collect();
    for id in stale {
        session.registry.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;
    use crate::entity::PLAYER;

    fn fresh(seed: u64) -> GameSession {
        GameSession::new(ArenaConfig::default(), seed).expect("valid config")
    }

    #[test]
    fn test_border_is_complete() {
        let s = fresh(1);
        let (w, h) = (s.config.width, s.config.height);
        for x in 0..w {
            for y in 0..h {
                let tile = TilePos::new(x, y);
                if s.config.is_border(tile) {
                    let id = s.registry.wall_at(tile).expect("border tile walled");
                    let e = s.registry.entity(id).expect("wall exists");
                    assert_eq!(e.kind, EntityKind::BorderWall);
                }
            }
        }
    }

    #[test]
    fn test_exactly_one_shop_in_interior() {
        let s = fresh(2);
        let shops: Vec<&crate::entity::Entity> = s
            .registry
            .iter()
            .filter(|e| e.kind == EntityKind::Shop)
            .collect();
        assert_eq!(shops.len(), 1);
        assert!(s.config.is_interior(shops[0].tile()));
    }

    #[test]
    fn test_no_wall_under_shop_or_creatures() {
        for seed in 0..20 {
            let s = fresh(seed);
            for e in s.registry.iter() {
                let blocking = match e.kind {
                    EntityKind::Shop | EntityKind::Player => true,
                    k => k.is_hostile(),
                };
                if !blocking {
                    continue;
                }
                if let Some(id) = s.registry.wall_at(e.tile()) {
                    let wall = s.registry.entity(id).expect("wall exists");
                    assert_ne!(
                        wall.kind,
                        EntityKind::Wall,
                        "seed {seed}: interior wall under {:?} at {:?}",
                        e.kind,
                        e.tile()
                    );
                }
            }
        }
    }

    #[test]
    fn test_shop_tile_stays_clear() {
        for seed in 0..20 {
            let s = fresh(seed);
            let shop = s
                .registry
                .iter()
                .find(|e| e.kind == EntityKind::Shop)
                .expect("shop")
                .tile();
            assert!(s.registry.wall_at(shop).is_none(), "seed {seed}");
            assert!(s.registry.hostile_at(shop).is_none(), "seed {seed}");
        }
    }

    #[test]
    fn test_player_survives_regeneration() {
        let mut s = fresh(3);
        let gold_before = {
            let p = s.registry.entity_mut(PLAYER).expect("player");
            p.gold = 77;
            p.gold
        };
        generate(&mut s);
        let p = s.registry.player().expect("player survives");
        assert_eq!(p.gold, gold_before);
    }

    #[test]
    fn test_regeneration_replaces_architecture() {
        let mut s = fresh(4);
        let old_walls: Vec<EntityId> = s
            .registry
            .iter()
            .filter(|e| e.kind.is_wall())
            .map(|e| e.id)
            .collect();
        assert!(!old_walls.is_empty());
        generate(&mut s);
        for id in old_walls {
            assert!(!s.registry.contains(id), "stale wall {id:?} survived");
        }
        assert!(s.registry.iter().any(|e| e.kind == EntityKind::BorderWall));
    }

    #[test]
    fn test_monsters_spawn_off_player_tile() {
        for seed in 0..20 {
            let s = fresh(seed);
            let player_tile = s.registry.player().expect("player").tile();
            for e in s.registry.iter() {
                if e.kind.takes_turns() {
                    assert_ne!(e.tile(), player_tile, "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn test_placement_frequencies_converge() {
        let mut wall_trials = 0u32;
        let mut walls = 0u32;
        let mut chest_trials = 0u32;
        let mut chests = 0u32;
        let mut monster_trials = 0u32;
        let mut monsters = 0u32;
        let mut rats = 0u32;
        for seed in 100..200 {
            let s = fresh(seed);
            let player_tile = s.registry.player().expect("player").tile();
            for x in 1..s.config.width - 1 {
                for y in 1..s.config.height - 1 {
                    let tile = TilePos::new(x, y);
                    if s.registry.shop_at(tile).is_some() {
                        continue;
                    }
                    wall_trials += 1;
                    if s.registry.wall_at(tile).is_some() {
                        walls += 1;
                        continue;
                    }
                    chest_trials += 1;
                    let occupant = s
                        .registry
                        .hostile_at(tile)
                        .and_then(|id| s.registry.entity(id))
                        .map(|e| e.kind);
                    if occupant == Some(EntityKind::Chest) {
                        chests += 1;
                        continue;
                    }
                    if tile == player_tile {
                        continue;
                    }
                    monster_trials += 1;
                    match occupant {
                        Some(EntityKind::Rat) => {
                            monsters += 1;
                            rats += 1;
                        }
                        Some(EntityKind::Serpent) => monsters += 1,
                        _ => {}
                    }
                }
            }
        }
        let wall_rate = f64::from(walls) / f64::from(wall_trials);
        let chest_rate = f64::from(chests) / f64::from(chest_trials);
        let monster_rate = f64::from(monsters) / f64::from(monster_trials);
        assert!((wall_rate - 0.15).abs() < 0.02, "wall rate {wall_rate}");
        assert!((chest_rate - 0.05).abs() < 0.015, "chest rate {chest_rate}");
        assert!(
            (monster_rate - 0.05).abs() < 0.015,
            "monster rate {monster_rate}"
        );
        let rat_share = f64::from(rats) / f64::from(monsters);
        assert!(
            (0.6..0.9).contains(&rat_share),
            "rat share {rat_share} strays from the 3:1 pool weighting"
        );
    }

    #[test]
    fn test_minimal_arena_generates() {
        // A 3x3 arena is all border except the center tile.
        let cfg = ArenaConfig::new(3, 3);
        let s = GameSession::new(cfg, 5).expect("valid config");
        assert!(s.registry.player().is_some());
        let borders = s
            .registry
            .iter()
            .filter(|e| e.kind == EntityKind::BorderWall)
            .count();
        assert_eq!(borders, 8);
    }
}
