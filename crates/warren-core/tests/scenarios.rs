//! End-to-end scenarios across the whole simulation: scripted runs,
//! wall demolition, fireballs in flight, chest looting, warden waves
//! and the monster sleep cycle.

use glam::Vec2;
use warren_core::behavior::BehaviorState;
use warren_core::config::ArenaConfig;
use warren_core::effects::Effect;
use warren_core::entity::{EntityId, EntityKind, PLAYER};
use warren_core::geometry::{Direction, TilePos};
use warren_core::turn::{PlayerAction, TurnOutcome};
use warren_core::GameSession;

// ============================================================================
// Helpers
// ============================================================================

fn fresh(seed: u64) -> GameSession {
    GameSession::new(ArenaConfig::default(), seed).expect("valid config")
}

/// Player alone inside the border ring, everything else stripped.
fn open_floor(seed: u64) -> GameSession {
    let mut s = fresh(seed);
    let stale: Vec<EntityId> = s
        .registry
        .iter()
        .filter(|e| {
            e.kind != EntityKind::Player
                && e.kind != EntityKind::BorderWall
                && e.owner.map(|o| o.id) != Some(PLAYER)
        })
        .map(|e| e.id)
        .collect();
    for id in stale {
        s.registry.remove(id);
    }
    s.effects.clear();
    s
}

fn player_tile(s: &GameSession) -> TilePos {
    s.registry.player().expect("player alive").tile()
}

// ============================================================================
// Scenario 1: the same seed replays the same run, byte for byte
// ============================================================================

#[test]
fn test_scripted_run_replays_identically() {
    let script = [
        PlayerAction::Move(Direction::East),
        PlayerAction::Move(Direction::East),
        PlayerAction::CastFireball,
        PlayerAction::Wait,
        PlayerAction::Move(Direction::North),
        PlayerAction::BuildWall,
        PlayerAction::Move(Direction::South),
        PlayerAction::Move(Direction::West),
        PlayerAction::Wait,
        PlayerAction::CastFireball,
        PlayerAction::Move(Direction::North),
        PlayerAction::Move(Direction::North),
    ];
    let mut a = fresh(1234);
    let mut b = fresh(1234);
    for action in script {
        a.act(action);
        b.act(action);
        for _ in 0..3 {
            a.frame(0.033);
            b.frame(0.033);
        }
    }
    let json_a = serde_json::to_string(&a).expect("serializes");
    let json_b = serde_json::to_string(&b).expect("serializes");
    assert_eq!(json_a, json_b, "identical seeds and scripts diverged");
    assert_eq!(a.log.len(), b.log.len());
}

// ============================================================================
// Scenario 2: build a wall, then tunnel back through it
// ============================================================================

#[test]
fn test_player_can_tunnel_through_built_wall() {
    let mut s = open_floor(7);
    let start = player_tile(&s);
    let ahead = start.offset(1, 0);

    s.act(PlayerAction::BuildWall);
    assert_eq!(s.turn, 0, "laying a wall costs no turn");
    assert!(s.registry.wall_at(ahead).is_some());

    // Built walls have a single hitpoint, so one bump fells one.
    s.act(PlayerAction::Move(Direction::East));
    assert_eq!(s.turn, 1, "a blocked bump still burns the turn");
    assert_eq!(player_tile(&s), start);

    s.frame(0.033);
    assert!(s.registry.wall_at(ahead).is_none(), "chipped wall collapsed");

    s.act(PlayerAction::Move(Direction::East));
    assert_eq!(player_tile(&s), ahead);
    assert_eq!(s.turn, 2);
}

// ============================================================================
// Scenario 3: a fireball crosses the room and bursts on the border
// ============================================================================

#[test]
fn test_fireball_crosses_the_room_and_bursts_on_border() {
    let mut s = open_floor(11);
    s.act(PlayerAction::CastFireball);
    assert!(s
        .registry
        .iter()
        .any(|e| e.kind == EntityKind::Fireball));

    // One tile per second, eastbound; give it ample flight time.
    for _ in 0..250 {
        s.frame(0.1);
    }
    assert!(
        !s.registry.iter().any(|e| e.kind == EntityKind::Fireball),
        "fireball should have met the border wall"
    );
    assert!(s
        .effects
        .iter()
        .any(|e| matches!(e, Effect::ParticleBurst(_))));
    // The border itself never falls.
    let east_border = TilePos::new(s.config.width - 1, player_tile(&s).y);
    assert!(s.registry.wall_at(east_border).is_some());
}

// ============================================================================
// Scenario 4: beating a chest open pays out its bounty
// ============================================================================

#[test]
fn test_chest_gives_up_its_gold() {
    let mut s = open_floor(42);
    let beside = player_tile(&s).offset(1, 0);
    let chest = s
        .registry
        .spawn(EntityKind::Chest, beside.to_world(), &mut s.rng);
    let bounty = s.registry.entity(chest).expect("chest").bounty;
    assert!((1..=20).contains(&bounty), "chest bounty is rolled 1..=20");

    // A chest has one hitpoint and no defense to speak of; a few bumps
    // settle it even through unlucky dice.
    for _ in 0..50 {
        if !s.registry.contains(chest) {
            break;
        }
        s.act(PlayerAction::Move(Direction::East));
        s.frame(0.033);
    }
    assert!(!s.registry.contains(chest), "chest broken open");
    assert_eq!(s.registry.player().expect("player").gold, bounty);
    assert!(s.effects.iter().any(|e| matches!(
        e,
        Effect::FloatingText(f) if f.text == format!("{bounty} gold")
    )));
}

// ============================================================================
// Scenario 5: warden waves escalate with the level number
// ============================================================================

#[test]
fn test_warden_waves_escalate_with_level() {
    let mut s = open_floor(5);
    assert_eq!(s.level, 1);

    // An empty board summons the first wave: one warden.
    s.frame(0.033);
    let wave: Vec<EntityId> = s
        .registry
        .iter()
        .filter(|e| e.kind == EntityKind::Warden)
        .map(|e| e.id)
        .collect();
    assert_eq!(wave.len(), 1);

    // Felling it clears the level, pays its bounty and builds level 2.
    for id in &wave {
        if let Some(w) = s.registry.entity_mut(*id) {
            w.hp = 0;
        }
    }
    s.frame(0.033);
    assert_eq!(s.level, 2);
    assert_eq!(s.registry.player().expect("player").gold, 20);

    // Strip the fresh level; the next wave is two wardens, stacked
    // downward from two rows below the top border.
    let hostiles: Vec<EntityId> = s
        .registry
        .iter()
        .filter(|e| e.kind.is_hostile())
        .map(|e| e.id)
        .collect();
    for id in hostiles {
        s.registry.remove(id);
    }
    s.frame(0.033);
    let mut tiles: Vec<TilePos> = s
        .registry
        .iter()
        .filter(|e| e.kind == EntityKind::Warden)
        .map(|e| e.tile())
        .collect();
    tiles.sort_by_key(|t| (t.x, t.y));
    assert_eq!(tiles, vec![TilePos::new(3, 13), TilePos::new(3, 14)]);
}

// ============================================================================
// Scenario 6: patrolling wears a monster out; sleep restores it
// ============================================================================

#[test]
fn test_patrolling_monster_sleeps_and_wakes() {
    let mut s = open_floor(9);
    // Cell the rat in so it cannot wander toward the player.
    let den = TilePos::new(20, 8);
    let rat = s.registry.spawn(EntityKind::Rat, den.to_world(), &mut s.rng);
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            s.registry
                .spawn(EntityKind::Wall, den.offset(dx, dy).to_world(), &mut s.rng);
        }
    }

    // Fatigue climbs by 1..=10 a turn; the threshold is 100.
    let mut slept = false;
    for _ in 0..150 {
        s.act(PlayerAction::Wait);
        if s.registry.entity(rat).expect("rat").state == BehaviorState::Dormant {
            slept = true;
            break;
        }
    }
    assert!(slept, "patrolling must wear the rat out within 150 turns");
    assert_eq!(s.registry.entity(rat).expect("rat").tiredness, 99);
    assert_eq!(s.registry.entity(rat).expect("rat").tile(), den);

    // Sleep burns one fatigue a turn and mumbles a "z" the whole way.
    s.effects.clear();
    let mut woke = false;
    for _ in 0..120 {
        s.act(PlayerAction::Wait);
        if s.registry.entity(rat).expect("rat").state == BehaviorState::Patrolling {
            woke = true;
            break;
        }
    }
    assert!(woke, "sleep runs out after 99 turns");
    assert_eq!(s.registry.entity(rat).expect("rat").tiredness, 0);
    assert!(s.effects.iter().any(|e| matches!(
        e,
        Effect::FloatingText(f) if f.text == "z" && f.vel == Vec2::new(15.0, 20.0)
    )));
}

// ============================================================================
// Scenario 7: a shopping trip, potion and all
// ============================================================================

#[test]
fn test_shopping_trip_heals_the_player() {
    let mut s = open_floor(3);
    let start = player_tile(&s);
    let beside = start.offset(0, 1);
    s.registry
        .spawn(EntityKind::Shop, beside.to_world(), &mut s.rng);
    if let Some(p) = s.registry.entity_mut(PLAYER) {
        p.gold = 6;
        p.hp = 100;
    }

    let outcome = s.act(PlayerAction::Move(Direction::North));
    assert_eq!(outcome, TurnOutcome::OpenShop);
    assert_eq!(player_tile(&s), start, "shopping happens from the doorstep");

    assert!(warren_core::shop::buy(&mut s, "medium health potion (5)"));
    assert_eq!(s.registry.player().expect("player").gold, 1);
    assert!(warren_core::shop::use_item(&mut s, "medium health potion (5)"));
    assert_eq!(s.registry.player().expect("player").hp, 150);

    // Too poor for armor now.
    assert!(!warren_core::shop::buy(&mut s, "ring mail (55)"));
    assert_eq!(s.registry.player().expect("player").gold, 1);
}
