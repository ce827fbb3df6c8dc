//! Turn resolution: player orders and the monster phase that follows.
//!
//! Movement is checked against the destination tile in a fixed order:
//! wall, then shop, then hostile. The first match swallows the step.
//! Laying a wall is free and does not wake the monsters; everything
//! else hands them a turn.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::behavior::{next_state, BehaviorEvent};
use crate::combat;
use crate::consts::{ATTACKED_FATIGUE_RELIEF, FIREBALL_SPEED, TILE_SIZE, WALL_BUMP_DIE};
use crate::effects::{Color, Effect, FloatingText, ParticleBurst};
use crate::entity::{EntityId, EntityKind, Facing, PLAYER};
use crate::geometry::{heading_or_east, Direction};
use crate::session::GameSession;
use crate::ai;

/// One player order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Move(Direction),
    Wait,
    CastFireball,
    BuildWall,
}

/// What the front end should do once the order has resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    /// The player stepped into the shop; open its menu.
    OpenShop,
}

/// Resolve one player order, then give the monsters their phase.
pub fn resolve(session: &mut GameSession, action: PlayerAction) -> TurnOutcome {
    if !session.registry.contains(PLAYER) {
        return TurnOutcome::Continue;
    }
    let mut outcome = TurnOutcome::Continue;
    let mut advances = true;
    match action {
        PlayerAction::Move(dir) => outcome = resolve_move(session, dir),
        PlayerAction::Wait => announce_wait(session),
        PlayerAction::CastFireball => cast_fireball(session),
        PlayerAction::BuildWall => {
            build_wall(session);
            advances = false;
        }
    }
    if advances {
        monster_phase(session);
        session.turn += 1;
    }
    outcome
}

fn announce_wait(session: &mut GameSession) {
    let Some(pos) = session.registry.player().map(|p| p.pos) else {
        return;
    };
    let color = Color::random(&mut session.rng);
    session.effects.push(Effect::FloatingText(FloatingText {
        color,
        lifetime: 1.0,
        ..FloatingText::new("i wait a turn", pos)
    }));
}

fn resolve_move(session: &mut GameSession, dir: Direction) -> TurnOutcome {
    let (dx, dy) = dir.step();
    let (player_pos, origin) = {
        let Some(player) = session.registry.entity_mut(PLAYER) else {
            return TurnOutcome::Continue;
        };
        match dir {
            Direction::East => player.facing = Facing::Right,
            Direction::West => player.facing = Facing::Left,
            _ => {}
        }
        (player.pos, player.tile())
    };
    let dest = origin.offset(dx, dy);

    if let Some(wall_id) = session.registry.wall_at(dest) {
        bump_wall(session, wall_id, player_pos, dx, dy);
        return TurnOutcome::Continue;
    }
    if session.registry.shop_at(dest).is_some() {
        let color = Color::random(&mut session.rng);
        session.effects.push(Effect::FloatingText(FloatingText {
            vel: Vec2::new(0.0, 22.0),
            color,
            ..FloatingText::new("shopping", player_pos)
        }));
        return TurnOutcome::OpenShop;
    }
    if let Some(target) = session.registry.hostile_at(dest) {
        bump_attack(session, target, player_pos, dx, dy);
        return TurnOutcome::Continue;
    }
    if let Some(player) = session.registry.entity_mut(PLAYER) {
        player.pos = dest.to_world();
    }
    TurnOutcome::Continue
}

/// Chip the wall instead of moving. Border walls soak it up; the tick
/// restores them to full before the damage can ever add up.
fn bump_wall(session: &mut GameSession, wall_id: EntityId, player_pos: Vec2, dx: i32, dy: i32) {
    if let Some(player) = session.registry.entity_mut(PLAYER) {
        player.start_attack_flash();
    }
    let chip = session.rng.die(WALL_BUMP_DIE) as i32;
    let Some(wall) = session.registry.entity_mut(wall_id) else {
        return;
    };
    wall.hp -= chip;
    let wall_pos = wall.pos;
    let color = match wall.kind {
        EntityKind::BorderWall => Color::BORDER,
        _ => Color::RUBBLE,
    };
    let aim = heading_or_east(wall_pos - player_pos).to_angle().to_degrees();
    let midpoint = player_pos + Vec2::new(dx as f32, dy as f32) * (TILE_SIZE / 2.0);
    session.effects.push(Effect::ParticleBurst(ParticleBurst {
        min_angle: aim - 45.0,
        max_angle: aim + 45.0,
        color,
        ..ParticleBurst::new(midpoint)
    }));
}

/// Melee into the hostile on the destination tile. The blow startles it
/// awake and shakes off some of its fatigue.
fn bump_attack(session: &mut GameSession, target: EntityId, player_pos: Vec2, dx: i32, dy: i32) {
    if let Some(monster) = session.registry.entity_mut(target) {
        monster.state = next_state(monster.state, BehaviorEvent::Attacked);
        monster.tiredness -= ATTACKED_FATIGUE_RELIEF;
    }
    combat::fight(session, PLAYER, target);
    let midpoint = player_pos + Vec2::new(dx as f32, dy as f32) * (TILE_SIZE / 2.0);
    session
        .effects
        .push(Effect::ParticleBurst(ParticleBurst::new(midpoint)));
}

fn cast_fireball(session: &mut GameSession) {
    let (pos, step) = {
        let Some(player) = session.registry.entity_mut(PLAYER) else {
            return;
        };
        player.start_attack_flash();
        (player.pos, player.facing.step())
    };
    let id = session.registry.spawn(EntityKind::Fireball, pos, &mut session.rng);
    if let Some(fireball) = session.registry.entity_mut(id) {
        fireball.vel = Vec2::new(step.0 as f32 * FIREBALL_SPEED, 0.0);
    }
}

/// Lay a wall on the tile the player faces. No occupancy check; walling
/// in a monster (or the shop) is a legitimate tactic.
fn build_wall(session: &mut GameSession) {
    let tile = {
        let Some(player) = session.registry.entity_mut(PLAYER) else {
            return;
        };
        player.start_attack_flash();
        let (dx, dy) = player.facing.step();
        player.tile().offset(dx, dy)
    };
    session
        .registry
        .spawn(EntityKind::Wall, tile.to_world(), &mut session.rng);
}

/// Every turn-taking hostile picks a step, in creation order. A wall or
/// another hostile on the destination swallows the step; the player on
/// it means a fight. Steps apply immediately, so later movers see where
/// earlier ones already went.
fn monster_phase(session: &mut GameSession) {
    for id in session.registry.hostile_ids() {
        let takes_turn = session
            .registry
            .entity(id)
            .map(|e| e.kind.takes_turns())
            .unwrap_or(false);
        if !takes_turn {
            continue;
        }
        let mut step = ai::decide(session, id);
        let Some(origin) = session.registry.entity(id).map(|e| e.tile()) else {
            continue;
        };
        if session.registry.wall_at(origin.offset(step.0, step.1)).is_some() {
            step = (0, 0);
        }
        if session
            .registry
            .other_hostile_at(origin.offset(step.0, step.1), id)
            .is_some()
        {
            step = (0, 0);
        }
        let player_tile = session.registry.player().map(|p| p.tile());
        if player_tile == Some(origin.offset(step.0, step.1)) {
            combat::fight(session, id, PLAYER);
            step = (0, 0);
        }
        let dest = origin.offset(step.0, step.1);
        if let Some(monster) = session.registry.entity_mut(id) {
            monster.pos = dest.to_world();
        }
    }
}
