//! Monster decision-making.
//!
//! `decide` proposes a tile step and never moves anyone; the turn
//! resolver owns collision checks and application. It does mutate
//! fatigue and behavior state, and emits the sleep floater.

use glam::Vec2;

use crate::behavior::{BehaviorEvent, BehaviorState, next_state};
use crate::consts::{FATIGUE_GAIN_DIE, FATIGUE_SLEEP_THRESHOLD};
use crate::effects::{Color, Effect, FloatingText};
use crate::entity::EntityId;
use crate::geometry::{ROAM_STEPS, tile_distance, tile_of};
use crate::session::GameSession;

/// Step that closes the gap to the target on both axes at once.
fn chase_step(from: Vec2, target: Vec2) -> (i32, i32) {
    let from = tile_of(from);
    let target = tile_of(target);
    ((target.x - from.x).signum(), (target.y - from.y).signum())
}

/// Choose the step a monster wants to take this turn.
///
/// Within perception range the monster heads straight for the player;
/// otherwise it roams. The behavior state then gets its say: Patrolling
/// accumulates fatigue and may pass out, Dormant stands still and rests,
/// Aggressive chases no matter the distance. With no player on the board
/// there is nothing to chase and the monster just roams.
pub fn decide(session: &mut GameSession, monster: EntityId) -> (i32, i32) {
    let Some(m) = session.registry.entity(monster) else {
        return (0, 0);
    };
    let (pos, perception, state) = (m.pos, m.perception, m.state);
    let player_pos = session.registry.player().map(|p| p.pos);

    let mut step = match player_pos {
        Some(target) if tile_distance(pos, target) < perception => chase_step(pos, target),
        _ => *session.rng.choose(&ROAM_STEPS).unwrap_or(&(0, 0)),
    };

    match state {
        BehaviorState::Patrolling => {
            let gain = session.rng.die(FATIGUE_GAIN_DIE) as i32;
            if let Some(m) = session.registry.entity_mut(monster) {
                m.tiredness += gain;
                if m.tiredness > FATIGUE_SLEEP_THRESHOLD {
                    m.state = next_state(m.state, BehaviorEvent::Sleepy);
                    m.tiredness = FATIGUE_SLEEP_THRESHOLD - 1;
                }
            }
        }
        BehaviorState::Dormant => {
            step = (0, 0);
            let color = Color::random(&mut session.rng);
            session.effects.push(Effect::FloatingText(FloatingText {
                text: "z".to_string(),
                pos,
                vel: Vec2::new(15.0, 20.0),
                color,
                lifetime: 1.0,
                size: 22,
            }));
            if let Some(m) = session.registry.entity_mut(monster) {
                m.tiredness -= 1;
                if m.tiredness <= 0 {
                    m.state = next_state(m.state, BehaviorEvent::WakeUp);
                    m.tiredness = 0;
                }
            }
        }
        BehaviorState::Aggressive => {
            if let Some(target) = player_pos {
                step = chase_step(pos, target);
            }
        }
    }
    step
}
