//! Dice combat: strike and the strike/retaliation exchange.

use glam::Vec2;

use crate::consts::{STRIKE_DICE, STRIKE_DIE_SIDES};
use crate::effects::{Color, Effect, FloatingText};
use crate::entity::EntityId;
use crate::session::GameSession;

/// Resolved numbers of a single strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeOutcome {
    pub attack_total: i32,
    pub defense_total: i32,
    pub damage: i32,
}

/// One blow from attacker to defender.
///
/// Rolls 2d6 for each side on top of their flat stats; the defense wins
/// ties. Damage lands immediately but the victim is only reaped by the
/// next frame tick, so hp can sit below zero for a moment. Emits the
/// damage floater and the roll-breakdown log line. Returns None if either
/// combatant has left the registry.
pub fn strike(
    session: &mut GameSession,
    attacker: EntityId,
    defender: EntityId,
) -> Option<StrikeOutcome> {
    let (att_stat, att_pos) = {
        let a = session.registry.entity(attacker)?;
        (a.attack, a.pos)
    };
    let (def_stat, def_pos) = {
        let d = session.registry.entity(defender)?;
        (d.defense, d.pos)
    };
    if let Some(a) = session.registry.entity_mut(attacker) {
        a.start_attack_flash();
    }

    let d1 = session.rng.die(STRIKE_DIE_SIDES) as i32;
    let d2 = session.rng.die(STRIKE_DIE_SIDES) as i32;
    let d3 = session.rng.die(STRIKE_DIE_SIDES) as i32;
    let d4 = session.rng.die(STRIKE_DIE_SIDES) as i32;
    let attack_total = att_stat + d1 + d2;
    let defense_total = def_stat + d3 + d4;
    let damage = if defense_total >= attack_total {
        0
    } else {
        attack_total - defense_total
    };

    // The damage number drifts away from the attacker, never straight down.
    let mut drift = Vec2::new(0.35 * (def_pos.x - att_pos.x), 0.25 * (def_pos.y - att_pos.y));
    if drift.y == 0.0 {
        drift.y = 15.0;
    }
    session.effects.push(Effect::FloatingText(FloatingText {
        text: if damage > 0 {
            format!("-{damage} HP")
        } else {
            "0 HP".to_string()
        },
        pos: def_pos + Vec2::new(0.0, 20.0),
        vel: drift,
        color: if damage > 0 { Color::DAMAGE } else { Color::MISS },
        lifetime: 2.0,
        size: 60,
    }));

    let dice = STRIKE_DICE;
    let sides = STRIKE_DIE_SIDES;
    let mut line = format!(
        "{} attack+{dice}d{sides} = {att_stat} + {d1} + {d2} = {attack_total} vs defense+{dice}d{sides} = {def_stat} + {d3} + {d4} = {defense_total}",
        if damage > 0 { "hit!" } else { "miss..." },
    );
    if damage > 0 {
        line.push_str(&format!("  damage {damage} HP"));
    }
    session.log.push(Color::WHITE, line);

    if let Some(d) = session.registry.entity_mut(defender) {
        d.hp -= damage;
    }
    Some(StrikeOutcome {
        attack_total,
        defense_total,
        damage,
    })
}

/// A full exchange: the attacker strikes, then the defender strikes back
/// exactly once, but only if still above zero hp. A one-shot kill draws
/// no retaliation.
pub fn fight(session: &mut GameSession, attacker: EntityId, defender: EntityId) {
    let Some(att_kind) = session.registry.entity(attacker).map(|e| e.kind) else {
        return;
    };
    let Some(def_kind) = session.registry.entity(defender).map(|e| e.kind) else {
        return;
    };

    session
        .log
        .push(Color::STRIKE, format!("{att_kind} strikes at {def_kind}"));
    strike(session, attacker, defender);

    let defender_standing = session
        .registry
        .entity(defender)
        .is_some_and(|d| d.hp > 0);
    if defender_standing {
        session.log.push(
            Color::RIPOSTE,
            format!("{def_kind} strikes back against {att_kind}"),
        );
        strike(session, defender, attacker);
    }
}
