//! Monster behavior state machine.
//!
//! Three states, three events, one pure transition function. Event
//! delivery and the per-state movement overrides live in [`crate::ai`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// What a monster is currently doing between turns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum BehaviorState {
    /// Asleep. Takes no steps until rested or disturbed.
    Dormant,
    /// Wandering, tiring out a little every turn.
    #[default]
    Patrolling,
    /// Hunting the player unconditionally. Nothing leaves this state.
    Aggressive,
}

/// Stimuli a monster can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum BehaviorEvent {
    WakeUp,
    Attacked,
    Sleepy,
}

/// The next state for a (state, event) pair. Unhandled pairs keep the
/// current state; Aggressive absorbs everything.
pub fn next_state(state: BehaviorState, event: BehaviorEvent) -> BehaviorState {
    match (state, event) {
        (BehaviorState::Dormant, BehaviorEvent::WakeUp) => BehaviorState::Patrolling,
        (BehaviorState::Dormant, BehaviorEvent::Attacked) => BehaviorState::Patrolling,
        (BehaviorState::Patrolling, BehaviorEvent::Sleepy) => BehaviorState::Dormant,
        (state, _) => state,
    }
}
