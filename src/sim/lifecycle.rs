//! Match lifecycle: phases and the transition table

use serde::{Deserialize, Serialize};

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing animates; waiting for the host to call `ready`
    Initializing,
    /// Actor hovers, waiting for the first press
    Ready,
    /// Active gameplay
    Started,
    /// Frozen mid-match
    Paused,
    /// Actor hit an obstacle and is falling to the ground
    Finishing,
    /// Match ended
    Over,
}

/// Everything that can move the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    Reset,
    Ready,
    Start,
    Pause,
    Resume,
    /// Actor hit an obstacle
    Collide,
    /// Actor reached the ground
    Ground,
}

impl Transition {
    pub const ALL: [Transition; 7] = [
        Transition::Reset,
        Transition::Ready,
        Transition::Start,
        Transition::Pause,
        Transition::Resume,
        Transition::Collide,
        Transition::Ground,
    ];
}

/// Target phase for `transition` from `phase`, or `None` when illegal
///
/// Resume deliberately lands in Ready: the player has to press again to
/// restart the match.
pub fn next_phase(phase: GamePhase, transition: Transition) -> Option<GamePhase> {
    use GamePhase::*;

    match (transition, phase) {
        (Transition::Reset, _) => Some(Initializing),
        (Transition::Ready, Initializing | Over) => Some(Ready),
        (Transition::Start, Ready) => Some(Started),
        (Transition::Pause, Started) => Some(Paused),
        (Transition::Resume, Paused) => Some(Ready),
        (Transition::Collide, Started) => Some(Finishing),
        (Transition::Ground, Started | Finishing) => Some(Over),
        _ => None,
    }
}
