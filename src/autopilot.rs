//! Demo controller: plays the game from a snapshot
//!
//! Presses to start a readied match, then keeps the actor hovering a little
//! below the centre of the next gap (or mid-air when no obstacle is ahead).

use crate::engine::Snapshot;
use crate::sim::GamePhase;

/// Whether the demo player should press the button now
pub fn should_flap(snapshot: &Snapshot) -> bool {
    match snapshot.phase {
        GamePhase::Ready => true,
        GamePhase::Started => {
            let center = (snapshot.actor_y + snapshot.actor_bottom) / 2.0;
            center > target_height(snapshot) && snapshot.actor_velocity <= 0.0
        }
        _ => false,
    }
}

/// Height the actor's centre should not sink below
///
/// A flap lifts the actor by roughly half a gap, so aim at the lower two
/// thirds of the opening to leave headroom above.
fn target_height(snapshot: &Snapshot) -> f32 {
    match snapshot.next_gap {
        Some((top, bottom)) => top + (bottom - top) * 2.0 / 3.0,
        None => snapshot.floor / 2.0,
    }
}
