//! Per-frame simulation step
//!
//! Applies one frame of input to the state: debug toggle, turning, then
//! strafing and walking. Elapsed time is variable (whatever the frame clock
//! measured).

use serde::{Deserialize, Serialize};

use super::pose::{Axis, update_pose};
use super::state::SimState;

/// Input sampled for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Positive turns counter-clockwise on screen (left)
    pub turn: Axis,
    /// Positive moves to the player's right
    pub strafe: Axis,
    /// Positive walks forward
    pub forward: Axis,
    /// Debug overlay key is currently held
    pub debug_key: bool,
}

/// Advance the state by one frame of `dt` seconds
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    // Toggle only on the press edge, holding the key does nothing more
    if input.debug_key && !state.debug_key_held {
        state.debug_overlay = !state.debug_overlay;
        log::debug!("Debug overlay: {}", state.debug_overlay);
    }
    state.debug_key_held = input.debug_key;

    let dt = dt.max(0.0);
    let angle_delta = input.turn.value() * state.motion.turn_speed * dt;
    state.pose = update_pose(
        &state.pose,
        angle_delta,
        input.strafe,
        input.forward,
        dt,
        state.motion.move_speed,
    );

    state.time_ticks += 1;
}
