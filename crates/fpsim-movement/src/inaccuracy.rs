//! Weapon spread derived from movement state

use fpsim_core::AccuracyConfig;

use crate::controller::MovementState;

/// Spread scalar for the current movement state.
///
/// Base spread plus a speed term once planar speed passes `min_speed`, plus a flat airborne
/// penalty, all scaled by the crouch bonus while crouching.
pub fn calculate_inaccuracy(state: &MovementState, config: &AccuracyConfig) -> f32 {
    let mut spread = config.base;

    let speed = state.planar_speed();
    if speed > config.min_speed && state.move_speed > 0.0 {
        spread += config.movement * (speed / state.move_speed);
    }

    if !state.is_grounded {
        spread += config.airborne;
    }

    if state.is_crouching {
        spread *= config.crouch_bonus;
    }

    spread
}
