//! Movement integrator
//!
//! Advances a [`MovementState`] once per rendered frame in a fixed order: crouch smoothing,
//! gravity, wish direction, friction, jump, acceleration, position, ground test, stamina.

use fpsim_core::{
    exp_smoothing, planar_speed, sanitize_delta, AccuracyConfig, CameraOrientation,
    InputCommand, MovementConfig, SimConfig, StaminaConfig, TickError,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::inaccuracy::calculate_inaccuracy;
use crate::physics::{accelerate, air_accelerate, apply_friction};
use crate::stamina;

/// Ground contact phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocomotionPhase {
    Grounded,
    Airborne,
}

/// Locomotion state owned by a [`MovementController`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    /// Velocity in u/s
    pub velocity: Vec3,
    /// Eye position in world units
    pub position: Vec3,
    pub is_grounded: bool,
    /// Derived each tick: smoothed height is within tolerance of the crouch height
    pub is_crouching: bool,
    /// Smoothed eye height above the floor
    pub current_height: f32,
    /// Eye height the smoothing is heading toward
    pub target_height: f32,
    /// Jump stamina, always within `0..=max`
    pub stamina: f32,
    /// Crouch or walk speed, recomputed each tick
    pub move_speed: f32,
}

impl MovementState {
    /// Standing at rest on the floor at `(x, z)` with full stamina
    pub fn standing(config: &SimConfig, x: f32, z: f32) -> Self {
        let movement = &config.movement;
        Self {
            velocity: Vec3::ZERO,
            position: Vec3::new(x, movement.floor_height + movement.stand_height, z),
            is_grounded: true,
            is_crouching: false,
            current_height: movement.stand_height,
            target_height: movement.stand_height,
            stamina: config.stamina.max,
            move_speed: movement.walk_speed,
        }
    }

    /// Horizontal speed
    pub fn planar_speed(&self) -> f32 {
        planar_speed(self.velocity)
    }

    pub fn phase(&self) -> LocomotionPhase {
        if self.is_grounded {
            LocomotionPhase::Grounded
        } else {
            LocomotionPhase::Airborne
        }
    }
}

/// Discrete transitions that happened during the last accepted tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvents {
    pub jumped: bool,
    pub landed: bool,
}

/// First-person movement integrator
pub struct MovementController {
    movement: MovementConfig,
    stamina: StaminaConfig,
    accuracy: AccuracyConfig,
    state: MovementState,
    events: TickEvents,
}

impl MovementController {
    /// Create a controller standing at the origin
    pub fn new(config: &SimConfig) -> Self {
        Self::with_state(config, MovementState::standing(config, 0.0, 0.0))
    }

    /// Create a controller from an explicit starting state
    pub fn with_state(config: &SimConfig, mut state: MovementState) -> Self {
        state.stamina = state.stamina.clamp(0.0, config.stamina.max);
        Self {
            movement: config.movement.clone(),
            stamina: config.stamina.clone(),
            accuracy: config.accuracy.clone(),
            state,
            events: TickEvents::default(),
        }
    }

    /// Value copy of the current state
    pub fn state(&self) -> MovementState {
        self.state
    }

    /// Transitions from the most recent accepted tick
    pub fn last_events(&self) -> TickEvents {
        self.events
    }

    /// Restart standing at rest at `(x, z)`
    pub fn reset(&mut self, x: f32, z: f32) {
        let height = self.movement.stand_height;
        self.state = MovementState {
            velocity: Vec3::ZERO,
            position: Vec3::new(x, self.movement.floor_height + height, z),
            is_grounded: true,
            is_crouching: false,
            current_height: height,
            target_height: height,
            stamina: self.stamina.max,
            move_speed: self.movement.walk_speed,
        };
        self.events = TickEvents::default();
        debug!(x, z, "Movement state reset");
    }

    /// Current spread scalar for the held weapon
    pub fn calculate_inaccuracy(&self) -> f32 {
        calculate_inaccuracy(&self.state, &self.accuracy)
    }

    /// Advance one tick and return the new eye position.
    ///
    /// Malformed input (non-finite or non-positive delta, non-finite axes or orientation) is
    /// rejected and the state is left exactly as it was.
    pub fn update(
        &mut self,
        input: InputCommand,
        camera: &CameraOrientation,
        delta: f32,
    ) -> Result<Vec3, TickError> {
        let delta = sanitize_delta(delta, self.movement.max_delta).inspect_err(|err| {
            warn!(%err, "Skipping movement tick");
        })?;
        if !input.is_finite() {
            warn!("Skipping movement tick with non-finite input");
            return Err(TickError::NonFiniteInput);
        }
        if !camera.is_finite() {
            warn!("Skipping movement tick with non-finite camera orientation");
            return Err(TickError::NonFiniteOrientation);
        }

        let input = input.clamped();
        let config = &self.movement;
        let mut state = self.state;
        let mut events = TickEvents::default();

        // Crouch height
        state.target_height = config.target_height(input.crouch);
        state.current_height += (state.target_height - state.current_height)
            * exp_smoothing(config.crouch_smoothing, delta);
        state.is_crouching =
            (state.current_height - config.crouch_height).abs() <= config.crouch_tolerance;
        state.move_speed = config.move_speed(state.is_crouching);

        if !state.is_grounded {
            state.velocity.y -= config.gravity * delta;
        }

        let (wish_dir, wish_speed) =
            wish_motion(input, camera, state.move_speed, config.analog_wish_speed);

        if state.is_grounded {
            state.velocity = apply_friction(
                state.velocity,
                config.ground_friction,
                config.stop_speed,
                config.stop_epsilon,
                delta,
            );
        }

        if input.jump && state.is_grounded {
            if let Some(remaining) = stamina::spend_jump(state.stamina, &self.stamina) {
                state.velocity.y = config.jump_velocity;
                state.is_grounded = false;
                state.stamina = remaining;
                events.jumped = true;
                debug!(stamina = remaining, "Jump");
            }
        }

        state.velocity = if state.is_grounded {
            accelerate(state.velocity, wish_dir, wish_speed, config.acceleration, delta)
        } else {
            air_accelerate(
                state.velocity,
                wish_dir,
                wish_speed,
                config.air_speed_cap,
                config.air_acceleration,
                delta,
            )
        };

        state.position += state.velocity * delta;

        // Ground test against the smoothed eye height. A grounded character stays glued to it
        // while the height transitions; an airborne one only lands on a downward crossing, so
        // the jump tick can never land.
        let threshold = config.floor_height + state.current_height;
        if state.is_grounded {
            state.position.y = threshold;
            state.velocity.y = 0.0;
        } else if !events.jumped && state.velocity.y <= 0.0 && state.position.y <= threshold {
            state.position.y = threshold;
            state.velocity.y = 0.0;
            state.is_grounded = true;
            state.stamina = stamina::apply_landing(state.stamina, &self.stamina);
            events.landed = true;
            debug!(stamina = state.stamina, "Landed");
        }

        if state.is_grounded && !events.landed {
            state.stamina = stamina::regenerate(state.stamina, &self.stamina, delta);
        }

        trace!(
            position = ?state.position,
            velocity = ?state.velocity,
            grounded = state.is_grounded,
            crouching = state.is_crouching,
            "Movement tick"
        );

        self.state = state;
        self.events = events;
        Ok(state.position)
    }
}

/// Project input onto the flattened camera basis.
///
/// The combined vector is divided by its own length, so diagonal input never exceeds the
/// single-axis speed. Any nonzero deflection wishes for the full move speed unless `analog` is
/// set, in which case partial deflection scales the wish speed down.
fn wish_motion(
    input: InputCommand,
    camera: &CameraOrientation,
    move_speed: f32,
    analog: bool,
) -> (Vec3, f32) {
    let raw = camera.flat_forward() * input.forward + camera.flat_right() * input.right;
    let length = raw.length();
    if length <= 0.0 {
        return (Vec3::ZERO, 0.0);
    }
    let wish_speed = if analog {
        move_speed * length.min(1.0)
    } else {
        move_speed
    };
    (raw / length, wish_speed)
}
