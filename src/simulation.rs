//! Per-frame simulation facade
//!
//! Owns both engines and evaluates them in the one order that keeps the weapon in step with
//! the camera: movement first, then recoil, then sway/bob from the post-update velocity.

use fpsim_core::{
    sanitize_delta, CameraOrientation, ConfigError, FrameClock, InputCommand, SimConfig,
    TickError,
};
use fpsim_movement::{MovementController, MovementState, TickEvents};
use fpsim_weapon::{OffsetSmoother, RecoilEngine, WeaponOscillator, WeaponState};
use glam::{Vec2, Vec3};
use serde::Serialize;
use tracing::trace;

/// Read-only snapshot handed to rendering, weapon visuals and the HUD each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameOutput {
    /// Frames accepted so far
    pub frame: u64,
    /// Simulation time at the end of this frame (s)
    pub elapsed: f64,
    /// Eye position for the camera
    pub position: Vec3,
    pub movement: MovementState,
    pub events: TickEvents,
    pub weapon: WeaponState,
    /// One-off kick if a shot was fired this frame
    pub recoil_kick: Option<Vec2>,
    /// Cumulative unrecovered recoil after this frame's recovery
    pub total_recoil: Vec2,
    /// Smoothed sway offset
    pub sway: Vec3,
    pub bob: f32,
    pub inaccuracy: f32,
}

/// Movement and weapon engines stepped together once per rendered frame
pub struct FrameSimulation {
    movement: MovementController,
    recoil: RecoilEngine,
    oscillator: WeaponOscillator,
    sway: OffsetSmoother,
    clock: FrameClock,
    paused: bool,
    max_delta: f32,
    last_output: FrameOutput,
}

impl FrameSimulation {
    /// Build every engine from a validated configuration table
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let movement = MovementController::new(config);
        let recoil = RecoilEngine::new(&config.recoil);
        let max_delta = config.movement.max_delta;
        let last_output = resting_output(&movement, &recoil);
        Ok(Self {
            movement,
            recoil,
            oscillator: WeaponOscillator::new(&config.weapon_motion),
            sway: OffsetSmoother::new(config.weapon_motion.smoothing),
            clock: FrameClock::new(max_delta),
            paused: false,
            max_delta,
            last_output,
        })
    }

    /// Snapshot from the most recent accepted frame
    pub fn last_output(&self) -> FrameOutput {
        self.last_output
    }

    pub fn movement_state(&self) -> MovementState {
        self.movement.state()
    }

    pub fn weapon_state(&self) -> WeaponState {
        self.recoil.state()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Advance one frame.
    ///
    /// `fire` carries the recoil multiplier when the host registered a shot this frame. A frame
    /// rejected for malformed input changes nothing; while paused the previous snapshot is
    /// returned unchanged.
    pub fn step(
        &mut self,
        input: InputCommand,
        camera: &CameraOrientation,
        raw_delta: f32,
        fire: Option<f32>,
    ) -> Result<FrameOutput, TickError> {
        let delta = sanitize_delta(raw_delta, self.max_delta)?;
        if self.paused {
            return Ok(self.last_output);
        }

        let elapsed = self.clock.elapsed();
        let position = self.movement.update(input, camera, delta)?;
        self.clock.update(delta)?;

        self.recoil.update_recoil_recovery(delta)?;
        let recoil_kick = fire.map(|multiplier| self.recoil.apply_recoil_scaled(multiplier));
        let weapon = self.recoil.state();

        let movement = self.movement.state();
        let sway_target = self
            .oscillator
            .calculate_weapon_sway(movement.velocity, elapsed, delta);
        let sway = self.sway.follow(sway_target, delta);
        let bob = self.oscillator.calculate_weapon_bob(
            movement.velocity,
            movement.is_grounded,
            elapsed,
            delta,
        );

        let output = FrameOutput {
            frame: self.clock.frame_count,
            elapsed: self.clock.total_time,
            position,
            movement,
            events: self.movement.last_events(),
            weapon,
            recoil_kick,
            total_recoil: weapon.total_recoil,
            sway,
            bob,
            inaccuracy: self.movement.calculate_inaccuracy(),
        };
        trace!(frame = output.frame, "Frame simulated");
        self.last_output = output;
        Ok(output)
    }

    /// Externally triggered restart: standing at `(x, z)`, no recoil, clock at zero
    pub fn reset(&mut self, x: f32, z: f32) {
        self.movement.reset(x, z);
        self.recoil.reset();
        self.sway.reset();
        self.clock.reset();
        self.last_output = resting_output(&self.movement, &self.recoil);
    }
}

/// Snapshot before any frame has been stepped
fn resting_output(movement: &MovementController, recoil: &RecoilEngine) -> FrameOutput {
    let state = movement.state();
    FrameOutput {
        frame: 0,
        elapsed: 0.0,
        position: state.position,
        movement: state,
        events: TickEvents::default(),
        weapon: recoil.state(),
        recoil_kick: None,
        total_recoil: recoil.state().total_recoil,
        sway: Vec3::ZERO,
        bob: 0.0,
        inaccuracy: movement.calculate_inaccuracy(),
    }
}
