//! Weapon sway and bob oscillators
//!
//! Both are stateless functions of velocity and time. Inertia comes from the caller smoothing
//! the sway target across frames with [`OffsetSmoother`].

use fpsim_core::{exp_smoothing, planar_speed, WeaponMotionConfig};
use glam::Vec3;

/// Sway/bob oscillator for the held weapon
#[derive(Debug, Clone)]
pub struct WeaponOscillator {
    config: WeaponMotionConfig,
}

impl WeaponOscillator {
    pub fn new(config: &WeaponMotionConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &WeaponMotionConfig {
        &self.config
    }

    /// Planar speed normalized against the reference walk speed
    fn speed_factor(&self, velocity: Vec3) -> f32 {
        if self.config.reference_speed <= 0.0 {
            return 0.0;
        }
        (planar_speed(velocity) / self.config.reference_speed)
            .clamp(0.0, self.config.max_speed_factor)
    }

    /// Sway offset sampled at the end of the frame (`elapsed + delta`).
    ///
    /// Each axis runs its own sine/cosine at a different multiple of `sway_speed`, with the
    /// amplitude scaled by lateral speed. Non-finite arguments give a zero offset.
    pub fn calculate_weapon_sway(&self, velocity: Vec3, elapsed: f32, delta: f32) -> Vec3 {
        if !velocity.is_finite() || !elapsed.is_finite() || !delta.is_finite() {
            return Vec3::ZERO;
        }
        let factor = self.speed_factor(velocity);
        if factor <= 0.0 {
            return Vec3::ZERO;
        }

        let t = elapsed + delta.max(0.0);
        let amount = self.config.sway_amount * factor;
        let w = self.config.sway_speed;
        Vec3::new(
            (t * w).sin() * amount,
            (t * w * 2.0).cos() * amount * 0.5,
            (t * w * 0.5).sin() * amount * 0.25,
        )
    }

    /// Vertical bob, zero unless grounded.
    ///
    /// Amplitude and frequency both scale with speed relative to the reference walk speed.
    pub fn calculate_weapon_bob(
        &self,
        velocity: Vec3,
        grounded: bool,
        elapsed: f32,
        delta: f32,
    ) -> f32 {
        if !grounded || !velocity.is_finite() || !elapsed.is_finite() || !delta.is_finite() {
            return 0.0;
        }
        let factor = self.speed_factor(velocity);
        if factor <= 0.0 {
            return 0.0;
        }

        let t = elapsed + delta.max(0.0);
        (t * self.config.bob_speed * factor).sin() * self.config.bob_amount * factor
    }
}

/// Exponential follower that gives the sway target its inertia
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetSmoother {
    /// Current smoothed offset
    pub offset: Vec3,
    /// Follow rate (1/s)
    pub rate: f32,
}

impl OffsetSmoother {
    pub fn new(rate: f32) -> Self {
        Self {
            offset: Vec3::ZERO,
            rate,
        }
    }

    /// Move toward `target` by a frame-rate independent fraction and return the new offset
    pub fn follow(&mut self, target: Vec3, delta: f32) -> Vec3 {
        if !target.is_finite() || !delta.is_finite() || delta <= 0.0 {
            return self.offset;
        }
        self.offset = self.offset.lerp(target, exp_smoothing(self.rate, delta));
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = Vec3::ZERO;
    }
}
