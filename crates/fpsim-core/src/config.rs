//! Simulation configuration table
//!
//! Every tunable coefficient used by the movement and weapon formulas lives here,
//! grouped by the component that consumes it. Units are world units (u), seconds (s)
//! and stamina points.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Full configuration table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimConfig {
    pub movement: MovementConfig,
    pub stamina: StaminaConfig,
    pub recoil: RecoilConfig,
    pub weapon_motion: WeaponMotionConfig,
    pub accuracy: AccuracyConfig,
}

impl SimConfig {
    /// Check every coefficient for values the formulas cannot handle
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.movement.validate()?;
        self.stamina.validate()?;
        self.recoil.validate()?;
        self.weapon_motion.validate()?;
        self.accuracy.validate()
    }
}

/// Locomotion tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Standing move speed (u/s)
    pub walk_speed: f32,
    /// Move speed while crouched (u/s)
    pub crouch_speed: f32,
    /// Ground acceleration (1/s, scaled by wish speed)
    pub acceleration: f32,
    /// Air acceleration (1/s, scaled by uncapped wish speed)
    pub air_acceleration: f32,
    /// Ceiling for the wish speed used while airborne (u/s)
    pub air_speed_cap: f32,
    /// Ground friction coefficient (1/s)
    pub ground_friction: f32,
    /// Speed floor used by the friction control term (u/s)
    pub stop_speed: f32,
    /// Speeds below this snap to exactly zero under friction (u/s)
    pub stop_epsilon: f32,
    /// Vertical velocity applied on jump (u/s)
    pub jump_velocity: f32,
    /// Downward acceleration while airborne (u/s²)
    pub gravity: f32,
    /// Standing eye height above the floor (u)
    pub stand_height: f32,
    /// Crouched eye height above the floor (u)
    pub crouch_height: f32,
    /// Exponential rate for the crouch height transition (1/s)
    pub crouch_smoothing: f32,
    /// Distance from `crouch_height` within which the character counts as crouching (u)
    pub crouch_tolerance: f32,
    /// World height of the floor plane (u)
    pub floor_height: f32,
    /// Largest delta a single tick integrates; longer frames are clamped (s)
    pub max_delta: f32,
    /// Scale the wish speed by stick deflection instead of always using the full move speed
    pub analog_wish_speed: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 2.6,
            crouch_speed: 1.3,
            acceleration: 50.0,
            air_acceleration: 100.0,
            air_speed_cap: 0.6,
            ground_friction: 12.0,
            stop_speed: 1.0,
            stop_epsilon: 1.0e-3,
            jump_velocity: 4.5,
            gravity: 9.81,
            stand_height: 1.6,
            crouch_height: 1.0,
            crouch_smoothing: 10.0,
            crouch_tolerance: 0.05,
            floor_height: 0.0,
            max_delta: 0.1,
            analog_wish_speed: false,
        }
    }
}

impl MovementConfig {
    /// Move speed for the derived crouch flag
    pub fn move_speed(&self, crouching: bool) -> f32 {
        if crouching {
            self.crouch_speed
        } else {
            self.walk_speed
        }
    }

    /// Target eye height for the crouch input
    pub fn target_height(&self, crouch: bool) -> f32 {
        if crouch {
            self.crouch_height
        } else {
            self.stand_height
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative(&[
            ("movement.walk_speed", self.walk_speed),
            ("movement.crouch_speed", self.crouch_speed),
            ("movement.acceleration", self.acceleration),
            ("movement.air_acceleration", self.air_acceleration),
            ("movement.air_speed_cap", self.air_speed_cap),
            ("movement.ground_friction", self.ground_friction),
            ("movement.stop_speed", self.stop_speed),
            ("movement.stop_epsilon", self.stop_epsilon),
            ("movement.jump_velocity", self.jump_velocity),
            ("movement.gravity", self.gravity),
            ("movement.stand_height", self.stand_height),
            ("movement.crouch_height", self.crouch_height),
            ("movement.crouch_smoothing", self.crouch_smoothing),
            ("movement.crouch_tolerance", self.crouch_tolerance),
        ])?;
        if !self.floor_height.is_finite() {
            return Err(ConfigError::NonFinite("movement.floor_height"));
        }
        if !self.max_delta.is_finite() {
            return Err(ConfigError::NonFinite("movement.max_delta"));
        }
        if self.max_delta <= 0.0 {
            return Err(ConfigError::NotPositive("movement.max_delta"));
        }
        if self.crouch_height > self.stand_height {
            return Err(ConfigError::CrouchAboveStand {
                crouch: self.crouch_height,
                stand: self.stand_height,
            });
        }
        Ok(())
    }
}

/// Jump stamina economy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    /// Maximum stamina (points)
    pub max: f32,
    /// Cost of a jump; a jump needs strictly more than this (points)
    pub jump_cost: f32,
    /// Cost charged on an airborne to grounded transition (points)
    pub land_cost: f32,
    /// Regeneration while grounded (points/s)
    pub recovery: f32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            max: 100.0,
            jump_cost: 30.0,
            land_cost: 10.0,
            recovery: 20.0,
        }
    }
}

impl StaminaConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative(&[
            ("stamina.max", self.max),
            ("stamina.jump_cost", self.jump_cost),
            ("stamina.land_cost", self.land_cost),
            ("stamina.recovery", self.recovery),
        ])
    }
}

/// Recoil pattern and recovery tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoilConfig {
    /// Per-shot offsets, applied cumulatively and indexed cyclically
    pub pattern: Vec<Vec2>,
    /// Scale applied to every pattern entry
    pub pattern_scale: f32,
    /// Rate at which the cumulative offset returns to zero (units/s)
    pub recovery_rate: f32,
    /// Pause after the last shot before the pattern index walks backward (s)
    pub reset_delay: f32,
    /// Maximum random variance added per axis to each shot (0 disables)
    pub jitter: f32,
    /// Seed for the default jitter generator
    pub seed: u64,
}

impl Default for RecoilConfig {
    fn default() -> Self {
        Self {
            pattern: vec![
                Vec2::new(0.0, -2.5),
                Vec2::new(-0.5, -2.8),
                Vec2::new(0.5, -3.0),
                Vec2::new(-0.8, -3.2),
                Vec2::new(1.0, -3.5),
            ],
            pattern_scale: 0.3,
            recovery_rate: 6.0,
            reset_delay: 0.3,
            jitter: 0.0,
            seed: 0x5eed,
        }
    }
}

impl RecoilConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        if !self.pattern.iter().all(|entry| entry.is_finite()) {
            return Err(ConfigError::NonFinite("recoil.pattern"));
        }
        check_non_negative(&[
            ("recoil.pattern_scale", self.pattern_scale),
            ("recoil.recovery_rate", self.recovery_rate),
            ("recoil.reset_delay", self.reset_delay),
            ("recoil.jitter", self.jitter),
        ])?;
        if !self.jitter_is_sampleable() {
            return Err(ConfigError::JitterTooWide(self.jitter));
        }
        Ok(())
    }

    /// Whether `-jitter..=jitter` has a finite width
    pub fn jitter_is_sampleable(&self) -> bool {
        (2.0 * self.jitter).is_finite()
    }
}

/// Weapon sway and bob oscillator tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponMotionConfig {
    /// Sway amplitude at reference speed (u)
    pub sway_amount: f32,
    /// Base sway angular frequency (rad/s)
    pub sway_speed: f32,
    /// Bob amplitude at reference speed (u)
    pub bob_amount: f32,
    /// Bob angular frequency at reference speed (rad/s)
    pub bob_speed: f32,
    /// Speed that maps to a factor of 1.0 (u/s)
    pub reference_speed: f32,
    /// Upper bound on the speed factor
    pub max_speed_factor: f32,
    /// Caller-side exponential smoothing rate for the sway offset (1/s)
    pub smoothing: f32,
}

impl Default for WeaponMotionConfig {
    fn default() -> Self {
        Self {
            sway_amount: 0.02,
            sway_speed: 1.5,
            bob_amount: 0.015,
            bob_speed: 10.0,
            reference_speed: 2.6,
            max_speed_factor: 1.5,
            smoothing: 8.0,
        }
    }
}

impl WeaponMotionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative(&[
            ("weapon_motion.sway_amount", self.sway_amount),
            ("weapon_motion.sway_speed", self.sway_speed),
            ("weapon_motion.bob_amount", self.bob_amount),
            ("weapon_motion.bob_speed", self.bob_speed),
            ("weapon_motion.reference_speed", self.reference_speed),
            ("weapon_motion.max_speed_factor", self.max_speed_factor),
            ("weapon_motion.smoothing", self.smoothing),
        ])?;
        if self.reference_speed == 0.0 {
            return Err(ConfigError::NotPositive("weapon_motion.reference_speed"));
        }
        Ok(())
    }
}

/// Spread model tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyConfig {
    /// Spread at rest
    pub base: f32,
    /// Spread added at full move speed
    pub movement: f32,
    /// Flat spread added while airborne
    pub airborne: f32,
    /// Multiplier applied while crouching (< 1 tightens)
    pub crouch_bonus: f32,
    /// Planar speed below which movement adds no spread (u/s)
    pub min_speed: f32,
}

impl Default for AccuracyConfig {
    fn default() -> Self {
        Self {
            base: 0.01,
            movement: 0.04,
            airborne: 0.08,
            crouch_bonus: 0.6,
            min_speed: 0.1,
        }
    }
}

impl AccuracyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative(&[
            ("accuracy.base", self.base),
            ("accuracy.movement", self.movement),
            ("accuracy.airborne", self.airborne),
            ("accuracy.crouch_bonus", self.crouch_bonus),
            ("accuracy.min_speed", self.min_speed),
        ])?;
        if self.crouch_bonus > 1.0 {
            return Err(ConfigError::CrouchBonusOutOfRange(self.crouch_bonus));
        }
        Ok(())
    }
}

fn check_non_negative(fields: &[(&'static str, f32)]) -> Result<(), ConfigError> {
    for &(field, value) in fields {
        if !value.is_finite() {
            return Err(ConfigError::NonFinite(field));
        }
        if value < 0.0 {
            return Err(ConfigError::Negative { field, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_move_speed_follows_crouch_flag() {
        let config = MovementConfig::default();
        assert_eq!(config.move_speed(false), config.walk_speed);
        assert_eq!(config.move_speed(true), config.crouch_speed);
    }

    #[test]
    fn test_rejects_negative_friction() {
        let mut config = SimConfig::default();
        config.movement.ground_friction = -1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "movement.ground_friction",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_rejects_empty_pattern() {
        let mut config = SimConfig::default();
        config.recoil.pattern.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyPattern));
    }

    #[test]
    fn test_rejects_crouch_above_stand() {
        let mut config = SimConfig::default();
        config.movement.crouch_height = 2.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CrouchAboveStand { .. })
        ));
    }

    #[test]
    fn test_rejects_nan_and_bonus_range() {
        let mut config = SimConfig::default();
        config.accuracy.base = f32::NAN;
        assert_eq!(config.validate(), Err(ConfigError::NonFinite("accuracy.base")));

        let mut config = SimConfig::default();
        config.accuracy.crouch_bonus = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::CrouchBonusOutOfRange(1.5)));
    }

    #[test]
    fn test_rejects_unsampleable_jitter() {
        let mut config = SimConfig::default();
        config.recoil.jitter = f32::MAX;
        assert_eq!(config.validate(), Err(ConfigError::JitterTooWide(f32::MAX)));

        config.recoil.jitter = 0.05;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_max_delta_rejected() {
        let mut config = SimConfig::default();
        config.movement.max_delta = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive("movement.max_delta"))
        );
    }
}
