//! fpsim Core - Shared types and utilities for the fpsim simulation
//!
//! This crate provides the foundational pieces used by the movement and weapon crates:
//! - The named configuration table with documented units
//! - Per-tick input and camera orientation types
//! - Frame clock and delta sanitizing
//! - Tick and configuration error types

pub mod config;
pub mod error;
pub mod time;
pub mod types;

pub use config::{
    AccuracyConfig, MovementConfig, RecoilConfig, SimConfig, StaminaConfig, WeaponMotionConfig,
};
pub use error::{ConfigError, TickError};
pub use glam::{Vec2, Vec3};
pub use time::{sanitize_delta, FrameClock};
pub use types::{exp_smoothing, planar, planar_speed, CameraOrientation, InputCommand};
