//! fpsim Movement - First-person locomotion
//!
//! Source-engine style ground/air acceleration, stop-speed friction, smoothed crouching and a
//! stamina-gated jump economy, advanced once per frame by [`MovementController`].

mod controller;
mod inaccuracy;
pub mod physics;
pub mod stamina;

pub use controller::{LocomotionPhase, MovementController, MovementState, TickEvents};
pub use inaccuracy::calculate_inaccuracy;
