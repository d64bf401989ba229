//! fpsim - First-person locomotion and weapon recoil simulation
//!
//! Ties the movement and weapon crates together behind a single per-frame facade and provides
//! settings persistence plus scripted scenarios for the headless driver.

pub mod scenario;
pub mod settings;
pub mod simulation;

pub use scenario::{Scenario, ScriptedFrame};
pub use simulation::{FrameOutput, FrameSimulation};
