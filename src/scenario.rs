//! Scripted input scenarios for the headless driver

use clap::ValueEnum;
use fpsim_core::{CameraOrientation, InputCommand};

/// Frames between shots while spraying (10 rounds/s at 60 Hz)
const SHOT_INTERVAL: u64 = 6;
/// Rounds per magazine
const MAGAZINE_SIZE: u64 = 30;
/// Frames spent reloading between magazines
const RELOAD_FRAMES: u64 = 90;
/// Recoil multiplier for the final round of a magazine
const LAST_ROUND_MULTIPLIER: f32 = 1.5;

/// One frame of scripted host input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedFrame {
    pub input: InputCommand,
    pub camera: CameraOrientation,
    /// Recoil multiplier when a shot is fired this frame
    pub fire: Option<f32>,
}

impl ScriptedFrame {
    fn new(input: InputCommand, camera: CameraOrientation) -> Self {
        Self {
            input,
            camera,
            fire: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Hold forward for the whole run
    Walk,
    /// Strafe right while the camera turns slowly
    Strafe,
    /// Walk forward and jump once a second
    Jump,
    /// Walk forward, crouching through the middle of the run
    Crouch,
    /// Stand still and empty magazines with reloads in between
    Spray,
}

impl Scenario {
    /// Input for frame `tick` (zero-based)
    pub fn frame(self, tick: u64) -> ScriptedFrame {
        let camera = CameraOrientation::default();
        match self {
            Scenario::Walk => ScriptedFrame::new(InputCommand::axes(1.0, 0.0), camera),
            Scenario::Strafe => {
                let yaw = tick as f32 * 0.01;
                ScriptedFrame::new(
                    InputCommand::axes(0.0, 1.0),
                    CameraOrientation::from_yaw_pitch(yaw, 0.0),
                )
            }
            Scenario::Jump => {
                let mut input = InputCommand::axes(1.0, 0.0);
                if tick % 60 == 30 {
                    input = input.with_jump();
                }
                ScriptedFrame::new(input, camera)
            }
            Scenario::Crouch => {
                let mut input = InputCommand::axes(1.0, 0.0);
                if (60..180).contains(&tick) {
                    input = input.with_crouch();
                }
                ScriptedFrame::new(input, camera)
            }
            Scenario::Spray => ScriptedFrame {
                fire: spray_shot(tick),
                ..ScriptedFrame::new(InputCommand::default(), camera)
            },
        }
    }
}

fn spray_shot(tick: u64) -> Option<f32> {
    let cycle = MAGAZINE_SIZE * SHOT_INTERVAL + RELOAD_FRAMES;
    let within = tick % cycle;
    if within % SHOT_INTERVAL != 0 || within >= MAGAZINE_SIZE * SHOT_INTERVAL {
        return None;
    }
    let round = within / SHOT_INTERVAL + 1;
    if round == MAGAZINE_SIZE {
        Some(LAST_ROUND_MULTIPLIER)
    } else {
        Some(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spray_fires_one_magazine_per_cycle() {
        let cycle = MAGAZINE_SIZE * SHOT_INTERVAL + RELOAD_FRAMES;
        let shots: Vec<f32> = (0..cycle)
            .filter_map(|tick| Scenario::Spray.frame(tick).fire)
            .collect();
        assert_eq!(shots.len(), MAGAZINE_SIZE as usize);
        assert_eq!(shots.last(), Some(&LAST_ROUND_MULTIPLIER));
        assert!(shots[..shots.len() - 1].iter().all(|&m| m == 1.0));
    }

    #[test]
    fn test_spray_pauses_while_reloading() {
        let reload_start = MAGAZINE_SIZE * SHOT_INTERVAL;
        for tick in reload_start..reload_start + RELOAD_FRAMES {
            assert_eq!(Scenario::Spray.frame(tick).fire, None);
        }
        assert_eq!(
            Scenario::Spray.frame(reload_start + RELOAD_FRAMES).fire,
            Some(1.0)
        );
    }

    #[test]
    fn test_jump_presses_once_per_second() {
        let jumps = (0..240).filter(|&t| Scenario::Jump.frame(t).input.jump).count();
        assert_eq!(jumps, 4);
    }

    #[test]
    fn test_crouch_window() {
        assert!(!Scenario::Crouch.frame(59).input.crouch);
        assert!(Scenario::Crouch.frame(60).input.crouch);
        assert!(!Scenario::Crouch.frame(180).input.crouch);
    }

    #[test]
    fn test_only_spray_fires() {
        for scenario in [Scenario::Walk, Scenario::Strafe, Scenario::Jump, Scenario::Crouch] {
            assert!((0..400).all(|t| scenario.frame(t).fire.is_none()));
        }
    }
}
