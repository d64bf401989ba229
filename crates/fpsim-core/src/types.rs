//! Per-tick input types and small vector helpers

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Player intent sampled once per tick by the input collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputCommand {
    /// Forward/backward axis in [-1, 1]
    pub forward: f32,
    /// Right/left axis in [-1, 1]
    pub right: f32,
    pub jump: bool,
    pub crouch: bool,
}

impl InputCommand {
    /// Input with only the movement axes set
    pub fn axes(forward: f32, right: f32) -> Self {
        Self {
            forward,
            right,
            ..Default::default()
        }
    }

    /// Builder-style jump request
    pub fn with_jump(mut self) -> Self {
        self.jump = true;
        self
    }

    /// Builder-style crouch request
    pub fn with_crouch(mut self) -> Self {
        self.crouch = true;
        self
    }

    /// Whether both axes are finite numbers
    pub fn is_finite(&self) -> bool {
        self.forward.is_finite() && self.right.is_finite()
    }

    /// Copy with both axes clamped into [-1, 1]
    pub fn clamped(&self) -> Self {
        Self {
            forward: self.forward.clamp(-1.0, 1.0),
            right: self.right.clamp(-1.0, 1.0),
            ..*self
        }
    }
}

/// Camera basis read each tick to project input into the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOrientation {
    /// View forward direction (may include pitch)
    pub forward: Vec3,
    /// View right direction
    pub right: Vec3,
}

impl Default for CameraOrientation {
    fn default() -> Self {
        Self::from_yaw_pitch(0.0, 0.0)
    }
}

impl CameraOrientation {
    /// Build the basis from yaw and pitch in radians (-Z is forward at yaw 0)
    pub fn from_yaw_pitch(yaw: f32, pitch: f32) -> Self {
        let cos_pitch = pitch.cos();
        Self {
            forward: Vec3::new(yaw.sin() * cos_pitch, pitch.sin(), -yaw.cos() * cos_pitch),
            right: Vec3::new(yaw.cos(), 0.0, yaw.sin()),
        }
    }

    /// Forward flattened onto the horizontal plane, or zero when looking straight up/down
    pub fn flat_forward(&self) -> Vec3 {
        planar(self.forward).normalize_or_zero()
    }

    /// Right flattened onto the horizontal plane
    pub fn flat_right(&self) -> Vec3 {
        planar(self.right).normalize_or_zero()
    }

    pub fn is_finite(&self) -> bool {
        self.forward.is_finite() && self.right.is_finite()
    }
}

/// Drop the vertical component
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Horizontal speed of a velocity
pub fn planar_speed(v: Vec3) -> f32 {
    v.x.hypot(v.z)
}

/// Frame-rate independent blend factor for exponential interpolation: `1 - e^(-rate * delta)`
pub fn exp_smoothing(rate: f32, delta: f32) -> f32 {
    1.0 - (-rate * delta).exp()
}
