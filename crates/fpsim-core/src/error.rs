//! Error types for tick validation and configuration loading

/// Reasons a simulation tick is rejected.
///
/// A rejected tick never touches engine state; the host simply carries on next frame.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum TickError {
    #[error("Invalid delta time: {0} (must be finite and positive)")]
    InvalidDelta(f32),

    #[error("Input command contains non-finite axis values")]
    NonFiniteInput,

    #[error("Camera orientation contains non-finite components")]
    NonFiniteOrientation,
}

/// Errors found while validating a configuration table
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Config value `{0}` is not finite")]
    NonFinite(&'static str),

    #[error("Config value `{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("Config value `{0}` must be greater than zero")]
    NotPositive(&'static str),

    #[error("Crouch height {crouch} is above stand height {stand}")]
    CrouchAboveStand { crouch: f32, stand: f32 },

    #[error("Recoil pattern must contain at least one entry")]
    EmptyPattern,

    #[error("Recoil jitter {0} is too wide to sample")]
    JitterTooWide(f32),

    #[error("Crouch accuracy bonus {0} must lie in [0, 1]")]
    CrouchBonusOutOfRange(f32),
}
