//! Stamina economy for jumping and landing

use fpsim_core::StaminaConfig;

/// Spend the jump cost if the pool holds strictly more than it.
///
/// Returns the remaining stamina, or `None` when the jump is refused.
pub fn spend_jump(stamina: f32, config: &StaminaConfig) -> Option<f32> {
    if stamina > config.jump_cost {
        Some((stamina - config.jump_cost).clamp(0.0, config.max))
    } else {
        None
    }
}

/// Charge the landing cost, never dropping below zero
pub fn apply_landing(stamina: f32, config: &StaminaConfig) -> f32 {
    (stamina - config.land_cost).clamp(0.0, config.max)
}

/// Passive regeneration toward the maximum
pub fn regenerate(stamina: f32, config: &StaminaConfig, delta: f32) -> f32 {
    (stamina + config.recovery * delta).clamp(0.0, config.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_requires_more_than_cost() {
        let config = StaminaConfig::default();
        assert_eq!(spend_jump(config.jump_cost, &config), None);
        assert_eq!(spend_jump(25.0, &config), None);
        assert_eq!(spend_jump(50.0, &config), Some(20.0));
    }

    #[test]
    fn test_landing_floors_at_zero() {
        let config = StaminaConfig::default();
        assert_eq!(apply_landing(4.0, &config), 0.0);
        assert_eq!(apply_landing(50.0, &config), 40.0);
    }

    #[test]
    fn test_regenerate_caps_at_max() {
        let config = StaminaConfig::default();
        assert!((regenerate(50.0, &config, 0.5) - 60.0).abs() < 1e-5);
        assert_eq!(regenerate(99.9, &config, 1.0), config.max);
    }
}
