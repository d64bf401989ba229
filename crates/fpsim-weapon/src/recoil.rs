//! Recoil pattern engine
//!
//! Shots walk a fixed pattern table and accumulate into a total offset; recovery pulls the total
//! back toward zero at a fixed rate and, after a pause, walks the pattern index backward.

use fpsim_core::{sanitize_delta, RecoilConfig, TickError};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Recoil state owned by a [`RecoilEngine`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponState {
    /// Shots into the pattern; indexes the table modulo its length
    pub recoil_index: usize,
    /// Cumulative unrecovered offset
    pub total_recoil: Vec2,
    /// Engine time of the most recent shot, `None` before the first
    pub last_shot_time: Option<f64>,
}

/// Deterministic recoil accumulator.
///
/// Optional per-shot variance comes from the injected generator `R`, so a fixed seed
/// reproduces exact trajectories.
pub struct RecoilEngine<R: Rng = StdRng> {
    config: RecoilConfig,
    state: WeaponState,
    /// Seconds of recovery time this engine has been advanced by
    clock: f64,
    rng: R,
}

impl RecoilEngine<StdRng> {
    /// Create an engine seeded from `config.seed`
    pub fn new(config: &RecoilConfig) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(config.seed))
    }
}

impl<R: Rng> RecoilEngine<R> {
    /// Create an engine drawing jitter from `rng`.
    ///
    /// A jitter too wide to sample is disabled rather than left to fail on the first shot.
    pub fn with_rng(config: &RecoilConfig, rng: R) -> Self {
        let mut config = config.clone();
        if !config.jitter_is_sampleable() {
            warn!(jitter = config.jitter, "Disabling unsampleable recoil jitter");
            config.jitter = 0.0;
        }
        Self {
            config,
            state: WeaponState::default(),
            clock: 0.0,
            rng,
        }
    }

    /// Value copy of the current state
    pub fn state(&self) -> WeaponState {
        self.state
    }

    /// Engine time in seconds
    pub fn time(&self) -> f64 {
        self.clock
    }

    /// Fire one shot at the normal strength
    pub fn apply_recoil(&mut self) -> Vec2 {
        self.apply_recoil_scaled(1.0)
    }

    /// Fire one shot with the pattern entry scaled by `multiplier` (e.g. a last-round penalty).
    ///
    /// Returns the per-shot kick; the same amount is added to the cumulative total.
    pub fn apply_recoil_scaled(&mut self, multiplier: f32) -> Vec2 {
        let pattern = &self.config.pattern;
        if pattern.is_empty() {
            return Vec2::ZERO;
        }
        let multiplier = if multiplier.is_finite() {
            multiplier
        } else {
            warn!(multiplier, "Ignoring non-finite recoil multiplier");
            1.0
        };

        let entry = pattern[self.state.recoil_index % pattern.len()];
        let mut kick = entry * self.config.pattern_scale * multiplier;
        let jitter = self.config.jitter;
        if jitter > 0.0 {
            kick += Vec2::new(
                self.rng.gen_range(-jitter..=jitter),
                self.rng.gen_range(-jitter..=jitter),
            );
        }

        self.state.total_recoil += kick;
        self.state.recoil_index = self.state.recoil_index.saturating_add(1);
        self.state.last_shot_time = Some(self.clock);
        trace!(
            index = self.state.recoil_index,
            kick = ?kick,
            total = ?self.state.total_recoil,
            "Recoil shot"
        );
        kick
    }

    /// Advance recovery by `delta` seconds and return the remaining total offset.
    ///
    /// Past `reset_delay` since the last shot the pattern index steps back by one per call.
    /// The recovery step is clamped to the current magnitude, so the total lands on zero
    /// instead of crossing it.
    pub fn update_recoil_recovery(&mut self, delta: f32) -> Result<Vec2, TickError> {
        let delta = sanitize_delta(delta, f32::MAX).inspect_err(|err| {
            warn!(%err, "Skipping recoil recovery");
        })?;
        self.clock += delta as f64;

        if let Some(last_shot) = self.state.last_shot_time {
            if self.clock - last_shot > self.config.reset_delay as f64 {
                self.state.recoil_index = self.state.recoil_index.saturating_sub(1);
            }
        }

        let total = self.state.total_recoil;
        let magnitude = total.length();
        if magnitude > 0.0 {
            let step = self.config.recovery_rate * delta;
            self.state.total_recoil = if step >= magnitude {
                Vec2::ZERO
            } else {
                total - total / magnitude * step
            };
        }
        Ok(self.state.total_recoil)
    }

    /// Clear all accumulated recoil and restart the engine clock
    pub fn reset(&mut self) {
        self.state = WeaponState::default();
        self.clock = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RecoilEngine {
        RecoilEngine::new(&RecoilConfig::default())
    }

    fn pattern_sum(config: &RecoilConfig, shots: usize) -> Vec2 {
        config.pattern[..shots].iter().copied().sum::<Vec2>() * config.pattern_scale
    }

    #[test]
    fn test_five_shots_accumulate_pattern() {
        let mut engine = engine();
        for _ in 0..5 {
            engine.apply_recoil();
        }
        let expected = 0.3
            * (Vec2::new(0.0, -2.5)
                + Vec2::new(-0.5, -2.8)
                + Vec2::new(0.5, -3.0)
                + Vec2::new(-0.8, -3.2)
                + Vec2::new(1.0, -3.5));
        let state = engine.state();
        assert!((state.total_recoil - expected).length() < 1e-5);
        assert_eq!(state.recoil_index, 5);
        assert_eq!(state.last_shot_time, Some(0.0));
    }

    #[test]
    fn test_partial_sums_match_pattern() {
        let config = RecoilConfig::default();
        for shots in 1..=config.pattern.len() {
            let mut engine = RecoilEngine::new(&config);
            for _ in 0..shots {
                engine.apply_recoil();
            }
            let expected = pattern_sum(&config, shots);
            assert!((engine.state().total_recoil - expected).length() < 1e-5);
        }
    }

    #[test]
    fn test_pattern_wraps_cyclically() {
        let config = RecoilConfig::default();
        let mut engine = RecoilEngine::new(&config);
        for _ in 0..config.pattern.len() {
            engine.apply_recoil();
        }
        let kick = engine.apply_recoil();
        assert!((kick - config.pattern[0] * config.pattern_scale).length() < 1e-6);
    }

    #[test]
    fn test_multiplier_scales_kick() {
        let config = RecoilConfig::default();
        let mut engine = RecoilEngine::new(&config);
        let kick = engine.apply_recoil_scaled(2.0);
        assert!((kick - config.pattern[0] * config.pattern_scale * 2.0).length() < 1e-6);
        assert_eq!(engine.state().total_recoil, kick);
    }

    #[test]
    fn test_recovery_is_monotonic_and_stops_at_zero() {
        let mut engine = engine();
        for _ in 0..5 {
            engine.apply_recoil();
        }
        let start = engine.state().total_recoil;
        let mut previous = start.length();
        let mut reached_zero = false;
        for _ in 0..200 {
            let total = engine.update_recoil_recovery(0.016).unwrap();
            let magnitude = total.length();
            if reached_zero {
                assert_eq!(total, Vec2::ZERO);
                continue;
            }
            if magnitude == 0.0 {
                reached_zero = true;
                continue;
            }
            assert!(magnitude < previous);
            // Never crosses past zero on either axis
            assert!(total.x * start.x >= 0.0);
            assert!(total.y * start.y >= 0.0);
            previous = magnitude;
        }
        assert!(reached_zero);
    }

    #[test]
    fn test_large_recovery_step_clamps_to_zero() {
        let mut engine = engine();
        engine.apply_recoil();
        assert_eq!(engine.update_recoil_recovery(10.0), Ok(Vec2::ZERO));
    }

    #[test]
    fn test_index_walks_back_after_pause() {
        let mut engine = engine();
        for _ in 0..3 {
            engine.apply_recoil();
        }
        // 0.2s: still within the reset delay
        engine.update_recoil_recovery(0.2).unwrap();
        assert_eq!(engine.state().recoil_index, 3);

        engine.update_recoil_recovery(0.2).unwrap();
        assert_eq!(engine.state().recoil_index, 2);
        engine.update_recoil_recovery(0.2).unwrap();
        engine.update_recoil_recovery(0.2).unwrap();
        assert_eq!(engine.state().recoil_index, 0);
        engine.update_recoil_recovery(0.2).unwrap();
        assert_eq!(engine.state().recoil_index, 0);
    }

    #[test]
    fn test_sustained_fire_keeps_climbing() {
        let mut engine = engine();
        for _ in 0..10 {
            engine.apply_recoil();
            engine.update_recoil_recovery(0.1).unwrap();
        }
        assert_eq!(engine.state().recoil_index, 10);
        assert!((engine.state().last_shot_time.unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let config = RecoilConfig {
            jitter: 0.05,
            ..Default::default()
        };
        let mut a = RecoilEngine::with_rng(&config, StdRng::seed_from_u64(7));
        let mut b = RecoilEngine::with_rng(&config, StdRng::seed_from_u64(7));
        for _ in 0..8 {
            assert_eq!(a.apply_recoil(), b.apply_recoil());
        }

        let mut c = RecoilEngine::with_rng(&config, StdRng::seed_from_u64(8));
        let mut d = RecoilEngine::with_rng(&config, StdRng::seed_from_u64(7));
        let differs = (0..8).any(|_| c.apply_recoil() != d.apply_recoil());
        assert!(differs);
    }

    #[test]
    fn test_jitter_stays_within_bounds() {
        let config = RecoilConfig {
            jitter: 0.05,
            ..Default::default()
        };
        let mut engine = RecoilEngine::new(&config);
        for shot in 0..20 {
            let base = config.pattern[shot % config.pattern.len()] * config.pattern_scale;
            let kick = engine.apply_recoil();
            assert!((kick.x - base.x).abs() <= 0.05 + 1e-6);
            assert!((kick.y - base.y).abs() <= 0.05 + 1e-6);
        }
    }

    #[test]
    fn test_unsampleable_jitter_falls_back_to_pattern() {
        let config = RecoilConfig {
            jitter: f32::MAX,
            ..Default::default()
        };
        let mut engine = RecoilEngine::new(&config);
        let kick = engine.apply_recoil();
        assert_eq!(kick, config.pattern[0] * config.pattern_scale);
    }

    #[test]
    fn test_invalid_delta_is_rejected() {
        let mut engine = engine();
        engine.apply_recoil();
        let before = engine.state();
        assert!(engine.update_recoil_recovery(f32::NAN).is_err());
        assert!(engine.update_recoil_recovery(-1.0).is_err());
        assert_eq!(engine.state(), before);
        assert_eq!(engine.time(), 0.0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut engine = engine();
        engine.apply_recoil();
        engine.update_recoil_recovery(0.05).unwrap();
        engine.reset();
        assert_eq!(engine.state(), WeaponState::default());
        assert_eq!(engine.time(), 0.0);
    }
}
