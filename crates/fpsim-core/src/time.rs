//! Frame timing
//!
//! Tracks elapsed simulation time and guards every engine against malformed or stalled deltas.

use tracing::debug;

use crate::error::TickError;

/// Validate a frame delta and clamp it to `max_delta`.
///
/// Non-finite and non-positive deltas are rejected. Deltas longer than `max_delta`
/// (tab/background stalls) are clamped so one frame cannot launch the character.
pub fn sanitize_delta(delta: f32, max_delta: f32) -> Result<f32, TickError> {
    if !delta.is_finite() || delta <= 0.0 {
        return Err(TickError::InvalidDelta(delta));
    }
    if delta > max_delta {
        debug!(delta, max_delta, "Clamping long frame delta");
        return Ok(max_delta);
    }
    Ok(delta)
}

/// Elapsed-time tracking for the oscillators and frame counters
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Time since the clock started in seconds
    pub total_time: f64,
    /// Frame counter
    pub frame_count: u64,
    /// Maximum delta accepted per frame
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl FrameClock {
    /// Create a clock that clamps frames to `max_delta` seconds
    pub fn new(max_delta: f32) -> Self {
        Self {
            total_time: 0.0,
            frame_count: 0,
            max_delta,
        }
    }

    /// Advance by the raw delta of the previous frame.
    ///
    /// Returns the clamped delta. Invalid deltas leave the clock untouched.
    pub fn update(&mut self, raw_delta: f32) -> Result<f32, TickError> {
        let delta = sanitize_delta(raw_delta, self.max_delta)?;
        self.frame_count += 1;
        self.total_time += delta as f64;
        Ok(delta)
    }

    /// Elapsed time as `f32` for the oscillators
    pub fn elapsed(&self) -> f32 {
        self.total_time as f32
    }

    /// Restart from zero, keeping the clamp
    pub fn reset(&mut self) {
        *self = Self::new(self.max_delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_rejects_bad_deltas() {
        assert_eq!(sanitize_delta(0.0, 0.1), Err(TickError::InvalidDelta(0.0)));
        assert_eq!(sanitize_delta(-0.01, 0.1), Err(TickError::InvalidDelta(-0.01)));
        assert!(sanitize_delta(f32::NAN, 0.1).is_err());
        assert!(sanitize_delta(f32::INFINITY, 0.1).is_err());
    }

    #[test]
    fn test_sanitize_clamps_stalls() {
        assert_eq!(sanitize_delta(0.016, 0.1), Ok(0.016));
        assert_eq!(sanitize_delta(3.0, 0.1), Ok(0.1));
    }

    #[test]
    fn test_frame_clock() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.update(0.016), Ok(0.016));
        assert_eq!(clock.frame_count, 1);
        assert!(clock.elapsed() > 0.0);

        // Stalls advance by the clamp only
        assert_eq!(clock.update(2.0), Ok(0.1));
        assert!((clock.total_time - 0.116).abs() < 1e-6);

        assert!(clock.update(f32::NAN).is_err());
        assert_eq!(clock.frame_count, 2);

        clock.reset();
        assert_eq!(clock.frame_count, 0);
        assert_eq!(clock.total_time, 0.0);
    }
}
