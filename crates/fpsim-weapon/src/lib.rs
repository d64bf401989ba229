//! fpsim Weapon - Held weapon recoil and motion
//!
//! Provides the recoil pattern engine with bounded recovery, plus the sway/bob oscillators
//! that drive the weapon's visual offset.

mod oscillator;
mod recoil;

pub use oscillator::{OffsetSmoother, WeaponOscillator};
pub use recoil::{RecoilEngine, WeaponState};
