//! Acceleration and friction model
//!
//! Quake/Source style: acceleration only adds speed along the wish direction, friction is the
//! only thing that removes it.

use glam::Vec3;

/// Accelerate `velocity` toward `wish_speed` along `wish_dir`.
///
/// Only the component along `wish_dir` is raised; nothing is removed from orthogonal
/// components, and nothing happens once that component already meets `wish_speed`.
pub fn accelerate(
    velocity: Vec3,
    wish_dir: Vec3,
    wish_speed: f32,
    accel: f32,
    delta: f32,
) -> Vec3 {
    if wish_speed <= 0.0 {
        return velocity;
    }
    let current_speed = velocity.dot(wish_dir);
    let add_speed = wish_speed - current_speed;
    if add_speed <= 0.0 {
        return velocity;
    }
    let accel_speed = (accel * delta * wish_speed).min(add_speed);
    velocity + wish_dir * accel_speed
}

/// Air control variant of [`accelerate`].
///
/// The speed target is capped at `speed_cap` while the acceleration step still scales with
/// the uncapped wish speed, which is what lets strafing bend the trajectory without adding
/// straight-line speed.
pub fn air_accelerate(
    velocity: Vec3,
    wish_dir: Vec3,
    wish_speed: f32,
    speed_cap: f32,
    accel: f32,
    delta: f32,
) -> Vec3 {
    if wish_speed <= 0.0 {
        return velocity;
    }
    let capped = wish_speed.min(speed_cap);
    let current_speed = velocity.dot(wish_dir);
    let add_speed = capped - current_speed;
    if add_speed <= 0.0 {
        return velocity;
    }
    let accel_speed = (accel * delta * wish_speed).min(add_speed);
    velocity + wish_dir * accel_speed
}

/// Ground friction with a stop-speed floor.
///
/// Speeds under `epsilon` snap to exactly zero. The drop uses `max(speed, stop_speed)` so slow
/// movement dies out in a bounded number of ticks, and the result is zeroed rather than
/// reversed when the drop exceeds the current speed.
pub fn apply_friction(
    velocity: Vec3,
    friction: f32,
    stop_speed: f32,
    epsilon: f32,
    delta: f32,
) -> Vec3 {
    let speed = velocity.length();
    if speed < epsilon {
        return Vec3::ZERO;
    }
    if friction <= 0.0 {
        return velocity;
    }
    let control = speed.max(stop_speed);
    let drop = control * friction * delta;
    let new_speed = (speed - drop).max(0.0);
    if new_speed <= 0.0 {
        return Vec3::ZERO;
    }
    velocity * (new_speed / speed)
}
