//! Scalar and planar helpers
//!
//! The world is a flat forest floor: gameplay distances and bearings live in
//! the XZ plane, with Y reserved for bobbing and camera height.

use core::f32::consts::{PI, TAU};
use glam::{Quat, Vec3};

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Single-pole low-pass step: move `current` toward `target` by `factor`
#[inline]
pub fn damp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Wrap an angle into `(-PI, PI]`
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Interpolate between two yaw angles along the shortest arc
#[inline]
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    wrap_angle(from + wrap_angle(to - from) * t)
}

/// Distance ignoring height
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Rotate a vector about the world up axis
#[inline]
pub fn rotate_y(v: Vec3, yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * v
}

/// Point on a horizontal circle around `center`
#[inline]
pub fn on_ring(center: Vec3, angle: f32, radius: f32) -> Vec3 {
    Vec3::new(
        center.x + angle.cos() * radius,
        center.y,
        center.z + angle.sin() * radius,
    )
}
