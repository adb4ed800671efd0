//! Snap functionality for constraining drag vectors to angle increments.

use kurbo::Vec2;

/// Angle snap increment used for shift-constrained drags, in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 45.0;

/// Snap an angle to the nearest increment. Returns degrees in 0-360.
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    let snapped = (angle_degrees / increment).round() * increment;
    if snapped < 0.0 {
        snapped + 360.0
    } else if snapped >= 360.0 {
        snapped - 360.0
    } else {
        snapped
    }
}

/// Project a free drag vector onto the nearest multiple of the angle
/// increment, preserving the magnitude along the snapped direction.
///
/// The result is the projection of `delta` onto the snapped unit
/// direction, not a rotation of the raw vector.
pub fn snap_delta_to_angle(delta: Vec2, increment_degrees: f64) -> Vec2 {
    if delta.x == 0.0 && delta.y == 0.0 {
        return delta;
    }
    let angle = delta.y.atan2(delta.x).to_degrees();
    let snapped = snap_angle(angle, increment_degrees).to_radians();
    let dir = Vec2::new(snapped.cos(), snapped.sin());
    dir * delta.dot(dir)
}
