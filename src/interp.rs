//! Frame-rate aware interpolation toward a target.
//!
//! Each call moves a fraction `delta_seconds * speed` (clamped to `[0, 1]`)
//! of the remaining distance, so repeated calls approach the target
//! exponentially and never overshoot it.
use glam::Vec3;

use crate::rotation::ViewRotation;

/// Squared distance below which a position counts as having arrived.
pub const POSITION_SNAP_DISTANCE_SQUARED: f32 = 1.0e-4;

/// Per-axis angle in radians below which a rotation counts as having arrived.
pub const ROTATION_SNAP_ANGLE: f32 = 1.0e-4;

fn step_fraction(delta_seconds: f32, speed: f32) -> f32 {
    (delta_seconds * speed).clamp(0.0, 1.0)
}

/// Moves `current` toward `target`.
///
/// A non-positive `speed` snaps straight to the target.
///
/// # Examples
/// ```
/// use aimtrack::vec_interp_to;
/// use glam::Vec3;
///
/// let next = vec_interp_to(Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), 0.1, 5.0);
/// assert!((next.x - 5.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn vec_interp_to(current: Vec3, target: Vec3, delta_seconds: f32, speed: f32) -> Vec3 {
    if speed <= 0.0 {
        return target;
    }

    let dist = target - current;
    if dist.length_squared() < POSITION_SNAP_DISTANCE_SQUARED {
        return target;
    }

    current + dist * step_fraction(delta_seconds, speed)
}

/// Turns `current` toward `target` along the shortest way round each axis.
///
/// A zero `delta_seconds` leaves the rotation untouched; a non-positive
/// `speed` snaps to the target.
#[must_use]
pub fn rot_interp_to(
    current: ViewRotation,
    target: ViewRotation,
    delta_seconds: f32,
    speed: f32,
) -> ViewRotation {
    if delta_seconds == 0.0 || current == target {
        return current;
    }
    if speed <= 0.0 {
        return target;
    }

    let delta = current.delta_to(target);
    if delta.is_nearly_zero(ROTATION_SNAP_ANGLE) {
        return target;
    }

    (current + delta * step_fraction(delta_seconds, speed)).normalized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f32::consts::PI;

    #[rstest]
    #[case::zero_speed(0.0)]
    #[case::negative_speed(-3.0)]
    fn vec_non_positive_speed_snaps(#[case] speed: f32) {
        let target = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(vec_interp_to(Vec3::ZERO, target, 0.016, speed), target);
    }

    #[test]
    fn vec_close_enough_snaps() {
        let target = Vec3::new(1.0, 1.0, 1.0);
        let current = target + Vec3::splat(0.001);
        assert_eq!(vec_interp_to(current, target, 0.001, 1.0), target);
    }

    #[test]
    fn vec_large_step_clamps_to_target() {
        let target = Vec3::new(-4.0, 8.0, 0.5);
        let next = vec_interp_to(Vec3::ZERO, target, 1.0, 100.0);
        assert_relative_eq!(next.x, target.x);
        assert_relative_eq!(next.y, target.y);
        assert_relative_eq!(next.z, target.z);
    }

    #[test]
    fn vec_negative_delta_does_not_move_backwards() {
        let target = Vec3::new(5.0, 0.0, 0.0);
        let next = vec_interp_to(Vec3::ZERO, target, -1.0, 10.0);
        assert_eq!(next, Vec3::ZERO);
    }

    #[test]
    fn rot_zero_delta_keeps_current() {
        let current = ViewRotation::new(0.1, 0.2, 0.0);
        let target = ViewRotation::new(0.5, -1.0, 0.0);
        assert_eq!(rot_interp_to(current, target, 0.0, 10.0), current);
    }

    #[test]
    fn rot_non_positive_speed_snaps() {
        let current = ViewRotation::new(0.1, 0.2, 0.0);
        let target = ViewRotation::new(0.5, -1.0, 0.0);
        assert_eq!(rot_interp_to(current, target, 0.016, 0.0), target);
    }

    #[test]
    fn rot_moves_fraction_of_remaining_angle() {
        let current = ViewRotation::ZERO;
        let target = ViewRotation::new(0.4, 1.0, 0.0);
        let next = rot_interp_to(current, target, 0.1, 2.5);
        assert_relative_eq!(next.pitch, 0.1, epsilon = 1e-6);
        assert_relative_eq!(next.yaw, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn rot_crosses_seam_the_short_way() {
        let current = ViewRotation::new(0.0, PI - 0.1, 0.0);
        let target = ViewRotation::new(0.0, -PI + 0.1, 0.0);
        let next = rot_interp_to(current, target, 0.1, 5.0);
        // Half of the 0.2 rad gap closes, landing on the seam.
        assert_relative_eq!(next.yaw.abs(), PI, epsilon = 1e-5);
        assert_relative_eq!(next.angle_to(target), 0.1, epsilon = 1e-5);
    }
}
