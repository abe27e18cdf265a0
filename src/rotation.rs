//! View orientation expressed as pitch, yaw and roll.
//!
//! The world is Z-up: yaw turns about +Z starting from +X, pitch raises the
//! view toward +Z. All angles are radians.

use std::f32::consts::{PI, TAU};

use bevy::prelude::Reflect;
use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Orientation applied to a controller's view.
///
/// # Examples
/// ```
/// use aimtrack::ViewRotation;
/// use glam::Vec3;
///
/// let rot = ViewRotation::look_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0));
/// assert!((rot.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
/// assert!(rot.pitch.abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Reflect)]
pub struct ViewRotation {
    /// Elevation above the horizontal plane.
    pub pitch: f32,
    /// Heading about the vertical axis, measured from +X.
    pub yaw: f32,
    /// Twist about the forward axis.
    pub roll: f32,
}

/// Wraps an angle into `(-PI, PI]`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

impl ViewRotation {
    /// The identity orientation, looking down +X.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Builds a rotation from its three angles.
    #[must_use]
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Orientation whose forward vector points from `from` to `to`.
    ///
    /// Roll is always zero. Coincident points produce [`ViewRotation::ZERO`].
    #[must_use]
    pub fn look_at(from: Vec3, to: Vec3) -> Self {
        let dir = to - from;
        let yaw = dir.y.atan2(dir.x);
        let pitch = dir.z.atan2(dir.x.hypot(dir.y));
        Self::new(pitch, yaw, 0.0)
    }

    /// Returns the rotation with every axis wrapped into `(-PI, PI]`.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::new(wrap_angle(self.pitch), wrap_angle(self.yaw), wrap_angle(self.roll))
    }

    /// Shortest signed per-axis difference from `self` to `target`.
    #[must_use]
    pub fn delta_to(self, target: Self) -> Self {
        Self::new(
            wrap_angle(target.pitch - self.pitch),
            wrap_angle(target.yaw - self.yaw),
            wrap_angle(target.roll - self.roll),
        )
    }

    /// Largest absolute per-axis difference to `target` along the short way round.
    #[must_use]
    pub fn angle_to(self, target: Self) -> f32 {
        let d = self.delta_to(target);
        d.pitch.abs().max(d.yaw.abs()).max(d.roll.abs())
    }

    /// `true` when every axis magnitude is within `tolerance`.
    #[must_use]
    pub fn is_nearly_zero(self, tolerance: f32) -> bool {
        self.pitch.abs() <= tolerance && self.yaw.abs() <= tolerance && self.roll.abs() <= tolerance
    }

    /// Unit vector the view looks along.
    #[must_use]
    pub fn forward(self) -> Vec3 {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cp * cy, cp * sy, sp)
    }

    /// Quaternion equivalent for Z-up hosts.
    ///
    /// Positive pitch tilts +X toward +Z, which is a negative turn about +Y.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::ZYX, self.yaw, -self.pitch, self.roll)
    }
}

impl std::ops::Add for ViewRotation {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.pitch + other.pitch, self.yaw + other.yaw, self.roll + other.roll)
    }
}

impl std::ops::Mul<f32> for ViewRotation {
    type Output = Self;

    fn mul(self, scale: f32) -> Self {
        Self::new(self.pitch * scale, self.yaw * scale, self.roll * scale)
    }
}
