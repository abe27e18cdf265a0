//! Utility helpers for tests.
pub mod host;

use aimtrack::ViewRotation;

pub use host::{FakeControls, FakeScene};

/// Assert that two rotations agree on every axis within `tolerance` radians,
/// comparing the short way round.
///
/// # Panics
/// Panics with both rotations if any axis differs by more than `tolerance`.
pub fn assert_rotation_near(actual: ViewRotation, expected: ViewRotation, tolerance: f32) {
    let gap = actual.angle_to(expected);
    assert!(
        gap <= tolerance,
        "rotation {actual:?} is {gap} rad from {expected:?} (tolerance {tolerance})"
    );
}
