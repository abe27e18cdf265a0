//! Host-facing traits through which the tracker sees and steers the world.
//!
//! `H` is whatever handle the host uses to name actors and controllers.
//! Handles are weak: every lookup may report that the referent is gone.

use glam::Vec3;

use crate::rotation::ViewRotation;

/// Read access to the positions the tracker aims from and at.
pub trait SceneLookup<H> {
    /// Location of the actor owning the tracker, or `None` once it is gone.
    fn owner_location(&self) -> Option<Vec3>;

    /// Location of a camera attached to the owner, if there is one.
    fn owner_camera_location(&self) -> Option<Vec3>;

    /// The controller driving the owner's view.
    fn owner_controller(&self) -> Option<H>;

    /// Current location of `actor`, or `None` if the handle no longer resolves.
    fn actor_location(&self, actor: H) -> Option<Vec3>;
}

/// Read and write access to a controller's view rotation.
pub trait RotationControl<H> {
    /// Current rotation of `controller`, or `None` if the handle is stale.
    fn control_rotation(&self, controller: H) -> Option<ViewRotation>;

    /// Overwrites the rotation of `controller`.
    fn set_control_rotation(&mut self, controller: H, rotation: ViewRotation);
}
