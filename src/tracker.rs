//! Aim state for a single owner and the per-frame update that steers its view.
//!
//! The tracker never owns the things it aims at. Actors and controllers are
//! referenced by handle and re-resolved through the [`SceneLookup`] and
//! [`RotationControl`] ports each time they are used, so a vanished referent
//! simply turns the affected step into a no-op.

use std::fmt::Debug;

use bevy::prelude::Component;
use glam::Vec3;
use log::debug;
use thiserror::Error;

use crate::interp::{rot_interp_to, vec_interp_to};
use crate::ports::{RotationControl, SceneLookup};
use crate::rotation::ViewRotation;
use crate::target::AimTarget;

/// Interpolation speed used until an operation supplies one.
pub const DEFAULT_INTERP_SPEED: f32 = 10.0;

/// Why an aim operation left the tracker untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AimError {
    /// The owner has no controller whose view could be rotated.
    #[error("owner has no controller to rotate")]
    NoController,
    /// The requested actor was absent or no longer resolves.
    #[error("target actor is missing or no longer valid")]
    MissingTarget,
    /// No tracker is attached to the addressed owner.
    #[error("owner has no aim tracker")]
    MissingOwner,
}

/// Aim state attached to an owning actor.
///
/// Operations return `Err` purely as a diagnostic; on error the aim is
/// exactly as it was before the call. Only the controller cache may have been
/// refreshed.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct AimTracker<H: Copy + Eq + Debug + Send + Sync + 'static> {
    tracked_actor: Option<H>,
    controller: Option<H>,
    target_location: Vec3,
    interp_speed: f32,
    tracking: bool,
    smooth: bool,
}

impl<H: Copy + Eq + Debug + Send + Sync + 'static> Default for AimTracker<H> {
    fn default() -> Self {
        Self {
            tracked_actor: None,
            controller: None,
            target_location: Vec3::ZERO,
            interp_speed: DEFAULT_INTERP_SPEED,
            tracking: false,
            smooth: false,
        }
    }
}

impl<H: Copy + Eq + Debug + Send + Sync + 'static> AimTracker<H> {
    /// Creates an idle tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the per-frame update is steering the view.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Whether rotation is interpolated rather than snapped.
    #[must_use]
    pub const fn is_smooth(&self) -> bool {
        self.smooth
    }

    /// The point currently aimed at.
    #[must_use]
    pub const fn target_location(&self) -> Vec3 {
        self.target_location
    }

    /// Rate constant for both position and rotation interpolation.
    #[must_use]
    pub const fn interp_speed(&self) -> f32 {
        self.interp_speed
    }

    /// Handle of the actor being followed, if any.
    #[must_use]
    pub const fn tracked_actor(&self) -> Option<H> {
        self.tracked_actor
    }

    /// Last controller handle the owner reported.
    #[must_use]
    pub const fn controller(&self) -> Option<H> {
        self.controller
    }

    /// Controller the owner currently answers to.
    ///
    /// A controller reported by the owner replaces the cached one, so a
    /// re-possessed owner steers its new controller. The cache is only the
    /// fallback while the owner reports none.
    fn resolve_controller(&mut self, scene: &impl SceneLookup<H>) -> Result<H, AimError> {
        if let Some(current) = scene.owner_controller() {
            if self.controller.is_some_and(|cached| cached != current) {
                debug!("controller changed to {current:?}");
            }
            self.controller = Some(current);
        }
        self.controller.ok_or(AimError::NoController)
    }

    /// Aims at a fixed world location.
    ///
    /// Without smoothing the view snaps at once, measured from the owner's
    /// own location, and later frames keep it pinned there.
    ///
    /// # Errors
    /// [`AimError::NoController`] when the owner has no controller.
    pub fn aim_at_location(
        &mut self,
        target: Vec3,
        speed: f32,
        smooth: bool,
        scene: &impl SceneLookup<H>,
        controls: &mut impl RotationControl<H>,
    ) -> Result<(), AimError> {
        let controller = self.resolve_controller(scene)?;

        self.interp_speed = speed;
        self.tracking = true;
        self.smooth = smooth;
        self.target_location = target;
        debug!("aiming at {target:?} (speed {speed}, smooth {smooth})");

        if !smooth {
            if let Some(origin) = scene.owner_location() {
                let rotation = ViewRotation::look_at(origin, target);
                controls.set_control_rotation(controller, rotation);
            }
        }
        Ok(())
    }

    /// Starts following `actor`.
    ///
    /// The aim point begins at the actor's current location. With smoothing
    /// it chases the actor every frame; without, it stays where it started.
    ///
    /// # Errors
    /// [`AimError::NoController`] when the owner has no controller,
    /// [`AimError::MissingTarget`] when `actor` is `None` or does not resolve.
    pub fn start_tracking_actor(
        &mut self,
        actor: Option<H>,
        speed: f32,
        smooth: bool,
        scene: &impl SceneLookup<H>,
    ) -> Result<(), AimError> {
        let controller = self.resolve_controller(scene);
        let (handle, location) = actor
            .and_then(|a| scene.actor_location(a).map(|loc| (a, loc)))
            .ok_or(AimError::MissingTarget)?;
        controller?;

        self.tracked_actor = Some(handle);
        self.interp_speed = speed;
        self.tracking = true;
        self.smooth = smooth;
        self.target_location = location;
        debug!("tracking {handle:?} from {location:?} (speed {speed}, smooth {smooth})");
        Ok(())
    }

    /// Stops steering the view and forgets the tracked actor.
    ///
    /// The current rotation is left where it is.
    pub fn stop_tracking(&mut self) {
        if self.tracking {
            debug!("aim tracking stopped");
        }
        self.tracking = false;
        self.tracked_actor = None;
    }

    /// Drops any current aim, then aims at `target`.
    ///
    /// A `continuous` aim keeps adjusting with smoothing. A one-off aim at an
    /// actor samples its location now and snaps to it.
    ///
    /// The target and controller are checked before the current aim is
    /// dropped, so a failed call leaves an active track running.
    ///
    /// # Errors
    /// [`AimError::MissingTarget`] when an actor target does not resolve,
    /// [`AimError::NoController`] when the owner has no controller.
    pub fn aim_at(
        &mut self,
        target: AimTarget<H>,
        speed: f32,
        continuous: bool,
        scene: &impl SceneLookup<H>,
        controls: &mut impl RotationControl<H>,
    ) -> Result<(), AimError> {
        let controller = self.resolve_controller(scene);
        let location = match target {
            AimTarget::Location(point) => point,
            AimTarget::Actor(actor) => scene
                .actor_location(actor)
                .ok_or(AimError::MissingTarget)?,
        };
        controller?;

        self.stop_tracking();
        match target {
            AimTarget::Actor(actor) if continuous => {
                self.start_tracking_actor(Some(actor), speed, true, scene)
            }
            _ => self.aim_at_location(location, speed, continuous, scene, controls),
        }
    }

    /// Advances the aim by one frame.
    ///
    /// Does nothing unless tracking is on and both the owner and its
    /// controller still resolve. A tracked actor that stops resolving leaves
    /// the aim point frozen at its last sampled location.
    pub fn update(
        &mut self,
        delta_seconds: f32,
        scene: &impl SceneLookup<H>,
        controls: &mut impl RotationControl<H>,
    ) {
        if !self.tracking {
            return;
        }
        let Ok(controller) = self.resolve_controller(scene) else {
            return;
        };
        let Some(owner_location) = scene.owner_location() else {
            return;
        };
        let Some(current) = controls.control_rotation(controller) else {
            return;
        };

        if self.smooth {
            if let Some(actor_location) = self.tracked_actor.and_then(|a| scene.actor_location(a)) {
                self.target_location = vec_interp_to(
                    self.target_location,
                    actor_location,
                    delta_seconds,
                    self.interp_speed,
                );
            }
        }

        let origin = scene.owner_camera_location().unwrap_or(owner_location);
        let target_rotation = ViewRotation::look_at(origin, self.target_location);
        let next = if self.smooth {
            rot_interp_to(current, target_rotation, delta_seconds, self.interp_speed)
        } else {
            target_rotation
        };

        controls.set_control_rotation(controller, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mockall::mock;
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};

    mock! {
        Scene {}
        impl SceneLookup<u32> for Scene {
            fn owner_location(&self) -> Option<Vec3>;
            fn owner_camera_location(&self) -> Option<Vec3>;
            fn owner_controller(&self) -> Option<u32>;
            fn actor_location(&self, actor: u32) -> Option<Vec3>;
        }
    }

    mock! {
        Controls {}
        impl RotationControl<u32> for Controls {
            fn control_rotation(&self, controller: u32) -> Option<ViewRotation>;
            fn set_control_rotation(&mut self, controller: u32, rotation: ViewRotation);
        }
    }

    const CONTROLLER: u32 = 7;
    const ACTOR: u32 = 42;

    #[fixture]
    fn scene() -> MockScene {
        let mut scene = MockScene::new();
        scene.expect_owner_location().return_const(Some(Vec3::ZERO));
        scene.expect_owner_camera_location().returning(|| None);
        scene.expect_owner_controller().return_const(Some(CONTROLLER));
        scene
    }

    #[rstest]
    fn snap_aim_sets_look_at_rotation_immediately(scene: MockScene) {
        let target = Vec3::new(3.0, 3.0, 0.0);
        let mut controls = MockControls::new();
        controls
            .expect_set_control_rotation()
            .with(eq(CONTROLLER), eq(ViewRotation::look_at(Vec3::ZERO, target)))
            .times(1)
            .return_const(());

        let mut tracker = AimTracker::new();
        tracker
            .aim_at_location(target, 10.0, false, &scene, &mut controls)
            .expect("controller resolves");
        assert!(tracker.is_tracking());
        assert!(!tracker.is_smooth());
        assert_eq!(tracker.controller(), Some(CONTROLLER));
    }

    #[rstest]
    fn smooth_aim_defers_rotation_to_update(scene: MockScene) {
        let mut controls = MockControls::new();
        controls.expect_set_control_rotation().never();

        let mut tracker = AimTracker::new();
        tracker
            .aim_at_location(Vec3::X, 4.0, true, &scene, &mut controls)
            .expect("controller resolves");
        assert_relative_eq!(tracker.interp_speed(), 4.0);
        assert_eq!(tracker.target_location(), Vec3::X);
    }

    #[test]
    fn missing_controller_leaves_state_untouched() {
        let mut scene = MockScene::new();
        scene.expect_owner_controller().returning(|| None);
        scene.expect_actor_location().return_const(Some(Vec3::ONE));
        let mut controls = MockControls::new();
        controls.expect_set_control_rotation().never();

        let mut tracker = AimTracker::new();
        let before = tracker.clone();
        assert_eq!(
            tracker.aim_at_location(Vec3::ONE, 1.0, false, &scene, &mut controls),
            Err(AimError::NoController)
        );
        assert_eq!(
            tracker.start_tracking_actor(Some(ACTOR), 1.0, true, &scene),
            Err(AimError::NoController)
        );
        assert_eq!(tracker, before);
    }

    #[rstest]
    #[case::null_actor(None)]
    #[case::stale_actor(Some(ACTOR))]
    fn unresolvable_actor_is_rejected(mut scene: MockScene, #[case] actor: Option<u32>) {
        scene.expect_actor_location().returning(|_| None);
        let mut tracker = AimTracker::new();
        assert_eq!(
            tracker.start_tracking_actor(actor, 1.0, true, &scene),
            Err(AimError::MissingTarget)
        );
        assert!(!tracker.is_tracking());
    }

    #[rstest]
    fn tracking_starts_from_actor_location(mut scene: MockScene) {
        let actor_at = Vec3::new(10.0, -2.0, 1.0);
        scene
            .expect_actor_location()
            .with(eq(ACTOR))
            .return_const(Some(actor_at));

        let mut tracker = AimTracker::new();
        tracker
            .start_tracking_actor(Some(ACTOR), 6.0, true, &scene)
            .expect("actor resolves");
        assert_eq!(tracker.tracked_actor(), Some(ACTOR));
        assert_eq!(tracker.target_location(), actor_at);
    }

    #[rstest]
    fn update_after_stop_does_not_rotate(scene: MockScene) {
        let mut controls = MockControls::new();
        controls.expect_control_rotation().never();
        controls.expect_set_control_rotation().never();

        let mut tracker = AimTracker::new();
        tracker
            .aim_at_location(Vec3::Y, 10.0, true, &scene, &mut controls)
            .expect("controller resolves");
        tracker.stop_tracking();
        tracker.update(0.016, &scene, &mut controls);
        assert!(!tracker.is_tracking());
        assert_eq!(tracker.tracked_actor(), None);
    }

    #[rstest]
    fn update_skips_stale_controller(scene: MockScene) {
        let mut controls = MockControls::new();
        controls.expect_set_control_rotation().never();
        controls.expect_control_rotation().returning(|_| None);

        let mut tracker = AimTracker::new();
        tracker
            .aim_at_location(Vec3::Y, 10.0, true, &scene, &mut controls)
            .expect("controller resolves");
        tracker.update(0.016, &scene, &mut controls);
    }

    #[test]
    fn update_prefers_camera_location() {
        let camera = Vec3::new(0.0, 0.0, 10.0);
        let target = Vec3::new(10.0, 0.0, 0.0);
        let mut scene = MockScene::new();
        scene.expect_owner_location().return_const(Some(Vec3::ZERO));
        scene.expect_owner_camera_location().return_const(Some(camera));
        scene.expect_owner_controller().return_const(Some(CONTROLLER));

        let mut controls = MockControls::new();
        controls
            .expect_set_control_rotation()
            .with(eq(CONTROLLER), eq(ViewRotation::look_at(Vec3::ZERO, target)))
            .times(1)
            .return_const(());
        controls
            .expect_control_rotation()
            .return_const(Some(ViewRotation::ZERO));
        controls
            .expect_set_control_rotation()
            .with(eq(CONTROLLER), eq(ViewRotation::look_at(camera, target)))
            .times(1)
            .return_const(());

        let mut tracker = AimTracker::new();
        tracker
            .aim_at_location(target, 10.0, false, &scene, &mut controls)
            .expect("controller resolves");
        tracker.update(0.016, &scene, &mut controls);
    }

    #[rstest]
    fn one_off_actor_aim_snaps_without_tracking(mut scene: MockScene) {
        let actor_at = Vec3::new(0.0, 5.0, 0.0);
        scene.expect_actor_location().return_const(Some(actor_at));
        let mut controls = MockControls::new();
        controls
            .expect_set_control_rotation()
            .with(eq(CONTROLLER), eq(ViewRotation::look_at(Vec3::ZERO, actor_at)))
            .times(1)
            .return_const(());

        let mut tracker = AimTracker::new();
        tracker
            .aim_at(AimTarget::Actor(ACTOR), 15.0, false, &scene, &mut controls)
            .expect("actor resolves");
        assert_eq!(tracker.tracked_actor(), None);
        assert_eq!(tracker.target_location(), actor_at);
    }

    #[rstest]
    fn continuous_actor_aim_tracks_smoothly(mut scene: MockScene) {
        scene.expect_actor_location().return_const(Some(Vec3::X));
        let mut controls = MockControls::new();

        let mut tracker = AimTracker::new();
        tracker
            .aim_at(AimTarget::Actor(ACTOR), 15.0, true, &scene, &mut controls)
            .expect("actor resolves");
        assert_eq!(tracker.tracked_actor(), Some(ACTOR));
        assert!(tracker.is_smooth());
    }
}
