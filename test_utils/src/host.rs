//! In-memory host implementing the tracker ports with plain integer handles.

use std::collections::HashMap;

use aimtrack::{RotationControl, SceneLookup, ViewRotation};
use glam::Vec3;

/// Scene with a single owner and any number of actors.
#[derive(Debug, Clone, Default)]
pub struct FakeScene {
    /// Owner location; `None` simulates a destroyed owner.
    pub owner: Option<Vec3>,
    /// Attached camera location, if any.
    pub camera: Option<Vec3>,
    /// Controller possessing the owner.
    pub controller: Option<u32>,
    /// Live actors by handle. Removing one invalidates its handle.
    pub actors: HashMap<u32, Vec3>,
}

impl FakeScene {
    /// Owner standing at `location`, possessed by `controller`.
    ///
    /// # Examples
    /// ```
    /// use aimtrack::SceneLookup;
    /// use glam::Vec3;
    /// use test_utils::FakeScene;
    ///
    /// let scene = FakeScene::new(Vec3::ZERO, 1).with_actor(2, Vec3::X);
    /// assert_eq!(scene.actor_location(2), Some(Vec3::X));
    /// ```
    #[must_use]
    pub fn new(location: Vec3, controller: u32) -> Self {
        Self {
            owner: Some(location),
            controller: Some(controller),
            ..Self::default()
        }
    }

    /// Adds or moves an actor.
    #[must_use]
    pub fn with_actor(mut self, actor: u32, location: Vec3) -> Self {
        self.actors.insert(actor, location);
        self
    }

    /// Attaches a camera at `location`.
    #[must_use]
    pub fn with_camera(mut self, location: Vec3) -> Self {
        self.camera = Some(location);
        self
    }

    /// Moves an existing actor, or spawns it.
    pub fn move_actor(&mut self, actor: u32, location: Vec3) {
        self.actors.insert(actor, location);
    }

    /// Destroys an actor so its handle no longer resolves.
    pub fn remove_actor(&mut self, actor: u32) {
        self.actors.remove(&actor);
    }
}

impl SceneLookup<u32> for FakeScene {
    fn owner_location(&self) -> Option<Vec3> {
        self.owner
    }

    fn owner_camera_location(&self) -> Option<Vec3> {
        self.camera
    }

    fn owner_controller(&self) -> Option<u32> {
        self.controller
    }

    fn actor_location(&self, actor: u32) -> Option<Vec3> {
        self.actors.get(&actor).copied()
    }
}

/// Controllers and the rotations written to them.
#[derive(Debug, Clone, Default)]
pub struct FakeControls {
    rotations: HashMap<u32, ViewRotation>,
    writes: usize,
}

impl FakeControls {
    /// One controller at the identity rotation.
    #[must_use]
    pub fn with_controller(controller: u32) -> Self {
        let mut controls = Self::default();
        controls.rotations.insert(controller, ViewRotation::ZERO);
        controls
    }

    /// Rotation of `controller`, if it exists.
    #[must_use]
    pub fn rotation(&self, controller: u32) -> Option<ViewRotation> {
        self.rotations.get(&controller).copied()
    }

    /// Number of rotation writes so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// Destroys a controller so its handle no longer resolves.
    pub fn remove_controller(&mut self, controller: u32) {
        self.rotations.remove(&controller);
    }
}

impl RotationControl<u32> for FakeControls {
    fn control_rotation(&self, controller: u32) -> Option<ViewRotation> {
        self.rotation(controller)
    }

    fn set_control_rotation(&mut self, controller: u32, rotation: ViewRotation) {
        if let Some(slot) = self.rotations.get_mut(&controller) {
            *slot = rotation;
            self.writes += 1;
        }
    }
}
