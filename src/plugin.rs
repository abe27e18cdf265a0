//! Bevy plugin driving [`AimTracker`] components each frame.
//!
//! The owner entity carries the tracker and a [`PossessedBy`] link to its
//! controller. The controller entity holds the [`ControlRotation`] the
//! tracker steers. A child of the owner marked [`AimCamera`] moves the aim
//! origin from the owner to that child. All positions are read from
//! `GlobalTransform`.
//!
//! Scripts and gameplay code issue aims by triggering an [`AimRequest`].

use bevy::ecs::prelude::On;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use log::debug;

use crate::ports::{RotationControl, SceneLookup};
use crate::rotation::ViewRotation;
use crate::settings::AimSettings;
use crate::target::AimTarget;
use crate::tracker::{AimError, AimTracker};

/// View rotation owned by a controller entity.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
pub struct ControlRotation(pub ViewRotation);

/// Links an owner to the controller whose view it aims.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct PossessedBy(pub Entity);

/// Marker for the camera child an owner aims from.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct AimCamera;

/// Operation carried by an [`AimRequest`].
///
/// `None` speeds and smoothing flags fall back to [`AimSettings`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimCommand {
    /// Aim at a fixed world location.
    AimAtLocation {
        /// Point to aim at.
        location: Vec3,
        /// Interpolation speed override.
        speed: Option<f32>,
        /// Smoothing override.
        smooth: Option<bool>,
    },
    /// Follow an actor.
    TrackActor {
        /// Actor to follow; `None` is rejected.
        actor: Option<Entity>,
        /// Interpolation speed override.
        speed: Option<f32>,
        /// Smoothing override.
        smooth: Option<bool>,
    },
    /// Replace any current aim with `target`, see [`AimTracker::aim_at`].
    Aim {
        /// Location or actor to aim at.
        target: AimTarget<Entity>,
        /// Interpolation speed override.
        speed: Option<f32>,
        /// Keep adjusting rather than aiming once.
        continuous: bool,
    },
    /// Stop tracking.
    Stop,
}

/// Request to change the aim of `owner`.
///
/// # Examples
///
/// ```ignore
/// world.trigger(AimRequest {
///     owner,
///     command: AimCommand::Stop,
/// });
/// ```
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AimRequest {
    /// Entity carrying the [`AimTracker`].
    pub owner: Entity,
    /// What to do.
    pub command: AimCommand,
}

/// Read-only queries the scene adapter looks positions up with.
#[derive(SystemParam)]
pub struct SceneQueries<'w, 's> {
    /// World-space transforms of owners and tracked actors.
    pub transforms: Query<'w, 's, &'static GlobalTransform>,
    /// Children of owners, searched for an [`AimCamera`].
    pub children: Query<'w, 's, &'static Children>,
    /// Transforms of aim cameras.
    pub cameras: Query<'w, 's, &'static GlobalTransform, With<AimCamera>>,
    /// Owner to controller links.
    pub possessed: Query<'w, 's, &'static PossessedBy>,
}

/// [`SceneLookup`] over the ECS world, as seen from one owner.
pub struct EcsScene<'a, 'w, 's> {
    owner: Entity,
    queries: &'a SceneQueries<'w, 's>,
}

impl<'a, 'w, 's> EcsScene<'a, 'w, 's> {
    /// Adapter viewing the scene from `owner`.
    pub const fn new(owner: Entity, queries: &'a SceneQueries<'w, 's>) -> Self {
        Self { owner, queries }
    }
}

impl SceneLookup<Entity> for EcsScene<'_, '_, '_> {
    fn owner_location(&self) -> Option<Vec3> {
        self.actor_location(self.owner)
    }

    fn owner_camera_location(&self) -> Option<Vec3> {
        let children: &[Entity] = self.queries.children.get(self.owner).ok()?;
        children
            .iter()
            .find_map(|&child| self.queries.cameras.get(child).ok())
            .map(GlobalTransform::translation)
    }

    fn owner_controller(&self) -> Option<Entity> {
        self.queries.possessed.get(self.owner).ok().map(|p| p.0)
    }

    fn actor_location(&self, actor: Entity) -> Option<Vec3> {
        self.queries
            .transforms
            .get(actor)
            .ok()
            .map(GlobalTransform::translation)
    }
}

/// [`RotationControl`] writing [`ControlRotation`] components.
pub struct EcsControls<'a, 'w, 's> {
    controls: &'a mut Query<'w, 's, &'static mut ControlRotation>,
}

impl<'a, 'w, 's> EcsControls<'a, 'w, 's> {
    /// Adapter over the controller query.
    pub fn new(controls: &'a mut Query<'w, 's, &'static mut ControlRotation>) -> Self {
        Self { controls }
    }
}

impl RotationControl<Entity> for EcsControls<'_, '_, '_> {
    fn control_rotation(&self, controller: Entity) -> Option<ViewRotation> {
        self.controls.get(controller).ok().map(|c| c.0)
    }

    fn set_control_rotation(&mut self, controller: Entity, rotation: ViewRotation) {
        if let Ok(mut control) = self.controls.get_mut(controller) {
            control.0 = rotation;
        }
    }
}

fn apply_command(
    tracker: &mut AimTracker<Entity>,
    command: AimCommand,
    settings: &AimSettings,
    scene: &EcsScene<'_, '_, '_>,
    controls: &mut EcsControls<'_, '_, '_>,
) -> Result<(), AimError> {
    match command {
        AimCommand::AimAtLocation {
            location,
            speed,
            smooth,
        } => tracker.aim_at_location(
            location,
            speed.unwrap_or(settings.interp_speed),
            smooth.unwrap_or(settings.smooth_location_aim),
            scene,
            controls,
        ),
        AimCommand::TrackActor {
            actor,
            speed,
            smooth,
        } => tracker.start_tracking_actor(
            actor,
            speed.unwrap_or(settings.interp_speed),
            smooth.unwrap_or(settings.smooth_actor_tracking),
            scene,
        ),
        AimCommand::Aim {
            target,
            speed,
            continuous,
        } => tracker.aim_at(
            target,
            speed.unwrap_or(settings.interp_speed),
            continuous,
            scene,
            controls,
        ),
        AimCommand::Stop => {
            tracker.stop_tracking();
            Ok(())
        }
    }
}

/// Applies an [`AimRequest`] to the addressed tracker.
///
/// Requests that cannot be honoured are logged and dropped.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> and Res<T> by value."
)]
pub fn handle_aim_request(
    event: On<AimRequest>,
    settings: Res<AimSettings>,
    scene: SceneQueries,
    mut controls: Query<&'static mut ControlRotation>,
    mut trackers: Query<&mut AimTracker<Entity>>,
) {
    let AimRequest { owner, command } = *event.event();
    let result = match trackers.get_mut(owner) {
        Ok(mut tracker) => apply_command(
            &mut tracker,
            command,
            &settings,
            &EcsScene::new(owner, &scene),
            &mut EcsControls::new(&mut controls),
        ),
        Err(_) => Err(AimError::MissingOwner),
    };
    if let Err(e) = result {
        debug!("ignoring aim request {command:?} for {owner:?}: {e}");
    }
}

/// Advances every tracker by the frame delta.
///
/// Large deltas are clamped to [`AimSettings::max_delta_seconds`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn aim_tracker_system(
    time: Res<Time>,
    settings: Res<AimSettings>,
    scene: SceneQueries,
    mut controls: Query<&'static mut ControlRotation>,
    mut trackers: Query<(Entity, &mut AimTracker<Entity>)>,
) {
    let delta = settings.clamp_delta(time.delta_secs());
    for (owner, mut tracker) in &mut trackers {
        tracker.update(
            delta,
            &EcsScene::new(owner, &scene),
            &mut EcsControls::new(&mut controls),
        );
    }
}

/// Plugin wiring aim requests and the per-frame tracker update.
///
/// # Examples
///
/// ```ignore
/// use bevy::prelude::*;
/// use aimtrack::AimTrackerPlugin;
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(AimTrackerPlugin)
///     .run();
/// ```
#[derive(Debug, Default)]
pub struct AimTrackerPlugin;

impl Plugin for AimTrackerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<ControlRotation>()
            .register_type::<PossessedBy>()
            .register_type::<AimCamera>();
        app.init_resource::<AimSettings>();
        app.add_observer(handle_aim_request);
        app.add_systems(Update, aim_tracker_system);
    }
}
