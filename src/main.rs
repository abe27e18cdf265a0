//! Headless demo steering a controller toward a location or drifting actor.
use std::time::Duration;

use aimtrack::{
    init_logging, parse_location, AimCommand, AimRequest, AimSettings, AimTarget, AimTracker,
    AimTrackerPlugin, ControlRotation, PossessedBy,
};
use anyhow::Context;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use log::info;

/// Aim a simulated controller and log its view rotation each frame.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file overriding the default aim settings
    #[arg(long)]
    settings: Option<std::path::PathBuf>,

    /// Location to aim at, e.g. "(X=320,Y=-888,Z=795)"
    #[arg(long, default_value = "(X=320,Y=-888,Z=795)")]
    target: String,

    /// Follow a drifting actor spawned at the target instead of the point
    #[arg(long)]
    track: bool,

    /// Ease toward the target instead of snapping. A snapping track keeps
    /// aiming where the actor started
    #[arg(long)]
    smooth: bool,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

/// Marks the demo actor that wanders across the map.
#[derive(Component)]
struct Drifter {
    velocity: Vec3,
}

fn drift_system(time: Res<Time>, mut drifters: Query<(&Drifter, &mut GlobalTransform)>) {
    for (drifter, mut transform) in &mut drifters {
        let moved = transform.translation() + drifter.velocity * time.delta_secs();
        *transform = GlobalTransform::from_translation(moved);
    }
}

/// Request issued once the scene is set up.
///
/// Tracking honours `smooth` as given rather than forcing it on.
const fn demo_command(target: AimTarget<Entity>, smooth: bool) -> AimCommand {
    match target {
        AimTarget::Actor(actor) => AimCommand::TrackActor {
            actor: Some(actor),
            speed: None,
            smooth: Some(smooth),
        },
        AimTarget::Location(_) => AimCommand::Aim {
            target,
            speed: None,
            continuous: smooth,
        },
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match &args.settings {
        Some(path) => AimSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => AimSettings::default(),
    };
    let location = parse_location(&args.target).context("parsing --target")?;
    let frame = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(settings)
        .insert_resource(TimeUpdateStrategy::ManualDuration(frame))
        .add_plugins(AimTrackerPlugin)
        .add_systems(Update, drift_system);

    let controller = app.world_mut().spawn(ControlRotation::default()).id();
    let owner = app
        .world_mut()
        .spawn((
            AimTracker::<Entity>::new(),
            PossessedBy(controller),
            GlobalTransform::IDENTITY,
        ))
        .id();

    let target = if args.track {
        let actor = app
            .world_mut()
            .spawn((
                Drifter {
                    velocity: Vec3::new(0.0, 100.0, 0.0),
                },
                GlobalTransform::from_translation(location),
            ))
            .id();
        AimTarget::Actor(actor)
    } else {
        AimTarget::Location(location)
    };

    app.world_mut().trigger(AimRequest {
        owner,
        command: demo_command(target, args.smooth),
    });

    for index in 0..args.frames {
        app.update();
        if let Some(ControlRotation(rot)) = app.world().get::<ControlRotation>(controller) {
            info!(
                "frame {index}: yaw {:.2} deg, pitch {:.2} deg",
                rot.yaw.to_degrees(),
                rot.pitch.to_degrees()
            );
        }
    }

    Ok(())
}
