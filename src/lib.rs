#![cfg_attr(docsrs, feature(doc_cfg))]
//! View aiming and target tracking for player controllers.
//!
//! An [`AimTracker`] rotates its owner's controller toward a fixed location or
//! a moving actor, either snapping at once or easing in frame by frame. Hosts
//! plug in through the [`SceneLookup`] and [`RotationControl`] ports; Bevy
//! apps can use [`AimTrackerPlugin`] instead.
pub mod interp;
pub mod logging;
pub mod plugin;
pub mod ports;
pub mod rotation;
pub mod settings;
pub mod target;
pub mod tracker;

// Re-export commonly used items
pub use interp::{rot_interp_to, vec_interp_to};
pub use logging::init as init_logging;
pub use plugin::{
    aim_tracker_system, handle_aim_request, AimCamera, AimCommand, AimRequest, AimTrackerPlugin,
    ControlRotation, PossessedBy,
};
pub use ports::{RotationControl, SceneLookup};
pub use rotation::ViewRotation;
pub use settings::{AimSettings, SettingsError};
pub use target::{parse_location, AimTarget, ParseLocationError};
pub use tracker::{AimError, AimTracker, DEFAULT_INTERP_SPEED};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use aimtrack::prelude::*;
    //! ```

    pub use crate::{
        AimCommand, AimRequest, AimSettings, AimTarget, AimTracker, AimTrackerPlugin,
        ControlRotation, PossessedBy, RotationControl, SceneLookup, ViewRotation,
    };
}
