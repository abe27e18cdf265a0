//! Runtime configuration for aim requests and the per-frame system.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tracker::DEFAULT_INTERP_SPEED;

/// Defaults applied to aim requests that leave them unspecified.
///
/// Missing fields in a settings file fall back to [`AimSettings::default`].
///
/// # Examples
///
/// ```
/// use aimtrack::AimSettings;
///
/// let settings = AimSettings::from_json_str(r#"{ "interp_speed": 15.0 }"#).unwrap();
/// assert_eq!(settings.interp_speed, 15.0);
/// assert!(settings.smooth_actor_tracking);
/// ```
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AimSettings {
    /// Interpolation speed for both aim point and view rotation.
    pub interp_speed: f32,

    /// Whether location aims are smoothed unless a request says otherwise.
    pub smooth_location_aim: bool,

    /// Whether actor tracking is smoothed unless a request says otherwise.
    pub smooth_actor_tracking: bool,

    /// Largest frame delta fed to the tracker, in seconds.
    ///
    /// Clamps frame hitches so a stall does not swing the view in one jump.
    pub max_delta_seconds: f32,
}

impl Default for AimSettings {
    fn default() -> Self {
        Self {
            interp_speed: DEFAULT_INTERP_SPEED,
            smooth_location_aim: false,
            smooth_actor_tracking: true,
            max_delta_seconds: 0.25,
        }
    }
}

/// Failure to read or decode [`AimSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The contents were not valid settings JSON.
    #[error("invalid aim settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AimSettings {
    /// Decodes settings from JSON text.
    ///
    /// # Errors
    /// [`SettingsError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json_str(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads settings from a JSON file.
    ///
    /// # Errors
    /// [`SettingsError::Read`] if the file cannot be read, otherwise as
    /// [`AimSettings::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = path.as_ref();
        let text = fs::read_to_string(file).map_err(|source| SettingsError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Frame delta with hitches clamped away.
    ///
    /// A non-positive limit is treated as the smallest positive step so time
    /// never runs backwards or stalls.
    #[must_use]
    pub fn clamp_delta(&self, delta_seconds: f32) -> f32 {
        let limit = self.max_delta_seconds.max(f32::EPSILON);
        delta_seconds.clamp(0.0, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_sensible() {
        let settings = AimSettings::default();
        assert!(settings.interp_speed > 0.0);
        assert!(!settings.smooth_location_aim);
        assert!(settings.smooth_actor_tracking);
        assert!(settings.max_delta_seconds > 0.0);
    }

    #[test]
    fn empty_object_yields_defaults() {
        let settings = AimSettings::from_json_str("{}").expect("empty settings parse");
        assert_eq!(settings, AimSettings::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = AimSettings::from_json_str(r#"{ "speed": 1.0 }"#).expect_err("unknown field");
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "smooth_location_aim": true, "max_delta_seconds": 0.5 }}"#)
            .expect("write settings");
        let settings = AimSettings::load(file.path()).expect("settings load");
        assert!(settings.smooth_location_aim);
        assert!((settings.max_delta_seconds - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = AimSettings::load("/nonexistent/aim.json").expect_err("missing file");
        assert!(matches!(err, SettingsError::Read { .. }));
    }

    #[rstest]
    #[case::passthrough(0.1, 0.25, 0.1)]
    #[case::hitch(2.0, 0.25, 0.25)]
    #[case::negative(-1.0, 0.25, 0.0)]
    #[case::zero_limit(1.0, 0.0, f32::EPSILON)]
    fn clamp_delta_cases(#[case] delta: f32, #[case] limit: f32, #[case] expected: f32) {
        let settings = AimSettings {
            max_delta_seconds: limit,
            ..AimSettings::default()
        };
        assert!((settings.clamp_delta(delta) - expected).abs() < f32::EPSILON);
    }
}
