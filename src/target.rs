//! Aim targets and their textual form.
//!
//! Locations are written the way level editors print vectors, for example
//! `(X=320,Y=-888,Z=795)`.

use std::str::FromStr;

use glam::Vec3;
use thiserror::Error;

/// Something the tracker can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AimTarget<H> {
    /// A fixed world location.
    Location(Vec3),
    /// An actor whose location is looked up through the scene.
    Actor(H),
}

impl<H> From<Vec3> for AimTarget<H> {
    fn from(location: Vec3) -> Self {
        Self::Location(location)
    }
}

/// Reasons a location string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLocationError {
    /// The text was not wrapped in parentheses.
    #[error("location must be wrapped in parentheses: {0:?}")]
    Unbracketed(String),
    /// A component was not of the form `KEY=value`.
    #[error("malformed component {0:?}")]
    Component(String),
    /// A component named an axis other than X, Y or Z.
    #[error("unknown axis {0:?}")]
    UnknownAxis(String),
    /// The same axis appeared twice.
    #[error("axis {0} given more than once")]
    DuplicateAxis(char),
    /// A value did not parse as a number.
    #[error("invalid value {0:?}")]
    Value(String),
    /// One of the three axes was absent.
    #[error("missing axis {0}")]
    MissingAxis(char),
}

/// Parses `(X=..,Y=..,Z=..)` into a vector.
///
/// Keys are case-insensitive, surrounding whitespace is ignored and the axes
/// may come in any order.
///
/// # Errors
/// Returns [`ParseLocationError`] describing the first problem found.
///
/// # Examples
/// ```
/// use aimtrack::parse_location;
/// use glam::Vec3;
///
/// let v = parse_location("(X=320,Y=-888,Z=795)").unwrap();
/// assert_eq!(v, Vec3::new(320.0, -888.0, 795.0));
/// ```
pub fn parse_location(text: &str) -> Result<Vec3, ParseLocationError> {
    let inner = text
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ParseLocationError::Unbracketed(text.to_owned()))?;

    let (mut x, mut y, mut z) = (None, None, None);
    for component in inner.split(',') {
        let (raw_key, raw_value) = component
            .split_once('=')
            .ok_or_else(|| ParseLocationError::Component(component.trim().to_owned()))?;
        let key = raw_key.trim();
        let (slot, name) = match key.to_ascii_uppercase().as_str() {
            "X" => (&mut x, 'X'),
            "Y" => (&mut y, 'Y'),
            "Z" => (&mut z, 'Z'),
            _ => return Err(ParseLocationError::UnknownAxis(key.to_owned())),
        };
        if slot.is_some() {
            return Err(ParseLocationError::DuplicateAxis(name));
        }
        let value = raw_value.trim();
        let parsed = value
            .parse::<f32>()
            .map_err(|_| ParseLocationError::Value(value.to_owned()))?;
        *slot = Some(parsed);
    }

    match (x, y, z) {
        (Some(px), Some(py), Some(pz)) => Ok(Vec3::new(px, py, pz)),
        (None, _, _) => Err(ParseLocationError::MissingAxis('X')),
        (_, None, _) => Err(ParseLocationError::MissingAxis('Y')),
        (_, _, None) => Err(ParseLocationError::MissingAxis('Z')),
    }
}

impl<H> FromStr for AimTarget<H> {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_location(s).map(Self::Location)
    }
}
