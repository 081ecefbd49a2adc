//! Coordinate frames.
//!
//! Every spherical frame stores a (longitude, latitude) pair in radians,
//! validated against the frame's domain when constructed. Values are
//! immutable and deliberately do not implement `PartialEq`: compare
//! components with a tolerance instead.

mod cartesian;
mod celestial;
pub mod conversions;
mod geographic;
mod horizontal;

pub use cartesian::CartesianCoordinates;
pub use celestial::{EclipticCoordinates, EquatorialCoordinates};
pub use conversions::{
    CoordinateTransform, EclipticToEquatorialConversion, EquatorialToHorizontalConversion,
};
pub use geographic::GeographicCoordinates;
pub use horizontal::HorizontalCoordinates;

use std::f64::consts::FRAC_PI_2;

use crate::error::{invalid_argument, Result};
use crate::math::angle::{self, TAU};
use crate::math::{ClosedInterval, Interval, RightOpenInterval};

/// Shared accessors of the spherical frames.
pub trait SphericalCoordinates {
    /// Longitude-like component in radians.
    fn lon(&self) -> f64;

    /// Latitude-like component in radians.
    fn lat(&self) -> f64;

    fn lon_deg(&self) -> f64 {
        angle::to_deg(self.lon())
    }

    fn lat_deg(&self) -> f64 {
        angle::to_deg(self.lat())
    }
}

/// `[0, 2π)`: right ascension, ecliptic longitude, azimuth.
pub(crate) const FULL_TURN_RAD: RightOpenInterval = RightOpenInterval::from_bounds(0.0, TAU);
/// `[-π/2, π/2]`: every latitude-like component.
pub(crate) const QUARTER_TURN_RAD: ClosedInterval =
    ClosedInterval::from_bounds(-FRAC_PI_2, FRAC_PI_2);

pub(crate) fn check_in(interval: &impl Interval, value: f64, what: &str) -> Result<()> {
    if interval.contains(value) {
        Ok(())
    } else {
        invalid_argument(format!(
            "{what} {value} outside [{}, {}]",
            interval.low(),
            interval.high()
        ))
    }
}
