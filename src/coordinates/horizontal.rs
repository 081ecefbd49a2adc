use std::fmt;

use super::{check_in, SphericalCoordinates, FULL_TURN_RAD, QUARTER_TURN_RAD};
use crate::error::Result;
use crate::math::angle;
use crate::math::{ClosedInterval, Interval, RightOpenInterval};

const AZ_DEG: RightOpenInterval = RightOpenInterval::from_bounds(0.0, 360.0);
const ALT_DEG: ClosedInterval = ClosedInterval::from_bounds(-90.0, 90.0);
const COSINE: ClosedInterval = ClosedInterval::from_bounds(-1.0, 1.0);

/// Azimuth in `[0, 2π)` measured from north through east, altitude in
/// `[-π/2, π/2]` above the horizon.
#[derive(Debug, Clone, Copy)]
pub struct HorizontalCoordinates {
    az: f64,
    alt: f64,
}

impl HorizontalCoordinates {
    pub fn of(az: f64, alt: f64) -> Result<Self> {
        check_in(&FULL_TURN_RAD, az, "azimuth")?;
        check_in(&QUARTER_TURN_RAD, alt, "altitude")?;
        Ok(Self { az, alt })
    }

    pub fn of_deg(az_deg: f64, alt_deg: f64) -> Result<Self> {
        check_in(&AZ_DEG, az_deg, "azimuth (deg)")?;
        check_in(&ALT_DEG, alt_deg, "altitude (deg)")?;
        Ok(Self {
            az: angle::of_deg(az_deg),
            alt: angle::of_deg(alt_deg),
        })
    }

    pub(crate) fn from_valid(az: f64, alt: f64) -> Self {
        debug_assert!(FULL_TURN_RAD.contains(az), "azimuth {az}");
        debug_assert!(QUARTER_TURN_RAD.contains(alt), "altitude {alt}");
        Self { az, alt }
    }

    pub fn az(&self) -> f64 {
        self.az
    }

    pub fn az_deg(&self) -> f64 {
        angle::to_deg(self.az)
    }

    pub fn alt(&self) -> f64 {
        self.alt
    }

    pub fn alt_deg(&self) -> f64 {
        angle::to_deg(self.alt)
    }

    /// Name of the compass octant holding the azimuth, assembled from the
    /// four cardinal labels (e.g. `"N"`, `"NE"`, `"SW"`).
    pub fn az_octant_name(&self, n: &str, e: &str, s: &str, w: &str) -> String {
        let octant = ((self.az_deg() + 22.5) / 45.0).floor() as usize % 8;
        match octant {
            0 => n.to_string(),
            1 => format!("{n}{e}"),
            2 => e.to_string(),
            3 => format!("{s}{e}"),
            4 => s.to_string(),
            5 => format!("{s}{w}"),
            6 => w.to_string(),
            _ => format!("{n}{w}"),
        }
    }

    /// Great-circle angle between two directions, in radians.
    pub fn angular_distance_to(&self, that: &HorizontalCoordinates) -> f64 {
        let cos_distance = self.alt.sin() * that.alt.sin()
            + self.alt.cos() * that.alt.cos() * (self.az - that.az).cos();
        COSINE.clip(cos_distance).acos()
    }
}

impl SphericalCoordinates for HorizontalCoordinates {
    fn lon(&self) -> f64 {
        self.az
    }

    fn lat(&self) -> f64 {
        self.alt
    }
}

impl fmt::Display for HorizontalCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(az={:.4}°, alt={:.4}°)", self.az_deg(), self.alt_deg())
    }
}
