use std::fmt;

use super::{check_in, SphericalCoordinates};
use crate::error::Result;
use crate::math::angle;
use crate::math::{ClosedInterval, Interval, RightOpenInterval};

const LON_DEG: RightOpenInterval = RightOpenInterval::from_bounds(-180.0, 180.0);
const LAT_DEG: ClosedInterval = ClosedInterval::from_bounds(-90.0, 90.0);

/// Observer position on Earth: longitude in `[-180°, 180°)`, positive
/// eastward, latitude in `[-90°, 90°]`. Stored in radians.
#[derive(Debug, Clone, Copy)]
pub struct GeographicCoordinates {
    lon: f64,
    lat: f64,
}

impl GeographicCoordinates {
    pub fn of_deg(lon_deg: f64, lat_deg: f64) -> Result<Self> {
        check_in(&LON_DEG, lon_deg, "longitude (deg)")?;
        check_in(&LAT_DEG, lat_deg, "latitude (deg)")?;
        Ok(Self {
            lon: angle::of_deg(lon_deg),
            lat: angle::of_deg(lat_deg),
        })
    }

    pub(crate) fn from_valid_deg(lon_deg: f64, lat_deg: f64) -> Self {
        debug_assert!(LON_DEG.contains(lon_deg) && LAT_DEG.contains(lat_deg));
        Self {
            lon: angle::of_deg(lon_deg),
            lat: angle::of_deg(lat_deg),
        }
    }

    pub fn is_valid_lon_deg(lon_deg: f64) -> bool {
        LON_DEG.contains(lon_deg)
    }

    pub fn is_valid_lat_deg(lat_deg: f64) -> bool {
        LAT_DEG.contains(lat_deg)
    }
}

impl SphericalCoordinates for GeographicCoordinates {
    fn lon(&self) -> f64 {
        self.lon
    }

    fn lat(&self) -> f64 {
        self.lat
    }
}

impl fmt::Display for GeographicCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(lon={:.4}°, lat={:.4}°)", self.lon_deg(), self.lat_deg())
    }
}
