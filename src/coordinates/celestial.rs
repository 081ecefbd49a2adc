use std::fmt;

use super::{check_in, SphericalCoordinates, FULL_TURN_RAD, QUARTER_TURN_RAD};
use crate::error::Result;
use crate::math::angle;
use crate::math::Interval;

/// Right ascension in `[0, 2π)` and declination in `[-π/2, π/2]`.
#[derive(Debug, Clone, Copy)]
pub struct EquatorialCoordinates {
    ra: f64,
    dec: f64,
}

impl EquatorialCoordinates {
    pub fn of(ra: f64, dec: f64) -> Result<Self> {
        check_in(&FULL_TURN_RAD, ra, "right ascension")?;
        check_in(&QUARTER_TURN_RAD, dec, "declination")?;
        Ok(Self { ra, dec })
    }

    /// For producers whose formulas already land in the domain.
    pub(crate) fn from_valid(ra: f64, dec: f64) -> Self {
        debug_assert!(FULL_TURN_RAD.contains(ra), "right ascension {ra}");
        debug_assert!(QUARTER_TURN_RAD.contains(dec), "declination {dec}");
        Self { ra, dec }
    }

    pub fn ra(&self) -> f64 {
        self.ra
    }

    pub fn ra_deg(&self) -> f64 {
        angle::to_deg(self.ra)
    }

    pub fn ra_hr(&self) -> f64 {
        angle::to_hr(self.ra)
    }

    pub fn dec(&self) -> f64 {
        self.dec
    }

    pub fn dec_deg(&self) -> f64 {
        angle::to_deg(self.dec)
    }
}

impl SphericalCoordinates for EquatorialCoordinates {
    fn lon(&self) -> f64 {
        self.ra
    }

    fn lat(&self) -> f64 {
        self.dec
    }
}

impl fmt::Display for EquatorialCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(ra={:.4}h, dec={:.4}°)", self.ra_hr(), self.dec_deg())
    }
}

/// Ecliptic longitude in `[0, 2π)` and latitude in `[-π/2, π/2]`.
#[derive(Debug, Clone, Copy)]
pub struct EclipticCoordinates {
    lon: f64,
    lat: f64,
}

impl EclipticCoordinates {
    pub fn of(lon: f64, lat: f64) -> Result<Self> {
        check_in(&FULL_TURN_RAD, lon, "ecliptic longitude")?;
        check_in(&QUARTER_TURN_RAD, lat, "ecliptic latitude")?;
        Ok(Self { lon, lat })
    }

    pub(crate) fn from_valid(lon: f64, lat: f64) -> Self {
        debug_assert!(FULL_TURN_RAD.contains(lon), "ecliptic longitude {lon}");
        debug_assert!(QUARTER_TURN_RAD.contains(lat), "ecliptic latitude {lat}");
        Self { lon, lat }
    }
}

impl SphericalCoordinates for EclipticCoordinates {
    fn lon(&self) -> f64 {
        self.lon
    }

    fn lat(&self) -> f64 {
        self.lat
    }
}

impl fmt::Display for EclipticCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(λ={:.4}°, β={:.4}°)", self.lon_deg(), self.lat_deg())
    }
}
