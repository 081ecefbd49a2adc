//! Frame conversions parameterised by time (and place).
//!
//! Each conversion precomputes the trigonometry of its parameters once, so
//! a single instance can be applied to thousands of coordinates.

use std::fmt;

use chrono::{DateTime, TimeZone};
use once_cell::sync::Lazy;

use super::{
    EclipticCoordinates, EquatorialCoordinates, GeographicCoordinates, HorizontalCoordinates,
    SphericalCoordinates,
};
use crate::math::angle;
use crate::math::{ClosedInterval, Polynomial};
use crate::time::{sidereal, Epoch};

/// A pure mapping from one coordinate type to another.
pub trait CoordinateTransform<From, To> {
    fn apply(&self, from: &From) -> To;
}

const SINE: ClosedInterval = ClosedInterval::from_bounds(-1.0, 1.0);

/// Obliquity of the ecliptic in radians, in Julian centuries since J2000.
static OBLIQUITY: Lazy<Polynomial<f64>> = Lazy::new(|| {
    Polynomial::from_coefficients(vec![
        angle::of_arcsec(0.00181),
        angle::of_arcsec(-0.0006),
        angle::of_arcsec(-46.815),
        // 23°26′21.45″
        angle::of_deg(23.0 + (26.0 + 21.45 / 60.0) / 60.0),
    ])
});

/// Ecliptic to equatorial coordinates at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct EclipticToEquatorialConversion {
    obliquity: f64,
    cos_obliquity: f64,
    sin_obliquity: f64,
}

impl EclipticToEquatorialConversion {
    pub fn new<Tz: TimeZone>(when: &DateTime<Tz>) -> Self {
        let centuries = Epoch::J2000.julian_centuries_until(when);
        Self::from_obliquity(OBLIQUITY.at(centuries))
    }

    fn from_obliquity(obliquity: f64) -> Self {
        Self {
            obliquity,
            cos_obliquity: obliquity.cos(),
            sin_obliquity: obliquity.sin(),
        }
    }

    pub fn obliquity(&self) -> f64 {
        self.obliquity
    }
}

impl CoordinateTransform<EclipticCoordinates, EquatorialCoordinates>
    for EclipticToEquatorialConversion
{
    fn apply(&self, ecl: &EclipticCoordinates) -> EquatorialCoordinates {
        let (sin_lon, cos_lon) = ecl.lon().sin_cos();
        let (sin_lat, cos_lat) = ecl.lat().sin_cos();

        let ra = (sin_lon * self.cos_obliquity - ecl.lat().tan() * self.sin_obliquity)
            .atan2(cos_lon);
        let sin_dec = sin_lat * self.cos_obliquity + cos_lat * self.sin_obliquity * sin_lon;

        EquatorialCoordinates::from_valid(
            angle::normalize_positive(ra),
            SINE.clip(sin_dec).asin(),
        )
    }
}

impl fmt::Display for EclipticToEquatorialConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EclipticToEquatorialConversion(ε={:.6}°)",
            angle::to_deg(self.obliquity)
        )
    }
}

/// Equatorial to horizontal coordinates for an observer at an instant.
#[derive(Debug, Clone, Copy)]
pub struct EquatorialToHorizontalConversion {
    local_sidereal_time: f64,
    sin_lat: f64,
    cos_lat: f64,
}

impl EquatorialToHorizontalConversion {
    pub fn new<Tz: TimeZone>(when: &DateTime<Tz>, place: &GeographicCoordinates) -> Self {
        Self::from_sidereal_time(sidereal::local(when, place), place.lat())
    }

    pub(crate) fn from_sidereal_time(local_sidereal_time: f64, lat: f64) -> Self {
        let (sin_lat, cos_lat) = lat.sin_cos();
        Self {
            local_sidereal_time,
            sin_lat,
            cos_lat,
        }
    }

    pub fn local_sidereal_time(&self) -> f64 {
        self.local_sidereal_time
    }
}

impl CoordinateTransform<EquatorialCoordinates, HorizontalCoordinates>
    for EquatorialToHorizontalConversion
{
    fn apply(&self, equ: &EquatorialCoordinates) -> HorizontalCoordinates {
        let hour_angle = self.local_sidereal_time - equ.ra();
        let (sin_dec, cos_dec) = equ.dec().sin_cos();

        let alt = SINE
            .clip(sin_dec * self.sin_lat + cos_dec * self.cos_lat * hour_angle.cos())
            .asin();
        let az = (-cos_dec * self.cos_lat * hour_angle.sin())
            .atan2(sin_dec - self.sin_lat * alt.sin());

        HorizontalCoordinates::from_valid(angle::normalize_positive(az), alt)
    }
}

impl fmt::Display for EquatorialToHorizontalConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EquatorialToHorizontalConversion(lst={:.6}h, lat={:.4}°)",
            angle::to_hr(self.local_sidereal_time),
            self.sin_lat.asin().to_degrees()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn dms(d: i32, m: i32, s: f64) -> f64 {
        angle::of_dms(d, m, s).unwrap()
    }

    #[test]
    fn test_obliquity_j2000() {
        let conv = EclipticToEquatorialConversion::new(&Epoch::J2000.instant());
        assert!((conv.obliquity() - dms(23, 26, 21.45)).abs() < 1e-15);
    }

    #[test]
    fn test_ecliptic_to_equatorial() {
        let when = Utc.with_ymd_and_hms(2009, 7, 6, 0, 0, 0).unwrap();
        let conv = EclipticToEquatorialConversion::new(&when);
        assert!((angle::to_deg(conv.obliquity()) - 23.438055).abs() < 1e-6);

        let ecl = EclipticCoordinates::of(dms(139, 41, 10.0), dms(4, 52, 31.0)).unwrap();
        let equ = conv.apply(&ecl);
        assert!((equ.ra_hr() - 9.581478170200254).abs() < 1e-10);
        assert!((equ.dec_deg() - 19.535002937254006).abs() < 1e-9);
    }

    #[test]
    fn test_ecliptic_pole_and_origin() {
        let conv = EclipticToEquatorialConversion::new(&Epoch::J2000.instant());
        let origin = conv.apply(&EclipticCoordinates::of(0.0, 0.0).unwrap());
        assert!(origin.ra().abs() < 1e-15);
        assert!(origin.dec().abs() < 1e-15);
    }

    #[test]
    fn test_equatorial_to_horizontal() {
        let hour_angle = angle::of_hr(5.0 + 51.0 / 60.0 + 44.0 / 3600.0);
        let conv = EquatorialToHorizontalConversion::from_sidereal_time(
            hour_angle,
            angle::of_deg(52.0),
        );
        let equ = EquatorialCoordinates::of(0.0, dms(23, 13, 10.0)).unwrap();
        let hor = conv.apply(&equ);
        assert!((hor.alt_deg() - 19.334345).abs() < 1e-6);
        assert!((hor.az_deg() - 283.271027).abs() < 1e-6);
    }

    #[test]
    fn test_celestial_pole_altitude_is_latitude() {
        let when = Utc.with_ymd_and_hms(2021, 3, 1, 22, 0, 0).unwrap();
        let place = GeographicCoordinates::of_deg(6.57, 46.52).unwrap();
        let conv = EquatorialToHorizontalConversion::new(&when, &place);
        let pole = EquatorialCoordinates::of(1.0, std::f64::consts::FRAC_PI_2).unwrap();
        let hor = conv.apply(&pole);
        assert!((hor.alt_deg() - 46.52).abs() < 1e-9);
    }
}
