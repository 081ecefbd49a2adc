use std::f64::consts::TAU;
use std::fmt;

use super::{delegate_attributes, Attributes, CelestialObject, CelestialObjectModel};
use crate::coordinates::{
    CoordinateTransform, EclipticCoordinates, EclipticToEquatorialConversion,
    EquatorialCoordinates,
};
use crate::error::Result;
use crate::math::angle;

const SUN_NAME: &str = "Soleil";
const SUN_MAGNITUDE: f64 = -26.7;

#[derive(Debug, Clone)]
pub struct Sun {
    attrs: Attributes,
    ecliptic_pos: EclipticCoordinates,
    mean_anomaly: f64,
}

impl Sun {
    pub fn new(
        ecliptic_pos: EclipticCoordinates,
        equatorial_pos: EquatorialCoordinates,
        angular_size: f64,
        mean_anomaly: f64,
    ) -> Result<Self> {
        Ok(Self {
            attrs: Attributes::new(SUN_NAME, equatorial_pos, angular_size, SUN_MAGNITUDE)?,
            ecliptic_pos,
            mean_anomaly,
        })
    }

    pub fn ecliptic_pos(&self) -> EclipticCoordinates {
        self.ecliptic_pos
    }

    /// Mean anomaly in radians, not reduced to `[0, 2π)`.
    pub fn mean_anomaly(&self) -> f64 {
        self.mean_anomaly
    }
}

impl CelestialObject for Sun {
    delegate_attributes!();
}

impl fmt::Display for Sun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info())
    }
}

const TROPICAL_YEAR_DAYS: f64 = 365.242191;
/// Ecliptic longitude at J2010, degrees.
const LON_AT_J2010_DEG: f64 = 279.557208;
/// Ecliptic longitude of perigee, degrees.
const PERIGEE_LON_DEG: f64 = 283.112438;
const ECCENTRICITY: f64 = 0.016705;
/// Angular diameter at one astronomical unit, degrees.
const THETA0_DEG: f64 = 0.533128;

/// Low-precision Sun: circular mean motion with a first-order equation of
/// centre.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunModel;

impl CelestialObjectModel for SunModel {
    type Object = Sun;

    fn at(&self, days_since_j2010: f64, conversion: &EclipticToEquatorialConversion) -> Sun {
        let perigee_lon = angle::of_deg(PERIGEE_LON_DEG);
        let mean_anomaly = (TAU / TROPICAL_YEAR_DAYS) * days_since_j2010
            + angle::of_deg(LON_AT_J2010_DEG)
            - perigee_lon;
        let true_anomaly = mean_anomaly + 2.0 * ECCENTRICITY * mean_anomaly.sin();

        let lon = angle::normalize_positive(true_anomaly + perigee_lon);
        let ecliptic_pos = EclipticCoordinates::from_valid(lon, 0.0);

        let angular_size = angle::of_deg(THETA0_DEG)
            * ((1.0 + ECCENTRICITY * true_anomaly.cos()) / (1.0 - ECCENTRICITY * ECCENTRICITY));

        Sun {
            attrs: Attributes {
                name: SUN_NAME.to_string(),
                equatorial_pos: conversion.apply(&ecliptic_pos),
                angular_size,
                magnitude: SUN_MAGNITUDE,
            },
            ecliptic_pos,
            mean_anomaly,
        }
    }
}
