use std::fmt;

use super::{delegate_attributes, Attributes, CelestialObject, CelestialObjectModel, SunModel};
use crate::coordinates::{
    CoordinateTransform, EclipticCoordinates, EclipticToEquatorialConversion,
    EquatorialCoordinates, SphericalCoordinates,
};
use crate::error::{invalid_argument, Result};
use crate::math::angle;
use crate::math::{ClosedInterval, Interval};

const MOON_NAME: &str = "Lune";
const PHASE: ClosedInterval = ClosedInterval::from_bounds(0.0, 1.0);

#[derive(Debug, Clone)]
pub struct Moon {
    attrs: Attributes,
    phase: f64,
}

impl Moon {
    /// `phase` is the illuminated fraction, in `[0, 1]`.
    pub fn new(
        equatorial_pos: EquatorialCoordinates,
        angular_size: f64,
        magnitude: f64,
        phase: f64,
    ) -> Result<Self> {
        if !PHASE.contains(phase) {
            return invalid_argument(format!("lunar phase {phase} outside [0, 1]"));
        }
        Ok(Self {
            attrs: Attributes::new(MOON_NAME, equatorial_pos, angular_size, magnitude)?,
            phase,
        })
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }
}

impl CelestialObject for Moon {
    delegate_attributes!();

    fn info(&self) -> String {
        format!("{} ({:.1}%)", self.attrs.name, self.phase * 100.0)
    }
}

impl fmt::Display for Moon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info())
    }
}

// Orbital elements at J2010, degrees unless stated.
const MEAN_LON: f64 = 91.929336;
const PERIGEE_MEAN_LON: f64 = 130.143076;
const NODE_LON: f64 = 291.682547;
const INCLINATION: f64 = 5.145396;
const ECCENTRICITY: f64 = 0.0549;
const THETA0: f64 = 0.5181;

// Daily motions, degrees per day.
const MEAN_LON_RATE: f64 = 13.1763966;
const PERIGEE_RATE: f64 = 0.1114041;
const NODE_RATE: f64 = 0.0529539;

/// The Moon, perturbed by the Sun (evection, annual equation, variation).
///
/// Evaluates [`SunModel`] at the same instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoonModel;

impl CelestialObjectModel for MoonModel {
    type Object = Moon;

    fn at(&self, days_since_j2010: f64, conversion: &EclipticToEquatorialConversion) -> Moon {
        let d = days_since_j2010;
        let sun = SunModel.at(d, conversion);
        let sun_lon = sun.ecliptic_pos().lon();
        let sin_sun_anomaly = sun.mean_anomaly().sin();

        // Orbital longitude
        let mean_lon = angle::of_deg(MEAN_LON_RATE) * d + angle::of_deg(MEAN_LON);
        let mean_anomaly =
            mean_lon - angle::of_deg(PERIGEE_RATE) * d - angle::of_deg(PERIGEE_MEAN_LON);
        let evection = angle::of_deg(1.2739) * (2.0 * (mean_lon - sun_lon) - mean_anomaly).sin();
        let annual_equation = angle::of_deg(0.1858) * sin_sun_anomaly;
        let a3 = angle::of_deg(0.37) * sin_sun_anomaly;
        let corrected_anomaly = mean_anomaly + evection - annual_equation - a3;
        let centre = angle::of_deg(6.2886) * corrected_anomaly.sin();
        let a4 = angle::of_deg(0.214) * (2.0 * corrected_anomaly).sin();
        let corrected_lon = mean_lon + evection + centre - annual_equation + a4;
        let variation = angle::of_deg(0.6583) * (2.0 * (corrected_lon - sun_lon)).sin();
        let true_lon = corrected_lon + variation;

        // Ecliptic position
        let node = angle::of_deg(NODE_LON) - angle::of_deg(NODE_RATE) * d;
        let corrected_node = node - angle::of_deg(0.16) * sin_sun_anomaly;
        let inclination = angle::of_deg(INCLINATION);
        let (sin_arg, cos_arg) = (true_lon - corrected_node).sin_cos();
        let lon = (sin_arg * inclination.cos()).atan2(cos_arg) + corrected_node;
        let lat = (sin_arg * inclination.sin()).asin();
        let ecliptic_pos = EclipticCoordinates::from_valid(angle::normalize_positive(lon), lat);

        let phase = (1.0 - (true_lon - sun_lon).cos()) / 2.0;

        let distance = (1.0 - ECCENTRICITY * ECCENTRICITY)
            / (1.0 + ECCENTRICITY * (corrected_anomaly + centre).cos());
        let angular_size = angle::of_deg(THETA0) / distance;

        Moon {
            attrs: Attributes {
                name: MOON_NAME.to_string(),
                equatorial_pos: conversion.apply(&ecliptic_pos),
                angular_size,
                magnitude: 0.0,
            },
            phase,
        }
    }
}
