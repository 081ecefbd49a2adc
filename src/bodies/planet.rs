use std::f64::consts::{PI, TAU};
use std::fmt;

use super::{delegate_attributes, Attributes, CelestialObject, CelestialObjectModel};
use crate::coordinates::{
    CoordinateTransform, EclipticCoordinates, EclipticToEquatorialConversion,
    EquatorialCoordinates,
};
use crate::error::Result;
use crate::math::angle;

const TROPICAL_YEAR_DAYS: f64 = 365.242191;

#[derive(Debug, Clone)]
pub struct Planet {
    attrs: Attributes,
    color: [u8; 3],
}

impl Planet {
    pub fn new(
        name: impl Into<String>,
        equatorial_pos: EquatorialCoordinates,
        angular_size: f64,
        magnitude: f64,
        color: [u8; 3],
    ) -> Result<Self> {
        Ok(Self {
            attrs: Attributes::new(name, equatorial_pos, angular_size, magnitude)?,
            color,
        })
    }

    /// Display colour as RGB.
    pub fn color(&self) -> [u8; 3] {
        self.color
    }
}

impl CelestialObject for Planet {
    delegate_attributes!();
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info())
    }
}

/// Keplerian elements at J2010. Angles in degrees.
struct OrbitalElements {
    name: &'static str,
    /// Tropical period, years.
    period: f64,
    lon_at_epoch: f64,
    perihelion_lon: f64,
    eccentricity: f64,
    /// Semi-major axis, AU.
    semi_major_axis: f64,
    inclination: f64,
    node_lon: f64,
    /// Angular diameter at 1 AU, arcseconds.
    theta0: f64,
    /// Magnitude at 1 AU.
    v0: f64,
    color: [u8; 3],
}

const EARTH: OrbitalElements = OrbitalElements {
    name: "Terre",
    period: 0.999996,
    lon_at_epoch: 99.556772,
    perihelion_lon: 103.2055,
    eccentricity: 0.016671,
    semi_major_axis: 0.999985,
    inclination: 0.0,
    node_lon: 0.0,
    theta0: 0.0,
    v0: 0.0,
    color: [0x3d, 0x7e, 0xc9],
};

/// Heliocentric polar position in the planet's orbital plane.
struct OrbitPosition {
    /// Distance to the Sun, AU.
    radius: f64,
    /// Heliocentric longitude, radians.
    lon: f64,
}

impl OrbitalElements {
    fn position(&self, days_since_j2010: f64) -> OrbitPosition {
        let perihelion_lon = angle::of_deg(self.perihelion_lon);
        let mean_anomaly = (TAU / TROPICAL_YEAR_DAYS) * days_since_j2010 / self.period
            + angle::of_deg(self.lon_at_epoch)
            - perihelion_lon;
        let true_anomaly = mean_anomaly + 2.0 * self.eccentricity * mean_anomaly.sin();
        let radius = self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
            / (1.0 + self.eccentricity * true_anomaly.cos());
        OrbitPosition {
            radius,
            lon: true_anomaly + perihelion_lon,
        }
    }
}

/// The seven planets other than Earth, in order of distance to the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetModel {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl PlanetModel {
    pub const ALL: [PlanetModel; 7] = [
        PlanetModel::Mercury,
        PlanetModel::Venus,
        PlanetModel::Mars,
        PlanetModel::Jupiter,
        PlanetModel::Saturn,
        PlanetModel::Uranus,
        PlanetModel::Neptune,
    ];

    fn elements(self) -> &'static OrbitalElements {
        match self {
            PlanetModel::Mercury => &MERCURY,
            PlanetModel::Venus => &VENUS,
            PlanetModel::Mars => &MARS,
            PlanetModel::Jupiter => &JUPITER,
            PlanetModel::Saturn => &SATURN,
            PlanetModel::Uranus => &URANUS,
            PlanetModel::Neptune => &NEPTUNE,
        }
    }

    pub fn name(self) -> &'static str {
        self.elements().name
    }

    /// Whether the orbit lies inside Earth's.
    pub fn is_inferior(self) -> bool {
        matches!(self, PlanetModel::Mercury | PlanetModel::Venus)
    }
}

impl CelestialObjectModel for PlanetModel {
    type Object = Planet;

    fn at(&self, days_since_j2010: f64, conversion: &EclipticToEquatorialConversion) -> Planet {
        let elements = self.elements();
        let planet = elements.position(days_since_j2010);
        let earth = EARTH.position(days_since_j2010);

        // Project onto the ecliptic.
        let node_lon = angle::of_deg(elements.node_lon);
        let inclination = angle::of_deg(elements.inclination);
        let (sin_arg, cos_arg) = (planet.lon - node_lon).sin_cos();
        let helio_lat = (sin_arg * inclination.sin()).asin();
        let projected_radius = planet.radius * helio_lat.cos();
        let projected_lon = (sin_arg * inclination.cos()).atan2(cos_arg) + node_lon;

        // Geocentric ecliptic coordinates.
        let r = projected_radius;
        let l = projected_lon;
        let big_r = earth.radius;
        let big_l = earth.lon;
        let lon = if self.is_inferior() {
            PI + big_l + (r * (big_l - l).sin()).atan2(big_r - r * (big_l - l).cos())
        } else {
            l + (big_r * (l - big_l).sin()).atan2(r - big_r * (l - big_l).cos())
        };
        let lat = (r * helio_lat.tan() * (lon - l).sin() / (big_r * (l - big_l).sin())).atan();
        let ecliptic_pos = EclipticCoordinates::from_valid(angle::normalize_positive(lon), lat);

        let earth_distance = (big_r * big_r + planet.radius * planet.radius
            - 2.0 * big_r * planet.radius * (planet.lon - big_l).cos() * helio_lat.cos())
        .sqrt();
        let angular_size = angle::of_arcsec(elements.theta0) / earth_distance;

        let phase = (1.0 + (lon - planet.lon).cos()) / 2.0;
        let magnitude =
            elements.v0 + 5.0 * (planet.radius * earth_distance / phase.sqrt()).log10();

        Planet {
            attrs: Attributes {
                name: elements.name.to_string(),
                equatorial_pos: conversion.apply(&ecliptic_pos),
                angular_size,
                magnitude,
            },
            color: elements.color,
        }
    }
}

const MERCURY: OrbitalElements = OrbitalElements {
    name: "Mercure",
    period: 0.24085,
    lon_at_epoch: 75.5671,
    perihelion_lon: 77.612,
    eccentricity: 0.205627,
    semi_major_axis: 0.387098,
    inclination: 7.0051,
    node_lon: 48.449,
    theta0: 6.74,
    v0: -0.42,
    color: [0x9c, 0x97, 0x93],
};

const VENUS: OrbitalElements = OrbitalElements {
    name: "Vénus",
    period: 0.615207,
    lon_at_epoch: 272.30044,
    perihelion_lon: 131.54,
    eccentricity: 0.006812,
    semi_major_axis: 0.723329,
    inclination: 3.3947,
    node_lon: 76.769,
    theta0: 16.92,
    v0: -4.40,
    color: [0xf2, 0xe6, 0xc4],
};

const MARS: OrbitalElements = OrbitalElements {
    name: "Mars",
    period: 1.880765,
    lon_at_epoch: 109.09646,
    perihelion_lon: 336.217,
    eccentricity: 0.093348,
    semi_major_axis: 1.523689,
    inclination: 1.8497,
    node_lon: 49.632,
    theta0: 9.36,
    v0: -1.52,
    color: [0xd1, 0x5a, 0x2c],
};

const JUPITER: OrbitalElements = OrbitalElements {
    name: "Jupiter",
    period: 11.857911,
    lon_at_epoch: 337.917132,
    perihelion_lon: 14.6633,
    eccentricity: 0.048907,
    semi_major_axis: 5.20278,
    inclination: 1.3035,
    node_lon: 100.595,
    theta0: 196.74,
    v0: -9.40,
    color: [0xd8, 0xca, 0x9d],
};

const SATURN: OrbitalElements = OrbitalElements {
    name: "Saturne",
    period: 29.310579,
    lon_at_epoch: 172.398316,
    perihelion_lon: 89.567,
    eccentricity: 0.053853,
    semi_major_axis: 9.51134,
    inclination: 2.4873,
    node_lon: 113.752,
    theta0: 165.60,
    v0: -8.88,
    color: [0xe3, 0xc9, 0x8b],
};

const URANUS: OrbitalElements = OrbitalElements {
    name: "Uranus",
    period: 84.039492,
    lon_at_epoch: 356.135400,
    perihelion_lon: 172.884833,
    eccentricity: 0.046321,
    semi_major_axis: 19.21814,
    inclination: 0.773059,
    node_lon: 73.926961,
    theta0: 65.80,
    v0: -7.19,
    color: [0xac, 0xe5, 0xee],
};

const NEPTUNE: OrbitalElements = OrbitalElements {
    name: "Neptune",
    period: 165.84539,
    lon_at_epoch: 326.895127,
    perihelion_lon: 23.07,
    eccentricity: 0.010483,
    semi_major_axis: 30.1985,
    inclination: 1.7673,
    node_lon: 131.879,
    theta0: 62.20,
    v0: -6.87,
    color: [0x4b, 0x70, 0xdd],
};
