use std::fmt;

use super::{delegate_attributes, Attributes, CelestialObject};
use crate::coordinates::EquatorialCoordinates;
use crate::error::{invalid_argument, Result};
use crate::math::{ClosedInterval, Interval};

const COLOR_INDEX: ClosedInterval = ClosedInterval::from_bounds(-0.5, 5.5);

/// A catalogued star. Stars are point sources: their angular size is zero.
#[derive(Debug, Clone)]
pub struct Star {
    attrs: Attributes,
    hipparcos_id: u32,
    color_index: f64,
}

impl Star {
    /// `color_index` is the B−V index, which must lie in `[-0.5, 5.5]`.
    pub fn new(
        hipparcos_id: u32,
        name: impl Into<String>,
        equatorial_pos: EquatorialCoordinates,
        magnitude: f64,
        color_index: f64,
    ) -> Result<Self> {
        if !COLOR_INDEX.contains(color_index) {
            return invalid_argument(format!("color index {color_index} outside [-0.5, 5.5]"));
        }
        Ok(Self {
            attrs: Attributes::new(name, equatorial_pos, 0.0, magnitude)?,
            hipparcos_id,
            color_index,
        })
    }

    /// Hipparcos catalogue number, 0 when unknown.
    pub fn hipparcos_id(&self) -> u32 {
        self.hipparcos_id
    }

    pub fn color_index(&self) -> f64 {
        self.color_index
    }

    /// Approximate effective temperature in kelvin, from Ballesteros'
    /// formula.
    pub fn color_temperature(&self) -> u32 {
        let c = 0.92 * self.color_index;
        (4600.0 * (1.0 / (c + 1.7) + 1.0 / (c + 0.62))).floor() as u32
    }
}

impl CelestialObject for Star {
    delegate_attributes!();
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(color_index: f64) -> Result<Star> {
        Star::new(
            24436,
            "Rigel",
            EquatorialCoordinates::of(1.3724, -0.1431).unwrap(),
            0.18,
            color_index,
        )
    }

    #[test]
    fn test_accessors() {
        let rigel = star(-0.03).unwrap();
        assert_eq!(rigel.hipparcos_id(), 24436);
        assert_eq!(rigel.name(), "Rigel");
        assert_eq!(rigel.info(), "Rigel");
        assert_eq!(rigel.angular_size(), 0.0);
        assert_eq!(rigel.magnitude(), 0.18);
        assert_eq!(rigel.color_index(), -0.03);
        assert_eq!(rigel.equatorial_pos().ra(), 1.3724);
    }

    #[test]
    fn test_color_index_domain() {
        assert!(star(-0.5).is_ok());
        assert!(star(5.5).is_ok());
        assert!(star(-0.51).is_err());
        assert!(star(5.51).is_err());
    }

    #[test]
    fn test_color_temperature() {
        assert_eq!(star(-0.03).unwrap().color_temperature(), 10515);
        assert_eq!(star(1.5).unwrap().color_temperature(), 3793);
        assert_eq!(star(0.0).unwrap().color_temperature(), 10125);
    }
}
