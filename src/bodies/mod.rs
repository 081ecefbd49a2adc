//! Celestial objects and the orbital models that produce them.
//!
//! Every object shares a name, an equatorial position, an angular size and
//! a magnitude, exposed through [`CelestialObject`]. Sun, Moon and planets
//! are computed by models ([`SunModel`], [`MoonModel`], [`PlanetModel`]) as
//! pure functions of the days elapsed since J2010; stars come from the
//! catalogue.

mod moon;
mod planet;
mod star;
mod sun;

pub use moon::{Moon, MoonModel};
pub use planet::{Planet, PlanetModel};
pub use star::Star;
pub use sun::{Sun, SunModel};

use crate::coordinates::{EclipticToEquatorialConversion, EquatorialCoordinates};
use crate::error::{invalid_argument, Result};

/// Capabilities shared by every body drawn on the sky.
pub trait CelestialObject {
    fn name(&self) -> &str;

    /// Apparent angular diameter in radians.
    fn angular_size(&self) -> f64;

    fn magnitude(&self) -> f64;

    fn equatorial_pos(&self) -> EquatorialCoordinates;

    /// Short human-readable description.
    fn info(&self) -> String {
        self.name().to_string()
    }
}

/// An orbital model: the position of a body as a function of time.
pub trait CelestialObjectModel {
    type Object: CelestialObject;

    /// The body `days_since_j2010` days after the J2010 epoch (negative
    /// before it).
    fn at(
        &self,
        days_since_j2010: f64,
        ecliptic_to_equatorial: &EclipticToEquatorialConversion,
    ) -> Self::Object;
}

/// Fields common to all object kinds.
#[derive(Debug, Clone)]
struct Attributes {
    name: String,
    equatorial_pos: EquatorialCoordinates,
    angular_size: f64,
    magnitude: f64,
}

impl Attributes {
    fn new(
        name: impl Into<String>,
        equatorial_pos: EquatorialCoordinates,
        angular_size: f64,
        magnitude: f64,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return invalid_argument("celestial object name must not be empty");
        }
        if !(angular_size >= 0.0) {
            return invalid_argument(format!(
                "angular size of {name} must be non-negative, got {angular_size}"
            ));
        }
        Ok(Self {
            name,
            equatorial_pos,
            angular_size,
            magnitude,
        })
    }
}

/// Implements [`CelestialObject`] by delegating to an `attrs` field.
macro_rules! delegate_attributes {
    () => {
        fn name(&self) -> &str {
            &self.attrs.name
        }

        fn angular_size(&self) -> f64 {
            self.attrs.angular_size
        }

        fn magnitude(&self) -> f64 {
            self.attrs.magnitude
        }

        fn equatorial_pos(&self) -> EquatorialCoordinates {
            self.attrs.equatorial_pos
        }
    };
}
use delegate_attributes;
