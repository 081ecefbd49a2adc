pub mod bodies;
pub mod catalogs;
mod config;
pub mod coordinates;
mod error;
pub mod math;
pub mod projection;
pub mod sky;
pub mod time;

pub use bodies::{CelestialObject, CelestialObjectModel, Moon, Planet, PlanetModel, Star, Sun};
pub use catalogs::{Asterism, StarCatalogue, StarCatalogueBuilder};
pub use config::SkyConfig;
pub use error::{Result, SkyError};
pub use projection::StereographicProjection;
pub use sky::{ObservedSky, SkyObject};

/// Common types used in the library
pub type Point2 = nalgebra::Point2<f64>;
