//! Observation settings and resource locations.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::catalogs::{AsterismLoader, HygDatabaseLoader, Loader, StarCatalogue, StarCatalogueBuilder};
use crate::coordinates::{GeographicCoordinates, HorizontalCoordinates};
use crate::error::Result;
use crate::math::angle;
use crate::projection::StereographicProjection;
use crate::sky::ObservedSky;

/// Where the observer stands, where they look, and which catalogue files
/// to read.
#[derive(Debug, Clone)]
pub struct SkyConfig {
    pub observer: GeographicCoordinates,
    /// Direction mapped to the centre of the projection plane.
    pub view_center: HorizontalCoordinates,
    /// HYG-style CSV star table.
    pub star_catalogue: PathBuf,
    /// One asterism per line, as Hipparcos numbers.
    pub asterisms: PathBuf,
    /// Largest plane distance at which a body is picked.
    pub max_pick_distance: f64,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            observer: GeographicCoordinates::from_valid_deg(6.57, 46.52),
            view_center: HorizontalCoordinates::from_valid(angle::of_deg(180.0), angle::of_deg(22.0)),
            star_catalogue: PathBuf::from("data/hygdata_v3.csv"),
            asterisms: PathBuf::from("data/asterisms.txt"),
            max_pick_distance: 0.01,
        }
    }
}

fn load_file(builder: &mut StarCatalogueBuilder, path: &Path, loader: &dyn Loader) -> Result<()> {
    tracing::info!("Loading {}", path.display());
    let file = File::open(path)?;
    builder.load_from(BufReader::new(file), loader)?;
    Ok(())
}

impl SkyConfig {
    /// Read the star table, then the asterisms, into a new catalogue.
    pub fn load_catalogue(&self) -> Result<StarCatalogue> {
        let mut builder = StarCatalogueBuilder::new();
        load_file(&mut builder, &self.star_catalogue, &HygDatabaseLoader)?;
        load_file(&mut builder, &self.asterisms, &AsterismLoader)?;
        builder.build()
    }

    pub fn projection(&self) -> StereographicProjection {
        StereographicProjection::new(self.view_center)
    }

    pub fn observe<'a, Tz: TimeZone>(
        &self,
        when: &DateTime<Tz>,
        catalogue: &'a StarCatalogue,
    ) -> ObservedSky<'a> {
        ObservedSky::new(when, &self.observer, &self.projection(), catalogue)
    }
}
