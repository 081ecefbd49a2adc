//! A snapshot of the sky seen by one observer at one instant.
//!
//! [`ObservedSky`] evaluates every orbital model, converts each body and
//! each catalogue star to horizontal coordinates and projects them onto the
//! plane. The result is immutable and cheap to discard; build a new one
//! whenever the instant, the observer or the projection changes.

mod kdtree;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use rayon::prelude::*;

use crate::bodies::{
    CelestialObject, CelestialObjectModel, Moon, MoonModel, Planet, PlanetModel, Star, Sun,
    SunModel,
};
use crate::catalogs::{Asterism, StarCatalogue};
use crate::coordinates::{
    CartesianCoordinates, CoordinateTransform, EclipticToEquatorialConversion,
    EquatorialCoordinates, EquatorialToHorizontalConversion, GeographicCoordinates,
};
use crate::error::Result;
use crate::projection::StereographicProjection;
use crate::time::Epoch;

use kdtree::{KdPoint, KdTree};

/// Projected position of the star at the same index in the catalogue.
#[derive(Debug, Clone, Copy)]
struct ProjectedStar([f64; 2]);

impl KdPoint<2> for ProjectedStar {
    fn point(&self) -> [f64; 2] {
        self.0
    }
}

/// A body returned by [`ObservedSky::object_closest_to`].
#[derive(Debug, Clone, Copy)]
pub enum SkyObject<'a> {
    Sun(&'a Sun),
    Moon(&'a Moon),
    Planet(&'a Planet),
    /// A catalogue star and its index in the catalogue's star list.
    Star { index: usize, star: &'a Star },
}

impl<'a> SkyObject<'a> {
    pub fn object(&self) -> &'a dyn CelestialObject {
        match *self {
            SkyObject::Sun(sun) => sun,
            SkyObject::Moon(moon) => moon,
            SkyObject::Planet(planet) => planet,
            SkyObject::Star { star, .. } => star,
        }
    }
}

impl fmt::Display for SkyObject<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.object().info())
    }
}

/// Sun, Moon, planets and catalogue stars, projected for one observation.
#[derive(Debug, Clone)]
pub struct ObservedSky<'a> {
    catalogue: &'a StarCatalogue,
    sun: Sun,
    sun_position: CartesianCoordinates,
    moon: Moon,
    moon_position: CartesianCoordinates,
    planets: Vec<Planet>,
    planet_positions: Vec<f64>,
    star_positions: Vec<f64>,
    star_tree: KdTree<ProjectedStar, 2>,
}

impl<'a> ObservedSky<'a> {
    pub fn new<Tz: TimeZone>(
        when: &DateTime<Tz>,
        place: &GeographicCoordinates,
        projection: &StereographicProjection,
        catalogue: &'a StarCatalogue,
    ) -> Self {
        let days = Epoch::J2010.days_until(when);
        let ecliptic_to_equatorial = EclipticToEquatorialConversion::new(when);
        let equatorial_to_horizontal = EquatorialToHorizontalConversion::new(when, place);
        let project = |equ: &EquatorialCoordinates| {
            projection.apply(&equatorial_to_horizontal.apply(equ))
        };

        let sun = SunModel.at(days, &ecliptic_to_equatorial);
        let sun_position = project(&sun.equatorial_pos());
        let moon = MoonModel.at(days, &ecliptic_to_equatorial);
        let moon_position = project(&moon.equatorial_pos());

        let planets: Vec<Planet> = PlanetModel::ALL
            .iter()
            .map(|model| model.at(days, &ecliptic_to_equatorial))
            .collect();
        let planet_positions: Vec<f64> = planets
            .iter()
            .flat_map(|planet| {
                let xy = project(&planet.equatorial_pos());
                [xy.x(), xy.y()]
            })
            .collect();

        let stars = catalogue.stars();
        let mut star_positions = vec![0.0; 2 * stars.len()];
        star_positions
            .par_chunks_exact_mut(2)
            .zip(stars.par_iter())
            .for_each(|(xy, star)| {
                let projected = project(&star.equatorial_pos());
                xy[0] = projected.x();
                xy[1] = projected.y();
            });

        let star_tree = KdTree::build(
            star_positions
                .chunks_exact(2)
                .map(|xy| ProjectedStar([xy[0], xy[1]]))
                .collect(),
        );
        tracing::debug!(days, stars = stars.len(), "observed sky");

        Self {
            catalogue,
            sun,
            sun_position,
            moon,
            moon_position,
            planets,
            planet_positions,
            star_positions,
            star_tree,
        }
    }

    pub fn sun(&self) -> &Sun {
        &self.sun
    }

    pub fn sun_position(&self) -> CartesianCoordinates {
        self.sun_position
    }

    pub fn moon(&self) -> &Moon {
        &self.moon
    }

    pub fn moon_position(&self) -> CartesianCoordinates {
        self.moon_position
    }

    /// Planets in [`PlanetModel::ALL`] order.
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    /// `[x0, y0, x1, y1, …]`, aligned with [`planets`](Self::planets).
    pub fn planet_positions(&self) -> &[f64] {
        &self.planet_positions
    }

    pub fn stars(&self) -> &'a [Arc<Star>] {
        self.catalogue.stars()
    }

    /// `[x0, y0, x1, y1, …]`, aligned with [`stars`](Self::stars).
    pub fn star_positions(&self) -> &[f64] {
        &self.star_positions
    }

    pub fn asterisms(&self) -> &'a [Asterism] {
        self.catalogue.asterisms()
    }

    pub fn asterism_indices(&self, asterism: &Asterism) -> Result<&'a [usize]> {
        self.catalogue.asterism_indices(asterism)
    }

    /// The body whose projected position is nearest to `point`, provided it
    /// lies within `max_distance` of it.
    ///
    /// Bodies are scanned as Sun, Moon, planets in [`PlanetModel::ALL`]
    /// order, then stars in catalogue order; the first one found wins a tie.
    pub fn object_closest_to(
        &self,
        point: &CartesianCoordinates,
        max_distance: f64,
    ) -> Option<SkyObject<'_>> {
        let mut best: Option<(f64, SkyObject<'_>)> = None;
        let mut consider = |distance: f64, object| {
            if distance <= max_distance && best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, object));
            }
        };

        consider(point.distance_to(&self.sun_position), SkyObject::Sun(&self.sun));
        consider(point.distance_to(&self.moon_position), SkyObject::Moon(&self.moon));
        for (planet, xy) in self.planets.iter().zip(self.planet_positions.chunks_exact(2)) {
            let distance = point.distance_to(&CartesianCoordinates::of(xy[0], xy[1]));
            consider(distance, SkyObject::Planet(planet));
        }

        // The tree compares squared distances, which can round differently
        // from `distance_to`; widen the search so the exact check decides.
        let search_radius = max_distance * (1.0 + 4.0 * f64::EPSILON);
        let mut candidates = self
            .star_tree
            .radius_search([point.x(), point.y()], search_radius);
        candidates.sort_unstable();
        let stars = self.catalogue.stars();
        for index in candidates {
            let xy = &self.star_positions[2 * index..2 * index + 2];
            let distance = point.distance_to(&CartesianCoordinates::of(xy[0], xy[1]));
            consider(
                distance,
                SkyObject::Star {
                    index,
                    star: &stars[index],
                },
            );
        }

        best.map(|(_, object)| object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::HorizontalCoordinates;
    use chrono::Utc;

    fn star(hip: u32, ra_hr: f64, dec_deg: f64) -> Arc<Star> {
        let equ = EquatorialCoordinates::of(ra_hr * std::f64::consts::PI / 12.0, dec_deg.to_radians())
            .unwrap();
        Arc::new(Star::new(hip, format!("HIP {hip}"), equ, 1.0, 0.5).unwrap())
    }

    fn setup() -> (DateTime<Utc>, GeographicCoordinates, StereographicProjection) {
        let when = "2020-02-17T20:15:00Z".parse::<DateTime<Utc>>().unwrap();
        let place = GeographicCoordinates::of_deg(6.57, 46.52).unwrap();
        let projection =
            StereographicProjection::new(HorizontalCoordinates::of_deg(180.0, 22.0).unwrap());
        (when, place, projection)
    }

    fn catalogue() -> StarCatalogue {
        let stars = vec![
            star(1, 5.9195, 7.4071),
            star(2, 6.7525, -16.7161),
            star(3, 2.5302, 89.2641),
            star(4, 6.7525, -16.7161),
        ];
        let asterism = Asterism::new(vec![stars[0].clone(), stars[1].clone()]).unwrap();
        StarCatalogue::new(stars, vec![asterism]).unwrap()
    }

    #[test]
    fn test_positions_are_projected_bodies() {
        let (when, place, projection) = setup();
        let catalogue = catalogue();
        let sky = ObservedSky::new(&when, &place, &projection, &catalogue);
        let to_hor = EquatorialToHorizontalConversion::new(&when, &place);

        assert_eq!(sky.planets().len(), PlanetModel::ALL.len());
        assert_eq!(sky.planet_positions().len(), 2 * PlanetModel::ALL.len());
        for (planet, model) in sky.planets().iter().zip(PlanetModel::ALL) {
            assert_eq!(planet.name(), model.name());
        }

        assert_eq!(sky.star_positions().len(), 2 * catalogue.stars().len());
        for (star, xy) in sky.stars().iter().zip(sky.star_positions().chunks_exact(2)) {
            let expected = projection.apply(&to_hor.apply(&star.equatorial_pos()));
            assert!((expected.x() - xy[0]).abs() < 1e-12);
            assert!((expected.y() - xy[1]).abs() < 1e-12);
        }

        let sun = projection.apply(&to_hor.apply(&sky.sun().equatorial_pos()));
        assert!((sun.x() - sky.sun_position().x()).abs() < 1e-12);
        assert!((sun.y() - sky.sun_position().y()).abs() < 1e-12);
    }

    #[test]
    fn test_asterisms_pass_through() {
        let (when, place, projection) = setup();
        let catalogue = catalogue();
        let sky = ObservedSky::new(&when, &place, &projection, &catalogue);
        assert_eq!(sky.asterisms().len(), 1);
        assert_eq!(sky.asterism_indices(&sky.asterisms()[0]).unwrap(), &[0, 1]);
    }

    #[test]
    fn test_closest_none_when_out_of_range() {
        let (when, place, projection) = setup();
        let catalogue = catalogue();
        let sky = ObservedSky::new(&when, &place, &projection, &catalogue);
        let far = CartesianCoordinates::of(1e6, -1e6);
        assert!(sky.object_closest_to(&far, 1.0).is_none());
        assert!(sky.object_closest_to(&sky.sun_position(), -1.0).is_none());
    }

    #[test]
    fn test_closest_finds_exact_body() {
        let (when, place, projection) = setup();
        let catalogue = catalogue();
        let sky = ObservedSky::new(&when, &place, &projection, &catalogue);

        match sky.object_closest_to(&sky.sun_position(), 1e-9) {
            Some(SkyObject::Sun(sun)) => assert_eq!(sun.name(), "Soleil"),
            other => panic!("expected the Sun, got {other:?}"),
        }
        match sky.object_closest_to(&sky.moon_position(), 1e-9) {
            Some(SkyObject::Moon(_)) => {}
            other => panic!("expected the Moon, got {other:?}"),
        }

        let positions = sky.planet_positions();
        let mars = CartesianCoordinates::of(positions[4], positions[5]);
        let found = sky.object_closest_to(&mars, 1e-9).unwrap();
        assert_eq!(found.object().name(), PlanetModel::Mars.name());

        let positions = sky.star_positions();
        let polaris = CartesianCoordinates::of(positions[4] + 1e-4, positions[5]);
        match sky.object_closest_to(&polaris, 1e-3) {
            Some(SkyObject::Star { index, star }) => {
                assert_eq!(index, 2);
                assert_eq!(star.hipparcos_id(), 3);
            }
            other => panic!("expected a star, got {other:?}"),
        }
    }

    #[test]
    fn test_closest_star_at_exact_max_distance() {
        let (when, place, projection) = setup();
        let catalogue = catalogue();
        let sky = ObservedSky::new(&when, &place, &projection, &catalogue);
        let positions = sky.star_positions();
        let polaris = CartesianCoordinates::of(positions[4], positions[5]);

        for offset in [0.000274, 0.000131, 0.000417, 0.00123] {
            let point =
                CartesianCoordinates::of(polaris.x() + offset, polaris.y() + 0.7 * offset);
            let max_distance = point.distance_to(&polaris);
            match sky.object_closest_to(&point, max_distance) {
                Some(SkyObject::Star { index, .. }) => assert_eq!(index, 2),
                other => panic!("expected the star at offset {offset}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_closest_prefers_nearer_star_over_sun() {
        let (_, place, projection) = setup();
        let when = "2020-02-17T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let empty = StarCatalogue::new(Vec::new(), Vec::new()).unwrap();
        let sun = ObservedSky::new(&when, &place, &projection, &empty)
            .sun()
            .equatorial_pos();

        let neighbour = EquatorialCoordinates::of(sun.ra(), sun.dec() + 0.01).unwrap();
        let stars = vec![Arc::new(Star::new(7, "Voisine", neighbour, 3.0, 0.5).unwrap())];
        let catalogue = StarCatalogue::new(stars, Vec::new()).unwrap();
        let sky = ObservedSky::new(&when, &place, &projection, &catalogue);

        let from = sky.sun_position();
        let to = CartesianCoordinates::of(sky.star_positions()[0], sky.star_positions()[1]);
        let span = from.distance_to(&to);
        assert!(span > 0.0);
        let between = |t: f64| {
            CartesianCoordinates::of(
                from.x() + t * (to.x() - from.x()),
                from.y() + t * (to.y() - from.y()),
            )
        };

        match sky.object_closest_to(&between(0.7), span) {
            Some(SkyObject::Star { index, star }) => {
                assert_eq!(index, 0);
                assert_eq!(star.name(), "Voisine");
            }
            other => panic!("expected the star, got {other:?}"),
        }
        match sky.object_closest_to(&between(0.3), span) {
            Some(SkyObject::Sun(_)) => {}
            other => panic!("expected the Sun, got {other:?}"),
        }
    }

    #[test]
    fn test_closest_tie_keeps_first_star() {
        let (when, place, projection) = setup();
        let catalogue = catalogue();
        let sky = ObservedSky::new(&when, &place, &projection, &catalogue);
        let positions = sky.star_positions();
        let sirius = CartesianCoordinates::of(positions[2], positions[3]);
        match sky.object_closest_to(&sirius, 1e-6) {
            Some(SkyObject::Star { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected a star, got {other:?}"),
        }
    }
}
