//! Star catalogue and asterisms.
//!
//! A [`StarCatalogue`] is assembled with a [`StarCatalogueBuilder`], either
//! by hand or by running [`Loader`]s over tabular streams, then frozen by
//! [`StarCatalogueBuilder::build`]. Asterisms hold shared references to the
//! catalogue's own stars; the catalogue resolves each of them to indices
//! into its star list once, at build time.

pub mod asterisms;
pub mod hygdata;

pub use asterisms::AsterismLoader;
pub use hygdata::HygDatabaseLoader;

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use crate::bodies::{CelestialObject, Star};
use crate::error::{invalid_argument, Result, SkyError};

/// A non-empty, ordered group of catalogue stars.
#[derive(Debug, Clone)]
pub struct Asterism {
    stars: Vec<Arc<Star>>,
}

impl Asterism {
    pub fn new(stars: Vec<Arc<Star>>) -> Result<Self> {
        if stars.is_empty() {
            return invalid_argument("an asterism needs at least one star");
        }
        Ok(Self { stars })
    }

    pub fn stars(&self) -> &[Arc<Star>] {
        &self.stars
    }

    /// Same stars, by identity, in the same order.
    fn same_members(&self, other: &Asterism) -> bool {
        self.stars.len() == other.stars.len()
            && self
                .stars
                .iter()
                .zip(&other.stars)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

/// Frozen collection of stars and asterisms.
#[derive(Debug, Clone)]
pub struct StarCatalogue {
    stars: Vec<Arc<Star>>,
    asterisms: Vec<Asterism>,
    asterism_indices: Vec<Vec<usize>>,
}

impl StarCatalogue {
    /// Fails if an asterism contains a star that is not, by identity, one
    /// of `stars`.
    pub fn new(stars: Vec<Arc<Star>>, asterisms: Vec<Asterism>) -> Result<Self> {
        let mut index_of: HashMap<*const Star, usize> = HashMap::with_capacity(stars.len());
        for (i, star) in stars.iter().enumerate() {
            index_of.entry(Arc::as_ptr(star)).or_insert(i);
        }

        let asterism_indices = asterisms
            .iter()
            .enumerate()
            .map(|(a, asterism)| {
                asterism
                    .stars()
                    .iter()
                    .map(|star| {
                        index_of.get(&Arc::as_ptr(star)).copied().ok_or_else(|| {
                            SkyError::ForeignStar {
                                asterism: a,
                                star: star.name().to_string(),
                            }
                        })
                    })
                    .collect::<Result<Vec<usize>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            stars = stars.len(),
            asterisms = asterisms.len(),
            "built star catalogue"
        );

        Ok(Self {
            stars,
            asterisms,
            asterism_indices,
        })
    }

    pub fn stars(&self) -> &[Arc<Star>] {
        &self.stars
    }

    pub fn asterisms(&self) -> &[Asterism] {
        &self.asterisms
    }

    /// Indices into [`stars`](Self::stars) of the members of `asterism`,
    /// in asterism order.
    pub fn asterism_indices(&self, asterism: &Asterism) -> Result<&[usize]> {
        self.asterisms
            .iter()
            .position(|a| a.same_members(asterism))
            .map(|i| self.asterism_indices[i].as_slice())
            .ok_or_else(|| {
                SkyError::InvalidArgument("asterism is not part of this catalogue".to_string())
            })
    }

    /// Every asterism with its resolved star indices.
    pub fn asterisms_with_indices(&self) -> impl Iterator<Item = (&Asterism, &[usize])> {
        self.asterisms
            .iter()
            .zip(self.asterism_indices.iter().map(Vec::as_slice))
    }
}

/// Parses a byte stream into stars and/or asterisms.
///
/// Loaders may look at what the builder already holds: the asterism loader
/// resolves Hipparcos ids against stars loaded by an earlier pass. A load
/// that fails adds nothing to the builder.
pub trait Loader {
    fn load(&self, input: &mut dyn Read, builder: &mut StarCatalogueBuilder) -> Result<()>;
}

/// Mutable accumulator for a [`StarCatalogue`]; consumed by
/// [`build`](Self::build).
#[derive(Debug, Default)]
pub struct StarCatalogueBuilder {
    stars: Vec<Arc<Star>>,
    asterisms: Vec<Asterism>,
}

impl StarCatalogueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_star(&mut self, star: impl Into<Arc<Star>>) -> &mut Self {
        self.stars.push(star.into());
        self
    }

    /// Stars added so far, in insertion order.
    pub fn stars(&self) -> &[Arc<Star>] {
        &self.stars
    }

    pub fn add_asterism(&mut self, asterism: Asterism) -> &mut Self {
        self.asterisms.push(asterism);
        self
    }

    pub fn asterisms(&self) -> &[Asterism] {
        &self.asterisms
    }

    /// Run `loader` over `input`, adding what it parses to this builder.
    pub fn load_from<R: Read>(&mut self, mut input: R, loader: &dyn Loader) -> Result<&mut Self> {
        loader.load(&mut input, self)?;
        Ok(self)
    }

    pub fn build(self) -> Result<StarCatalogue> {
        StarCatalogue::new(self.stars, self.asterisms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::EquatorialCoordinates;
    use std::io::Cursor;

    fn star(hip: u32, name: &str) -> Arc<Star> {
        Arc::new(
            Star::new(
                hip,
                name,
                EquatorialCoordinates::of(0.1 * hip as f64, 0.0).unwrap(),
                1.0,
                0.0,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_asterism_must_not_be_empty() {
        assert!(Asterism::new(Vec::new()).is_err());
    }

    #[test]
    fn test_builder_and_indices() {
        let a = star(1, "A");
        let b = star(2, "B");
        let c = star(3, "C");
        let mut builder = StarCatalogueBuilder::new();
        builder
            .add_star(a.clone())
            .add_star(b.clone())
            .add_star(c.clone());
        builder.add_asterism(Asterism::new(vec![c.clone(), a.clone()]).unwrap());
        assert_eq!(builder.stars().len(), 3);
        assert_eq!(builder.asterisms().len(), 1);

        let catalogue = builder.build().unwrap();
        let asterism = &catalogue.asterisms()[0];
        assert_eq!(catalogue.asterism_indices(asterism).unwrap(), &[2, 0]);

        let copy = Asterism::new(vec![c.clone(), a.clone()]).unwrap();
        assert_eq!(catalogue.asterism_indices(&copy).unwrap(), &[2, 0]);
        let other = Asterism::new(vec![b]).unwrap();
        assert!(catalogue.asterism_indices(&other).is_err());

        let pairs: Vec<_> = catalogue.asterisms_with_indices().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].1, &[2, 0]);
    }

    #[test]
    fn test_foreign_star_rejected() {
        let inside = star(1, "Inside");
        let lookalike = star(1, "Inside");
        let result = StarCatalogue::new(
            vec![inside],
            vec![Asterism::new(vec![lookalike]).unwrap()],
        );
        assert!(matches!(result, Err(SkyError::ForeignStar { asterism: 0, .. })));
    }

    struct FixedLoader;

    impl Loader for FixedLoader {
        fn load(&self, input: &mut dyn Read, builder: &mut StarCatalogueBuilder) -> Result<()> {
            let mut text = String::new();
            input.read_to_string(&mut text)?;
            for (i, name) in text.split_whitespace().enumerate() {
                builder.add_star(star(i as u32 + 1, name));
            }
            Ok(())
        }
    }

    #[test]
    fn test_load_from_chains() {
        let mut builder = StarCatalogueBuilder::new();
        builder
            .load_from(Cursor::new("Vega Deneb"), &FixedLoader)
            .unwrap()
            .load_from(Cursor::new("Altair"), &FixedLoader)
            .unwrap();
        let names: Vec<_> = builder.stars().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["Vega", "Deneb", "Altair"]);
    }
}
