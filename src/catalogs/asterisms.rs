//! Loader for asterism definitions: one asterism per line, written as a
//! comma-separated list of Hipparcos numbers. Every number must name a star
//! already present in the builder, so the star table has to be loaded
//! first.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;

use super::{Asterism, Loader, StarCatalogueBuilder};
use crate::bodies::Star;
use crate::error::{Result, SkyError};

#[derive(Debug, Clone, Copy, Default)]
pub struct AsterismLoader;

fn parse_asterism(line: &str, line_num: usize, by_hip: &HashMap<u32, Arc<Star>>) -> Result<Asterism> {
    let stars = line
        .split(',')
        .map(|field| {
            let field = field.trim();
            let hipparcos_id: u32 = field.parse().map_err(|e| SkyError::Parse {
                line: line_num,
                message: format!("parsing Hipparcos id '{field}': {e}"),
            })?;
            by_hip
                .get(&hipparcos_id)
                .cloned()
                .ok_or(SkyError::UnknownStar { hipparcos_id })
        })
        .collect::<Result<Vec<_>>>()?;
    Asterism::new(stars)
}

impl Loader for AsterismLoader {
    fn load(&self, input: &mut dyn Read, builder: &mut StarCatalogueBuilder) -> Result<()> {
        let mut by_hip: HashMap<u32, Arc<Star>> = HashMap::with_capacity(builder.stars().len());
        for star in builder.stars() {
            by_hip
                .entry(star.hipparcos_id())
                .or_insert_with(|| star.clone());
        }

        let reader = BufReader::new(input);
        let mut asterisms = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                tracing::warn!(line = i + 1, "skipping blank asterism line");
                continue;
            }
            asterisms.push(parse_asterism(&line, i + 1, &by_hip)?);
        }

        tracing::info!(asterisms = asterisms.len(), "loaded asterisms");
        for asterism in asterisms {
            builder.add_asterism(asterism);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::HygDatabaseLoader;
    use std::io::Cursor;

    const STARS: &str = "\
hip,proper,bayer,con,rarad,decrad,mag,ci
24436,Rigel,Bet,Ori,1.372430,-0.143145,0.18,-0.03
27989,Betelgeuse,Alp,Ori,1.549729,0.129277,0.45,1.5
26727,Alnitak,Zet,Ori,1.486691,-0.033887,1.74,-0.2
26311,Alnilam,Eps,Ori,1.466963,-0.020980,1.69,-0.18
25930,Mintaka,Del,Ori,1.448652,-0.005021,2.25,-0.17
";

    fn builder_with_stars() -> StarCatalogueBuilder {
        let mut builder = StarCatalogueBuilder::new();
        builder
            .load_from(Cursor::new(STARS), &HygDatabaseLoader)
            .expect("loading stars");
        builder
    }

    #[test]
    fn test_two_pass_load_and_build() {
        let mut builder = builder_with_stars();
        builder
            .load_from(
                Cursor::new("26727,26311,25930\n\n27989, 24436\n"),
                &AsterismLoader,
            )
            .expect("loading asterisms");
        assert_eq!(builder.asterisms().len(), 2);

        let catalogue = builder.build().expect("building catalogue");
        let expected: [&[u32]; 2] = [&[26727, 26311, 25930], &[27989, 24436]];
        for ((asterism, indices), hips) in catalogue.asterisms_with_indices().zip(expected) {
            let resolved: Vec<u32> = indices
                .iter()
                .map(|&i| catalogue.stars()[i].hipparcos_id())
                .collect();
            assert_eq!(resolved, hips);
            let members: Vec<u32> = asterism.stars().iter().map(|s| s.hipparcos_id()).collect();
            assert_eq!(members, hips);
        }
        assert_eq!(catalogue.asterism_indices(&catalogue.asterisms()[0]).unwrap(), &[2, 3, 4]);
    }

    #[test]
    fn test_unknown_star() {
        let mut builder = builder_with_stars();
        let err = builder
            .load_from(Cursor::new("24436,99999\n"), &AsterismLoader)
            .unwrap_err();
        assert!(matches!(err, SkyError::UnknownStar { hipparcos_id: 99999 }));
    }

    #[test]
    fn test_asterisms_before_stars_fail() {
        let mut builder = StarCatalogueBuilder::new();
        let err = builder
            .load_from(Cursor::new("24436\n"), &AsterismLoader)
            .unwrap_err();
        assert!(matches!(err, SkyError::UnknownStar { .. }));
    }

    #[test]
    fn test_failed_load_leaves_builder_untouched() {
        let mut builder = builder_with_stars();
        builder
            .load_from(Cursor::new("24436\n"), &AsterismLoader)
            .expect("loading first asterism");
        let err = builder
            .load_from(Cursor::new("27989\n24436,99999\n"), &AsterismLoader)
            .unwrap_err();
        assert!(matches!(err, SkyError::UnknownStar { hipparcos_id: 99999 }));
        assert_eq!(builder.asterisms().len(), 1);
        assert_eq!(builder.asterisms()[0].stars()[0].hipparcos_id(), 24436);
    }

    #[test]
    fn test_malformed_id() {
        let mut builder = builder_with_stars();
        let err = builder
            .load_from(Cursor::new("24436\n24436,x\n"), &AsterismLoader)
            .unwrap_err();
        assert!(matches!(err, SkyError::Parse { line: 2, .. }));
    }
}
