//! Loader for HYG-database style star tables.
//!
//! The input is CSV with a header line. Columns are located by name, so
//! extra columns and any column order are accepted. Required columns:
//!
//! * `hip`: Hipparcos number, blank for 0
//! * `proper`: proper name, may be blank
//! * `bayer`: Bayer designation, may be blank
//! * `con`: constellation abbreviation
//! * `rarad`, `decrad`: J2000 right ascension and declination, radians
//! * `mag`: visual magnitude, blank for 0
//! * `ci`: B−V colour index, blank for 0
//!
//! A star without a proper name is called `"<bayer or ?> <con>"`.

use std::io::Read;
use std::str::FromStr;

use csv::StringRecord;

use super::{Loader, StarCatalogueBuilder};
use crate::bodies::Star;
use crate::coordinates::EquatorialCoordinates;
use crate::error::{Result, SkyError};

#[derive(Debug, Clone, Copy, Default)]
pub struct HygDatabaseLoader;

/// Positions of the columns the loader reads.
struct Columns {
    hip: usize,
    proper: usize,
    bayer: usize,
    con: usize,
    rarad: usize,
    decrad: usize,
    mag: usize,
    ci: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| SkyError::Parse {
                    line: 1,
                    message: format!("missing column '{name}'"),
                })
        };
        Ok(Self {
            hip: find("hip")?,
            proper: find("proper")?,
            bayer: find("bayer")?,
            con: find("con")?,
            rarad: find("rarad")?,
            decrad: find("decrad")?,
            mag: find("mag")?,
            ci: find("ci")?,
        })
    }
}

fn field<'r>(record: &'r StringRecord, index: usize) -> &'r str {
    record.get(index).map(str::trim).unwrap_or("")
}

fn parse_or_default<T>(record: &StringRecord, index: usize, label: &str, line: usize) -> Result<T>
where
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    let raw = field(record, index);
    if raw.is_empty() {
        return Ok(T::default());
    }
    raw.parse::<T>().map_err(|e| SkyError::Parse {
        line,
        message: format!("parsing {label} '{raw}': {e}"),
    })
}

fn parse_required(record: &StringRecord, index: usize, label: &str, line: usize) -> Result<f64> {
    let raw = field(record, index);
    if raw.is_empty() {
        return Err(SkyError::Parse {
            line,
            message: format!("missing {label}"),
        });
    }
    parse_or_default(record, index, label, line)
}

fn parse_star(record: &StringRecord, columns: &Columns, line: usize) -> Result<Star> {
    let hip: u32 = parse_or_default(record, columns.hip, "hip", line)?;
    let ra = parse_required(record, columns.rarad, "rarad", line)?;
    let dec = parse_required(record, columns.decrad, "decrad", line)?;
    let magnitude: f64 = parse_or_default(record, columns.mag, "mag", line)?;
    let color_index: f64 = parse_or_default(record, columns.ci, "ci", line)?;

    let proper = field(record, columns.proper);
    let name = if proper.is_empty() {
        let bayer = field(record, columns.bayer);
        let bayer = if bayer.is_empty() {
            tracing::warn!(line, hip, "star has neither proper name nor Bayer designation");
            "?"
        } else {
            bayer
        };
        format!("{} {}", bayer, field(record, columns.con))
    } else {
        proper.to_string()
    };

    let in_line = |e: SkyError| SkyError::Parse {
        line,
        message: e.to_string(),
    };
    let position = EquatorialCoordinates::of(ra, dec).map_err(in_line)?;
    Star::new(hip, name, position, magnitude, color_index).map_err(in_line)
}

impl Loader for HygDatabaseLoader {
    fn load(&self, input: &mut dyn Read, builder: &mut StarCatalogueBuilder) -> Result<()> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(input);
        let columns = Columns::locate(rdr.headers()?)?;

        // The builder only sees the stars once the whole table has parsed.
        let mut stars = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            stars.push(parse_star(&record, &columns, line)?);
        }

        tracing::info!(stars = stars.len(), "loaded stars from HYG table");
        for star in stars {
            builder.add_star(star);
        }
        Ok(())
    }
}
