use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyscene::coordinates::{
    CartesianCoordinates, CoordinateTransform, EquatorialToHorizontalConversion,
    GeographicCoordinates, HorizontalCoordinates, SphericalCoordinates,
};
use skyscene::{CelestialObject, SkyConfig};

#[derive(Parser)]
#[command(name = "skyscene")]
#[command(about = "Print the projected sky for an observer at an instant")]
struct Cli {
    /// Observation instant, RFC 3339 (defaults to now)
    #[arg(long)]
    time: Option<String>,
    /// Observer longitude in degrees, positive east
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,
    /// Observer latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Azimuth of the view center in degrees
    #[arg(long)]
    az: Option<f64>,
    /// Altitude of the view center in degrees
    #[arg(long, allow_negative_numbers = true)]
    alt: Option<f64>,
    /// HYG-style star table
    #[arg(long)]
    stars: Option<PathBuf>,
    /// Asterism file
    #[arg(long)]
    asterisms: Option<PathBuf>,
    /// Report the body closest to this plane point
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pick: Option<Vec<f64>>,
    /// Maximum plane distance for --pick
    #[arg(long)]
    max_distance: Option<f64>,
}

impl Cli {
    fn config(&self) -> anyhow::Result<SkyConfig> {
        let mut config = SkyConfig::default();
        if self.lon.is_some() || self.lat.is_some() {
            config.observer = GeographicCoordinates::of_deg(
                self.lon.unwrap_or(config.observer.lon_deg()),
                self.lat.unwrap_or(config.observer.lat_deg()),
            )
            .context("invalid observer position")?;
        }
        if self.az.is_some() || self.alt.is_some() {
            config.view_center = HorizontalCoordinates::of_deg(
                self.az.unwrap_or(config.view_center.az_deg()),
                self.alt.unwrap_or(config.view_center.alt_deg()),
            )
            .context("invalid view center")?;
        }
        if let Some(stars) = &self.stars {
            config.star_catalogue = stars.clone();
        }
        if let Some(asterisms) = &self.asterisms {
            config.asterisms = asterisms.clone();
        }
        if let Some(max_distance) = self.max_distance {
            config.max_pick_distance = max_distance;
        }
        Ok(config)
    }

    fn when(&self) -> anyhow::Result<DateTime<FixedOffset>> {
        match &self.time {
            Some(text) => DateTime::parse_from_rfc3339(text)
                .with_context(|| format!("invalid RFC 3339 instant '{text}'")),
            None => Ok(Utc::now().fixed_offset()),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.config()?;
    let when = cli.when()?;

    let catalogue = config.load_catalogue().with_context(|| {
        format!(
            "loading {} and {}",
            config.star_catalogue.display(),
            config.asterisms.display()
        )
    })?;
    let sky = config.observe(&when, &catalogue);
    let to_horizontal = EquatorialToHorizontalConversion::new(&when, &config.observer);

    println!("Observer:   {}", config.observer);
    println!("Instant:    {}", when.to_rfc3339());
    println!("Projection: {}", config.projection());
    println!();

    let print_body = |body: &dyn CelestialObject, xy: CartesianCoordinates| {
        let hor = to_horizontal.apply(&body.equatorial_pos());
        println!(
            "{:<14} {} az {:>7.2}° ({:<2}) alt {:>6.2}° mag {:>6.2} plane {}",
            body.info(),
            body.equatorial_pos(),
            hor.az_deg(),
            hor.az_octant_name("N", "E", "S", "W"),
            hor.alt_deg(),
            body.magnitude(),
            xy,
        );
    };
    print_body(sky.sun(), sky.sun_position());
    print_body(sky.moon(), sky.moon_position());
    for (planet, xy) in sky.planets().iter().zip(sky.planet_positions().chunks_exact(2)) {
        print_body(planet, CartesianCoordinates::of(xy[0], xy[1]));
    }
    println!();
    println!(
        "{} stars, {} asterisms",
        sky.stars().len(),
        sky.asterisms().len()
    );

    if let Some(pick) = &cli.pick {
        let point = CartesianCoordinates::of(pick[0], pick[1]);
        match sky.object_closest_to(&point, config.max_pick_distance) {
            Some(object) => println!("Closest to {point}: {object}"),
            None => println!(
                "Nothing within {} of {point}",
                config.max_pick_distance
            ),
        }
    }
    Ok(())
}
