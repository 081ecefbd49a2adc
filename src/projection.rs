//! Stereographic projection of the celestial sphere onto a plane.
//!
//! The projection is centred on an arbitrary horizontal direction, which
//! maps to the origin of the plane. Its single singularity is the point
//! diametrically opposite the centre.

use std::fmt;

use crate::coordinates::{CartesianCoordinates, CoordinateTransform, HorizontalCoordinates};
use crate::math::angle;
use crate::math::ClosedInterval;

const SINE: ClosedInterval = ClosedInterval::from_bounds(-1.0, 1.0);

#[derive(Debug, Clone, Copy)]
pub struct StereographicProjection {
    center: HorizontalCoordinates,
    sin_center_alt: f64,
    cos_center_alt: f64,
}

impl StereographicProjection {
    pub fn new(center: HorizontalCoordinates) -> Self {
        let (sin_center_alt, cos_center_alt) = center.alt().sin_cos();
        Self {
            center,
            sin_center_alt,
            cos_center_alt,
        }
    }

    pub fn center(&self) -> HorizontalCoordinates {
        self.center
    }

    /// Centre of the circle onto which the parallel through `hor` projects.
    ///
    /// The ordinate is infinite when the parallel passes through the
    /// antipode of the centre: its image is then a straight line.
    pub fn circle_center_for_parallel(&self, hor: &HorizontalCoordinates) -> CartesianCoordinates {
        CartesianCoordinates::of(
            0.0,
            self.cos_center_alt / (hor.alt().sin() + self.sin_center_alt),
        )
    }

    /// Radius of the circle onto which the parallel through `parallel`
    /// projects; infinite in the same case as
    /// [`circle_center_for_parallel`](Self::circle_center_for_parallel).
    pub fn circle_radius_for_parallel(&self, parallel: &HorizontalCoordinates) -> f64 {
        parallel.alt().cos() / (parallel.alt().sin() + self.sin_center_alt)
    }

    /// Projected diameter of a small disk of angular size `rad` centred on
    /// the projection centre.
    pub fn apply_to_angle(&self, rad: f64) -> f64 {
        2.0 * (rad / 4.0).tan()
    }

    /// Point of the sphere whose image is `xy`.
    pub fn inverse_apply(&self, xy: &CartesianCoordinates) -> HorizontalCoordinates {
        let (x, y) = (xy.x(), xy.y());
        let rho_sq = x * x + y * y;
        if rho_sq == 0.0 {
            return self.center;
        }
        let rho = rho_sq.sqrt();
        let sin_c = 2.0 * rho / (rho_sq + 1.0);
        let cos_c = (1.0 - rho_sq) / (rho_sq + 1.0);

        let az = (x * sin_c).atan2(
            rho * self.cos_center_alt * cos_c - y * self.sin_center_alt * sin_c,
        ) + self.center.az();
        let alt = SINE
            .clip(cos_c * self.sin_center_alt + y * sin_c * self.cos_center_alt / rho)
            .asin();

        HorizontalCoordinates::from_valid(angle::normalize_positive(az), alt)
    }
}

impl CoordinateTransform<HorizontalCoordinates, CartesianCoordinates> for StereographicProjection {
    fn apply(&self, hor: &HorizontalCoordinates) -> CartesianCoordinates {
        let delta_az = hor.az() - self.center.az();
        let (sin_delta, cos_delta) = delta_az.sin_cos();
        let (sin_alt, cos_alt) = hor.alt().sin_cos();

        let d = 1.0
            / (1.0 + sin_alt * self.sin_center_alt + cos_alt * self.cos_center_alt * cos_delta);
        CartesianCoordinates::of(
            d * cos_alt * sin_delta,
            d * (sin_alt * self.cos_center_alt - cos_alt * self.sin_center_alt * cos_delta),
        )
    }
}

impl fmt::Display for StereographicProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StereographicProjection(center={})", self.center)
    }
}
