//! Angle helpers. Radians are the canonical unit throughout the crate;
//! these functions convert from and to the other units astronomers use.

use crate::error::{invalid_argument, Result};
use crate::math::interval::{Interval, RightOpenInterval};

pub const TAU: f64 = std::f64::consts::TAU;

const HR_PER_RAD: f64 = 24.0 / TAU;
const RAD_PER_HR: f64 = TAU / 24.0;
const RAD_PER_ARCSEC: f64 = TAU / (360.0 * 3600.0);

const FULL_TURN: RightOpenInterval = RightOpenInterval::from_bounds(0.0, TAU);
const SEXAGESIMAL: RightOpenInterval = RightOpenInterval::from_bounds(0.0, 60.0);

/// Reduce any angle into `[0, 2π)`.
#[inline]
pub fn normalize_positive(rad: f64) -> f64 {
    FULL_TURN.reduce(rad)
}

#[inline]
pub fn of_arcsec(sec: f64) -> f64 {
    sec * RAD_PER_ARCSEC
}

/// Angle from degrees, minutes and seconds of arc.
///
/// Minutes and seconds must lie in `[0, 60)` and degrees must be
/// non-negative.
pub fn of_dms(deg: i32, min: i32, sec: f64) -> Result<f64> {
    if deg < 0 {
        return invalid_argument(format!("negative degree count {deg}"));
    }
    if !SEXAGESIMAL.contains(min as f64) {
        return invalid_argument(format!("minutes {min} outside [0, 60)"));
    }
    if !SEXAGESIMAL.contains(sec) {
        return invalid_argument(format!("seconds {sec} outside [0, 60)"));
    }
    Ok(of_deg(deg as f64 + (min as f64 + sec / 60.0) / 60.0))
}

#[inline]
pub fn of_deg(deg: f64) -> f64 {
    deg.to_radians()
}

#[inline]
pub fn to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

#[inline]
pub fn of_hr(hr: f64) -> f64 {
    hr * RAD_PER_HR
}

#[inline]
pub fn to_hr(rad: f64) -> f64 {
    rad * HR_PER_RAD
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_positive() {
        assert!((normalize_positive(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-12);
        assert!((normalize_positive(5.0 * PI) - PI).abs() < 1e-12);
        assert_eq!(normalize_positive(1.25), 1.25);
        assert_eq!(normalize_positive(TAU), 0.0);
    }

    #[test]
    fn test_unit_conversions() {
        assert!((of_deg(180.0) - PI).abs() < 1e-15);
        assert!((to_deg(PI / 4.0) - 45.0).abs() < 1e-12);
        assert!((of_hr(6.0) - PI / 2.0).abs() < 1e-15);
        assert!((to_hr(PI) - 12.0).abs() < 1e-12);
        assert!((of_arcsec(3600.0) - of_deg(1.0)).abs() < 1e-15);
        for deg in [-720.5, -1.0, 0.0, 33.3, 359.999] {
            assert!((to_deg(of_deg(deg)) - deg).abs() < 1e-9);
        }
        for hr in [0.0, 1.5, 23.99] {
            assert!((to_hr(of_hr(hr)) - hr).abs() < 1e-12);
        }
    }

    #[test]
    fn test_of_dms() {
        let angle = of_dms(23, 26, 21.45).unwrap();
        assert!((to_deg(angle) - 23.439291666666666).abs() < 1e-12);
        assert!((of_dms(0, 30, 0.0).unwrap() - of_deg(0.5)).abs() < 1e-15);
        assert!(of_dms(10, 60, 0.0).is_err());
        assert!(of_dms(10, -1, 0.0).is_err());
        assert!(of_dms(10, 0, 60.0).is_err());
        assert!(of_dms(-1, 0, 0.0).is_err());
    }
}
