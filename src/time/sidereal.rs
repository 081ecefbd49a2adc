//! Greenwich and local sidereal time.
//!
//! Both functions return radians in `[0, 2π)`.

use chrono::{DateTime, TimeZone};
use once_cell::sync::Lazy;

use super::{Epoch, MILLIS_PER_DAY, MILLIS_PER_HOUR};
use crate::coordinates::{GeographicCoordinates, SphericalCoordinates};
use crate::math::angle;
use crate::math::Polynomial;

/// Sidereal hours at 0h UT as a function of Julian centuries since J2000.
static S0_HOURS: Lazy<Polynomial<f64>> =
    Lazy::new(|| Polynomial::from_coefficients(vec![0.000025862, 2400.051336, 6.697374558]));

/// Ratio of sidereal to solar time.
const SIDEREAL_RATE: f64 = 1.002737909;

/// Greenwich sidereal time at `when`.
pub fn greenwich<Tz: TimeZone>(when: &DateTime<Tz>) -> f64 {
    let millis = when.timestamp_millis();
    // Unix time has no leap seconds, so day boundaries fall on multiples
    // of a day.
    let day_start = millis.div_euclid(MILLIS_PER_DAY) * MILLIS_PER_DAY;

    let centuries = Epoch::J2000.julian_centuries_until_unix(day_start);
    let hours_into_day = (millis - day_start) as f64 / MILLIS_PER_HOUR as f64;

    let s0 = S0_HOURS.at(centuries);
    let s1 = SIDEREAL_RATE * hours_into_day;
    angle::normalize_positive(angle::of_hr(s0 + s1))
}

/// Local sidereal time at `when` for an observer at `place`.
pub fn local<Tz: TimeZone>(when: &DateTime<Tz>, place: &GeographicCoordinates) -> f64 {
    angle::normalize_positive(greenwich(when) + place.lon())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::f64::consts::TAU;

    #[test]
    fn test_greenwich_reference() {
        let when = DateTime::parse_from_rfc3339("1980-04-22T14:36:51.670-04:00").unwrap();
        let gst_hr = angle::to_hr(greenwich(&when));
        assert!((gst_hr - 8.679071).abs() < 1e-6, "GST = {gst_hr}h");
    }

    #[test]
    fn test_greenwich_same_instant_any_zone() {
        let zoned = DateTime::parse_from_rfc3339("2004-09-23T03:00:00+09:00").unwrap();
        let utc = zoned.with_timezone(&Utc);
        assert_eq!(greenwich(&zoned), greenwich(&utc));
    }

    #[test]
    fn test_local_adds_longitude() {
        let when = DateTime::parse_from_rfc3339("2020-02-28T21:15:00Z").unwrap();
        let place = GeographicCoordinates::of_deg(30.0, 45.0).unwrap();
        let expected = (greenwich(&when) + 30.0_f64.to_radians()).rem_euclid(TAU);
        assert!((local(&when, &place) - expected).abs() < 1e-12);

        let west = GeographicCoordinates::of_deg(-179.0, 0.0).unwrap();
        let lst = local(&when, &west);
        assert!((0.0..TAU).contains(&lst));
    }

    #[test]
    fn test_range_before_j2000() {
        for text in ["1901-06-30T23:59:59Z", "1969-07-20T20:17:40Z", "2099-12-31T00:00:00Z"] {
            let when = DateTime::parse_from_rfc3339(text).unwrap();
            let g = greenwich(&when);
            assert!((0.0..TAU).contains(&g), "{text}: {g}");
        }
    }
}
