//! Bounded ranges of reals.
//!
//! Two flavours exist: [`ClosedInterval`] (`[low, high]`), which can clip a
//! value to its bounds, and [`RightOpenInterval`] (`[low, high)`), which can
//! wrap any finite value back into the range. Coordinate constructors use
//! them to validate their components.

use std::fmt;

use crate::error::{invalid_argument, Result};

/// Behaviour common to both interval flavours.
pub trait Interval {
    fn low(&self) -> f64;

    fn high(&self) -> f64;

    fn size(&self) -> f64 {
        self.high() - self.low()
    }

    fn contains(&self, v: f64) -> bool;
}

fn check_bounds(low: f64, high: f64) -> Result<()> {
    // Written as a negation so NaN bounds are rejected too.
    if !(low < high) {
        return invalid_argument(format!(
            "interval lower bound {low} must be strictly below upper bound {high}"
        ));
    }
    Ok(())
}

fn check_size(size: f64) -> Result<()> {
    if !(size > 0.0) {
        return invalid_argument(format!("interval size must be positive, got {size}"));
    }
    Ok(())
}

/// Closed interval `[low, high]`.
#[derive(Debug, Clone, Copy)]
pub struct ClosedInterval {
    low: f64,
    high: f64,
}

impl ClosedInterval {
    /// Interval `[low, high]`; fails unless `low < high`.
    pub fn of(low: f64, high: f64) -> Result<Self> {
        check_bounds(low, high)?;
        Ok(Self { low, high })
    }

    /// Interval of the given size centered on zero.
    pub fn symmetric(size: f64) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            low: -size / 2.0,
            high: size / 2.0,
        })
    }

    /// Compile-time constructor for bounds known to be ordered.
    pub(crate) const fn from_bounds(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Saturate `v` to the nearer bound when it lies outside the interval.
    pub fn clip(&self, v: f64) -> f64 {
        if v < self.low {
            self.low
        } else if v > self.high {
            self.high
        } else {
            v
        }
    }
}

impl Interval for ClosedInterval {
    fn low(&self) -> f64 {
        self.low
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn contains(&self, v: f64) -> bool {
        self.low <= v && v <= self.high
    }
}

impl fmt::Display for ClosedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.low, self.high)
    }
}

/// Right-open interval `[low, high)`.
#[derive(Debug, Clone, Copy)]
pub struct RightOpenInterval {
    low: f64,
    high: f64,
}

impl RightOpenInterval {
    /// Interval `[low, high)`; fails unless `low < high`.
    pub fn of(low: f64, high: f64) -> Result<Self> {
        check_bounds(low, high)?;
        Ok(Self { low, high })
    }

    /// Interval `[-size/2, size/2)`.
    pub fn symmetric(size: f64) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            low: -size / 2.0,
            high: size / 2.0,
        })
    }

    pub(crate) const fn from_bounds(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Wrap `v` into `[low, high)` modulo the interval size.
    ///
    /// Values already inside the interval are returned untouched, so
    /// `reduce(reduce(v)) == reduce(v)` holds bit for bit. Non-finite input
    /// yields NaN.
    pub fn reduce(&self, v: f64) -> f64 {
        if self.contains(v) {
            return v;
        }
        let reduced = self.low + (v - self.low).rem_euclid(self.size());
        // A tiny negative offset can round up to exactly `size`.
        if reduced >= self.high {
            self.low
        } else {
            reduced
        }
    }
}

impl Interval for RightOpenInterval {
    fn low(&self) -> f64 {
        self.low
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn contains(&self, v: f64) -> bool {
        self.low <= v && v < self.high
    }
}

impl fmt::Display for RightOpenInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}[", self.low, self.high)
    }
}
