use std::fmt;

use crate::Point2;

/// Point of the projection plane. Unbounded.
#[derive(Debug, Clone, Copy)]
pub struct CartesianCoordinates {
    x: f64,
    y: f64,
}

impl CartesianCoordinates {
    pub fn of(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn as_point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Euclidean distance in the plane.
    pub fn distance_to(&self, that: &CartesianCoordinates) -> f64 {
        nalgebra::distance(&self.as_point(), &that.as_point())
    }
}

impl From<Point2> for CartesianCoordinates {
    fn from(p: Point2) -> Self {
        Self::of(p.x, p.y)
    }
}

impl fmt::Display for CartesianCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={:.4}, y={:.4})", self.x, self.y)
    }
}
