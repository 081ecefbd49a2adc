use std::fmt;

use num_traits::Float;

use crate::error::{invalid_argument, Result};

/// Polynomial with real coefficients, evaluated with Horner's rule.
///
/// Coefficients are stored from the highest degree down to the constant
/// term.
#[derive(Debug, Clone)]
pub struct Polynomial<T> {
    coefficients: Vec<T>,
}

impl<T: Float> Polynomial<T> {
    /// Build `cₙxⁿ + … + c₁x + c₀` from `cₙ` and the lower coefficients
    /// `[cₙ₋₁, …, c₀]`. The leading coefficient must be non-zero.
    pub fn of(leading: T, lower: &[T]) -> Result<Self> {
        if leading == T::zero() {
            return invalid_argument("leading polynomial coefficient must be non-zero");
        }
        let mut coefficients = Vec::with_capacity(lower.len() + 1);
        coefficients.push(leading);
        coefficients.extend_from_slice(lower);
        Ok(Self { coefficients })
    }

    /// Highest degree first; the caller guarantees a non-zero leading term.
    pub(crate) fn from_coefficients(coefficients: Vec<T>) -> Self {
        debug_assert!(coefficients.first().is_some_and(|c| *c != T::zero()));
        Self { coefficients }
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    #[inline]
    pub fn at(&self, x: T) -> T {
        self.coefficients[1..]
            .iter()
            .fold(self.coefficients[0], |acc, &c| acc * x + c)
    }
}

impl<T: Float + fmt::Display> fmt::Display for Polynomial<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let degree = self.degree();
        let mut first = true;
        for (i, &c) in self.coefficients.iter().enumerate() {
            let power = degree - i;
            if c == T::zero() {
                continue;
            }
            let magnitude = c.abs();
            if first {
                if c < T::zero() {
                    write!(f, "-")?;
                }
            } else if c < T::zero() {
                write!(f, "-")?;
            } else {
                write!(f, "+")?;
            }
            first = false;

            if magnitude != T::one() || power == 0 {
                write!(f, "{magnitude}")?;
            }
            match power {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{power}")?,
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
