pub mod angle;
pub mod interval;
pub mod polynomial;

pub use interval::{ClosedInterval, Interval, RightOpenInterval};
pub use polynomial::Polynomial;
