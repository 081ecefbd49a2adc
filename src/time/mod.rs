mod epoch;
pub mod sidereal;

pub use epoch::Epoch;

pub(crate) const MILLIS_PER_HOUR: i64 = 1000 * 60 * 60;
pub(crate) const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
