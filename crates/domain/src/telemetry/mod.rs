//! Time-series readings and the contract for collecting them.

mod readings;
mod source;
mod time_range;

pub use readings::{EnergyReading, EnvironmentalReading, OperationalReading};
pub use source::{CollectionError, ReadingSource};
pub use time_range::TimeRange;
