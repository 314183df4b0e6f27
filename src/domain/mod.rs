// Domain types and value objects
pub mod reading;
pub mod series;
pub mod vital_sign;

// Re-export commonly used types
pub use reading::{Degeneracy, Reading, Unavailable};
pub use series::{DailySeries, TimeSeries, YearSeries};
pub use vital_sign::VitalSign;
