pub mod core;
pub mod messages;
pub mod report;

// Re-export key components
pub use core::{PipelineColumns, VitalsEngine};
pub use messages::{ReportEnvelope, VitalReport};
pub use report::{SeriesSink, SparklineSink, render_envelope};
