//! Configuration module for the vital-signs pipelines.

pub mod analysis;
pub mod data_files;

mod debug; // Private: use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use analysis::{
    ANALYSIS, AnalysisConfig, GwiSettings, InfoTimeSettings, OrganismalitySettings, SmfSettings,
    SynergySettings,
};
pub use data_files::{DATA_DIR, DATA_FILES, DATE_COLUMN, DataFiles, GWI_TOPIC_NAME, YEAR_COLUMN};
