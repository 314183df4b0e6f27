// Data loading: CSV files into named-column tables
pub mod csv_source;
pub mod sources;
pub mod table;

// Re-export commonly used types
pub use csv_source::{load_table, save_table};
pub use sources::DataSources;
pub use table::Table;
