#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod utils;

// Loads inputs, runs pipelines, renders reports
pub mod engine;

// Re-export commonly used types
pub use config::{ANALYSIS, AnalysisConfig, DATA_DIR};
pub use data::{DataSources, Table};
pub use domain::{Reading, Unavailable, VitalSign};
pub use engine::{ReportEnvelope, SeriesSink, SparklineSink, VitalReport, VitalsEngine};

// CLI argument parsing
use anyhow::{Result, ensure};
use clap::Parser;
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Planetary vital signs from open datasets", long_about = None)]
pub struct Cli {
    /// Directory holding the input CSV files
    #[arg(long, default_value = DATA_DIR)]
    pub data_dir: PathBuf,

    /// Only compute these vital signs (default: all of them)
    #[arg(long, value_enum, num_args = 1..)]
    pub only: Vec<VitalSign>,

    /// Percentile (0-100) above which a day counts as an ignition event
    #[arg(long)]
    pub gwi_percentile: Option<f64>,

    /// Logistic steepness applied to the normalised SMF gap
    #[arg(long)]
    pub smf_steepness: Option<f64>,

    /// Print all reports as pretty JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Skip the OI sparkline
    #[arg(long, default_value_t = false)]
    pub no_plot: bool,
}

impl Cli {
    /// Built-in analysis settings with any command-line overrides applied.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = ANALYSIS;

        if let Some(p) = self.gwi_percentile {
            ensure!(
                (0.0..=100.0).contains(&p),
                "--gwi-percentile must be within 0..=100, got {}",
                p
            );
            config.gwi.ignition_percentile = p;
        }
        if let Some(k) = self.smf_steepness {
            ensure!(
                k.is_finite() && k > 0.0,
                "--smf-steepness must be a positive number, got {}",
                k
            );
            config.smf.steepness = k;
        }

        Ok(config)
    }

    /// Requested signs in reporting order, without repeats.
    pub fn selected_signs(&self) -> Vec<VitalSign> {
        VitalSign::iter()
            .filter(|sign| self.only.is_empty() || self.only.contains(sign))
            .collect()
    }

    pub fn engine(&self) -> Result<VitalsEngine> {
        Ok(VitalsEngine::new(DataSources::new(&self.data_dir)).with_config(self.analysis_config()?))
    }
}
