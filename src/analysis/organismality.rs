//! Organismality Index (OI): cooperation vs. conflict.
//!
//! Both yearly series are log1p-compressed and z-scored over the aligned years,
//! then `oi = logistic(coop_z - violence_z)`. Values above 0.5 mean cooperation
//! is running ahead of conflict relative to the sample's own history.

use anyhow::Result;
use serde::Serialize;

use crate::analysis::align::inner_join;
use crate::config::{OrganismalitySettings, YEAR_COLUMN};
use crate::data::Table;
use crate::domain::{Reading, YearSeries};
use crate::utils::maths_utils::{linear_trend, log1p_zscore, logistic};

/// Column names read from the treaty and conflict tables.
#[derive(Debug, Clone)]
pub struct OrganismalityColumns {
    pub year: String,
    pub treaties: String,
    pub conflict: String,
}

impl Default for OrganismalityColumns {
    fn default() -> Self {
        Self {
            year: YEAR_COLUMN.to_string(),
            treaties: "treaty_parties".to_string(),
            conflict: "conflict_deaths".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganismalityRow {
    pub year: i32,
    pub treaty_parties: f64,
    pub conflict_deaths: f64,
    pub coop_log: f64,
    pub violence_log: f64,
    pub coop_z: f64,
    pub violence_z: f64,
    pub oi_raw: f64,
    pub oi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganismalityResult {
    /// Ascending by year.
    pub series: Vec<OrganismalityRow>,
    pub latest_value: Reading<f64>,
    /// Slope of `oi` per year over the trailing trend window.
    pub trend_20y_slope: Reading<f64>,
}

impl OrganismalityResult {
    pub fn years(&self) -> Vec<f64> {
        self.series.iter().map(|r| r.year as f64).collect()
    }

    pub fn oi_values(&self) -> Vec<f64> {
        self.series.iter().map(|r| r.oi).collect()
    }
}

/// Compute OI from the treaty and conflict tables.
pub fn compute_organismality(
    treaties: &Table,
    conflict: &Table,
    columns: &OrganismalityColumns,
    settings: &OrganismalitySettings,
) -> Result<OrganismalityResult> {
    let coop = treaties.yearly_series(&columns.year, &columns.treaties)?;
    let violence = conflict.yearly_series(&columns.year, &columns.conflict)?;
    Ok(organismality_from_series(&coop, &violence, settings))
}

/// Compute OI from already-extracted yearly series.
pub fn organismality_from_series(
    coop: &YearSeries,
    violence: &YearSeries,
    settings: &OrganismalitySettings,
) -> OrganismalityResult {
    let frame = inner_join(&[coop, violence]);

    let (coop_log, coop_z) = log1p_zscore(frame.column(0));
    let (violence_log, violence_z) = log1p_zscore(frame.column(1));

    let oi_raw: Vec<f64> = coop_z
        .iter()
        .zip(violence_z.iter())
        .map(|(c, v)| c - v)
        .collect();
    let oi = logistic(&oi_raw, settings.logistic_k);

    let series: Vec<OrganismalityRow> = (0..frame.len())
        .map(|i| OrganismalityRow {
            year: frame.keys[i],
            treaty_parties: frame.columns[0][i],
            conflict_deaths: frame.columns[1][i],
            coop_log: coop_log[i],
            violence_log: violence_log[i],
            coop_z: coop_z[i],
            violence_z: violence_z[i],
            oi_raw: oi_raw[i],
            oi: oi[i],
        })
        .collect();

    let needed = settings.min_rows.max(1);
    if series.len() < needed {
        return OrganismalityResult {
            series,
            latest_value: Reading::insufficient(needed, frame.len()),
            trend_20y_slope: Reading::insufficient(needed, frame.len()),
        };
    }

    // Keys are ascending, so the last row is the latest year.
    let latest = series[series.len() - 1].clone();
    let window_start = latest.year - (settings.trend_window_years - 1);
    let (xs, ys): (Vec<f64>, Vec<f64>) = series
        .iter()
        .filter(|r| r.year >= window_start)
        .map(|r| (r.year as f64, r.oi))
        .unzip();
    let (slope, _) = linear_trend(&xs, &ys);

    OrganismalityResult {
        latest_value: Reading::Computed(latest.oi),
        trend_20y_slope: Reading::Computed(slope),
        series,
    }
}
