//! Self-Model Fidelity (SMF).
//!
//! Compares a model/target trajectory M(t) with the realised trajectory A(t):
//!
//! - `gap_norm = (A - M) / max(|A|, |M|, ε)`
//! - `smf = logistic(-|gap_norm| * k)`, so small gaps score high
//! - global SMF is the mean of `smf` over the aligned years
//! - Pearson correlation between M and A when at least two years overlap

use anyhow::Result;
use serde::Serialize;

use crate::analysis::align::inner_join;
use crate::config::{SmfSettings, YEAR_COLUMN};
use crate::data::Table;
use crate::domain::{Degeneracy, Reading, YearSeries};
use crate::utils::maths_utils::{logistic_scalar, mean, pearson};

#[derive(Debug, Clone)]
pub struct SmfColumns {
    pub year: String,
    pub target: String,
    pub actual: String,
}

impl Default for SmfColumns {
    fn default() -> Self {
        Self {
            year: YEAR_COLUMN.to_string(),
            target: "co2_target".to_string(),
            actual: "co2_actual".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmfRow {
    pub year: i32,
    pub target: f64,
    pub actual: f64,
    pub gap_norm: f64,
    pub smf: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmfResult {
    /// Ascending by year.
    pub series: Vec<SmfRow>,
    pub global_smf: Reading<f64>,
    pub correlation: Reading<f64>,
}

pub fn compute_smf(
    target: &Table,
    actual: &Table,
    columns: &SmfColumns,
    settings: &SmfSettings,
) -> Result<SmfResult> {
    let target_series = target.yearly_series(&columns.year, &columns.target)?;
    let actual_series = actual.yearly_series(&columns.year, &columns.actual)?;
    Ok(smf_from_series(&target_series, &actual_series, settings))
}

pub fn smf_from_series(target: &YearSeries, actual: &YearSeries, settings: &SmfSettings) -> SmfResult {
    let frame = inner_join(&[target, actual]);
    let targets = frame.column(0);
    let actuals = frame.column(1);

    let series: Vec<SmfRow> = (0..frame.len())
        .map(|i| {
            let (m, a) = (targets[i], actuals[i]);
            let denom = a.abs().max(m.abs()).max(settings.epsilon);
            let gap_norm = (a - m) / denom;
            SmfRow {
                year: frame.keys[i],
                target: m,
                actual: a,
                gap_norm,
                smf: logistic_scalar(-gap_norm.abs() * settings.steepness, 1.0),
            }
        })
        .collect();

    let smf_values: Vec<f64> = series.iter().map(|r| r.smf).collect();
    let global_smf = match mean(&smf_values) {
        Some(value) => Reading::Computed(value),
        None => Reading::insufficient(1, 0),
    };

    let correlation = if frame.len() < 2 {
        Reading::insufficient(2, frame.len())
    } else {
        match pearson(targets, actuals) {
            Some(r) => Reading::Computed(r),
            None => Reading::degenerate(Degeneracy::ZeroVariance),
        }
    };

    SmfResult {
        series,
        global_smf,
        correlation,
    }
}
