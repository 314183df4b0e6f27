//! Synergy / O-information-like indicator.
//!
//! Gaussian proxy for multivariate dependence among 2-3 yearly streams:
//!
//! ```text
//! synergy_index = ln( det(Σ) / Π diag(Σ) )
//! ```
//!
//! where Σ is the sample covariance of the log1p + z-scored columns. Independent
//! streams give a ratio near 1 (index near 0), redundancy pushes it negative and
//! higher-order interaction positive. Purely descriptive, no test is performed.

use anyhow::{Result, bail};
use nalgebra::DMatrix;
use serde::Serialize;

use crate::analysis::align::inner_join;
use crate::config::{DEBUG_FLAGS, SynergySettings, YEAR_COLUMN};
use crate::data::Table;
use crate::domain::{Degeneracy, Reading, YearSeries};
use crate::utils::maths_utils::log1p_zscore;

#[derive(Debug, Clone)]
pub struct SynergyColumns {
    pub year: String,
    pub news: String,
    pub papers: String,
    pub conflict: String,
}

impl Default for SynergyColumns {
    fn default() -> Self {
        Self {
            year: YEAR_COLUMN.to_string(),
            news: "news_count".to_string(),
            papers: "papers_count".to_string(),
            conflict: "conflict_deaths".to_string(),
        }
    }
}

/// One stream after alignment: raw values, log1p and z-score, row-aligned with `years`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynergyStream {
    pub name: String,
    pub raw: Vec<f64>,
    pub log: Vec<f64>,
    pub z: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynergyFrame {
    pub years: Vec<i32>,
    pub streams: Vec<SynergyStream>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynergyResult {
    pub synergy_index: Reading<f64>,
    /// Columns that actually made it into the join.
    pub used_columns: Vec<String>,
    pub combined: SynergyFrame,
    /// Sample covariance of the z-scored streams, row-major, when it could be formed.
    pub covariance: Option<Vec<Vec<f64>>>,
}

/// Compute the synergy index from the news, publications and (optional) conflict tables.
///
/// The conflict stream is optional: it is skipped, with a warning, when its table is
/// absent, lacks the year or value column, or cannot be parsed. News and publication
/// errors still propagate.
pub fn compute_synergy(
    news: &Table,
    pubs: &Table,
    conflict: Option<&Table>,
    columns: &SynergyColumns,
    settings: &SynergySettings,
) -> Result<SynergyResult> {
    let mut streams = vec![
        news.yearly_series(&columns.year, &columns.news)?,
        pubs.yearly_series(&columns.year, &columns.papers)?,
    ];

    if let Some(table) = conflict {
        match optional_stream(table, &columns.year, &columns.conflict) {
            Ok(series) => streams.push(series),
            Err(e) => log::warn!("Synergy: skipping conflict stream ({:#}), using 2 streams", e),
        }
    }

    Ok(synergy_from_series(&streams, settings))
}

fn optional_stream(table: &Table, year: &str, value: &str) -> Result<YearSeries> {
    for column in [year, value] {
        if !table.has_column(column) {
            bail!("no '{}' column", column);
        }
    }
    table.yearly_series(year, value)
}

/// Compute the synergy index from 2 or 3 yearly series.
pub fn synergy_from_series(series: &[YearSeries], settings: &SynergySettings) -> SynergyResult {
    let refs: Vec<&YearSeries> = series.iter().collect();
    let frame = inner_join(&refs);
    let used_columns = frame.names.clone();

    let mut combined = SynergyFrame {
        years: frame.keys.clone(),
        streams: frame
            .names
            .iter()
            .zip(frame.columns.iter())
            .map(|(name, raw)| SynergyStream {
                name: name.clone(),
                raw: raw.clone(),
                log: Vec::new(),
                z: Vec::new(),
            })
            .collect(),
    };

    if frame.len() < settings.min_rows {
        return SynergyResult {
            synergy_index: Reading::insufficient(settings.min_rows, frame.len()),
            used_columns,
            combined,
            covariance: None,
        };
    }

    for stream in combined.streams.iter_mut() {
        let (log, z) = log1p_zscore(&stream.raw);
        stream.log = log;
        stream.z = z;
    }

    let z_columns: Vec<&[f64]> = combined.streams.iter().map(|s| s.z.as_slice()).collect();
    let cov = sample_covariance(&z_columns);
    let synergy_index = gaussian_synergy(&cov, settings);

    SynergyResult {
        synergy_index,
        used_columns,
        combined,
        covariance: Some(
            cov.row_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
        ),
    }
}

/// Sample covariance (n - 1) of equally long columns.
fn sample_covariance(columns: &[&[f64]]) -> DMatrix<f64> {
    let m = columns.len();
    let n = columns.first().map(|c| c.len()).unwrap_or(0);
    let means: Vec<f64> = columns
        .iter()
        .map(|c| c.iter().sum::<f64>() / n as f64)
        .collect();

    DMatrix::from_fn(m, m, |i, j| {
        let acc: f64 = columns[i]
            .iter()
            .zip(columns[j].iter())
            .map(|(a, b)| (a - means[i]) * (b - means[j]))
            .sum();
        acc / (n as f64 - 1.0)
    })
}

fn gaussian_synergy(cov: &DMatrix<f64>, settings: &SynergySettings) -> Reading<f64> {
    let diag = cov.diagonal();
    if diag.iter().any(|d| !(*d > 0.0) || !d.is_finite()) {
        return Reading::degenerate(Degeneracy::NonPositiveDiagonal);
    }

    let det = cov.determinant();
    let diag_product: f64 = diag.iter().product();
    let ratio = det / diag_product;

    if cfg!(debug_assertions) && DEBUG_FLAGS.print_covariance {
        log::info!(
            "Synergy covariance {:?} det={:.6e} ratio={:.6e}",
            cov.as_slice(),
            det,
            ratio
        );
    }

    if !(det > 0.0) || !ratio.is_finite() || ratio <= settings.singular_ratio_floor {
        return Reading::degenerate(Degeneracy::SingularCovariance);
    }

    Reading::Computed(ratio.ln())
}
