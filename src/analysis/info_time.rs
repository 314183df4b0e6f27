//! Information-time (τ_I).
//!
//! Reparametrises calendar time by cumulative skill gains:
//!
//! - `Δskill(t) = skill(t) - skill(t-1)` (undefined for the first year)
//! - `τ_I(t) = Σ_{s≤t} max(Δskill(s), 0)`, regressions are not penalised
//! - acceleration ratio = τ_I span / calendar span

use anyhow::Result;
use serde::Serialize;

use crate::config::{InfoTimeSettings, YEAR_COLUMN};
use crate::data::Table;
use crate::domain::{Degeneracy, Reading, YearSeries};

#[derive(Debug, Clone)]
pub struct InfoTimeColumns {
    pub year: String,
    pub skill: String,
}

impl Default for InfoTimeColumns {
    fn default() -> Self {
        Self {
            year: YEAR_COLUMN.to_string(),
            skill: "skill".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoTimeRow {
    pub year: i32,
    pub skill: f64,
    /// `None` for the first year.
    pub skill_diff: Option<f64>,
    pub skill_gain_pos: f64,
    pub tau_i: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoTimeResult {
    /// Ascending by year; empty when there were fewer than the minimum rows.
    pub series: Vec<InfoTimeRow>,
    pub tau_span: Reading<f64>,
    pub calendar_span: Reading<f64>,
    pub accel_ratio: Reading<f64>,
}

pub fn compute_info_time(
    skill: &Table,
    columns: &InfoTimeColumns,
    settings: &InfoTimeSettings,
) -> Result<InfoTimeResult> {
    let series = skill.yearly_series(&columns.year, &columns.skill)?;
    Ok(info_time_from_series(&series, settings))
}

pub fn info_time_from_series(skill: &YearSeries, settings: &InfoTimeSettings) -> InfoTimeResult {
    let points = skill.complete();

    // A span needs two endpoints whatever the configured minimum.
    let needed = settings.min_rows.max(2);
    if points.len() < needed {
        let unavailable = || Reading::insufficient(needed, points.len());
        return InfoTimeResult {
            series: Vec::new(),
            tau_span: unavailable(),
            calendar_span: unavailable(),
            accel_ratio: unavailable(),
        };
    }

    let mut series = Vec::with_capacity(points.len());
    let mut tau = 0.0;
    let mut previous: Option<f64> = None;

    for &(year, value) in &points {
        let skill_diff = previous.map(|p| value - p);
        let skill_gain_pos = skill_diff.map(|d| d.max(0.0)).unwrap_or(0.0);
        tau += skill_gain_pos;
        series.push(InfoTimeRow {
            year,
            skill: value,
            skill_diff,
            skill_gain_pos,
            tau_i: tau,
        });
        previous = Some(value);
    }

    let first = &series[0];
    let last = &series[series.len() - 1];
    let tau_span = last.tau_i - first.tau_i;
    let span = f64::from(last.year - first.year);

    let (calendar_span, accel_ratio) = if span > 0.0 {
        (Reading::Computed(span), Reading::Computed(tau_span / span))
    } else {
        (
            Reading::degenerate(Degeneracy::NonPositiveSpan),
            Reading::degenerate(Degeneracy::NonPositiveSpan),
        )
    };

    InfoTimeResult {
        tau_span: Reading::Computed(tau_span),
        calendar_span,
        accel_ratio,
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ANALYSIS;
    use approx::assert_abs_diff_eq;

    #[test]
    fn flat_skill_has_no_information_time() {
        let result = info_time_from_series(
            &YearSeries::from_values("skill", &[2000, 2001, 2002], &[1.0, 1.0, 1.0]),
            &ANALYSIS.info_time,
        );
        assert_eq!(result.tau_span, Reading::Computed(0.0));
        assert_eq!(result.calendar_span, Reading::Computed(2.0));
        assert_eq!(result.accel_ratio, Reading::Computed(0.0));
    }

    #[test]
    fn only_gains_accumulate() {
        let result = info_time_from_series(
            &YearSeries::from_values("skill", &[2000, 2001, 2002, 2003], &[0.5, 0.8, 0.6, 1.0]),
            &ANALYSIS.info_time,
        );

        let gains: Vec<f64> = result.series.iter().map(|r| r.skill_gain_pos).collect();
        let tau: Vec<f64> = result.series.iter().map(|r| r.tau_i).collect();
        for (got, want) in gains.iter().zip([0.0, 0.3, 0.0, 0.4]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        for (got, want) in tau.iter().zip([0.0, 0.3, 0.3, 0.7]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert_eq!(result.series[0].skill_diff, None);
        assert_abs_diff_eq!(result.series[2].skill_diff.unwrap(), -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(result.tau_span.value().unwrap(), 0.7, epsilon = 1e-12);
        assert_eq!(result.calendar_span, Reading::Computed(3.0));
        assert_abs_diff_eq!(result.accel_ratio.value().unwrap(), 0.7 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn unsorted_input_with_gaps_is_sorted_first() {
        let result = info_time_from_series(
            &YearSeries::new(
                "skill",
                vec![(2010, Some(2.0)), (2000, Some(1.0)), (2005, None), (2004, Some(1.5))],
            ),
            &ANALYSIS.info_time,
        );
        let years: Vec<i32> = result.series.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2004, 2010]);
        assert_eq!(result.calendar_span, Reading::Computed(10.0));
        assert_abs_diff_eq!(result.accel_ratio.value().unwrap(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn zero_minimum_still_needs_two_rows() {
        let settings = InfoTimeSettings { min_rows: 0 };
        let empty = info_time_from_series(&YearSeries::new("skill", Vec::new()), &settings);
        assert!(empty.series.is_empty());
        assert_eq!(empty.accel_ratio, Reading::insufficient(2, 0));

        let one = info_time_from_series(&YearSeries::from_values("skill", &[2000], &[1.0]), &settings);
        assert_eq!(one.tau_span, Reading::insufficient(2, 1));
    }

    #[test]
    fn single_row_is_insufficient() {
        let result = info_time_from_series(
            &YearSeries::new("skill", vec![(2000, Some(1.0)), (2001, None)]),
            &ANALYSIS.info_time,
        );
        assert!(result.series.is_empty());
        assert_eq!(result.tau_span, Reading::insufficient(2, 1));
        assert_eq!(result.calendar_span, Reading::insufficient(2, 1));
        assert_eq!(result.accel_ratio, Reading::insufficient(2, 1));
    }
}
