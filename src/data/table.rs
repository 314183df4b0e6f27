use anyhow::{Context, Result, anyhow, bail};
use std::collections::HashSet;

use crate::domain::{DailySeries, YearSeries};
use crate::utils::TimeUtils;

/// Cell contents treated as missing values.
const MISSING_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "none", "#n/a", "-"];

/// A loaded dataset: named columns over positionally addressed rows of raw text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from string literals. Handy for fixtures and generated demo data.
    pub fn from_rows(headers: &[&str], rows: &[Vec<String>]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers.iter().position(|h| h == name).ok_or_else(|| {
            anyhow!(
                "Column '{}' not found (available: {})",
                name,
                self.headers.join(", ")
            )
        })
    }

    pub fn row(&self, idx: usize) -> Option<&[String]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    /// Raw cell, `None` when the row is short or the cell holds a missing token.
    fn cell(&self, row: usize, col: usize) -> Option<&str> {
        let text = self.rows.get(row)?.get(col)?.trim();
        if MISSING_TOKENS.contains(&text.to_ascii_lowercase().as_str()) {
            None
        } else {
            Some(text)
        }
    }

    fn value(&self, row: usize, col: usize, column: &str) -> Result<Option<f64>> {
        match self.cell(row, col) {
            None => Ok(None),
            Some(text) => {
                let value: f64 = text.parse().with_context(|| {
                    format!("Row {}: '{}' in column '{}' is not a number", row + 1, text, column)
                })?;
                Ok(value.is_finite().then_some(value))
            }
        }
    }

    /// Extract a `year -> value` series. Rows without a year are skipped.
    pub fn yearly_series(&self, year_col: &str, value_col: &str) -> Result<YearSeries> {
        let key_idx = self.column_index(year_col)?;
        let value_idx = self.column_index(value_col)?;

        let mut points = Vec::with_capacity(self.rows.len());
        for row in 0..self.rows.len() {
            let Some(key_text) = self.cell(row, key_idx) else {
                continue;
            };
            let Some(year) = TimeUtils::parse_year(key_text) else {
                bail!("Row {}: '{}' in column '{}' is not a year", row + 1, key_text, year_col);
            };
            points.push((year, self.value(row, value_idx, value_col)?));
        }

        Ok(YearSeries::new(value_col, points))
    }

    /// Extract a `date -> value` series. Rows without a date are skipped.
    pub fn daily_series(&self, date_col: &str, value_col: &str) -> Result<DailySeries> {
        let key_idx = self.column_index(date_col)?;
        let value_idx = self.column_index(value_col)?;

        let mut points = Vec::with_capacity(self.rows.len());
        for row in 0..self.rows.len() {
            let Some(key_text) = self.cell(row, key_idx) else {
                continue;
            };
            let Some(date) = TimeUtils::parse_date(key_text) else {
                bail!("Row {}: '{}' in column '{}' is not a date", row + 1, key_text, date_col);
            };
            points.push((date, self.value(row, value_idx, value_col)?));
        }

        Ok(DailySeries::new(value_col, points))
    }

    /// Headers that appear more than once. Only the first of each is ever read.
    pub fn duplicate_headers(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.headers
            .iter()
            .filter(|h| !seen.insert(h.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn yearly_series_handles_missing_cells() {
        let table = Table::from_rows(
            &["year", "skill"],
            &rows(&[&["2000", "0.5"], &["2001", ""], &["", "0.9"], &["2002", "NA"], &["2003.0", "1.25"]]),
        );
        let series = table.yearly_series("year", "skill").unwrap();
        assert_eq!(series.name, "skill");
        assert_eq!(
            series.points,
            vec![(2000, Some(0.5)), (2001, None), (2002, None), (2003, Some(1.25))]
        );
    }

    #[test]
    fn missing_column_is_an_error() {
        let table = Table::from_rows(&["year", "skill"], &rows(&[&["2000", "1"]]));
        let err = table.yearly_series("year", "score").unwrap_err();
        assert!(err.to_string().contains("Column 'score' not found"));
        assert!(table.has_column("skill"));
        assert!(!table.has_column("score"));
    }

    #[test]
    fn garbage_cells_are_errors() {
        let table = Table::from_rows(&["year", "v"], &rows(&[&["2000", "lots"]]));
        assert!(table.yearly_series("year", "v").is_err());
        let table = Table::from_rows(&["year", "v"], &rows(&[&["MMXX", "1"]]));
        assert!(table.yearly_series("year", "v").is_err());
    }

    #[test]
    fn daily_series_parses_dates() {
        let table = Table::from_rows(
            &["date", "pageviews"],
            &rows(&[&["2023-03-20", "1500"], &["2023-03-21 00:00:00", "nan"], &["2023-03-22", "inf"]]),
        );
        let series = table.daily_series("date", "pageviews").unwrap();
        assert_eq!(
            series.points,
            vec![
                (NaiveDate::from_ymd_opt(2023, 3, 20).unwrap(), Some(1500.0)),
                (NaiveDate::from_ymd_opt(2023, 3, 21).unwrap(), None),
                (NaiveDate::from_ymd_opt(2023, 3, 22).unwrap(), None),
            ]
        );
    }

    #[test]
    fn short_rows_read_as_missing() {
        let table = Table::from_rows(&["year", "v"], &rows(&[&["2000"]]));
        let series = table.yearly_series("year", "v").unwrap();
        assert_eq!(series.points, vec![(2000, None)]);
        assert_eq!(table.row(0).map(|r| r.len()), Some(1));
        assert_eq!(table.row(1), None);
    }

    #[test]
    fn reports_duplicate_headers() {
        let table = Table::from_rows(&["year", "v", "v"], &[]);
        assert_eq!(table.duplicate_headers(), vec!["v".to_string()]);
        assert!(table.is_empty());
    }
}
