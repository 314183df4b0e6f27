use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;

/// Yearly observations keyed by calendar year.
pub type YearSeries = TimeSeries<i32>;
/// Daily observations keyed by calendar date.
pub type DailySeries = TimeSeries<NaiveDate>;

/// A named sequence of `(time_key, value)` observations as they came from the source.
/// Values may be absent; absent values are dropped at alignment time, never zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries<K> {
    pub name: String,
    pub points: Vec<(K, Option<f64>)>,
}

impl<K> TimeSeries<K>
where
    K: Ord + Copy + Hash,
{
    pub fn new(name: impl Into<String>, points: Vec<(K, Option<f64>)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Convenience constructor for fully populated series.
    pub fn from_values(name: impl Into<String>, keys: &[K], values: &[f64]) -> Self {
        Self::new(
            name,
            keys.iter()
                .zip(values.iter())
                .map(|(&k, &v)| (k, Some(v)))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observations with a finite value, sorted by key, first occurrence of a key wins.
    pub fn complete(&self) -> Vec<(K, f64)> {
        let mut seen: HashSet<K> = HashSet::with_capacity(self.points.len());
        let mut out: Vec<(K, f64)> = Vec::with_capacity(self.points.len());
        let mut duplicates = 0usize;

        for &(key, value) in &self.points {
            if !seen.insert(key) {
                duplicates += 1;
                continue;
            }
            if let Some(v) = value.filter(|v| v.is_finite()) {
                out.push((key, v));
            }
        }

        if duplicates > 0 {
            log::debug!(
                "Series '{}': ignored {} duplicate time keys (first occurrence kept)",
                self.name,
                duplicates
            );
        }

        // Stable sort keeps the first-occurrence guarantee intact.
        out.sort_by_key(|(k, _)| *k);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_drops_missing_and_sorts() {
        let s = YearSeries::new(
            "skill",
            vec![
                (2003, Some(3.0)),
                (2001, None),
                (2000, Some(1.0)),
                (2002, Some(f64::NAN)),
            ],
        );
        assert_eq!(s.complete(), vec![(2000, 1.0), (2003, 3.0)]);
    }

    #[test]
    fn complete_keeps_first_duplicate() {
        let s = YearSeries::new("x", vec![(2000, Some(1.0)), (2000, Some(9.0)), (1999, Some(0.5))]);
        assert_eq!(s.complete(), vec![(1999, 0.5), (2000, 1.0)]);
    }

    #[test]
    fn missing_first_duplicate_shadows_later_value() {
        let s = YearSeries::new("x", vec![(2000, None), (2000, Some(9.0))]);
        assert!(s.complete().is_empty());
    }
}
