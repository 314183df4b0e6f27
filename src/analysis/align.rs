//! Inner join of keyed series.
//!
//! Every pipeline aligns its inputs through `inner_join`: only keys present with a
//! finite value in all series survive, in ascending key order.

use itertools::{EitherOrBoth, Itertools};
use serde::Serialize;
use std::hash::Hash;

use crate::config::DEBUG_FLAGS;
use crate::domain::TimeSeries;

/// Complete rows shared by all joined series. Column `i` belongs to `names[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedFrame<K> {
    pub keys: Vec<K>,
    pub names: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl<K> AlignedFrame<K>
where
    K: Ord + Copy + Hash,
{
    pub fn from_series(series: &TimeSeries<K>) -> Self {
        let (keys, values): (Vec<K>, Vec<f64>) = series.complete().into_iter().unzip();
        Self {
            keys,
            names: vec![series.name.clone()],
            columns: vec![values],
        }
    }

    /// Keep only the rows whose key also appears (with a value) in `series`.
    pub fn join(self, series: &TimeSeries<K>) -> Self {
        let right = series.complete();
        let width = self.columns.len();

        let mut keys = Vec::new();
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); width + 1];

        let left = self.keys.iter().copied().enumerate();
        for pair in left.merge_join_by(right.iter(), |(_, lk), (rk, _)| lk.cmp(rk)) {
            if let EitherOrBoth::Both((row, key), &(_, value)) = pair {
                keys.push(key);
                for (col, source) in columns.iter_mut().zip(self.columns.iter()) {
                    col.push(source[row]);
                }
                columns[width].push(value);
            }
        }

        let mut names = self.names;
        names.push(series.name.clone());

        Self {
            keys,
            names,
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, idx: usize) -> &[f64] {
        &self.columns[idx]
    }
}

/// Inner-join any number of series on their time key.
///
/// An empty slice gives an empty frame with no columns.
pub fn inner_join<K>(series: &[&TimeSeries<K>]) -> AlignedFrame<K>
where
    K: Ord + Copy + Hash,
{
    let Some((first, rest)) = series.split_first() else {
        return AlignedFrame {
            keys: Vec::new(),
            names: Vec::new(),
            columns: Vec::new(),
        };
    };

    let frame = rest
        .iter()
        .fold(AlignedFrame::from_series(first), |frame, s| frame.join(s));

    if cfg!(debug_assertions) && DEBUG_FLAGS.print_alignment {
        let inputs: Vec<String> = series
            .iter()
            .map(|s| format!("{}={}", s.name, s.len()))
            .collect();
        log::info!(
            "Aligned [{}] -> {} complete rows",
            inputs.join(", "),
            frame.len()
        );
    }

    frame
}
