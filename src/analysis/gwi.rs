//! Global Workspace Ignition (GWI).
//!
//! Daily news mentions and page views for one topic are z-scored independently,
//! summed and squashed: `ignition = logistic(news_z + wiki_z)`. Days at or above
//! the configured percentile of their own ignition distribution are events.
//!
//! The percentile uses linear interpolation between closest ranks and the flag
//! comparison is inclusive, so a constant ignition column flags every day.

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::analysis::align::inner_join;
use crate::config::{DATE_COLUMN, DEBUG_FLAGS, GWI_TOPIC_NAME, GwiSettings};
use crate::data::Table;
use crate::domain::{DailySeries, Reading};
use crate::utils::maths_utils::{logistic, percentile, zscore};

#[derive(Debug, Clone)]
pub struct GwiColumns {
    pub date: String,
    pub news: String,
    pub wiki: String,
}

impl Default for GwiColumns {
    fn default() -> Self {
        Self {
            date: DATE_COLUMN.to_string(),
            news: "news_count".to_string(),
            wiki: "pageviews".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GwiRow {
    pub date: NaiveDate,
    pub news_count: f64,
    pub pageviews: f64,
    pub news_z: f64,
    pub wiki_z: f64,
    pub ignition_raw: f64,
    pub ignition: f64,
    pub is_ignition: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GwiResult {
    pub topic: String,
    /// Ascending by date.
    pub time_series: Vec<GwiRow>,
    pub percentile: f64,
    pub threshold: f64,
    /// Flagged rows, in frame order.
    pub ignition_events: Vec<GwiRow>,
}

/// Compute GWI from the daily news and page-view tables.
pub fn compute_gwi(
    news: &Table,
    wiki: &Table,
    columns: &GwiColumns,
    settings: &GwiSettings,
) -> Result<Reading<GwiResult>> {
    let news_series = news.daily_series(&columns.date, &columns.news)?;
    let wiki_series = wiki.daily_series(&columns.date, &columns.wiki)?;
    Ok(gwi_from_series(&news_series, &wiki_series, settings))
}

/// Compute GWI from already-extracted daily series.
///
/// No overlapping complete days means there is nothing to report, so the whole
/// result is unavailable rather than an empty-but-valid frame.
pub fn gwi_from_series(
    news: &DailySeries,
    wiki: &DailySeries,
    settings: &GwiSettings,
) -> Reading<GwiResult> {
    let frame = inner_join(&[news, wiki]);
    if frame.is_empty() {
        return Reading::insufficient(1, 0);
    }

    let news_z = zscore(frame.column(0));
    let wiki_z = zscore(frame.column(1));
    let ignition_raw: Vec<f64> = news_z.iter().zip(wiki_z.iter()).map(|(n, w)| n + w).collect();
    let ignition = logistic(&ignition_raw, settings.logistic_k);

    let threshold = percentile(&ignition, settings.ignition_percentile);

    let time_series: Vec<GwiRow> = (0..frame.len())
        .map(|i| GwiRow {
            date: frame.keys[i],
            news_count: frame.columns[0][i],
            pageviews: frame.columns[1][i],
            news_z: news_z[i],
            wiki_z: wiki_z[i],
            ignition_raw: ignition_raw[i],
            ignition: ignition[i],
            is_ignition: ignition[i] >= threshold,
        })
        .collect();

    let ignition_events: Vec<GwiRow> = time_series
        .iter()
        .filter(|row| row.is_ignition)
        .cloned()
        .collect();

    if cfg!(debug_assertions) && DEBUG_FLAGS.print_ignition_threshold {
        log::info!(
            "GWI: p{} threshold {:.4} flags {} of {} days",
            settings.ignition_percentile,
            threshold,
            ignition_events.len(),
            time_series.len()
        );
    }

    Reading::Computed(GwiResult {
        topic: GWI_TOPIC_NAME.to_string(),
        time_series,
        percentile: settings.ignition_percentile.clamp(0.0, 100.0),
        threshold,
        ignition_events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ANALYSIS;

    fn days(n: u32) -> Vec<NaiveDate> {
        (1..=n)
            .map(|d| NaiveDate::from_ymd_opt(2023, 3, d).unwrap())
            .collect()
    }

    #[test]
    fn constant_streams_flag_every_day() {
        let ds = days(10);
        let result = gwi_from_series(
            &DailySeries::from_values("news", &ds, &[5.0; 10]),
            &DailySeries::from_values("wiki", &ds, &[800.0; 10]),
            &ANALYSIS.gwi,
        )
        .into_computed()
        .unwrap();

        assert!(result.time_series.iter().all(|r| r.ignition == 0.5));
        assert_eq!(result.threshold, 0.5);
        assert_eq!(result.ignition_events.len(), 10);
    }

    #[test]
    fn joint_spike_is_the_event() {
        let ds = days(20);
        let mut news = vec![10.0; 20];
        let mut wiki = vec![1000.0; 20];
        for i in 0..20 {
            news[i] += (i % 3) as f64;
            wiki[i] += (i % 4) as f64 * 10.0;
        }
        news[12] = 200.0;
        wiki[12] = 20_000.0;

        let result = gwi_from_series(
            &DailySeries::from_values("news", &ds, &news),
            &DailySeries::from_values("wiki", &ds, &wiki),
            &ANALYSIS.gwi,
        )
        .into_computed()
        .unwrap();

        // p95 of 20 values interpolates between the top two, so only the max passes.
        assert_eq!(result.ignition_events.len(), 1);
        assert_eq!(result.ignition_events[0].date, ds[12]);
        assert!(result.ignition_events[0].ignition > 0.9);
    }

    #[test]
    fn events_keep_frame_order_and_series_is_sorted() {
        let ds = days(6);
        // Provided out of order; the frame comes back ascending.
        let shuffled: Vec<NaiveDate> = vec![ds[3], ds[0], ds[5], ds[1], ds[4], ds[2]];
        let news = DailySeries::from_values("news", &shuffled, &[9.0, 1.0, 9.0, 1.0, 2.0, 1.0]);
        let wiki = DailySeries::from_values("wiki", &ds, &[1.0, 1.0, 1.0, 9.0, 2.0, 9.0]);

        let settings = GwiSettings {
            ignition_percentile: 50.0,
            ..ANALYSIS.gwi
        };
        let result = gwi_from_series(&news, &wiki, &settings).into_computed().unwrap();

        let dates: Vec<NaiveDate> = result.time_series.iter().map(|r| r.date).collect();
        assert_eq!(dates, ds);
        let event_dates: Vec<NaiveDate> = result.ignition_events.iter().map(|r| r.date).collect();
        let mut sorted = event_dates.clone();
        sorted.sort();
        assert_eq!(event_dates, sorted);
        assert!(result.ignition_events.iter().all(|r| r.ignition >= result.threshold));
    }

    #[test]
    fn missing_days_are_dropped_before_scoring() {
        let ds = days(4);
        let news = DailySeries::new(
            "news",
            vec![(ds[0], Some(1.0)), (ds[1], None), (ds[2], Some(3.0)), (ds[3], Some(4.0))],
        );
        let wiki = DailySeries::from_values("wiki", &ds[..3], &[10.0, 20.0, 30.0]);

        let result = gwi_from_series(&news, &wiki, &ANALYSIS.gwi).into_computed().unwrap();
        let dates: Vec<NaiveDate> = result.time_series.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![ds[0], ds[2]]);
    }

    #[test]
    fn no_overlap_is_unavailable() {
        let ds = days(4);
        let result = gwi_from_series(
            &DailySeries::from_values("news", &ds[..2], &[1.0, 2.0]),
            &DailySeries::from_values("wiki", &ds[2..], &[1.0, 2.0]),
            &ANALYSIS.gwi,
        );
        assert_eq!(result, Reading::insufficient(1, 0));
    }
}
