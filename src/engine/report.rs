use std::io::{self, Write};

use crate::analysis::{GwiResult, InfoTimeResult, OrganismalityResult, SmfResult, SynergyResult};
use crate::domain::{Reading, VitalSign};
use crate::utils::time_utils::format_date;

use super::messages::{ReportEnvelope, VitalReport};

const RULE_WIDTH: usize = 80;
const SAMPLE_EVENTS: usize = 5;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Somewhere to send a computed series for display.
pub trait SeriesSink {
    fn plot(&mut self, title: &str, x_label: &str, y_label: &str, x: &[f64], y: &[f64]);
}

/// Draws a series as a one-line unicode sparkline.
pub struct SparklineSink<W: Write> {
    out: W,
}

impl<W: Write> SparklineSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SeriesSink for SparklineSink<W> {
    fn plot(&mut self, title: &str, x_label: &str, y_label: &str, x: &[f64], y: &[f64]) {
        let (Some(first), Some(last)) = (x.first(), x.last()) else {
            return;
        };
        let line = sparkline(y);
        // Plot output is best effort.
        let _ = writeln!(
            self.out,
            "{} ({} vs {}, {:.0}..{:.0})\n  {}",
            title, y_label, x_label, first, last, line
        );
    }
}

fn sparkline(values: &[f64]) -> String {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let range = hi - lo;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                ' '
            } else if range <= 0.0 {
                SPARK_LEVELS[SPARK_LEVELS.len() / 2]
            } else {
                SPARK_LEVELS[(((v - lo) / range) * top).round() as usize]
            }
        })
        .collect()
}

fn header(out: &mut impl Write, sign: VitalSign) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", sign)?;
    writeln!(out, "{}", rule)
}

fn warn_line<T>(out: &mut impl Write, what: &str, reading: &Reading<T>) -> io::Result<()> {
    match reading.reason() {
        Some(reason) => writeln!(out, "[WARN] {}: {}", what, reason),
        None => Ok(()),
    }
}

/// Print one envelope as a human readable block. The OI series goes to `sink` if given.
pub fn render_envelope(
    envelope: &ReportEnvelope,
    out: &mut impl Write,
    sink: Option<&mut dyn SeriesSink>,
) -> io::Result<()> {
    header(out, envelope.sign)?;

    let report = match &envelope.result {
        Ok(report) => report,
        Err(e) => return writeln!(out, "[ERROR] {} could not be computed: {}", envelope.sign, e),
    };

    match report {
        VitalReport::Organismality(reading) => match reading {
            Reading::Computed(r) => organismality(out, r, sink),
            _ => warn_line(out, "Skipping organismality", reading),
        },
        VitalReport::Synergy(reading) => match reading {
            Reading::Computed(r) => synergy(out, r),
            _ => warn_line(out, "Skipping synergy", reading),
        },
        VitalReport::Gwi(reading) => match reading {
            Reading::Computed(r) => gwi(out, r),
            _ => warn_line(out, "Skipping GWI", reading),
        },
        VitalReport::Smf(reading) => match reading {
            Reading::Computed(r) => smf(out, r),
            _ => warn_line(out, "Skipping SMF", reading),
        },
        VitalReport::InfoTime(reading) => match reading {
            Reading::Computed(r) => info_time(out, r),
            _ => warn_line(out, "Skipping information-time", reading),
        },
    }
}

fn organismality(
    out: &mut impl Write,
    result: &OrganismalityResult,
    sink: Option<&mut dyn SeriesSink>,
) -> io::Result<()> {
    match result.latest_value.value() {
        Some(v) => writeln!(out, "Latest OI (World): {:.3}", v)?,
        None => warn_line(out, "Latest OI", &result.latest_value)?,
    }
    match result.trend_20y_slope.value() {
        Some(slope) => writeln!(out, "20-year trend (slope per year): {:.4}", slope)?,
        None => writeln!(out, "20-year trend: not enough data.")?,
    }
    // Only a complete series is plotted.
    if let Some(sink) = sink.filter(|_| result.latest_value.is_computed()) {
        sink.plot(
            "Organismality Index (World)",
            "Year",
            "OI",
            &result.years(),
            &result.oi_values(),
        );
    }
    Ok(())
}

fn synergy(out: &mut impl Write, result: &SynergyResult) -> io::Result<()> {
    match result.synergy_index.value() {
        Some(v) => writeln!(out, "Gaussian synergy-like index: {:.4}", v)?,
        None => warn_line(out, "Synergy index", &result.synergy_index)?,
    }
    writeln!(out, "Streams used: {}", result.used_columns.join(", "))
}

fn gwi(out: &mut impl Write, result: &GwiResult) -> io::Result<()> {
    writeln!(out, "Topic: {}", result.topic)?;
    writeln!(
        out,
        "Ignition percentile threshold (p{:.0}): {:.4}",
        result.percentile, result.threshold
    )?;
    writeln!(out, "Number of ignition events: {}", result.ignition_events.len())?;
    if !result.ignition_events.is_empty() {
        writeln!(out, "Sample ignition events (first {}):", SAMPLE_EVENTS)?;
        for event in result.ignition_events.iter().take(SAMPLE_EVENTS) {
            writeln!(
                out,
                "  {}  ignition={:.4}  news={}  pageviews={}",
                format_date(event.date),
                event.ignition,
                event.news_count,
                event.pageviews
            )?;
        }
    }
    Ok(())
}

fn smf(out: &mut impl Write, result: &SmfResult) -> io::Result<()> {
    match result.global_smf.value() {
        Some(v) => writeln!(out, "Global SMF score: {:.3}", v)?,
        None => warn_line(out, "Global SMF", &result.global_smf)?,
    }
    match result.correlation.value() {
        Some(r) => writeln!(out, "Correlation between target and actual: {:.3}", r),
        None => warn_line(out, "Correlation", &result.correlation),
    }
}

fn info_time(out: &mut impl Write, result: &InfoTimeResult) -> io::Result<()> {
    match result.calendar_span.value() {
        Some(span) => writeln!(out, "Calendar span: {:.1} years", span)?,
        None => warn_line(out, "Calendar span", &result.calendar_span)?,
    }
    match result.tau_span.value() {
        Some(tau) => writeln!(out, "Information-time span: {:.4}", tau)?,
        None => warn_line(out, "Information-time span", &result.tau_span)?,
    }
    match result.accel_ratio.value() {
        Some(ratio) => writeln!(out, "Acceleration factor (τ_I / calendar): {:.4}", ratio),
        None => warn_line(out, "Acceleration factor", &result.accel_ratio),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{info_time_from_series, organismality_from_series};
    use crate::config::ANALYSIS;
    use crate::domain::YearSeries;

    fn render(envelope: &ReportEnvelope) -> String {
        let mut buf = Vec::new();
        render_envelope(envelope, &mut buf, None).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn sparkline_spans_full_range() {
        assert_eq!(sparkline(&[0.0, 0.5, 1.0]), "▁▅█");
        assert_eq!(sparkline(&[2.0, 2.0]), "▅▅");
        assert_eq!(sparkline(&[0.0, f64::NAN, 1.0]), "▁ █");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn sparkline_sink_writes_title_and_range() {
        let mut sink = SparklineSink::new(Vec::new());
        sink.plot("OI", "Year", "OI", &[2000.0, 2001.0], &[0.2, 0.8]);
        sink.plot("empty", "Year", "OI", &[], &[]);
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "OI (OI vs Year, 2000..2001)\n  ▁█\n");
    }

    #[derive(Default)]
    struct RecordingSink {
        titles: Vec<String>,
    }

    impl SeriesSink for RecordingSink {
        fn plot(&mut self, title: &str, _: &str, _: &str, _: &[f64], _: &[f64]) {
            self.titles.push(title.to_string());
        }
    }

    fn render_oi(years: &[i32], coop: &[f64], violence: &[f64], sink: &mut RecordingSink) -> String {
        let result = organismality_from_series(
            &YearSeries::from_values("treaty_parties", years, coop),
            &YearSeries::from_values("conflict_deaths", years, violence),
            &ANALYSIS.organismality,
        );
        let envelope = ReportEnvelope {
            sign: VitalSign::Organismality,
            duration_ms: 0,
            result: Ok(VitalReport::Organismality(Reading::Computed(result))),
        };
        let mut buf = Vec::new();
        render_envelope(&envelope, &mut buf, Some(sink as &mut dyn SeriesSink)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn complete_oi_series_is_plotted() {
        let mut sink = RecordingSink::default();
        let text = render_oi(&[2000, 2001, 2002], &[1.0, 2.0, 3.0], &[30.0, 20.0, 10.0], &mut sink);
        assert!(text.contains("Latest OI (World):"));
        assert_eq!(sink.titles, vec!["Organismality Index (World)".to_string()]);
    }

    #[test]
    fn partial_oi_series_is_not_plotted() {
        let mut sink = RecordingSink::default();
        let text = render_oi(&[2000], &[1.0], &[30.0], &mut sink);
        assert!(text.contains("[WARN] Latest OI: insufficient data"));
        assert!(sink.titles.is_empty());
    }

    #[test]
    fn missing_input_prints_warning() {
        let text = render(&ReportEnvelope {
            sign: VitalSign::Smf,
            duration_ms: 0,
            result: Ok(VitalReport::Smf(Reading::missing("co2_actual.csv"))),
        });
        assert!(text.contains("Self-Model Fidelity (SMF)"));
        assert!(text.contains("[WARN] Skipping SMF: missing input (co2_actual.csv)"));
    }

    #[test]
    fn errors_are_reported_not_raised() {
        let text = render(&ReportEnvelope {
            sign: VitalSign::Gwi,
            duration_ms: 3,
            result: Err("Column 'pageviews' not found".to_string()),
        });
        assert!(text.contains("[ERROR]"));
        assert!(text.contains("pageviews"));
    }

    #[test]
    fn info_time_scalars_are_printed() {
        let result = info_time_from_series(
            &YearSeries::from_values("skill", &[2000, 2001, 2002, 2003], &[0.5, 0.8, 0.6, 1.0]),
            &ANALYSIS.info_time,
        );
        let text = render(&ReportEnvelope {
            sign: VitalSign::InfoTime,
            duration_ms: 1,
            result: Ok(VitalReport::InfoTime(Reading::Computed(result))),
        });
        assert!(text.contains("Calendar span: 3.0 years"));
        assert!(text.contains("Information-time span: 0.7000"));
        assert!(text.contains("Acceleration factor (τ_I / calendar): 0.2333"));
    }
}
