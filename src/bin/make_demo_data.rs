use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use clap::Parser;
use std::path::{Path, PathBuf};

use emo_vitals::config::{DATA_DIR, DATA_FILES, DATE_COLUMN, YEAR_COLUMN};
use emo_vitals::data::{Table, save_table};
use emo_vitals::utils::time_utils::format_date;

/// Write a small synthetic dataset for every vital sign.
#[derive(Parser, Debug)]
struct Args {
    /// Output directory
    #[arg(long, default_value = DATA_DIR)]
    out: PathBuf,
}

const FIRST_YEAR: i32 = 1990;
const LAST_YEAR: i32 = 2023;
const GWI_DAYS: u64 = 120;

fn main() -> Result<()> {
    let args = Args::parse();
    build_demo_data(&args.out)
}

fn build_demo_data(out: &Path) -> Result<()> {
    let files: Vec<(&str, Table)> = vec![
        (
            DATA_FILES.treaties,
            yearly_table("treaty_parties", &yearly(&|t| 40.0 + 3.0 * t + 2.0 * (t * 0.7).sin())),
        ),
        (
            DATA_FILES.conflict,
            yearly_table("conflict_deaths", &yearly(&|t| 90_000.0 - 1_500.0 * t + 8_000.0 * (t * 0.9).cos())),
        ),
        (
            DATA_FILES.synergy_news,
            yearly_table("news_count", &yearly(&|t| 500.0 * (1.0 + 0.12 * t).powi(2) + 40.0 * (t * 1.3).sin())),
        ),
        (
            DATA_FILES.synergy_pubs,
            yearly_table("papers_count", &yearly(&|t| 1_200.0 * (0.08 * t).exp() + 90.0 * (t * 0.5).cos())),
        ),
        (
            DATA_FILES.synergy_conflict,
            yearly_table("conflict_deaths", &yearly(&|t| 90_000.0 - 1_500.0 * t + 8_000.0 * (t * 0.9).cos())),
        ),
        (
            DATA_FILES.gwi_news,
            daily_table("news_count", &daily(&|d| 20.0 + 5.0 * (d * 0.3).sin() + burst(d) * 150.0)),
        ),
        (
            DATA_FILES.gwi_wiki,
            daily_table("pageviews", &daily(&|d| 3_000.0 + 400.0 * (d * 0.2).cos() + burst(d) * 25_000.0)),
        ),
        (
            DATA_FILES.co2_target,
            yearly_table("co2_target", &yearly(&|t| 22.0 + 0.3 * t - 0.012 * t * t)),
        ),
        (
            DATA_FILES.co2_actual,
            yearly_table("co2_actual", &yearly(&|t| 22.0 + 0.45 * t + 0.5 * (t * 0.6).sin())),
        ),
        (
            DATA_FILES.skill,
            yearly_table("skill", &yearly(&|t| 0.6 + 0.008 * t + 0.01 * (t * 1.7).sin())),
        ),
    ];

    for (file_name, table) in &files {
        let path = out.join(file_name);
        save_table(table, &path).with_context(|| format!("Failed to write {:?}", path))?;
        println!("Wrote {} rows to {:?}", table.len(), path);
    }

    println!("✅ Demo data written to {:?} ({} files).", out, files.len());
    Ok(())
}

/// Two attention spikes, a few days wide.
fn burst(day: f64) -> f64 {
    [30.0, 85.0]
        .iter()
        .map(|centre| (-((day - centre) / 2.0).powi(2)).exp())
        .sum()
}

fn yearly(value: &dyn Fn(f64) -> f64) -> Vec<(i32, f64)> {
    (FIRST_YEAR..=LAST_YEAR)
        .map(|y| (y, value(f64::from(y - FIRST_YEAR))))
        .collect()
}

fn daily(value: &dyn Fn(f64) -> f64) -> Vec<(NaiveDate, f64)> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();
    (0..GWI_DAYS)
        .filter_map(|d| Some((start.checked_add_days(Days::new(d))?, value(d as f64))))
        .collect()
}

fn yearly_table(column: &str, values: &[(i32, f64)]) -> Table {
    let rows: Vec<Vec<String>> = values
        .iter()
        .map(|(year, v)| vec![year.to_string(), format!("{:.2}", v.max(0.0))])
        .collect();
    Table::from_rows(&[YEAR_COLUMN, column], &rows)
}

fn daily_table(column: &str, values: &[(NaiveDate, f64)]) -> Table {
    let rows: Vec<Vec<String>> = values
        .iter()
        .map(|(date, v)| vec![format_date(*date), format!("{:.0}", v.max(0.0))])
        .collect();
    Table::from_rows(&[DATE_COLUMN, column], &rows)
}
