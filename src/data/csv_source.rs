use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

use anyhow::{Context, Result};

use crate::data::table::Table;

/// Load a CSV file into a `Table`.
///
/// A file that does not exist is not an error: it yields `Ok(None)` so the caller can
/// skip whatever metric needed it. Anything else going wrong (permissions, ragged
/// or non-UTF-8 records) is reported with the path attached.
pub fn load_table(path: &Path) -> Result<Option<Table>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("CSV not found: {}", path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(e).context(format!("Failed to open CSV file: {}", path.display()));
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("Bad CSV record {} in {}", idx + 1, path.display()))?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    let table = Table::new(headers, rows);
    let duplicates = table.duplicate_headers();
    if !duplicates.is_empty() {
        log::warn!(
            "{}: duplicate columns {:?}, only the first of each is used",
            path.display(),
            duplicates
        );
    }

    log::debug!("Loaded {} rows from {}", table.len(), path.display());
    Ok(Some(table))
}

/// Write a `Table` as CSV, creating parent directories as needed.
pub fn save_table(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path).context(format!("Failed to create file: {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));

    writer
        .write_record(&table.headers)
        .context(format!("Failed to write header to: {}", path.display()))?;
    for row in &table.rows {
        writer
            .write_record(row)
            .context(format!("Failed to write row to: {}", path.display()))?;
    }
    writer
        .flush()
        .context(format!("Failed to flush: {}", path.display()))
}
