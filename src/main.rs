use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use emo_vitals::Cli;
use emo_vitals::engine::{SeriesSink, SparklineSink, render_envelope};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Run the selected pipelines
    let engine = args.engine()?;
    let signs = args.selected_signs();
    log::info!(
        "Computing {} vital sign(s) from {}",
        signs.len(),
        engine.sources.dir.display()
    );
    let envelopes = engine.run_all(&signs);

    // D. Report
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        serde_json::to_writer_pretty(&mut out, &envelopes).context("Failed to write JSON report")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "EMO: Planetary Vital Signs")?;
    writeln!(out, "Data directory: {}", engine.sources.dir.display())?;

    for envelope in &envelopes {
        if args.no_plot {
            render_envelope(envelope, &mut out, None)?;
        } else {
            let mut sink = SparklineSink::new(io::stdout());
            render_envelope(envelope, &mut out, Some(&mut sink as &mut dyn SeriesSink))?;
        }
    }

    let failed = envelopes.iter().filter(|e| e.result.is_err()).count();
    if failed > 0 {
        log::warn!("{} vital sign(s) failed, see [ERROR] lines above", failed);
    }
    Ok(())
}
