use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::model::ContinuumRemovedSeries;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write a continuum-removed series.  Dispatch by extension.
///
/// * `.csv`  – header `x,y,continuum,quality`
/// * `.json` – the series as pretty-printed JSON
/// * anything else – gnuplot `.dat`: `x\ty` rows, six decimals
///
/// Rows follow the input order. Flagged samples are written as `NaN`.
pub fn write_file(path: &Path, series: &ContinuumRemovedSeries) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => write_csv(path, series)?,
        "json" => write_json(path, series)?,
        _ => write_dat(path, series)?,
    }

    info!("wrote {} samples to {}", series.len(), path.display());
    Ok(())
}

fn write_dat(path: &Path, series: &ContinuumRemovedSeries) -> Result<()> {
    let file = File::create(path).context("creating output file")?;
    let mut out = BufWriter::new(file);
    write_dat_rows(&mut out, series)?;
    out.flush().context("flushing output file")?;
    Ok(())
}

/// `x\ty` rows.
pub fn write_dat_rows<W: Write>(out: &mut W, series: &ContinuumRemovedSeries) -> Result<()> {
    for s in &series.samples {
        writeln!(out, "{:.6}\t{:.6}", s.x, s.y).context("writing row")?;
    }
    Ok(())
}

fn write_csv(path: &Path, series: &ContinuumRemovedSeries) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for sample in &series.samples {
        writer.serialize(sample).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_json(path: &Path, series: &ContinuumRemovedSeries) -> Result<()> {
    let file = File::create(path).context("creating JSON output")?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, series).context("writing JSON")?;
    out.flush().context("flushing JSON output")?;
    Ok(())
}
