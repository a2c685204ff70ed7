use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, Float32Array, Float64Array};
use log::{info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{Point, PointSequence};
use crate::config::Config;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a two-column spectrum from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`                 – `x,y` rows, optional header, extra columns ignored
/// * `.dat` / `.txt` / `.tsv` – whitespace-separated `x y` rows, `#` comments
/// * `.json`                – `[{ "x": .., "y": .. }, ...]` or `{ "x": [...], "y": [...] }`
/// * `.parquet`             – scalar `x` and `y` columns (Float64 or Float32)
///
/// The band count is checked against `config.max_bands` while reading.
pub fn load_file(path: &Path, config: &Config) -> Result<PointSequence> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let points = match ext.as_str() {
        "json" => load_json(path, config.max_bands)?,
        "csv" | "dat" | "txt" | "tsv" | "parquet" | "pq" => {
            let mut points = PointSequence::with_capacity(config.max_bands);
            match ext.as_str() {
                "csv" => load_csv(path, config.has_header, &mut points)?,
                "parquet" | "pq" => load_parquet(path, &mut points)?,
                _ => load_columns(path, &mut points)?,
            }
            points
        }
        other => bail!("Unsupported file extension: .{other}"),
    };

    if points.is_empty() {
        warn!("no bands found in {}", path.display());
    } else {
        info!("loaded {} bands from {}", points.len(), path.display());
    }
    Ok(points)
}

fn push_point(points: &mut PointSequence, point: Point, row: usize) -> Result<()> {
    points
        .push(point)
        .with_context(|| format!("row {row}: too many bands"))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: the first two columns are x and y; anything after is ignored.
fn load_csv(path: &Path, has_header: bool, points: &mut PointSequence) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() < 2 {
            bail!("CSV row {row_no}: expected 2 columns, got {}", record.len());
        }
        let x = parse_float(&record[0], row_no, "x")?;
        let y = parse_float(&record[1], row_no, "y")?;
        push_point(points, Point::new(x, y), row_no)?;
    }
    Ok(())
}

fn parse_float(tok: &str, row: usize, col: &str) -> Result<f64> {
    tok.parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{tok}' is not a number"))
}

// ---------------------------------------------------------------------------
// Whitespace-column loader
// ---------------------------------------------------------------------------

/// Gnuplot-style `.dat`: one `x y` pair per line. A leading line that does
/// not parse as numbers is taken as a header.
fn load_columns(path: &Path, points: &mut PointSequence) -> Result<()> {
    let text = std::fs::read_to_string(path).context("reading data file")?;

    let mut seen_data = false;
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(x_tok), Some(y_tok)) = (fields.next(), fields.next()) else {
            bail!("line {}: expected 2 columns", line_no + 1);
        };
        match (x_tok.parse::<f64>(), y_tok.parse::<f64>()) {
            (Ok(x), Ok(y)) => {
                seen_data = true;
                push_point(points, Point::new(x, y), line_no + 1)?;
            }
            _ if !seen_data => {
                seen_data = true;
            }
            _ => bail!("line {}: '{line}' is not a pair of numbers", line_no + 1),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonSpectrum {
    Records(Vec<Point>),
    Columns { x: Vec<f64>, y: Vec<f64> },
}

fn load_json(path: &Path, max_bands: usize) -> Result<PointSequence> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let parsed: JsonSpectrum = serde_json::from_str(&text)
        .context("parsing JSON: expected a list of {x, y} records or {x: [...], y: [...]}")?;

    let records = match parsed {
        JsonSpectrum::Records(records) => records,
        JsonSpectrum::Columns { x, y } => {
            if x.len() != y.len() {
                bail!("x has {} values but y has {}", x.len(), y.len());
            }
            x.into_iter().zip(y).map(Point::from).collect()
        }
    };

    PointSequence::from_points(records, max_bands).context("too many bands")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Expected schema: scalar `x` and `y` columns; other columns are ignored.
fn load_parquet(path: &Path, points: &mut PointSequence) -> Result<()> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut row = 0;
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let x_idx = schema
            .index_of("x")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'x' column"))?;
        let y_idx = schema
            .index_of("y")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'y' column"))?;

        let xs = extract_f64(batch.column(x_idx), "x")?;
        let ys = extract_f64(batch.column(y_idx), "y")?;

        for (x, y) in xs.into_iter().zip(ys) {
            push_point(points, Point::new(x, y), row)?;
            row += 1;
        }
    }
    Ok(())
}

/// Read a Float64 or Float32 column; nulls are rejected.
fn extract_f64(col: &Arc<dyn Array>, name: &str) -> Result<Vec<f64>> {
    if col.null_count() > 0 {
        bail!("column '{name}' contains {} null value(s)", col.null_count());
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(arr.values().iter().copied().collect())
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(arr.values().iter().map(|&v| v as f64).collect())
    } else {
        bail!(
            "column '{name}' is {:?}, expected Float64 or Float32",
            col.data_type()
        )
    }
}
