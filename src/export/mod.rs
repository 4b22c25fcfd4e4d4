// src/export/mod.rs
//
// Materializes tidy panels on disk. Per cohort one artifact per selected
// format, plus the combined panels.json document keyed by cohort name (the
// shape the chart frontend embeds).

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Builder, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::ValueEnum;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde_json::Value;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;

use crate::panel::PanelRow;

/// Artifact formats selectable with `--formats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Parquet,
}

impl ExportFormat {
    pub fn all() -> Vec<ExportFormat> {
        vec![ExportFormat::Csv, ExportFormat::Json, ExportFormat::Parquet]
    }

    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Parquet => "parquet",
        }
    }
}

/// Write `<dir>/<name>_tidy.<ext>` for each selected format and return the
/// written paths.
pub fn export_panel(
    dir: &Path,
    name: &str,
    rows: &[PanelRow],
    formats: &[ExportFormat],
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(formats.len());
    for &format in formats {
        let path = dir.join(format!("{}_tidy.{}", name, format.extension()));
        match format {
            ExportFormat::Csv => write_csv(&path, rows),
            ExportFormat::Json => write_json(&path, rows),
            ExportFormat::Parquet => write_parquet(&path, rows),
        }
        .with_context(|| format!("exporting cohort {} as {:?}", name, format))?;
        info!(cohort = name, path = %path.display(), rows = rows.len(), "panel exported");
        written.push(path);
    }
    Ok(written)
}

/// Write the combined document: one JSON object mapping cohort name to its
/// row array, in the given cohort order.
pub fn export_combined(path: &Path, panels: &[(String, Vec<PanelRow>)]) -> Result<()> {
    let mut doc = serde_json::Map::new();
    for (name, rows) in panels {
        doc.insert(name.clone(), serde_json::to_value(rows)?);
    }
    write_pretty_json(path, &Value::Object(doc))
        .with_context(|| format!("writing combined panel document {}", path.display()))?;
    info!(path = %path.display(), cohorts = panels.len(), "combined panels written");
    Ok(())
}

fn write_csv(path: &Path, rows: &[PanelRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(["Company", "Year", "MarketCap", "Revenue", "ValRev"])?;
    for row in rows {
        let cell = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([
            row.company.clone(),
            row.year.to_string(),
            cell(row.market_cap),
            cell(row.revenue),
            cell(row.val_rev),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json(path: &Path, rows: &[PanelRow]) -> Result<()> {
    write_pretty_json(path, &serde_json::to_value(rows)?)
}

fn write_pretty_json(path: &Path, value: &Value) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Tidy-panel Arrow schema: company and year required, metrics nullable.
fn panel_schema() -> Schema {
    Schema::new(vec![
        Field::new("Company", DataType::Utf8, false),
        Field::new("Year", DataType::Int32, false),
        Field::new("MarketCap", DataType::Float64, true),
        Field::new("Revenue", DataType::Float64, true),
        Field::new("ValRev", DataType::Float64, true),
    ])
}

fn write_parquet(path: &Path, rows: &[PanelRow]) -> Result<()> {
    let schema = panel_schema();

    let companies: Vec<&str> = rows.iter().map(|r| r.company.as_str()).collect();
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    let float_column = |values: Box<dyn Iterator<Item = Option<f64>> + '_>| -> ArrayRef {
        let mut builder = Float64Builder::with_capacity(rows.len());
        for v in values {
            builder.append_option(v);
        }
        Arc::new(builder.finish())
    };

    let batch = RecordBatch::try_new(
        Arc::new(schema.clone()),
        vec![
            Arc::new(StringArray::from(companies)) as ArrayRef,
            Arc::new(Int32Array::from(years)) as ArrayRef,
            float_column(Box::new(rows.iter().map(|r| r.market_cap))),
            float_column(Box::new(rows.iter().map(|r| r.revenue))),
            float_column(Box::new(rows.iter().map(|r| r.val_rev))),
        ],
    )
    .context("building panel record batch")?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, Arc::new(schema), Some(props))
        .context("creating Arrow writer for panel")?;
    writer.write(&batch).context("writing panel batch")?;
    writer.close().context("closing panel writer")?;
    Ok(())
}
