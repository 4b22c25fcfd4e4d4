// src/ingest/mod.rs

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::warn;

pub mod utils;
pub use utils::{clean_str, years_from_filename};

use crate::panel::MetricRow;

/// Header cell carrying the company label.
pub const COMPANY_COLUMN: &str = "Company";

/// Header cell carrying the metric label.
pub const METRIC_COLUMN: &str = "Metric";

/// A wide metric sheet in memory: the ordered data rows plus the year-value
/// column labels in header order.
#[derive(Debug)]
pub struct MetricTable {
    pub rows: Vec<MetricRow>,
    pub year_columns: Vec<String>,
}

/// Delimiter selected from the file extension: tab for `.tsv`/`.tab`,
/// comma for everything else.
pub fn delimiter_for_path(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => b'\t',
        _ => b',',
    }
}

/// Open `path` and parse it with the extension-selected delimiter.
pub fn load_metric_file<P: AsRef<Path>>(path: P) -> Result<MetricTable> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("opening sheet {}", path.display()))?;
    load_metric_table(BufReader::new(file), delimiter_for_path(path))
        .with_context(|| format!("loading sheet {}", path.display()))
}

/// Parse delimited text into an ordered `MetricRow` list.
///
/// The header row must contain `Company` and `Metric` cells (exact match);
/// every other header cell is recorded as a year-value column. Cells are
/// trimmed and unquoted. An empty `Company` cell reads as no label, an empty
/// year cell as a null value, and a non-numeric year cell is logged and also
/// reads as null. Ragged rows are tolerated; their missing cells read as
/// nulls. Year columns absent from the header end up with no key in
/// `MetricRow::values` at all, which is what lets the panel build distinguish
/// a blank cell from a column that never existed.
pub fn load_metric_table<R: Read>(reader: R, delimiter: u8) -> Result<MetricTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("reading header row")?
        .iter()
        .map(clean_str)
        .collect();

    let company_idx = headers
        .iter()
        .position(|h| h == COMPANY_COLUMN)
        .ok_or_else(|| anyhow::anyhow!("header row has no \"{}\" column", COMPANY_COLUMN))?;
    let metric_idx = headers
        .iter()
        .position(|h| h == METRIC_COLUMN)
        .ok_or_else(|| anyhow::anyhow!("header row has no \"{}\" column", METRIC_COLUMN))?;

    let year_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != company_idx && i != metric_idx)
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record =
            result.with_context(|| format!("CSV parse error at data record {}", idx))?;

        let company = record
            .get(company_idx)
            .map(clean_str)
            .filter(|label| !label.is_empty());
        let metric = record.get(metric_idx).map(clean_str).unwrap_or_default();

        let mut values = HashMap::with_capacity(year_columns.len());
        for (col, label) in &year_columns {
            let cell = record.get(*col).map(clean_str).unwrap_or_default();
            let value = if cell.is_empty() {
                None
            } else {
                match cell.parse::<f64>() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        warn!(record = idx, column = %label, cell = %cell, "non-numeric cell, reading as null");
                        None
                    }
                }
            };
            values.insert(label.clone(), value);
        }

        rows.push(MetricRow {
            company,
            metric,
            values,
        });
    }

    Ok(MetricTable {
        rows,
        year_columns: year_columns.into_iter().map(|(_, label)| label).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,bubblecmp::ingest=debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[test]
    fn test_header_mapping_and_cell_values() -> anyhow::Result<()> {
        init_test_logging();
        let content = "\
Company,Metric,1999,2000
\"Alphabet, Inc.\",Market Cap ($bn),125.0,125.0
,Revenue ($bn),0.19,0.42
,Valuation/Revenue,658.0,298.0
";
        let table = load_metric_table(Cursor::new(content), b',')?;

        assert_eq!(table.year_columns, vec!["1999", "2000"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].company.as_deref(), Some("Alphabet, Inc."));
        assert_eq!(table.rows[0].metric, "Market Cap ($bn)");
        assert_eq!(table.rows[1].company, None);
        assert_eq!(table.rows[2].values.get("2000"), Some(&Some(298.0)));
        Ok(())
    }

    #[test]
    fn test_blank_and_non_numeric_cells_read_as_null() -> anyhow::Result<()> {
        init_test_logging();
        let content = "\
Company,Metric,1996,1997
Amazon,Market Cap ($bn),,2.44
,Revenue ($bn),n/a,0.15
";
        let table = load_metric_table(Cursor::new(content), b',')?;

        // blank cell: present key, null value
        assert_eq!(table.rows[0].values.get("1996"), Some(&None));
        // non-numeric cell degrades to null instead of failing the load
        assert_eq!(table.rows[1].values.get("1996"), Some(&None));
        assert_eq!(table.rows[1].values.get("1997"), Some(&Some(0.15)));
        Ok(())
    }

    #[test]
    fn test_ragged_rows_read_missing_cells_as_null() -> anyhow::Result<()> {
        init_test_logging();
        let content = "\
Company,Metric,1999,2000
eBay,Market Cap ($bn),18.0
";
        let table = load_metric_table(Cursor::new(content), b',')?;

        let row = &table.rows[0];
        assert_eq!(row.values.get("1999"), Some(&Some(18.0)));
        // the 2000 cell is missing from the record but the column exists
        assert_eq!(row.values.get("2000"), Some(&None));
        Ok(())
    }

    #[test]
    fn test_missing_company_or_metric_header_fails_the_load() {
        init_test_logging();
        let no_company = "Name,Metric,1999\nAcme,Revenue ($bn),1.0\n";
        let err = load_metric_table(Cursor::new(no_company), b',').unwrap_err();
        assert!(err.to_string().contains("Company"), "got: {err:#}");

        let no_metric = "Company,Measure,1999\nAcme,Revenue ($bn),1.0\n";
        let err = load_metric_table(Cursor::new(no_metric), b',').unwrap_err();
        assert!(err.to_string().contains("Metric"), "got: {err:#}");
    }

    #[test]
    fn test_tsv_extension_selects_tab_delimiter() -> anyhow::Result<()> {
        init_test_logging();
        assert_eq!(delimiter_for_path(Path::new("panel.tsv")), b'\t');
        assert_eq!(delimiter_for_path(Path::new("panel.TAB")), b'\t');
        assert_eq!(delimiter_for_path(Path::new("panel.csv")), b',');
        assert_eq!(delimiter_for_path(Path::new("panel")), b',');

        let mut tmp = tempfile::Builder::new().suffix(".tsv").tempfile()?;
        tmp.write_all(b"Company\tMetric\t2020\nAcme\tRevenue ($bn)\t2.0\n")?;
        tmp.flush()?;

        let table = load_metric_file(tmp.path())?;
        assert_eq!(table.year_columns, vec!["2020"]);
        assert_eq!(table.rows[0].values.get("2020"), Some(&Some(2.0)));
        Ok(())
    }
}
