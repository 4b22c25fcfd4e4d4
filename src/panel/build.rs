// src/panel/build.rs

use thiserror::Error;

use super::types::{MetricRow, PanelRow, MARKET_CAP_METRIC, REVENUE_METRIC, VAL_REV_METRIC};

/// Number of metric rows making up one company block in the wide layout.
pub const BLOCK_ROWS: usize = 3;

/// Failure of a panel build.
#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    /// A requested year has no column in the sheet. The caller-supplied year
    /// list is expected to be consistent with the loaded data, so this aborts
    /// the build instead of degrading to a null value.
    #[error("year column \"{year}\" not found in sheet ({company}, metric \"{metric}\")")]
    MissingColumn {
        company: String,
        metric: String,
        year: i32,
    },
}

/// Reshape a wide metric table into the tidy per-company/per-year panel.
///
/// Scans `rows` once with a cursor. A row with a blank company label is a
/// stray row and is skipped; any other row starts a company block spanning
/// that row plus the following two (`BLOCK_ROWS` total, fewer at end of
/// input). Within the block the market-cap, revenue and ratio rows are found
/// by exact metric-label match; for each requested year one `PanelRow` is
/// emitted, with a null field for any metric row the block lacks.
///
/// Guarantees: the result holds exactly `blocks × years.len()` records, in
/// block order, and within a block in the order of `years` as supplied.
///
/// Preconditions (not checked): each company occupies exactly three rows,
/// and no metric label repeats within a block — on a repeat the first match
/// wins.
pub fn build_panel(rows: &[MetricRow], years: &[i32]) -> Result<Vec<PanelRow>, PanelError> {
    let mut records = Vec::with_capacity((rows.len() / BLOCK_ROWS + 1) * years.len());
    let mut i = 0;

    while i < rows.len() {
        let company = match rows[i].company.as_deref() {
            Some(label) if !label.trim().is_empty() => label.to_string(),
            _ => {
                i += 1;
                continue;
            }
        };

        let block = &rows[i..rows.len().min(i + BLOCK_ROWS)];
        let cap_row = block.iter().find(|r| r.metric == MARKET_CAP_METRIC);
        let revenue_row = block.iter().find(|r| r.metric == REVENUE_METRIC);
        let ratio_row = block.iter().find(|r| r.metric == VAL_REV_METRIC);

        for &year in years {
            let label = year.to_string();
            records.push(PanelRow {
                company: company.clone(),
                year,
                market_cap: cell(cap_row, &company, year, &label)?,
                revenue: cell(revenue_row, &company, year, &label)?,
                val_rev: cell(ratio_row, &company, year, &label)?,
            });
        }

        i += BLOCK_ROWS;
    }

    Ok(records)
}

/// Value of one metric at one year. An absent metric row reads as null
/// without touching the column; a present row with no such year column is
/// the fatal `MissingColumn` case.
fn cell(
    row: Option<&MetricRow>,
    company: &str,
    year: i32,
    label: &str,
) -> Result<Option<f64>, PanelError> {
    match row {
        None => Ok(None),
        Some(row) => match row.values.get(label) {
            Some(value) => Ok(*value),
            None => Err(PanelError::MissingColumn {
                company: company.to_string(),
                metric: row.metric.clone(),
                year,
            }),
        },
    }
}
