// src/panel/types.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metric label of a company's market-capitalisation row.
pub const MARKET_CAP_METRIC: &str = "Market Cap ($bn)";

/// Metric label of a company's revenue row.
pub const REVENUE_METRIC: &str = "Revenue ($bn)";

/// Metric label of a company's valuation-to-revenue (price-to-sales) row.
pub const VAL_REV_METRIC: &str = "Valuation/Revenue";

/// One row of the wide input layout: a company label (only present on the
/// first row of a company's block), a metric label, and the numeric value per
/// year column.
///
/// `values` carries one entry per year column of the sheet. A blank or
/// unparsable cell is a present key holding `None`; a year column that does
/// not exist in the sheet has no key at all. The distinction matters:
/// `build_panel` treats the former as a null observation and the latter as a
/// fatal lookup failure.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub company: Option<String>,
    pub metric: String,
    pub values: HashMap<String, Option<f64>>,
}

/// One tidy-panel record: a single (company, year) observation.
///
/// Serialized field names match the exported artifact shape
/// (`Company`/`Year`/`MarketCap`/`Revenue`/`ValRev`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRow {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "MarketCap")]
    pub market_cap: Option<f64>,
    #[serde(rename = "Revenue")]
    pub revenue: Option<f64>,
    #[serde(rename = "ValRev")]
    pub val_rev: Option<f64>,
}
