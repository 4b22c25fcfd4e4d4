// src/report.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::panel::PanelRow;

/// Run manifest written as `report.json` at the end of a pipeline run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub cohorts: Vec<CohortSummary>,
    pub charts: Vec<PathBuf>,
}

/// Per-cohort row/company/null counts plus the artifacts produced for it.
#[derive(Debug, Serialize)]
pub struct CohortSummary {
    pub name: String,
    pub era: String,
    pub rows: usize,
    pub companies: usize,
    pub null_cells: usize,
    pub artifacts: Vec<PathBuf>,
}

impl CohortSummary {
    pub fn new(name: &str, era: &str, rows: &[PanelRow], artifacts: Vec<PathBuf>) -> Self {
        let companies: HashSet<&str> = rows.iter().map(|r| r.company.as_str()).collect();
        let null_cells = rows
            .iter()
            .map(|r| {
                [r.market_cap, r.revenue, r.val_rev]
                    .iter()
                    .filter(|v| v.is_none())
                    .count()
            })
            .sum();
        Self {
            name: name.to_string(),
            era: era.to_string(),
            rows: rows.len(),
            companies: companies.len(),
            null_cells,
            artifacts,
        }
    }
}

impl Report {
    pub fn new(cohorts: Vec<CohortSummary>, charts: Vec<PathBuf>) -> Self {
        Self {
            generated_at: Utc::now(),
            cohorts,
            charts,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        fs::write(path, text).with_context(|| format!("writing report {}", path.display()))?;
        info!(path = %path.display(), "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_companies_and_null_cells() {
        let rows = vec![
            PanelRow {
                company: "Acme".into(),
                year: 1999,
                market_cap: Some(10.0),
                revenue: None,
                val_rev: Some(4.0),
            },
            PanelRow {
                company: "Acme".into(),
                year: 2000,
                market_cap: None,
                revenue: None,
                val_rev: None,
            },
        ];

        let summary = CohortSummary::new("demo", "Demo (1999-2000)", &rows, vec![]);
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.companies, 1);
        assert_eq!(summary.null_cells, 4);
    }

    #[test]
    fn test_report_round_trips_through_json() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("report.json");
        let report = Report::new(
            vec![CohortSummary::new(
                "demo",
                "Demo (1999-2000)",
                &[],
                vec![PathBuf::from("out/panels/demo_tidy.csv")],
            )],
            vec![PathBuf::from("out/charts/ps_trend.png")],
        );

        report.write(&path)?;
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert!(value["generated_at"].is_string());
        assert_eq!(value["cohorts"][0]["name"], "demo");
        assert_eq!(value["charts"][0], "out/charts/ps_trend.png");
        Ok(())
    }
}
