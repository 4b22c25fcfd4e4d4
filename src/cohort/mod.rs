// src/cohort/mod.rs

use anyhow::{bail, Context, Result};
use glob::glob;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

/// One company cohort: where its sheet lives, which years to extract, and
/// which of those years count as the era's bubble peak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSpec {
    /// Short key used for artifact file names (`dotcom`, `bigtech_ai`, ...).
    pub name: String,
    /// Display label, e.g. `"Dot-com (1996-2000)"`.
    pub era: String,
    /// Path or glob pattern of the input sheet.
    pub source: String,
    /// Ordered year list handed to the panel build.
    pub years: Vec<i32>,
    /// Peak-window years; must be a subset of `years`.
    pub peak_years: Vec<i32>,
}

impl CohortSpec {
    /// Era label without the parenthesized year range, for chart legends.
    pub fn short_era(&self) -> &str {
        match self.era.split_once(" (") {
            Some((short, _)) => short,
            None => &self.era,
        }
    }

    /// Resolve `source` to the input sheet on disk.
    pub fn resolve_source(&self) -> Result<PathBuf> {
        resolve_pattern(&self.source)
            .with_context(|| format!("resolving source for cohort {}", self.name))
    }
}

/// Resolve a path-or-glob pattern to one existing file. No match is fatal;
/// with several matches the lexicographically first wins and the rest are
/// logged.
pub fn resolve_pattern(pattern: &str) -> Result<PathBuf> {
    let mut matches: Vec<PathBuf> = glob(pattern)
        .with_context(|| format!("invalid glob pattern {:?}", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    if matches.is_empty() {
        bail!("no input sheet matches {:?}", pattern);
    }
    matches.sort();
    if matches.len() > 1 {
        warn!(
            pattern = %pattern,
            matched = matches.len(),
            using = %matches[0].display(),
            "pattern matches several sheets"
        );
    }
    Ok(matches.swap_remove(0))
}

/// The built-in cohort set, mirroring the sheets shipped under `data/`.
pub fn builtin_cohorts() -> Vec<CohortSpec> {
    vec![
        CohortSpec {
            name: "dotcom".into(),
            era: "Dot-com (1996-2000)".into(),
            source: "data/Company-Metric-1996-1997-1998-1999-2000.csv".into(),
            years: vec![1996, 1997, 1998, 1999, 2000],
            peak_years: vec![1999, 2000],
        },
        CohortSpec {
            name: "bigtech_ai".into(),
            era: "Big Tech AI (2020-2025)".into(),
            source: "data/BigTechAI-Metric-2020-2021-2022-2023-2024-2025.csv".into(),
            years: vec![2020, 2021, 2022, 2023, 2024, 2025],
            peak_years: vec![2023, 2024, 2025],
        },
        CohortSpec {
            name: "pure_ai".into(),
            era: "Pure-play AI (2020-2025)".into(),
            source: "data/PureAI-Metric-2020-2021-2022-2023-2024-2025.csv".into(),
            years: vec![2020, 2021, 2022, 2023, 2024, 2025],
            peak_years: vec![2023, 2024, 2025],
        },
    ]
}

/// Load the cohort set: the YAML sequence at `config` when given, the
/// built-in set otherwise. The YAML file replaces the built-ins entirely.
pub fn load_cohorts(config: Option<&Path>) -> Result<Vec<CohortSpec>> {
    let cohorts = match config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading cohort config {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("parsing cohort config {}", path.display()))?
        }
        None => builtin_cohorts(),
    };
    validate(&cohorts)?;
    Ok(cohorts)
}

fn validate(cohorts: &[CohortSpec]) -> Result<()> {
    if cohorts.is_empty() {
        bail!("cohort set is empty");
    }
    for spec in cohorts {
        for &peak in &spec.peak_years {
            if !spec.years.contains(&peak) {
                bail!(
                    "cohort {}: peak year {} is not in the year list",
                    spec.name,
                    peak
                );
            }
        }
    }
    Ok(())
}
