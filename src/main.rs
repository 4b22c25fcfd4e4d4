// src/main.rs

use anyhow::{Context, Result};
use bubblecmp::{
    analysis, chart,
    cohort::{self, CohortSpec},
    export::{self, ExportFormat},
    ingest,
    panel::{self, PanelRow},
    report::{CohortSummary, Report},
};
use clap::Parser;
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Dot-com vs AI era valuation/revenue comparison pipeline"
)]
struct Args {
    /// YAML cohort file replacing the built-in cohort set.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output directory for panels, charts and the run report.
    #[arg(long, default_value = "./output")]
    out: PathBuf,
    /// Panel artifact formats to write.
    #[arg(long, num_args = 1.., value_enum)]
    formats: Option<Vec<ExportFormat>>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    let formats = args.formats.unwrap_or_else(ExportFormat::all);

    // ─── 2) load cohort specs ────────────────────────────────────────
    let cohorts = cohort::load_cohorts(args.config.as_deref())?;
    info!(cohorts = cohorts.len(), "cohort set loaded");

    // ─── 3) create output dirs ───────────────────────────────────────
    let panels_dir = args.out.join("panels");
    let charts_dir = args.out.join("charts");
    for dir in [&panels_dir, &charts_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }

    // ─── 4) build + export one panel per cohort ──────────────────────
    let built: Vec<(CohortSpec, Vec<PanelRow>, Vec<PathBuf>)> = cohorts
        .into_par_iter()
        .map(|spec| {
            let (rows, artifacts) = build_cohort(&spec, &panels_dir, &formats)
                .with_context(|| format!("cohort {}", spec.name))?;
            Ok((spec, rows, artifacts))
        })
        .collect::<Result<_>>()?;

    // ─── 5) combined panel document ──────────────────────────────────
    let panels: Vec<(String, Vec<PanelRow>)> = built
        .iter()
        .map(|(spec, rows, _)| (spec.name.clone(), rows.clone()))
        .collect();
    export::export_combined(&panels_dir.join("panels.json"), &panels)?;

    // ─── 6) charts ───────────────────────────────────────────────────
    let charts = render_charts(&charts_dir, &built)?;

    // ─── 7) run report ───────────────────────────────────────────────
    let summaries = built
        .iter()
        .map(|(spec, rows, artifacts)| {
            CohortSummary::new(&spec.name, &spec.era, rows, artifacts.clone())
        })
        .collect();
    Report::new(summaries, charts.clone()).write(&args.out.join("report.json"))?;

    info!(
        panels = built.len(),
        charts = charts.len(),
        out = %args.out.display(),
        "pipeline finished"
    );
    Ok(())
}

/// Resolve, load, reshape and export one cohort's sheet.
fn build_cohort(
    spec: &CohortSpec,
    panels_dir: &Path,
    formats: &[ExportFormat],
) -> Result<(Vec<PanelRow>, Vec<PathBuf>)> {
    let source = spec.resolve_source()?;
    info!(cohort = %spec.name, source = %source.display(), "loading sheet");

    let table = ingest::load_metric_file(&source)?;
    let rows = panel::build_panel(&table.rows, &spec.years)
        .with_context(|| format!("reshaping {}", source.display()))?;
    info!(cohort = %spec.name, rows = rows.len(), "panel built");

    let artifacts = export::export_panel(panels_dir, &spec.name, &rows, formats)?;
    Ok((rows, artifacts))
}

/// Render the four charts from the assembled panels, returning their paths.
fn render_charts(
    charts_dir: &Path,
    built: &[(CohortSpec, Vec<PanelRow>, Vec<PathBuf>)],
) -> Result<Vec<PathBuf>> {
    let trend: Vec<(String, Vec<(i32, f64)>)> = built
        .iter()
        .map(|(spec, rows, _)| {
            (
                spec.short_era().to_string(),
                analysis::log_mean_ratio_by_year(rows),
            )
        })
        .collect();
    let spread: Vec<(String, Vec<f64>)> = built
        .iter()
        .map(|(spec, rows, _)| {
            (
                format!("{} peak (log)", spec.short_era()),
                analysis::peak_log_ratios(rows, &spec.peak_years),
            )
        })
        .collect();
    let scatter: Vec<(String, Vec<(f64, f64)>)> = built
        .iter()
        .map(|(spec, rows, _)| (spec.era.clone(), analysis::log_scatter_points(rows)))
        .collect();
    let medians: Vec<(String, Option<f64>)> = built
        .iter()
        .map(|(spec, rows, _)| {
            (
                format!("{} peak", spec.short_era()),
                analysis::log_median_peak_ratio(rows, &spec.peak_years),
            )
        })
        .collect();

    let paths = [
        charts_dir.join("ps_trend.png"),
        charts_dir.join("ps_peak_spread.png"),
        charts_dir.join("cap_vs_revenue.png"),
        charts_dir.join("ps_peak_median.png"),
    ];
    chart::render_trend(&paths[0], &trend)?;
    chart::render_peak_spread(&paths[1], &spread)?;
    chart::render_scatter(&paths[2], &scatter)?;
    chart::render_peak_medians(&paths[3], &medians)?;
    Ok(paths.to_vec())
}
