// src/bin/inspect_panel.rs
//
// Data-wrangling aid: load one metric sheet, reshape it, and print the tidy
// rows as an aligned table with a per-metric null summary. Not part of the
// pipeline.

use anyhow::{Context, Result};
use bubblecmp::{cohort, ingest, panel};
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Print one metric sheet as a tidy panel")]
struct Args {
    /// Path or glob pattern of the sheet to inspect.
    sheet: String,
    /// Years to extract; derived from the file name when omitted.
    #[arg(long, num_args = 1..)]
    years: Option<Vec<i32>>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let path = cohort::resolve_pattern(&args.sheet)?;
    let years = match args.years {
        Some(years) => years,
        None => ingest::years_from_filename(&path).with_context(|| {
            format!(
                "{} carries no year tokens; pass --years explicitly",
                path.display()
            )
        })?,
    };

    let table = ingest::load_metric_file(&path)?;
    let rows = panel::build_panel(&table.rows, &years)?;

    println!("=== {} ===", path.display());
    println!(
        "{} year columns in sheet, {} extracted, {} tidy rows",
        table.year_columns.len(),
        years.len(),
        rows.len()
    );
    println!();

    println!(
        "{:<20} {:>6} {:>14} {:>12} {:>10}",
        "Company", "Year", "MarketCap", "Revenue", "ValRev"
    );
    for row in &rows {
        println!(
            "{:<20} {:>6} {:>14} {:>12} {:>10}",
            row.company,
            row.year,
            cell(row.market_cap),
            cell(row.revenue),
            cell(row.val_rev),
        );
    }

    println!();
    println!("Null cells:");
    for (label, count) in [
        ("MarketCap", rows.iter().filter(|r| r.market_cap.is_none()).count()),
        ("Revenue", rows.iter().filter(|r| r.revenue.is_none()).count()),
        ("ValRev", rows.iter().filter(|r| r.val_rev.is_none()).count()),
    ] {
        println!("- {:<10} {:>4} of {}", label, count, rows.len());
    }
    Ok(())
}

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}
