// src/chart/median.rs

use anyhow::{bail, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, warn};

use super::padded_range;
use super::style::{self, CAPTION_FONT, CHART_SIZE};

/// One bar per era of the log median peak valuation/revenue. Eras with a
/// null median are skipped.
pub fn render_peak_medians(path: &Path, medians: &[(String, Option<f64>)]) -> Result<()> {
    let bars: Vec<(usize, &str, f64)> = medians
        .iter()
        .enumerate()
        .filter_map(|(idx, (label, median))| match median {
            Some(value) => Some((idx, label.as_str(), *value)),
            None => {
                warn!(era = %label, "no positive peak ratios, skipping median bar");
                None
            }
        })
        .collect();
    if bars.is_empty() {
        bail!("peak median chart has no drawable bars");
    }

    // Bars grow from the zero baseline, so keep it inside the axis range.
    let values = bars.iter().map(|&(_, _, v)| v);
    let (y_min, y_max) = padded_range(
        values.clone().fold(0.0f64, f64::min),
        values.fold(0.0f64, f64::max),
    );
    let labels: Vec<&str> = bars.iter().map(|&(_, label, _)| label).collect();

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("LOG Median Valuation/Revenue Across Eras", CAPTION_FONT)
        .margin(16)
        .x_label_area_size(44)
        .y_label_area_size(64)
        .build_cartesian_2d(0i32..bars.len() as i32, y_min..y_max)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&|x| {
            labels
                .get(*x as usize)
                .map(|l| l.to_string())
                .unwrap_or_default()
        })
        .y_desc("log(Median Valuation / Revenue)")
        .draw()?;

    for (slot, (era_idx, _, value)) in bars.iter().enumerate() {
        let x = slot as i32;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x, 0.0), (x + 1, *value)],
            style::era_color(*era_idx).filled(),
        )))?;
    }

    root.present()?;
    info!(chart = %path.display(), "chart written");
    Ok(())
}
