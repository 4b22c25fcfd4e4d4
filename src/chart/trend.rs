// src/chart/trend.rs

use anyhow::{bail, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, warn};

use super::padded_range;
use super::style::{self, CAPTION_FONT, CHART_SIZE};

/// Log mean valuation/revenue per year, one line + point markers per era.
pub fn render_trend(path: &Path, series: &[(String, Vec<(i32, f64)>)]) -> Result<()> {
    let drawable: Vec<(usize, &str, &[(i32, f64)])> = series
        .iter()
        .enumerate()
        .filter_map(|(idx, (label, points))| {
            if points.is_empty() {
                warn!(era = %label, "no positive mean ratios, skipping trend line");
                None
            } else {
                Some((idx, label.as_str(), points.as_slice()))
            }
        })
        .collect();
    if drawable.is_empty() {
        bail!("trend chart has no drawable series");
    }

    let years = drawable.iter().flat_map(|(_, _, pts)| pts.iter().map(|p| p.0));
    let mut x_min = years.clone().min().unwrap_or(0);
    let mut x_max = years.max().unwrap_or(0);
    if x_min == x_max {
        x_min -= 1;
        x_max += 1;
    }
    let values = drawable.iter().flat_map(|(_, _, pts)| pts.iter().map(|p| p.1));
    let (y_min, y_max) = padded_range(
        values.clone().fold(f64::INFINITY, f64::min),
        values.fold(f64::NEG_INFINITY, f64::max),
    );

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("LOG Normalised Average Valuation/Revenue by Era", CAPTION_FONT)
        .margin(16)
        .x_label_area_size(44)
        .y_label_area_size(64)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("log(Valuation / Revenue)")
        .draw()?;

    for (era_idx, label, points) in &drawable {
        let color = style::era_color(*era_idx);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(2)))?
            .label(*label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.85))
        .draw()?;
    root.present()?;
    info!(chart = %path.display(), "chart written");
    Ok(())
}
