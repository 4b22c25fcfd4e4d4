// src/chart/scatter.rs

use anyhow::{bail, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, warn};

use super::padded_range;
use super::style::{self, EraMarker, CAPTION_FONT, CHART_SIZE};

/// Log-log market cap vs revenue, all cohorts on one plane, one marker shape
/// and color per era. Points are `(ln revenue, ln market cap)` pairs.
pub fn render_scatter(path: &Path, series: &[(String, Vec<(f64, f64)>)]) -> Result<()> {
    let drawable: Vec<(usize, &str, &[(f64, f64)])> = series
        .iter()
        .enumerate()
        .filter_map(|(idx, (label, points))| {
            if points.is_empty() {
                warn!(era = %label, "no positive cap/revenue pairs, skipping scatter series");
                None
            } else {
                Some((idx, label.as_str(), points.as_slice()))
            }
        })
        .collect();
    if drawable.is_empty() {
        bail!("scatter chart has no drawable series");
    }

    let xs = drawable.iter().flat_map(|(_, _, pts)| pts.iter().map(|p| p.0));
    let (x_min, x_max) = padded_range(
        xs.clone().fold(f64::INFINITY, f64::min),
        xs.fold(f64::NEG_INFINITY, f64::max),
    );
    let ys = drawable.iter().flat_map(|(_, _, pts)| pts.iter().map(|p| p.1));
    let (y_min, y_max) = padded_range(
        ys.clone().fold(f64::INFINITY, f64::min),
        ys.fold(f64::NEG_INFINITY, f64::max),
    );

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Log-Log Market Cap vs Revenue: Dot-com vs AI Cohorts", CAPTION_FONT)
        .margin(16)
        .x_label_area_size(44)
        .y_label_area_size(64)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc("log(Revenue)")
        .y_desc("log(Market Cap)")
        .draw()?;

    for (era_idx, label, points) in &drawable {
        let color = style::era_color(*era_idx);
        let marker = style::era_marker(*era_idx);
        let series = chart.draw_series(points.iter().map(|&(x, y)| {
            let pos = (x, y);
            match marker {
                EraMarker::Cross => {
                    Cross::new(pos, 5, color.stroke_width(2)).into_dyn()
                }
                EraMarker::Circle => Circle::new(pos, 5, color.filled()).into_dyn(),
                EraMarker::Triangle => {
                    TriangleMarker::new(pos, 6, color.filled()).into_dyn()
                }
            }
        }))?;
        series.label(*label).legend(move |(x, y)| match marker {
            EraMarker::Cross => Cross::new((x + 9, y), 5, color.stroke_width(2)).into_dyn(),
            EraMarker::Circle => Circle::new((x + 9, y), 5, color.filled()).into_dyn(),
            EraMarker::Triangle => TriangleMarker::new((x + 9, y), 6, color.filled()).into_dyn(),
        });
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_scatter_writes_a_png() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("scatter.png");
        let series = vec![
            ("Dot-com".to_string(), vec![(0.5, 3.2), (1.8, 4.4), (2.5, 5.9)]),
            ("Big Tech AI".to_string(), vec![(5.1, 7.9), (5.8, 8.3)]),
            ("Pure-play AI".to_string(), vec![(0.1, 2.0)]),
        ];

        render_scatter(&path, &series)?;
        assert!(path.is_file());
        assert!(path.metadata()?.len() > 0);
        Ok(())
    }

    #[test]
    fn test_render_scatter_with_nothing_to_draw_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scatter.png");
        assert!(render_scatter(&path, &[("Hollow".to_string(), Vec::new())]).is_err());
    }
}
