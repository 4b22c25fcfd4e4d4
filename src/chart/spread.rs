// src/chart/spread.rs

use anyhow::{bail, Result};
use plotters::data::fitting_range;
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, warn};

use super::style::{self, CAPTION_FONT, CHART_SIZE};

/// One vertical box-and-whisker per era over its peak-window log ratios.
pub fn render_peak_spread(path: &Path, groups: &[(String, Vec<f64>)]) -> Result<()> {
    let boxes: Vec<(usize, &str, Quartiles)> = groups
        .iter()
        .enumerate()
        .filter_map(|(idx, (label, values))| {
            if values.is_empty() {
                warn!(era = %label, "no positive peak ratios, skipping box");
                None
            } else {
                Some((idx, label.as_str(), Quartiles::new(values)))
            }
        })
        .collect();
    if boxes.is_empty() {
        bail!("peak spread chart has no drawable boxes");
    }

    let labels: Vec<&str> = boxes.iter().map(|(_, label, _)| *label).collect();
    let flat: Vec<f32> = boxes
        .iter()
        .flat_map(|(_, _, quartiles)| quartiles.values().to_vec())
        .collect();
    let values_range = fitting_range(flat.iter());

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Log-Normalized P/S Distribution at Bubble Peaks", CAPTION_FONT)
        .margin(16)
        .x_label_area_size(44)
        .y_label_area_size(64)
        .build_cartesian_2d(
            labels[..].into_segmented(),
            values_range.start - 0.5..values_range.end + 0.5,
        )?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .y_desc("log(Valuation / Revenue)")
        .draw()?;

    for (era_idx, label, quartiles) in &boxes {
        chart.draw_series(std::iter::once(
            Boxplot::new_vertical(SegmentValue::CenterOf(label), quartiles)
                .width(36)
                .whisker_width(0.5)
                .style(style::era_color(*era_idx)),
        ))?;
    }

    root.present()?;
    info!(chart = %path.display(), "chart written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_peak_spread_writes_a_png() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("spread.png");
        let groups = vec![
            ("Dot-com".to_string(), vec![2.3, 2.8, 4.1, 5.0, 5.7, 6.5]),
            ("Big Tech AI".to_string(), vec![1.2, 1.9, 2.5, 3.2]),
            ("Hollow".to_string(), Vec::new()),
        ];

        render_peak_spread(&path, &groups)?;
        assert!(path.is_file());
        assert!(path.metadata()?.len() > 0);
        Ok(())
    }

    #[test]
    fn test_render_peak_spread_with_nothing_to_draw_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spread.png");
        assert!(render_peak_spread(&path, &[("Hollow".to_string(), Vec::new())]).is_err());
    }
}
