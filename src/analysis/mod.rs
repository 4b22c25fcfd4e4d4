// src/analysis/mod.rs
//
// Aggregations over tidy panels. Everything here treats a null metric field
// as an absent observation and applies the same numeric guard before any
// logarithm: drop nulls, drop values that are not strictly positive, then ln.

use std::collections::BTreeMap;

use crate::panel::PanelRow;

/// The shared numeric guard: drop nulls, drop non-positive values, take the
/// natural logarithm. Input order is preserved.
pub fn safe_log(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|v| *v)
        .filter(|v| *v > 0.0)
        .map(f64::ln)
        .collect()
}

/// Per-year mean of the non-null ratios, log scale. Years with no
/// observation and years whose mean is not strictly positive are dropped;
/// the result is sorted by year ascending.
pub fn log_mean_ratio_by_year(rows: &[PanelRow]) -> Vec<(i32, f64)> {
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for row in rows {
        if let Some(ratio) = row.val_rev {
            by_year.entry(row.year).or_default().push(ratio);
        }
    }

    by_year
        .into_iter()
        .map(|(year, ratios)| (year, ratios.iter().sum::<f64>() / ratios.len() as f64))
        .filter(|&(_, mean)| mean > 0.0)
        .map(|(year, mean)| (year, mean.ln()))
        .collect()
}

/// Ratios of the rows inside the peak window, passed through [`safe_log`].
pub fn peak_log_ratios(rows: &[PanelRow], peak_years: &[i32]) -> Vec<f64> {
    let ratios: Vec<Option<f64>> = rows
        .iter()
        .filter(|row| peak_years.contains(&row.year))
        .map(|row| row.val_rev)
        .collect();
    safe_log(&ratios)
}

/// Natural log of the median positive ratio inside the peak window, `None`
/// when no qualifying observation exists. Median uses the midpoint
/// convention for even counts, and the logarithm is taken of the median
/// (not the median of the logarithms).
pub fn log_median_peak_ratio(rows: &[PanelRow], peak_years: &[i32]) -> Option<f64> {
    let mut ratios: Vec<f64> = rows
        .iter()
        .filter(|row| peak_years.contains(&row.year))
        .filter_map(|row| row.val_rev)
        .filter(|v| *v > 0.0)
        .collect();

    if ratios.is_empty() {
        return None;
    }
    ratios.sort_by(|a, b| a.total_cmp(b));

    let mid = ratios.len() / 2;
    let median = if ratios.len() % 2 == 0 {
        (ratios[mid - 1] + ratios[mid]) / 2.0
    } else {
        ratios[mid]
    };
    Some(median.ln())
}

/// Log-log scatter pairs `(ln revenue, ln market cap)` for rows where both
/// metrics are present and strictly positive.
pub fn log_scatter_points(rows: &[PanelRow]) -> Vec<(f64, f64)> {
    rows.iter()
        .filter_map(|row| match (row.revenue, row.market_cap) {
            (Some(revenue), Some(cap)) if revenue > 0.0 && cap > 0.0 => {
                Some((revenue.ln(), cap.ln()))
            }
            _ => None,
        })
        .collect()
}
