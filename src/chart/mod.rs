// src/chart/mod.rs
//
// The four chart renderers. Each takes already-aggregated data from the
// analysis module and writes one PNG; a chart with nothing to draw is a hard
// error, an era with nothing to draw within an otherwise viable chart is
// skipped with a warning.

pub mod median;
pub mod scatter;
pub mod spread;
pub mod style;
pub mod trend;

pub use median::render_peak_medians;
pub use scatter::render_scatter;
pub use spread::render_peak_spread;
pub use trend::render_trend;

/// Vertical axis bounds with a proportional margin around the drawn data.
/// A degenerate (single-value) range is widened to one unit either side.
pub(crate) fn padded_range(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span <= f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min - span * 0.1, max + span * 0.1)
    }
}
