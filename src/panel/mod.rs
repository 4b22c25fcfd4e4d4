pub mod build;
pub mod types;

pub use build::{build_panel, PanelError, BLOCK_ROWS};
pub use types::{MetricRow, PanelRow, MARKET_CAP_METRIC, REVENUE_METRIC, VAL_REV_METRIC};
