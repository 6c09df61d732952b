//! # Salesbrief Charts
//!
//! Sales performance chart generation:
//!
//! - Cleaning and aggregation of raw opportunity records
//! - PNG rendering with `plotters` (monthly sales line, stage pie)
//! - The `plot_opportunity_graphs` tool the report pipeline calls

pub mod dataset;
pub mod render;
pub mod tool;

pub use dataset::{ChartRecord, CleanRecord, clean_records, monthly_totals, stage_counts};
pub use render::{CHART_DIR, SALES_OVER_TIME_FILE, STAGE_DISTRIBUTION_FILE, render_charts};
pub use tool::{CHART_TOOL_NAME, NO_CHART_DATA, PlotOpportunityChartsTool};
