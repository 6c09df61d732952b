//! Tool wrapper exposing chart generation to the model.

use crate::dataset::{ChartRecord, clean_records};
use crate::render::render_charts;
use async_trait::async_trait;
use salesbrief_core::{BriefError, Result, Tool};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Tool name advertised to the model.
pub const CHART_TOOL_NAME: &str = "plot_opportunity_graphs";

/// Placeholder returned when no record survives cleaning.
pub const NO_CHART_DATA: &str = "No valid opportunities data available for chart generation.";

/// Turns raw opportunity records into the two sales performance charts.
///
/// Charts land under [`crate::render::CHART_DIR`] inside `base_dir`; the
/// default base is the process working directory.
#[derive(Debug, Clone, Default)]
pub struct PlotOpportunityChartsTool {
    base_dir: PathBuf,
}

impl PlotOpportunityChartsTool {
    pub fn new() -> Self {
        Self { base_dir: PathBuf::new() }
    }

    /// Anchor chart output below `base_dir` instead of the process working
    /// directory.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }
}

#[async_trait]
impl Tool for PlotOpportunityChartsTool {
    fn name(&self) -> &str {
        CHART_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Generates and saves comprehensive sales performance charts from opportunities data, \
         covering total sales over time and opportunity stage distribution."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(json!({
            "type": "object",
            "properties": {
                "opportunities": {
                    "type": "array",
                    "description": "Opportunity records to chart, as returned by the fetch tool.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "Amount": {"type": ["number", "null"]},
                            "StageName": {"type": ["string", "null"]},
                            "CloseDate": {"type": ["string", "null"]}
                        }
                    }
                }
            },
            "required": ["opportunities"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let raw = args.get("opportunities").cloned().unwrap_or_else(|| Value::Array(Vec::new()));
        let records: Vec<ChartRecord> = serde_json::from_value(raw)
            .map_err(|e| BriefError::Tool(format!("invalid opportunities payload: {e}")))?;

        let cleaned = clean_records(&records);
        if cleaned.is_empty() {
            tracing::info!("no chartable records, skipping chart generation");
            return Ok(json!([NO_CHART_DATA]));
        }

        let paths = render_charts(&self.base_dir, &cleaned)?;
        let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        tracing::info!(charts = paths.len(), "rendered sales performance charts");
        Ok(json!(paths))
    }
}
