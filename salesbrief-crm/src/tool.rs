//! The opportunity fetch tool exposed to the analyst stage.

use crate::client::CrmClient;
use crate::records::{OPPORTUNITY_QUERY, format_summary};
use async_trait::async_trait;
use salesbrief_core::{Result, Tool};
use serde_json::{Value, json};
use std::sync::Arc;

/// Tool name as declared to the model.
pub const FETCH_TOOL_NAME: &str = "fetch_all_opportunities_with_account";

/// Fetches all opportunities from Salesforce and returns a summary plus the
/// raw records.
///
/// Transport and query failures never surface as tool errors: they are
/// folded into the summary text, so the stage sees them as ordinary output.
pub struct FetchOpportunitiesTool {
    client: Arc<CrmClient>,
}

impl FetchOpportunitiesTool {
    pub fn new(client: Arc<CrmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for FetchOpportunitiesTool {
    fn name(&self) -> &str {
        FETCH_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Fetches all opportunities from Salesforce, including Account information, and returns \
         a formatted summary along with the raw records for further charting."
    }

    async fn execute(&self, _args: Value) -> Result<Value> {
        match self.client.query_all(OPPORTUNITY_QUERY).await {
            Ok(result) => {
                tracing::info!(records = result.records.len(), "fetched opportunities");
                Ok(json!({
                    "summary": format_summary(&result.records),
                    "records": result.records,
                }))
            }
            Err(e) => {
                tracing::warn!(error = %e, "opportunity fetch failed");
                Ok(json!({
                    "summary": format!(
                        "Error fetching opportunities with account information: {}", e
                    ),
                    "records": [],
                }))
            }
        }
    }
}
