//! The `run` command: wire the model, tools, and stages, then execute.

use crate::cli::RunArgs;
use anyhow::{Context, Result};
use salesbrief_agent::{SequentialPipeline, analyst_stage, writer_stage};
use salesbrief_charts::{CHART_TOOL_NAME, PlotOpportunityChartsTool};
use salesbrief_core::{Content, Llm, LlmResponse, Part, Tool};
use salesbrief_crm::{CrmClient, CrmConfig, FetchOpportunitiesTool};
use salesbrief_model::{MockLlm, OpenAIClient, OpenAIConfig};
use serde_json::json;
use std::sync::Arc;

pub async fn execute(args: RunArgs) -> Result<()> {
    std::fs::create_dir_all(&args.workdir)
        .with_context(|| format!("failed to create workdir {}", args.workdir.display()))?;
    std::env::set_current_dir(&args.workdir)
        .with_context(|| format!("failed to enter workdir {}", args.workdir.display()))?;

    let (model, tools): (Arc<dyn Llm>, Vec<Arc<dyn Tool>>) = if args.offline {
        tracing::info!("running offline with the scripted demo model");
        (Arc::new(offline_model()), vec![Arc::new(PlotOpportunityChartsTool::new())])
    } else {
        let crm = Arc::new(CrmClient::connect(CrmConfig::from_env()?).await?);
        (
            Arc::new(online_model()?),
            vec![
                Arc::new(FetchOpportunitiesTool::new(crm)),
                Arc::new(PlotOpportunityChartsTool::new()),
            ],
        )
    };

    let pipeline = SequentialPipeline::new(model, analyst_stage(tools), writer_stage());
    let (report, summary) = pipeline.run(&args.request).await?;

    for stage in &summary.stages {
        tracing::info!(
            role = %stage.role,
            output_file = %stage.output_file,
            model_turns = stage.model_turns,
            tool_calls = stage.tool_calls,
            "stage finished"
        );
    }

    println!("{report}");
    Ok(())
}

fn online_model() -> Result<OpenAIClient> {
    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
    let model = std::env::var("SALESBRIEF_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
    let mut config = OpenAIConfig::new(api_key, model);
    if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    Ok(OpenAIClient::new(config)?)
}

/// Scripted demo run: the analyst charts a small fixed dataset, then both
/// stages answer with canned documents. No credentials required.
fn offline_model() -> MockLlm {
    let records = json!([
        {"Amount": 4200.0, "StageName": "Closed Won", "CloseDate": "2024-01-18"},
        {"Amount": 1800.0, "StageName": "Prospecting", "CloseDate": "2024-02-02"},
        {"Amount": 3500.0, "StageName": "Negotiation", "CloseDate": "2024-02-21"},
        {"Amount": 2600.0, "StageName": "Closed Won", "CloseDate": "2024-03-09"}
    ]);

    MockLlm::new("offline-demo")
        .with_response(LlmResponse::new(Content {
            role: "assistant".to_string(),
            parts: vec![Part::FunctionCall {
                name: CHART_TOOL_NAME.to_string(),
                args: json!({"opportunities": records}),
                id: None,
            }],
        }))
        .with_response(LlmResponse::new(Content::new("assistant").with_text(OFFLINE_ANALYSIS)))
        .with_response(LlmResponse::new(Content::new("assistant").with_text(OFFLINE_REPORT)))
}

const OFFLINE_ANALYSIS: &str = r#"# Sales Pipeline Analysis

Four opportunities are tracked across January, February and March. Closed
Won business totals 6,800 while 5,300 remains open in Prospecting and
Negotiation.

![Total Sales Over Time](charts_sales_performance/total_sales_over_time.png)

![Opportunity Stage Distribution](charts_sales_performance/opportunity_stage_distribution.png)
"#;

const OFFLINE_REPORT: &str = r#"# Sales Performance Report

## Overview

The pipeline holds four opportunities worth 12,100 in total. Monthly sales
peak in February at 5,300, driven by two mid-size deals.

## Stage Distribution

Closed Won accounts for half of the pipeline by count, with the remainder
split evenly between Prospecting and Negotiation.

![Total Sales Over Time](charts_sales_performance/total_sales_over_time.png)

![Opportunity Stage Distribution](charts_sales_performance/opportunity_stage_distribution.png)
"#;
