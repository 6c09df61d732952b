//! Integration tests for the sequential pipeline.

use async_trait::async_trait;
use salesbrief_agent::{SequentialPipeline, analyst_stage, writer_stage};
use salesbrief_core::{BriefError, Content, LlmResponse, Part, Result, Tool};
use salesbrief_model::MockLlm;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct FetchStub {
    calls: AtomicUsize,
}

#[async_trait]
impl Tool for FetchStub {
    fn name(&self) -> &str {
        "fetch_all_opportunities"
    }

    fn description(&self) -> &str {
        "Returns a canned opportunity summary."
    }

    async fn execute(&self, _args: Value) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({"summary": "Opportunities with Account Summary:", "records": []}))
    }
}

fn text_reply(text: &str) -> LlmResponse {
    LlmResponse::new(Content::new("assistant").with_text(text))
}

fn tool_call_reply(name: &str, args: Value) -> LlmResponse {
    LlmResponse::new(Content {
        role: "assistant".to_string(),
        parts: vec![Part::FunctionCall {
            name: name.to_string(),
            args,
            id: Some("call_1".to_string()),
        }],
    })
}

#[tokio::test]
async fn writes_both_documents_and_returns_the_final_report() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(
        MockLlm::new("mock")
            .with_response(text_reply("# Analysis\n\nPipeline looks healthy."))
            .with_response(text_reply("# Final Report\n\nAll good.")),
    );

    let pipeline = SequentialPipeline::new(mock, analyst_stage(Vec::new()), writer_stage())
        .with_workdir(dir.path());
    let (report, summary) = pipeline.run("").await.unwrap();

    assert_eq!(report, "# Final Report\n\nAll good.");
    assert_eq!(summary.stages.len(), 2);
    assert_eq!(summary.stages[0].role, "Sales Data Analyst");
    assert_eq!(summary.stages[0].output_file, "pipeline_analysis.md");
    assert_eq!(summary.stages[1].role, "Report Writer");
    assert_eq!(summary.stages[1].output_file, "final_sales_report.md");

    let analysis = std::fs::read_to_string(dir.path().join("pipeline_analysis.md")).unwrap();
    assert_eq!(analysis, "# Analysis\n\nPipeline looks healthy.");
    let final_report = std::fs::read_to_string(dir.path().join("final_sales_report.md")).unwrap();
    assert_eq!(final_report, "# Final Report\n\nAll good.");
}

#[tokio::test]
async fn analyst_document_is_injected_into_the_writer_context() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(
        MockLlm::new("mock")
            .with_response(text_reply("analysis findings"))
            .with_response(text_reply("final")),
    );

    let pipeline =
        SequentialPipeline::new(mock.clone(), analyst_stage(Vec::new()), writer_stage())
            .with_workdir(dir.path());
    pipeline.run("").await.unwrap();

    let writer_task = &mock.requests()[1].contents[1];
    assert!(
        writer_task.text().contains("Context from the previous stage:\n\nanalysis findings")
    );
}

#[tokio::test]
async fn analyst_tools_are_available_and_counted() {
    let dir = tempfile::tempdir().unwrap();
    let fetch = Arc::new(FetchStub { calls: AtomicUsize::new(0) });
    let mock = Arc::new(
        MockLlm::new("mock")
            .with_response(tool_call_reply("fetch_all_opportunities", json!({})))
            .with_response(text_reply("analysis with data"))
            .with_response(text_reply("final report")),
    );

    let pipeline =
        SequentialPipeline::new(mock.clone(), analyst_stage(vec![fetch.clone()]), writer_stage())
            .with_workdir(dir.path());
    let (_, summary) = pipeline.run("").await.unwrap();

    assert_eq!(fetch.calls.load(Ordering::SeqCst), 1);
    assert_eq!(summary.stages[0].model_turns, 2);
    assert_eq!(summary.stages[0].tool_calls, 1);
    assert_eq!(summary.stages[1].tool_calls, 0);
    // The writer carries no tools, so its request advertises none.
    assert!(mock.requests()[2].tools.is_empty());
}

#[tokio::test]
async fn rerun_overwrites_documents_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(
        MockLlm::new("mock")
            .with_response(text_reply("first analysis"))
            .with_response(text_reply("first report"))
            .with_response(text_reply("second analysis"))
            .with_response(text_reply("second report")),
    );

    let pipeline = SequentialPipeline::new(mock, analyst_stage(Vec::new()), writer_stage())
        .with_workdir(dir.path());
    pipeline.run("").await.unwrap();
    pipeline.run("").await.unwrap();

    let report = std::fs::read_to_string(dir.path().join("final_sales_report.md")).unwrap();
    assert_eq!(report, "second report");

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .collect::<std::io::Result<Vec<_>>>()
        .unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn stage_failure_halts_the_run_before_any_document() {
    let dir = tempfile::tempdir().unwrap();
    let mock = Arc::new(MockLlm::new("mock"));

    let pipeline = SequentialPipeline::new(mock, analyst_stage(Vec::new()), writer_stage())
        .with_workdir(dir.path());
    let err = pipeline.run("").await.unwrap_err();

    assert!(matches!(err, BriefError::Model(_)));
    assert!(!dir.path().join("pipeline_analysis.md").exists());
    assert!(!dir.path().join("final_sales_report.md").exists());
}
