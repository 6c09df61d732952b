//! Sequential orchestration of the analyst and writer stages.

use crate::runner::{StageOutcome, StageRunner};
use crate::stage::Stage;
use salesbrief_core::{Llm, Result};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Per-stage numbers reported after a run.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub role: String,
    pub output_file: String,
    pub model_turns: usize,
    pub tool_calls: usize,
}

/// Summary of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: String,
    pub stages: Vec<StageReport>,
}

/// Runs the analyst stage, writes its document, then runs the writer stage
/// with that document as context and writes the final report. Strictly
/// sequential; a stage failure halts the run.
pub struct SequentialPipeline {
    runner: StageRunner,
    analyst: Stage,
    writer: Stage,
    workdir: PathBuf,
}

impl SequentialPipeline {
    pub fn new(model: Arc<dyn Llm>, analyst: Stage, writer: Stage) -> Self {
        Self { runner: StageRunner::new(model), analyst, writer, workdir: PathBuf::new() }
    }

    /// Write stage documents under `workdir` instead of the process working
    /// directory.
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.runner = self.runner.with_max_turns(max_turns);
        self
    }

    /// Run both stages in order. Returns the final report document and the
    /// run summary. Documents land at fixed file names, so reruns overwrite.
    pub async fn run(&self, request: &str) -> Result<(String, RunSummary)> {
        let run_id = Uuid::new_v4().to_string();
        tracing::info!(run_id = %run_id, "starting report pipeline");

        let analysis = self.runner.run(&self.analyst, request, None).await?;
        self.write_document(&self.analyst.output_file, &analysis.document)?;

        let report = self.runner.run(&self.writer, request, Some(&analysis.document)).await?;
        self.write_document(&self.writer.output_file, &report.document)?;

        let summary = RunSummary {
            run_id,
            stages: vec![
                stage_report(&self.analyst, &analysis),
                stage_report(&self.writer, &report),
            ],
        };
        tracing::info!(run_id = %summary.run_id, "report pipeline finished");
        Ok((report.document, summary))
    }

    fn write_document(&self, file: &str, document: &str) -> Result<()> {
        let path = self.workdir.join(file);
        std::fs::write(&path, document)?;
        tracing::info!(path = %path.display(), bytes = document.len(), "wrote stage document");
        Ok(())
    }
}

fn stage_report(stage: &Stage, outcome: &StageOutcome) -> StageReport {
    StageReport {
        role: stage.role.clone(),
        output_file: stage.output_file.clone(),
        model_turns: outcome.model_turns,
        tool_calls: outcome.tool_calls,
    }
}
