//! Stage definitions for the report pipeline.
//!
//! A [`Stage`] bundles a persona with a task: who the model should act as,
//! what it must produce, and which tools it may call while doing so. The two
//! shipped stages mirror the product configuration: a sales data analyst that
//! fetches and charts opportunity data, and a report writer that turns the
//! analysis into the final document.

use salesbrief_core::Tool;
use std::sync::Arc;

/// Document written by the analyst stage.
pub const ANALYSIS_FILE: &str = "pipeline_analysis.md";

/// Document written by the writer stage.
pub const REPORT_FILE: &str = "final_sales_report.md";

/// One unit of pipeline work: a persona, a task, and the tools available
/// while working on it.
pub struct Stage {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub description: String,
    pub expected_output: String,
    pub tools: Vec<Arc<dyn Tool>>,
    pub output_file: String,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("role", &self.role)
            .field("output_file", &self.output_file)
            .field("tools_count", &self.tools.len())
            .finish()
    }
}

impl Stage {
    /// Persona prompt sent as the conversation's system message.
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {role}. {backstory}\n\nYour goal: {goal}",
            role = self.role,
            backstory = self.backstory,
            goal = self.goal,
        )
    }

    /// Task prompt sent as the opening user message. `request` is the
    /// kickoff text; `context` carries the previous stage's document when
    /// there is one.
    pub fn task_prompt(&self, request: &str, context: Option<&str>) -> String {
        let mut prompt = self.description.clone();
        if !request.is_empty() {
            prompt.push_str("\n\nAdditional request: ");
            prompt.push_str(request);
        }
        if let Some(context) = context {
            prompt.push_str("\n\nContext from the previous stage:\n\n");
            prompt.push_str(context);
        }
        prompt.push_str("\n\nExpected output: ");
        prompt.push_str(&self.expected_output);
        prompt
    }
}

/// The analyst persona: fetches opportunity data, generates the charts, and
/// writes the analysis document the writer stage builds on.
pub fn analyst_stage(tools: Vec<Arc<dyn Tool>>) -> Stage {
    Stage {
        role: "Sales Data Analyst".to_string(),
        goal: "Analyze Salesforce opportunities and visualize data across the entire sales \
               pipeline"
            .to_string(),
        backstory: "Equipped with analytical skills and a knack for visualization, you delve into \
                    Salesforce data to draw out key insights across the entire sales pipeline. \
                    Through meticulous analysis and chart plotting, you transform raw data into \
                    visual stories that highlight overall trends and opportunities, setting the \
                    stage for strategic decisions."
            .to_string(),
        description: "Extract Salesforce opportunities, analyze the data, and create \
                      visualizations that cover the entire sales pipeline. Summarize your \
                      findings and include generated charts in a Markdown document, providing a \
                      foundation for the comprehensive sales performance report."
            .to_string(),
        expected_output: "A Markdown document with analysis and charts covering the entire sales \
                          pipeline."
            .to_string(),
        tools,
        output_file: ANALYSIS_FILE.to_string(),
    }
}

/// The writer persona: compiles the analyst's document into the final sales
/// performance report. Carries no tools.
pub fn writer_stage() -> Stage {
    Stage {
        role: "Report Writer".to_string(),
        goal: "Compile analysis and charts into a comprehensive sales performance report"
            .to_string(),
        backstory: "With a flair for synthesis and narrative, you adeptly combine analytical \
                    insights and visualizations into compelling reports. Your work not only \
                    informs but also engages stakeholders, making complex data accessible and \
                    actionable for the entire sales department."
            .to_string(),
        description: "Using the provided analysis and charts, craft a detailed sales performance \
                      report that encompasses the entire sales pipeline. Ensure the report is \
                      comprehensive, integrating both textual analysis and visual data \
                      representations. Compile the final report into a Markdown document."
            .to_string(),
        expected_output: "A comprehensive sales performance report in Markdown format, with \
                          embedded charts."
            .to_string(),
        tools: Vec::new(),
        output_file: REPORT_FILE.to_string(),
    }
}
