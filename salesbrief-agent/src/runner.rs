//! The model conversation loop that drives one stage to completion.

use crate::stage::Stage;
use salesbrief_core::{
    BriefError, Content, FunctionResponseData, Llm, LlmRequest, Part, Result,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Default bound on model turns per stage.
pub const DEFAULT_MAX_TURNS: usize = 10;

/// What a completed stage produced.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    /// The document the stage ended with (the model's final text reply).
    pub document: String,
    /// Model turns consumed.
    pub model_turns: usize,
    /// Tool invocations made across all turns.
    pub tool_calls: usize,
}

/// Executes a [`Stage`] against a model: sends the persona and task, lets the
/// model call the stage's tools until it answers with plain text, and returns
/// that text as the stage document.
pub struct StageRunner {
    model: Arc<dyn Llm>,
    max_turns: usize,
}

impl StageRunner {
    pub fn new(model: Arc<dyn Llm>) -> Self {
        Self { model, max_turns: DEFAULT_MAX_TURNS }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Run `stage` until the model replies without tool calls. `request` is
    /// the kickoff text; `context` carries the previous stage's document.
    #[tracing::instrument(skip(self, stage, request, context), fields(stage.role = %stage.role))]
    pub async fn run(
        &self,
        stage: &Stage,
        request: &str,
        context: Option<&str>,
    ) -> Result<StageOutcome> {
        let mut conversation = vec![
            Content::new("system").with_text(stage.system_prompt()),
            Content::new("user").with_text(stage.task_prompt(request, context)),
        ];

        let mut declarations = HashMap::new();
        for tool in &stage.tools {
            let mut decl = json!({
                "name": tool.name(),
                "description": tool.description(),
            });
            if let Some(params) = tool.parameters_schema() {
                decl["parameters"] = params;
            }
            declarations.insert(tool.name().to_string(), decl);
        }

        let mut model_turns = 0;
        let mut tool_calls = 0;

        loop {
            model_turns += 1;
            if model_turns > self.max_turns {
                return Err(BriefError::Stage(format!(
                    "stage '{}' exceeded {} model turns",
                    stage.role, self.max_turns
                )));
            }

            let mut llm_request = LlmRequest::new(self.model.name(), conversation.clone());
            llm_request.tools = declarations.clone();

            tracing::debug!(turn = model_turns, "requesting model turn");
            let response = self.model.generate_content(llm_request).await?;
            let content = response.content.ok_or_else(|| {
                BriefError::Stage(format!("stage '{}' received an empty model reply", stage.role))
            })?;

            let calls: Vec<(String, serde_json::Value, Option<String>)> = content
                .parts
                .iter()
                .filter_map(|part| match part {
                    Part::FunctionCall { name, args, id } => {
                        Some((name.clone(), args.clone(), id.clone()))
                    }
                    _ => None,
                })
                .collect();

            conversation.push(content.clone());

            if calls.is_empty() {
                tracing::info!(turns = model_turns, tool_calls, "stage complete");
                return Ok(StageOutcome { document: content.text(), model_turns, tool_calls });
            }

            for (name, args, id) in calls {
                tool_calls += 1;
                let result = match stage.tools.iter().find(|t| t.name() == name) {
                    Some(tool) => {
                        tracing::info!(tool = %name, "executing tool");
                        match tool.execute(args).await {
                            Ok(value) => value,
                            Err(e) => {
                                tracing::warn!(tool = %name, error = %e, "tool failed");
                                json!({ "error": e.to_string() })
                            }
                        }
                    }
                    None => json!({ "error": format!("Tool {} not found", name) }),
                };

                conversation.push(Content {
                    role: "function".to_string(),
                    parts: vec![Part::FunctionResponse {
                        function_response: FunctionResponseData { name, response: result },
                        id,
                    }],
                });
            }
        }
    }
}
