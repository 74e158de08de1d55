//! AI tool proxy: one POST endpoint dispatching on the `tool` name.
//! Each tool builds a prompt, makes a single LLM call, and salvages JSON
//! out of the reply; unparseable replies degrade to a fixed fallback
//! object rather than an error.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::extract_json_object;
use crate::state::AppState;
use crate::tools::prompts::{
    OPTIMIZER_PROMPT_TEMPLATE, OPTIMIZER_SYSTEM, RECOMMENDER_PROMPT_TEMPLATE, RECOMMENDER_SYSTEM,
    WORKFLOW_PROMPT_TEMPLATE, WORKFLOW_SYSTEM,
};

/// Request envelope. The original clients sent the payload under either
/// `data` or `request`; both are accepted.
#[derive(Debug, Deserialize)]
pub struct ToolRequest {
    pub tool: Option<String>,
    pub data: Option<Value>,
    pub request: Option<Value>,
    #[allow(dead_code)]
    pub config: Option<Value>,
}

/// POST /api/ai-tools
pub async fn handle_ai_tools(
    State(state): State<AppState>,
    Json(req): Json<ToolRequest>,
) -> Result<Json<Value>, AppError> {
    let tool = req
        .tool
        .as_deref()
        .ok_or_else(|| AppError::Validation("Missing required field: tool".to_string()))?;
    let payload = req.data.or(req.request).unwrap_or(Value::Null);

    let result = match tool {
        "workflow-builder" => workflow_builder(&state, &payload).await?,
        "prompt-optimizer" => prompt_optimizer(&state, &payload).await?,
        "tool-recommender" => tool_recommender(&state, &payload).await?,
        other => {
            return Err(AppError::Validation(format!("Unknown tool: {other}")));
        }
    };
    Ok(Json(result))
}

fn payload_str<'a>(payload: &'a Value, key: &str) -> &'a str {
    payload.get(key).and_then(Value::as_str).unwrap_or("")
}

async fn workflow_builder(state: &AppState, payload: &Value) -> Result<Value, AppError> {
    let description = payload_str(payload, "description");
    let prompt = WORKFLOW_PROMPT_TEMPLATE.replace("{description}", description);
    let reply = state
        .llm
        .call_text(&prompt, WORKFLOW_SYSTEM)
        .await
        .map_err(|e| AppError::llm(e, state.config.is_development()))?;
    Ok(workflow_from_reply(&reply))
}

/// Salvages a workflow object from the reply; falls back to the fixed
/// three-node chain when nothing usable comes back.
pub fn workflow_from_reply(reply: &str) -> Value {
    if let Some(value) = extract_json_object(reply) {
        let has_nodes = value
            .get("workflow")
            .and_then(|w| w.get("nodes"))
            .and_then(Value::as_array)
            .is_some_and(|nodes| !nodes.is_empty());
        if has_nodes {
            return value;
        }
    }
    warn!("workflow-builder reply had no usable JSON; serving fallback");
    fallback_workflow()
}

pub fn fallback_workflow() -> Value {
    json!({
        "workflow": {
            "name": "Generated Workflow",
            "nodes": [
                {"id": "input-1", "type": "input", "label": "User Input"},
                {"id": "process-1", "type": "process", "label": "Process with AI"},
                {"id": "output-1", "type": "output", "label": "Result"}
            ],
            "connections": [
                {"from": "input-1", "to": "process-1"},
                {"from": "process-1", "to": "output-1"}
            ]
        }
    })
}

async fn prompt_optimizer(state: &AppState, payload: &Value) -> Result<Value, AppError> {
    let original = payload_str(payload, "prompt");
    let goal = payload_str(payload, "goal");
    let prompt = OPTIMIZER_PROMPT_TEMPLATE
        .replace("{prompt}", original)
        .replace("{goal}", goal);
    let reply = state
        .llm
        .call_text(&prompt, OPTIMIZER_SYSTEM)
        .await
        .map_err(|e| AppError::llm(e, state.config.is_development()))?;
    Ok(optimizer_from_reply(&reply, original))
}

pub fn optimizer_from_reply(reply: &str, original: &str) -> Value {
    if let Some(value) = extract_json_object(reply) {
        if value.get("optimizedPrompt").and_then(Value::as_str).is_some() {
            return value;
        }
    }
    warn!("prompt-optimizer reply had no usable JSON; serving fallback");
    json!({
        "optimizedPrompt": original,
        "improvements": []
    })
}

async fn tool_recommender(state: &AppState, payload: &Value) -> Result<Value, AppError> {
    let request = payload_str(payload, "request");
    let catalog = catalog_digest(state);
    let prompt = RECOMMENDER_PROMPT_TEMPLATE
        .replace("{request}", request)
        .replace("{catalog}", &catalog);
    let reply = state
        .llm
        .call_text(&prompt, RECOMMENDER_SYSTEM)
        .await
        .map_err(|e| AppError::llm(e, state.config.is_development()))?;
    Ok(recommendations_from_reply(&reply))
}

/// Compact category/tool listing embedded in the recommender prompt.
fn catalog_digest(state: &AppState) -> String {
    state
        .catalog
        .iter()
        .map(|category| {
            let names: Vec<&str> = category.tools.iter().map(|t| t.name.as_str()).collect();
            format!("{}: {}", category.name, names.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn recommendations_from_reply(reply: &str) -> Value {
    if let Some(value) = extract_json_object(reply) {
        if value
            .get("recommendations")
            .and_then(Value::as_array)
            .is_some()
        {
            return value;
        }
    }
    warn!("tool-recommender reply had no usable JSON; serving fallback");
    json!({ "recommendations": [] })
}
