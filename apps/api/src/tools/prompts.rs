// All LLM prompt constants for the AI tool handlers.
// Templates use `{placeholder}` replacement before sending.

/// System prompt for the workflow builder — enforces JSON-only output.
pub const WORKFLOW_SYSTEM: &str =
    "You are an expert automation architect designing AI workflows. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Workflow builder prompt template. Replace `{description}` before sending.
pub const WORKFLOW_PROMPT_TEMPLATE: &str = r#"Design an AI workflow for the following task.

Return a JSON object with this EXACT schema (no extra fields):
{
  "workflow": {
    "name": "Short workflow name",
    "nodes": [
      {"id": "input-1", "type": "input", "label": "User Input"},
      {"id": "process-1", "type": "process", "label": "Step description"},
      {"id": "output-1", "type": "output", "label": "Result"}
    ],
    "connections": [
      {"from": "input-1", "to": "process-1"},
      {"from": "process-1", "to": "output-1"}
    ]
  }
}

Rules:
- Node ids are "<type>-<n>" with n counting up per type.
- Exactly one input node and one output node; 1 to 5 process nodes.
- Every node must be reachable from the input via connections.

TASK DESCRIPTION:
{description}"#;

/// System prompt for the prompt optimizer — enforces JSON-only output.
pub const OPTIMIZER_SYSTEM: &str =
    "You are an expert prompt engineer improving prompts for large language models. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Prompt optimizer template. Replace `{prompt}` and `{goal}` before sending.
pub const OPTIMIZER_PROMPT_TEMPLATE: &str = r#"Rewrite the prompt below to be clearer, more specific, and more likely to produce the desired output.

Return a JSON object with this EXACT schema:
{
  "optimizedPrompt": "the improved prompt",
  "improvements": ["short description of each change made"]
}

DESIRED GOAL:
{goal}

ORIGINAL PROMPT:
{prompt}"#;

/// System prompt for the tool recommender — enforces JSON-only output.
pub const RECOMMENDER_SYSTEM: &str =
    "You are a curator of AI tools recommending entries from a fixed catalog. \
    Only recommend tools that appear in the provided catalog. \
    You MUST respond with valid JSON only. \
    Do NOT use markdown code fences.";

/// Tool recommender template. Replace `{request}` and `{catalog}` before sending.
pub const RECOMMENDER_PROMPT_TEMPLATE: &str = r#"Recommend up to 5 tools from the catalog below for the user's need.

Return a JSON object with this EXACT schema:
{
  "recommendations": [
    {"name": "Tool name exactly as it appears in the catalog", "reason": "one sentence"}
  ]
}

USER NEED:
{request}

CATALOG:
{catalog}"#;
