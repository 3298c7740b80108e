//! Forced structured-output contract for case analysis.
//!
//! The request side declares one function, `provide_medical_analysis`,
//! and forces the model to call it. The response side decodes that call
//! and fails closed: anything other than a well-formed call to that exact
//! function is a `DecodeError`.

use serde_json::json;
use thiserror::Error;

use super::types::{
    ChatCompletionResponse, FunctionDefinition, FunctionName, ToolChoice, ToolDefinition,
};
use crate::models::AnalysisPayload;

pub const ANALYSIS_TOOL_NAME: &str = "provide_medical_analysis";
const ANALYSIS_TOOL_DESCRIPTION: &str =
    "Provide structured medical analysis with diagnoses, tests, and recommendations";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Response is not a chat completion: {0}")]
    InvalidEnvelope(String),

    #[error("No tool call in response")]
    MissingToolCall,

    #[error("Unexpected function call: {0}")]
    UnexpectedFunction(String),

    #[error("Malformed tool call arguments: {0}")]
    MalformedArguments(String),
}

/// JSON Schema for the arguments of the analysis function.
pub fn analysis_parameters_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "diagnoses": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "condition": { "type": "string" },
                        "confidence": { "type": "number", "minimum": 0, "maximum": 100 },
                        "reasoning": { "type": "string" }
                    },
                    "required": ["condition", "confidence", "reasoning"]
                }
            },
            "suggestedTests": {
                "type": "array",
                "items": { "type": "string" }
            },
            "recommendations": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["diagnoses", "suggestedTests", "recommendations"]
    })
}

pub fn analysis_tool() -> ToolDefinition {
    ToolDefinition {
        kind: "function".into(),
        function: FunctionDefinition {
            name: ANALYSIS_TOOL_NAME.into(),
            description: ANALYSIS_TOOL_DESCRIPTION.into(),
            parameters: analysis_parameters_schema(),
        },
    }
}

pub fn forced_analysis_choice() -> ToolChoice {
    ToolChoice {
        kind: "function".into(),
        function: FunctionName {
            name: ANALYSIS_TOOL_NAME.into(),
        },
    }
}

/// Decode a successful upstream body into the analysis payload.
pub fn decode_analysis(body: &str) -> Result<AnalysisPayload, DecodeError> {
    let envelope: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| DecodeError::InvalidEnvelope(e.to_string()))?;

    let call = envelope
        .first_tool_call()
        .ok_or(DecodeError::MissingToolCall)?;

    if call.function.name != ANALYSIS_TOOL_NAME {
        return Err(DecodeError::UnexpectedFunction(call.function.name.clone()));
    }

    serde_json::from_str(&call.function.arguments)
        .map_err(|e| DecodeError::MalformedArguments(e.to_string()))
}
