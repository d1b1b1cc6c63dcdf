//! Built-in tools and prompts.
//!
//! Registered by default so the protocol surface is non-empty at startup.
//! Registrations under the same names replace these.

use serde_json::json;

use eva_mcp_core::{McpContext, McpError, McpResult};
use eva_mcp_protocol::{CallToolResult, Prompt, PromptArgument, Tool};

use crate::handler::ToolHandler;

/// `ping { message?: string }` — returns the message, or `pong`.
pub struct PingTool;

impl ToolHandler for PingTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "ping".to_string(),
            description: Some("Returns the given message, or 'pong'".to_string()),
            input_schema: Some(json!({
                "type": "object",
                "properties": {
                    "message": { "type": "string" }
                }
            })),
        }
    }

    fn call(&self, _ctx: &McpContext, arguments: serde_json::Value) -> McpResult<CallToolResult> {
        let message = arguments
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("pong");
        Ok(CallToolResult::text(message))
    }
}

/// `echo { text: string }` — returns the text.
pub struct EchoTool;

impl ToolHandler for EchoTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "echo".to_string(),
            description: Some("Returns the given text".to_string()),
            input_schema: Some(json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })),
        }
    }

    fn call(&self, _ctx: &McpContext, arguments: serde_json::Value) -> McpResult<CallToolResult> {
        let text = arguments
            .get("text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::missing_param("text"))?;
        Ok(CallToolResult::text(text))
    }
}

/// `time {}` — returns the context clock's current ISO-8601 instant.
pub struct TimeTool;

impl ToolHandler for TimeTool {
    fn definition(&self) -> Tool {
        Tool {
            name: "time".to_string(),
            description: Some("Returns the current time as an ISO-8601 instant".to_string()),
            input_schema: Some(json!({ "type": "object", "properties": {} })),
        }
    }

    fn call(&self, ctx: &McpContext, _arguments: serde_json::Value) -> McpResult<CallToolResult> {
        Ok(CallToolResult::text(ctx.now()))
    }
}

/// The `summarize` prompt and its template.
#[must_use]
pub fn summarize_prompt() -> (Prompt, &'static str) {
    (
        Prompt {
            name: "summarize".to_string(),
            description: Some("Summarize a block of text".to_string()),
            arguments: vec![PromptArgument {
                name: "text".to_string(),
                description: Some("The text to summarize".to_string()),
                required: true,
            }],
        },
        "Summarize the following text:\n\n{{text}}\n\nReturn a concise summary.",
    )
}

/// The `system-instructions` prompt and its template.
#[must_use]
pub fn system_instructions_prompt() -> (Prompt, &'static str) {
    (
        Prompt {
            name: "system-instructions".to_string(),
            description: Some("Base system instructions with an optional persona".to_string()),
            arguments: vec![PromptArgument {
                name: "persona".to_string(),
                description: Some("Persona to adopt".to_string()),
                required: false,
            }],
        },
        "You are a helpful assistant. Persona: {{persona}}",
    )
}
