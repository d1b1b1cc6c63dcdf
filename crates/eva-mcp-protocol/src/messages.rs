//! Response payloads for the dispatched methods.
//!
//! Request parameters are extracted field-by-field in the dispatcher (the
//! required-parameter failures carry exact messages), so only the result
//! shapes are declared here.

use serde::{Deserialize, Serialize};

use crate::types::{Content, Prompt, PromptMessage, Resource, ServerCapabilities, ServerInfo, Tool};

/// initialize response result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    /// Protocol version accepted.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server info.
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Server capabilities.
    pub capabilities: ServerCapabilities,
}

/// tools/list response result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    /// Registered tool definitions.
    pub tools: Vec<Tool>,
}

/// tools/call response result.
///
/// A tool-level failure is a *successful* response with `is_error` set;
/// it is not a JSON-RPC error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolResult {
    /// Ordered content parts produced by the tool.
    pub content: Vec<Content>,
    /// Whether the tool reported failure.
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl CallToolResult {
    /// A successful result with a single text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
            is_error: false,
        }
    }

    /// A tool-level failure with a single text part.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
            is_error: true,
        }
    }
}

/// resources/list response result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResourcesResult {
    /// Registered resource definitions.
    pub resources: Vec<Resource>,
}

/// prompts/list response result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPromptsResult {
    /// Registered prompt definitions.
    pub prompts: Vec<Prompt>,
}

/// prompts/get response result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPromptResult {
    /// The rendered prompt.
    pub prompt: RenderedPrompt,
}

/// A rendered prompt: the name plus its message list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedPrompt {
    /// Prompt name.
    pub name: String,
    /// Rendered messages.
    pub messages: Vec<PromptMessage>,
}
