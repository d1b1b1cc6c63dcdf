//! MCP protocol types.
//!
//! Definitions exposed by the three capability surfaces, the content model,
//! and the records returned on initialization.

use serde::{Deserialize, Serialize};

/// MCP protocol version. Hard-coded; no negotiation occurs.
pub const PROTOCOL_VERSION: &str = "2024-11-01";

/// Server capabilities advertised during initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tool-related capabilities.
    pub tools: ToolsCapability,
    /// Resource-related capabilities.
    pub resources: ResourcesCapability,
    /// Prompt-related capabilities.
    pub prompts: PromptsCapability,
}

impl Default for ServerCapabilities {
    fn default() -> Self {
        Self {
            tools: ToolsCapability {
                list: true,
                call: true,
            },
            resources: ResourcesCapability {
                list: true,
                read: true,
                supported_schemes: vec!["file".to_string()],
            },
            prompts: PromptsCapability {
                list: true,
                get: true,
            },
        }
    }
}

/// Tool capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// Whether tools/list is supported.
    pub list: bool,
    /// Whether tools/call is supported.
    pub call: bool,
}

/// Resource capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesCapability {
    /// Whether resources/list is supported.
    pub list: bool,
    /// Whether resources/read is supported.
    pub read: bool,
    /// URI schemes the server can read.
    #[serde(rename = "supportedSchemes")]
    pub supported_schemes: Vec<String>,
}

/// Prompt capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsCapability {
    /// Whether prompts/list is supported.
    pub list: bool,
    /// Whether prompts/get is supported.
    pub get: bool,
}

/// Server information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

/// Tool definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (unique key within the process).
    pub name: String,
    /// Tool description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Input schema (opaque JSON Schema, forwarded to clients verbatim).
    #[serde(rename = "inputSchema", skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<serde_json::Value>,
}

/// Resource definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Resource URI (unique key).
    pub uri: String,
    /// Resource name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Resource description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// MIME type.
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Prompt definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    /// Prompt name (unique key).
    pub name: String,
    /// Prompt description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared template variables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<PromptArgument>,
}

/// Prompt variable declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgument {
    /// Variable name.
    pub name: String,
    /// Variable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the variable is required.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

/// Content parts in tool results.
///
/// Text is the only specified content kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

impl Content {
    /// Creates a text content part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }
}

/// Resource content returned by resources/read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContent {
    /// Resource URI.
    pub uri: String,
    /// MIME type.
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Role in prompt messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System role. Rendered prompts are delivered as a system message.
    System,
    /// User role.
    User,
    /// Assistant role.
    Assistant,
}

/// A message in a rendered prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    /// Message role.
    pub role: Role,
    /// Rendered message content.
    pub content: String,
}
