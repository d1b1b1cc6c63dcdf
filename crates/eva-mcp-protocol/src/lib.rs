//! Wire types for the EVA MCP server.
//!
//! This crate defines the JSON-RPC 2.0 envelope types, the MCP protocol
//! types (tool/resource/prompt definitions, content parts, capabilities),
//! the method-name enumeration, and the request/response payloads.

#![forbid(unsafe_code)]

mod jsonrpc;
mod messages;
mod method;
mod types;

pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId, JSONRPC_VERSION};
pub use messages::{
    CallToolResult, GetPromptResult, InitializeResult, ListPromptsResult, ListResourcesResult,
    ListToolsResult, RenderedPrompt,
};
pub use method::{Method, INTERNAL_PARSE_ERROR};
pub use types::{
    Content, Prompt, PromptArgument, PromptMessage, PromptsCapability, Resource, ResourceContent,
    ResourcesCapability, Role, ServerCapabilities, ServerInfo, Tool, ToolsCapability,
    PROTOCOL_VERSION,
};
