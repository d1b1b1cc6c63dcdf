//! Handler traits for tools and resources.

use eva_mcp_core::{McpContext, McpResult};
use eva_mcp_protocol::{CallToolResult, Resource, ResourceContent, Tool};

/// Handler for a tool.
///
/// Implementations return a [`CallToolResult`]; a tool that completed but
/// wants to report failure sets `is_error` on the result. An `Err` return
/// is a handler failure and surfaces as a JSON-RPC server error instead.
pub trait ToolHandler: Send + Sync {
    /// Returns the tool definition.
    fn definition(&self) -> Tool;

    /// Calls the tool with the given arguments.
    fn call(&self, ctx: &McpContext, arguments: serde_json::Value) -> McpResult<CallToolResult>;
}

/// Reader for a resource.
///
/// The requested URI is passed through because a reader registered under a
/// URI prefix serves every URI below it.
pub trait ResourceReader: Send + Sync {
    /// Returns the resource definition.
    fn definition(&self) -> Resource;

    /// Reads the resource content for the given URI.
    fn read(&self, ctx: &McpContext, uri: &str) -> McpResult<ResourceContent>;
}

/// A boxed tool handler.
pub type BoxedToolHandler = Box<dyn ToolHandler>;

/// A boxed resource reader.
pub type BoxedResourceReader = Box<dyn ResourceReader>;
