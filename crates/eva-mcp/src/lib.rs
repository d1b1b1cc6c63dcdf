//! EVA MCP server.
//!
//! A Model Context Protocol server speaking JSON-RPC 2.0 over a
//! `Content-Length` framed byte stream (stdin/stdout by default). Three
//! capability surfaces are exposed: tools, resources, and prompts.
//!
//! # Example
//!
//! ```ignore
//! use eva_mcp::prelude::*;
//!
//! fn main() -> std::io::Result<()> {
//!     Server::new("eva-mcp", "1.0.0")
//!         .with_builtins()?
//!         .build()
//!         .run_stdio()
//!         .map_err(|e| std::io::Error::other(e.to_string()))
//! }
//! ```

#![forbid(unsafe_code)]

pub use eva_mcp_core as core;
pub use eva_mcp_protocol as protocol;
pub use eva_mcp_server as server;
pub use eva_mcp_transport as transport;

/// Common imports for building servers.
pub mod prelude {
    pub use eva_mcp_core::{Clock, McpContext, McpError, McpResult, SystemClock};
    pub use eva_mcp_protocol::{
        CallToolResult, Content, Prompt, PromptArgument, Resource, ResourceContent, Tool,
    };
    pub use eva_mcp_server::{
        ResourceReader, Sandbox, Server, ServerBuilder, ToolHandler,
    };
    pub use eva_mcp_transport::FramedTransport;
}
