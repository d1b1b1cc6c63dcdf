//! Server builder.

use std::path::PathBuf;
use std::sync::Arc;

use eva_mcp_core::{Clock, SystemClock};
use eva_mcp_protocol::{Prompt, ServerInfo};

use crate::builtins::{
    summarize_prompt, system_instructions_prompt, EchoTool, PingTool, TimeTool,
};
use crate::handler::{ResourceReader, ToolHandler};
use crate::providers::FilesystemResource;
use crate::router::Router;
use crate::sandbox::Sandbox;
use crate::Server;

/// Builder for configuring an MCP server.
///
/// Registration order is meaningful for resources (prefix resolution picks
/// the first registered match); re-registering a name or URI replaces the
/// earlier entry.
pub struct ServerBuilder {
    info: ServerInfo,
    router: Router,
    clock: Arc<dyn Clock>,
    workspace_root: Option<PathBuf>,
}

impl ServerBuilder {
    /// Creates a new server builder.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            router: Router::new(),
            clock: Arc::new(SystemClock),
            workspace_root: None,
        }
    }

    /// Registers a tool handler.
    #[must_use]
    pub fn tool<H: ToolHandler + 'static>(mut self, handler: H) -> Self {
        self.router.add_tool(handler);
        self
    }

    /// Registers a resource reader.
    #[must_use]
    pub fn resource<H: ResourceReader + 'static>(mut self, reader: H) -> Self {
        self.router.add_resource(reader);
        self
    }

    /// Registers a prompt with its template.
    #[must_use]
    pub fn prompt(mut self, definition: Prompt, template: impl Into<String>) -> Self {
        self.router.add_prompt(definition, template);
        self
    }

    /// Overrides the clock handed to handlers.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the workspace root for the file resource provider. When unset,
    /// the root comes from `EVA_MCP_WORKSPACE`, else the working directory.
    #[must_use]
    pub fn workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Registers the built-in surface: the `ping`/`echo`/`time` tools, the
    /// `file:///` resource over the workspace sandbox, and the built-in
    /// prompts. The sandbox is rooted at the configured workspace root;
    /// set it with [`workspace_root`](Self::workspace_root) first.
    ///
    /// # Errors
    ///
    /// Fails when the workspace root cannot be resolved.
    pub fn with_builtins(self) -> std::io::Result<Self> {
        let sandbox = Sandbox::new(self.workspace_root.clone())?;
        let (summarize, summarize_template) = summarize_prompt();
        let (instructions, instructions_template) = system_instructions_prompt();
        Ok(self
            .tool(PingTool)
            .tool(EchoTool)
            .tool(TimeTool)
            .resource(FilesystemResource::new(sandbox))
            .prompt(summarize, summarize_template)
            .prompt(instructions, instructions_template))
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        Server::from_parts(self.info, self.router, self.clock)
    }
}
