//! MCP server implementation.
//!
//! This crate provides the server side of the protocol:
//! - Builder-based tool, resource, and prompt registration
//! - Method dispatch with lifecycle semantics (terminal `shutdown`)
//! - The read → dispatch → write loop over a framed transport
//! - The workspace sandbox backing the `file:///` resource
//!
//! # Example
//!
//! ```ignore
//! use eva_mcp_server::Server;
//!
//! fn main() -> std::io::Result<()> {
//!     Server::new("eva-mcp", "1.0.0")
//!         .with_builtins()?
//!         .build()
//!         .run_stdio()?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod builder;
mod builtins;
mod handler;
pub mod providers;
mod router;
mod sandbox;


pub use builder::ServerBuilder;
pub use builtins::{summarize_prompt, system_instructions_prompt, EchoTool, PingTool, TimeTool};
pub use handler::{BoxedResourceReader, BoxedToolHandler, ResourceReader, ToolHandler};
pub use router::{render_template, Router};
pub use sandbox::{FileContents, Sandbox, SandboxError, DEFAULT_MAX_LIST, WORKSPACE_ENV};

use std::io::{Read, Write};
use std::sync::Arc;

use log::{debug, error, info, warn};
use serde_json::Value;

use eva_mcp_core::logging::targets;
use eva_mcp_core::{Clock, McpContext, McpError, McpErrorCode, McpResult};
use eva_mcp_protocol::{
    GetPromptResult, InitializeResult, JsonRpcRequest, JsonRpcResponse, ListPromptsResult,
    ListResourcesResult, ListToolsResult, Method, PromptMessage, RenderedPrompt, Role,
    ServerCapabilities, ServerInfo, PROTOCOL_VERSION,
};
use eva_mcp_transport::{FramedTransport, ReadOutcome, TransportError};

/// An MCP server instance.
///
/// Owns the registries, the session clock, and the shutdown flag — the
/// only mutable per-session state. Built via [`ServerBuilder`].
pub struct Server {
    info: ServerInfo,
    router: Router,
    clock: Arc<dyn Clock>,
    shutting_down: bool,
}

impl Server {
    /// Creates a new server builder.
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> ServerBuilder {
        ServerBuilder::new(name, version)
    }

    pub(crate) fn from_parts(info: ServerInfo, router: Router, clock: Arc<dyn Clock>) -> Self {
        Self {
            info,
            router,
            clock,
            shutting_down: false,
        }
    }

    /// Returns the server info.
    #[must_use]
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Returns true once `shutdown` has been dispatched.
    #[must_use]
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    /// Runs the server on the process's stdin/stdout.
    ///
    /// # Errors
    ///
    /// Returns an error when the byte streams fail.
    pub fn run_stdio(mut self) -> Result<(), TransportError> {
        let mut transport = FramedTransport::stdio();
        self.run(&mut transport)
    }

    /// Drives the read → dispatch → write loop until end-of-input or a
    /// terminal `shutdown`.
    ///
    /// Requests are processed to completion, response write included,
    /// before the next read; response order on the wire equals request
    /// order. Frame-level errors are logged and the loop resumes; stream
    /// failures terminate it.
    ///
    /// # Errors
    ///
    /// Returns an error when the byte streams fail.
    pub fn run<R: Read, W: Write>(
        &mut self,
        transport: &mut FramedTransport<R, W>,
    ) -> Result<(), TransportError> {
        info!(
            target: targets::SERVER,
            "{} {} listening", self.info.name, self.info.version
        );

        loop {
            match transport.recv() {
                Ok(ReadOutcome::Eof) => {
                    info!(target: targets::SERVER, "input closed; exiting");
                    break;
                }
                Ok(ReadOutcome::Skipped) => continue,
                Ok(ReadOutcome::Message(request)) => {
                    if let Some(response) = self.handle_request(request) {
                        transport.send(&response)?;
                    }
                    if self.shutting_down {
                        info!(target: targets::SERVER, "shutdown complete");
                        break;
                    }
                }
                Err(TransportError::Codec(e)) => {
                    error!(target: targets::TRANSPORT, "frame error: {e}");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Handles a single request, returning the response to write.
    ///
    /// Notifications produce no response; the transport's parse-error
    /// sentinel is the one id-less request that is answered (with a null
    /// id, since no correlation is possible).
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let method = Method::parse(&request.method);
        debug!(target: targets::SERVER, "dispatching {}", request.method);

        let is_parse_error = method == Method::InternalParseError;
        let id = request.id;
        let result = self.dispatch(method, request.params);

        if let Err(e) = &result {
            if e.code == McpErrorCode::ServerError {
                error!(
                    target: targets::HANDLER,
                    "handler error for '{}': {}", request.method, e.message
                );
            } else {
                warn!(
                    target: targets::SERVER,
                    "request '{}' failed: {}", request.method, e.message
                );
            }
        }

        if id.is_none() && !is_parse_error {
            return None;
        }

        match result {
            Ok(value) => id.map(|id| JsonRpcResponse::success(id, value)),
            Err(e) => Some(JsonRpcResponse::error(id, e.into())),
        }
    }

    /// Dispatches a parsed method to the matching registry operation.
    fn dispatch(&mut self, method: Method, params: Option<Value>) -> McpResult<Value> {
        match method {
            Method::Initialize => to_value(InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_string(),
                server_info: self.info.clone(),
                capabilities: ServerCapabilities::default(),
            }),
            Method::Shutdown => {
                self.shutting_down = true;
                Ok(Value::Null)
            }
            Method::ToolsList => to_value(ListToolsResult {
                tools: self.router.tools(),
            }),
            Method::ToolsCall => {
                let name = required_str(params.as_ref(), "name")?;
                let arguments = params
                    .as_ref()
                    .and_then(|p| p.get("arguments"))
                    .cloned()
                    .unwrap_or_else(|| serde_json::json!({}));
                let ctx = McpContext::new(self.clock.clone());
                to_value(self.router.call_tool(&ctx, name, arguments)?)
            }
            Method::ResourcesList => to_value(ListResourcesResult {
                resources: self.router.resources(),
            }),
            Method::ResourcesRead => {
                let uri = required_str(params.as_ref(), "uri")?;
                let ctx = McpContext::new(self.clock.clone());
                to_value(self.router.read_resource(&ctx, uri)?)
            }
            Method::PromptsList => to_value(ListPromptsResult {
                prompts: self.router.prompts(),
            }),
            Method::PromptsGet => {
                let name = required_str(params.as_ref(), "name")?;
                let variables = params
                    .as_ref()
                    .and_then(|p| p.get("variables"))
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                let content = self.router.get_prompt(name, &variables)?;
                to_value(GetPromptResult {
                    prompt: RenderedPrompt {
                        name: name.to_string(),
                        messages: vec![PromptMessage {
                            role: Role::System,
                            content,
                        }],
                    },
                })
            }
            Method::InternalParseError => {
                Err(McpError::parse_error().with_data(params.unwrap_or(Value::Null)))
            }
            Method::Unknown(name) => Err(McpError::method_not_found(&name)),
        }
    }
}

/// Serializes a result payload.
fn to_value<T: serde::Serialize>(value: T) -> McpResult<Value> {
    serde_json::to_value(value).map_err(McpError::from)
}

/// Extracts a required string parameter, failing with `<key> required`.
fn required_str<'a>(params: Option<&'a Value>, key: &str) -> McpResult<&'a str> {
    params
        .and_then(|p| p.get(key))
        .and_then(Value::as_str)
        .ok_or_else(|| McpError::missing_param(key))
}
