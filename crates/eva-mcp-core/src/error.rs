//! Error types for MCP operations.

use serde_json::Value;

/// Result alias for MCP operations.
pub type McpResult<T> = Result<T, McpError>;

/// JSON-RPC error codes used on the wire.
///
/// The protocol fixes three codes: parse failures, unknown methods, and a
/// generic server error that covers every handler-raised failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpErrorCode {
    /// A frame body failed to decode as JSON (-32700).
    ParseError,
    /// The request named a method the dispatcher does not know (-32601).
    MethodNotFound,
    /// A handler failed: missing parameter, unknown resource or prompt,
    /// sandbox violation, I/O failure (-32000).
    ServerError,
}

impl From<McpErrorCode> for i32 {
    fn from(code: McpErrorCode) -> Self {
        match code {
            McpErrorCode::ParseError => -32700,
            McpErrorCode::MethodNotFound => -32601,
            McpErrorCode::ServerError => -32000,
        }
    }
}

/// An MCP-level error, converted to a JSON-RPC error envelope at the
/// dispatch boundary.
#[derive(Debug, Clone)]
pub struct McpError {
    /// Wire error code.
    pub code: McpErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Optional structured payload.
    pub data: Option<Value>,
}

impl McpError {
    /// Creates an error with the given code and message.
    #[must_use]
    pub fn new(code: McpErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attaches a structured payload.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// A parse error for a frame body that was not valid JSON.
    #[must_use]
    pub fn parse_error() -> Self {
        Self::new(McpErrorCode::ParseError, "Parse error")
    }

    /// An unknown-method error carrying the method name as data.
    #[must_use]
    pub fn method_not_found(method: &str) -> Self {
        Self::new(McpErrorCode::MethodNotFound, "Method not found")
            .with_data(serde_json::json!({ "method": method }))
    }

    /// A generic server error.
    #[must_use]
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(McpErrorCode::ServerError, message)
    }

    /// A missing required parameter, e.g. `uri required`.
    #[must_use]
    pub fn missing_param(name: &str) -> Self {
        Self::server_error(format!("{name} required"))
    }

    /// No resource definition matched the requested URI.
    #[must_use]
    pub fn resource_not_found(uri: &str) -> Self {
        Self::server_error(format!("Resource not found: {uri}"))
    }

    /// No prompt is registered under the requested name.
    #[must_use]
    pub fn prompt_not_found(name: &str) -> Self {
        Self::server_error(format!("Prompt not found: {name}"))
    }
}

impl std::fmt::Display for McpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, i32::from(self.code))
    }
}

impl std::error::Error for McpError {}

impl From<std::io::Error> for McpError {
    fn from(err: std::io::Error) -> Self {
        Self::server_error(err.to_string())
    }
}

impl From<serde_json::Error> for McpError {
    fn from(err: serde_json::Error) -> Self {
        Self::server_error(err.to_string())
    }
}
