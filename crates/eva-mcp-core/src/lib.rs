//! Core types for the EVA MCP server.
//!
//! This crate provides the fundamental building blocks shared by every
//! layer:
//! - Error types for MCP operations ([`McpError`], [`McpErrorCode`])
//! - The handler context ([`McpContext`]) carrying the session clock
//! - Logging utilities built on the standard `log` facade

#![forbid(unsafe_code)]

mod context;
mod error;
pub mod logging;

pub use context::{Clock, FixedClock, McpContext, SystemClock};
pub use error::{McpError, McpErrorCode, McpResult};
