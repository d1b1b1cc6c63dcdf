//! Structured logging for the EVA MCP server.
//!
//! Built on the standard [`log`] facade. Diagnostic output goes to a sink
//! distinct from the protocol stream (the binary wires it to stderr); the
//! library crates only emit through these macros.
//!
//! # Log Targets
//!
//! Hierarchical targets allow filtering per component:
//!
//! - `evamcp::server`: server loop and request lifecycle
//! - `evamcp::transport`: frame-level transport events
//! - `evamcp::router`: registry lookups and dispatch
//! - `evamcp::handler`: tool/resource/prompt handler execution
//! - `evamcp::sandbox`: workspace path resolution
//!
//! Example filter: `EVA_MCP_LOG=evamcp::transport=trace,info`

// Re-export log macros for ergonomic use
pub use log::{debug, error, info, trace, warn};

// Re-export log level types for programmatic use
pub use log::{Level, LevelFilter};

/// Log targets used by the server components.
pub mod targets {
    /// Root target.
    pub const EVAMCP: &str = "evamcp";

    /// Server loop and request lifecycle.
    pub const SERVER: &str = "evamcp::server";

    /// Frame-level transport events.
    pub const TRANSPORT: &str = "evamcp::transport";

    /// Registry lookups and method dispatch.
    pub const ROUTER: &str = "evamcp::router";

    /// Tool, resource, and prompt handler execution.
    pub const HANDLER: &str = "evamcp::handler";

    /// Workspace path resolution and file access.
    pub const SANDBOX: &str = "evamcp::sandbox";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_targets_are_hierarchical() {
        assert!(targets::SERVER.starts_with(targets::EVAMCP));
        assert!(targets::TRANSPORT.starts_with(targets::EVAMCP));
        assert!(targets::ROUTER.starts_with(targets::EVAMCP));
        assert!(targets::HANDLER.starts_with(targets::EVAMCP));
        assert!(targets::SANDBOX.starts_with(targets::EVAMCP));
    }
}
