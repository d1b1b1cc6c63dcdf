//! Stdio entry point.
//!
//! Binds the framed transport to stdin/stdout and serves the built-in
//! surface. Diagnostics go to stderr; the protocol stream is never mixed
//! with log output. Exits 0 on clean shutdown, nonzero on stream failure.

use std::process::ExitCode;

use log::error;

use eva_mcp_server::Server;

/// Log-level filter variable, e.g. `EVA_MCP_LOG=debug` or
/// `EVA_MCP_LOG=evamcp::transport=trace,info`.
const LOG_ENV: &str = "EVA_MCP_LOG";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "info"))
        .target(env_logger::Target::Stderr)
        .init();

    let builder = match Server::new("eva-mcp", env!("CARGO_PKG_VERSION")).with_builtins() {
        Ok(builder) => builder,
        Err(e) => {
            error!("cannot resolve workspace root: {e}");
            return ExitCode::FAILURE;
        }
    };

    match builder.build().run_stdio() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("transport failure: {e}");
            ExitCode::FAILURE
        }
    }
}
