//! Handler context.
//!
//! Every tool and resource handler receives a [`McpContext`]. The context
//! carries the session clock so handlers that report the current time stay
//! deterministic under test.

use std::sync::Arc;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A source of the current instant, formatted as ISO-8601 (RFC 3339).
pub trait Clock: Send + Sync {
    /// Returns the current instant as an ISO-8601 string.
    fn now(&self) -> String;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        let now = OffsetDateTime::now_utc();
        now.format(&Rfc3339)
            .unwrap_or_else(|_| now.unix_timestamp().to_string())
    }
}

/// A clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}

/// Per-request context handed to handlers.
#[derive(Clone)]
pub struct McpContext {
    clock: Arc<dyn Clock>,
}

impl McpContext {
    /// Creates a context backed by the given clock.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Returns the current instant from the session clock.
    #[must_use]
    pub fn now(&self) -> String {
        self.clock.now()
    }
}

impl Default for McpContext {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for McpContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpContext").finish_non_exhaustive()
    }
}
