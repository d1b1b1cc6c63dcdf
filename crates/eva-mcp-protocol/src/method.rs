//! Method names understood by the dispatcher.

/// Synthetic method injected by the transport when a frame body fails to
/// decode as JSON. The dispatcher answers it with a parse-error envelope.
pub const INTERNAL_PARSE_ERROR: &str = "__internal_parse_error__";

/// A dispatched method name.
///
/// One variant per supported method keeps the dispatcher's match
/// exhaustive; [`Method::Unknown`] is the only method-not-found path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// `initialize`
    Initialize,
    /// `shutdown`
    Shutdown,
    /// `tools/list`
    ToolsList,
    /// `tools/call`
    ToolsCall,
    /// `resources/list`
    ResourcesList,
    /// `resources/read`
    ResourcesRead,
    /// `prompts/list`
    PromptsList,
    /// `prompts/get`
    PromptsGet,
    /// Transport-synthesized parse-error sentinel.
    InternalParseError,
    /// Anything else.
    Unknown(String),
}

impl Method {
    /// Parses a wire method name.
    #[must_use]
    pub fn parse(method: &str) -> Self {
        match method {
            "initialize" => Method::Initialize,
            "shutdown" => Method::Shutdown,
            "tools/list" => Method::ToolsList,
            "tools/call" => Method::ToolsCall,
            "resources/list" => Method::ResourcesList,
            "resources/read" => Method::ResourcesRead,
            "prompts/list" => Method::PromptsList,
            "prompts/get" => Method::PromptsGet,
            INTERNAL_PARSE_ERROR => Method::InternalParseError,
            other => Method::Unknown(other.to_string()),
        }
    }
}

impl From<&str> for Method {
    fn from(method: &str) -> Self {
        Method::parse(method)
    }
}
