//! Request router for the MCP server.
//!
//! Three in-memory registries keyed by their definition's unique name or
//! URI. Registries are populated during construction and read-only
//! thereafter; registering under an existing key replaces the earlier
//! entry, which is how built-ins may be customized.

use std::collections::HashMap;

use log::debug;

use eva_mcp_core::logging::targets;
use eva_mcp_core::{McpContext, McpError, McpResult};
use eva_mcp_protocol::{CallToolResult, Prompt, Resource, ResourceContent, Tool};

use crate::handler::{BoxedResourceReader, BoxedToolHandler, ResourceReader, ToolHandler};

/// A registered prompt: its definition plus the template it renders.
struct PromptEntry {
    definition: Prompt,
    template: String,
}

/// Routes MCP requests to the appropriate registry entry.
pub struct Router {
    tools: HashMap<String, BoxedToolHandler>,
    /// Registration order matters: prefix resolution picks the first match.
    resources: Vec<BoxedResourceReader>,
    prompts: HashMap<String, PromptEntry>,
}

impl Router {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            resources: Vec::new(),
            prompts: HashMap::new(),
        }
    }

    /// Registers a tool handler. Replaces any tool with the same name.
    pub fn add_tool<H: ToolHandler + 'static>(&mut self, handler: H) {
        let def = handler.definition();
        self.tools.insert(def.name, Box::new(handler));
    }

    /// Registers a resource reader. Replaces any reader with the same URI.
    pub fn add_resource<H: ResourceReader + 'static>(&mut self, reader: H) {
        let uri = reader.definition().uri;
        let boxed: BoxedResourceReader = Box::new(reader);
        match self
            .resources
            .iter()
            .position(|r| r.definition().uri == uri)
        {
            Some(idx) => self.resources[idx] = boxed,
            None => self.resources.push(boxed),
        }
    }

    /// Registers a prompt with its template. Replaces any prompt with the
    /// same name.
    pub fn add_prompt(&mut self, definition: Prompt, template: impl Into<String>) {
        self.prompts.insert(
            definition.name.clone(),
            PromptEntry {
                definition,
                template: template.into(),
            },
        );
    }

    /// Returns a snapshot of all tool definitions.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.values().map(|h| h.definition()).collect()
    }

    /// Returns a snapshot of all resource definitions.
    #[must_use]
    pub fn resources(&self) -> Vec<Resource> {
        self.resources.iter().map(|r| r.definition()).collect()
    }

    /// Returns a snapshot of all prompt definitions.
    #[must_use]
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.values().map(|e| e.definition.clone()).collect()
    }

    /// Calls a tool by name.
    ///
    /// A missing tool is not a dispatch error: the result carries
    /// `is_error` and a text part naming the tool.
    ///
    /// # Errors
    ///
    /// Propagates handler failures, which the dispatcher converts to
    /// JSON-RPC server errors.
    pub fn call_tool(
        &self,
        ctx: &McpContext,
        name: &str,
        arguments: serde_json::Value,
    ) -> McpResult<CallToolResult> {
        debug!(target: targets::ROUTER, "calling tool: {name}");
        let Some(handler) = self.tools.get(name) else {
            return Ok(CallToolResult::error(format!("Tool not found: {name}")));
        };
        handler.call(ctx, arguments)
    }

    /// Reads a resource by URI: exact match first, then the first reader
    /// whose URI is a prefix of the request.
    ///
    /// # Errors
    ///
    /// Fails when no definition matches.
    pub fn read_resource(&self, ctx: &McpContext, uri: &str) -> McpResult<ResourceContent> {
        debug!(target: targets::ROUTER, "reading resource: {uri}");
        if let Some(reader) = self
            .resources
            .iter()
            .find(|r| r.definition().uri == uri)
        {
            return reader.read(ctx, uri);
        }
        if let Some(reader) = self
            .resources
            .iter()
            .find(|r| uri.starts_with(&r.definition().uri))
        {
            return reader.read(ctx, uri);
        }
        Err(McpError::resource_not_found(uri))
    }

    /// Renders a prompt by name with the given variables.
    ///
    /// # Errors
    ///
    /// Fails when no prompt is registered under the name.
    pub fn get_prompt(
        &self,
        name: &str,
        variables: &serde_json::Map<String, serde_json::Value>,
    ) -> McpResult<String> {
        debug!(target: targets::ROUTER, "rendering prompt: {name}");
        let entry = self
            .prompts
            .get(name)
            .ok_or_else(|| McpError::prompt_not_found(name))?;
        Ok(render_template(&entry.template, variables))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Replaces every `{{identifier}}` occurrence with the string coercion of
/// `variables[identifier]`, or the empty string when the key is absent.
/// No escaping, no nested expansion, no conditionals.
pub fn render_template(
    template: &str,
    variables: &serde_json::Map<String, serde_json::Value>,
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open + 2..].find("}}") else {
            break;
        };
        out.push_str(&rest[..open]);
        let key = &rest[open + 2..open + 2 + close];
        if let Some(value) = variables.get(key) {
            match value {
                serde_json::Value::String(s) => out.push_str(s),
                other => out.push_str(&other.to_string()),
            }
        }
        rest = &rest[open + 2 + close + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use eva_mcp_protocol::Content;
    use serde_json::json;

    struct UpperTool;

    impl ToolHandler for UpperTool {
        fn definition(&self) -> Tool {
            Tool {
                name: "upper".to_string(),
                description: Some("Uppercases text".to_string()),
                input_schema: Some(json!({
                    "type": "object",
                    "properties": { "text": { "type": "string" } },
                    "required": ["text"]
                })),
            }
        }

        fn call(
            &self,
            _ctx: &McpContext,
            arguments: serde_json::Value,
        ) -> McpResult<CallToolResult> {
            let text = arguments
                .get("text")
                .and_then(|v| v.as_str())
                .ok_or_else(|| McpError::missing_param("text"))?;
            Ok(CallToolResult::text(text.to_uppercase()))
        }
    }

    struct StaticResource {
        uri: &'static str,
        body: &'static str,
    }

    impl ResourceReader for StaticResource {
        fn definition(&self) -> Resource {
            Resource {
                uri: self.uri.to_string(),
                name: None,
                description: None,
                mime_type: Some("text/plain".to_string()),
            }
        }

        fn read(&self, _ctx: &McpContext, uri: &str) -> McpResult<ResourceContent> {
            Ok(ResourceContent {
                uri: uri.to_string(),
                mime_type: Some("text/plain".to_string()),
                text: Some(self.body.to_string()),
            })
        }
    }

    fn variables(pairs: &[(&str, serde_json::Value)]) -> serde_json::Map<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn tool_call_dispatches() {
        let mut router = Router::new();
        router.add_tool(UpperTool);
        let ctx = McpContext::default();

        let result = router
            .call_tool(&ctx, "upper", json!({"text": "hi"}))
            .unwrap();
        assert!(!result.is_error);
        let Content::Text { text } = &result.content[0];
        assert_eq!(text, "HI");
    }

    #[test]
    fn missing_tool_is_a_graceful_result() {
        let router = Router::new();
        let ctx = McpContext::default();

        let result = router.call_tool(&ctx, "nope", json!({})).unwrap();
        assert!(result.is_error);
        let Content::Text { text } = &result.content[0];
        assert!(text.starts_with("Tool not found: nope"));
    }

    #[test]
    fn same_name_registration_replaces() {
        struct Second;
        impl ToolHandler for Second {
            fn definition(&self) -> Tool {
                Tool {
                    name: "upper".to_string(),
                    description: Some("replacement".to_string()),
                    input_schema: None,
                }
            }
            fn call(
                &self,
                _ctx: &McpContext,
                _arguments: serde_json::Value,
            ) -> McpResult<CallToolResult> {
                Ok(CallToolResult::text("second"))
            }
        }

        let mut router = Router::new();
        router.add_tool(UpperTool);
        router.add_tool(Second);
        assert_eq!(router.tools().len(), 1);

        let ctx = McpContext::default();
        let result = router.call_tool(&ctx, "upper", json!({})).unwrap();
        let Content::Text { text } = &result.content[0];
        assert_eq!(text, "second");
    }

    #[test]
    fn resource_resolution_prefers_exact_match() {
        let mut router = Router::new();
        router.add_resource(StaticResource {
            uri: "file:///",
            body: "prefix",
        });
        router.add_resource(StaticResource {
            uri: "file:///exact.txt",
            body: "exact",
        });
        let ctx = McpContext::default();

        let content = router.read_resource(&ctx, "file:///exact.txt").unwrap();
        assert_eq!(content.text.as_deref(), Some("exact"));

        let content = router.read_resource(&ctx, "file:///other.txt").unwrap();
        assert_eq!(content.text.as_deref(), Some("prefix"));
    }

    #[test]
    fn resource_prefix_resolution_is_first_registered() {
        let mut router = Router::new();
        router.add_resource(StaticResource {
            uri: "file:///a/",
            body: "first",
        });
        router.add_resource(StaticResource {
            uri: "file:///",
            body: "second",
        });
        let ctx = McpContext::default();

        let content = router.read_resource(&ctx, "file:///a/x.txt").unwrap();
        assert_eq!(content.text.as_deref(), Some("first"));
    }

    #[test]
    fn unmatched_resource_fails() {
        let router = Router::new();
        let ctx = McpContext::default();
        let err = router.read_resource(&ctx, "mem://x").unwrap_err();
        assert!(err.message.contains("Resource not found: mem://x"));
    }

    #[test]
    fn prompt_rendering_substitutes_variables() {
        let mut router = Router::new();
        router.add_prompt(
            Prompt {
                name: "greet".to_string(),
                description: None,
                arguments: vec![],
            },
            "Hello {{name}}, you are {{age}}.",
        );

        let rendered = router
            .get_prompt(
                "greet",
                &variables(&[("name", json!("Ada")), ("age", json!(36))]),
            )
            .unwrap();
        assert_eq!(rendered, "Hello Ada, you are 36.");
    }

    #[test]
    fn missing_prompt_fails() {
        let router = Router::new();
        let err = router.get_prompt("nope", &serde_json::Map::new()).unwrap_err();
        assert!(err.message.contains("Prompt not found: nope"));
    }

    #[test]
    fn absent_variables_render_empty() {
        let vars = serde_json::Map::new();
        assert_eq!(render_template("a {{x}} b", &vars), "a  b");
    }

    #[test]
    fn rendering_has_no_nested_expansion() {
        let vars = variables(&[("x", json!("{{y}}")), ("y", json!("boom"))]);
        assert_eq!(render_template("{{x}}", &vars), "{{y}}");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let vars = variables(&[("x", json!("v"))]);
        assert_eq!(render_template("a {{x", &vars), "a {{x");
    }

    #[test]
    fn repeated_placeholders_all_substitute() {
        let vars = variables(&[("x", json!("v"))]);
        assert_eq!(render_template("{{x}}-{{x}}-{{x}}", &vars), "v-v-v");
    }
}
