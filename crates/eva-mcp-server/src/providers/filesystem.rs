//! Workspace file resource.
//!
//! One resource registered at the URI prefix `file:///`. Reading the bare
//! prefix returns the recursive file listing as newline-separated relative
//! paths; reading `file:///<relpath>` returns the file's UTF-8 contents
//! with MIME type `text/plain`.

use std::env;

use eva_mcp_core::{McpContext, McpError, McpResult};
use eva_mcp_protocol::{Resource, ResourceContent};

use crate::handler::ResourceReader;
use crate::sandbox::{Sandbox, DEFAULT_MAX_LIST};

/// The URI prefix served by this resource. The bare prefix denotes the
/// workspace root.
pub const FILE_URI_PREFIX: &str = "file:///";

/// Environment variable capping listing entries.
pub const MAX_LIST_ENV: &str = "EVA_MCP_MAX_LIST";

/// The `file:///` resource over a workspace sandbox.
pub struct FilesystemResource {
    sandbox: Sandbox,
    max_list: usize,
}

impl FilesystemResource {
    /// Creates the resource with the listing cap from `EVA_MCP_MAX_LIST`
    /// (default 1000; unparsable values fall back to the default).
    #[must_use]
    pub fn new(sandbox: Sandbox) -> Self {
        let max_list = env::var(MAX_LIST_ENV)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(DEFAULT_MAX_LIST);
        Self::with_max_list(sandbox, max_list)
    }

    /// Creates the resource with an explicit listing cap.
    #[must_use]
    pub fn with_max_list(sandbox: Sandbox, max_list: usize) -> Self {
        Self { sandbox, max_list }
    }
}

impl ResourceReader for FilesystemResource {
    fn definition(&self) -> Resource {
        Resource {
            uri: FILE_URI_PREFIX.to_string(),
            name: Some("workspace".to_string()),
            description: Some("Files in the server workspace".to_string()),
            mime_type: Some("text/plain".to_string()),
        }
    }

    fn read(&self, _ctx: &McpContext, uri: &str) -> McpResult<ResourceContent> {
        let relative = uri
            .strip_prefix(FILE_URI_PREFIX)
            .ok_or_else(|| McpError::resource_not_found(uri))?;

        let text = if relative.is_empty() {
            self.sandbox.list(self.max_list)?.join("\n")
        } else {
            self.sandbox.read(relative)?.content
        };

        Ok(ResourceContent {
            uri: uri.to_string(),
            mime_type: Some("text/plain".to_string()),
            text: Some(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, FilesystemResource) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "alpha").unwrap();
        fs::write(dir.path().join("b.md"), "bravo").unwrap();
        let sandbox = Sandbox::new(Some(dir.path().to_path_buf())).unwrap();
        (dir, FilesystemResource::with_max_list(sandbox, DEFAULT_MAX_LIST))
    }

    #[test]
    fn bare_prefix_lists_workspace() {
        let (_dir, resource) = fixture();
        let ctx = McpContext::default();

        let content = resource.read(&ctx, "file:///").unwrap();
        let text = content.text.unwrap();
        let mut lines: Vec<&str> = text.lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["a.txt", "b.md"]);
        assert_eq!(content.mime_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn file_uri_reads_contents() {
        let (_dir, resource) = fixture();
        let ctx = McpContext::default();

        let content = resource.read(&ctx, "file:///a.txt").unwrap();
        assert_eq!(content.text.as_deref(), Some("alpha"));
        assert_eq!(content.uri, "file:///a.txt");
    }

    #[test]
    fn listing_respects_cap() {
        let (dir, _) = fixture();
        let sandbox = Sandbox::new(Some(dir.path().to_path_buf())).unwrap();
        let resource = FilesystemResource::with_max_list(sandbox, 1);
        let ctx = McpContext::default();

        let content = resource.read(&ctx, "file:///").unwrap();
        assert_eq!(content.text.unwrap().lines().count(), 1);
    }

    #[test]
    fn escape_attempt_is_a_handler_error() {
        let (_dir, resource) = fixture();
        let ctx = McpContext::default();

        let err = resource.read(&ctx, "file:///../outside.txt").unwrap_err();
        assert!(err.message.contains("Path outside workspace"));
    }

    #[test]
    fn directory_read_is_a_handler_error() {
        let (dir, resource) = fixture();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let ctx = McpContext::default();

        let err = resource.read(&ctx, "file:///sub").unwrap_err();
        assert!(err.message.contains("Not a file"));
    }
}
