//! Workspace sandbox.
//!
//! All file-resource access is bounded by a workspace root. The root is
//! resolved to a canonical absolute path once at construction; every
//! resolved path must equal the root or live strictly below it. The
//! containment check runs on the normalized resolved form, never on the
//! lexical concatenation, so `..` segments cannot escape.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use log::debug;

use eva_mcp_core::logging::targets;

/// Environment variable naming the workspace root.
pub const WORKSPACE_ENV: &str = "EVA_MCP_WORKSPACE";

/// Default cap on listing entries.
pub const DEFAULT_MAX_LIST: usize = 1000;

/// A file read out of the workspace: the original relative path plus its
/// UTF-8 contents.
#[derive(Debug, Clone)]
pub struct FileContents {
    /// The relative path as requested.
    pub path: String,
    /// The file's contents.
    pub content: String,
}

/// Sandbox error types.
#[derive(Debug)]
pub enum SandboxError {
    /// The resolved path falls outside the workspace root.
    PathOutsideWorkspace(String),
    /// The target exists but is not a regular file.
    NotAFile(String),
    /// Filesystem failure.
    Io(std::io::Error),
}

impl std::fmt::Display for SandboxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SandboxError::PathOutsideWorkspace(path) => {
                write!(f, "Path outside workspace: {path}")
            }
            SandboxError::NotAFile(path) => write!(f, "Not a file: {path}"),
            SandboxError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SandboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SandboxError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SandboxError {
    fn from(err: std::io::Error) -> Self {
        SandboxError::Io(err)
    }
}

impl From<SandboxError> for eva_mcp_core::McpError {
    fn from(err: SandboxError) -> Self {
        eva_mcp_core::McpError::server_error(err.to_string())
    }
}

/// A filesystem sandbox rooted at a workspace directory.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Creates a sandbox rooted at the given directory, at the directory
    /// named by `EVA_MCP_WORKSPACE`, or at the current working directory,
    /// in that order of preference.
    ///
    /// # Errors
    ///
    /// Fails when the chosen root cannot be canonicalized.
    pub fn new(root: Option<PathBuf>) -> std::io::Result<Self> {
        let root = match root {
            Some(path) => path,
            None => match env::var_os(WORKSPACE_ENV) {
                Some(path) => PathBuf::from(path),
                None => env::current_dir()?,
            },
        };
        let root = fs::canonicalize(root)?;
        debug!(target: targets::SANDBOX, "workspace root: {}", root.display());
        Ok(Self { root })
    }

    /// Returns the canonical workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a relative path against the workspace root.
    ///
    /// Both `/` and `\` separators are accepted. The joined path is
    /// normalized component-wise and must remain at or below the root.
    ///
    /// # Errors
    ///
    /// Fails with `PathOutsideWorkspace` when normalization escapes the root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, SandboxError> {
        let unified = relative.replace('\\', "/");
        let joined = self.root.join(unified.trim_start_matches('/'));
        let resolved = normalize(&joined);

        if resolved == self.root || resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(SandboxError::PathOutsideWorkspace(relative.to_string()))
        }
    }

    /// Lists up to `max` regular files below the root, depth-first, as
    /// root-relative paths. Directory order is platform-defined.
    ///
    /// # Errors
    ///
    /// Fails on filesystem errors during traversal.
    pub fn list(&self, max: usize) -> Result<Vec<String>, SandboxError> {
        let mut entries = Vec::new();
        let mut stack = vec![self.root.clone()];

        while let Some(dir) = stack.pop() {
            if entries.len() >= max {
                break;
            }
            for entry in fs::read_dir(&dir)? {
                if entries.len() >= max {
                    break;
                }
                let entry = entry?;
                let path = entry.path();
                let file_type = entry.file_type()?;
                if file_type.is_dir() {
                    stack.push(path);
                } else if file_type.is_file() {
                    if let Ok(relative) = path.strip_prefix(&self.root) {
                        entries.push(relative.to_string_lossy().into_owned());
                    }
                }
            }
        }
        Ok(entries)
    }

    /// Reads a workspace file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Fails with `PathOutsideWorkspace` on containment violations,
    /// `NotAFile` when the target is not a regular file, and `Io` on read
    /// failures.
    pub fn read(&self, relative: &str) -> Result<FileContents, SandboxError> {
        let resolved = self.resolve(relative)?;
        let metadata = fs::metadata(&resolved)?;
        if !metadata.is_file() {
            return Err(SandboxError::NotAFile(relative.to_string()));
        }
        let content = fs::read_to_string(&resolved)?;
        Ok(FileContents {
            path: relative.to_string(),
            content,
        })
    }
}

/// Normalizes a path component-wise: `.` is dropped, `..` pops the previous
/// component. No filesystem access is involved.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
