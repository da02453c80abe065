//! Include resolution
//!
//! An `include` directive names another configuration file whose content
//! becomes the defaults layer beneath the current file. Resolution is an
//! injectable capability so embedders can supply package registries or
//! in-memory sources, and so tests run without a filesystem.
//!
//! A locator that maps to no resource yields `Ok(None)` and the directive
//! is ignored (silent-skip policy). Only real I/O failures are errors.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use crate::error::Result;

/// Optional scheme prefix accepted on package-relative locators.
const PKG_PREFIX: &str = "pkg:";

/// Maps an include locator to the raw text of the referenced file.
pub trait IncludeResolver: Send + Sync {
    /// Resolve a locator to file content.
    ///
    /// Returns `Ok(None)` when the locator does not map to any resource.
    fn resolve(&self, locator: &str) -> Result<Option<String>>;

    /// Get the name of this resolver, for logging.
    fn name(&self) -> &str;
}

/// Resolves locators as relative paths under a set of root directories,
/// tried in order.
///
/// Locators that are absolute or that traverse outside the roots with
/// `..` never resolve.
#[derive(Debug, Clone)]
pub struct FsIncludeResolver {
    roots: Vec<PathBuf>,
}

impl FsIncludeResolver {
    /// Create a resolver with a single root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    /// Create a resolver searching multiple roots in order
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Interpret a locator as a root-relative path, or `None` if it is not
    /// a safe relative path.
    fn relative_path(locator: &str) -> Option<PathBuf> {
        let path = locator.strip_prefix(PKG_PREFIX).unwrap_or(locator);
        let path = Path::new(path);
        let mut clean = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => clean.push(part),
                Component::CurDir => {}
                // Absolute paths and parent traversal escape the roots
                Component::RootDir | Component::Prefix(_) | Component::ParentDir => return None,
            }
        }
        if clean.as_os_str().is_empty() {
            None
        } else {
            Some(clean)
        }
    }
}

impl IncludeResolver for FsIncludeResolver {
    fn resolve(&self, locator: &str) -> Result<Option<String>> {
        let Some(relative) = Self::relative_path(locator) else {
            log::debug!("include locator '{}' is not root-relative", locator);
            return Ok(None);
        };

        for root in &self.roots {
            let candidate = root.join(&relative);
            if candidate.is_file() {
                // A read failure here is a real I/O error, not a miss
                let content = std::fs::read_to_string(&candidate)?;
                log::debug!(
                    "include '{}' resolved to {}",
                    locator,
                    candidate.display()
                );
                return Ok(Some(content));
            }
        }

        Ok(None)
    }

    fn name(&self) -> &str {
        "fs"
    }
}

/// In-memory resolver backed by a locator -> content map.
///
/// Deterministic and filesystem-free; the resolver of choice for tests and
/// for embedders that carry configuration sources in memory.
#[derive(Debug, Clone, Default)]
pub struct MapIncludeResolver {
    entries: HashMap<String, String>,
}

impl MapIncludeResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a locator -> content entry, replacing any existing one
    pub fn insert(&mut self, locator: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(locator.into(), content.into());
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with(mut self, locator: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(locator, content);
        self
    }
}

impl IncludeResolver for MapIncludeResolver {
    fn resolve(&self, locator: &str) -> Result<Option<String>> {
        Ok(self.entries.get(locator).cloned())
    }

    fn name(&self) -> &str {
        "map"
    }
}
