//! Configuration loading pipeline
//!
//! Read text -> parse -> convert -> resolve a top-level `include` -> merge.
//! The included file supplies the defaults layer; the current file's keys
//! (the literal `include` key among them) take precedence and survive into
//! the merged result. Included files may themselves include further files;
//! the loader tracks the locator chain and fails fast on cycles.

use std::path::Path;
use std::sync::Arc;

use crate::convert::convert;
use crate::error::{Error, Result, SourceLocation};
use crate::include::{FsIncludeResolver, IncludeResolver};
use crate::merge::merge;
use crate::value::Value;

/// The top-level key naming the base configuration file.
pub const INCLUDE_KEY: &str = "include";

/// Loads configuration text into a fully merged [`Value`].
#[derive(Clone, Default)]
pub struct Loader {
    resolver: Option<Arc<dyn IncludeResolver>>,
}

impl Loader {
    /// Create a loader that skips any `include` directive it encounters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader using the given include resolver
    pub fn with_resolver(resolver: Arc<dyn IncludeResolver>) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    /// Load configuration from YAML text.
    ///
    /// A document whose top level is not a mapping loads as an empty
    /// mapping.
    pub fn load_str(&self, content: &str) -> Result<Value> {
        let mut chain = Vec::new();
        self.load_guarded(content, &mut chain)
    }

    /// Load configuration from `filename` resolved against `root`.
    ///
    /// When the loader has no resolver of its own, includes are resolved
    /// relative to `root`. I/O failures propagate unchanged.
    pub fn load_file(&self, root: &Path, filename: &str) -> Result<Value> {
        let path = root.join(filename);
        let content = std::fs::read_to_string(&path)?;

        match &self.resolver {
            Some(_) => self.load_str(&content),
            None => Loader::with_resolver(Arc::new(FsIncludeResolver::new(root))).load_str(&content),
        }
    }

    /// One pipeline pass over a single document, with the locators
    /// currently being resolved threaded through for cycle detection.
    fn load_guarded(&self, content: &str, chain: &mut Vec<String>) -> Result<Value> {
        let node: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;

        let current = convert(&node);
        if !current.is_mapping() {
            return Ok(Value::empty_mapping());
        }

        let locator = match current
            .as_mapping()
            .and_then(|map| map.get(INCLUDE_KEY))
            .and_then(Value::as_str)
        {
            Some(locator) => locator.to_string(),
            None => return Ok(current),
        };

        let Some(resolver) = &self.resolver else {
            log::debug!(
                "include '{}' present but no resolver configured; skipping",
                locator
            );
            return Ok(current);
        };

        if chain.contains(&locator) {
            let mut cycle = chain.clone();
            cycle.push(locator);
            return Err(Error::circular_include(cycle));
        }

        let Some(base_text) = resolver.resolve(&locator)? else {
            log::debug!(
                "include '{}' not resolved by '{}' resolver; skipping",
                locator,
                resolver.name()
            );
            return Ok(current);
        };

        chain.push(locator);
        let base = self.load_guarded(&base_text, chain)?;
        chain.pop();

        Ok(merge(&base, &current))
    }
}

/// Translate a YAML syntax failure into a parse error with its source span.
fn parse_error(e: serde_yaml::Error) -> Error {
    let err = Error::parse(e.to_string());
    match e.location() {
        Some(loc) => err.with_source_location(SourceLocation {
            line: loc.line(),
            column: loc.column(),
        }),
        None => err,
    }
}
