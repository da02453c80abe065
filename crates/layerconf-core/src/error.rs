//! Error types for layerconf
//!
//! Parse failures are the only underlying errors translated into a domain
//! error with extra context; I/O failures pass through with their original
//! message, unwrapped and never retried.

use std::fmt;

/// Result type alias for layerconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for layerconf operations
#[derive(Debug, Clone)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Source location (line, column) if available
    pub source_location: Option<SourceLocation>,
    /// Actionable help message
    pub help: Option<String>,
    /// Underlying cause (as string for Clone compatibility)
    pub cause: Option<String>,
}

/// Location in a source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

/// Categories of errors that can occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed YAML syntax
    Parse,
    /// Circular include chain detected during loading
    CircularInclude { chain: Vec<String> },
    /// Error accessing a path that doesn't exist
    PathNotFound { path: String },
    /// I/O error (file not found, permission denied, etc.)
    Io,
}

impl Error {
    /// Create a new parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            source_location: None,
            help: None,
            cause: Some(message.into()),
        }
    }

    /// Create a circular include error
    pub fn circular_include(chain: Vec<String>) -> Self {
        Self {
            kind: ErrorKind::CircularInclude { chain },
            source_location: None,
            help: Some("Break the cycle by removing one of the include directives".into()),
            cause: None,
        }
    }

    /// Create a path not found error
    pub fn path_not_found(path: impl Into<String>) -> Self {
        let path_str = path.into();
        Self {
            kind: ErrorKind::PathNotFound {
                path: path_str.clone(),
            },
            source_location: None,
            help: Some(format!(
                "Check that '{}' exists in the configuration",
                path_str
            )),
            cause: None,
        }
    }

    /// Create an I/O error carrying the original message
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io,
            source_location: None,
            help: None,
            cause: Some(message.into()),
        }
    }

    /// Add source location to the error
    pub fn with_source_location(mut self, loc: SourceLocation) -> Self {
        self.source_location = Some(loc);
        self
    }

    /// Add help message to the error
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io(e.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Parse => write!(f, "Parse error")?,
            ErrorKind::CircularInclude { chain } => {
                write!(f, "Circular include detected: {}", chain.join(" -> "))?
            }
            ErrorKind::PathNotFound { path } => write!(f, "Path not found: {}", path)?,
            ErrorKind::Io => write!(f, "I/O error")?,
        }

        if let Some(loc) = &self.source_location {
            write!(f, "\n  Location: line {}, column {}", loc.line, loc.column)?;
        }

        if let Some(cause) = &self.cause {
            write!(f, "\n  {}", cause)?;
        }

        if let Some(help) = &self.help {
            write!(f, "\n  Help: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}
