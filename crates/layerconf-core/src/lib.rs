//! layerconf-core: layered configuration loading with include resolution
//!
//! This crate parses YAML configuration into a generic [`Value`] tree,
//! resolves a top-level `include` directive to a base configuration file,
//! and deep-merges the current file's overrides onto that base.
//!
//! # Example
//!
//! ```rust
//! use layerconf_core::Loader;
//!
//! let yaml = r#"
//! database:
//!   host: localhost
//!   port: 5432
//! "#;
//!
//! let config = Loader::new().load_str(yaml).unwrap();
//! assert_eq!(config.get_path("database.host").unwrap().as_str(), Some("localhost"));
//! ```

pub mod convert;
pub mod error;
pub mod include;
pub mod merge;
pub mod value;

mod loader;

pub use error::{Error, ErrorKind, Result, SourceLocation};
pub use include::{FsIncludeResolver, IncludeResolver, MapIncludeResolver};
pub use loader::{Loader, INCLUDE_KEY};
pub use value::Value;
