//! layerconf CLI library
//!
//! This module exposes the CLI main function for use by embedders that
//! want to bundle the CLI binary.

mod cli;

pub use cli::run;
