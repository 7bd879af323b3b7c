//! Front ends turning source text into [`Node`] trees.
//!
//! Solidity source is parsed with tree-sitter; pre-built JSON syntax trees
//! (as emitted by `solidity-parser-antlr`) are loaded directly. Both produce
//! the same node model, but node kinds other than contracts, functions and
//! comments differ between them, so trees are only comparable when they come
//! from the same front end.

pub mod errors;
pub mod json;
pub mod solidity;

pub use errors::FrontendError;
pub use json::parse_json_ast;
pub use solidity::SolidityParser;

use crate::ast::Node;
use crate::pool::with_parser;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Which front end reads an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// JSON for `.json` files, Solidity otherwise
    #[default]
    Auto,
    /// Solidity source
    Solidity,
    /// JSON syntax tree
    Json,
}

impl InputFormat {
    /// Resolve `Auto` against a file path.
    pub fn resolve(self, path: Option<&Path>) -> InputFormat {
        match self {
            InputFormat::Auto => match path.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
                _ => InputFormat::Solidity,
            },
            explicit => explicit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Keep node spans. Without it every span is dropped.
    pub locations: bool,
}

impl ParseOptions {
    pub fn with_locations() -> Self {
        Self { locations: true }
    }
}

/// Parse `source` with the front end chosen by `format`.
pub fn parse_source(
    source: &str,
    format: InputFormat,
    options: ParseOptions,
) -> Result<Node, FrontendError> {
    let mut tree = match format.resolve(None) {
        InputFormat::Json => parse_json_ast(source)?,
        _ => with_parser(|parser| parser.parse(source))??,
    };
    if !options.locations {
        tree.strip_spans();
    }
    Ok(tree)
}

/// Read and parse a file.
pub fn parse_file(
    path: &Path,
    format: InputFormat,
    options: ParseOptions,
) -> Result<Node, FrontendError> {
    let source = std::fs::read_to_string(path).map_err(|source| FrontendError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = format.resolve(Some(path));
    debug!(path = %path.display(), ?format, "parsing input");
    parse_source(&source, format, options)
}
