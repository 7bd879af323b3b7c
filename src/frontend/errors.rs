use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("failed to set Solidity language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,

    #[error("syntax error at line {line}, column {column}")]
    SyntaxError { line: usize, column: usize },

    #[error("multiple syntax errors detected: {count} ERROR nodes, first at line {line}, column {column}")]
    MultipleSyntaxErrors {
        count: usize,
        line: usize,
        column: usize,
    },

    #[error("invalid JSON AST: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid JSON AST: {message}")]
    InvalidAst { message: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
