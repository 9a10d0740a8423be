//! Error types for json-dart-gen.
//!
//! Inference itself cannot fail; everything here happens at the boundary
//! (parsing input, resolving inputs, writing output).
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The input text is not JSON. Raised before any class is registered.
    #[error("Invalid JSON: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error("JSON pointer {pointer:?} does not select anything in the input")]
    PointerNotFound { pointer: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to read a matched input: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("input pattern matched no files: {pattern}")]
    NoMatches { pattern: String },

    #[error("failed to format generated code")]
    Format(#[from] std::fmt::Error),

    #[error("{count} inputs need --out-dir; a single --out file cannot hold them")]
    MissingOutDir { count: usize },

    #[error("{first} and {second} would both be written to {file_name}; rename one of the inputs")]
    DuplicateOutput {
        file_name: String,
        first: String,
        second: String,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
