//! Error types for dispatch, validation and compilation.

use thiserror::Error;

/// Why a single action block was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    #[error("unsupported module `{module}` (expected one of: {allowed})")]
    UnsupportedModule { module: String, allowed: String },

    #[error("module `{module}` has no operation `{operation}` (expected one of: {allowed})")]
    UnsupportedOperation {
        module: String,
        operation: String,
        allowed: String,
    },

    #[error("missing mandatory parameter `{key}`")]
    MissingParameter { key: &'static str },

    #[error("invalid value {value:?} for parameter `{key}`: {reason}")]
    InvalidParameter {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// First failure of a compilation pass. Nothing is emitted once this is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("block {index} ({module}.{operation}): {source}")]
pub struct CompileError {
    pub index: usize,
    pub module: String,
    pub operation: String,
    #[source]
    pub source: BlockError,
}
