//! Error types for the compilation crate.

use thiserror::Error;

/// Errors that can occur while building or running a pass pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] partiq_ir::IrError),

    /// Invalid pass configuration.
    #[error("Invalid pass configuration: {0}")]
    InvalidConfiguration(String),

    /// Gate name not recognised in a workflow.
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// Pass execution failed.
    #[error("Pass '{name}' failed: {reason}")]
    PassFailed { name: String, reason: String },

    /// Workflow file could not be parsed or serialized.
    #[error("Invalid workflow: {0}")]
    Workflow(String),

    /// Workflow file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
