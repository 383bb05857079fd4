//! Error types for OneTable
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using OneTableError
pub type Result<T> = std::result::Result<T, OneTableError>;

/// Unified error type for OneTable operations
#[derive(Debug, Error)]
pub enum OneTableError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid key {0:?}: contains one of the forbidden characters '\\n' or ','")]
    InvalidKey(String),

    // -------------------------------------------------------------------------
    // Recovery Errors
    // -------------------------------------------------------------------------
    #[error("Invalid record at line {line}: {reason}")]
    Corruption { line: usize, reason: String },

    #[error("Inconsistent storage: {0}")]
    Inconsistent(String),

    // -------------------------------------------------------------------------
    // Index Errors
    // -------------------------------------------------------------------------
    #[error("Index error: {0}")]
    Index(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
