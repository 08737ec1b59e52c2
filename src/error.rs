// ============================================
// src/error.rs
// Error types for the sequencer and the content loader
// ============================================

use std::path::PathBuf;

/// Failures of a draw. Both are recoverable by the host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequencerError {
    /// The pool (or one of the combo pools) has no items.
    #[error("content pool is empty")]
    EmptyPool,

    /// Every attempt produced a disallowed combination.
    #[error("no allowed combination found after {attempts} attempts")]
    ConstraintExhausted { attempts: u32 },

    /// The pinned-first index does not exist in the pool.
    #[error("pinned index {index} is out of range for a pool of {len} items")]
    PinOutOfRange { index: usize, len: usize },
}

/// Failures while reading a content document.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} has no collection named '{key}'")]
    MissingKey { path: PathBuf, key: String },

    #[error("collection '{key}' in {path} is empty")]
    Empty { path: PathBuf, key: String },
}

pub type SequencerResult<T> = Result<T, SequencerError>;
