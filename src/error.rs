//! Error types shared across the crate.
//!
//! Every operator either returns a fully-constructed frame or fails fast
//! with one of the variants below; no operation returns a partial result.

// dependencies
use thiserror::Error;
use crate::column::{ColumnKind, path::ColumnPath};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FrameError>;

/// All failure modes surfaced by frame construction, column resolution,
/// and the relational operators.
#[derive(Debug, Error)]
pub enum FrameError {
    /// A name or path lookup failed under the `Fail` resolution policy.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnPath),

    /// `first`/`last`/`single` found no matching column.
    #[error("no column matched the selection")]
    EmptyMatch,

    /// `single` matched more than one column.
    #[error("expected a single column, found {0} matches")]
    AmbiguousMatch(usize),

    /// A typed accessor resolved a column of the wrong kind.
    #[error("expected a {expected} column at {path}, found {found}")]
    KindMismatch {
        expected: ColumnKind,
        found: ColumnKind,
        path: ColumnPath,
    },

    /// Structural inconsistency between columns or frames.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Columns of unequal length, or a row index out of bounds.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Two sibling columns with the same name.
    #[error("duplicate column name: {0}")]
    DuplicateName(String),

    /// An operation that has no defined semantics for the given column kind.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
