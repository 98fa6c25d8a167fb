// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for result iteration

use super::iterator::IterKind;
use thiserror::Error;

/// Result type alias for iterator operations
pub type Result<T> = std::result::Result<T, IterError>;

/// Main error type for result iteration
#[derive(Error, Debug)]
pub enum IterError {
    /// A tag, edge or property column name that cannot be parsed
    #[error("Bad column name format: {0}")]
    BadColumnName(String),

    /// Packed edge columns must carry a `+`/`-` direction marker
    #[error("Bad edge name: {0}")]
    BadEdgeName(String),

    /// Neighbor-expansion tables must start with the vertex id column
    #[error("Bad column layout: {0}")]
    BadColumnLayout(String),

    /// The handle does not hold a list of tables
    #[error("Value type is not list, type: {0}")]
    NotAList(String),

    /// The handle, or one of its list entries, does not hold a table
    #[error("Value type is not a data set, type: {0}")]
    NotADataSet(String),

    /// Column lookup by name on the current table failed
    #[error("Don't exist column `{0}'.")]
    ColumnNotFound(String),

    /// Unioned inputs disagree on their columns
    #[error("Schema mismatch: expected columns {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The operation is not defined for this iterator kind
    #[error("`{operation}' is not supported by {kind}")]
    Unsupported {
        kind: IterKind,
        operation: &'static str,
    },

    /// A reset past the end of a non-empty sequence
    #[error("Position {pos} is out of range for size {size}")]
    PositionOutOfRange { pos: usize, size: usize },

    /// A union accumulated more rows than the memory budget allows
    #[error("Memory limit exceeded: {used} bytes used, limit is {limit} bytes")]
    MemoryLimitExceeded { limit: usize, used: usize },

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl IterError {
    pub(crate) fn unsupported(kind: IterKind, operation: &'static str) -> Self {
        IterError::Unsupported { kind, operation }
    }
}
