// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result iteration for query execution
//!
//! Executors never look at the physical layout of an intermediate result; they
//! walk it through an [`Iter`] built over a shared handle to the computed value.

pub mod config;
pub mod error;
pub mod iterator;

// Re-export the main types for convenience
pub use config::IterConfig;
pub use error::{IterError, Result};
pub use iterator::{
    DefaultIter, GetNeighborsIter, Iter, IterKind, LogicalRow, LogicalRowKind, PropIter,
    SequentialIter,
};
