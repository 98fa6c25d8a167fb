// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! graphiter - result iteration for a distributed graph query engine
//!
//! Intermediate query results come in three physical shapes: neighbor-expansion
//! batches with per-vertex edge lists, flat property-fetch batches, and plain
//! row batches. This crate puts one navigation contract over all of them so that
//! filter, project, sort, dedup, join and aggregate operators can consume any
//! upstream result the same way.
//!
//! # Example
//!
//! ```ignore
//! use graphiter::{DataSet, Iter, Value};
//! use std::sync::Arc;
//!
//! let mut ds = DataSet::new(["name", "age"]);
//! ds.push(vec![Value::from("Tim"), Value::from(42)]);
//!
//! let mut iter = Iter::from_value(Arc::new(Value::from(ds)))?;
//! while iter.valid() {
//!     println!("{:?}", iter.get_column("name"));
//!     iter.next();
//! }
//! ```
//!
//! # Sharing
//!
//! Every iterator holds an `Arc` to the value it walks. [`Iter::copy`] gives an
//! independent cursor over the same value; structural changes (erase, select,
//! sample) copy the table first when it is still shared, so one cursor never
//! invalidates the rows another is reading.

pub mod exec;
pub mod value;

pub use exec::{
    DefaultIter, GetNeighborsIter, Iter, IterConfig, IterError, IterKind, LogicalRow,
    LogicalRowKind, PropIter, Result, SequentialIter,
};
pub use value::{
    DataSet, Edge, EdgeKey, List, NullType, Row, Tag, Value, Vertex, EMPTY_VALUE, NULL_BAD_TYPE,
    NULL_VALUE,
};
