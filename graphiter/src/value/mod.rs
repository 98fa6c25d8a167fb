// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Value type system for query-intermediate results
//!
//! This module provides:
//! - The tagged `Value` union carried through every result
//! - `Row` and `DataSet` containers for tabular results
//! - Vertex, tag and edge composites assembled by the iterators

mod dataset;
mod graph;

pub use dataset::{DataSet, Row};
pub use graph::{Edge, EdgeKey, Tag, Vertex};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Reserved column holding the vertex id of a neighbor or property row
pub const VID: &str = "_vid";
/// Reserved column holding per-request statistics
pub const STATS: &str = "_stats";
/// Reserved column holding per-row expression results
pub const EXPR: &str = "_expr";
/// Prefix of packed tag columns
pub const TAG: &str = "_tag";
/// Prefix of packed edge columns
pub const EDGE: &str = "_edge";
/// Reserved edge property names
pub const SRC: &str = "_src";
pub const DST: &str = "_dst";
pub const TYPE: &str = "_type";
pub const RANK: &str = "_rank";

/// Flavours of null a lookup can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullType {
    /// Plain null: nothing to read at this position
    Null,
    /// The value exists but has the wrong shape for the request
    BadType,
}

/// The null sentinel returned by lookups on an invalid cursor or unknown column
pub static NULL_VALUE: Value = Value::Null(NullType::Null);
/// The sentinel returned when a value has an unexpected shape or index
pub static NULL_BAD_TYPE: Value = Value::Null(NullType::BadType);
/// The absent value
pub static EMPTY_VALUE: Value = Value::Empty;

/// A property value or query-intermediate result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Empty,
    Null(NullType),
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(List),
    Map(BTreeMap<String, Value>),
    Vertex(Box<Vertex>),
    Edge(Box<Edge>),
    DataSet(DataSet),
}

// Floats compare and hash by their bit pattern
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Empty, Value::Empty) => true,
            (Value::Null(a), Value::Null(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Vertex(a), Value::Vertex(b)) => a == b,
            (Value::Edge(a), Value::Edge(b)) => a == b,
            (Value::DataSet(a), Value::DataSet(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Empty => {}
            Value::Null(kind) => kind.hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::List(list) => list.hash(state),
            Value::Map(map) => map.hash(state),
            Value::Vertex(vertex) => vertex.hash(state),
            Value::Edge(edge) => edge.hash(state),
            Value::DataSet(ds) => ds.hash(state),
        }
    }
}

impl Value {
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    pub fn is_bad_null(&self) -> bool {
        matches!(self, Value::Null(NullType::BadType))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_vertex(&self) -> bool {
        matches!(self, Value::Vertex(_))
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, Value::Edge(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_dataset(&self) -> Option<&DataSet> {
        match self {
            Value::DataSet(ds) => Some(ds),
            _ => None,
        }
    }

    pub fn as_vertex(&self) -> Option<&Vertex> {
        match self {
            Value::Vertex(vertex) => Some(vertex),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Value::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    /// Vertex ids are either strings or integers
    pub fn is_valid_vid(&self) -> bool {
        matches!(self, Value::String(_) | Value::Int(_))
    }

    /// Name of the variant, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Null(_) => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Vertex(_) => "vertex",
            Value::Edge(_) => "edge",
            Value::DataSet(_) => "dataset",
        }
    }

    /// Rough heap footprint in bytes, used for memory budgeting
    pub fn estimated_size(&self) -> usize {
        std::mem::size_of::<Value>()
            + match self {
                Value::String(s) => s.len(),
                Value::List(list) => list.values.iter().map(Value::estimated_size).sum(),
                Value::Map(map) => map
                    .iter()
                    .map(|(k, v)| k.len() + v.estimated_size())
                    .sum(),
                Value::Vertex(vertex) => {
                    vertex.vid.estimated_size()
                        + vertex
                            .tags
                            .iter()
                            .map(|tag| {
                                tag.name.len()
                                    + tag
                                        .props
                                        .iter()
                                        .map(|(k, v)| k.len() + v.estimated_size())
                                        .sum::<usize>()
                            })
                            .sum::<usize>()
                }
                Value::Edge(edge) => {
                    edge.src.estimated_size()
                        + edge.dst.estimated_size()
                        + edge.name.len()
                        + edge
                            .props
                            .iter()
                            .map(|(k, v)| k.len() + v.estimated_size())
                            .sum::<usize>()
                }
                Value::DataSet(ds) => ds.rows.iter().map(Row::estimated_size).sum(),
                _ => 0,
            }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<DataSet> for Value {
    fn from(ds: DataSet) -> Self {
        Value::DataSet(ds)
    }
}

impl From<Vertex> for Value {
    fn from(vertex: Vertex) -> Self {
        Value::Vertex(Box::new(vertex))
    }
}

impl From<Edge> for Value {
    fn from(edge: Edge) -> Self {
        Value::Edge(Box::new(edge))
    }
}

/// An ordered list of values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct List {
    pub values: Vec<Value>,
}

impl List {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }
}

impl From<Vec<Value>> for List {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl std::ops::Index<usize> for List {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.values[index]
    }
}
