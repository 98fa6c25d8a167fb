// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result iterators
//!
//! Every executor consumes its input through [`Iter`], whatever the shape of
//! the value behind it:
//! - [`DefaultIter`] over a single non-tabular value
//! - [`GetNeighborsIter`] over neighbor-expansion tables, one entry per edge
//! - [`SequentialIter`] over a plain table, or the union of other iterators
//! - [`PropIter`] over property-fetch tables
//!
//! All of them hold an `Arc` to the computed value; any number of iterators can
//! walk the same value independently.

mod default_iter;
mod get_neighbors;
mod logical_row;
mod prop;
mod schema;
mod sequential;

pub use default_iter::DefaultIter;
pub use get_neighbors::GetNeighborsIter;
pub use logical_row::{LogicalRow, LogicalRowKind};
pub use prop::PropIter;
pub use schema::{NeighborSchemaIndex, OwnerProps, PropIndex, PropSchemaIndex};
pub use sequential::SequentialIter;

use crate::exec::error::{IterError, Result};
use crate::value::{List, Row, Value, NULL_BAD_TYPE};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Iterator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IterKind {
    Default,
    GetNeighbors,
    Sequential,
    Prop,
}

impl fmt::Display for IterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterKind::Default => write!(f, "default iterator"),
            IterKind::GetNeighbors => write!(f, "get neighbors iterator"),
            IterKind::Sequential => write!(f, "sequential iterator"),
            IterKind::Prop => write!(f, "prop iterator"),
        }
    }
}

/// A cursor over an intermediate result
#[derive(Debug, Clone)]
pub enum Iter {
    Default(DefaultIter),
    GetNeighbors(GetNeighborsIter),
    Sequential(SequentialIter),
    Prop(PropIter),
}

/// Forward a call to the method of the same name on every variant
macro_rules! dispatch {
    ($self:expr, $iter:ident => $body:expr) => {
        match $self {
            Iter::Default($iter) => $body,
            Iter::GetNeighbors($iter) => $body,
            Iter::Sequential($iter) => $body,
            Iter::Prop($iter) => $body,
        }
    };
}

impl Iter {
    /// Wrap a computed value in the iterator matching its shape
    ///
    /// A list made only of tables is a neighbor-expansion response, a table is
    /// a plain row set, anything else is iterated as a single value.
    /// Property-fetch results must be wrapped explicitly with [`PropIter::new`].
    pub fn from_value(value: Arc<Value>) -> Result<Self> {
        let tables = value
            .as_list()
            .is_some_and(|list| list.iter().all(|v| v.as_dataset().is_some()));
        if tables {
            Ok(Iter::GetNeighbors(GetNeighborsIter::new(value)?))
        } else if value.as_dataset().is_some() {
            Ok(Iter::Sequential(SequentialIter::new(value)?))
        } else {
            Ok(Iter::Default(DefaultIter::new(value)))
        }
    }

    pub fn kind(&self) -> IterKind {
        match self {
            Iter::Default(_) => IterKind::Default,
            Iter::GetNeighbors(_) => IterKind::GetNeighbors,
            Iter::Sequential(_) => IterKind::Sequential,
            Iter::Prop(_) => IterKind::Prop,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Iter::Default(_))
    }

    pub fn is_get_neighbors(&self) -> bool {
        matches!(self, Iter::GetNeighbors(_))
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, Iter::Sequential(_))
    }

    pub fn is_prop(&self) -> bool {
        matches!(self, Iter::Prop(_))
    }

    /// The shared handle this iterator reads from
    pub fn value_ptr(&self) -> &Arc<Value> {
        dispatch!(self, it => it.value_ptr())
    }

    pub fn valid(&self) -> bool {
        dispatch!(self, it => it.valid())
    }

    pub fn next(&mut self) {
        dispatch!(self, it => it.next())
    }

    /// Move the cursor to `pos`; repeated calls with the same position are
    /// equivalent to one
    pub fn reset(&mut self, pos: usize) -> Result<()> {
        dispatch!(self, it => it.reset(pos))
    }

    /// Remove the current entry; the cursor lands on the next one
    pub fn erase(&mut self) {
        dispatch!(self, it => it.erase())
    }

    /// Remove the current entry without preserving the order of the rest
    pub fn unstable_erase(&mut self) {
        dispatch!(self, it => it.unstable_erase())
    }

    /// Remove entries `[first, last)` and rewind
    pub fn erase_range(&mut self, first: usize, last: usize) -> Result<()> {
        dispatch!(self, it => it.erase_range(first, last))
    }

    pub fn clear(&mut self) {
        dispatch!(self, it => it.clear())
    }

    pub fn size(&self) -> usize {
        dispatch!(self, it => it.size())
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn get_column(&self, name: &str) -> &Value {
        dispatch!(self, it => it.get_column(name))
    }

    /// Column of the current row by position; negative positions count from the end
    pub fn get_column_by_index(&self, index: i64) -> &Value {
        dispatch!(self, it => it.get_column_by_index(index))
    }

    pub fn get_tag_prop(&self, tag: &str, prop: &str) -> &Value {
        dispatch!(self, it => it.get_tag_prop(tag, prop))
    }

    pub fn get_edge_prop(&self, edge: &str, prop: &str) -> &Value {
        dispatch!(self, it => it.get_edge_prop(edge, prop))
    }

    pub fn get_vertex(&self) -> Value {
        match self {
            Iter::GetNeighbors(it) => it.get_vertex(),
            Iter::Prop(it) => it.get_vertex(),
            _ => {
                log::warn!("get_vertex called on a {}", self.kind());
                Value::Empty
            }
        }
    }

    pub fn get_edge(&self) -> Value {
        match self {
            Iter::GetNeighbors(it) => it.get_edge(),
            Iter::Prop(it) => it.get_edge(),
            _ => {
                log::warn!("get_edge called on a {}", self.kind());
                Value::Empty
            }
        }
    }

    pub fn get_vertices(&self) -> List {
        match self {
            Iter::GetNeighbors(it) => it.get_vertices(),
            Iter::Prop(it) => it.get_vertices(),
            _ => List::default(),
        }
    }

    pub fn get_edges(&self) -> List {
        match self {
            Iter::GetNeighbors(it) => it.get_edges(),
            Iter::Prop(it) => it.get_edges(),
            _ => List::default(),
        }
    }

    /// The physical row under the cursor
    ///
    /// `None` for kinds whose entries do not map one to one onto physical
    /// rows: a neighbor-expansion entry is an edge, not its vertex row.
    pub fn row(&self) -> Option<&Row> {
        match self {
            Iter::Sequential(it) => it.row(),
            Iter::Prop(it) => it.row(),
            Iter::Default(_) | Iter::GetNeighbors(_) => None,
        }
    }

    pub fn logical_row(&self) -> Option<LogicalRow<'_>> {
        match self {
            Iter::Sequential(it) => it.logical_row(),
            Iter::Prop(it) => it.logical_row(),
            _ => None,
        }
    }

    /// An owned copy of the current row
    pub fn materialize_row(&self) -> Option<Row> {
        dispatch!(self, it => it.materialize_row())
    }

    /// Hand the current row over to result collection
    ///
    /// Row-backed kinds give up their row; the others produce a copy.
    pub fn move_row(&mut self) -> Option<Row> {
        match self {
            Iter::Sequential(it) => it.move_row(),
            Iter::Prop(it) => it.move_row(),
            Iter::Default(it) => it.materialize_row(),
            Iter::GetNeighbors(it) => it.materialize_row(),
        }
    }

    /// Column names of the current table
    pub fn col_names(&self) -> &[String] {
        match self {
            Iter::Default(_) => &[],
            Iter::GetNeighbors(it) => it.col_names(),
            Iter::Sequential(it) => it.col_names(),
            Iter::Prop(it) => it.col_names(),
        }
    }

    /// Keep only entries `[offset, offset + count)`
    pub fn select(&mut self, offset: usize, count: usize) -> Result<()> {
        let kind = self.kind();
        match self {
            Iter::Sequential(it) => it.select(offset, count),
            Iter::Prop(it) => it.select(offset, count),
            _ => Err(IterError::unsupported(kind, "select")),
        }
    }

    /// Keep `count` entries chosen uniformly at random
    pub fn sample(&mut self, count: usize, rng: &mut fastrand::Rng) -> Result<()> {
        match self {
            Iter::GetNeighbors(it) => it.sample(count, rng),
            Iter::Sequential(it) => it.sample(count, rng),
            Iter::Prop(it) => it.sample(count, rng),
            Iter::Default(_) => return Err(IterError::unsupported(IterKind::Default, "sample")),
        }
        Ok(())
    }

    /// An independent iterator over the same value, positioned at the start
    pub fn copy(&self) -> Self {
        match self {
            Iter::Default(it) => Iter::Default(it.copy()),
            Iter::GetNeighbors(it) => Iter::GetNeighbors(it.copy()),
            Iter::Sequential(it) => Iter::Sequential(it.copy()),
            Iter::Prop(it) => Iter::Prop(it.copy()),
        }
    }
}

impl From<DefaultIter> for Iter {
    fn from(iter: DefaultIter) -> Self {
        Iter::Default(iter)
    }
}

impl From<GetNeighborsIter> for Iter {
    fn from(iter: GetNeighborsIter) -> Self {
        Iter::GetNeighbors(iter)
    }
}

impl From<SequentialIter> for Iter {
    fn from(iter: SequentialIter) -> Self {
        Iter::Sequential(iter)
    }
}

impl From<PropIter> for Iter {
    fn from(iter: PropIter) -> Self {
        Iter::Prop(iter)
    }
}

pub(crate) fn index_columns(col_names: &[String]) -> HashMap<String, usize> {
    col_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

/// `row[index]`, where a negative index wraps to `(len + index) % len`
pub(crate) fn column_by_index(row: &Row, index: i64) -> &Value {
    let len = row.len() as i64;
    if index >= len || index < -len {
        return &NULL_BAD_TYPE;
    }
    row.get(((len + index) % len) as usize)
        .unwrap_or(&NULL_BAD_TYPE)
}

/// Choose `count` items uniformly at random in a single pass
pub(crate) fn reservoir_sample<T>(
    items: impl IntoIterator<Item = T>,
    count: usize,
    rng: &mut fastrand::Rng,
) -> Vec<T> {
    let mut reservoir = Vec::with_capacity(count);
    for (seen, item) in items.into_iter().enumerate() {
        if seen < count {
            reservoir.push(item);
        } else {
            let slot = rng.usize(..=seen);
            if slot < count {
                reservoir[slot] = item;
            }
        }
    }
    reservoir
}

/// Keep the vertices of `values`, first occurrence per vertex id
pub(crate) fn dedup_vertices(values: impl IntoIterator<Item = Value>) -> List {
    let mut seen = HashSet::new();
    let vertices = values
        .into_iter()
        .filter(|value| match value {
            Value::Vertex(vertex) => seen.insert(vertex.vid.clone()),
            _ => false,
        })
        .collect::<Vec<_>>();
    List::new(vertices)
}

/// Keep the edges of `values` in forward direction, first occurrence per edge key
pub(crate) fn dedup_edges(values: impl IntoIterator<Item = Value>) -> List {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for value in values {
        if let Value::Edge(mut edge) = value {
            edge.format();
            if seen.insert(edge.key()) {
                edges.push(Value::Edge(edge));
            }
        }
    }
    List::new(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Edge, Vertex};

    #[test]
    fn test_column_by_index_wraps_negative() {
        let row = Row::new(vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert_eq!(column_by_index(&row, 0), &Value::from(1));
        assert_eq!(column_by_index(&row, -1), &Value::from(3));
        assert_eq!(column_by_index(&row, -3), &Value::from(1));
        assert_eq!(column_by_index(&row, -4), &NULL_BAD_TYPE);
        assert_eq!(column_by_index(&row, 3), &NULL_BAD_TYPE);
        assert_eq!(column_by_index(&row, i64::MIN), &NULL_BAD_TYPE);
        assert_eq!(column_by_index(&Row::default(), 0), &NULL_BAD_TYPE);
    }

    #[test]
    fn test_reservoir_sample_size() {
        let mut rng = fastrand::Rng::with_seed(3);
        let picked = reservoir_sample(0..100, 10, &mut rng);
        assert_eq!(picked.len(), 10);
        assert!(picked.iter().all(|i| (0..100).contains(i)));
        assert_eq!(reservoir_sample(0..3, 10, &mut rng), vec![0, 1, 2]);
    }

    #[test]
    fn test_dedup_edges_normalizes_direction() {
        let forward = Edge {
            src: Value::from("a"),
            dst: Value::from("b"),
            edge_type: 1,
            name: "like".to_string(),
            ..Default::default()
        };
        let reverse = Edge {
            src: Value::from("b"),
            dst: Value::from("a"),
            edge_type: -1,
            name: "like".to_string(),
            ..Default::default()
        };
        let edges = dedup_edges(vec![
            Value::from(forward.clone()),
            Value::from(reverse),
            Value::from(1),
        ]);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0], Value::from(forward));
    }

    #[test]
    fn test_dedup_vertices_by_vid() {
        let vertices = dedup_vertices(vec![
            Value::from(Vertex::new("a")),
            Value::from(Vertex::new("a")),
            Value::from(Vertex::new("b")),
            Value::Empty,
        ]);
        assert_eq!(vertices.len(), 2);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(IterKind::GetNeighbors.to_string(), "get neighbors iterator");
        assert_eq!(IterKind::Prop.to_string(), "prop iterator");
    }
}
