// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Iteration over neighbor-expansion results
//!
//! A neighbor-expansion response is a list of tables, one per shard or request
//! fragment. Each row holds one vertex: its id, packed tag columns, and one
//! packed edge column per edge type, each holding a list of edges. The
//! iterator flattens this into a sequence of logical entries, one per edge
//! (or one per vertex row when a table carries no edge columns).
//!
//! Entries are addressed by a physical [`Position`] and by their ordinal in the
//! traversal. Erasing an entry sets its ordinal's bit in `erased`; the tables
//! themselves are never mutated, so every cursor over the same handle keeps
//! reading valid rows, and an erased entry stays erased across rewinds.

use super::schema::{NeighborSchemaIndex, PropIndex};
use super::{column_by_index, dedup_edges, dedup_vertices, reservoir_sample, IterKind};
use crate::exec::error::{IterError, Result};
use crate::value::{
    DataSet, Edge, List, Row, Tag, Value, Vertex, DST, EMPTY_VALUE, NULL_BAD_TYPE, NULL_VALUE,
    RANK, SRC, TAG, TYPE,
};
use std::sync::Arc;

/// Physical address of one logical entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    /// Index into the iterator's schema indexes, not into the raw list
    table: usize,
    row: usize,
    column: usize,
    edge: usize,
}

/// The current entry and its ordinal in the full traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EdgeCursor {
    pos: Position,
    ordinal: usize,
}

/// Borrowed view of one logical entry
struct Entry<'a> {
    index: &'a NeighborSchemaIndex,
    row: &'a Row,
    /// Edge type index and the packed edge; `None` for edge-less tables
    edge: Option<(&'a PropIndex, &'a List)>,
}

#[derive(Debug, Clone)]
pub struct GetNeighborsIter {
    value: Arc<Value>,
    indices: Vec<NeighborSchemaIndex>,
    cursor: Option<EdgeCursor>,
    erased: Vec<bool>,
    erased_count: usize,
    total: usize,
}

impl GetNeighborsIter {
    /// Index every non-empty table of the response and move to the first entry
    pub fn new(value: Arc<Value>) -> Result<Self> {
        let indices = Self::process_list(&value).inspect_err(|e| {
            log::error!("Failed to index neighbor result: {}", e);
        })?;
        let mut iter = Self {
            value,
            indices,
            cursor: None,
            erased: Vec::new(),
            erased_count: 0,
            total: 0,
        };
        iter.total = iter.count_entries();
        iter.go_to_first_edge();
        Ok(iter)
    }

    fn process_list(value: &Value) -> Result<Vec<NeighborSchemaIndex>> {
        let list = value
            .as_list()
            .ok_or_else(|| IterError::NotAList(value.type_name().to_string()))?;
        let mut indices = Vec::with_capacity(list.len());
        for (position, item) in list.iter().enumerate() {
            let ds = item
                .as_dataset()
                .ok_or_else(|| IterError::NotADataSet(item.type_name().to_string()))?;
            if ds.rows.is_empty() {
                continue;
            }
            indices.push(NeighborSchemaIndex::build(position, ds)?);
        }
        Ok(indices)
    }

    pub fn value_ptr(&self) -> &Arc<Value> {
        &self.value
    }

    fn table(&self, table: usize) -> Option<&DataSet> {
        let position = self.indices.get(table)?.position;
        self.value.as_list()?.get(position)?.as_dataset()
    }

    fn table_start(&self, table: usize) -> Position {
        let column = self
            .indices
            .get(table)
            .and_then(NeighborSchemaIndex::edge_bounds)
            .map_or(0, |bounds| *bounds.start());
        Position {
            table,
            row: 0,
            column,
            edge: 0,
        }
    }

    /// The position right after `pos`, which may not hold an entry
    fn successor(&self, pos: Position) -> Position {
        let has_edges = self
            .indices
            .get(pos.table)
            .is_some_and(NeighborSchemaIndex::has_edges);
        if has_edges {
            Position {
                edge: pos.edge + 1,
                ..pos
            }
        } else {
            Position {
                row: pos.row + 1,
                ..pos
            }
        }
    }

    /// First entry at or after `pos`: next edge in the column, then the next
    /// edge column of the row, then the next row, then the next table
    fn locate(&self, mut pos: Position) -> Option<Position> {
        while let Some(index) = self.indices.get(pos.table) {
            let rows = self.table(pos.table).map_or(&[][..], |ds| ds.rows.as_slice());
            let Some(row) = rows.get(pos.row) else {
                pos = self.table_start(pos.table + 1);
                continue;
            };
            let Some(bounds) = index.edge_bounds() else {
                return Some(pos);
            };

            while pos.column <= *bounds.end() {
                if index.edge_at_column(pos.column).is_some() {
                    if let Some(edges) = row.get(pos.column).and_then(Value::as_list) {
                        while pos.edge < edges.len() {
                            // Malformed entries are not edges
                            if edges[pos.edge].is_list() {
                                return Some(pos);
                            }
                            pos.edge += 1;
                        }
                    }
                }
                pos.column += 1;
                pos.edge = 0;
            }

            pos.row += 1;
            pos.column = *bounds.start();
            pos.edge = 0;
        }
        None
    }

    fn is_erased(&self, ordinal: usize) -> bool {
        self.erased.get(ordinal).copied().unwrap_or(false)
    }

    /// First entry at or after `from` that has not been erased
    fn seek_live(&self, mut from: Position, mut ordinal: usize) -> Option<EdgeCursor> {
        loop {
            let pos = self.locate(from)?;
            if !self.is_erased(ordinal) {
                return Some(EdgeCursor { pos, ordinal });
            }
            log::trace!("Skipping erased entry {} at {:?}", ordinal, pos);
            from = self.successor(pos);
            ordinal += 1;
        }
    }

    fn live_entries(&self) -> impl Iterator<Item = EdgeCursor> + '_ {
        std::iter::successors(self.seek_live(self.table_start(0), 0), move |cursor| {
            self.seek_live(self.successor(cursor.pos), cursor.ordinal + 1)
        })
    }

    fn count_entries(&self) -> usize {
        std::iter::successors(self.locate(self.table_start(0)), |pos| {
            self.locate(self.successor(*pos))
        })
        .count()
    }

    fn entry(&self, pos: Position) -> Option<Entry<'_>> {
        let index = self.indices.get(pos.table)?;
        let row = self.table(pos.table)?.rows.get(pos.row)?;
        let edge = if index.has_edges() {
            let edge_index = index.edge_at_column(pos.column)?;
            let edge = row.get(pos.column)?.as_list()?.get(pos.edge)?.as_list()?;
            Some((edge_index, edge))
        } else {
            None
        };
        Some(Entry { index, row, edge })
    }

    fn current(&self) -> Option<Entry<'_>> {
        self.cursor.and_then(|cursor| self.entry(cursor.pos))
    }

    fn go_to_first_edge(&mut self) {
        self.cursor = self.seek_live(self.table_start(0), 0);
    }

    pub fn valid(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn next(&mut self) {
        if let Some(cursor) = self.cursor {
            self.cursor = self.seek_live(self.successor(cursor.pos), cursor.ordinal + 1);
        }
    }

    /// Drop the current entry from the sequence and advance
    pub fn erase(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        if self.erased.len() <= cursor.ordinal {
            self.erased.resize(cursor.ordinal + 1, false);
        }
        if !self.erased[cursor.ordinal] {
            self.erased[cursor.ordinal] = true;
            self.erased_count += 1;
        }
        self.next();
    }

    /// Same as [`erase`](Self::erase): edge order is not part of this kind's contract
    pub fn unstable_erase(&mut self) {
        self.erase();
    }

    pub fn erase_range(&mut self, _first: usize, _last: usize) -> Result<()> {
        Err(IterError::unsupported(IterKind::GetNeighbors, "erase_range"))
    }

    /// Only a full rewind is meaningful for this kind
    pub fn reset(&mut self, pos: usize) -> Result<()> {
        if pos != 0 {
            return Err(IterError::unsupported(
                IterKind::GetNeighbors,
                "reset to a non-zero position",
            ));
        }
        self.go_to_first_edge();
        Ok(())
    }

    /// Drop every table index; the iterator becomes empty
    pub fn clear(&mut self) {
        self.indices.clear();
        self.cursor = None;
        self.erased.clear();
        self.erased_count = 0;
        self.total = 0;
    }

    /// Number of live logical entries
    pub fn size(&self) -> usize {
        self.total - self.erased_count
    }

    /// Number of vertex rows across all tables
    pub fn num_rows(&self) -> usize {
        (0..self.indices.len())
            .filter_map(|table| self.table(table))
            .map(DataSet::row_size)
            .sum()
    }

    /// Keep `count` live entries chosen uniformly at random and rewind
    pub fn sample(&mut self, count: usize, rng: &mut fastrand::Rng) {
        let live: Vec<usize> = self.live_entries().map(|cursor| cursor.ordinal).collect();
        if count < live.len() {
            let mut keep = vec![false; self.total];
            for ordinal in reservoir_sample(live.iter().copied(), count, rng) {
                keep[ordinal] = true;
            }
            self.erased.resize(self.total, false);
            for ordinal in live {
                if !keep[ordinal] {
                    self.erased[ordinal] = true;
                    self.erased_count += 1;
                }
            }
            log::debug!("Sampled {} neighbor entries", count);
        }
        self.go_to_first_edge();
    }

    /// Column names of the table under the cursor
    pub fn col_names(&self) -> &[String] {
        self.cursor
            .and_then(|cursor| self.table(cursor.pos.table))
            .map_or(&[][..], |ds| ds.col_names.as_slice())
    }

    /// The vertex row the current entry belongs to
    pub(crate) fn vertex_row(&self) -> Option<&Row> {
        self.current().map(|entry| entry.row)
    }

    /// A copy of the vertex row the current entry belongs to
    pub fn materialize_row(&self) -> Option<Row> {
        self.vertex_row().cloned()
    }

    pub fn get_column(&self, name: &str) -> &Value {
        let Some(entry) = self.current() else {
            return &NULL_VALUE;
        };
        match entry.index.column_index(name) {
            Some(i) => entry.row.get(i).unwrap_or(&NULL_BAD_TYPE),
            None => &EMPTY_VALUE,
        }
    }

    pub fn get_column_by_index(&self, index: i64) -> &Value {
        match self.current() {
            Some(entry) => column_by_index(entry.row, index),
            None => &NULL_VALUE,
        }
    }

    /// Index of a column of the current table
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.current()
            .and_then(|entry| entry.index.column_index(name))
            .ok_or_else(|| IterError::ColumnNotFound(name.to_string()))
    }

    /// Tag property of the current vertex; `*` searches every tag
    pub fn get_tag_prop(&self, tag: &str, prop: &str) -> &Value {
        let Some(Entry { index, row, .. }) = self.current() else {
            return &NULL_VALUE;
        };

        if tag == "*" {
            for tag_index in index.tags() {
                let Some(offset) = tag_index.offset(prop) else {
                    continue;
                };
                match row.get(tag_index.col_idx) {
                    None | Some(Value::Empty) => continue,
                    Some(Value::List(list)) => match list.get(offset) {
                        Some(value) if !value.is_empty() => return value,
                        _ => continue,
                    },
                    Some(_) => return &NULL_BAD_TYPE,
                }
            }
            return &EMPTY_VALUE;
        }

        let Some(tag_index) = index.tag(tag) else {
            return &EMPTY_VALUE;
        };
        let Some(offset) = tag_index.offset(prop) else {
            return &EMPTY_VALUE;
        };
        match row.get(tag_index.col_idx) {
            None | Some(Value::Empty) => &EMPTY_VALUE,
            Some(Value::List(list)) => list.get(offset).unwrap_or(&NULL_BAD_TYPE),
            Some(_) => &NULL_BAD_TYPE,
        }
    }

    /// Property of the current edge; `edge` is the unsigned edge name or `*`
    pub fn get_edge_prop(&self, edge: &str, prop: &str) -> &Value {
        let Some(entry) = self.current() else {
            return &NULL_VALUE;
        };
        let Some((edge_index, values)) = entry.edge else {
            return &EMPTY_VALUE;
        };
        if edge != "*" && edge_index.name[1..] != *edge {
            log::trace!("Current edge: {} Wanted: {}", edge_index.name, edge);
            return &EMPTY_VALUE;
        }
        Self::packed_prop(edge_index, values, prop)
    }

    fn packed_prop<'a>(edge_index: &PropIndex, values: &'a List, prop: &str) -> &'a Value {
        match edge_index.offset(prop) {
            Some(offset) => values.get(offset).unwrap_or(&NULL_BAD_TYPE),
            None => &EMPTY_VALUE,
        }
    }

    pub fn get_vertex(&self) -> Value {
        match self.current() {
            Some(entry) => Self::vertex_of(entry.index, entry.row),
            None => NULL_VALUE.clone(),
        }
    }

    pub fn get_edge(&self) -> Value {
        match self.current() {
            Some(entry) => Self::edge_of(&entry),
            None => NULL_VALUE.clone(),
        }
    }

    /// Every vertex id across all tables, in row order
    pub fn vids(&self) -> Vec<Value> {
        (0..self.indices.len())
            .filter_map(|table| self.table(table))
            .flat_map(|ds| ds.rows.iter())
            .map(|row| row.get(0).cloned().unwrap_or_default())
            .collect()
    }

    /// Every source vertex across all tables, one per vertex id
    pub fn get_vertices(&self) -> List {
        dedup_vertices(self.indices.iter().enumerate().flat_map(|(table, index)| {
            self.table(table)
                .map_or(&[][..], |ds| ds.rows.as_slice())
                .iter()
                .map(move |row| Self::vertex_of(index, row))
        }))
    }

    /// Every live edge in forward direction, one per edge key
    pub fn get_edges(&self) -> List {
        dedup_edges(
            self.live_entries()
                .filter_map(|cursor| self.entry(cursor.pos))
                .map(|entry| Self::edge_of(&entry)),
        )
    }

    fn vertex_of(index: &NeighborSchemaIndex, row: &Row) -> Value {
        let mut vertex = Vertex::new(row.get(0).cloned().unwrap_or_default());
        for tag_index in index.tags() {
            // Tags the vertex does not carry are stored as empty cells
            let Some(Value::List(values)) = row.get(tag_index.col_idx) else {
                continue;
            };
            let mut tag = Tag::new(tag_index.name.clone());
            for (prop, value) in tag_index.prop_list.iter().zip(values.iter()) {
                if prop != TAG {
                    tag.props.insert(prop.clone(), value.clone());
                }
            }
            vertex.tags.push(tag);
        }
        Value::from(vertex)
    }

    fn edge_of(entry: &Entry<'_>) -> Value {
        let Some((edge_index, values)) = entry.edge else {
            return EMPTY_VALUE.clone();
        };

        let src = entry.row.get(0).unwrap_or(&NULL_VALUE);
        if !src.is_valid_vid() {
            return NULL_BAD_TYPE.clone();
        }
        let dst = Self::packed_prop(edge_index, values, DST);
        if !dst.is_valid_vid() {
            return NULL_BAD_TYPE.clone();
        }
        let edge_type = Self::packed_prop(edge_index, values, TYPE)
            .as_int()
            .unwrap_or(0);
        let ranking = Self::packed_prop(edge_index, values, RANK)
            .as_int()
            .unwrap_or(0);

        let props = edge_index
            .prop_list
            .iter()
            .zip(values.iter())
            .filter(|(prop, _)| ![SRC, DST, TYPE, RANK].contains(&prop.as_str()))
            .map(|(prop, value)| (prop.clone(), value.clone()))
            .collect();
        Value::from(Edge {
            src: src.clone(),
            dst: dst.clone(),
            edge_type,
            name: edge_index.name[1..].to_string(),
            ranking,
            props,
        })
    }

    /// A new cursor over the same response, positioned at the first live entry
    ///
    /// Entries erased through this iterator stay erased in the copy.
    pub fn copy(&self) -> Self {
        let mut copy = self.clone();
        copy.go_to_first_edge();
        copy
    }
}
