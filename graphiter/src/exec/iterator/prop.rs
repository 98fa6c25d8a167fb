// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Iteration over property-fetch results
//!
//! Property-fetch tables carry one row per vertex or edge and one
//! `<owner>.<prop>` column per property. Navigation is that of a plain row set;
//! on top of it the iterator resolves properties by owner and name.

use super::logical_row::LogicalRow;
use super::schema::PropSchemaIndex;
use super::sequential::SequentialIter;
use super::{column_by_index, dedup_edges, dedup_vertices};
use crate::exec::error::{IterError, Result};
use crate::value::{
    Edge, List, Row, Tag, Value, Vertex, DST, EMPTY_VALUE, NULL_BAD_TYPE, NULL_VALUE, RANK, SRC,
    TAG, TYPE, VID,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PropIter {
    seq: SequentialIter,
    index: PropSchemaIndex,
}

impl PropIter {
    pub fn new(value: Arc<Value>) -> Result<Self> {
        let seq = SequentialIter::new(value)?;
        let ds = seq
            .value_ptr()
            .as_dataset()
            .ok_or_else(|| IterError::NotADataSet(seq.value_ptr().type_name().to_string()))?;
        let index = PropSchemaIndex::build(ds).inspect_err(|e| {
            log::error!("Failed to index property result: {}", e);
        })?;
        Ok(Self { seq, index })
    }

    pub fn value_ptr(&self) -> &Arc<Value> {
        self.seq.value_ptr()
    }

    pub fn schema(&self) -> &PropSchemaIndex {
        &self.index
    }

    pub fn col_names(&self) -> &[String] {
        self.seq.col_names()
    }

    pub fn valid(&self) -> bool {
        self.seq.valid()
    }

    pub fn next(&mut self) {
        self.seq.next();
    }

    pub fn erase(&mut self) {
        self.seq.erase();
    }

    pub fn unstable_erase(&mut self) {
        self.seq.unstable_erase();
    }

    pub fn erase_range(&mut self, first: usize, last: usize) -> Result<()> {
        self.seq.erase_range(first, last)
    }

    pub fn select(&mut self, offset: usize, count: usize) -> Result<()> {
        self.seq.select(offset, count)
    }

    pub fn sample(&mut self, count: usize, rng: &mut fastrand::Rng) {
        self.seq.sample(count, rng);
    }

    pub fn reset(&mut self, pos: usize) -> Result<()> {
        self.seq.reset(pos)
    }

    pub fn clear(&mut self) {
        self.seq.clear();
    }

    pub fn size(&self) -> usize {
        self.seq.size()
    }

    pub fn row(&self) -> Option<&Row> {
        self.seq.row()
    }

    pub fn logical_row(&self) -> Option<LogicalRow<'_>> {
        self.row().map(LogicalRow::prop)
    }

    pub fn move_row(&mut self) -> Option<Row> {
        self.seq.move_row()
    }

    pub fn materialize_row(&self) -> Option<Row> {
        self.row().cloned()
    }

    pub fn get_column(&self, name: &str) -> &Value {
        let Some(row) = self.row() else {
            return &NULL_VALUE;
        };
        self.index
            .column_index(name)
            .and_then(|i| row.get(i))
            .unwrap_or(&NULL_VALUE)
    }

    pub fn get_column_by_index(&self, index: i64) -> &Value {
        match self.row() {
            Some(row) => column_by_index(row, index),
            None => &NULL_VALUE,
        }
    }

    /// Property `prop` of tag or edge `owner` in the current row
    pub fn get_prop(&self, owner: &str, prop: &str) -> &Value {
        match self.row() {
            Some(row) => self.prop_of(row, owner, prop),
            None => &NULL_VALUE,
        }
    }

    pub fn get_tag_prop(&self, tag: &str, prop: &str) -> &Value {
        self.get_prop(tag, prop)
    }

    pub fn get_edge_prop(&self, edge: &str, prop: &str) -> &Value {
        self.get_prop(edge, prop)
    }

    fn prop_of<'a>(&self, row: &'a Row, owner: &str, prop: &str) -> &'a Value {
        let Some(props) = self.index.owner(owner) else {
            return &EMPTY_VALUE;
        };
        match props.column(prop) {
            Some(col) => row.get(col).unwrap_or(&NULL_BAD_TYPE),
            None => {
                log::trace!("No prop found: {}.{}", owner, prop);
                &NULL_VALUE
            }
        }
    }

    pub fn get_vertex(&self) -> Value {
        match self.row() {
            Some(row) => self.vertex_of(row),
            None => NULL_VALUE.clone(),
        }
    }

    pub fn get_edge(&self) -> Value {
        match self.row() {
            Some(row) => self.edge_of(row),
            None => NULL_VALUE.clone(),
        }
    }

    /// Every vertex in the result, one per vertex id
    pub fn get_vertices(&self) -> List {
        dedup_vertices(self.seq.rows().iter().map(|row| self.vertex_of(row)))
    }

    /// Every edge in the result in forward direction, one per edge key
    pub fn get_edges(&self) -> List {
        dedup_edges(self.seq.rows().iter().map(|row| self.edge_of(row)))
    }

    /// An owner contributes to a row only when none of its columns are absent
    fn owner_present(row: &Row, props: &[(String, usize)]) -> bool {
        props
            .iter()
            .all(|(_, col)| row.get(*col).is_some_and(|v| !v.is_empty()))
    }

    fn vertex_of(&self, row: &Row) -> Value {
        let vid = self
            .index
            .column_index(VID)
            .and_then(|i| row.get(i))
            .unwrap_or(&NULL_VALUE);
        if !vid.is_valid_vid() {
            return NULL_VALUE.clone();
        }

        let mut vertex = Vertex::new(vid.clone());
        for owner in self.index.owners() {
            if !Self::owner_present(row, &owner.props) {
                continue;
            }
            let mut tag = Tag::new(owner.name.clone());
            for (prop, col) in &owner.props {
                if prop == TAG {
                    continue;
                }
                tag.props.insert(prop.clone(), row[*col].clone());
            }
            vertex.tags.push(tag);
        }
        Value::from(vertex)
    }

    fn edge_of(&self, row: &Row) -> Value {
        let Some(owner) = self
            .index
            .owners()
            .iter()
            .find(|owner| Self::owner_present(row, &owner.props))
        else {
            return NULL_VALUE.clone();
        };
        let name = owner.name.as_str();

        let Some(edge_type) = self.prop_of(row, name, TYPE).as_int() else {
            return NULL_BAD_TYPE.clone();
        };
        let src = self.prop_of(row, name, SRC);
        if !src.is_valid_vid() {
            return NULL_BAD_TYPE.clone();
        }
        let dst = self.prop_of(row, name, DST);
        if !dst.is_valid_vid() {
            return NULL_BAD_TYPE.clone();
        }
        let Some(ranking) = self.prop_of(row, name, RANK).as_int() else {
            return NULL_BAD_TYPE.clone();
        };

        let props = owner
            .props
            .iter()
            .filter(|(prop, _)| ![SRC, DST, TYPE, RANK].contains(&prop.as_str()))
            .map(|(prop, col)| (prop.clone(), row[*col].clone()))
            .collect();
        Value::from(Edge {
            src: src.clone(),
            dst: dst.clone(),
            edge_type,
            name: owner.name.clone(),
            ranking,
            props,
        })
    }

    pub fn copy(&self) -> Self {
        Self {
            seq: self.seq.copy(),
            index: self.index.clone(),
        }
    }
}
