// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Iteration over plain row sets
//!
//! A `SequentialIter` walks the rows of one table. It is also how several
//! upstream results, of any kind, are normalized into one flat sequence for
//! UNION-style operators: the inputs are drained into a freshly owned table
//! sharing a single column map.
//!
//! Rows are read through the shared handle. The first structural change
//! (erase, select, sample, move) goes through `Arc::make_mut`, so a cursor that
//! mutates gets its own copy of the table when any other holder still shares it.

use super::logical_row::LogicalRow;
use super::{column_by_index, index_columns, reservoir_sample, Iter};
use crate::exec::config::IterConfig;
use crate::exec::error::{IterError, Result};
use crate::value::{DataSet, Row, Value, NULL_VALUE};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct SequentialIter {
    value: Arc<Value>,
    col_indices: HashMap<String, usize>,
    cursor: usize,
}

impl SequentialIter {
    /// Iterate the table held by `value`
    pub fn new(value: Arc<Value>) -> Result<Self> {
        let ds = value
            .as_dataset()
            .ok_or_else(|| IterError::NotADataSet(value.type_name().to_string()))?;
        let col_indices = index_columns(&ds.col_names);
        Ok(Self {
            value,
            col_indices,
            cursor: 0,
        })
    }

    /// Union of two upstream iterators
    pub fn from_pair(left: Iter, right: Iter) -> Result<Self> {
        Self::from_iters(vec![left, right])
    }

    /// Union of upstream iterators with the default configuration
    pub fn from_iters(inputs: Vec<Iter>) -> Result<Self> {
        Self::from_iters_with(inputs, &IterConfig::default())
    }

    /// Drain every input from its current position into one owned table
    ///
    /// The column names come from the first input that still has rows; every
    /// other drained row must carry the same columns.
    pub fn from_iters_with(inputs: Vec<Iter>, config: &IterConfig) -> Result<Self> {
        let fallback = inputs
            .first()
            .map(|input| input.col_names().to_vec())
            .unwrap_or_default();
        let mut col_names: Option<Vec<String>> = None;
        let mut rows = Vec::new();
        let mut used_bytes = 0usize;

        for mut input in inputs {
            while input.valid() {
                let names = input.col_names();
                if let Some(expected) = &col_names {
                    if expected.as_slice() != names {
                        return Err(IterError::SchemaMismatch {
                            expected: expected.clone(),
                            found: names.to_vec(),
                        });
                    }
                } else {
                    col_names = Some(names.to_vec());
                }

                if let Some(row) = input.materialize_row() {
                    if let Some(limit) = config.memory_limit_bytes {
                        used_bytes += row.estimated_size();
                        if used_bytes > limit {
                            return Err(IterError::MemoryLimitExceeded {
                                limit,
                                used: used_bytes,
                            });
                        }
                    }
                    rows.push(row);
                }
                input.next();
            }
        }

        log::debug!("Unioned {} rows into a sequential iterator", rows.len());
        let ds = DataSet {
            col_names: col_names.unwrap_or(fallback),
            rows,
        };
        Self::new(Arc::new(Value::DataSet(ds)))
    }

    pub fn value_ptr(&self) -> &Arc<Value> {
        &self.value
    }

    pub fn col_names(&self) -> &[String] {
        self.value
            .as_dataset()
            .map_or(&[][..], |ds| ds.col_names.as_slice())
    }

    pub fn col_indices(&self) -> &HashMap<String, usize> {
        &self.col_indices
    }

    pub(crate) fn rows(&self) -> &[Row] {
        self.value
            .as_dataset()
            .map_or(&[][..], |ds| ds.rows.as_slice())
    }

    fn rows_mut(&mut self) -> Option<&mut Vec<Row>> {
        match Arc::make_mut(&mut self.value) {
            Value::DataSet(ds) => Some(&mut ds.rows),
            _ => None,
        }
    }

    pub fn valid(&self) -> bool {
        self.cursor < self.rows().len()
    }

    pub fn next(&mut self) {
        if self.valid() {
            self.cursor += 1;
        }
    }

    /// Remove the current row; the cursor lands on its successor
    pub fn erase(&mut self) {
        if !self.valid() {
            return;
        }
        let cursor = self.cursor;
        if let Some(rows) = self.rows_mut() {
            rows.remove(cursor);
        }
    }

    /// Remove the current row by moving the last row into its place
    pub fn unstable_erase(&mut self) {
        if !self.valid() {
            return;
        }
        let cursor = self.cursor;
        if let Some(rows) = self.rows_mut() {
            rows.swap_remove(cursor);
        }
    }

    /// Remove rows `[first, last)`, clamping `last`, and rewind
    pub fn erase_range(&mut self, first: usize, last: usize) -> Result<()> {
        let size = self.size();
        if first >= last || first >= size {
            return Ok(());
        }
        let last = last.min(size);
        if let Some(rows) = self.rows_mut() {
            rows.drain(first..last);
        }
        self.cursor = 0;
        Ok(())
    }

    /// Keep only the rows `[offset, offset + count)` and rewind
    pub fn select(&mut self, offset: usize, count: usize) -> Result<()> {
        let size = self.size();
        if offset == 0 && count >= size {
            self.cursor = 0;
            return Ok(());
        }
        let end = offset.saturating_add(count).min(size);
        if let Some(rows) = self.rows_mut() {
            if offset >= end {
                rows.clear();
            } else {
                rows.truncate(end);
                rows.drain(..offset);
            }
        }
        self.cursor = 0;
        Ok(())
    }

    /// Keep a uniform random subset of `count` rows, in their original order
    pub fn sample(&mut self, count: usize, rng: &mut fastrand::Rng) {
        let size = self.size();
        if count < size {
            let mut keep = reservoir_sample(0..size, count, rng);
            keep.sort_unstable();
            if let Some(rows) = self.rows_mut() {
                let taken: Vec<Row> = keep
                    .iter()
                    .map(|&i| std::mem::take(&mut rows[i]))
                    .collect();
                *rows = taken;
            }
            log::debug!("Sampled {} of {} rows", count, size);
        }
        self.cursor = 0;
    }

    pub fn reset(&mut self, pos: usize) -> Result<()> {
        let size = self.size();
        if !((pos == 0 && size == 0) || pos < size) {
            return Err(IterError::PositionOutOfRange { pos, size });
        }
        self.cursor = pos;
        Ok(())
    }

    pub fn clear(&mut self) {
        if let Some(rows) = self.rows_mut() {
            rows.clear();
        }
        self.cursor = 0;
    }

    pub fn size(&self) -> usize {
        self.rows().len()
    }

    pub fn row(&self) -> Option<&Row> {
        self.rows().get(self.cursor)
    }

    pub fn logical_row(&self) -> Option<LogicalRow<'_>> {
        self.row().map(LogicalRow::sequential)
    }

    /// Take the current row out of the table for final result assembly
    ///
    /// The slot is left holding an empty row; the cursor does not move.
    pub fn move_row(&mut self) -> Option<Row> {
        if !self.valid() {
            return None;
        }
        let cursor = self.cursor;
        self.rows_mut().map(|rows| std::mem::take(&mut rows[cursor]))
    }

    pub fn materialize_row(&self) -> Option<Row> {
        self.row().cloned()
    }

    pub fn get_column(&self, name: &str) -> &Value {
        let Some(row) = self.row() else {
            return &NULL_VALUE;
        };
        self.col_indices
            .get(name)
            .and_then(|&i| row.get(i))
            .unwrap_or(&NULL_VALUE)
    }

    pub fn get_column_by_index(&self, index: i64) -> &Value {
        match self.row() {
            Some(row) => column_by_index(row, index),
            None => &NULL_VALUE,
        }
    }

    /// Tag props have already been projected into `tag.prop` columns
    pub fn get_tag_prop(&self, tag: &str, prop: &str) -> &Value {
        self.get_column(&format!("{}.{}", tag, prop))
    }

    pub fn get_edge_prop(&self, edge: &str, prop: &str) -> &Value {
        self.get_column(&format!("{}.{}", edge, prop))
    }

    /// A new cursor over the same rows, positioned at the start
    pub fn copy(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            col_indices: index_columns(self.col_names()),
            cursor: 0,
        }
    }
}
