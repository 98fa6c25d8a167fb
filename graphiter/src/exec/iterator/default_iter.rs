// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Iterator over a non-tabular value

use super::IterKind;
use crate::exec::error::{IterError, Result};
use crate::value::{Row, Value, NULL_BAD_TYPE};
use std::sync::Arc;

/// Single-element iterator over a scalar or otherwise non-tabular result
///
/// The element is current while the counter is zero.
#[derive(Debug, Clone)]
pub struct DefaultIter {
    value: Arc<Value>,
    counter: i64,
}

impl DefaultIter {
    pub fn new(value: Arc<Value>) -> Self {
        Self { value, counter: 0 }
    }

    pub fn value_ptr(&self) -> &Arc<Value> {
        &self.value
    }

    pub fn valid(&self) -> bool {
        self.counter == 0
    }

    pub fn next(&mut self) {
        if self.valid() {
            self.counter += 1;
        }
    }

    pub fn erase(&mut self) {
        if self.valid() {
            self.counter -= 1;
        }
    }

    pub fn unstable_erase(&mut self) {
        self.erase();
    }

    pub fn erase_range(&mut self, _first: usize, _last: usize) -> Result<()> {
        Err(IterError::unsupported(IterKind::Default, "erase_range"))
    }

    pub fn reset(&mut self, pos: usize) -> Result<()> {
        if pos != 0 {
            return Err(IterError::PositionOutOfRange { pos, size: 1 });
        }
        self.counter = 0;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.counter = 1;
    }

    pub fn size(&self) -> usize {
        1
    }

    pub fn get_column(&self, name: &str) -> &Value {
        log::warn!("Column `{}' requested from a default iterator", name);
        &NULL_BAD_TYPE
    }

    pub fn get_column_by_index(&self, index: i64) -> &Value {
        log::warn!("Column {} requested from a default iterator", index);
        &NULL_BAD_TYPE
    }

    pub fn get_tag_prop(&self, tag: &str, prop: &str) -> &Value {
        log::warn!("Tag prop {}.{} requested from a default iterator", tag, prop);
        &NULL_BAD_TYPE
    }

    pub fn get_edge_prop(&self, edge: &str, prop: &str) -> &Value {
        log::warn!("Edge prop {}.{} requested from a default iterator", edge, prop);
        &NULL_BAD_TYPE
    }

    /// The wrapped value as a one-column row
    pub fn materialize_row(&self) -> Option<Row> {
        self.valid()
            .then(|| Row::new(vec![self.value.as_ref().clone()]))
    }

    pub fn copy(&self) -> Self {
        Self::new(Arc::clone(&self.value))
    }
}
