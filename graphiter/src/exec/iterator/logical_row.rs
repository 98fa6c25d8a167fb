// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Logical rows: what a downstream operator sees as one row
//!
//! A logical row borrows one or more physical rows ("segments"). Sequential and
//! property iteration produce single-segment rows; join composition produces
//! multi-segment rows. The borrow ties a logical row to the table owning its
//! segments, so it can never outlive it.

use crate::value::{Row, Value};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalRowKind {
    Sequential,
    Prop,
    Join,
}

#[derive(Debug, Clone)]
pub struct LogicalRow<'a> {
    kind: LogicalRowKind,
    segments: Vec<&'a Row>,
}

impl<'a> LogicalRow<'a> {
    pub fn sequential(row: &'a Row) -> Self {
        Self {
            kind: LogicalRowKind::Sequential,
            segments: vec![row],
        }
    }

    pub fn prop(row: &'a Row) -> Self {
        Self {
            kind: LogicalRowKind::Prop,
            segments: vec![row],
        }
    }

    /// Compose the rows of several inputs into one logical row
    pub fn join(segments: Vec<&'a Row>) -> Self {
        Self {
            kind: LogicalRowKind::Join,
            segments,
        }
    }

    pub fn kind(&self) -> LogicalRowKind {
        self.kind
    }

    pub fn segments(&self) -> &[&'a Row] {
        &self.segments
    }

    /// Total number of values across all segments
    pub fn size(&self) -> usize {
        self.segments.iter().map(|row| row.len()).sum()
    }

    /// Value at a position counted across segments
    pub fn get(&self, mut index: usize) -> Option<&'a Value> {
        for row in &self.segments {
            if index < row.len() {
                return row.get(index);
            }
            index -= row.len();
        }
        None
    }

    /// Copy the values of every segment into one owned row
    pub fn to_row(&self) -> Row {
        Row::new(
            self.segments
                .iter()
                .flat_map(|row| row.values.iter().cloned())
                .collect(),
        )
    }
}

impl PartialEq for LogicalRow<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|(a, b)| std::ptr::eq(*a, *b) || a == b)
    }
}

impl Eq for LogicalRow<'_> {}

impl Hash for LogicalRow<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for row in &self.segments {
            row.hash(state);
        }
    }
}
