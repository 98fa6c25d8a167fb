// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Vertex and edge composites

use super::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The properties of one tag attached to a vertex
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub props: BTreeMap<String, Value>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: BTreeMap::new(),
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub vid: Value,
    pub tags: Vec<Tag>,
}

impl Vertex {
    pub fn new(vid: impl Into<Value>) -> Self {
        Self {
            vid: vid.into(),
            tags: Vec::new(),
        }
    }
}

/// Identity of an edge: source, type, ranking and destination
pub type EdgeKey = (Value, i64, i64, Value);

/// A directed edge
///
/// A negative `edge_type` marks an edge read from its destination side;
/// [`Edge::format`] turns it back into the forward form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Edge {
    pub src: Value,
    pub dst: Value,
    pub edge_type: i64,
    pub name: String,
    pub ranking: i64,
    pub props: BTreeMap<String, Value>,
}

impl Edge {
    /// Normalize a reverse edge into its forward direction
    pub fn format(&mut self) {
        if self.edge_type < 0 {
            std::mem::swap(&mut self.src, &mut self.dst);
            self.edge_type = -self.edge_type;
        }
    }

    pub fn key(&self) -> EdgeKey {
        (
            self.src.clone(),
            self.edge_type,
            self.ranking,
            self.dst.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reverse_edge() {
        let mut edge = Edge {
            src: Value::from("a"),
            dst: Value::from("b"),
            edge_type: -3,
            name: "follow".to_string(),
            ranking: 0,
            props: BTreeMap::new(),
        };
        edge.format();
        assert_eq!(edge.src, Value::from("b"));
        assert_eq!(edge.dst, Value::from("a"));
        assert_eq!(edge.edge_type, 3);

        // Forward edges are untouched
        edge.format();
        assert_eq!(edge.src, Value::from("b"));
    }
}
