// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Shared fixtures for the iterator integration tests

#![allow(dead_code)]

use graphiter::{DataSet, List, Row, Value};
use std::sync::Arc;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `col1` holds `i`, `col2` holds `i` as a string
pub fn sequential_table(rows: i64) -> DataSet {
    let mut ds = DataSet::new(["col1", "col2"]);
    for i in 0..rows {
        ds.push(vec![Value::from(i), Value::from(i.to_string())]);
    }
    ds
}

pub fn sequential_value(rows: i64) -> Arc<Value> {
    Arc::new(Value::from(sequential_table(rows)))
}

fn tag_values() -> Value {
    Value::from(List::new(vec![Value::from(0), Value::from(1)]))
}

/// Two edges per vertex, ranked 0 and 1, all pointing at vertex "2"
fn edge_values(edge_type: i64) -> Value {
    let edges = (0..2)
        .map(|rank| {
            Value::from(List::new(vec![
                Value::from(0),
                Value::from(1),
                Value::from("2"),
                Value::from(edge_type),
                Value::from(rank),
            ]))
        })
        .collect::<Vec<_>>();
    Value::from(List::new(edges))
}

fn neighbor_table(tag: &str, edge: &str, edge_type: i64, vids: std::ops::Range<i64>) -> DataSet {
    let mut ds = DataSet::new([
        "_vid".to_string(),
        "_stats".to_string(),
        format!("_tag:{}:prop1:prop2", tag),
        format!("_edge:{}:prop1:prop2:_dst:_type:_rank", edge),
        "_expr".to_string(),
    ]);
    for i in vids {
        ds.push(vec![
            Value::from(i.to_string()),
            Value::Empty,
            tag_values(),
            edge_values(edge_type),
            Value::Empty,
        ]);
    }
    ds
}

/// Neighbor response of two tables
///
/// Vertices "0".."9" carry `tag1` and two `+edge1` edges each; vertices
/// "10".."19" carry `tag2` and two `-edge2` edges each.
pub fn neighbor_response() -> Arc<Value> {
    Arc::new(Value::from(List::new(vec![
        Value::from(neighbor_table("tag1", "+edge1", 1, 0..10)),
        Value::from(neighbor_table("tag2", "-edge2", -2, 10..20)),
    ])))
}

/// Neighbor response whose tables carry no edge columns
pub fn no_edge_response() -> Arc<Value> {
    let table = |tag: &str, vids: std::ops::Range<i64>| {
        let mut ds = DataSet::new([
            "_vid".to_string(),
            "_stats".to_string(),
            format!("_tag:{}:prop1:prop2", tag),
            "_expr".to_string(),
        ]);
        for i in vids {
            ds.push(vec![
                Value::from(i.to_string()),
                Value::Empty,
                tag_values(),
                Value::Empty,
            ]);
        }
        Value::from(ds)
    };
    Arc::new(Value::from(List::new(vec![
        table("tag1", 0..10),
        table("tag2", 10..20),
    ])))
}

/// Vertex property fetch: `tag1` and `tag3` present, `tag2` absent
pub fn vertex_prop_value() -> Arc<Value> {
    let mut ds = DataSet::new([
        "_vid",
        "tag1.prop1",
        "tag2.prop1",
        "tag2.prop2",
        "tag3.prop1",
        "tag3.prop2",
    ]);
    for i in 0..10 {
        ds.push(vec![
            Value::from(i.to_string()),
            Value::from(11),
            Value::Empty,
            Value::Empty,
            Value::from(31),
            Value::from(32),
        ]);
    }
    Arc::new(Value::from(ds))
}

/// Edge property fetch: `like` edges from `i` to `2i + 3`, `serve` absent
pub fn edge_prop_value() -> Arc<Value> {
    let mut ds = DataSet::new([
        "like._src",
        "like._type",
        "like._rank",
        "like._dst",
        "like.prop1",
        "like.prop2",
        "serve.prop1",
        "serve.prop2",
    ]);
    for i in 0..10i64 {
        ds.push(vec![
            Value::from(i.to_string()),
            Value::from(2),
            Value::from(0),
            Value::from((i * 2 + 3).to_string()),
            Value::from("hello"),
            Value::from("world"),
            Value::Empty,
            Value::Empty,
        ]);
    }
    Arc::new(Value::from(ds))
}

pub fn row(values: Vec<Value>) -> Row {
    Row::new(values)
}
