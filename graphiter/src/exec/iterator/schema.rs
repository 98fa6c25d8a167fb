// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema indexes over result column layouts
//!
//! Column names are the only schema carrier on the wire. They are parsed once
//! here, when an iterator first sees a table, into typed lookup structures so
//! that per-row traversal never touches a column name string again.
//!
//! Two layouts exist:
//! - neighbor-expansion tables: `_vid`, optional `_stats`, packed
//!   `_tag:<name>:<p1>:...` and `_edge:<+|-name>:<p1>:...` columns, optional `_expr`
//! - property-fetch tables: one `<owner>.<prop>` column per property

use crate::exec::error::{IterError, Result};
use crate::value::{DataSet, EDGE, TAG, VID};
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// Index of one packed tag or edge column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropIndex {
    /// Tag name, or edge name with its direction marker
    pub name: String,
    /// Physical column holding the packed list
    pub col_idx: usize,
    /// Declared property names in packed order
    pub prop_list: Vec<String>,
    prop_indices: HashMap<String, usize>,
}

impl PropIndex {
    fn new(name: String, col_idx: usize, prop_list: Vec<String>) -> Self {
        let prop_indices = prop_list
            .iter()
            .enumerate()
            .map(|(i, prop)| (prop.clone(), i))
            .collect();
        Self {
            name,
            col_idx,
            prop_list,
            prop_indices,
        }
    }

    /// Offset of `prop` inside the packed list
    pub fn offset(&self, prop: &str) -> Option<usize> {
        self.prop_indices.get(prop).copied()
    }
}

/// Split a packed column name into owner name and declared properties
fn parse_packed(col_name: &str, prefix: &str) -> Result<(String, Vec<String>)> {
    let mut pieces = col_name.split(':');
    let head = pieces.next().unwrap_or_default();
    let name = match pieces.next() {
        Some(name) if head == prefix => name.to_string(),
        _ => return Err(IterError::BadColumnName(col_name.to_string())),
    };
    // `_tag:name` and `_tag:name:` both declare a tag without props
    let props = pieces
        .filter(|prop| !prop.is_empty())
        .map(str::to_string)
        .collect();
    Ok((name, props))
}

/// Schema index of one neighbor-expansion table
#[derive(Debug, Clone)]
pub struct NeighborSchemaIndex {
    /// Position of the table inside the handle's list
    pub position: usize,
    col_indices: HashMap<String, usize>,
    tag_edge_names: HashMap<usize, String>,
    tags: Vec<PropIndex>,
    tag_lookup: HashMap<String, usize>,
    edges: Vec<PropIndex>,
    edge_lookup: HashMap<String, usize>,
    edge_by_column: HashMap<usize, usize>,
    edge_bounds: Option<RangeInclusive<usize>>,
}

impl NeighborSchemaIndex {
    /// Scan the column names of `ds` once and build its index
    pub fn build(position: usize, ds: &DataSet) -> Result<Self> {
        let col_names = &ds.col_names;
        if col_names.first().map(String::as_str) != Some(VID) {
            return Err(IterError::BadColumnLayout(format!(
                "expected `{}' as the first column, got {:?}",
                VID, col_names
            )));
        }

        let mut index = Self {
            position,
            col_indices: HashMap::with_capacity(col_names.len()),
            tag_edge_names: HashMap::new(),
            tags: Vec::new(),
            tag_lookup: HashMap::new(),
            edges: Vec::new(),
            edge_lookup: HashMap::new(),
            edge_by_column: HashMap::new(),
            edge_bounds: None,
        };

        for (i, col_name) in col_names.iter().enumerate() {
            index.col_indices.insert(col_name.clone(), i);
            if col_name.starts_with(TAG) {
                let (name, props) = parse_packed(col_name, TAG)?;
                if name.is_empty() {
                    return Err(IterError::BadColumnName(col_name.clone()));
                }
                index.tag_edge_names.insert(i, name.clone());
                index.tag_lookup.insert(name.clone(), index.tags.len());
                index.tags.push(PropIndex::new(name, i, props));
            } else if col_name.starts_with(EDGE) {
                let (name, props) = parse_packed(col_name, EDGE)?;
                if name.len() < 2 || !(name.starts_with('+') || name.starts_with('-')) {
                    return Err(IterError::BadEdgeName(name));
                }
                index.tag_edge_names.insert(i, name.clone());
                index.edge_lookup.insert(name.clone(), index.edges.len());
                index.edge_by_column.insert(i, index.edges.len());
                index.edges.push(PropIndex::new(name, i, props));
                index.edge_bounds = Some(match index.edge_bounds.take() {
                    Some(bounds) => *bounds.start()..=i,
                    None => i..=i,
                });
            }
            // `_vid`, `_stats` and `_expr` only need the name lookup
        }

        log::debug!(
            "Built neighbor index for table {}: {} tags, {} edges, edge columns {:?}",
            position,
            index.tags.len(),
            index.edges.len(),
            index.edge_bounds
        );
        Ok(index)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.col_indices.get(name).copied()
    }

    /// Tag or edge name occupying a column
    pub fn owner_of_column(&self, col_idx: usize) -> Option<&str> {
        self.tag_edge_names.get(&col_idx).map(String::as_str)
    }

    /// Tag indexes in column order
    pub fn tags(&self) -> &[PropIndex] {
        &self.tags
    }

    pub fn tag(&self, name: &str) -> Option<&PropIndex> {
        self.tag_lookup.get(name).map(|&i| &self.tags[i])
    }

    /// Edge indexes in column order
    pub fn edges(&self) -> &[PropIndex] {
        &self.edges
    }

    /// Lookup by the signed edge name, e.g. `+like`
    pub fn edge(&self, name: &str) -> Option<&PropIndex> {
        self.edge_lookup.get(name).map(|&i| &self.edges[i])
    }

    pub fn edge_at_column(&self, col_idx: usize) -> Option<&PropIndex> {
        self.edge_by_column.get(&col_idx).map(|&i| &self.edges[i])
    }

    /// Inclusive range of columns holding packed edges
    pub fn edge_bounds(&self) -> Option<&RangeInclusive<usize>> {
        self.edge_bounds.as_ref()
    }

    pub fn has_edges(&self) -> bool {
        self.edge_bounds.is_some()
    }
}

/// Properties of one tag or edge in a property-fetch table
#[derive(Debug, Clone)]
pub struct OwnerProps {
    pub name: String,
    /// `(prop, column)` pairs in column order
    pub props: Vec<(String, usize)>,
    lookup: HashMap<String, usize>,
}

impl OwnerProps {
    pub fn column(&self, prop: &str) -> Option<usize> {
        self.lookup.get(prop).copied()
    }
}

/// Schema index of a property-fetch table
#[derive(Debug, Clone, Default)]
pub struct PropSchemaIndex {
    col_indices: HashMap<String, usize>,
    owners: Vec<OwnerProps>,
    owner_lookup: HashMap<String, usize>,
}

impl PropSchemaIndex {
    pub fn build(ds: &DataSet) -> Result<Self> {
        let mut index = Self::default();
        for (i, col_name) in ds.col_names.iter().enumerate() {
            index.col_indices.insert(col_name.clone(), i);
            if col_name.contains('.') {
                index.add_prop_column(col_name, i)?;
            }
        }
        log::debug!(
            "Built property index: {} columns, {} owners",
            index.col_indices.len(),
            index.owners.len()
        );
        Ok(index)
    }

    fn add_prop_column(&mut self, col_name: &str, col_idx: usize) -> Result<()> {
        let pieces: Vec<&str> = col_name.split('.').collect();
        let [owner, prop] = pieces.as_slice() else {
            return Err(IterError::BadColumnName(col_name.to_string()));
        };
        if owner.is_empty() {
            return Err(IterError::BadColumnName(col_name.to_string()));
        }

        let slot = match self.owner_lookup.get(*owner) {
            Some(&slot) => slot,
            None => {
                self.owners.push(OwnerProps {
                    name: owner.to_string(),
                    props: Vec::new(),
                    lookup: HashMap::new(),
                });
                self.owner_lookup
                    .insert(owner.to_string(), self.owners.len() - 1);
                self.owners.len() - 1
            }
        };
        let owner_props = &mut self.owners[slot];
        owner_props.props.push((prop.to_string(), col_idx));
        owner_props.lookup.insert(prop.to_string(), col_idx);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.col_indices.get(name).copied()
    }

    pub fn owner(&self, name: &str) -> Option<&OwnerProps> {
        self.owner_lookup.get(name).map(|&i| &self.owners[i])
    }

    /// Owners in order of first appearance
    pub fn owners(&self) -> &[OwnerProps] {
        &self.owners
    }
}
