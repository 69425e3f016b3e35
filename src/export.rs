//! Serializable drawings for presentation adapters.
//!
//! A [`Drawing`] bundles everything a renderer needs: each node with its
//! kind and final position, the edge list, and node identifiers grouped by
//! kind so markers can be styled per kind.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{NetlistError, Result};
use crate::graph::AtomGraph;
use crate::layout::{Point, PositionMap};
use crate::netlist::AtomKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawnNode {
    pub id: String,
    pub kind: AtomKind,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawnEdge {
    pub source: String,
    pub target: String,
}

/// A laid-out graph, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Drawing {
    pub nodes: Vec<DrawnNode>,
    pub edges: Vec<DrawnEdge>,
    pub groups: BTreeMap<AtomKind, Vec<String>>,
}

impl Drawing {
    /// Combine a graph with its positions.
    ///
    /// Fails if any node has no position.
    pub fn new(graph: &AtomGraph, positions: &PositionMap) -> Result<Self> {
        let mut nodes = Vec::with_capacity(graph.node_count());
        let mut groups: BTreeMap<AtomKind, Vec<String>> = BTreeMap::new();

        for node in graph.nodes() {
            let Point { x, y } = positions.get(&node.id).ok_or_else(|| NetlistError::Export {
                message: format!("node '{}' has no position", node.id),
            })?;
            nodes.push(DrawnNode {
                id: node.id.clone(),
                kind: node.kind,
                x,
                y,
            });
            groups.entry(node.kind).or_default().push(node.id.clone());
        }

        let edges = graph
            .edges()
            .map(|(source, target)| DrawnEdge {
                source: source.to_string(),
                target: target.to_string(),
            })
            .collect();

        Ok(Self { nodes, edges, groups })
    }

    /// Node identifiers of one kind.
    pub fn group(&self, kind: AtomKind) -> &[String] {
        self.groups.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| NetlistError::Export {
            message: e.to_string(),
        })
    }
}
