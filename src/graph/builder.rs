//! Atom-level signal-flow graph.

use std::collections::HashMap;

use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::resolver::PortOwners;
use crate::error::{NetlistError, Result};
use crate::netlist::{AtomKind, Netlist};

/// A graph node: one atom, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomNode {
    pub id: String,
    pub kind: AtomKind,
}

/// Directed graph of atoms, with an edge from every atom to each atom it drives.
///
/// Built once per netlist and read-only afterwards. Node indices follow the
/// netlist's iteration order.
#[derive(Debug, Clone)]
pub struct AtomGraph {
    graph: DiGraph<AtomNode, ()>,
    index: HashMap<String, NodeIndex>,
}

impl AtomGraph {
    /// Build the graph for a netlist, resolving its input ports first.
    pub fn from_netlist(netlist: &Netlist) -> Result<Self> {
        let owners = PortOwners::build(netlist)?;
        Self::build(netlist, &owners)
    }

    /// Build the graph using an already resolved port ownership map.
    ///
    /// Every atom becomes a node, connected or not. Several wires between the
    /// same pair of atoms collapse into a single edge.
    pub fn build(netlist: &Netlist, owners: &PortOwners<'_>) -> Result<Self> {
        let mut graph = DiGraph::with_capacity(netlist.len(), 0);
        let mut index = HashMap::with_capacity(netlist.len());

        for atom in netlist.iter() {
            let node = graph.add_node(AtomNode {
                id: atom.id.clone(),
                kind: atom.kind,
            });
            index.insert(atom.id.clone(), node);
        }

        for atom in netlist.iter() {
            let source = index[&atom.id];
            for (oport, dest) in atom.fanout() {
                let owner = owners
                    .owner(dest)
                    .ok_or_else(|| NetlistError::unresolved(dest, &atom.id, oport))?;
                let target = *index.get(owner).ok_or_else(|| {
                    NetlistError::malformed(
                        format!("input port '{}'", dest),
                        format!("owner '{}' is not part of this netlist", owner),
                    )
                })?;
                graph.update_edge(source, target, ());
            }
        }

        debug!(
            "built atom graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self { graph, index })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Find a node by atom identifier.
    pub fn node(&self, id: &str) -> Option<&AtomNode> {
        self.index.get(id).map(|&node| &self.graph[node])
    }

    /// Kind of the atom with the given identifier.
    pub fn kind(&self, id: &str) -> Option<AtomKind> {
        self.node(id).map(|node| node.kind)
    }

    /// Check whether `from` drives an input of `to`.
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.index.get(from), self.index.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// All nodes, in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &AtomNode> {
        self.graph.node_indices().map(move |node| &self.graph[node])
    }

    /// All edges as `(source, destination)` atom identifiers.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(move |edge| {
            (
                self.graph[edge.source()].id.as_str(),
                self.graph[edge.target()].id.as_str(),
            )
        })
    }

    /// Identifiers of all nodes of one kind, in index order.
    pub fn nodes_of_kind(&self, kind: AtomKind) -> Vec<&str> {
        self.nodes()
            .filter(|node| node.kind == kind)
            .map(|node| node.id.as_str())
            .collect()
    }

    /// The underlying petgraph graph.
    pub fn graph(&self) -> &DiGraph<AtomNode, ()> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::Atom;

    fn chain() -> Netlist {
        let mut netlist = Netlist::new();
        netlist
            .add_atom(Atom::new("i1", AtomKind::InputPin).with_output("out", ["l1_a"]))
            .unwrap();
        netlist
            .add_atom(
                Atom::new("l1", AtomKind::LookupTable)
                    .with_input("l1_a")
                    .with_output("out", ["o1_in"]),
            )
            .unwrap();
        netlist
            .add_atom(Atom::new("o1", AtomKind::OutputPin).with_input("o1_in"))
            .unwrap();
        netlist
    }

    #[test]
    fn test_chain_edges() {
        let graph = AtomGraph::from_netlist(&chain()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge("i1", "l1"));
        assert!(graph.contains_edge("l1", "o1"));
        assert!(!graph.contains_edge("l1", "i1"));
        assert_eq!(graph.kind("l1"), Some(AtomKind::LookupTable));
    }

    #[test]
    fn test_parallel_wires_collapse() {
        let mut netlist = Netlist::new();
        netlist
            .add_atom(
                Atom::new("f1", AtomKind::FlipFlop)
                    .with_output("q", ["l1_a", "l1_b"])
                    .with_output("qn", ["l1_c"]),
            )
            .unwrap();
        netlist
            .add_atom(
                Atom::new("l1", AtomKind::LookupTable)
                    .with_input("l1_a")
                    .with_input("l1_b")
                    .with_input("l1_c"),
            )
            .unwrap();

        let graph = AtomGraph::from_netlist(&netlist).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![("f1", "l1")]);
    }

    #[test]
    fn test_isolated_atoms_are_nodes() {
        let mut netlist = chain();
        netlist.add_atom(Atom::new("f9", AtomKind::FlipFlop)).unwrap();
        let graph = AtomGraph::from_netlist(&netlist).unwrap();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.kind("f9"), Some(AtomKind::FlipFlop));
        assert_eq!(graph.nodes_of_kind(AtomKind::FlipFlop), vec!["f9"]);
    }

    #[test]
    fn test_dangling_wire() {
        let mut netlist = Netlist::new();
        netlist
            .add_atom(Atom::new("l1", AtomKind::LookupTable).with_output("out", ["x9"]))
            .unwrap();
        let err = AtomGraph::from_netlist(&netlist).unwrap_err();
        match err {
            NetlistError::UnresolvedPort { port, atom, oport } => {
                assert_eq!(port, "x9");
                assert_eq!(atom, "l1");
                assert_eq!(oport, "out");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_self_loop_kept() {
        let mut netlist = Netlist::new();
        netlist
            .add_atom(
                Atom::new("f1", AtomKind::FlipFlop)
                    .with_input("d")
                    .with_output("q", ["d"]),
            )
            .unwrap();
        let graph = AtomGraph::from_netlist(&netlist).unwrap();
        assert!(graph.contains_edge("f1", "f1"));
        assert_eq!(graph.edge_count(), 1);
    }
}
