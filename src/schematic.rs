//! The whole drawing pipeline.

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::export::Drawing;
use crate::graph::{AtomGraph, PortOwners};
use crate::layout::{layout, LayoutConfig, PositionMap};
use crate::netlist::{self, Netlist};

/// A netlist's atom graph together with its layout.
///
/// Either both are built or the whole operation fails.
#[derive(Debug, Clone)]
pub struct Schematic {
    pub graph: AtomGraph,
    pub positions: PositionMap,
}

impl Schematic {
    /// Resolve wiring, build the graph and lay it out.
    pub fn from_netlist(netlist: &Netlist, config: &LayoutConfig) -> Result<Self> {
        let owners = PortOwners::build(netlist)?;
        let graph = AtomGraph::build(netlist, &owners)?;
        let positions = layout(&graph, config)?;

        info!(
            "laid out {} atoms and {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        Ok(Self { graph, positions })
    }

    /// Run the pipeline on a JSON netlist document.
    pub fn from_json(input: &str, config: &LayoutConfig) -> Result<Self> {
        Self::from_netlist(&netlist::parse(input)?, config)
    }

    /// Run the pipeline on a JSON netlist file.
    pub fn from_file(path: &Path, config: &LayoutConfig) -> Result<Self> {
        Self::from_netlist(&netlist::parse_file(path)?, config)
    }

    /// The serializable drawing for this schematic.
    pub fn drawing(&self) -> Result<Drawing> {
        Drawing::new(&self.graph, &self.positions)
    }
}
