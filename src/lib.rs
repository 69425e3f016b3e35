//! # Netlist Draw
//!
//! Turns a netlist of FPGA-style atoms into a directed graph with a
//! readable 2-D layout.
//!
//! This library provides:
//! - A model of netlists built from flip-flops, lookup tables, input pins and output pins
//! - A JSON document reader and writer for that model
//! - Resolution of port-level wiring into atom-level edges
//! - A layout that puts input pins on a left rail, output pins on a right
//!   rail, and force-lays-out the logic in between
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`netlist`] - Netlist model, document parsing, dumping and random generation
//! - [`graph`] - Input-port ownership and the atom graph
//! - [`layout`] - Force-directed placement and boundary pin rails
//! - [`export`] - Serializable drawings for renderers
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! draw-netlist netlist.json --iterations 50 > drawing.json
//! ```
//!
//! ### Library
//!
//! ```no_run
//! use netlist_draw::{LayoutConfig, Schematic};
//!
//! let input = std::fs::read_to_string("netlist.json").unwrap();
//! let schematic = Schematic::from_json(&input, &LayoutConfig::default()).unwrap();
//! for node in schematic.graph.nodes() {
//!     let p = schematic.positions.get(&node.id).unwrap();
//!     println!("{} {} ({:.3}, {:.3})", node.kind, node.id, p.x, p.y);
//! }
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { layout_netlist } from 'netlist_draw';
//!
//! const drawing = JSON.parse(layout_netlist(netlistJson, 50, 0.5, 0n));
//! ```

pub mod error;
pub mod export;
pub mod graph;
pub mod layout;
pub mod netlist;
mod schematic;

// Re-export main types for convenience
pub use error::{NetlistError, Result};
pub use export::Drawing;
pub use graph::AtomGraph;
pub use layout::{LayoutConfig, PositionMap};
pub use netlist::{AtomKind, Netlist};
pub use schematic::Schematic;

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::layout_netlist;
