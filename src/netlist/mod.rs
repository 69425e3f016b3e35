//! Netlist model and document handling.
//!
//! A netlist is a set of atoms (flip-flops, lookup tables, input pins and
//! output pins) whose output ports drive other atoms' input ports.
//!
//! # Document Format
//!
//! ```text
//! {
//!   "FFs":   { <atom id>: <atom>, ... },
//!   "OPins": { ... },
//!   "IPins": { ... },
//!   "LUTs":  { ... }
//! }
//!
//! atom   = { "iports": { <input port id>: <ignored>, ... } | "",
//!            "oports": { <output port name>: [<input port id>, ...] | "", ... } | "",
//!            "phase":  <integer> (optional) }
//! ```
//!
//! Input-port identifiers are unique across the whole netlist; output ports
//! are only named within their atom.
//!
//! # Example
//!
//! ```text
//! {
//!   "FFs": {},
//!   "IPins": { "i1": { "iports": "", "oports": { "out": ["l1_a"] } } },
//!   "LUTs":  { "l1": { "iports": { "l1_a": "" }, "oports": { "out": ["o1_in"] } } },
//!   "OPins": { "o1": { "iports": { "o1_in": "" }, "oports": "" } }
//! }
//! ```

mod document;
mod generate;
mod model;
mod types;

pub use document::{parse, parse_file};
pub use generate::{RandomNetlist, DEFAULT_CONNECT_PROB};
pub use model::Netlist;
pub use types::*;
