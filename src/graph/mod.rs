//! Atom graph construction.
//!
//! Turning port-level wiring into atom-level edges takes two passes:
//!
//! 1. [`PortOwners`] maps every input-port identifier to the atom declaring it.
//! 2. [`AtomGraph::build`] walks every output port's fan-out and adds an edge
//!    from the driving atom to the owner of each driven port.
//!
//! The ownership map is an ordinary value passed between the two steps.

mod builder;
mod resolver;

pub use builder::{AtomGraph, AtomNode};
pub use resolver::PortOwners;
