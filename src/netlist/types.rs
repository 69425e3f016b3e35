//! Core types for netlist representation.

use std::fmt;

use serde::Serialize;

/// The four kinds of atom a netlist can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AtomKind {
    FlipFlop,
    LookupTable,
    InputPin,
    OutputPin,
}

impl AtomKind {
    /// All kinds, in the order their collections are read from a document.
    pub const ALL: [AtomKind; 4] = [
        AtomKind::FlipFlop,
        AtomKind::OutputPin,
        AtomKind::InputPin,
        AtomKind::LookupTable,
    ];

    /// The top-level document key holding atoms of this kind.
    pub fn section(&self) -> &'static str {
        match self {
            AtomKind::FlipFlop => "FFs",
            AtomKind::LookupTable => "LUTs",
            AtomKind::InputPin => "IPins",
            AtomKind::OutputPin => "OPins",
        }
    }

    /// Look up a kind by its top-level document key.
    pub fn from_section(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.section() == key)
    }

    /// Boundary pins form the circuit's external interface.
    pub fn is_boundary_pin(&self) -> bool {
        matches!(self, AtomKind::InputPin | AtomKind::OutputPin)
    }
}

impl fmt::Display for AtomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AtomKind::FlipFlop => "FF",
            AtomKind::LookupTable => "LUT",
            AtomKind::InputPin => "IPin",
            AtomKind::OutputPin => "OPin",
        };
        f.write_str(name)
    }
}

/// An output port and the input-port identifiers it drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPort {
    /// Port name, unique only within its atom
    pub name: String,
    /// Identifiers of the driven input ports, possibly empty
    pub fanout: Vec<String>,
}

/// A named circuit primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// Netlist-wide unique identifier
    pub id: String,
    /// Which collection the atom was declared in
    pub kind: AtomKind,
    /// Declared input-port identifiers (unique across the netlist)
    pub inputs: Vec<String>,
    /// Declared output ports with their fan-out lists
    pub outputs: Vec<OutputPort>,
    /// Pipeline phase, when the document records one
    pub phase: Option<u32>,
}

impl Atom {
    /// Create an atom with no ports.
    pub fn new(id: impl Into<String>, kind: AtomKind) -> Self {
        Self {
            id: id.into(),
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
            phase: None,
        }
    }

    /// Add an input port.
    pub fn with_input(mut self, port: impl Into<String>) -> Self {
        self.inputs.push(port.into());
        self
    }

    /// Add an output port driving the given input ports.
    pub fn with_output<I, S>(mut self, name: impl Into<String>, fanout: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs.push(OutputPort {
            name: name.into(),
            fanout: fanout.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Iterate over every driven input-port identifier with the output port driving it.
    pub fn fanout(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outputs
            .iter()
            .flat_map(|oport| oport.fanout.iter().map(move |dest| (oport.name.as_str(), dest.as_str())))
    }
}
