//! Input-port ownership.

use std::collections::HashMap;

use crate::error::{NetlistError, Result};
use crate::netlist::Netlist;

/// Maps every declared input-port identifier to the atom that declares it.
///
/// Fan-out lists name the ports they drive, not the atoms, so edge
/// construction needs this reverse lookup.
#[derive(Debug, Clone, Default)]
pub struct PortOwners<'a> {
    owners: HashMap<&'a str, &'a str>,
}

impl<'a> PortOwners<'a> {
    /// Collect the input ports of every atom in the netlist.
    ///
    /// An input-port identifier declared by two atoms (or twice by one atom)
    /// is rejected, since either owner would silently lose its edges.
    pub fn build(netlist: &'a Netlist) -> Result<Self> {
        let mut owners = HashMap::new();

        for atom in netlist.iter() {
            for port in &atom.inputs {
                if let Some(previous) = owners.insert(port.as_str(), atom.id.as_str()) {
                    return Err(NetlistError::malformed(
                        format!("input port '{}'", port),
                        format!("declared by both '{}' and '{}'", previous, atom.id),
                    ));
                }
            }
        }

        Ok(Self { owners })
    }

    /// The atom owning an input port.
    pub fn owner(&self, port: &str) -> Option<&'a str> {
        self.owners.get(port).copied()
    }

    /// Number of known input ports.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
