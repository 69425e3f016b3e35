//! The in-memory netlist.

use std::collections::HashSet;

use super::types::{Atom, AtomKind};
use crate::error::{NetlistError, Result};

/// A complete netlist: four disjoint atom collections, one per kind.
///
/// Atoms keep the order they were added in, which for parsed documents is
/// document order. Layout relies on it to space boundary pins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Netlist {
    ffs: Vec<Atom>,
    luts: Vec<Atom>,
    ipins: Vec<Atom>,
    opins: Vec<Atom>,
    ids: HashSet<String>,
}

impl Netlist {
    /// Create an empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an atom to the collection matching its kind.
    ///
    /// Fails if another atom (of any kind) already uses the same identifier.
    pub fn add_atom(&mut self, atom: Atom) -> Result<()> {
        if !self.ids.insert(atom.id.clone()) {
            return Err(NetlistError::malformed(
                format!("{}/{}", atom.kind.section(), atom.id),
                "atom identifier is declared more than once",
            ));
        }
        self.collection_mut(atom.kind).push(atom);
        Ok(())
    }

    /// Atoms of one kind, in insertion order.
    pub fn atoms(&self, kind: AtomKind) -> &[Atom] {
        match kind {
            AtomKind::FlipFlop => &self.ffs,
            AtomKind::LookupTable => &self.luts,
            AtomKind::InputPin => &self.ipins,
            AtomKind::OutputPin => &self.opins,
        }
    }

    pub fn ffs(&self) -> &[Atom] {
        &self.ffs
    }

    pub fn luts(&self) -> &[Atom] {
        &self.luts
    }

    pub fn ipins(&self) -> &[Atom] {
        &self.ipins
    }

    pub fn opins(&self) -> &[Atom] {
        &self.opins
    }

    /// Iterate over every atom, collection by collection in [`AtomKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        AtomKind::ALL.into_iter().flat_map(move |kind| self.atoms(kind).iter())
    }

    /// Find an atom by identifier.
    pub fn find(&self, id: &str) -> Option<&Atom> {
        if !self.ids.contains(id) {
            return None;
        }
        self.iter().find(|atom| atom.id == id)
    }

    /// Total number of atoms.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn collection_mut(&mut self, kind: AtomKind) -> &mut Vec<Atom> {
        match kind {
            AtomKind::FlipFlop => &mut self.ffs,
            AtomKind::LookupTable => &mut self.luts,
            AtomKind::InputPin => &mut self.ipins,
            AtomKind::OutputPin => &mut self.opins,
        }
    }
}
