//! Reading and writing netlist JSON documents.
//!
//! Documents written by netlist dumpers use the empty string `""` wherever a
//! collection is empty. Here the marker, `null`, an absent field and a
//! genuinely empty collection all read as "no ports".

use std::collections::HashMap;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::model::Netlist;
use super::types::{Atom, AtomKind, OutputPort};
use crate::error::{NetlistError, Result};

/// The four top-level collections, keyed by atom identifier.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    #[serde(rename = "FFs")]
    ffs: Map<String, Value>,
    #[serde(rename = "OPins")]
    opins: Map<String, Value>,
    #[serde(rename = "IPins")]
    ipins: Map<String, Value>,
    #[serde(rename = "LUTs")]
    luts: Map<String, Value>,
}

impl Document {
    fn section(&self, kind: AtomKind) -> &Map<String, Value> {
        match kind {
            AtomKind::FlipFlop => &self.ffs,
            AtomKind::LookupTable => &self.luts,
            AtomKind::InputPin => &self.ipins,
            AtomKind::OutputPin => &self.opins,
        }
    }
}

/// Parse a netlist document from a JSON string.
pub fn parse(input: &str) -> Result<Netlist> {
    let document: Document = serde_json::from_str(input)
        .map_err(|e| NetlistError::malformed("document", e.to_string()))?;

    let mut netlist = Netlist::new();
    for kind in AtomKind::ALL {
        for (id, record) in document.section(kind) {
            netlist.add_atom(read_atom(kind, id, record)?)?;
        }
    }

    debug!(
        "parsed netlist: {} FFs, {} LUTs, {} IPins, {} OPins",
        netlist.ffs().len(),
        netlist.luts().len(),
        netlist.ipins().len(),
        netlist.opins().len()
    );

    Ok(netlist)
}

/// Parse a netlist document file, read as a whole.
pub fn parse_file(path: &Path) -> Result<Netlist> {
    let content = std::fs::read_to_string(path).map_err(|e| NetlistError::FileUnreadable {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

fn read_atom(kind: AtomKind, id: &str, record: &Value) -> Result<Atom> {
    let context = |field: &str| format!("{}/{}.{}", kind.section(), id, field);

    let fields = record.as_object().ok_or_else(|| {
        NetlistError::malformed(
            format!("{}/{}", kind.section(), id),
            format!("expected an atom record, found {}", describe(record)),
        )
    })?;

    let mut atom = Atom::new(id, kind);

    // Values under `iports` record fan-in and are not needed to build edges.
    if let Some(ports) = collection(fields.get("iports")).map_err(|m| NetlistError::malformed(context("iports"), m))? {
        atom.inputs = ports.keys().cloned().collect();
    }

    if let Some(ports) = collection(fields.get("oports")).map_err(|m| NetlistError::malformed(context("oports"), m))? {
        for (name, fanout) in ports {
            let fanout = read_fanout(fanout)
                .map_err(|m| NetlistError::malformed(format!("{}/{}.oports.{}", kind.section(), id, name), m))?;
            atom.outputs.push(OutputPort {
                name: name.clone(),
                fanout,
            });
        }
    }

    if let Some(phase) = fields.get("phase") {
        atom.phase = Some(read_phase(phase).map_err(|m| NetlistError::malformed(context("phase"), m))?);
    }

    Ok(atom)
}

/// Interpret an optional-or-empty collection field.
fn collection(value: Option<&Value>) -> std::result::Result<Option<&Map<String, Value>>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(format!("expected an object or \"\", found {}", describe(other))),
    }
}

fn read_fanout(value: &Value) -> std::result::Result<Vec<String>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(port) => Ok(port.clone()),
                other => Err(format!("expected an input-port identifier, found {}", describe(other))),
            })
            .collect(),
        other => Err(format!("expected a list of input ports or \"\", found {}", describe(other))),
    }
}

/// Dumpers write the phase as a number or as a numeric string.
fn read_phase(value: &Value) -> std::result::Result<u32, String> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| format!("expected a non-negative integer, found {}", describe(value)))
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(_) => "a list".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

impl Netlist {
    /// Build the JSON document for this netlist.
    ///
    /// Each input port lists the output port driving it as `"<atom>.<port>"`,
    /// and empty collections are written as the `""` marker.
    pub fn to_json(&self) -> Value {
        let mut drivers: HashMap<&str, Vec<String>> = HashMap::new();
        for atom in self.iter() {
            for (oport, dest) in atom.fanout() {
                drivers
                    .entry(dest)
                    .or_default()
                    .push(format!("{}.{}", atom.id, oport));
            }
        }

        let mut document = Map::new();
        for kind in [
            AtomKind::InputPin,
            AtomKind::OutputPin,
            AtomKind::LookupTable,
            AtomKind::FlipFlop,
        ] {
            let mut section = Map::new();
            for atom in self.atoms(kind) {
                let iports: Map<String, Value> = atom
                    .inputs
                    .iter()
                    .map(|port| {
                        let fanin = drivers.get(port.as_str()).cloned().unwrap_or_default();
                        (port.clone(), or_marker(fanin))
                    })
                    .collect();
                let oports: Map<String, Value> = atom
                    .outputs
                    .iter()
                    .map(|oport| (oport.name.clone(), or_marker(oport.fanout.clone())))
                    .collect();

                let mut record = Map::new();
                record.insert("iports".to_string(), object_or_marker(iports));
                record.insert("oports".to_string(), object_or_marker(oports));
                if let Some(phase) = atom.phase {
                    record.insert("phase".to_string(), json!(phase.to_string()));
                }
                section.insert(atom.id.clone(), Value::Object(record));
            }
            document.insert(kind.section().to_string(), Value::Object(section));
        }

        Value::Object(document)
    }

    /// Serialize this netlist as a pretty-printed JSON document.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_json()).map_err(|e| NetlistError::Export {
            message: e.to_string(),
        })
    }
}

fn or_marker(items: Vec<String>) -> Value {
    if items.is_empty() {
        Value::String(String::new())
    } else {
        json!(items)
    }
}

fn object_or_marker(map: Map<String, Value>) -> Value {
    if map.is_empty() {
        Value::String(String::new())
    } else {
        Value::Object(map)
    }
}
