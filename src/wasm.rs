//! WASM bindings for Netlist Draw.
//!
//! This module provides JavaScript-friendly bindings so a web page can lay
//! out a netlist and render the result itself.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { layout_netlist } from 'netlist_draw';
//!
//! await init();
//!
//! const netlistJson = await (await fetch('netlist.json')).text();
//! const drawing = JSON.parse(layout_netlist(netlistJson, 50, 0.5, 0n));
//!
//! for (const node of drawing.nodes) {
//!   drawMarker(node.kind, node.x, node.y);
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::layout::LayoutConfig;
use crate::schematic::Schematic;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Lay out a netlist document and return the drawing as JSON.
///
/// # Arguments
/// * `netlist_json` - The netlist document
/// * `iterations` - Force-directed steps
/// * `spread` - Preferred distance between connected nodes
/// * `seed` - Seed for the initial placement
///
/// # Returns
/// The drawing JSON (`nodes`, `edges`, `groups`) or the error message.
#[wasm_bindgen]
pub fn layout_netlist(
    netlist_json: &str,
    iterations: usize,
    spread: f64,
    seed: u64,
) -> Result<String, JsValue> {
    let config = LayoutConfig::new()
        .with_iterations(iterations)
        .with_spread(spread)
        .with_seed(seed);

    Schematic::from_json(netlist_json, &config)
        .and_then(|schematic| schematic.drawing())
        .and_then(|drawing| drawing.to_json_pretty())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the default number of force-directed steps.
#[wasm_bindgen]
pub fn default_iterations() -> usize {
    crate::layout::DEFAULT_ITERATIONS
}
