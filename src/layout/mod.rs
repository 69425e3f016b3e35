//! 2-D layout of an atom graph.
//!
//! ## Method
//!
//! 1. Run a force-directed pass over the whole graph, pins included, to get
//!    a provisional position for every node.
//! 2. Take the bounding box of those positions.
//! 3. Move every input pin onto a vertical rail left of the box, at
//!    `min_x - pin_margin * width`, evenly spaced over `[min_y, max_y]` in
//!    netlist order.
//! 4. Do the same for output pins on a rail at `max_x + pin_margin * width`.
//! 5. Flip-flops and lookup tables keep their force-directed positions.
//!
//! The force-directed pass is pluggable through [`ForceLayout`];
//! [`SpringLayout`] is the default.

mod rails;
mod spring;

use std::collections::HashMap;

use log::debug;
use serde::Serialize;

use crate::error::{NetlistError, Result};
use crate::graph::AtomGraph;
use crate::netlist::AtomKind;

pub use rails::{pin_rail, BoundingBox};
pub use spring::{ForceLayout, SpringLayout};

/// Default relaxation steps for the force-directed pass.
pub const DEFAULT_ITERATIONS: usize = 50;

/// Default preferred distance between connected nodes.
pub const DEFAULT_SPREAD: f64 = 0.5;

/// Smallest accepted spread.
pub const MIN_SPREAD: f64 = 1e-100;

/// Default seed for the initial random placement.
pub const DEFAULT_SEED: u64 = 0;

/// Default distance of the pin rails from the bounding box, as a fraction of its width.
pub const DEFAULT_PIN_MARGIN: f64 = 0.1;

/// Default half-extent of the force-directed layout.
pub const DEFAULT_SCALE: f64 = 1.0;

/// A point in the drawing plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Configuration for the layout engine.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Relaxation steps for the force-directed pass.
    pub iterations: usize,
    /// Preferred distance between connected nodes.
    pub spread: f64,
    /// Seed for the initial random placement.
    pub seed: u64,
    /// Pin rail offset from the bounding box, as a fraction of its width.
    pub pin_margin: f64,
    /// Half-extent the force-directed layout is scaled to.
    pub scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            spread: DEFAULT_SPREAD,
            seed: DEFAULT_SEED,
            pin_margin: DEFAULT_PIN_MARGIN,
            scale: DEFAULT_SCALE,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of force-directed steps.
    ///
    /// A single step gives a coarse but usable spread; a few dozen let the
    /// layout settle for small and medium netlists.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_pin_margin(mut self, pin_margin: f64) -> Self {
        self.pin_margin = pin_margin;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.spread.is_finite() || self.spread <= 0.0 {
            return Err(NetlistError::invalid_param(format!(
                "spread must be positive, got {}",
                self.spread
            )));
        }
        // repulsion is spread², which must stay a normal float
        if self.spread < MIN_SPREAD {
            return Err(NetlistError::invalid_param(format!(
                "spread must be at least {:e}, got {:e}",
                MIN_SPREAD, self.spread
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(NetlistError::invalid_param(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if !self.pin_margin.is_finite() || self.pin_margin < 0.0 {
            return Err(NetlistError::invalid_param(format!(
                "pin margin must be non-negative, got {}",
                self.pin_margin
            )));
        }
        Ok(())
    }
}

/// Final position of every node, keyed by atom identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionMap {
    positions: HashMap<String, Point>,
}

impl PositionMap {
    pub fn get(&self, id: &str) -> Option<Point> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.positions.iter().map(|(id, p)| (id.as_str(), *p))
    }
}

/// Lay out a graph with the default spring embedding.
pub fn layout(graph: &AtomGraph, config: &LayoutConfig) -> Result<PositionMap> {
    let force = SpringLayout::new(config.seed).with_scale(config.scale);
    layout_with(graph, config, &force)
}

/// Lay out a graph using the given force-directed algorithm.
pub fn layout_with<F>(graph: &AtomGraph, config: &LayoutConfig, force: &F) -> Result<PositionMap>
where
    F: ForceLayout + ?Sized,
{
    config.validate()?;

    let mut placed = force.place(graph, config.iterations, config.spread);
    if placed.len() != graph.node_count() {
        return Err(NetlistError::LayoutMismatch {
            expected: graph.node_count(),
            actual: placed.len(),
        });
    }

    if let Some((node, _)) = graph
        .nodes()
        .zip(&placed)
        .find(|(_, p)| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(NetlistError::DegenerateLayout {
            node: node.id.clone(),
        });
    }

    let Some(bbox) = BoundingBox::of(&placed) else {
        return Ok(PositionMap::default());
    };
    debug!(
        "force layout: {} steps, bounding box x [{:.3}, {:.3}] y [{:.3}, {:.3}]",
        config.iterations, bbox.min_x, bbox.max_x, bbox.min_y, bbox.max_y
    );

    let margin = config.pin_margin * bbox.width();
    let rails = [
        (AtomKind::InputPin, bbox.min_x - margin),
        (AtomKind::OutputPin, bbox.max_x + margin),
    ];
    for (kind, x) in rails {
        let pins: Vec<usize> = graph
            .graph()
            .node_indices()
            .filter(|&node| graph.graph()[node].kind == kind)
            .map(|node| node.index())
            .collect();
        let rail = pin_rail(pins.len(), x, bbox.min_y, bbox.max_y);
        for (index, point) in pins.into_iter().zip(rail) {
            placed[index] = point;
        }
    }

    let positions = graph
        .nodes()
        .zip(placed)
        .map(|(node, point)| (node.id.clone(), point))
        .collect();

    Ok(PositionMap { positions })
}
