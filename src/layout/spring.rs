//! Force-directed (spring) placement.

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Point;
use crate::graph::AtomGraph;

/// Smallest distance used between two nodes, keeps repulsion finite.
const MIN_DISTANCE: f64 = 0.01;

/// A graph-drawing algorithm that places every node of a graph.
pub trait ForceLayout {
    /// Compute one position per node, indexed like the graph's nodes.
    ///
    /// `iterations` bounds the relaxation steps and `spread` is the preferred
    /// distance between connected nodes.
    fn place(&self, graph: &AtomGraph, iterations: usize, spread: f64) -> Vec<Point>;
}

/// Fruchterman-Reingold spring embedding.
///
/// Nodes start at seeded random points in the unit square. Each step, every
/// pair of nodes repels with force `k²/d` and every connected pair attracts
/// with force `d²/k`; nodes then move along their net force by at most the
/// current temperature, which cools linearly to zero over the step budget.
/// The result is centred on the origin and scaled so the farthest coordinate
/// sits at `±scale`.
///
/// Edge direction is ignored for attraction.
#[derive(Debug, Clone)]
pub struct SpringLayout {
    /// Seed for the initial placement
    pub seed: u64,
    /// Half-extent of the rescaled layout
    pub scale: f64,
}

impl Default for SpringLayout {
    fn default() -> Self {
        Self {
            seed: super::DEFAULT_SEED,
            scale: super::DEFAULT_SCALE,
        }
    }
}

impl SpringLayout {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

impl ForceLayout for SpringLayout {
    fn place(&self, graph: &AtomGraph, iterations: usize, spread: f64) -> Vec<Point> {
        let n = graph.node_count();
        match n {
            0 => return Vec::new(),
            1 => return vec![Point::ORIGIN],
            _ => {}
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut pos: Vec<Point> = (0..n)
            .map(|_| Point::new(rng.random::<f64>(), rng.random::<f64>()))
            .collect();

        let neighbours = neighbours(graph);

        let k = spread;
        let (width, height) = extent(&pos);
        let mut temperature = width.max(height) * 0.1;
        let cooling = temperature / (iterations as f64 + 1.0);

        let mut displacement = vec![Point::ORIGIN; n];
        for step in 0..iterations {
            for (i, disp) in displacement.iter_mut().enumerate() {
                *disp = Point::ORIGIN;
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let (dx, dy, distance) = offset(pos[i], pos[j]);
                    let repulsion = k * k / (distance * distance);
                    disp.x += dx * repulsion;
                    disp.y += dy * repulsion;
                }
                for &j in &neighbours[i] {
                    let (dx, dy, distance) = offset(pos[i], pos[j]);
                    let attraction = distance / k;
                    disp.x -= dx * attraction;
                    disp.y -= dy * attraction;
                }
            }

            for (p, disp) in pos.iter_mut().zip(&displacement) {
                let length = disp.x.hypot(disp.y);
                let length = if length < MIN_DISTANCE { 0.1 } else { length };
                p.x += disp.x * temperature / length;
                p.y += disp.y * temperature / length;
            }

            temperature -= cooling;
            trace!("spring step {}: temperature {:.4}", step, temperature);
        }

        rescale(&mut pos, self.scale);
        pos
    }
}

/// Undirected neighbour lists by node index, self-loops and parallel edges dropped.
fn neighbours(graph: &AtomGraph) -> Vec<Vec<usize>> {
    let mut lists = vec![Vec::new(); graph.node_count()];
    for edge in graph.graph().raw_edges() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if a != b {
            lists[a].push(b);
            lists[b].push(a);
        }
    }
    for list in &mut lists {
        list.sort_unstable();
        list.dedup();
    }
    lists
}

/// Offset from `q` to `p` and its length, clamped to `MIN_DISTANCE`.
fn offset(p: Point, q: Point) -> (f64, f64, f64) {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    (dx, dy, dx.hypot(dy).max(MIN_DISTANCE))
}

fn extent(points: &[Point]) -> (f64, f64) {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x, max_y - min_y)
}

/// Centre the points on the origin and fit them into `[-scale, scale]`.
fn rescale(points: &mut [Point], scale: f64) {
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;

    let mut limit = 0.0f64;
    for p in points.iter_mut() {
        p.x -= mean_x;
        p.y -= mean_y;
        limit = limit.max(p.x.abs()).max(p.y.abs());
    }

    if limit > 0.0 {
        for p in points.iter_mut() {
            p.x *= scale / limit;
            p.y *= scale / limit;
        }
    }
}
