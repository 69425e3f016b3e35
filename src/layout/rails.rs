//! Fixed columns for boundary pins.

use super::Point;

/// Axis-aligned bounds of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounds of the given points, or `None` when there are none.
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = BoundingBox {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in &points[1..] {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Place `count` pins on a vertical rail at `x`.
///
/// Pin `i` sits at `min_y + i * (max_y - min_y) / count`. No pins, no rail.
pub fn pin_rail(count: usize, x: f64, min_y: f64, max_y: f64) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    let spacing = (max_y - min_y) / count as f64;
    (0..count)
        .map(|i| Point::new(x, min_y + i as f64 * spacing))
        .collect()
}
