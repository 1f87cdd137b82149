use std::f64::consts::TAU;

use crate::coordinate::Coordinate;
use crate::error::Result;

/// Linear map from `domain` onto `range`. Values outside the domain
/// extrapolate instead of clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn apply(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return r0;
        }
        r0 + (v - d0) / (d1 - d0) * (r1 - r0)
    }
}

/// Radii of the concentric grid rings: `ring_count - 1` evenly spaced inner
/// rings, then the outer ring at `grid_radius`.
pub fn ring_radii(grid_radius: f64, ring_count: usize) -> Vec<f64> {
    let step = grid_radius / ring_count as f64;
    let mut out: Vec<f64> = (1..ring_count).map(|i| i as f64 * step).collect();
    out.push(grid_radius);
    out
}

#[inline]
pub fn ray_angle(i: usize, ray_count: usize) -> f64 {
    TAU * i as f64 / ray_count as f64
}

/// Perimeter endpoints of every grid ray.
pub fn ray_endpoints(grid_radius: f64, ray_count: usize) -> Result<Vec<Coordinate>> {
    (0..ray_count)
        .map(|i| Coordinate::from_polar(grid_radius, ray_angle(i, ray_count)))
        .collect()
}

/// Drawn origin of a text box of `width` x `height` so the box is centered on
/// `anchor`. The origin is the box's top-left corner: left of the anchor by
/// half the width, above it by half the height.
pub fn centered_text_origin(anchor: Coordinate, width: f64, height: f64) -> Result<Coordinate> {
    anchor.offset(-width / 2.0, height / 2.0)
}

/// Closes a loop by repeating the first element at the end.
pub fn wrap_around<T: Clone>(items: &[T]) -> Vec<T> {
    let mut out = items.to_vec();
    if let Some(first) = items.first() {
        out.push(first.clone());
    }
    out
}
