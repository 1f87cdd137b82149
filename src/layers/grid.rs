use crate::config::WheelConfig;
use crate::coordinate::Coordinate;
use crate::error::Result;
use crate::geometry::{ray_endpoints, ring_radii};
use crate::layers::{clear_shapes, group_with_class};
use crate::surface::{Shape, ShapeId, Surface};

/// Concentric rings and the rays from the center to each label.
pub struct GridLayer {
    rings: ShapeId,
    rays: ShapeId,
    shapes: Vec<ShapeId>,
}

impl GridLayer {
    pub fn new<S: Surface>(surface: &mut S, container: ShapeId) -> Result<Self> {
        Ok(Self {
            rings: group_with_class(surface, container, "flavor-wheel__ring-grid")?,
            rays: group_with_class(surface, container, "flavor-wheel__ray-grid")?,
            shapes: Vec::new(),
        })
    }

    pub fn ring_group(&self) -> ShapeId {
        self.rings
    }

    pub fn ray_group(&self) -> ShapeId {
        self.rays
    }

    /// Draws the grid, replacing whatever this layer drew before.
    pub fn draw<S: Surface>(&mut self, surface: &mut S, cfg: &WheelConfig) -> Result<()> {
        let radii = ring_radii(cfg.grid_radius(), cfg.ring_count());
        let ends = ray_endpoints(cfg.grid_radius(), cfg.ray_count())?;

        clear_shapes(surface, &mut self.shapes)?;

        let outer = radii.len() - 1;
        for (i, r) in radii.into_iter().enumerate() {
            let class = if i == outer {
                "ring-grid__circle ring-grid__circle--outer"
            } else {
                "ring-grid__circle"
            };
            let ring = Shape::Circle {
                center: Coordinate::ORIGIN,
                radius: r,
            };
            self.shapes.push(surface.create_shape(self.rings, ring, class)?);
        }

        for end in ends {
            let ray = Shape::Line {
                from: Coordinate::ORIGIN,
                to: end,
            };
            self.shapes
                .push(surface.create_shape(self.rays, ray, "ray-grid__ray")?);
        }
        Ok(())
    }
}
