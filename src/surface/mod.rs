use std::fmt;

use crate::config::ViewBox;
use crate::coordinate::Coordinate;
use crate::error::Result;

pub mod svg_surface;

pub use svg_surface::SvgSurface;

/// Opaque handle to a container, group or shape on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub usize);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Drawable geometry, in wheel coordinates. Surfaces convert to their own
/// display convention.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Coordinate,
        to: Coordinate,
    },
    Circle {
        center: Coordinate,
        radius: f64,
    },
    /// Polyline through `points`; closed when the last point repeats the first.
    Path {
        points: Vec<Coordinate>,
    },
    /// Text whose top-left corner is `origin`, one entry per line.
    Text {
        origin: Coordinate,
        lines: Vec<String>,
    },
}

impl Shape {
    pub fn text(origin: Coordinate, content: &str) -> Self {
        Shape::Text {
            origin,
            lines: content.split('\n').map(str::to_owned).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub width: f64,
    pub height: f64,
}

/// What the wheel renderer needs from the thing it draws on.
pub trait Surface {
    fn create_container(&mut self, view_box: ViewBox) -> ShapeId;

    fn create_group(&mut self, parent: ShapeId, class: &str) -> Result<ShapeId>;

    fn create_shape(&mut self, group: ShapeId, shape: Shape, class: &str) -> Result<ShapeId>;

    /// Replaces the geometry of an existing shape, keeping its identity.
    fn update_shape(&mut self, handle: ShapeId, shape: Shape) -> Result<()>;

    fn set_class(&mut self, handle: ShapeId, class: &str) -> Result<()>;

    /// Removes a shape or group together with everything below it.
    fn remove_shape(&mut self, handle: ShapeId) -> Result<()>;

    /// Rendered size of a text shape.
    fn measure_text(&self, handle: ShapeId) -> Result<TextBox>;

    fn set_visibility(&mut self, group: ShapeId, hidden: bool) -> Result<()>;
}
