use crate::error::Result;
use crate::surface::{ShapeId, Surface};

pub mod data;
pub mod grid;
pub mod labels;

pub use data::{DataLayer, ReconcileStats};
pub use grid::GridLayer;
pub use labels::LabelsLayer;

pub fn group_with_class<S: Surface>(surface: &mut S, parent: ShapeId, class: &str) -> Result<ShapeId> {
    surface.create_group(parent, class)
}

/// Removes every handle in `shapes`, leaving it empty.
pub fn clear_shapes<S: Surface>(surface: &mut S, shapes: &mut Vec<ShapeId>) -> Result<()> {
    for id in shapes.drain(..) {
        surface.remove_shape(id)?;
    }
    Ok(())
}

/// Base class plus the caller's optional display tag.
pub fn class_list(base: &str, extra: Option<&str>) -> String {
    match extra {
        Some(e) if !e.is_empty() => format!("{base} {e}"),
        _ => base.to_owned(),
    }
}
