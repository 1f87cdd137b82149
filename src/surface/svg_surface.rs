use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Element, Group, Line, Path, Style, Text as TextEl};
use svg::node::{Node, Text as TextNode};

use crate::config::ViewBox;
use crate::error::{Result, WheelError};
use crate::surface::{Shape, ShapeId, Surface, TextBox};

// Fixed-advance font model used to size labels
const CHAR_WIDTH: f64 = 7.0;
const LINE_HEIGHT: f64 = 16.0;
const MIN_TEXT_WIDTH: f64 = 16.0;

#[derive(Debug, Clone)]
enum NodeKind {
    Container(ViewBox),
    Group,
    Shape(Shape),
}

#[derive(Debug, Clone)]
struct SurfaceNode {
    kind: NodeKind,
    class: String,
    hidden: bool,
    parent: Option<ShapeId>,
    children: Vec<ShapeId>,
}

/// Retained in-memory SVG tree. Handles index an arena; removed slots are
/// never reused, so a stale handle can't alias a newer shape.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    nodes: Vec<Option<SurfaceNode>>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, id: ShapeId) -> Result<&SurfaceNode> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(WheelError::UnknownShape(id))
    }

    fn node_mut(&mut self, id: ShapeId) -> Result<&mut SurfaceNode> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(WheelError::UnknownShape(id))
    }

    fn insert(&mut self, parent: Option<ShapeId>, kind: NodeKind, class: &str) -> Result<ShapeId> {
        if let Some(p) = parent {
            if matches!(self.node(p)?.kind, NodeKind::Shape(_)) {
                return Err(WheelError::UnknownShape(p));
            }
        }
        let id = ShapeId(self.nodes.len());
        self.nodes.push(Some(SurfaceNode {
            kind,
            class: class.to_owned(),
            hidden: false,
            parent,
            children: Vec::new(),
        }));
        if let Some(p) = parent {
            self.node_mut(p)?.children.push(id);
        }
        Ok(id)
    }

    /// Direct children of a container or group, in draw order.
    pub fn children(&self, id: ShapeId) -> Result<&[ShapeId]> {
        Ok(&self.node(id)?.children)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        match &self.node(id).ok()?.kind {
            NodeKind::Shape(s) => Some(s),
            _ => None,
        }
    }

    pub fn class(&self, id: ShapeId) -> Option<&str> {
        self.node(id).ok().map(|n| n.class.as_str())
    }

    pub fn is_hidden(&self, id: ShapeId) -> bool {
        self.node(id).map(|n| n.hidden).unwrap_or(false)
    }

    pub fn is_live(&self, id: ShapeId) -> bool {
        self.node(id).is_ok()
    }

    /// Number of nodes currently on the surface.
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    fn element(&self, id: ShapeId) -> Result<Box<dyn Node>> {
        let n = self.node(id)?;
        let el: Box<dyn Node> = match &n.kind {
            NodeKind::Container(_) | NodeKind::Group => {
                let mut g = Group::new();
                if !n.class.is_empty() {
                    g = g.set("class", n.class.as_str());
                }
                if n.hidden {
                    g = g.set("visibility", "hidden");
                }
                for &c in &n.children {
                    g = g.add(self.element(c)?);
                }
                Box::new(g)
            }
            NodeKind::Shape(shape) => shape_element(shape, &n.class),
        };
        Ok(el)
    }

    /// Serializes the tree under `container` as a standalone SVG document.
    pub fn to_document(&self, container: ShapeId, css: Option<&str>) -> Result<Document> {
        let n = self.node(container)?;
        let NodeKind::Container(view_box) = n.kind else {
            return Err(WheelError::UnknownShape(container));
        };

        let mut doc = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("viewBox", view_box.to_string())
            .set("version", "1.1")
            .set("baseProfile", "full");
        if !n.class.is_empty() {
            doc = doc.set("class", n.class.as_str());
        }
        if let Some(css) = css.filter(|c| !c.is_empty()) {
            doc = doc.add(Style::new(css));
        }
        for &c in &n.children {
            doc = doc.add(self.element(c)?);
        }
        Ok(doc)
    }
}

fn shape_element(shape: &Shape, class: &str) -> Box<dyn Node> {
    match shape {
        Shape::Line { from, to } => Box::new(
            Line::new()
                .set("class", class)
                .set("x1", from.svg_x())
                .set("y1", from.svg_y())
                .set("x2", to.svg_x())
                .set("y2", to.svg_y()),
        ),
        Shape::Circle { center, radius } => Box::new(
            Circle::new()
                .set("class", class)
                .set("cx", center.svg_x())
                .set("cy", center.svg_y())
                .set("r", *radius),
        ),
        Shape::Path { points } => {
            let mut path = Path::new().set("class", class).set("fill", "none");
            if let Some((first, rest)) = points.split_first() {
                let mut d = Data::new().move_to((first.svg_x(), first.svg_y()));
                for p in rest {
                    d = d.line_to((p.svg_x(), p.svg_y()));
                }
                path = path.set("d", d);
            }
            Box::new(path)
        }
        Shape::Text { origin, lines } => {
            let mut text = TextEl::new("")
                .set("class", class)
                .set("x", origin.svg_x())
                .set("y", origin.svg_y());
            // One <tspan> per line, each stepping down one em from the last
            for line in lines {
                let mut tspan = Element::new("tspan");
                tspan.assign("class", "label__line");
                tspan.assign("x", origin.svg_x());
                tspan.assign("dy", "1em");
                tspan.append(TextNode::new(line.as_str()));
                text = text.add(tspan);
            }
            Box::new(text)
        }
    }
}

impl Surface for SvgSurface {
    fn create_container(&mut self, view_box: ViewBox) -> ShapeId {
        let id = ShapeId(self.nodes.len());
        self.nodes.push(Some(SurfaceNode {
            kind: NodeKind::Container(view_box),
            class: String::new(),
            hidden: false,
            parent: None,
            children: Vec::new(),
        }));
        id
    }

    fn create_group(&mut self, parent: ShapeId, class: &str) -> Result<ShapeId> {
        self.insert(Some(parent), NodeKind::Group, class)
    }

    fn create_shape(&mut self, group: ShapeId, shape: Shape, class: &str) -> Result<ShapeId> {
        self.insert(Some(group), NodeKind::Shape(shape), class)
    }

    fn update_shape(&mut self, handle: ShapeId, shape: Shape) -> Result<()> {
        match &mut self.node_mut(handle)?.kind {
            NodeKind::Shape(s) => {
                *s = shape;
                Ok(())
            }
            _ => Err(WheelError::UnknownShape(handle)),
        }
    }

    fn set_class(&mut self, handle: ShapeId, class: &str) -> Result<()> {
        self.node_mut(handle)?.class = class.to_owned();
        Ok(())
    }

    fn remove_shape(&mut self, handle: ShapeId) -> Result<()> {
        let parent = self.node(handle)?.parent;
        if let Some(p) = parent {
            self.node_mut(p)?.children.retain(|&c| c != handle);
        }
        let mut stack = vec![handle];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.nodes.get_mut(id.0).and_then(Option::take) {
                stack.extend(n.children);
            }
        }
        Ok(())
    }

    fn measure_text(&self, handle: ShapeId) -> Result<TextBox> {
        let NodeKind::Shape(Shape::Text { lines, .. }) = &self.node(handle)?.kind else {
            return Err(WheelError::UnknownShape(handle));
        };
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Ok(TextBox {
            width: (longest as f64 * CHAR_WIDTH).max(MIN_TEXT_WIDTH),
            height: lines.len().max(1) as f64 * LINE_HEIGHT,
        })
    }

    fn set_visibility(&mut self, group: ShapeId, hidden: bool) -> Result<()> {
        let n = self.node_mut(group)?;
        if matches!(n.kind, NodeKind::Shape(_)) {
            return Err(WheelError::UnknownShape(group));
        }
        n.hidden = hidden;
        Ok(())
    }
}
