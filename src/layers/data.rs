use std::collections::{HashMap, HashSet};

use crate::config::WheelConfig;
use crate::coordinate::Coordinate;
use crate::error::Result;
use crate::geometry::wrap_around;
use crate::layers::{class_list, group_with_class};
use crate::series::SeriesRegistry;
use crate::surface::{Shape, ShapeId, Surface};

const PATH_CLASS: &str = "data-polyline__path";
const POINT_GROUP_CLASS: &str = "data-points__point-group";
const POINT_CLASS: &str = "data-points__point";

/// Handles drawn for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnSeries {
    pub path: ShapeId,
    pub point_group: ShapeId,
    pub markers: Vec<ShapeId>,
    class_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// One closed outline plus a marker per vertex for every registered series.
pub struct DataLayer {
    polylines: ShapeId,
    points: ShapeId,
    drawn: HashMap<String, DrawnSeries>,
}

struct Planned<'a> {
    key: &'a str,
    class_name: Option<&'a str>,
    vertices: Vec<Coordinate>,
}

impl DataLayer {
    pub fn new<S: Surface>(surface: &mut S, container: ShapeId) -> Result<Self> {
        Ok(Self {
            polylines: group_with_class(surface, container, "flavor-wheel__data-polyline")?,
            points: group_with_class(surface, container, "flavor-wheel__data-points")?,
            drawn: HashMap::new(),
        })
    }

    pub fn polyline_group(&self) -> ShapeId {
        self.polylines
    }

    pub fn points_group(&self) -> ShapeId {
        self.points
    }

    pub fn drawn(&self, key: &str) -> Option<&DrawnSeries> {
        self.drawn.get(key)
    }

    /// Brings the surface in line with `registry`: draws series it has not
    /// seen, moves existing shapes in place, and removes shapes of series
    /// that are gone. Every coordinate is resolved before the surface is
    /// touched.
    pub fn reconcile<S: Surface>(
        &mut self,
        surface: &mut S,
        cfg: &WheelConfig,
        registry: &SeriesRegistry<'_>,
    ) -> Result<ReconcileStats> {
        let plan = registry
            .series_in_order()
            .map(|s| {
                Ok(Planned {
                    key: s.key(),
                    class_name: s.class_name(),
                    vertices: s.coordinates()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut stats = ReconcileStats::default();

        // Exit
        let live: HashSet<&str> = plan.iter().map(|p| p.key).collect();
        let stale: Vec<String> = self
            .drawn
            .keys()
            .filter(|k| !live.contains(k.as_str()))
            .cloned()
            .collect();
        for key in stale {
            if let Some(d) = self.drawn.remove(&key) {
                surface.remove_shape(d.path)?;
                surface.remove_shape(d.point_group)?;
                stats.exited += 1;
            }
        }

        for p in plan {
            let outline = Shape::Path {
                points: wrap_around(&p.vertices),
            };
            match self.drawn.get_mut(p.key) {
                // Update
                Some(d) => {
                    surface.update_shape(d.path, outline)?;
                    if d.class_name.as_deref() != p.class_name {
                        surface.set_class(d.path, &class_list(PATH_CLASS, p.class_name))?;
                        surface.set_class(
                            d.point_group,
                            &class_list(POINT_GROUP_CLASS, p.class_name),
                        )?;
                        d.class_name = p.class_name.map(str::to_owned);
                    }
                    sync_markers(surface, cfg, d, &p.vertices)?;
                    stats.updated += 1;
                }
                // Enter
                None => {
                    let path = surface.create_shape(
                        self.polylines,
                        outline,
                        &class_list(PATH_CLASS, p.class_name),
                    )?;
                    let point_group = surface
                        .create_group(self.points, &class_list(POINT_GROUP_CLASS, p.class_name))?;
                    let mut d = DrawnSeries {
                        path,
                        point_group,
                        markers: Vec::new(),
                        class_name: p.class_name.map(str::to_owned),
                    };
                    sync_markers(surface, cfg, &mut d, &p.vertices)?;
                    self.drawn.insert(p.key.to_owned(), d);
                    stats.entered += 1;
                }
            }
        }
        Ok(stats)
    }
}

/// Joins markers to vertices by position: moves the shared ones, creates the
/// missing ones, drops the surplus.
fn sync_markers<S: Surface>(
    surface: &mut S,
    cfg: &WheelConfig,
    d: &mut DrawnSeries,
    vertices: &[Coordinate],
) -> Result<()> {
    let marker = |center: Coordinate| Shape::Circle {
        center,
        radius: cfg.marker_radius(),
    };
    for (&id, &v) in d.markers.iter().zip(vertices) {
        surface.update_shape(id, marker(v))?;
    }
    for &v in vertices.iter().skip(d.markers.len()) {
        let id = surface.create_shape(d.point_group, marker(v), POINT_CLASS)?;
        d.markers.push(id);
    }
    while d.markers.len() > vertices.len() {
        if let Some(id) = d.markers.pop() {
            surface.remove_shape(id)?;
        }
    }
    Ok(())
}
