use log::{debug, info};

use crate::config::WheelConfig;
use crate::error::{Result, WheelError};
use crate::layers::{DataLayer, GridLayer, LabelsLayer, ReconcileStats};
use crate::series::{RawPoint, SeriesRegistry};
use crate::surface::{ShapeId, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Unrendered,
    BaseRendered,
    LabelsRendered,
    DataRendered,
}

/// Layer stack, back to front.
struct Layers {
    container: ShapeId,
    grid: GridLayer,
    labels: LabelsLayer,
    data: DataLayer,
}

/// Draws a flavor wheel onto a [`Surface`] and keeps it in step with the
/// series added to it.
pub struct WheelRenderer<'c, S: Surface> {
    config: &'c WheelConfig,
    surface: S,
    registry: SeriesRegistry<'c>,
    layers: Option<Layers>,
    state: RenderState,
}

impl<'c, S: Surface> WheelRenderer<'c, S> {
    pub fn new(config: &'c WheelConfig, surface: S) -> Self {
        Self {
            config,
            surface,
            registry: SeriesRegistry::new(config),
            layers: None,
            state: RenderState::Unrendered,
        }
    }

    /// Builds a renderer and draws its grid.
    pub fn initialize(config: &'c WheelConfig, surface: S) -> Result<Self> {
        let mut renderer = Self::new(config, surface);
        renderer.render_base()?;
        Ok(renderer)
    }

    pub fn config(&self) -> &'c WheelConfig {
        self.config
    }

    pub fn registry(&self) -> &SeriesRegistry<'c> {
        &self.registry
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Root container, once the base has been rendered.
    pub fn container(&self) -> Option<ShapeId> {
        self.layers.as_ref().map(|l| l.container)
    }

    pub fn grid(&self) -> Option<&GridLayer> {
        self.layers.as_ref().map(|l| &l.grid)
    }

    pub fn labels(&self) -> Option<&LabelsLayer> {
        self.layers.as_ref().map(|l| &l.labels)
    }

    pub fn data(&self) -> Option<&DataLayer> {
        self.layers.as_ref().map(|l| &l.data)
    }

    /// Draws the rings and rays. Safe to call again: the grid is redrawn in
    /// place and labels and data are left alone.
    pub fn render_base(&mut self) -> Result<()> {
        let cfg = self.config;
        if self.layers.is_none() {
            let s = &mut self.surface;
            let container = s.create_container(cfg.view_box());
            let grid = GridLayer::new(s, container)?;
            let labels = LabelsLayer::new(s, container)?;
            let data = DataLayer::new(s, container)?;
            self.layers = Some(Layers {
                container,
                grid,
                labels,
                data,
            });
        }
        if let Some(layers) = self.layers.as_mut() {
            layers.grid.draw(&mut self.surface, cfg)?;
        }
        info!(
            "rendered base grid: {} rings, {} rays",
            cfg.ring_count(),
            cfg.ray_count()
        );
        if self.state == RenderState::Unrendered {
            self.state = RenderState::BaseRendered;
        }
        Ok(())
    }

    fn ensure_base(&mut self) -> Result<()> {
        if self.layers.is_none() {
            self.render_base()?;
        }
        Ok(())
    }

    /// Places `labels` around the wheel, one per ray.
    pub fn render_labels<L: AsRef<str>>(&mut self, labels: &[L]) -> Result<()> {
        let cfg = self.config;
        if labels.len() != cfg.ray_count() {
            return Err(WheelError::Mismatch {
                what: "labels",
                expected: cfg.ray_count(),
                actual: labels.len(),
            });
        }
        self.ensure_base()?;
        if let Some(layers) = self.layers.as_mut() {
            layers.labels.draw(&mut self.surface, cfg, labels)?;
        }
        if self.state == RenderState::BaseRendered {
            self.state = RenderState::LabelsRendered;
        }
        Ok(())
    }

    /// Labels the wheel with the configured label list.
    pub fn render_config_labels(&mut self) -> Result<()> {
        let labels = self.config.labels();
        self.render_labels(labels)
    }

    /// Adds the series `key`, or replaces its ratings if it already exists,
    /// then redraws the data layer.
    pub fn add_data(
        &mut self,
        raw_points: &[RawPoint],
        key: &str,
        class_name: Option<&str>,
    ) -> Result<ReconcileStats> {
        let expected = self.config.labels().len();
        if raw_points.len() != expected {
            return Err(WheelError::Mismatch {
                what: "data points (one per label)",
                expected,
                actual: raw_points.len(),
            });
        }
        self.registry.upsert(key, raw_points, class_name)?;
        self.render()
    }

    /// Drops the series `key` and its shapes. Returns whether it existed.
    pub fn remove_data(&mut self, key: &str) -> Result<bool> {
        if self.registry.remove(key).is_none() {
            return Ok(false);
        }
        if self.layers.is_some() {
            self.render()?;
        }
        Ok(true)
    }

    /// Reconciles the data layer with the registered series.
    pub fn render(&mut self) -> Result<ReconcileStats> {
        let cfg = self.config;
        self.ensure_base()?;
        let Some(layers) = self.layers.as_mut() else {
            return Ok(ReconcileStats::default());
        };
        let stats = layers.data.reconcile(&mut self.surface, cfg, &self.registry)?;
        debug!(
            "reconciled {} series: {} entered, {} updated, {} exited",
            self.registry.len(),
            stats.entered,
            stats.updated,
            stats.exited
        );
        self.state = RenderState::DataRendered;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Shape, SvgSurface};
    use crate::config::WheelOptions;
    use crate::test_utils::{make_config, points, tastes};

    fn full(values: [f64; 3]) -> Vec<RawPoint> {
        points(&[
            ("sweet", values[0]),
            ("sour", values[1]),
            ("salty", values[2]),
        ])
    }

    #[test]
    fn state_machine_advances() {
        let cfg = tastes();
        let mut w = WheelRenderer::new(&cfg, SvgSurface::new());
        assert_eq!(w.state(), RenderState::Unrendered);
        assert!(w.container().is_none());

        w.render_base().unwrap();
        assert_eq!(w.state(), RenderState::BaseRendered);
        w.render_config_labels().unwrap();
        assert_eq!(w.state(), RenderState::LabelsRendered);
        w.add_data(&full([1.0, 2.0, 3.0]), "p1", None).unwrap();
        assert_eq!(w.state(), RenderState::DataRendered);

        // Grid redraws don't rewind the state
        w.render_base().unwrap();
        assert_eq!(w.state(), RenderState::DataRendered);
    }

    #[test]
    fn groups_are_stacked_back_to_front() {
        let cfg = tastes();
        let w = WheelRenderer::initialize(&cfg, SvgSurface::new()).unwrap();
        let s = w.surface();
        let classes: Vec<&str> = s
            .children(w.container().unwrap())
            .unwrap()
            .iter()
            .filter_map(|&id| s.class(id))
            .collect();
        assert_eq!(
            classes,
            vec![
                "flavor-wheel__ring-grid",
                "flavor-wheel__ray-grid",
                "flavor-wheel__labels",
                "flavor-wheel__data-polyline",
                "flavor-wheel__data-points",
            ]
        );
    }

    #[test]
    fn base_render_is_idempotent() {
        let cfg = tastes();
        let mut w = WheelRenderer::initialize(&cfg, SvgSurface::new()).unwrap();
        w.render_config_labels().unwrap();
        w.add_data(&full([1.0, 2.0, 3.0]), "p1", None).unwrap();
        let count = w.surface().live_count();
        let path = w.data().unwrap().drawn("p1").unwrap().path;

        w.render_base().unwrap();
        w.render_base().unwrap();
        assert_eq!(w.surface().live_count(), count);
        assert!(w.surface().is_live(path));
        assert_eq!(w.surface().children(w.container().unwrap()).unwrap().len(), 5);
    }

    #[test]
    fn add_data_twice_keeps_one_series() {
        let cfg = tastes();
        let mut w = WheelRenderer::initialize(&cfg, SvgSurface::new()).unwrap();
        w.add_data(&full([5.0, 0.0, 5.0]), "p1", None).unwrap();
        let stats = w.add_data(&full([1.0, 0.0, 5.0]), "p1", None).unwrap();
        assert_eq!(stats.updated, 1);
        assert_eq!(w.registry().len(), 1);
        let values: Vec<f64> = w
            .registry()
            .get("p1")
            .unwrap()
            .data()
            .iter()
            .map(|d| d.value())
            .collect();
        assert_eq!(values, vec![1.0, 0.0, 5.0]);
        let polylines = w.data().unwrap().polyline_group();
        assert_eq!(w.surface().children(polylines).unwrap().len(), 1);
    }

    #[test]
    fn add_data_renders_base_on_demand() {
        let cfg = tastes();
        let mut w = WheelRenderer::new(&cfg, SvgSurface::new());
        w.add_data(&full([1.0, 1.0, 1.0]), "p1", Some("a")).unwrap();
        assert!(w.container().is_some());
        let d = w.data().unwrap().drawn("p1").unwrap();
        match w.surface().shape(d.path) {
            Some(Shape::Path { points }) => assert_eq!(points.len(), 4),
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn rejected_input_leaves_surface_untouched() {
        let cfg = tastes();
        let mut w = WheelRenderer::initialize(&cfg, SvgSurface::new()).unwrap();
        w.add_data(&full([1.0, 2.0, 3.0]), "p1", None).unwrap();
        let count = w.surface().live_count();

        let err = w
            .add_data(&points(&[("sweet", 1.0), ("sour", 1.0)]), "p2", None)
            .unwrap_err();
        assert!(matches!(err, WheelError::Mismatch { expected: 3, actual: 2, .. }));

        let err = w
            .add_data(&points(&[("sweet", 1.0), ("sour", 1.0), ("umami", 1.0)]), "p1", None)
            .unwrap_err();
        assert!(matches!(err, WheelError::NotFound { .. }));

        let err = w.render_labels(&["only one"]).unwrap_err();
        assert!(matches!(err, WheelError::Mismatch { what: "labels", .. }));

        assert_eq!(w.surface().live_count(), count);
        assert_eq!(w.registry().len(), 1);
    }

    #[test]
    fn data_points_count_labels_not_rays() {
        let cfg = make_config(&["sweet", "sour", "salty"], |o| o.ray_count = Some(6));
        let mut w = WheelRenderer::initialize(&cfg, SvgSurface::new()).unwrap();
        let rays = w.grid().unwrap().ray_group();
        assert_eq!(w.surface().children(rays).unwrap().len(), 6);

        w.add_data(&full([1.0, 2.0, 3.0]), "p1", None).unwrap();
        let six = points(&[
            ("sweet", 1.0),
            ("sour", 1.0),
            ("salty", 1.0),
            ("sweet", 2.0),
            ("sour", 2.0),
            ("salty", 2.0),
        ]);
        let err = w.add_data(&six, "p2", None).unwrap_err();
        assert_eq!(
            err,
            WheelError::Mismatch {
                what: "data points (one per label)",
                expected: 3,
                actual: 6,
            }
        );
        assert!(err.to_string().contains("one per label"));
    }

    #[test]
    fn huge_rating_scale_is_refused_before_drawing() {
        let opts = WheelOptions {
            max_rating: 1e300,
            ..WheelOptions::with_labels(&["sweet", "sour", "salty"])
        };
        assert!(matches!(WheelConfig::new(opts), Err(WheelError::Config(_))));

        let cfg = make_config(&["sweet", "sour", "salty"], |o| {
            o.max_rating = 1e9;
            o.ring_count = Some(4);
        });
        let w = WheelRenderer::initialize(&cfg, SvgSurface::new()).unwrap();
        let rings = w.grid().unwrap().ring_group();
        assert_eq!(w.surface().children(rings).unwrap().len(), 4);
    }

    #[test]
    fn remove_data_drops_shapes_and_keeps_order() {
        let cfg = tastes();
        let mut w = WheelRenderer::initialize(&cfg, SvgSurface::new()).unwrap();
        for k in ["a", "b", "c"] {
            w.add_data(&full([1.0, 2.0, 3.0]), k, None).unwrap();
        }
        let b = w.data().unwrap().drawn("b").unwrap().clone();

        assert!(w.remove_data("b").unwrap());
        assert!(!w.remove_data("b").unwrap());
        assert!(!w.surface().is_live(b.path));
        assert!(!w.surface().is_live(b.point_group));

        let keys: Vec<&str> = w.registry().series_in_order().map(|s| s.key()).collect();
        assert_eq!(keys, vec!["a", "c"]);
        let a = w.data().unwrap().drawn("a").unwrap().path;
        let c = w.data().unwrap().drawn("c").unwrap().path;
        let polylines = w.data().unwrap().polyline_group();
        assert_eq!(w.surface().children(polylines).unwrap(), [a, c]);
    }
}
