use log::debug;

use crate::config::WheelConfig;
use crate::coordinate::Coordinate;
use crate::error::{Result, WheelError};
use crate::geometry::{centered_text_origin, ray_angle};
use crate::layers::{clear_shapes, group_with_class};
use crate::surface::{Shape, ShapeId, Surface};

/// Category labels, one per ray, centered just outside the grid.
pub struct LabelsLayer {
    group: ShapeId,
    texts: Vec<ShapeId>,
}

impl LabelsLayer {
    pub fn new<S: Surface>(surface: &mut S, container: ShapeId) -> Result<Self> {
        Ok(Self {
            group: group_with_class(surface, container, "flavor-wheel__labels")?,
            texts: Vec::new(),
        })
    }

    pub fn group(&self) -> ShapeId {
        self.group
    }

    pub fn texts(&self) -> &[ShapeId] {
        &self.texts
    }

    /// Places `labels` around the wheel.
    ///
    /// Text size is only known once the surface has laid a label out, so the
    /// labels are first drawn hidden at the origin, measured, then moved so
    /// each measured box is centered where its ray would meet a circle of
    /// radius `grid_radius + label_margin`.
    pub fn draw<S: Surface, L: AsRef<str>>(
        &mut self,
        surface: &mut S,
        cfg: &WheelConfig,
        labels: &[L],
    ) -> Result<()> {
        if labels.len() != cfg.ray_count() {
            return Err(WheelError::Mismatch {
                what: "labels",
                expected: cfg.ray_count(),
                actual: labels.len(),
            });
        }
        let anchors = (0..labels.len())
            .map(|i| Coordinate::from_polar(cfg.label_radius(), ray_angle(i, cfg.ray_count())))
            .collect::<Result<Vec<_>>>()?;

        surface.set_visibility(self.group, true)?;
        clear_shapes(surface, &mut self.texts)?;

        for label in labels {
            let text = Shape::text(Coordinate::ORIGIN, label.as_ref());
            self.texts
                .push(surface.create_shape(self.group, text, "flavor-labels__label")?);
        }

        for ((&id, anchor), label) in self.texts.iter().zip(anchors).zip(labels) {
            let bbox = surface.measure_text(id)?;
            let origin = centered_text_origin(anchor, bbox.width, bbox.height)?;
            debug!(
                "label {:?}: {}x{} box at {origin}",
                label.as_ref(),
                bbox.width,
                bbox.height
            );
            surface.update_shape(id, Shape::text(origin, label.as_ref()))?;
        }

        surface.set_visibility(self.group, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SvgSurface;
    use crate::test_utils::{approx, make_config, tastes};

    fn setup(cfg: &WheelConfig) -> (SvgSurface, LabelsLayer) {
        let mut s = SvgSurface::new();
        let root = s.create_container(cfg.view_box());
        let layer = LabelsLayer::new(&mut s, root).unwrap();
        (s, layer)
    }

    fn origin_of(s: &SvgSurface, id: ShapeId) -> Coordinate {
        match s.shape(id) {
            Some(Shape::Text { origin, .. }) => *origin,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn measured_boxes_are_centered_on_anchors() {
        let cfg = tastes();
        let (mut s, mut layer) = setup(&cfg);
        layer.draw(&mut s, &cfg, cfg.labels()).unwrap();
        assert_eq!(layer.texts().len(), 3);

        for (i, &id) in layer.texts().iter().enumerate() {
            let bbox = s.measure_text(id).unwrap();
            let o = origin_of(&s, id);
            let center_x = o.x() + bbox.width / 2.0;
            let center_y = o.y() - bbox.height / 2.0;
            let anchor = Coordinate::from_polar(300.0, ray_angle(i, 3)).unwrap();
            assert!(approx(center_x, anchor.x(), 1e-9));
            assert!(approx(center_y, anchor.y(), 1e-9));
        }

        // "sweet" sits to the right of the wheel: 5 chars * 7 wide, one line
        let o = origin_of(&s, layer.texts()[0]);
        assert!(approx(o.x(), 300.0 - 17.5, 1e-9));
        assert!(approx(o.y(), 8.0, 1e-9));
    }

    #[test]
    fn group_is_revealed_after_placement() {
        let cfg = tastes();
        let (mut s, mut layer) = setup(&cfg);
        layer.draw(&mut s, &cfg, cfg.labels()).unwrap();
        assert!(!s.is_hidden(layer.group()));
    }

    #[test]
    fn multiline_labels_keep_their_lines() {
        let cfg = make_config(&["stone\nfruit", "smoky"], |_| {});
        let (mut s, mut layer) = setup(&cfg);
        layer.draw(&mut s, &cfg, cfg.labels()).unwrap();
        match s.shape(layer.texts()[0]) {
            Some(Shape::Text { lines, .. }) => assert_eq!(lines, &["stone", "fruit"]),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn wrong_label_count_fails_before_drawing() {
        let cfg = tastes();
        let (mut s, mut layer) = setup(&cfg);
        let before = s.live_count();
        let err = layer.draw(&mut s, &cfg, &["sweet", "sour"]).unwrap_err();
        assert_eq!(
            err,
            WheelError::Mismatch {
                what: "labels",
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(s.live_count(), before);
        assert!(!s.is_hidden(layer.group()));
    }

    #[test]
    fn redraw_replaces_labels() {
        let cfg = tastes();
        let (mut s, mut layer) = setup(&cfg);
        layer.draw(&mut s, &cfg, cfg.labels()).unwrap();
        layer.draw(&mut s, &cfg, &["SWEET", "SOUR", "SALTY"]).unwrap();
        assert_eq!(s.children(layer.group()).unwrap().len(), 3);
        match s.shape(layer.texts()[1]) {
            Some(Shape::Text { lines, .. }) => assert_eq!(lines, &["SOUR"]),
            other => panic!("expected text, got {other:?}"),
        }
    }
}
