use std::cell::OnceCell;

use crate::config::WheelConfig;
use crate::coordinate::Coordinate;
use crate::error::Result;

/// One rating for one label, bound to the config that places it.
#[derive(Debug, Clone)]
pub struct Datum<'c> {
    config: &'c WheelConfig,
    label: String,
    value: f64,
    index: usize,
    coordinate: OnceCell<Coordinate>,
}

impl<'c> Datum<'c> {
    pub fn new(config: &'c WheelConfig, label: impl Into<String>, value: f64) -> Result<Self> {
        let label = label.into();
        let index = config.label_index(&label)?;
        Ok(Self {
            config,
            label,
            value,
            index,
            coordinate: OnceCell::new(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn label_index(&self) -> usize {
        self.index
    }

    /// Polar position of this rating: radius from the rating scale, angle
    /// from the label's index. Computed once, then cached.
    pub fn coordinate(&self) -> Result<Coordinate> {
        if let Some(c) = self.coordinate.get() {
            return Ok(*c);
        }
        let r = self.config.rating_radial_scale().apply(self.value);
        let theta = self.config.label_angular_scale().apply(self.index as f64);
        let c = Coordinate::from_polar(r, theta)?;
        Ok(*self.coordinate.get_or_init(|| c))
    }
}
