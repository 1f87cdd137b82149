use std::collections::HashMap;
use std::f64::consts::TAU;
use std::fmt;

use serde::Deserialize;

use crate::error::{Result, WheelError};
use crate::geometry::LinearScale;

/// Upper bound on rings and rays drawn by the grid.
pub const MAX_GRID_LINES: usize = 4096;

/// Raw wheel configuration as supplied by a caller or a config file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WheelOptions {
    pub labels: Vec<String>,
    pub max_rating: f64,
    pub grid_radius: f64,
    pub view_width: f64,
    /// Defaults to one ring per whole rating step.
    pub ring_count: Option<usize>,
    /// Defaults to one ray per label.
    pub ray_count: Option<usize>,
    pub label_margin: f64,
    pub marker_radius: f64,
}

impl Default for WheelOptions {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            max_rating: 5.0,
            grid_radius: 250.0,
            view_width: 800.0,
            ring_count: None,
            ray_count: None,
            label_margin: 50.0,
            marker_radius: 4.0,
        }
    }
}

impl WheelOptions {
    pub fn with_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.as_ref().to_owned()).collect(),
            ..Default::default()
        }
    }
}

/// Square view box centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    pub fn centered_square(side: f64) -> Self {
        Self {
            min_x: -side / 2.0,
            min_y: -side / 2.0,
            width: side,
            height: side,
        }
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

/// Validated, immutable wheel configuration with its derived scales.
#[derive(Debug, Clone)]
pub struct WheelConfig {
    labels: Vec<String>,
    max_rating: f64,
    grid_radius: f64,
    view_width: f64,
    ring_count: usize,
    ray_count: usize,
    label_margin: f64,
    marker_radius: f64,
    rating_radial_scale: LinearScale,
    label_angular_scale: LinearScale,
    label_indexes: HashMap<String, usize>,
}

fn positive(name: &str, v: f64) -> Result<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(WheelError::Config(format!("{name} must be positive, got {v}")))
    }
}

fn non_negative(name: &str, v: f64) -> Result<f64> {
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(WheelError::Config(format!(
            "{name} must be non-negative, got {v}"
        )))
    }
}

impl WheelConfig {
    pub fn new(options: WheelOptions) -> Result<Self> {
        if options.labels.is_empty() {
            return Err(WheelError::Config(
                "at least 1 label is required".to_string(),
            ));
        }
        let max_rating = positive("max_rating", options.max_rating)?;
        let grid_radius = positive("grid_radius", options.grid_radius)?;
        let view_width = positive("view_width", options.view_width)?;
        let label_margin = non_negative("label_margin", options.label_margin)?;
        let marker_radius = non_negative("marker_radius", options.marker_radius)?;

        let ring_count = match options.ring_count {
            Some(n) => n,
            // Checked as a float so the cast can't saturate
            None if max_rating.ceil() > MAX_GRID_LINES as f64 => {
                return Err(WheelError::Config(format!(
                    "max_rating {max_rating} needs more than {MAX_GRID_LINES} rings; set ring_count"
                )));
            }
            None => (max_rating.ceil() as usize).max(1),
        };
        let ray_count = options.ray_count.unwrap_or(options.labels.len());
        for (name, n) in [("ring_count", ring_count), ("ray_count", ray_count)] {
            if !(1..=MAX_GRID_LINES).contains(&n) {
                return Err(WheelError::Config(format!(
                    "{name} must be between 1 and {MAX_GRID_LINES}, got {n}"
                )));
            }
        }

        let labels = options.labels;
        // Duplicate labels: the last position wins
        let label_indexes = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();

        // Index labels.len() wraps around onto index 0, so the domain is
        // inclusive of it.
        let label_angular_scale = LinearScale::new((0.0, labels.len() as f64), (0.0, TAU));
        let rating_radial_scale = LinearScale::new((0.0, max_rating), (0.0, grid_radius));

        Ok(Self {
            labels,
            max_rating,
            grid_radius,
            view_width,
            ring_count,
            ray_count,
            label_margin,
            marker_radius,
            rating_radial_scale,
            label_angular_scale,
            label_indexes,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn max_rating(&self) -> f64 {
        self.max_rating
    }

    pub fn grid_radius(&self) -> f64 {
        self.grid_radius
    }

    pub fn view_width(&self) -> f64 {
        self.view_width
    }

    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    pub fn label_margin(&self) -> f64 {
        self.label_margin
    }

    pub fn marker_radius(&self) -> f64 {
        self.marker_radius
    }

    /// Radius of the imaginary circle label boxes are centered on.
    pub fn label_radius(&self) -> f64 {
        self.grid_radius + self.label_margin
    }

    pub fn view_box(&self) -> ViewBox {
        ViewBox::centered_square(self.view_width)
    }

    /// Rating to radius: `[0, max_rating] -> [0, grid_radius]`.
    pub fn rating_radial_scale(&self) -> &LinearScale {
        &self.rating_radial_scale
    }

    /// Label index to angle: `[0, labels.len()] -> [0, 2π]`.
    pub fn label_angular_scale(&self) -> &LinearScale {
        &self.label_angular_scale
    }

    pub fn label_index(&self, label: &str) -> Result<usize> {
        self.label_indexes
            .get(label)
            .copied()
            .ok_or_else(|| WheelError::NotFound {
                label: label.to_owned(),
            })
    }
}
