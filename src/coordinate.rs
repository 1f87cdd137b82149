use std::fmt;

use crate::error::{Result, WheelError};

/// Partially specified coordinate. Exactly one complete pair, either `x`/`y`
/// or `r`/`theta`, is needed to build a [`Coordinate`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordinateInput {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub r: Option<f64>,
    pub theta: Option<f64>,
}

/// A point in the wheel plane, held in both cartesian and polar form.
///
/// `y` grows upward and `theta` is measured counterclockwise from +x, in
/// radians. The drawing surface flips the vertical axis, which is what
/// [`Coordinate::svg_x`] and [`Coordinate::svg_y`] account for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    x: f64,
    y: f64,
    r: f64,
    theta: f64,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate {
        x: 0.0,
        y: 0.0,
        r: 0.0,
        theta: 0.0,
    };

    pub fn new(input: CoordinateInput) -> Result<Self> {
        let c = match input {
            CoordinateInput {
                x: Some(x),
                y: Some(y),
                ..
            } => Self {
                x,
                y,
                r: (x * x + y * y).sqrt(),
                theta: y.atan2(x),
            },
            CoordinateInput {
                r: Some(r),
                theta: Some(theta),
                ..
            } => Self {
                x: r * theta.cos(),
                y: r * theta.sin(),
                r,
                theta,
            },
            _ => return Err(WheelError::InvalidCoordinate(format!("{input:?}"))),
        };
        c.check_numeric()
    }

    pub fn from_cartesian(x: f64, y: f64) -> Result<Self> {
        Self::new(CoordinateInput {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        })
    }

    pub fn from_polar(r: f64, theta: f64) -> Result<Self> {
        Self::new(CoordinateInput {
            r: Some(r),
            theta: Some(theta),
            ..Default::default()
        })
    }

    fn check_numeric(self) -> Result<Self> {
        if self.x.is_nan() || self.y.is_nan() || self.r.is_nan() || self.theta.is_nan() {
            return Err(WheelError::NaNCoordinate(self.to_string()));
        }
        Ok(self)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    // Placement only. Never do arithmetic on the display values.
    pub fn svg_x(&self) -> f64 {
        self.x
    }

    pub fn svg_y(&self) -> f64 {
        -self.y
    }

    /// Cartesian translation by (`dx`, `dy`).
    pub fn offset(&self, dx: f64, dy: f64) -> Result<Self> {
        Self::from_cartesian(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{xy=({}, {}), polar=({}, {} rad)}}",
            self.x, self.y, self.r, self.theta
        )
    }
}
