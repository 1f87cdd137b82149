pub mod chart;
pub mod config;
pub mod coordinate;
pub mod data;
pub mod datum;
pub mod error;
pub mod geometry;
pub mod layers;
pub mod series;
pub mod surface;
pub mod wheel;

pub use chart::Chart;
pub use config::{WheelConfig, WheelOptions};
pub use coordinate::Coordinate;
pub use error::WheelError;
pub use series::{RawPoint, SeriesRegistry};
pub use wheel::{RenderState, WheelRenderer};

#[cfg(test)]
mod test_utils;
