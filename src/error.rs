use thiserror::Error;

use crate::surface::ShapeId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("label \"{label}\" is not configured")]
    NotFound { label: String },
    #[error("expected {expected} {what}, got {actual}")]
    Mismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("bad coordinates given: {0}")]
    NaNCoordinate(String),
    #[error("handle {0} does not name a usable node")]
    UnknownShape(ShapeId),
}

pub type Result<T, E = WheelError> = std::result::Result<T, E>;
