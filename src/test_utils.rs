use crate::config::{WheelConfig, WheelOptions};
use crate::series::RawPoint;

// Check that the error between a and b is close enough
pub fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

pub fn make_config<S: AsRef<str>>(
    labels: &[S],
    patch: impl FnOnce(&mut WheelOptions),
) -> WheelConfig {
    let mut opts = WheelOptions::with_labels(labels);
    patch(&mut opts);
    WheelConfig::new(opts).expect("valid test config")
}

pub fn tastes() -> WheelConfig {
    make_config(&["sweet", "sour", "salty"], |_| {})
}

pub fn points(pairs: &[(&str, f64)]) -> Vec<RawPoint> {
    pairs
        .iter()
        .map(|&(label, value)| RawPoint::new(label, value))
        .collect()
}
