pub mod presets;
pub mod ratings;

pub use presets::{preset_labels, preset_names};
pub use ratings::{SeriesInput, load_ratings, read_ratings};
