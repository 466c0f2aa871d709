//! Image discovery, loading, and tensor conversion utilities.

mod collect;
mod load;

pub use collect::{collect_image_paths, IMAGE_EXTENSIONS};
pub use load::{image_to_patch, load_image};

use ndarray::Array3;

/// A single preprocessed tile in CHW format (channels, height, width).
/// Values are scaled to the [0, 1] range.
pub type Patch = Array3<f32>;

/// Number of channels in RGB images.
pub const RGB_CHANNELS: usize = 3;
