//! Image loading utilities.

use std::path::Path;

use image::RgbImage;
use ndarray::Array3;

use crate::error::{Error, Result};

use super::{Patch, RGB_CHANNELS};

/// Load an image from disk and convert it to 8-bit RGB.
///
/// # Errors
///
/// Returns [`Error::ImageLoad`] if the file cannot be opened or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();

    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(img.to_rgb8())
}

/// Convert an RGB image to a CHW patch with values scaled to [0, 1].
#[allow(clippy::cast_possible_truncation)]
pub fn image_to_patch(img: &RgbImage) -> Patch {
    let (width, height) = (img.width() as usize, img.height() as usize);

    let mut patch = Array3::<f32>::zeros((RGB_CHANNELS, height, width));

    for (x, y, pixel) in img.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        for c in 0..RGB_CHANNELS {
            patch[[c, y, x]] = f32::from(pixel[c]) / 255.0;
        }
    }

    patch
}
