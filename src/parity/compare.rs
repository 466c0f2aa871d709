//! Running both preprocessing modes and diffing their patches.

use image::RgbImage;

use crate::error::{Error, Result};
use crate::image::Patch;
use crate::preprocess::{PreprocessMode, Preprocessor, TileParams};

/// Absolute difference statistics between two patch sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchDiff {
    /// Largest elementwise absolute difference over all patches.
    pub max_abs_diff: f64,
    /// Mean over patches of each patch's mean absolute difference.
    pub mean_abs_diff: f64,
}

/// Run `preprocessor` on `image` in reference mode, then in optimized mode.
///
/// Returns `(reference, optimized)`.
///
/// # Errors
///
/// Propagates any error raised by the preprocessor unchanged.
pub fn preprocess_pair<P: Preprocessor + ?Sized>(
    preprocessor: &P,
    image: &RgbImage,
    params: &TileParams,
) -> Result<(Vec<Patch>, Vec<Patch>)> {
    let reference = preprocessor.preprocess(image, params, PreprocessMode::Reference)?;
    let optimized = preprocessor.preprocess(image, params, PreprocessMode::Optimized)?;
    Ok((reference, optimized))
}

/// Compare two patch sequences elementwise.
///
/// `label` names the image in error messages. Two empty sequences compare
/// as `(0.0, 0.0)`.
///
/// # Errors
///
/// Returns [`Error::PatchCountMismatch`] if the sequences differ in length, or
/// [`Error::ShapeMismatch`] for the first pair of patches whose shapes differ.
#[allow(clippy::cast_precision_loss)]
pub fn compare_patches(reference: &[Patch], optimized: &[Patch], label: &str) -> Result<PatchDiff> {
    if reference.len() != optimized.len() {
        return Err(Error::PatchCountMismatch {
            label: label.to_string(),
            reference: reference.len(),
            optimized: optimized.len(),
        });
    }

    let mut max_abs_diff = 0.0f64;
    let mut mean_sum = 0.0f64;

    for (r, o) in reference.iter().zip(optimized) {
        if r.shape() != o.shape() {
            return Err(Error::ShapeMismatch {
                label: label.to_string(),
                expected: r.shape().to_vec(),
                actual: o.shape().to_vec(),
            });
        }

        let mut patch_max = 0.0f32;
        let mut patch_sum = 0.0f64;
        for (&a, &b) in r.iter().zip(o.iter()) {
            let diff = (a - b).abs();
            patch_max = patch_max.max(diff);
            patch_sum += f64::from(diff);
        }

        max_abs_diff = max_abs_diff.max(f64::from(patch_max));
        mean_sum += patch_sum / r.len().max(1) as f64;
    }

    let mean_abs_diff = if reference.is_empty() {
        0.0
    } else {
        mean_sum / reference.len() as f64
    };

    Ok(PatchDiff {
        max_abs_diff,
        mean_abs_diff,
    })
}
