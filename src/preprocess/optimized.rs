//! Optimized tiling path: one float conversion, separable resample, tile slicing.
//!
//! The image is converted to a planar float tensor once, resampled with
//! precomputed per-axis weight tables, and tiles are sliced out of the result
//! without going back through 8-bit pixels.

use image::RgbImage;
use ndarray::{s, Array3, ArrayView3, Axis};

use crate::image::{image_to_patch, Patch};

use super::{TileGrid, TileParams};

/// Support radius of the Catmull-Rom kernel.
const CUBIC_SUPPORT: f32 = 2.0;

/// Resize `image` onto `grid` and split it into row-major tiles.
pub(super) fn tile(image: &RgbImage, grid: TileGrid, params: &TileParams) -> Vec<Patch> {
    let size = params.image_size as usize;
    let planar = image_to_patch(image);

    let resized = resample(
        planar.view(),
        size * grid.cols as usize,
        size * grid.rows as usize,
    );

    let cols = grid.cols as usize;
    let mut patches: Vec<Patch> = (0..grid.tile_count() as usize)
        .map(|i| {
            let x = (i % cols) * size;
            let y = (i / cols) * size;
            resized.slice(s![.., y..y + size, x..x + size]).to_owned()
        })
        .collect();

    if params.use_thumbnail && patches.len() != 1 {
        patches.push(resample(planar.view(), size, size));
    }

    patches
}

/// Catmull-Rom cubic (B = 0, C = 0.5).
fn catmull_rom(x: f32) -> f32 {
    let a = x.abs();
    if a < 1.0 {
        (1.5 * a - 2.5).mul_add(a * a, 1.0)
    } else if a < 2.0 {
        ((-0.5 * a + 2.5) * a - 4.0).mul_add(a, 2.0)
    } else {
        0.0
    }
}

/// Normalized filter taps for one output sample.
#[derive(Debug)]
struct Taps {
    start: usize,
    weights: Vec<f32>,
}

/// Precompute taps for resampling an axis of `input` samples to `output` samples.
///
/// When downscaling the kernel is stretched by the scale factor so every input
/// sample contributes.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn axis_taps(input: usize, output: usize) -> Vec<Taps> {
    let ratio = input as f32 / output as f32;
    let scale = ratio.max(1.0);
    let support = CUBIC_SUPPORT * scale;
    let last = input as i64 - 1;

    (0..output)
        .map(|out| {
            let center = (out as f32 + 0.5) * ratio;
            let left = ((center - support).floor() as i64).clamp(0, last);
            let right = ((center + support).ceil() as i64).clamp(left + 1, input as i64);
            let center = center - 0.5;

            let mut weights: Vec<f32> = (left..right)
                .map(|i| catmull_rom((i as f32 - center) / scale))
                .collect();
            let sum: f32 = weights.iter().sum();
            if sum != 0.0 {
                weights.iter_mut().for_each(|w| *w /= sum);
            }

            Taps {
                start: left as usize,
                weights,
            }
        })
        .collect()
}

/// Resample a CHW tensor to `width x height`, rows first, then columns.
/// Output values are clamped to [0, 1].
fn resample(src: ArrayView3<'_, f32>, width: usize, height: usize) -> Array3<f32> {
    let (channels, in_height, in_width) = src.dim();

    let row_taps = axis_taps(in_height, height);
    let col_taps = axis_taps(in_width, width);

    let mut rows = Array3::<f32>::zeros((channels, height, in_width));
    for (c, mut plane) in rows.axis_iter_mut(Axis(0)).enumerate() {
        for (y, taps) in row_taps.iter().enumerate() {
            let mut out_row = plane.row_mut(y);
            for (k, &w) in taps.weights.iter().enumerate() {
                let src_row = src.slice(s![c, taps.start + k, ..]);
                out_row.scaled_add(w, &src_row);
            }
        }
    }

    let mut out = Array3::<f32>::zeros((channels, height, width));
    for (c, mut plane) in out.axis_iter_mut(Axis(0)).enumerate() {
        for y in 0..height {
            let src_row = rows.slice(s![c, y, ..]);
            for (x, taps) in col_taps.iter().enumerate() {
                let value: f32 = taps
                    .weights
                    .iter()
                    .zip(src_row.iter().skip(taps.start))
                    .map(|(&w, &v)| w * v)
                    .sum();
                plane[[y, x]] = value.clamp(0.0, 1.0);
            }
        }
    }

    out
}
