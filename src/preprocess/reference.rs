//! Reference tiling path: 8-bit bicubic resize, then per-tile conversion.

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::image::{image_to_patch, Patch};

use super::{TileGrid, TileParams};

/// Resize `image` onto `grid` and split it into row-major tiles.
pub(super) fn tile(image: &RgbImage, grid: TileGrid, params: &TileParams) -> Vec<Patch> {
    let size = params.image_size;
    let resized = imageops::resize(
        image,
        size * grid.cols,
        size * grid.rows,
        FilterType::CatmullRom,
    );

    let mut patches: Vec<Patch> = (0..grid.tile_count())
        .map(|i| {
            let x = (i % grid.cols) * size;
            let y = (i / grid.cols) * size;
            image_to_patch(&imageops::crop_imm(&resized, x, y, size, size).to_image())
        })
        .collect();

    if params.use_thumbnail && patches.len() != 1 {
        let thumbnail = imageops::resize(image, size, size, FilterType::CatmullRom);
        patches.push(image_to_patch(&thumbnail));
    }

    patches
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_tiles_are_row_major() {
        // Left half red, right half blue; a 2x1 grid at native size keeps them apart.
        let img = RgbImage::from_fn(16, 8, |x, _| {
            if x < 8 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        });
        let params = TileParams {
            image_size: 8,
            ..TileParams::default()
        };

        let patches = tile(&img, TileGrid::new(2, 1), &params);

        assert_eq!(patches.len(), 2);
        assert!((patches[0][[0, 4, 2]] - 1.0).abs() < 1e-6);
        assert!(patches[0][[2, 4, 2]].abs() < 1e-6);
        assert!(patches[1][[0, 4, 5]].abs() < 1e-6);
        assert!((patches[1][[2, 4, 5]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_uniform_image_stays_uniform() {
        let img = RgbImage::from_pixel(37, 23, Rgb([10, 200, 90]));
        let params = TileParams {
            image_size: 16,
            ..TileParams::default()
        };

        for patch in tile(&img, TileGrid::new(2, 2), &params) {
            assert!(patch
                .index_axis(ndarray::Axis(0), 1)
                .iter()
                .all(|&v| (v - 200.0 / 255.0).abs() < 1e-6));
        }
    }
}
