//! Dynamic-resolution tiling with a reference and an optimized resize path.

mod grid;
mod optimized;
mod reference;

pub use grid::{closest_grid, select_grid, target_grids, TileGrid};

use image::RgbImage;

use crate::error::{Error, Result};
use crate::image::Patch;

/// Largest accepted `max_tiles`.
pub const MAX_TILES_LIMIT: u32 = 4096;

/// Which implementation of the tiling pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreprocessMode {
    /// 8-bit bicubic resize followed by per-tile tensor conversion. Ground truth.
    Reference,
    /// Single float conversion followed by a separable bicubic resample.
    Optimized,
}

/// Parameters shared by both preprocessing modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileParams {
    /// Side length of each square tile in pixels.
    pub image_size: u32,
    /// Smallest tile count a grid may have.
    pub min_tiles: u32,
    /// Largest tile count a grid may have.
    pub max_tiles: u32,
    /// Append a whole-image thumbnail tile when more than one tile is produced.
    pub use_thumbnail: bool,
}

impl Default for TileParams {
    fn default() -> Self {
        Self {
            image_size: 512,
            min_tiles: 1,
            max_tiles: 12,
            use_thumbnail: false,
        }
    }
}

impl TileParams {
    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        if self.image_size == 0 {
            return Err(Error::InvalidParameter {
                name: "image_size".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.min_tiles == 0 {
            return Err(Error::InvalidParameter {
                name: "min_tiles".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.max_tiles < self.min_tiles {
            return Err(Error::InvalidParameter {
                name: "max_tiles".to_string(),
                reason: format!("must be at least min_tiles ({})", self.min_tiles),
            });
        }

        if self.max_tiles > MAX_TILES_LIMIT {
            return Err(Error::InvalidParameter {
                name: "max_tiles".to_string(),
                reason: format!("must be at most {MAX_TILES_LIMIT}"),
            });
        }

        if self.image_size.checked_mul(self.max_tiles).is_none() {
            return Err(Error::InvalidParameter {
                name: "max_tiles".to_string(),
                reason: format!("image_size * max_tiles overflows for image_size {}", self.image_size),
            });
        }

        Ok(())
    }
}

/// An image preprocessing capability with a reference and an optimized mode.
pub trait Preprocessor {
    /// Split `image` into an ordered sequence of patches.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters or the image are unusable.
    fn preprocess(
        &self,
        image: &RgbImage,
        params: &TileParams,
        mode: PreprocessMode,
    ) -> Result<Vec<Patch>>;
}

/// Aspect-ratio aware tiler: resize to the closest grid, then split into tiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct DynamicTiler;

impl Preprocessor for DynamicTiler {
    fn preprocess(
        &self,
        image: &RgbImage,
        params: &TileParams,
        mode: PreprocessMode,
    ) -> Result<Vec<Patch>> {
        params.validate()?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(Error::UnsupportedDimensions {
                width,
                height,
                reason: "image has no pixels".to_string(),
            });
        }

        let grid = select_grid(width, height, params);
        tracing::trace!(
            "Tiling {width}x{height} as {}x{} grid ({mode:?})",
            grid.cols,
            grid.rows
        );

        let patches = match mode {
            PreprocessMode::Reference => reference::tile(image, grid, params),
            PreprocessMode::Optimized => optimized::tile(image, grid, params),
        };

        Ok(patches)
    }
}
