//! # tile-parity
//!
//! Checks that an optimized dynamic-tiling image preprocessor produces the
//! same patches as its reference implementation, within a fixed tolerance,
//! over a directory of real images.
//!
//! Each image is tiled twice, once per [`PreprocessMode`], and the two patch
//! sequences are compared elementwise. A run passes when every image's
//! maximum absolute difference stays strictly below [`TOLERANCE`].
//!
//! ## Example
//!
//! ```no_run
//! use tile_parity::{collect_image_paths, CheckConfig, ParityCheck};
//!
//! # fn main() -> tile_parity::Result<()> {
//! let paths = collect_image_paths("images/")?;
//! let check = ParityCheck::new(CheckConfig::default())?;
//!
//! check.check_each(&paths)?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod image;
pub mod parity;
pub mod preprocess;

pub use error::{Error, Result, Violation};
pub use crate::image::{collect_image_paths, load_image, Patch};
pub use parity::{
    compare_patches, preprocess_pair, CheckConfig, ImageComparison, ParityCheck, PatchDiff,
    TOLERANCE,
};
pub use preprocess::{DynamicTiler, PreprocessMode, Preprocessor, TileParams, MAX_TILES_LIMIT};
