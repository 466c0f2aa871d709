//! Tile grid selection for dynamic-resolution tiling.

use super::TileParams;

/// A grid of `cols x rows` square tiles covering the resized image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    /// Number of tiles across.
    pub cols: u32,
    /// Number of tiles down.
    pub rows: u32,
}

impl TileGrid {
    /// Create a grid.
    #[must_use]
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Total number of tiles in the grid.
    #[must_use]
    pub const fn tile_count(&self) -> u32 {
        self.cols * self.rows
    }

    /// Width over height of the grid.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.cols) / f64::from(self.rows)
    }
}

/// Every grid whose tile count lies in `min_tiles..=max_tiles`.
///
/// Sorted by tile count, then columns, then rows.
#[must_use]
pub fn target_grids(min_tiles: u32, max_tiles: u32) -> Vec<TileGrid> {
    let mut grids: Vec<TileGrid> = (1..=max_tiles)
        .flat_map(|cols| (1..=max_tiles / cols).map(move |rows| TileGrid::new(cols, rows)))
        .filter(|grid| grid.tile_count() >= min_tiles)
        .collect();

    grids.sort_by_key(|grid| (grid.tile_count(), grid.cols, grid.rows));
    grids
}

/// Pick the grid whose aspect ratio is closest to `width / height`.
///
/// On an exact tie a later (larger) grid wins only if the image has enough
/// pixels to fill more than half of it at `image_size` resolution.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn closest_grid(width: u32, height: u32, grids: &[TileGrid], image_size: u32) -> TileGrid {
    let aspect_ratio = f64::from(width) / f64::from(height);
    let area = f64::from(width) * f64::from(height);
    let tile_area = f64::from(image_size) * f64::from(image_size);

    let mut best_diff = f64::INFINITY;
    let mut best = TileGrid::new(1, 1);

    for &grid in grids {
        let diff = (aspect_ratio - grid.aspect_ratio()).abs();
        if diff < best_diff {
            best_diff = diff;
            best = grid;
        } else if diff == best_diff && area > 0.5 * tile_area * f64::from(grid.tile_count()) {
            best = grid;
        }
    }

    best
}

/// Grid used to tile an image of the given size.
#[must_use]
pub fn select_grid(width: u32, height: u32, params: &TileParams) -> TileGrid {
    let grids = target_grids(params.min_tiles, params.max_tiles);
    closest_grid(width, height, &grids, params.image_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_grids_ordering() {
        let grids = target_grids(1, 4);
        let pairs: Vec<(u32, u32)> = grids.iter().map(|g| (g.cols, g.rows)).collect();

        assert_eq!(
            pairs,
            vec![(1, 1), (1, 2), (2, 1), (1, 3), (3, 1), (1, 4), (2, 2), (4, 1)]
        );
    }

    #[test]
    fn test_target_grids_respect_bounds() {
        let grids = target_grids(3, 12);

        assert!(grids.iter().all(|g| (3..=12).contains(&g.tile_count())));
        assert!(grids.contains(&TileGrid::new(3, 4)));
        assert!(grids.contains(&TileGrid::new(12, 1)));
        assert!(!grids.contains(&TileGrid::new(1, 1)));
        assert!(!grids.contains(&TileGrid::new(1, 2)));
    }

    #[test]
    fn test_target_grids_large_max_tiles() {
        let max_tiles = 20_000;
        let grids = target_grids(1, max_tiles);

        assert!(grids.iter().all(|g| (1..=max_tiles).contains(&g.tile_count())));
        assert!(grids.contains(&TileGrid::new(max_tiles, 1)));
        assert!(grids.contains(&TileGrid::new(1, max_tiles)));
        assert!(grids.contains(&TileGrid::new(141, 141)));
        assert!(!grids.contains(&TileGrid::new(142, 142)));
    }

    #[test]
    fn test_square_image_small_area_keeps_single_tile() {
        let grids = target_grids(1, 12);
        assert_eq!(closest_grid(512, 512, &grids, 512), TileGrid::new(1, 1));
    }

    #[test]
    fn test_square_image_large_area_upgrades_on_tie() {
        let grids = target_grids(1, 12);
        // 1x1, 2x2 and 3x3 tie on ratio; area clears the bar for 2x2 but not 3x3.
        assert_eq!(closest_grid(1024, 1024, &grids, 512), TileGrid::new(2, 2));
        assert_eq!(closest_grid(2048, 2048, &grids, 512), TileGrid::new(3, 3));
    }

    #[test]
    fn test_wide_and_tall_images() {
        let grids = target_grids(1, 12);
        assert_eq!(closest_grid(1000, 500, &grids, 512), TileGrid::new(2, 1));
        assert_eq!(closest_grid(300, 900, &grids, 512), TileGrid::new(1, 3));
    }

    #[test]
    fn test_select_grid_uses_params() {
        let params = TileParams {
            max_tiles: 1,
            ..TileParams::default()
        };
        assert_eq!(select_grid(4000, 500, &params), TileGrid::new(1, 1));
    }
}
