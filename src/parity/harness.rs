//! Test-harness fixture: an optional image directory that skips when absent.

use std::path::PathBuf;

use crate::error::Result;
use crate::image::collect_image_paths;

/// Environment variable naming the image directory for harness-driven runs.
pub const IMAGE_DIR_ENV: &str = "TILE_PARITY_IMAGE_DIR";

/// What a harness-driven test should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fixture {
    /// Run over these image paths (never empty).
    Ready(Vec<PathBuf>),
    /// Skip the test, with the reason.
    Skip(String),
}

/// Resolve an optional image directory into a fixture.
///
/// No directory and an empty directory both skip.
///
/// # Errors
///
/// Returns [`crate::Error::NotADirectory`] if a directory is configured but
/// does not exist.
pub fn image_fixture(dir: Option<PathBuf>) -> Result<Fixture> {
    let Some(dir) = dir else {
        return Ok(Fixture::Skip(format!("{IMAGE_DIR_ENV} not provided")));
    };

    let paths = collect_image_paths(&dir)?;
    if paths.is_empty() {
        return Ok(Fixture::Skip(format!("No images found in {}", dir.display())));
    }

    Ok(Fixture::Ready(paths))
}

/// [`image_fixture`] for the directory named by [`IMAGE_DIR_ENV`].
///
/// # Errors
///
/// See [`image_fixture`].
pub fn image_fixture_from_env() -> Result<Fixture> {
    image_fixture(std::env::var_os(IMAGE_DIR_ENV).map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_absent_directory_skips() {
        assert!(matches!(image_fixture(None), Ok(Fixture::Skip(_))));
    }

    #[test]
    fn test_empty_directory_skips() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"no images here").unwrap();

        let fixture = image_fixture(Some(dir.path().to_path_buf())).unwrap();
        assert!(matches!(fixture, Fixture::Skip(reason) if reason.starts_with("No images found")));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(matches!(
            image_fixture(Some(missing)),
            Err(Error::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_ready_with_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.jpg");
        std::fs::write(&path, b"x").unwrap();

        let fixture = image_fixture(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(fixture, Fixture::Ready(vec![path]));
    }
}
