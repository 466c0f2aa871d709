//! Recursive image discovery.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File extensions (lowercase, without the dot) picked up by the collector.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg"];

/// Recursively collect every image file below `dir`.
///
/// Extensions are matched case-insensitively against [`IMAGE_EXTENSIONS`].
/// The returned paths are sorted so reports are reproducible between runs.
///
/// # Errors
///
/// Returns [`Error::NotADirectory`] if `dir` does not name an existing
/// directory, or [`Error::Io`] if a directory below it cannot be read.
pub fn collect_image_paths<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let root = dir.as_ref();

    if !root.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut paths = Vec::new();
    walk(root, &mut paths)?;
    paths.sort();

    tracing::debug!("Collected {} image(s) under {}", paths.len(), root.display());
    Ok(paths)
}

fn walk(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk(&path, paths)?;
        } else if has_image_extension(&path) {
            paths.push(path);
        }
    }

    Ok(())
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_filter() {
        assert!(has_image_extension(Path::new("a/b/photo.jpg")));
        assert!(has_image_extension(Path::new("PHOTO.JPG")));
        assert!(has_image_extension(Path::new("mixed.JpG")));
        assert!(!has_image_extension(Path::new("photo.jpeg")));
        assert!(!has_image_extension(Path::new("photo.png")));
        assert!(!has_image_extension(Path::new("jpg")));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = collect_image_paths(&missing).unwrap_err();
        assert!(matches!(err, Error::NotADirectory { path } if path == missing));
    }

    #[test]
    fn test_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("single.jpg");
        fs::write(&file, b"not really a jpeg").unwrap();

        assert!(matches!(
            collect_image_paths(&file),
            Err(Error::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_recursive_sorted_collection() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("deeper");
        fs::create_dir_all(&nested).unwrap();

        for name in ["b.jpg", "a.JPG", "notes.txt", "c.jpeg"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::write(nested.join("z.jpg"), b"x").unwrap();

        let paths = collect_image_paths(dir.path()).unwrap();
        let expected = vec![
            dir.path().join("a.JPG"),
            dir.path().join("b.jpg"),
            nested.join("z.jpg"),
        ];
        assert_eq!(paths, expected);
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_image_paths(dir.path()).unwrap().is_empty());
    }
}
