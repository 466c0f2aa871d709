//! Parity drivers: aggregate, per-item, and report modes.

use std::io::Write;
use std::path::Path;

use image::RgbImage;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Error, Result, Violation};
use crate::image::load_image;
use crate::preprocess::{DynamicTiler, Preprocessor, TileParams};

use super::compare::{compare_patches, preprocess_pair};

/// Maximum absolute difference (exclusive) accepted between the two paths.
pub const TOLERANCE: f64 = 0.06;

/// Configuration for a parity run.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Parameters passed to both preprocessing modes.
    pub params: TileParams,

    /// An image passes when its max difference is strictly below this.
    pub tolerance: f64,

    /// Whether to draw a progress bar on stderr.
    pub show_progress: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            params: TileParams::default(),
            tolerance: TOLERANCE,
            show_progress: true,
        }
    }
}

impl CheckConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is out of valid range.
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;

        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "tolerance".to_string(),
                reason: "must be a finite value greater than 0.0".to_string(),
            });
        }

        Ok(())
    }
}

/// Outcome of comparing both preprocessing modes on one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageComparison {
    /// File name of the image.
    pub name: String,
    /// Original `(width, height)` of the decoded image.
    pub dimensions: (u32, u32),
    /// Number of patches each mode produced.
    pub patch_count: usize,
    /// Largest elementwise absolute difference.
    pub max_abs_diff: f64,
    /// Mean of per-patch mean absolute differences.
    pub mean_abs_diff: f64,
}

impl ImageComparison {
    /// Whether the image is within `tolerance`.
    #[must_use]
    pub fn passes(&self, tolerance: f64) -> bool {
        self.max_abs_diff < tolerance
    }

    /// One human-readable report row.
    #[must_use]
    pub fn status_line(&self, tolerance: f64) -> String {
        let status = if self.passes(tolerance) { "OK" } else { "FAIL" };
        let size = format!("({}, {})", self.dimensions.0, self.dimensions.1);
        format!(
            "[{status}] {:>40}  {size:>14}  patches={:>2}  max_diff={:.6}  mean_diff={:.6}",
            self.name, self.patch_count, self.max_abs_diff, self.mean_abs_diff
        )
    }

    fn violation(&self) -> Violation {
        Violation {
            name: self.name.clone(),
            max_diff: self.max_abs_diff,
        }
    }
}

/// Compares the reference and optimized preprocessing modes over images.
pub struct ParityCheck<P = DynamicTiler> {
    config: CheckConfig,
    preprocessor: P,
}

impl ParityCheck<DynamicTiler> {
    /// Create a parity check against the built-in [`DynamicTiler`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: CheckConfig) -> Result<Self> {
        Self::with_preprocessor(config, DynamicTiler)
    }
}

impl<P: Preprocessor> ParityCheck<P> {
    /// Create a parity check against an arbitrary preprocessor.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_preprocessor(config: CheckConfig, preprocessor: P) -> Result<Self> {
        config.validate()?;

        tracing::debug!("Initializing parity check with config: {config:?}");

        Ok(Self {
            config,
            preprocessor,
        })
    }

    /// The configuration this check runs with.
    #[must_use]
    pub const fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Compare both modes on an already decoded image.
    ///
    /// # Errors
    ///
    /// Returns an error if preprocessing fails or the two outputs differ in
    /// patch count or shape.
    pub fn compare_loaded(&self, name: &str, image: &RgbImage) -> Result<ImageComparison> {
        let (reference, optimized) = preprocess_pair(&self.preprocessor, image, &self.config.params)?;
        let diff = compare_patches(&reference, &optimized, name)?;

        let comparison = ImageComparison {
            name: name.to_string(),
            dimensions: image.dimensions(),
            patch_count: reference.len(),
            max_abs_diff: diff.max_abs_diff,
            mean_abs_diff: diff.mean_abs_diff,
        };

        tracing::debug!(
            "{}: {} patch(es), max_diff={:.6}, mean_diff={:.6}",
            comparison.name,
            comparison.patch_count,
            comparison.max_abs_diff,
            comparison.mean_abs_diff
        );

        Ok(comparison)
    }

    /// Decode `path` and compare both modes on it.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be decoded, preprocessing fails,
    /// or the outputs differ structurally.
    pub fn compare_image(&self, path: &Path) -> Result<ImageComparison> {
        let image = load_image(path)?;
        self.compare_loaded(&file_name(path), &image)
    }

    /// Aggregate mode: stop at the first image at or above the tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToleranceExceeded`] for the first offending image, or
    /// any decode or structural error.
    pub fn check_all<Q: AsRef<Path>>(&self, paths: &[Q]) -> Result<Vec<ImageComparison>> {
        tracing::info!(
            "Comparing {} image(s) against tolerance {}",
            paths.len(),
            self.config.tolerance
        );

        let pb = self.progress_bar(paths.len(), "Comparing slow/fast");
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            pb.set_message(tail(&file_name(path), 30));

            let comparison = self.compare_image(path)?;
            if !comparison.passes(self.config.tolerance) {
                pb.suspend(|| tracing::warn!("{}", comparison.status_line(self.config.tolerance)));
                pb.abandon();
                return Err(Error::ToleranceExceeded {
                    name: comparison.name,
                    max_diff: comparison.max_abs_diff,
                    tolerance: self.config.tolerance,
                });
            }

            results.push(comparison);
            pb.inc(1);
        }

        pb.finish_and_clear();
        tracing::info!("Processed {} images, all within tolerance.", results.len());
        Ok(results)
    }

    /// Per-item mode: check every image, then fail once listing all offenders.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToleranceViolations`] naming every image at or above
    /// the tolerance, or the first decode or structural error.
    pub fn check_each<Q: AsRef<Path>>(&self, paths: &[Q]) -> Result<Vec<ImageComparison>> {
        tracing::info!(
            "Checking {} image(s) individually against tolerance {}",
            paths.len(),
            self.config.tolerance
        );

        let pb = self.progress_bar(paths.len(), "Per-image check");
        let mut results = Vec::with_capacity(paths.len());
        let mut violations = Vec::new();

        for path in paths {
            let path = path.as_ref();
            pb.set_message(tail(&file_name(path), 30));

            let comparison = self.compare_image(path)?;
            if !comparison.passes(self.config.tolerance) {
                pb.suspend(|| tracing::warn!("{}", comparison.status_line(self.config.tolerance)));
                violations.push(comparison.violation());
            }

            results.push(comparison);
            pb.inc(1);
        }

        pb.finish_and_clear();

        if violations.is_empty() {
            Ok(results)
        } else {
            Err(Error::ToleranceViolations(violations))
        }
    }

    /// Report mode: write one status row per image to `out`.
    ///
    /// Tolerance violations are reported, never raised.
    ///
    /// # Errors
    ///
    /// Returns any decode, structural, or write error.
    pub fn report<Q: AsRef<Path>, W: Write>(
        &self,
        paths: &[Q],
        out: &mut W,
    ) -> Result<Vec<ImageComparison>> {
        let pb = self.progress_bar(paths.len(), "Processing");
        let mut results = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            pb.set_message(tail(&file_name(path), 30));

            let comparison = self.compare_image(path)?;
            let line = comparison.status_line(self.config.tolerance);
            pb.suspend(|| writeln!(out, "{line}"))?;

            results.push(comparison);
            pb.inc(1);
        }

        pb.finish_and_clear();

        let failed = results
            .iter()
            .filter(|r| !r.passes(self.config.tolerance))
            .count();
        tracing::info!("{} image(s) checked, {failed} outside tolerance", results.len());

        Ok(results)
    }

    fn progress_bar(&self, len: usize, desc: &'static str) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{prefix}: [{bar:40.cyan/blue}] {pos}/{len} img ({eta}) {msg}")
                .expect("valid template")
                .progress_chars("#>-"),
        );
        pb.set_prefix(desc);
        pb
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Last `n` characters of `s`.
fn tail(s: &str, n: usize) -> String {
    let skip = s.chars().count().saturating_sub(n);
    s.chars().skip(skip).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn comparison(max_abs_diff: f64) -> ImageComparison {
        ImageComparison {
            name: "photo.jpg".to_string(),
            dimensions: (640, 480),
            patch_count: 2,
            max_abs_diff,
            mean_abs_diff: 0.001_5,
        }
    }

    #[test]
    fn test_config_default() {
        let config = CheckConfig::default();
        assert_eq!(config.tolerance, 0.06);
        assert_eq!(config.params, TileParams::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_tolerance() {
        for tolerance in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = CheckConfig {
                tolerance,
                ..CheckConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(Error::InvalidParameter { name, .. }) if name == "tolerance"),
                "{tolerance}"
            );
        }
    }

    #[test]
    fn test_tolerance_is_exclusive() {
        assert!(comparison(0.059_999).passes(TOLERANCE));
        assert!(!comparison(0.06).passes(TOLERANCE));
    }

    #[test]
    fn test_status_line_format() {
        let ok = comparison(0.012_345_67).status_line(TOLERANCE);
        assert_eq!(
            ok,
            format!(
                "[OK] {:>40}  {:>14}  patches= 2  max_diff=0.012346  mean_diff=0.001500",
                "photo.jpg", "(640, 480)"
            )
        );

        let fail = comparison(0.5).status_line(TOLERANCE);
        assert!(fail.starts_with("[FAIL] "));
        assert!(fail.contains("max_diff=0.500000"));
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail("short.jpg", 30), "short.jpg");
        assert_eq!(tail("abcdefghij", 4), "ghij");
        assert_eq!(tail("ünïcödé", 3), "ödé");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(&PathBuf::from("/data/imgs/cat.jpg")), "cat.jpg");
    }
}
