//! Reference-versus-optimized preprocessing parity checks.

mod check;
mod compare;
pub mod harness;

pub use check::{CheckConfig, ImageComparison, ParityCheck, TOLERANCE};
pub use compare::{compare_patches, preprocess_pair, PatchDiff};
