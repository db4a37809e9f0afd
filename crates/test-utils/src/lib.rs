//! Shared test utilities for the wms-tiles workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Layer configuration fixtures and YAML documents
//! - Temporary layer config directories
//! - Transforms that fail on demand
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_bbox_approx_eq, fixtures};
//! ```

pub mod fixtures;

use std::fs;
use std::io;

use tempfile::TempDir;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use wms_common::BoundingBox;

/// Write `files` (file name, YAML content) into a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub fn layer_config_dir(files: &[(&str, &str)]) -> io::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    for (name, content) in files {
        fs::write(dir.path().join(name), content)?;
    }
    Ok(dir)
}

/// Assert that two bounding boxes agree on every edge within `epsilon`.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_bbox_approx_eq;
///
/// assert_bbox_approx_eq!(reprojected, BoundingBox::new(-15.0, 35.0, 45.0, 72.0), 1e-9);
/// ```
#[macro_export]
macro_rules! assert_bbox_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: $crate::BoundingBox = $left;
        let right: $crate::BoundingBox = $right;
        let epsilon: f64 = $epsilon;
        let edges = [
            ("min_x", left.min_x, right.min_x),
            ("min_y", left.min_y, right.min_y),
            ("max_x", left.max_x, right.max_x),
            ("max_y", left.max_y, right.max_y),
        ];
        for (edge, l, r) in edges {
            if !((l - r).abs() <= epsilon) {
                panic!(
                    "assertion failed: bounding boxes differ at {}\n  left: `{:?}`,\n right: `{:?}`,\n epsilon: `{:?}`",
                    edge, left, right, epsilon
                );
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_bbox_approx_eq_passes() {
        assert_bbox_approx_eq!(
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(0.0001, -0.0001, 10.0, 10.0001),
            0.001
        );
    }

    #[test]
    #[should_panic(expected = "differ at max_y")]
    fn test_assert_bbox_approx_eq_fails() {
        assert_bbox_approx_eq!(
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
            BoundingBox::new(0.0, 0.0, 10.0, 11.0),
            0.001
        );
    }

    #[test]
    fn test_layer_config_dir() {
        let dir = layer_config_dir(&[("a.yaml", SQUARE_LAYER_YAML), ("notes.txt", "x")]).unwrap();
        assert!(dir.path().join("a.yaml").is_file());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }
}
