//! Error types for configuration and input dispatch.

use thiserror::Error;

/// Errors raised while configuring or invoking the clustering engine.
///
/// A pass with a validated configuration only fails on input dispatch
/// (unsupported point representation, subset index out of bounds). Invalid
/// points are skipped silently and never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
  /// Bin size along an axis is not a finite positive number.
  #[error("bin size for axis {axis} must be finite and > 0, got {value}")]
  InvalidBinSize { axis: char, value: f64 },

  /// Size filter bounds are inverted.
  #[error("min cluster size {min} exceeds max cluster size {max}")]
  InvalidSizeRange { min: usize, max: usize },

  /// Distance threshold or a distance weight is negative or not finite.
  #[error("distance parameter must be finite and >= 0, got {0}")]
  InvalidDistance(f64),

  /// Standard deviation interval is inverted or negative.
  #[error("std dev interval for axis {axis} is invalid: [{min}, {max}]")]
  InvalidStdDevInterval { axis: char, min: f64, max: f64 },

  /// Voxel validity parameters are negative or not finite.
  #[error("voxel min points scale must be finite and >= 0, got {0}")]
  InvalidMinPointsScale(f64),

  /// Adjacency mask is empty or contains a zero/duplicate offset.
  #[error("invalid adjacency mask: {0}")]
  InvalidMask(String),

  /// Point representation carries no spatial coordinates.
  #[error("unsupported input variant: {0} points have no spatial coordinates")]
  UnsupportedPointVariant(&'static str),

  /// Index subset names a point outside the cloud.
  #[error("subset index {index} out of bounds for cloud of {len} points")]
  IndexOutOfBounds { index: usize, len: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ClusterError>;
