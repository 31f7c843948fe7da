//! ClusterConfig - voxelization, merge and filter parameters.

use glam::DVec3;

use crate::error::{ClusterError, Result};
use crate::mask::AdjacencyMask;
use crate::store::StorageBackend;

const AXES: [char; 3] = ['x', 'y', 'z'];

/// Closed `[min, max]` interval on a cluster standard deviation.
///
/// An interval with `max == 0` is disabled: it accepts everything.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StdDevInterval {
  pub min: f64,
  pub max: f64,
}

impl StdDevInterval {
  /// Interval that accepts every value.
  pub const DISABLED: Self = Self { min: 0.0, max: 0.0 };

  pub fn new(min: f64, max: f64) -> Self {
    Self { min, max }
  }

  #[inline]
  pub fn is_enabled(&self) -> bool {
    self.max > 0.0
  }

  /// True when disabled or `min <= value <= max`.
  #[inline]
  pub fn accepts(&self, value: f64) -> bool {
    !self.is_enabled() || (value >= self.min && value <= self.max)
  }
}

/// Which standard deviations the shape filter compares.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StdDevThresholdType {
  /// Raw per-axis standard deviations (x, y, z).
  #[default]
  Default,
  /// Principal axes of the x/y covariance (largest first) against the x and
  /// y intervals; raw z against the z interval.
  Pca2d,
  /// Principal axes of the full covariance (largest first) against x, y, z.
  Pca3d,
}

/// How flood fill treats voxels below the minimum point count.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InvalidVoxelPolicy {
  /// Invalid voxels never join a cluster. Their points are reported as
  /// rejected, one list per voxel.
  #[default]
  Exclude,
  /// Invalid voxels never seed or expand a cluster, but join the first
  /// cluster that reaches them. Unreached ones are reported as rejected.
  Absorb,
}

/// Configuration for one clustering engine.
///
/// Read-only during a pass; one config may serve concurrent passes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterConfig {
  /// Voxel edge length per axis in world units.
  pub bin_sizes: DVec3,

  /// Smallest accepted cluster, in points (inclusive).
  pub min_cluster_size: usize,

  /// Largest accepted cluster, in points (inclusive).
  pub max_cluster_size: usize,

  /// Maximum distance between neighboring voxel means for them to merge.
  /// 0 disables the check.
  pub distance_threshold: f64,

  /// Per-axis scaling of the mean difference before the distance check.
  /// All ones gives plain Euclidean distance.
  pub distance_weights: DVec3,

  /// Accepted standard deviation per axis (x, y, z).
  pub std_dev: [StdDevInterval; 3],

  /// How `std_dev` is interpreted.
  pub std_dev_threshold_type: StdDevThresholdType,

  /// Minimum points for a voxel to seed a cluster. 0 disables the check.
  pub voxel_min_points: usize,

  /// Depth scaling of `voxel_min_points`. 0 uses it unscaled.
  pub voxel_min_points_scale: f64,

  /// Treatment of voxels below the minimum point count.
  pub invalid_voxel_policy: InvalidVoxelPolicy,

  /// Neighborhood visited during flood fill.
  pub mask: AdjacencyMask,

  /// Storage backend of the per-pass voxel index.
  pub backend: StorageBackend,

  /// Emit per-voxel debug records with the result.
  pub collect_voxels: bool,
}

impl Default for ClusterConfig {
  fn default() -> Self {
    Self {
      bin_sizes: DVec3::splat(0.1),
      min_cluster_size: 0,
      max_cluster_size: 1_000_000,
      distance_threshold: 0.0,
      distance_weights: DVec3::ONE,
      std_dev: [StdDevInterval::DISABLED; 3],
      std_dev_threshold_type: StdDevThresholdType::Default,
      voxel_min_points: 0,
      voxel_min_points_scale: 0.0,
      invalid_voxel_policy: InvalidVoxelPolicy::Exclude,
      mask: AdjacencyMask::full(),
      backend: StorageBackend::Auto,
      collect_voxels: false,
    }
  }
}

impl ClusterConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_bin_size(mut self, size: f64) -> Self {
    self.bin_sizes = DVec3::splat(size);
    self
  }

  pub fn with_bin_sizes(mut self, sizes: DVec3) -> Self {
    self.bin_sizes = sizes;
    self
  }

  pub fn with_cluster_size(mut self, min: usize, max: usize) -> Self {
    self.min_cluster_size = min;
    self.max_cluster_size = max;
    self
  }

  pub fn with_distance_threshold(mut self, threshold: f64) -> Self {
    self.distance_threshold = threshold;
    self
  }

  pub fn with_distance_weights(mut self, weights: DVec3) -> Self {
    self.distance_weights = weights;
    self
  }

  pub fn with_std_dev(mut self, intervals: [StdDevInterval; 3]) -> Self {
    self.std_dev = intervals;
    self
  }

  pub fn with_std_dev_threshold_type(mut self, kind: StdDevThresholdType) -> Self {
    self.std_dev_threshold_type = kind;
    self
  }

  pub fn with_voxel_min_points(mut self, min_points: usize, scale: f64) -> Self {
    self.voxel_min_points = min_points;
    self.voxel_min_points_scale = scale;
    self
  }

  pub fn with_invalid_voxel_policy(mut self, policy: InvalidVoxelPolicy) -> Self {
    self.invalid_voxel_policy = policy;
    self
  }

  pub fn with_mask(mut self, mask: AdjacencyMask) -> Self {
    self.mask = mask;
    self
  }

  pub fn with_backend(mut self, backend: StorageBackend) -> Self {
    self.backend = backend;
    self
  }

  pub fn with_collect_voxels(mut self, collect: bool) -> Self {
    self.collect_voxels = collect;
    self
  }

  /// True when any standard deviation interval is enabled.
  #[inline]
  pub fn shape_filter_enabled(&self) -> bool {
    self.std_dev.iter().any(StdDevInterval::is_enabled)
  }

  /// Reject malformed parameters.
  pub fn validate(&self) -> Result<()> {
    for (axis, value) in AXES.iter().zip(self.bin_sizes.to_array()) {
      if !value.is_finite() || value <= 0.0 {
        return Err(ClusterError::InvalidBinSize { axis: *axis, value });
      }
    }

    if self.min_cluster_size > self.max_cluster_size {
      return Err(ClusterError::InvalidSizeRange {
        min: self.min_cluster_size,
        max: self.max_cluster_size,
      });
    }

    for value in std::iter::once(self.distance_threshold).chain(self.distance_weights.to_array()) {
      if !value.is_finite() || value < 0.0 {
        return Err(ClusterError::InvalidDistance(value));
      }
    }

    for (axis, interval) in AXES.iter().zip(&self.std_dev) {
      let StdDevInterval { min, max } = *interval;
      let malformed = !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0;
      if malformed || (interval.is_enabled() && min > max) {
        return Err(ClusterError::InvalidStdDevInterval {
          axis: *axis,
          min,
          max,
        });
      }
    }

    let scale = self.voxel_min_points_scale;
    if !scale.is_finite() || scale < 0.0 {
      return Err(ClusterError::InvalidMinPointsScale(scale));
    }

    self.mask.validate()
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
