//! Per-voxel accumulator: member indices, running statistics and the
//! cluster label assigned during flood fill.

use glam::DVec3;

use crate::indexation::VoxelCoord;
use crate::statistics::{Distribution, RunningMean};

/// Cluster identifier assigned by flood fill (dense, starting at 0).
pub type ClusterId = u32;

/// All points that fell into one voxel.
///
/// Owned by exactly one slot of a [`VoxelGrid`](crate::store::VoxelGrid).
/// `label` moves from `None` to `Some(id)` once and never back.
#[derive(Clone, Debug)]
pub struct VoxelEntry {
  /// Voxel coordinate this entry is stored under.
  pub coord: VoxelCoord,
  /// Origin indices of member points, in insertion order.
  pub indices: Vec<usize>,
  /// Number of member points.
  pub count: usize,
  /// Running mean position.
  pub mean: DVec3,
  /// Running mean of radial distance from the sensor origin.
  pub depth: RunningMean,
  /// Covariance accumulator, tracked only when shape filtering is enabled.
  pub distribution: Option<Distribution>,
  /// Whether the voxel meets the minimum point requirement.
  pub valid: bool,
  /// Assigned cluster, `None` until flood fill reaches the voxel.
  pub label: Option<ClusterId>,
}

impl VoxelEntry {
  /// Create an empty entry for `coord`.
  pub fn new(coord: VoxelCoord, track_distribution: bool) -> Self {
    Self {
      coord,
      indices: Vec::new(),
      count: 0,
      mean: DVec3::ZERO,
      depth: RunningMean::new(),
      distribution: track_distribution.then(Distribution::new),
      valid: true,
      label: None,
    }
  }

  /// Append a point and fold it into the running statistics.
  pub fn insert(&mut self, index: usize, position: DVec3) {
    let n = self.count as f64;
    self.indices.push(index);
    self.mean = (self.mean * n + position) / (n + 1.0);
    self.depth.add(position.length());
    self.count += 1;
    if let Some(distribution) = &mut self.distribution {
      distribution.add(position);
    }
  }

  /// Fuse an already aggregated entry for the same voxel into this one.
  ///
  /// Used by [`VoxelGrid::insert_entry`](crate::store::VoxelGrid::insert_entry)
  /// for entries binned outside the grid. Indices of `other` follow this
  /// entry's.
  pub fn merge(&mut self, other: VoxelEntry) {
    debug_assert_eq!(self.coord, other.coord, "merging entries of different voxels");
    if other.count == 0 {
      return;
    }
    let n = self.count as f64;
    let m = other.count as f64;
    self.mean = (self.mean * n + other.mean * m) / (n + m);
    self.count += other.count;
    self.depth.merge(&other.depth);
    self.indices.extend(other.indices);
    match (&mut self.distribution, other.distribution) {
      (Some(mine), Some(theirs)) => mine.merge(&theirs),
      (None, Some(theirs)) if n == 0.0 => self.distribution = Some(theirs),
      _ => {}
    }
  }

  /// Minimum member count required for this voxel to seed a cluster.
  ///
  /// With `scale > 0` the requirement shrinks with the square of the mean
  /// depth: `floor(min_points / (scale * depth^2) + 0.5)`. A voxel centered
  /// on the origin therefore requires an unbounded count.
  pub fn required_points(&self, min_points: usize, scale: f64) -> usize {
    if scale > 0.0 {
      let depth = self.depth.mean();
      let required = (min_points as f64 / (scale * depth * depth) + 0.5).floor();
      // NaN (0 / 0) maps to 0, +inf saturates
      required as usize
    } else {
      min_points
    }
  }

  /// Recompute and return the validity flag.
  pub fn validate(&mut self, min_points: usize, scale: f64) -> bool {
    self.valid = self.count >= self.required_points(min_points, scale);
    self.valid
  }

  #[inline]
  pub fn is_labeled(&self) -> bool {
    self.label.is_some()
  }
}

#[cfg(test)]
#[path = "voxel_test.rs"]
mod voxel_test;
