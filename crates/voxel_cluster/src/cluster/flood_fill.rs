//! Region growing over the voxel grid.
//!
//! Seeds are visited in ascending coordinate order; every unlabeled valid
//! seed opens a new cluster and is expanded with an explicit LIFO frontier.
//! A voxel is labeled when it is pushed, so it enters the frontier at most
//! once.

use glam::DVec3;

use super::config::InvalidVoxelPolicy;
use crate::mask::AdjacencyMask;
use crate::store::{EntryId, VoxelGrid, VoxelStorage};
use crate::voxel::ClusterId;

/// Distance test between the means of two neighboring voxels.
///
/// Isotropic thresholding is the special case of unit weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MergeCriterion {
  threshold_sq: f64,
  weights: DVec3,
}

impl MergeCriterion {
  pub fn new(threshold: f64, weights: DVec3) -> Self {
    Self {
      threshold_sq: threshold * threshold,
      weights,
    }
  }

  /// Criterion that merges every neighbor pair.
  pub fn disabled() -> Self {
    Self::new(0.0, DVec3::ONE)
  }

  #[inline]
  pub fn is_enabled(&self) -> bool {
    self.threshold_sq > 0.0
  }

  /// `sum_i (w_i * (a_i - b_i))^2`
  #[inline]
  pub fn weighted_distance_sq(&self, a: DVec3, b: DVec3) -> f64 {
    ((a - b) * self.weights).length_squared()
  }

  #[inline]
  pub fn accepts(&self, a: DVec3, b: DVec3) -> bool {
    !self.is_enabled() || self.weighted_distance_sq(a, b) <= self.threshold_sq
  }
}

impl Default for MergeCriterion {
  fn default() -> Self {
    Self::disabled()
  }
}

/// Label every reachable voxel of `grid`. Returns the number of clusters;
/// labels are `0..count` in seed order.
///
/// Only valid voxels seed or expand a cluster. Under
/// [`InvalidVoxelPolicy::Absorb`] an invalid neighbor is labeled as a leaf;
/// under [`InvalidVoxelPolicy::Exclude`] it stays unlabeled.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "cluster::flood_fill"))]
pub fn flood_fill<S: VoxelStorage>(
  grid: &mut VoxelGrid<S>,
  mask: &AdjacencyMask,
  criterion: &MergeCriterion,
  policy: InvalidVoxelPolicy,
) -> usize {
  let mut next_label: ClusterId = 0;
  let mut frontier: Vec<EntryId> = Vec::new();

  for seed in grid.seed_order() {
    let entry = grid.entry_mut(seed);
    if !entry.valid || entry.is_labeled() {
      continue;
    }

    let label = next_label;
    next_label += 1;
    entry.label = Some(label);
    frontier.push(seed);

    while let Some(id) = frontier.pop() {
      let current = grid.entry(id);
      let (base, base_mean) = (current.coord, current.mean);

      for row in 0..mask.len() {
        let Some(neighbor_id) = grid.find(mask.apply_to_index(base, row)) else {
          continue;
        };

        let neighbor = grid.entry_mut(neighbor_id);
        if neighbor.is_labeled() {
          continue;
        }
        if !neighbor.valid && policy == InvalidVoxelPolicy::Exclude {
          continue;
        }
        if !criterion.accepts(base_mean, neighbor.mean) {
          continue;
        }

        neighbor.label = Some(label);
        if neighbor.valid {
          frontier.push(neighbor_id);
        }
      }
    }
  }

  next_label as usize
}

#[cfg(test)]
#[path = "flood_fill_test.rs"]
mod flood_fill_test;
