//! VoxelClusterer - one synchronous clustering pass per invocation.
//!
//! ```text
//! points ─► index ─► VoxelGrid<S> ─► validate ─► flood_fill ─► assemble
//!                                                                 │
//!            ClusterResult ◄── statistical filter ◄── size filter ◄┘
//! ```
//!
//! The grid backend is chosen once per pass from the bounding volume; every
//! later stage is generic over it.

use std::collections::BTreeMap;

use glam::DVec3;
use web_time::Instant;

use super::config::ClusterConfig;
use super::filter::{size_accepts, StatisticalFilter};
use super::flood_fill::{flood_fill, MergeCriterion};
use crate::error::{ClusterError, Result};
use crate::indexation::{Indexation, VoxelCoord, VoxelRange};
use crate::point::{PointCloud, SpatialPoint};
use crate::statistics::Distribution;
use crate::store::{DenseStorage, PagedStorage, VoxelGrid, VoxelStorage};

/// Debug record of one populated voxel.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelDebug {
  pub coord: VoxelCoord,
  /// Geometric center of the voxel cell.
  pub center: DVec3,
  /// Mean of the member points.
  pub mean: DVec3,
  pub point_count: usize,
  pub valid: bool,
  /// Flood fill label, -1 when unassigned.
  pub cluster: i64,
  /// Whether `cluster` survived the size and shape filters.
  pub accepted: bool,
}

/// Counters and timing for one pass.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClusterStats {
  /// Points named by the input (subset length, or cloud length).
  pub input_points: usize,
  /// Points with finite coordinates that were indexed.
  pub valid_points: usize,
  /// Populated voxels.
  pub voxels: usize,
  /// Populated voxels meeting the minimum point requirement.
  pub valid_voxels: usize,
  /// Slots backed by memory in the grid storage.
  pub allocated_slots: usize,
  pub accepted: usize,
  pub rejected: usize,
  /// Wall time of the pass in microseconds.
  pub total_us: u64,
}

/// Output of one clustering pass.
///
/// Every indexed point appears in exactly one list of `accepted` or
/// `rejected`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterResult {
  /// Clusters that passed every filter, in seed order.
  pub accepted: Vec<Vec<usize>>,
  /// Filtered clusters in seed order, followed by one list per unassigned
  /// voxel in coordinate order.
  pub rejected: Vec<Vec<usize>>,
  /// Populated voxels in coordinate order, when requested.
  pub voxels: Option<Vec<VoxelDebug>>,
  pub stats: ClusterStats,
}

impl ClusterResult {
  /// Positions in `voxels` grouped by accepted cluster, ordered by label.
  /// Empty when debug voxels were not collected.
  pub fn voxel_cluster_indices(&self) -> Vec<Vec<usize>> {
    let Some(voxels) = &self.voxels else {
      return Vec::new();
    };

    let mut groups: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (position, voxel) in voxels.iter().enumerate() {
      if voxel.accepted {
        groups.entry(voxel.cluster).or_default().push(position);
      }
    }
    groups.into_values().collect()
  }

  /// Total number of points across accepted and rejected lists.
  pub fn point_count(&self) -> usize {
    self
      .accepted
      .iter()
      .chain(&self.rejected)
      .map(Vec::len)
      .sum()
  }
}

/// A point that passed the validity check, with its origin index.
#[derive(Clone, Copy, Debug)]
struct Sample {
  index: usize,
  position: DVec3,
  coord: VoxelCoord,
}

/// Label-indexed accumulation of flood fill output.
#[derive(Default)]
struct PendingCluster {
  indices: Vec<usize>,
  distribution: Distribution,
}

/// Voxel-binned region-growing clusterer.
///
/// Holds only validated configuration, so one instance may serve
/// concurrent passes by shared reference.
#[derive(Clone, Debug)]
pub struct VoxelClusterer {
  config: ClusterConfig,
  indexation: Indexation,
  criterion: MergeCriterion,
  filter: Option<StatisticalFilter>,
}

impl VoxelClusterer {
  pub fn new(config: ClusterConfig) -> Result<Self> {
    config.validate()?;
    Ok(Self {
      indexation: Indexation::new(config.bin_sizes),
      criterion: MergeCriterion::new(config.distance_threshold, config.distance_weights),
      filter: StatisticalFilter::from_config(&config),
      config,
    })
  }

  #[inline]
  pub fn config(&self) -> &ClusterConfig {
    &self.config
  }

  /// Cluster a borrowed cloud, optionally restricted to `subset`.
  ///
  /// Origin indices in the result refer to positions in `cloud`.
  pub fn cluster(&self, cloud: PointCloud<'_>, subset: Option<&[usize]>) -> Result<ClusterResult> {
    match cloud {
      PointCloud::Xyz(points) => self.cluster_points(points, subset),
      PointCloud::XyzI(points) => self.cluster_points(points, subset),
      PointCloud::XyzRgb(points) => self.cluster_points(points, subset),
      PointCloud::XyzL(points) => self.cluster_points(points, subset),
      PointCloud::Normals(_) => Err(ClusterError::UnsupportedPointVariant(cloud.kind())),
    }
  }

  /// Cluster any slice of spatial points.
  ///
  /// `subset` may repeat indices; each point is clustered at most once.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "cluster::pass"))]
  pub fn cluster_points<P: SpatialPoint>(
    &self,
    points: &[P],
    subset: Option<&[usize]>,
  ) -> Result<ClusterResult> {
    let start = Instant::now();
    let input_points = subset.map_or(points.len(), <[usize]>::len);

    let samples = self.collect_samples(points, subset)?;
    let Some(range) = VoxelRange::from_coords(samples.iter().map(|s| s.coord)) else {
      #[cfg(feature = "tracing")]
      tracing::debug!(input_points, "no valid points, empty result");
      return Ok(ClusterResult {
        stats: ClusterStats {
          input_points,
          total_us: start.elapsed().as_micros() as u64,
          ..Default::default()
        },
        ..Default::default()
      });
    };

    let mut result = if self.config.backend.use_dense(range.volume()) {
      self.run::<DenseStorage>(&samples, range)
    } else {
      self.run::<PagedStorage>(&samples, range)
    };

    result.stats.input_points = input_points;
    result.stats.total_us = start.elapsed().as_micros() as u64;

    #[cfg(feature = "tracing")]
    tracing::debug!(
      input_points,
      valid_points = result.stats.valid_points,
      voxels = result.stats.voxels,
      accepted = result.stats.accepted,
      rejected = result.stats.rejected,
      total_us = result.stats.total_us,
      "clustering pass complete"
    );

    Ok(result)
  }

  fn collect_samples<P: SpatialPoint>(
    &self,
    points: &[P],
    subset: Option<&[usize]>,
  ) -> Result<Vec<Sample>> {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("collect_samples").entered();

    let mut samples = Vec::with_capacity(subset.map_or(points.len(), <[usize]>::len));
    let mut push = |index: usize, point: &P| {
      let position = point.position();
      if Indexation::is_valid(position) {
        samples.push(Sample {
          index,
          position,
          coord: self.indexation.to_coord(position),
        });
      } else {
        #[cfg(feature = "tracing")]
        tracing::trace!(index, "skipping non-finite point");
      }
    };

    match subset {
      Some(subset) => {
        // Repeated indices are indexed once, at their first occurrence
        let mut seen = vec![false; points.len()];
        for &index in subset {
          let point = points.get(index).ok_or(ClusterError::IndexOutOfBounds {
            index,
            len: points.len(),
          })?;
          if !std::mem::replace(&mut seen[index], true) {
            push(index, point);
          }
        }
      }
      None => {
        for (index, point) in points.iter().enumerate() {
          push(index, point);
        }
      }
    }

    Ok(samples)
  }

  fn run<S: VoxelStorage>(&self, samples: &[Sample], range: VoxelRange) -> ClusterResult {
    let config = &self.config;
    let mut grid = VoxelGrid::<S>::new(range, self.filter.is_some());

    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("populate").entered();

      // The range encloses every sample, so `at` always yields an entry
      for sample in samples {
        if let Some(entry) = grid.at(sample.coord) {
          entry.insert(sample.index, sample.position);
        }
      }
    }

    let valid_voxels = grid.validate_all(config.voxel_min_points, config.voxel_min_points_scale);
    let cluster_count = flood_fill(
      &mut grid,
      &config.mask,
      &self.criterion,
      config.invalid_voxel_policy,
    );

    #[cfg(feature = "tracing")]
    tracing::debug!(
      voxels = grid.len(),
      valid_voxels,
      clusters = cluster_count,
      allocated_slots = grid.allocated_slots(),
      "flood fill complete"
    );

    let order = grid.seed_order();

    // Assemble per-label lists in seed order
    let mut clusters: Vec<PendingCluster> = (0..cluster_count).map(|_| PendingCluster::default()).collect();
    let mut unassigned: Vec<Vec<usize>> = Vec::new();
    for &id in &order {
      let entry = grid.entry(id);
      match entry.label {
        Some(label) => {
          let cluster = &mut clusters[label as usize];
          cluster.indices.extend_from_slice(&entry.indices);
          if let Some(distribution) = &entry.distribution {
            cluster.distribution.merge(distribution);
          }
        }
        None => unassigned.push(entry.indices.clone()),
      }
    }

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    let mut label_accepted = vec![false; cluster_count];
    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("filter").entered();

      for (label, cluster) in clusters.into_iter().enumerate() {
        let keep = size_accepts(
          cluster.indices.len(),
          config.min_cluster_size,
          config.max_cluster_size,
        ) && self
          .filter
          .as_ref()
          .map_or(true, |filter| filter.accepts(&cluster.distribution));

        label_accepted[label] = keep;
        if keep {
          accepted.push(cluster.indices);
        } else {
          rejected.push(cluster.indices);
        }
      }
    }
    rejected.extend(unassigned);

    let voxels = config.collect_voxels.then(|| {
      order
        .iter()
        .map(|&id| {
          let entry = grid.entry(id);
          VoxelDebug {
            coord: entry.coord,
            center: self.indexation.voxel_center(entry.coord),
            mean: entry.mean,
            point_count: entry.count,
            valid: entry.valid,
            cluster: entry.label.map_or(-1, i64::from),
            accepted: entry.label.is_some_and(|label| label_accepted[label as usize]),
          }
        })
        .collect()
    });

    ClusterResult {
      stats: ClusterStats {
        input_points: 0,
        valid_points: samples.len(),
        voxels: grid.len(),
        valid_voxels,
        allocated_slots: grid.allocated_slots(),
        accepted: accepted.len(),
        rejected: rejected.len(),
        total_us: 0,
      },
      accepted,
      rejected,
      voxels,
    }
  }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;
