//! Batch entry point: cluster many independent frames on rayon's pool.

use rayon::prelude::*;

use crate::cluster::{ClusterResult, VoxelClusterer};
use crate::error::Result;
use crate::point::PointCloud;

/// One frame of a batch: a borrowed cloud and an optional index subset.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
  pub cloud: PointCloud<'a>,
  pub subset: Option<&'a [usize]>,
}

impl<'a> Frame<'a> {
  pub fn new(cloud: PointCloud<'a>) -> Self {
    Self { cloud, subset: None }
  }

  pub fn with_subset(mut self, subset: &'a [usize]) -> Self {
    self.subset = Some(subset);
    self
  }
}

impl<'a, T> From<&'a [T]> for Frame<'a>
where
  PointCloud<'a>: From<&'a [T]>,
{
  fn from(points: &'a [T]) -> Self {
    Self::new(PointCloud::from(points))
  }
}

/// Cluster every frame with a shared clusterer.
///
/// This is a synchronous function that uses rayon internally for parallelism.
/// Each frame gets its own private grid; results are returned in input order
/// and a failing frame does not affect the others.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "cluster::batch"))]
pub fn cluster_batch(clusterer: &VoxelClusterer, frames: &[Frame<'_>]) -> Vec<Result<ClusterResult>> {
  if frames.is_empty() {
    return Vec::new();
  }

  #[cfg(feature = "tracing")]
  tracing::debug!(frames = frames.len(), "clustering batch");

  frames
    .par_iter()
    .map(|frame| clusterer.cluster(frame.cloud, frame.subset))
    .collect()
}
