//! Running statistics for voxels and clusters.
//!
//! Both accumulators combine by pairwise weighting of pre-aggregated values
//! rather than point-by-point re-derivation. Merging two means is
//! `(a.mean * a.n + b.mean * b.n) / (a.n + b.n)`; this drifts slightly from
//! true recomputation at large counts, which is irrelevant at voxel scale.

use glam::{DMat3, DVec2, DVec3};
use nalgebra::{Matrix2, Matrix3, SymmetricEigen};

/// Running arithmetic mean of a scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunningMean {
  mean: f64,
  n: usize,
}

impl RunningMean {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn add(&mut self, value: f64) {
    let n = self.n as f64;
    self.mean = (self.mean * n + value) / (n + 1.0);
    self.n += 1;
  }

  /// Combine with another pre-aggregated mean.
  #[inline]
  pub fn merge(&mut self, other: &RunningMean) {
    if other.n == 0 {
      return;
    }
    let n = self.n as f64;
    let m = other.n as f64;
    self.mean = (self.mean * n + other.mean * m) / (n + m);
    self.n += other.n;
  }

  #[inline]
  pub fn mean(&self) -> f64 {
    self.mean
  }

  #[inline]
  pub fn n(&self) -> usize {
    self.n
  }
}

/// 3D point distribution: count, coordinate sum and sum of outer products.
///
/// Sums merge exactly, so the distribution of a cluster is the sum of its
/// voxels' distributions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Distribution {
  n: usize,
  sum: DVec3,
  sum_outer: DMat3,
}

impl Default for Distribution {
  fn default() -> Self {
    Self {
      n: 0,
      sum: DVec3::ZERO,
      sum_outer: DMat3::ZERO,
    }
  }
}

impl Distribution {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn add(&mut self, point: DVec3) {
    self.n += 1;
    self.sum += point;
    self.sum_outer += outer(point, point);
  }

  #[inline]
  pub fn merge(&mut self, other: &Distribution) {
    self.n += other.n;
    self.sum += other.sum;
    self.sum_outer += other.sum_outer;
  }

  #[inline]
  pub fn n(&self) -> usize {
    self.n
  }

  /// Mean position (zero for an empty distribution).
  pub fn mean(&self) -> DVec3 {
    if self.n == 0 {
      return DVec3::ZERO;
    }
    self.sum / self.n as f64
  }

  /// Sample covariance (`n - 1` normalization). Zero below two points.
  pub fn covariance(&self) -> DMat3 {
    if self.n < 2 {
      return DMat3::ZERO;
    }
    let n = self.n as f64;
    let mean = self.sum / n;
    (self.sum_outer - outer(mean, mean) * n) * (1.0 / (n - 1.0))
  }

  /// Standard deviation along the x, y and z axes.
  pub fn axis_std_devs(&self) -> DVec3 {
    let cov = self.covariance();
    DVec3::new(
      cov.x_axis.x.max(0.0).sqrt(),
      cov.y_axis.y.max(0.0).sqrt(),
      cov.z_axis.z.max(0.0).sqrt(),
    )
  }

  /// Standard deviations along the principal axes of the x/y covariance,
  /// largest first.
  pub fn principal_std_devs_2d(&self) -> DVec2 {
    let cov = self.covariance();
    let m = Matrix2::new(cov.x_axis.x, cov.y_axis.x, cov.x_axis.y, cov.y_axis.y);
    let eigen = SymmetricEigen::new(m);
    let mut values = [eigen.eigenvalues[0], eigen.eigenvalues[1]];
    values.sort_by(|a, b| b.total_cmp(a));
    DVec2::new(values[0].max(0.0).sqrt(), values[1].max(0.0).sqrt())
  }

  /// Standard deviations along the principal axes of the full covariance,
  /// largest first.
  pub fn principal_std_devs_3d(&self) -> DVec3 {
    let cov = self.covariance();
    let m = Matrix3::from_column_slice(&cov.to_cols_array());
    let eigen = SymmetricEigen::new(m);
    let mut values = [
      eigen.eigenvalues[0],
      eigen.eigenvalues[1],
      eigen.eigenvalues[2],
    ];
    values.sort_by(|a, b| b.total_cmp(a));
    DVec3::new(
      values[0].max(0.0).sqrt(),
      values[1].max(0.0).sqrt(),
      values[2].max(0.0).sqrt(),
    )
  }
}

/// Outer product `a * b^T`.
#[inline]
fn outer(a: DVec3, b: DVec3) -> DMat3 {
  DMat3::from_cols(a * b.x, a * b.y, a * b.z)
}

#[cfg(test)]
#[path = "statistics_test.rs"]
mod statistics_test;
