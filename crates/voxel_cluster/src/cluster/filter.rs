//! Post-fill cluster filters: point count and spatial spread.

use glam::DVec3;

use super::config::{ClusterConfig, StdDevInterval, StdDevThresholdType};
use crate::statistics::Distribution;

/// Inclusive size window check.
#[inline]
pub fn size_accepts(len: usize, min: usize, max: usize) -> bool {
  len >= min && len <= max
}

/// Shape filter comparing cluster standard deviations against per-axis
/// intervals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatisticalFilter {
  intervals: [StdDevInterval; 3],
  kind: StdDevThresholdType,
}

impl StatisticalFilter {
  pub fn new(intervals: [StdDevInterval; 3], kind: StdDevThresholdType) -> Self {
    Self { intervals, kind }
  }

  /// Filter described by `config`, or `None` when every interval is
  /// disabled.
  pub fn from_config(config: &ClusterConfig) -> Option<Self> {
    config
      .shape_filter_enabled()
      .then(|| Self::new(config.std_dev, config.std_dev_threshold_type))
  }

  /// Standard deviations compared against the x, y and z intervals.
  pub fn std_devs(&self, distribution: &Distribution) -> DVec3 {
    match self.kind {
      StdDevThresholdType::Default => distribution.axis_std_devs(),
      StdDevThresholdType::Pca2d => {
        let planar = distribution.principal_std_devs_2d();
        planar.extend(distribution.axis_std_devs().z)
      }
      StdDevThresholdType::Pca3d => distribution.principal_std_devs_3d(),
    }
  }

  pub fn accepts(&self, distribution: &Distribution) -> bool {
    let std_devs = self.std_devs(distribution).to_array();
    self
      .intervals
      .iter()
      .zip(std_devs)
      .all(|(interval, value)| interval.accepts(value))
  }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;
