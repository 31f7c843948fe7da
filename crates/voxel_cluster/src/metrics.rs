//! Clustering metrics aggregated across passes.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use voxel_cluster::metrics::{ClusterMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let result = clusterer.cluster(cloud, None)?;
//! metrics.record(&result.stats);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::cluster::ClusterStats;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-capacity window over the most recent passes, with a running total.
#[derive(Debug, Clone)]
pub struct RollingWindow {
  samples: VecDeque<u64>,
  capacity: usize,
  total: u64,
}

impl RollingWindow {
  pub fn new(capacity: usize) -> Self {
    Self {
      samples: VecDeque::with_capacity(capacity),
      capacity,
      total: 0,
    }
  }

  /// Append a sample, evicting the oldest when full. A zero-capacity window
  /// drops everything.
  pub fn push(&mut self, value: u64) {
    if self.capacity == 0 {
      return;
    }
    if self.samples.len() == self.capacity {
      if let Some(evicted) = self.samples.pop_front() {
        self.total -= evicted;
      }
    }
    self.samples.push_back(value);
    self.total = self.total.saturating_add(value);
  }

  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  pub fn clear(&mut self) {
    self.samples.clear();
    self.total = 0;
  }

  #[inline]
  pub fn sum(&self) -> u64 {
    self.total
  }

  pub fn average(&self) -> f64 {
    match self.samples.len() {
      0 => 0.0,
      n => self.total as f64 / n as f64,
    }
  }
}

impl Default for RollingWindow {
  fn default() -> Self {
    Self::new(128)
  }
}

/// Statistics over recent clustering passes.
#[derive(Debug, Clone, Default)]
pub struct ClusterMetrics {
  // Timing
  /// Pass wall time in microseconds.
  pub pass_timings: RollingWindow,

  // Throughput
  /// Valid points per pass.
  pub points_per_pass: RollingWindow,
  /// Accepted clusters per pass.
  pub clusters_per_pass: RollingWindow,
  /// Grid slots backed by memory per pass.
  pub slots_per_pass: RollingWindow,

  // Last pass snapshot
  pub last: ClusterStats,

  // Cumulative
  pub total_passes: u64,
  pub total_points: u64,
  pub total_rejected_lists: u64,
}

impl ClusterMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fold one pass into the metrics.
  pub fn record(&mut self, stats: &ClusterStats) {
    if !is_enabled() {
      return;
    }

    self.pass_timings.push(stats.total_us);
    self.points_per_pass.push(stats.valid_points as u64);
    self.clusters_per_pass.push(stats.accepted as u64);
    self.slots_per_pass.push(stats.allocated_slots as u64);
    self.last = *stats;

    self.total_passes += 1;
    self.total_points += stats.valid_points as u64;
    self.total_rejected_lists += stats.rejected as u64;
  }

  /// Clear the windows and snapshot. Cumulative counters are kept.
  pub fn reset(&mut self) {
    self.pass_timings.clear();
    self.points_per_pass.clear();
    self.clusters_per_pass.clear();
    self.slots_per_pass.clear();
    self.last = ClusterStats::default();
  }

  pub fn avg_pass_us(&self) -> f64 {
    self.pass_timings.average()
  }

  /// Average throughput over the window, in points per second.
  pub fn points_per_second(&self) -> f64 {
    let us = self.pass_timings.sum();
    if us == 0 {
      return 0.0;
    }
    self.points_per_pass.sum() as f64 * 1_000_000.0 / us as f64
  }
}

#[cfg(all(test, feature = "metrics"))]
mod tests {
  use super::*;

  fn stats(valid_points: usize, accepted: usize, total_us: u64) -> ClusterStats {
    ClusterStats {
      input_points: valid_points,
      valid_points,
      accepted,
      rejected: 1,
      total_us,
      ..Default::default()
    }
  }

  #[test]
  fn test_rolling_window() {
    let mut window = RollingWindow::new(3);
    assert!(window.is_empty());

    window.push(10u64);
    window.push(20);
    window.push(30);
    assert_eq!(window.len(), 3);
    assert_eq!(window.sum(), 60);
    assert_eq!(window.average(), 20.0);

    // Push one more, oldest should be evicted
    window.push(40);
    assert_eq!(window.len(), 3);
    assert_eq!(window.sum(), 90);
    assert_eq!(window.average(), 30.0);
  }

  #[test]
  fn test_zero_capacity_window_stays_empty() {
    let mut window = RollingWindow::new(0);
    window.push(1u64);
    assert!(window.is_empty());
    assert_eq!(window.average(), 0.0);
  }

  #[test]
  fn test_record_passes() {
    let mut metrics = ClusterMetrics::new();
    metrics.record(&stats(1000, 4, 500));
    metrics.record(&stats(3000, 6, 1500));

    assert_eq!(metrics.total_passes, 2);
    assert_eq!(metrics.total_points, 4000);
    assert_eq!(metrics.total_rejected_lists, 2);
    assert_eq!(metrics.last.accepted, 6);
    assert_eq!(metrics.avg_pass_us(), 1000.0);
    assert_eq!(metrics.points_per_second(), 2_000_000.0);

    metrics.reset();
    assert!(metrics.pass_timings.is_empty());
    assert_eq!(metrics.total_passes, 2);
  }
}
