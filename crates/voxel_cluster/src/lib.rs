//! voxel_cluster - Voxel-binned flood-fill clustering of 3D point clouds
//!
//! This crate partitions a point cloud into spatially coherent clusters. Points
//! are binned into a voxel grid, voxels are grown into regions by flood fill
//! over an adjacency mask, and the resulting clusters are filtered by size and
//! spatial spread.
//!
//! # Features
//!
//! - **Two storage backends**: dense slot array for compact scenes, lazily
//!   paged 8³ blocks for sparse ones, selected once per pass
//! - **Weighted distance rejection**: neighboring voxels merge only when their
//!   means are close, with optional per-axis weights
//! - **Shape filtering**: per-axis, planar PCA or full PCA standard deviations
//!   against configured intervals
//! - **Batch execution**: independent frames clustered in parallel with rayon
//!
//! # Example
//!
//! ```ignore
//! use voxel_cluster::{ClusterConfig, PointCloud, PointXyz, VoxelClusterer};
//!
//! let config = ClusterConfig::new()
//!     .with_bin_size(0.2)
//!     .with_cluster_size(10, 5000)
//!     .with_distance_threshold(0.3);
//! let clusterer = VoxelClusterer::new(config)?;
//!
//! let points: Vec<PointXyz> = load_scan();
//! let result = clusterer.cluster(PointCloud::from(points.as_slice()), None)?;
//!
//! println!("{} clusters, {} rejected lists ({} us)",
//!     result.accepted.len(), result.rejected.len(), result.stats.total_us);
//! ```

pub mod error;
pub use error::{ClusterError, Result};

// Input points
pub mod point;
pub use point::{Normal, PointCloud, PointXyz, PointXyzI, PointXyzL, PointXyzRgb, SpatialPoint};

// Voxel addressing and per-voxel accumulation
pub mod indexation;
pub mod statistics;
pub mod voxel;
pub use indexation::{Indexation, VoxelCoord, VoxelRange};
pub use statistics::{Distribution, RunningMean};
pub use voxel::{ClusterId, VoxelEntry};

// Spatial store with dense and paged backends
pub mod store;
pub use store::{StorageBackend, VoxelGrid, VoxelStorage};

// Neighborhood definitions
pub mod mask;
pub use mask::AdjacencyMask;

// Clustering engine
pub mod cluster;
pub use cluster::{
  ClusterConfig, ClusterResult, ClusterStats, InvalidVoxelPolicy, StdDevInterval,
  StdDevThresholdType, VoxelClusterer, VoxelDebug,
};

// Parallel multi-frame entry point
pub mod batch;
pub use batch::{cluster_batch, Frame};

// Engine-agnostic metrics
pub mod metrics;
pub use metrics::ClusterMetrics;
