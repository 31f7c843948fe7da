//! Clustering engine: configuration, flood fill, filters and the pass driver.
//!
//! # Pass Outline
//!
//! ```text
//! 1. index      finite points -> VoxelCoord, bounding VoxelRange
//! 2. populate   VoxelGrid<S> accumulates indices, mean, depth, distribution
//! 3. validate   voxel_min_points (optionally depth scaled)
//! 4. fill       seeds in (x, y, z) order, LIFO frontier over the mask
//! 5. filter     size window, then std-dev intervals
//! ```
//!
//! # Module Structure
//!
//! - [`config`]: `ClusterConfig` and its interval / policy enums
//! - [`flood_fill`]: region growing and the `MergeCriterion` distance test
//! - [`filter`]: size window and `StatisticalFilter`
//! - [`engine`]: `VoxelClusterer`, `ClusterResult`, `VoxelDebug`

pub mod config;
pub mod engine;
pub mod filter;
pub mod flood_fill;

// Re-exports
pub use config::{ClusterConfig, InvalidVoxelPolicy, StdDevInterval, StdDevThresholdType};
pub use engine::{ClusterResult, ClusterStats, VoxelClusterer, VoxelDebug};
pub use filter::StatisticalFilter;
pub use flood_fill::{flood_fill, MergeCriterion};
