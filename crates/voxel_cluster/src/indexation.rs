//! Point-to-voxel indexation and bounding voxel ranges.
//!
//! A voxel is identified by the integer coordinate `floor(p / bin)` per axis.
//! Bins are half-open: a point exactly on a bin boundary belongs to the upper
//! voxel.
//!
//! ```text
//!   bin = 0.5
//!   ─────┼─────┼─────┼─────┼──── x
//!      -0.5    0    0.5   1.0
//!   voxel: -1  │  0  │  1  │
//! ```

use glam::DVec3;

/// Integer voxel coordinate - immutable value type.
///
/// `Ord` is lexicographic over `(x, y, z)` and defines the seed order of the
/// clustering pass.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct VoxelCoord {
  pub x: i32,
  pub y: i32,
  pub z: i32,
}

impl VoxelCoord {
  pub const fn new(x: i32, y: i32, z: i32) -> Self {
    Self { x, y, z }
  }

  /// Coordinate shifted by a relative offset (saturating at the i32 range).
  #[inline]
  pub fn offset(&self, delta: [i32; 3]) -> Self {
    Self {
      x: self.x.saturating_add(delta[0]),
      y: self.y.saturating_add(delta[1]),
      z: self.z.saturating_add(delta[2]),
    }
  }

  /// Per-axis minimum. Distinct from `Ord::min`, which compares
  /// lexicographically.
  #[inline]
  pub fn component_min(&self, other: &Self) -> Self {
    Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
  }

  /// Per-axis maximum.
  #[inline]
  pub fn component_max(&self, other: &Self) -> Self {
    Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
  }

  #[inline]
  pub fn as_dvec3(&self) -> DVec3 {
    DVec3::new(self.x as f64, self.y as f64, self.z as f64)
  }
}

/// Maps positions to voxel coordinates for fixed per-axis bin sizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Indexation {
  bin_sizes: DVec3,
}

impl Indexation {
  /// Bin sizes must be finite and positive; the engine validates this at
  /// configuration time.
  pub fn new(bin_sizes: DVec3) -> Self {
    debug_assert!(
      bin_sizes.is_finite() && bin_sizes.cmpgt(DVec3::ZERO).all(),
      "bin sizes must be finite and > 0"
    );
    Self { bin_sizes }
  }

  #[inline]
  pub fn bin_sizes(&self) -> DVec3 {
    self.bin_sizes
  }

  /// False if any component is NaN or infinite.
  #[inline]
  pub fn is_valid(position: DVec3) -> bool {
    position.is_finite()
  }

  /// Voxel containing `position`. Values beyond the i32 range saturate.
  #[inline]
  pub fn to_coord(&self, position: DVec3) -> VoxelCoord {
    let cell = (position / self.bin_sizes).floor();
    VoxelCoord::new(cell.x as i32, cell.y as i32, cell.z as i32)
  }

  /// Geometric center of a voxel in world units.
  #[inline]
  pub fn voxel_center(&self, coord: VoxelCoord) -> DVec3 {
    (coord.as_dvec3() + DVec3::splat(0.5)) * self.bin_sizes
  }
}

/// Inclusive range of voxel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelRange {
  /// Minimum corner (inclusive).
  pub min: VoxelCoord,
  /// Maximum corner (inclusive).
  pub max: VoxelCoord,
}

impl VoxelRange {
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: VoxelCoord, max: VoxelCoord) -> Self {
    debug_assert!(
      min.x <= max.x && min.y <= max.y && min.z <= max.z,
      "range min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Range covering a single voxel.
  pub fn single(coord: VoxelCoord) -> Self {
    Self {
      min: coord,
      max: coord,
    }
  }

  /// Component-wise bounds of all coordinates, `None` when empty.
  pub fn from_coords<I>(coords: I) -> Option<Self>
  where
    I: IntoIterator<Item = VoxelCoord>,
  {
    let mut iter = coords.into_iter();
    let mut range = Self::single(iter.next()?);
    for coord in iter {
      range.encapsulate(coord);
    }
    Some(range)
  }

  /// Expand range to include a coordinate.
  #[inline]
  pub fn encapsulate(&mut self, coord: VoxelCoord) {
    self.min = self.min.component_min(&coord);
    self.max = self.max.component_max(&coord);
  }

  #[inline]
  pub fn contains(&self, coord: VoxelCoord) -> bool {
    coord.x >= self.min.x
      && coord.x <= self.max.x
      && coord.y >= self.min.y
      && coord.y <= self.max.y
      && coord.z >= self.min.z
      && coord.z <= self.max.z
  }

  /// Number of voxels along each axis (`max - min + 1`).
  #[inline]
  pub fn shape(&self) -> [usize; 3] {
    [
      (self.max.x as i64 - self.min.x as i64 + 1) as usize,
      (self.max.y as i64 - self.min.y as i64 + 1) as usize,
      (self.max.z as i64 - self.min.z as i64 + 1) as usize,
    ]
  }

  /// Total voxel count of the range, saturating on overflow.
  pub fn volume(&self) -> usize {
    let [sx, sy, sz] = self.shape();
    sx.saturating_mul(sy).saturating_mul(sz)
  }

  /// Offset of `coord` from the minimum corner, `None` when outside.
  #[inline]
  pub fn to_local(&self, coord: VoxelCoord) -> Option<[usize; 3]> {
    if !self.contains(coord) {
      return None;
    }
    Some([
      (coord.x as i64 - self.min.x as i64) as usize,
      (coord.y as i64 - self.min.y as i64) as usize,
      (coord.z as i64 - self.min.z as i64) as usize,
    ])
  }

  /// Inverse of [`to_local`](Self::to_local).
  #[inline]
  pub fn to_global(&self, local: [usize; 3]) -> VoxelCoord {
    VoxelCoord::new(
      (self.min.x as i64 + local[0] as i64) as i32,
      (self.min.y as i64 + local[1] as i64) as i32,
      (self.min.z as i64 + local[2] as i64) as i32,
    )
  }
}

#[cfg(test)]
#[path = "indexation_test.rs"]
mod indexation_test;
