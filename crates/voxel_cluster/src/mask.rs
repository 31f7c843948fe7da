//! Adjacency masks: relative voxel offsets probed during flood fill.
//!
//! ```text
//!   faces (6)        edges (18)         full (26)
//!   . . .            . x .              x x x
//!   . x .            x x x              x x x
//!   . . .            . x .              x x x
//!   (per z-slice around the center, center excluded)
//! ```

use smallvec::SmallVec;

use crate::error::{ClusterError, Result};
use crate::indexation::VoxelCoord;

/// Direction offsets for 6 face neighbors.
const FACE_OFFSETS: [[i32; 3]; 6] = [
  [-1, 0, 0], // -X
  [1, 0, 0],  // +X
  [0, -1, 0], // -Y
  [0, 1, 0],  // +Y
  [0, 0, -1], // -Z
  [0, 0, 1],  // +Z
];

/// Immutable list of neighbor offsets, shared read-only by a clustering pass.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyMask {
  offsets: SmallVec<[[i32; 3]; 26]>,
}

impl AdjacencyMask {
  /// Six axis-aligned face neighbors.
  pub fn faces() -> Self {
    Self {
      offsets: FACE_OFFSETS.iter().copied().collect(),
    }
  }

  /// Face and edge neighbors (Manhattan distance <= 2).
  pub fn edges() -> Self {
    Self::cube(1, |d| d[0].abs() + d[1].abs() + d[2].abs() <= 2)
  }

  /// Full 3x3x3 neighborhood without the center.
  pub fn full() -> Self {
    Self::cube(1, |_| true)
  }

  /// Every offset within Chebyshev distance `radius` (a (2r+1)³ cube minus
  /// the center). `radius(1)` equals [`full`](Self::full).
  pub fn radius(radius: u32) -> Self {
    Self::cube(radius.min(i32::MAX as u32) as i32, |_| true)
  }

  /// Custom mask. Rejects empty masks, the zero offset, and duplicates.
  pub fn from_offsets<I>(offsets: I) -> Result<Self>
  where
    I: IntoIterator<Item = [i32; 3]>,
  {
    let mask = Self {
      offsets: offsets.into_iter().collect(),
    };
    mask.validate()?;
    Ok(mask)
  }

  fn cube(r: i32, keep: impl Fn([i32; 3]) -> bool) -> Self {
    let mut offsets = SmallVec::new();
    for dx in -r..=r {
      for dy in -r..=r {
        for dz in -r..=r {
          let d = [dx, dy, dz];
          if d != [0, 0, 0] && keep(d) {
            offsets.push(d);
          }
        }
      }
    }
    Self { offsets }
  }

  /// Check the invariants enforced by [`from_offsets`](Self::from_offsets).
  pub fn validate(&self) -> Result<()> {
    if self.offsets.is_empty() {
      return Err(ClusterError::InvalidMask("mask has no offsets".into()));
    }
    for (row, offset) in self.offsets.iter().enumerate() {
      if *offset == [0, 0, 0] {
        return Err(ClusterError::InvalidMask(format!(
          "row {row} is the zero offset"
        )));
      }
      if self.offsets[..row].contains(offset) {
        return Err(ClusterError::InvalidMask(format!(
          "row {row} duplicates offset {offset:?}"
        )));
      }
    }
    Ok(())
  }

  /// Number of rows (offsets).
  #[inline]
  pub fn len(&self) -> usize {
    self.offsets.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.offsets.is_empty()
  }

  #[inline]
  pub fn offset(&self, row: usize) -> [i32; 3] {
    self.offsets[row]
  }

  /// Neighbor coordinate for mask row `row`.
  #[inline]
  pub fn apply_to_index(&self, base: VoxelCoord, row: usize) -> VoxelCoord {
    base.offset(self.offsets[row])
  }

  pub fn iter(&self) -> impl Iterator<Item = &[i32; 3]> {
    self.offsets.iter()
  }

  /// All neighbor coordinates of `base`, in row order.
  pub fn neighbors(&self, base: VoxelCoord) -> impl Iterator<Item = VoxelCoord> + '_ {
    self.offsets.iter().map(move |d| base.offset(*d))
  }
}

impl Default for AdjacencyMask {
  fn default() -> Self {
    Self::full()
  }
}

#[cfg(test)]
#[path = "mask_test.rs"]
mod mask_test;
