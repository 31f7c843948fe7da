//! Dense slot array over the full bounding range.
//!
//! # Memory Layout
//!
//! ```text
//! Row-major, Z innermost:
//!
//! index = (x * shape_y + y) * shape_z + z
//! ```

use super::{EntryId, VoxelStorage};

/// One slot per voxel of the bounding range, allocated up front.
pub struct DenseStorage {
  shape: [usize; 3],
  slots: Vec<Option<EntryId>>,
}

impl DenseStorage {
  #[inline]
  fn linear(&self, local: [usize; 3]) -> usize {
    debug_assert!(
      local[0] < self.shape[0] && local[1] < self.shape[1] && local[2] < self.shape[2],
      "local coordinate {:?} outside shape {:?}",
      local,
      self.shape
    );
    (local[0] * self.shape[1] + local[1]) * self.shape[2] + local[2]
  }

  #[inline]
  fn delinearize(&self, index: usize) -> [usize; 3] {
    let z = index % self.shape[2];
    let yz = index / self.shape[2];
    [yz / self.shape[1], yz % self.shape[1], z]
  }
}

impl VoxelStorage for DenseStorage {
  /// # Panics
  /// If the volume overflows `usize`. Callers pick the backend through
  /// [`StorageBackend::use_dense`](super::StorageBackend::use_dense), which
  /// never selects dense storage for such a range.
  fn allocate(shape: [usize; 3]) -> Self {
    let volume = shape
      .iter()
      .try_fold(1usize, |acc, &axis| acc.checked_mul(axis))
      .unwrap_or_else(|| panic!("dense volume of shape {shape:?} overflows usize"));
    Self {
      shape,
      slots: vec![None; volume],
    }
  }

  #[inline]
  fn slot_mut(&mut self, local: [usize; 3]) -> &mut Option<EntryId> {
    let index = self.linear(local);
    &mut self.slots[index]
  }

  #[inline]
  fn get(&self, local: [usize; 3]) -> Option<EntryId> {
    self.slots[self.linear(local)]
  }

  fn for_each_populated(&self, f: &mut dyn FnMut([usize; 3], EntryId)) {
    for (index, slot) in self.slots.iter().enumerate() {
      if let Some(id) = slot {
        f(self.delinearize(index), *id);
      }
    }
  }

  #[inline]
  fn shape(&self) -> [usize; 3] {
    self.shape
  }

  #[inline]
  fn allocated_slots(&self) -> usize {
    self.slots.len()
  }
}
