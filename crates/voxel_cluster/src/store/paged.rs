//! Paged slot storage: 8³ pages allocated on first write.
//!
//! # Addressing
//!
//! ```text
//! local coordinate (x, y, z)
//!   page key   = (x >> 3, y >> 3, z >> 3)
//!   page index = (x & 7) << 6 | (y & 7) << 3 | (z & 7)
//!              = lx * 64 + ly * 8 + lz
//! ```
//!
//! Pages are kept in a hash map keyed by page coordinate, so neither the
//! directory nor the pages grow with untouched volume.

use std::collections::HashMap;

use super::{EntryId, VoxelStorage};

/// Page edge length in voxels (must be a power of two).
pub const PAGE_SIZE: usize = 8;

/// Bit shift from voxel to page coordinate (log2(8) = 3).
pub const PAGE_SHIFT: u32 = 3;

/// Mask extracting the in-page part of an axis coordinate (0x7).
pub const PAGE_MASK: usize = PAGE_SIZE - 1;

/// Slots per page (8³ = 512).
pub const PAGE_VOLUME: usize = PAGE_SIZE * PAGE_SIZE * PAGE_SIZE;

/// Bit shift for in-page Y (log2(8) = 3).
const PAGE_Y_SHIFT: u32 = PAGE_SHIFT;

/// Bit shift for in-page X (log2(64) = 6).
const PAGE_X_SHIFT: u32 = PAGE_SHIFT * 2;

type Page = Box<[Option<EntryId>; PAGE_VOLUME]>;

/// Split a local coordinate into page key and in-page index.
#[inline(always)]
const fn split(local: [usize; 3]) -> ([usize; 3], usize) {
  let key = [
    local[0] >> PAGE_SHIFT,
    local[1] >> PAGE_SHIFT,
    local[2] >> PAGE_SHIFT,
  ];
  let index = ((local[0] & PAGE_MASK) << PAGE_X_SHIFT)
    | ((local[1] & PAGE_MASK) << PAGE_Y_SHIFT)
    | (local[2] & PAGE_MASK);
  (key, index)
}

/// Inverse of [`split`].
#[inline(always)]
const fn join(key: [usize; 3], index: usize) -> [usize; 3] {
  [
    (key[0] << PAGE_SHIFT) | (index >> PAGE_X_SHIFT),
    (key[1] << PAGE_SHIFT) | ((index >> PAGE_Y_SHIFT) & PAGE_MASK),
    (key[2] << PAGE_SHIFT) | (index & PAGE_MASK),
  ]
}

/// Lazily paged slots.
pub struct PagedStorage {
  shape: [usize; 3],
  pages: HashMap<[usize; 3], Page>,
}

impl PagedStorage {
  /// Number of materialized pages.
  pub fn page_count(&self) -> usize {
    self.pages.len()
  }

  #[inline]
  fn check(&self, local: [usize; 3]) {
    debug_assert!(
      local[0] < self.shape[0] && local[1] < self.shape[1] && local[2] < self.shape[2],
      "local coordinate {:?} outside shape {:?}",
      local,
      self.shape
    );
  }
}

impl VoxelStorage for PagedStorage {
  fn allocate(shape: [usize; 3]) -> Self {
    Self {
      shape,
      pages: HashMap::new(),
    }
  }

  #[inline]
  fn slot_mut(&mut self, local: [usize; 3]) -> &mut Option<EntryId> {
    self.check(local);
    let (key, index) = split(local);
    let page = self
      .pages
      .entry(key)
      .or_insert_with(|| Box::new([None; PAGE_VOLUME]));
    &mut page[index]
  }

  #[inline]
  fn get(&self, local: [usize; 3]) -> Option<EntryId> {
    self.check(local);
    let (key, index) = split(local);
    self.pages.get(&key).and_then(|page| page[index])
  }

  fn for_each_populated(&self, f: &mut dyn FnMut([usize; 3], EntryId)) {
    for (key, page) in &self.pages {
      for (index, slot) in page.iter().enumerate() {
        if let Some(id) = slot {
          f(join(*key, index), *id);
        }
      }
    }
  }

  #[inline]
  fn shape(&self) -> [usize; 3] {
    self.shape
  }

  #[inline]
  fn allocated_slots(&self) -> usize {
    self.pages.len() * PAGE_VOLUME
  }
}
