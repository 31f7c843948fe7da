//! Spatial store: maps voxel coordinates to owned voxel entries.
//!
//! ```text
//!   VoxelGrid<S>
//!   ┌──────────────────────────────┐
//!   │ range: VoxelRange            │  global coord ──to_local──► [usize; 3]
//!   │ storage: S ──────────────────┼──► slot: Option<EntryId>
//!   │ entries: Vec<VoxelEntry> ◄───┼──── EntryId (arena index)
//!   └──────────────────────────────┘
//! ```
//!
//! Storage backends only hold slots. Entries live in the grid's arena, so the
//! flood fill can read one entry while labeling another without aliasing the
//! storage.
//!
//! # Backends
//!
//! - [`DenseStorage`]: one contiguous slot per voxel of the bounding range.
//!   O(1) addressing, memory proportional to the range volume.
//! - [`PagedStorage`]: 8³ pages allocated on first write. One extra lookup per
//!   access, memory proportional to the touched volume.
//!
//! Both satisfy the same contract and produce identical clustering results;
//! the choice is a memory/speed trade-off made once via [`StorageBackend`].

pub mod dense;
pub mod paged;

pub use dense::DenseStorage;
pub use paged::{PagedStorage, PAGE_SIZE, PAGE_VOLUME};

use crate::indexation::{VoxelCoord, VoxelRange};
use crate::voxel::VoxelEntry;

/// Largest bounding volume (in slots) that [`StorageBackend::Auto`] will
/// allocate densely.
pub const AUTO_DENSE_MAX_SLOTS: usize = 1 << 24;

/// Hard cap on dense allocation, even when [`StorageBackend::Dense`] is
/// requested. Larger (or overflowing) volumes are stored paged.
pub const DENSE_MAX_SLOTS: usize = 1 << 28;

/// Handle of an entry in a [`VoxelGrid`] arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EntryId(u32);

impl EntryId {
  #[inline]
  pub fn new(index: usize) -> Self {
    debug_assert!(index <= u32::MAX as usize, "entry arena overflow");
    Self(index as u32)
  }

  #[inline]
  pub fn index(&self) -> usize {
    self.0 as usize
  }
}

/// Slot storage indexed by local (range-relative) voxel coordinates.
///
/// Callers guarantee `local < shape()` on every axis; violating that is a
/// logic error, checked in debug builds.
pub trait VoxelStorage {
  /// Allocate storage for a bounding range of the given shape.
  fn allocate(shape: [usize; 3]) -> Self;

  /// Mutable slot, materializing backing memory on first write.
  fn slot_mut(&mut self, local: [usize; 3]) -> &mut Option<EntryId>;

  /// Read-only lookup. Never allocates.
  fn get(&self, local: [usize; 3]) -> Option<EntryId>;

  /// Visit every populated slot. Order is backend specific.
  fn for_each_populated(&self, f: &mut dyn FnMut([usize; 3], EntryId));

  /// Shape of the addressable range.
  fn shape(&self) -> [usize; 3];

  /// Number of slots currently backed by memory.
  fn allocated_slots(&self) -> usize;
}

/// Storage backend selection.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageBackend {
  /// Contiguous slot array over the bounding range, up to
  /// [`DENSE_MAX_SLOTS`].
  Dense,
  /// Lazily allocated pages.
  Paged,
  /// Dense up to [`AUTO_DENSE_MAX_SLOTS`], paged beyond.
  #[default]
  Auto,
}

impl StorageBackend {
  /// Whether a range of `volume` slots should use dense storage.
  ///
  /// `volume` saturates on overflow (see [`VoxelRange::volume`]), so an
  /// unrepresentable range always goes paged.
  #[inline]
  pub fn use_dense(&self, volume: usize) -> bool {
    match self {
      StorageBackend::Dense => volume <= DENSE_MAX_SLOTS,
      StorageBackend::Paged => false,
      StorageBackend::Auto => volume <= AUTO_DENSE_MAX_SLOTS,
    }
  }
}

/// Ephemeral voxel index for one clustering pass, generic over storage.
pub struct VoxelGrid<S: VoxelStorage> {
  range: VoxelRange,
  storage: S,
  entries: Vec<VoxelEntry>,
  track_distribution: bool,
}

impl<S: VoxelStorage> VoxelGrid<S> {
  /// Allocate a grid covering `range`. New entries track a covariance
  /// accumulator when `track_distribution` is set.
  pub fn new(range: VoxelRange, track_distribution: bool) -> Self {
    Self {
      range,
      storage: S::allocate(range.shape()),
      entries: Vec::new(),
      track_distribution,
    }
  }

  #[inline]
  pub fn range(&self) -> &VoxelRange {
    &self.range
  }

  #[inline]
  pub fn bounding_shape(&self) -> [usize; 3] {
    self.storage.shape()
  }

  /// Number of populated voxels.
  #[inline]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  #[inline]
  pub fn allocated_slots(&self) -> usize {
    self.storage.allocated_slots()
  }

  /// Entry at `coord`, created empty on first access. `None` outside the
  /// bounding range.
  pub fn at(&mut self, coord: VoxelCoord) -> Option<&mut VoxelEntry> {
    let local = self.range.to_local(coord)?;
    let slot = self.storage.slot_mut(local);
    let id = match *slot {
      Some(id) => id,
      None => {
        let id = EntryId::new(self.entries.len());
        *slot = Some(id);
        self.entries.push(VoxelEntry::new(coord, self.track_distribution));
        id
      }
    };
    Some(&mut self.entries[id.index()])
  }

  /// Place a pre-aggregated entry, fusing it with an existing one. Returns
  /// `false` (dropping the entry) when its coordinate is outside the range.
  ///
  /// The clustering pass builds entries point by point through [`at`](Self::at);
  /// this is the path for callers that bin points themselves, e.g. per
  /// chunk, and hand over finished entries.
  pub fn insert_entry(&mut self, entry: VoxelEntry) -> bool {
    match self.at(entry.coord) {
      Some(slot) => {
        slot.merge(entry);
        true
      }
      None => false,
    }
  }

  /// Handle of the entry at `coord`, without creating one.
  #[inline]
  pub fn find(&self, coord: VoxelCoord) -> Option<EntryId> {
    let local = self.range.to_local(coord)?;
    self.storage.get(local)
  }

  /// Entry at `coord`, without creating one.
  #[inline]
  pub fn get(&self, coord: VoxelCoord) -> Option<&VoxelEntry> {
    self.find(coord).map(|id| &self.entries[id.index()])
  }

  #[inline]
  pub fn get_mut(&mut self, coord: VoxelCoord) -> Option<&mut VoxelEntry> {
    let id = self.find(coord)?;
    Some(&mut self.entries[id.index()])
  }

  #[inline]
  pub fn entry(&self, id: EntryId) -> &VoxelEntry {
    &self.entries[id.index()]
  }

  #[inline]
  pub fn entry_mut(&mut self, id: EntryId) -> &mut VoxelEntry {
    &mut self.entries[id.index()]
  }

  /// All entries in creation order.
  #[inline]
  pub fn entries(&self) -> &[VoxelEntry] {
    &self.entries
  }

  /// Visit every populated voxel in storage order.
  pub fn for_each_populated(&self, mut f: impl FnMut(EntryId, &VoxelEntry)) {
    self
      .storage
      .for_each_populated(&mut |_, id| f(id, &self.entries[id.index()]));
  }

  /// Populated entries in ascending coordinate order, independent of backend.
  pub fn seed_order(&self) -> Vec<EntryId> {
    let mut ids = Vec::with_capacity(self.entries.len());
    self.for_each_populated(|id, _| ids.push(id));
    ids.sort_unstable_by_key(|id| self.entries[id.index()].coord);
    ids
  }

  /// Re-evaluate every entry's validity flag. Returns the valid count.
  pub fn validate_all(&mut self, min_points: usize, scale: f64) -> usize {
    self
      .entries
      .iter_mut()
      .map(|entry| entry.validate(min_points, scale))
      .filter(|valid| *valid)
      .count()
  }
}
