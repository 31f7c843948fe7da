use super::*;

#[test]
fn test_mask_sizes() {
  assert_eq!(AdjacencyMask::faces().len(), 6);
  assert_eq!(AdjacencyMask::edges().len(), 18);
  assert_eq!(AdjacencyMask::full().len(), 26);
  assert_eq!(AdjacencyMask::radius(2).len(), 124);
}

#[test]
fn test_radius_one_equals_full() {
  assert_eq!(AdjacencyMask::radius(1), AdjacencyMask::full());
  assert_eq!(AdjacencyMask::default(), AdjacencyMask::full());
}

#[test]
fn test_masks_are_symmetric_and_exclude_center() {
  for mask in [
    AdjacencyMask::faces(),
    AdjacencyMask::edges(),
    AdjacencyMask::full(),
    AdjacencyMask::radius(3),
  ] {
    assert!(mask.validate().is_ok());
    for d in mask.iter() {
      let opposite = [-d[0], -d[1], -d[2]];
      assert!(mask.iter().any(|o| *o == opposite), "{:?} has no opposite", d);
    }
  }
}

#[test]
fn test_apply_to_index() {
  let mask = AdjacencyMask::faces();
  let base = VoxelCoord::new(10, -4, 7);
  assert_eq!(mask.apply_to_index(base, 0), VoxelCoord::new(9, -4, 7));
  assert_eq!(mask.apply_to_index(base, 5), VoxelCoord::new(10, -4, 8));

  let neighbors: Vec<_> = mask.neighbors(base).collect();
  assert_eq!(neighbors.len(), 6);
  assert!(neighbors.contains(&VoxelCoord::new(10, -3, 7)));
}

#[test]
fn test_from_offsets_accepts_custom_mask() {
  let mask = AdjacencyMask::from_offsets([[0, 0, 1], [0, 0, -1], [0, 0, 2]]).unwrap();
  assert_eq!(mask.len(), 3);
  assert_eq!(mask.offset(2), [0, 0, 2]);
}

#[test]
fn test_from_offsets_rejects_invalid() {
  assert!(matches!(
    AdjacencyMask::from_offsets([]),
    Err(ClusterError::InvalidMask(_))
  ));
  assert!(matches!(
    AdjacencyMask::from_offsets([[1, 0, 0], [0, 0, 0]]),
    Err(ClusterError::InvalidMask(_))
  ));
  assert!(matches!(
    AdjacencyMask::from_offsets([[1, 0, 0], [0, 1, 0], [1, 0, 0]]),
    Err(ClusterError::InvalidMask(_))
  ));
}
