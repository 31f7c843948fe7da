use super::*;

#[test]
fn test_nan_and_infinite_points_are_invalid() {
  assert!(Indexation::is_valid(DVec3::new(1.0, -2.0, 3.0)));
  assert!(!Indexation::is_valid(DVec3::new(f64::NAN, 0.0, 0.0)));
  assert!(!Indexation::is_valid(DVec3::new(0.0, f64::INFINITY, 0.0)));
  assert!(!Indexation::is_valid(DVec3::new(0.0, 0.0, f64::NEG_INFINITY)));
}

#[test]
fn test_to_coord_floors_per_axis() {
  let indexation = Indexation::new(DVec3::new(0.5, 1.0, 2.0));
  assert_eq!(
    indexation.to_coord(DVec3::new(0.74, 1.99, 3.99)),
    VoxelCoord::new(1, 1, 1)
  );
  // Negative values floor away from zero
  assert_eq!(
    indexation.to_coord(DVec3::new(-0.01, -1.0, -2.01)),
    VoxelCoord::new(-1, -1, -2)
  );
}

#[test]
fn test_boundary_belongs_to_upper_voxel() {
  let indexation = Indexation::new(DVec3::splat(0.5));
  assert_eq!(indexation.to_coord(DVec3::splat(0.5)), VoxelCoord::new(1, 1, 1));
  assert_eq!(indexation.to_coord(DVec3::ZERO), VoxelCoord::new(0, 0, 0));
}

#[test]
fn test_same_position_same_voxel() {
  let indexation = Indexation::new(DVec3::splat(0.1));
  let p = DVec3::new(3.14159, -2.71828, 1.41421);
  assert_eq!(indexation.to_coord(p), indexation.to_coord(p));
}

#[test]
fn test_voxel_center() {
  let indexation = Indexation::new(DVec3::new(1.0, 2.0, 0.5));
  assert_eq!(
    indexation.voxel_center(VoxelCoord::new(0, -1, 2)),
    DVec3::new(0.5, -1.0, 1.25)
  );
}

#[test]
fn test_range_from_coords() {
  let range = VoxelRange::from_coords([
    VoxelCoord::new(3, -1, 0),
    VoxelCoord::new(-2, 4, 1),
    VoxelCoord::new(0, 0, -5),
  ])
  .unwrap();

  assert_eq!(range.min, VoxelCoord::new(-2, -1, -5));
  assert_eq!(range.max, VoxelCoord::new(3, 4, 1));
  assert_eq!(range.shape(), [6, 6, 7]);
  assert_eq!(range.volume(), 252);
}

#[test]
fn test_range_from_no_coords_is_none() {
  assert!(VoxelRange::from_coords(std::iter::empty()).is_none());
}

#[test]
fn test_local_global_roundtrip() {
  let range = VoxelRange::new(VoxelCoord::new(-3, 2, -1), VoxelCoord::new(4, 5, 1));
  let coord = VoxelCoord::new(1, 5, -1);
  let local = range.to_local(coord).unwrap();
  assert_eq!(local, [4, 3, 0]);
  assert_eq!(range.to_global(local), coord);
}

#[test]
fn test_to_local_outside_is_none() {
  let range = VoxelRange::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(2, 2, 2));
  assert!(range.to_local(VoxelCoord::new(3, 0, 0)).is_none());
  assert!(range.to_local(VoxelCoord::new(0, -1, 0)).is_none());
}

#[test]
fn test_extreme_range_does_not_overflow() {
  let range = VoxelRange::new(
    VoxelCoord::new(i32::MIN, i32::MIN, i32::MIN),
    VoxelCoord::new(i32::MAX, i32::MAX, i32::MAX),
  );
  assert_eq!(range.shape()[0], 1usize << 32);
  assert_eq!(range.volume(), usize::MAX);
}

#[test]
fn test_offset_saturates() {
  let coord = VoxelCoord::new(i32::MAX, 0, i32::MIN);
  assert_eq!(coord.offset([1, -1, -1]), VoxelCoord::new(i32::MAX, -1, i32::MIN));
}

#[test]
fn test_coord_order_is_lexicographic() {
  let mut coords = vec![
    VoxelCoord::new(1, 0, 0),
    VoxelCoord::new(0, 1, 0),
    VoxelCoord::new(0, 0, 1),
    VoxelCoord::new(0, 0, 0),
  ];
  coords.sort();
  assert_eq!(
    coords,
    vec![
      VoxelCoord::new(0, 0, 0),
      VoxelCoord::new(0, 0, 1),
      VoxelCoord::new(0, 1, 0),
      VoxelCoord::new(1, 0, 0),
    ]
  );
}

#[test]
fn test_component_bounds_differ_from_ordering() {
  let a = VoxelCoord::new(0, 5, -2);
  let b = VoxelCoord::new(1, -3, 4);
  assert_eq!(a.component_min(&b), VoxelCoord::new(0, -3, -2));
  assert_eq!(a.component_max(&b), VoxelCoord::new(1, 5, 4));
  // Lexicographic order picks whole coordinates
  assert_eq!(a.min(b), a);

  let mut range = VoxelRange::single(a);
  range.encapsulate(b);
  assert_eq!(range.min, VoxelCoord::new(0, -3, -2));
  assert_eq!(range.max, VoxelCoord::new(1, 5, 4));
}
