use super::*;

const EPS: f64 = 1e-12;

fn entry_with(points: &[(usize, DVec3)], track: bool) -> VoxelEntry {
  let mut entry = VoxelEntry::new(VoxelCoord::new(0, 0, 0), track);
  for (index, p) in points {
    entry.insert(*index, *p);
  }
  entry
}

#[test]
fn test_new_entry_is_unlabeled() {
  let entry = VoxelEntry::new(VoxelCoord::new(1, 2, 3), false);
  assert_eq!(entry.count, 0);
  assert!(entry.indices.is_empty());
  assert!(entry.label.is_none());
  assert!(entry.distribution.is_none());
}

#[test]
fn test_insert_updates_running_mean_and_depth() {
  let entry = entry_with(
    &[
      (4, DVec3::new(3.0, 4.0, 0.0)), // depth 5
      (9, DVec3::new(0.0, 0.0, 1.0)), // depth 1
    ],
    true,
  );

  assert_eq!(entry.indices, vec![4, 9]);
  assert_eq!(entry.count, 2);
  assert!((entry.mean - DVec3::new(1.5, 2.0, 0.5)).length() < EPS);
  assert!((entry.depth.mean() - 3.0).abs() < EPS);
  assert_eq!(entry.distribution.unwrap().n(), 2);
}

#[test]
fn test_merge_uses_weighted_means() {
  let mut a = entry_with(&[(0, DVec3::splat(1.0))], true);
  let b = entry_with(
    &[
      (1, DVec3::splat(4.0)),
      (2, DVec3::splat(4.0)),
      (3, DVec3::splat(4.0)),
    ],
    true,
  );

  a.merge(b);

  assert_eq!(a.count, 4);
  assert_eq!(a.indices, vec![0, 1, 2, 3]);
  // (1*1 + 4*3) / 4 = 3.25
  assert!((a.mean - DVec3::splat(3.25)).length() < EPS);
  assert!((a.depth.mean() - 3.25 * 3.0_f64.sqrt()).abs() < 1e-9);
  assert_eq!(a.distribution.unwrap().n(), 4);
}

#[test]
fn test_merge_matches_sequential_insert_for_small_counts() {
  let points: Vec<(usize, DVec3)> = (0..5)
    .map(|i| (i, DVec3::new(i as f64 * 0.1, 0.3, -0.2 * i as f64)))
    .collect();

  let sequential = entry_with(&points, false);

  let mut merged = entry_with(&points[..2], false);
  merged.merge(entry_with(&points[2..], false));

  assert_eq!(merged.indices, sequential.indices);
  assert!((merged.mean - sequential.mean).length() < 1e-12);
}

#[test]
fn test_merge_into_empty_adopts_other() {
  let mut empty = VoxelEntry::new(VoxelCoord::new(0, 0, 0), false);
  let other = entry_with(&[(7, DVec3::new(1.0, 2.0, 3.0))], false);
  empty.merge(other);
  assert_eq!(empty.count, 1);
  assert_eq!(empty.mean, DVec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_validate_without_scale() {
  let points: Vec<_> = (0..4).map(|i| (i, DVec3::splat(0.01))).collect();
  let mut entry = entry_with(&points, false);

  assert!(!entry.validate(5, 0.0), "4 points below a minimum of 5");
  entry.insert(4, DVec3::splat(0.01));
  assert!(entry.validate(5, 0.0), "5 points meet a minimum of 5");
}

#[test]
fn test_validate_zero_min_points_always_valid() {
  let mut entry = entry_with(&[(0, DVec3::ZERO)], false);
  assert!(entry.validate(0, 0.0));
  assert!(entry.validate(0, 0.5));
}

#[test]
fn test_required_points_scales_with_depth() {
  // Single point at depth 2
  let entry = entry_with(&[(0, DVec3::new(0.0, 2.0, 0.0))], false);
  // floor(10 / (0.5 * 4) + 0.5) = floor(5.5) = 5
  assert_eq!(entry.required_points(10, 0.5), 5);

  // Farther away requires fewer points: depth 10 -> floor(10 / 50 + 0.5) = 0
  let far = entry_with(&[(0, DVec3::new(10.0, 0.0, 0.0))], false);
  assert_eq!(far.required_points(10, 0.5), 0);
}

#[test]
fn test_required_points_at_origin_saturates() {
  let entry = entry_with(&[(0, DVec3::ZERO)], false);
  assert_eq!(entry.required_points(3, 0.1), usize::MAX);
}
