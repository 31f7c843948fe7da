use super::*;

#[test]
fn test_default_config_is_valid() {
  let config = ClusterConfig::default();
  assert!(config.validate().is_ok());
  assert_eq!(config.bin_sizes, DVec3::splat(0.1));
  assert_eq!(config.max_cluster_size, 1_000_000);
  assert_eq!(config.mask.len(), 26);
  assert!(!config.shape_filter_enabled());
}

#[test]
fn test_builder() {
  let config = ClusterConfig::new()
    .with_bin_sizes(DVec3::new(0.2, 0.3, 0.4))
    .with_cluster_size(5, 50)
    .with_distance_threshold(0.25)
    .with_distance_weights(DVec3::new(1.0, 1.0, 0.5))
    .with_voxel_min_points(3, 0.01)
    .with_invalid_voxel_policy(InvalidVoxelPolicy::Absorb)
    .with_mask(AdjacencyMask::faces())
    .with_backend(StorageBackend::Paged)
    .with_collect_voxels(true);

  assert!(config.validate().is_ok());
  assert_eq!(config.min_cluster_size, 5);
  assert_eq!(config.max_cluster_size, 50);
  assert_eq!(config.distance_threshold, 0.25);
  assert_eq!(config.voxel_min_points, 3);
  assert_eq!(config.invalid_voxel_policy, InvalidVoxelPolicy::Absorb);
  assert_eq!(config.backend, StorageBackend::Paged);
  assert!(config.collect_voxels);
}

#[test]
fn test_rejects_inverted_size_range() {
  let config = ClusterConfig::new().with_cluster_size(10, 5);
  assert_eq!(
    config.validate(),
    Err(ClusterError::InvalidSizeRange { min: 10, max: 5 })
  );
}

#[test]
fn test_rejects_bad_bin_sizes() {
  let zero = ClusterConfig::new().with_bin_sizes(DVec3::new(0.1, 0.0, 0.1));
  assert_eq!(
    zero.validate(),
    Err(ClusterError::InvalidBinSize {
      axis: 'y',
      value: 0.0
    })
  );

  let nan = ClusterConfig::new().with_bin_sizes(DVec3::new(0.1, 0.1, f64::NAN));
  assert!(matches!(
    nan.validate(),
    Err(ClusterError::InvalidBinSize { axis: 'z', .. })
  ));
}

#[test]
fn test_rejects_negative_distance_parameters() {
  let threshold = ClusterConfig::new().with_distance_threshold(-1.0);
  assert_eq!(threshold.validate(), Err(ClusterError::InvalidDistance(-1.0)));

  let weights = ClusterConfig::new().with_distance_weights(DVec3::new(1.0, -0.5, 1.0));
  assert_eq!(weights.validate(), Err(ClusterError::InvalidDistance(-0.5)));
}

#[test]
fn test_rejects_inverted_std_dev_interval() {
  let config = ClusterConfig::new().with_std_dev([
    StdDevInterval::DISABLED,
    StdDevInterval::new(0.5, 0.2),
    StdDevInterval::DISABLED,
  ]);
  assert!(matches!(
    config.validate(),
    Err(ClusterError::InvalidStdDevInterval { axis: 'y', .. })
  ));
}

#[test]
fn test_rejects_negative_min_points_scale() {
  let config = ClusterConfig::new().with_voxel_min_points(5, -0.1);
  assert_eq!(
    config.validate(),
    Err(ClusterError::InvalidMinPointsScale(-0.1))
  );
}

#[test]
fn test_std_dev_interval() {
  let disabled = StdDevInterval::DISABLED;
  assert!(!disabled.is_enabled());
  assert!(disabled.accepts(1e9));

  let interval = StdDevInterval::new(0.1, 0.5);
  assert!(interval.is_enabled());
  assert!(interval.accepts(0.1));
  assert!(interval.accepts(0.5));
  assert!(!interval.accepts(0.05));
  assert!(!interval.accepts(0.51));
}

#[test]
fn test_shape_filter_enabled_by_any_axis() {
  let config = ClusterConfig::new().with_std_dev([
    StdDevInterval::DISABLED,
    StdDevInterval::DISABLED,
    StdDevInterval::new(0.0, 1.0),
  ]);
  assert!(config.shape_filter_enabled());
}

#[cfg(feature = "serde")]
#[test]
fn test_config_from_toml() {
  let text = r#"
    bin_sizes = [0.2, 0.2, 0.5]
    min_cluster_size = 10
    max_cluster_size = 5000
    distance_threshold = 0.3
    std_dev_threshold_type = "Pca2d"
    invalid_voxel_policy = "Absorb"
    backend = "Paged"
  "#;

  let config: ClusterConfig = toml::from_str(text).unwrap();
  assert!(config.validate().is_ok());
  assert_eq!(config.bin_sizes, DVec3::new(0.2, 0.2, 0.5));
  assert_eq!(config.min_cluster_size, 10);
  assert_eq!(config.std_dev_threshold_type, StdDevThresholdType::Pca2d);
  assert_eq!(config.invalid_voxel_policy, InvalidVoxelPolicy::Absorb);
  assert_eq!(config.backend, StorageBackend::Paged);
  // Unspecified fields fall back to defaults
  assert_eq!(config.mask, AdjacencyMask::full());
  assert_eq!(config.distance_weights, DVec3::ONE);
}
