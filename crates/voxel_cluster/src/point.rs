//! Point representations accepted by the clustering engine.
//!
//! Sensor drivers deliver points in a handful of layouts. Every layout that
//! carries `x`, `y`, `z` implements [`SpatialPoint`]; [`PointCloud`] is the
//! tagged variant the engine dispatches on, with an explicit arm for layouts
//! that cannot be clustered.

use glam::DVec3;

/// A point with a position in 3D space.
pub trait SpatialPoint {
  /// Position in double precision.
  fn position(&self) -> DVec3;
}

/// Bare XYZ point.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointXyz {
  pub x: f32,
  pub y: f32,
  pub z: f32,
}

impl PointXyz {
  pub fn new(x: f32, y: f32, z: f32) -> Self {
    Self { x, y, z }
  }
}

/// XYZ point with return intensity.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointXyzI {
  pub x: f32,
  pub y: f32,
  pub z: f32,
  pub intensity: f32,
}

/// XYZ point with color.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointXyzRgb {
  pub x: f32,
  pub y: f32,
  pub z: f32,
  pub rgb: [u8; 3],
}

/// XYZ point with an integer label.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointXyzL {
  pub x: f32,
  pub y: f32,
  pub z: f32,
  pub label: u32,
}

/// Surface normal without a position.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Normal {
  pub normal_x: f32,
  pub normal_y: f32,
  pub normal_z: f32,
  pub curvature: f32,
}

macro_rules! impl_spatial_point {
  ($($ty:ty),*) => {
    $(
      impl SpatialPoint for $ty {
        #[inline]
        fn position(&self) -> DVec3 {
          DVec3::new(self.x as f64, self.y as f64, self.z as f64)
        }
      }
    )*
  };
}

impl_spatial_point!(PointXyz, PointXyzI, PointXyzRgb, PointXyzL);

impl SpatialPoint for DVec3 {
  #[inline]
  fn position(&self) -> DVec3 {
    *self
  }
}

impl SpatialPoint for [f32; 3] {
  #[inline]
  fn position(&self) -> DVec3 {
    DVec3::new(self[0] as f64, self[1] as f64, self[2] as f64)
  }
}

/// Borrowed point cloud in one of the supported layouts.
#[derive(Clone, Copy, Debug)]
pub enum PointCloud<'a> {
  Xyz(&'a [PointXyz]),
  XyzI(&'a [PointXyzI]),
  XyzRgb(&'a [PointXyzRgb]),
  XyzL(&'a [PointXyzL]),
  /// Normals only. Rejected at dispatch with
  /// [`ClusterError::UnsupportedPointVariant`](crate::ClusterError::UnsupportedPointVariant).
  Normals(&'a [Normal]),
}

impl PointCloud<'_> {
  /// Number of points regardless of layout.
  pub fn len(&self) -> usize {
    match self {
      PointCloud::Xyz(p) => p.len(),
      PointCloud::XyzI(p) => p.len(),
      PointCloud::XyzRgb(p) => p.len(),
      PointCloud::XyzL(p) => p.len(),
      PointCloud::Normals(p) => p.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Human-readable layout name for diagnostics.
  pub fn kind(&self) -> &'static str {
    match self {
      PointCloud::Xyz(_) => "xyz",
      PointCloud::XyzI(_) => "xyzi",
      PointCloud::XyzRgb(_) => "xyzrgb",
      PointCloud::XyzL(_) => "xyzl",
      PointCloud::Normals(_) => "normal",
    }
  }
}

impl<'a> From<&'a [PointXyz]> for PointCloud<'a> {
  fn from(points: &'a [PointXyz]) -> Self {
    PointCloud::Xyz(points)
  }
}

impl<'a> From<&'a [PointXyzI]> for PointCloud<'a> {
  fn from(points: &'a [PointXyzI]) -> Self {
    PointCloud::XyzI(points)
  }
}

impl<'a> From<&'a [PointXyzRgb]> for PointCloud<'a> {
  fn from(points: &'a [PointXyzRgb]) -> Self {
    PointCloud::XyzRgb(points)
  }
}

impl<'a> From<&'a [PointXyzL]> for PointCloud<'a> {
  fn from(points: &'a [PointXyzL]) -> Self {
    PointCloud::XyzL(points)
  }
}

impl<'a> From<&'a [Normal]> for PointCloud<'a> {
  fn from(points: &'a [Normal]) -> Self {
    PointCloud::Normals(points)
  }
}
