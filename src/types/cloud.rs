//! 3D point cloud types

use serde::{Deserialize, Serialize};

/// A single point in the rig-relative Cartesian frame, in centimeters.
///
/// Immutable once computed; produced by the coordinate transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    /// X coordinate in centimeters (forward at identity orientation)
    pub x: f32,
    /// Y coordinate in centimeters (left at identity orientation)
    pub y: f32,
    /// Z coordinate in centimeters (up)
    pub z: f32,
}

impl Point3D {
    /// Create new point
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance from the rig origin
    pub fn norm(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Accumulated set of transformed 3D points over one collection window.
///
/// A transient in-memory buffer: created empty, appended to for a bounded
/// number of sweeps, then handed to a consumer and discarded. No dedup,
/// no spatial indexing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    /// Points in acquisition order
    pub points: Vec<Point3D>,
}

impl PointCloud {
    /// Create an empty point cloud
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a point cloud with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Add a point
    #[inline]
    pub fn push(&mut self, point: Point3D) {
        self.points.push(point);
    }

    /// Number of points
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append all points from an iterator
    pub fn extend<I: IntoIterator<Item = Point3D>>(&mut self, points: I) {
        self.points.extend(points);
    }

    /// Clear all points
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Iterate over points
    pub fn iter(&self) -> impl Iterator<Item = &Point3D> {
        self.points.iter()
    }

    /// Axis-aligned bounding box, None if empty
    pub fn bounds(&self) -> Option<(Point3D, Point3D)> {
        let first = self.points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        Some((min, max))
    }

    /// Center of mass, None if empty
    pub fn centroid(&self) -> Option<Point3D> {
        if self.points.is_empty() {
            return None;
        }
        let mut sum = Point3D::new(0.0, 0.0, 0.0);
        for p in &self.points {
            sum.x += p.x;
            sum.y += p.y;
            sum.z += p.z;
        }
        let inv_n = 1.0 / (self.points.len() as f32);
        Some(Point3D::new(sum.x * inv_n, sum.y * inv_n, sum.z * inv_n))
    }
}
