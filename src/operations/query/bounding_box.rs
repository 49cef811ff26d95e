use crate::error::{MeshError, Result};
use crate::math::{Point3, Vector3, AXES, TOLERANCE};
use crate::mesh::Mesh;
use crate::transform::Transform;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Edge lengths along each axis.
    #[must_use]
    pub fn extents(&self) -> Vector3 {
        self.max - self.min
    }

    /// Length of the longest edge.
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.extents().max()
    }

    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns `true` if `point` lies inside or on the box, with slack `tol`.
    #[must_use]
    pub fn contains(&self, point: &Point3, tol: f64) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] - tol && point[i] <= self.max[i] + tol)
    }
}

/// Computes the axis-aligned bounding box of a mesh after transforming it.
///
/// Every vertex is transformed before the min/max reduction, so a rotated
/// body gets a tight box rather than the box of rotated corners.
pub struct BoundingBox<'a> {
    mesh: &'a Mesh,
    transform: Option<&'a Transform>,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query over the mesh as given.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self {
            mesh,
            transform: None,
        }
    }

    /// Applies `transform` to every vertex before bounding.
    #[must_use]
    pub fn with_transform(mut self, transform: &'a Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Empty`] for a mesh without triangles,
    /// [`MeshError::NonFiniteVertex`] if a transformed vertex is NaN or
    /// infinite, and [`MeshError::ZeroExtent`] if the box is flat on any axis.
    pub fn execute(&self) -> Result<Aabb> {
        if self.mesh.is_empty() {
            return Err(MeshError::Empty.into());
        }

        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

        for vertex in self.mesh.vertices() {
            let v = match self.transform {
                Some(t) => t.transform_point(vertex),
                None => *vertex,
            };
            if !v.iter().all(|c| c.is_finite()) {
                return Err(MeshError::NonFiniteVertex.into());
            }
            min = min.inf(&v);
            max = max.sup(&v);
        }

        let bounds = Aabb { min, max };
        let extents = bounds.extents();
        for axis in 0..3 {
            if extents[axis] < TOLERANCE {
                return Err(MeshError::ZeroExtent { axis: AXES[axis] }.into());
            }
        }
        Ok(bounds)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;
    use crate::operations::creation::MakeBox;
    use crate::MeshgrainError;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_bounds_match_corners() {
        let mesh = MakeBox::new(p(-1.0, 0.0, 2.0), p(1.0, 3.0, 5.0))
            .execute()
            .unwrap();
        let aabb = BoundingBox::new(&mesh).execute().unwrap();
        assert_eq!(aabb.min, p(-1.0, 0.0, 2.0));
        assert_eq!(aabb.max, p(1.0, 3.0, 5.0));
        assert_relative_eq!(aabb.max_extent(), 3.0);
        assert_eq!(aabb.center(), p(0.0, 1.5, 3.5));
    }

    #[test]
    fn bounds_follow_transform() {
        let mesh = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0))
            .execute()
            .unwrap();
        let t = Transform::new()
            .with_scale(Vector3::new(2.0, 1.0, 1.0))
            .with_translation(Vector3::new(10.0, 0.0, 0.0));
        let aabb = BoundingBox::new(&mesh).with_transform(&t).execute().unwrap();
        assert_relative_eq!(aabb.min, p(10.0, 0.0, 0.0));
        assert_relative_eq!(aabb.max, p(12.0, 1.0, 1.0));
    }

    #[test]
    fn rotated_tetrahedron_bounds_are_tight() {
        // A tetrahedron whose corners, not its box corners, define the bounds.
        let a = p(0.0, 0.0, 0.0);
        let b = p(1.0, 0.0, 0.0);
        let c = p(0.0, 1.0, 0.0);
        let d = p(0.0, 0.0, 1.0);
        let mesh = crate::mesh::Mesh::new(vec![
            Triangle::new(a, c, b),
            Triangle::new(a, b, d),
            Triangle::new(a, d, c),
            Triangle::new(b, c, d),
        ]);
        let rot = *nalgebra::Rotation3::from_axis_angle(&Vector3::z_axis(), FRAC_PI_4).matrix();
        let t = Transform::new().with_rotation(rot);
        let aabb = BoundingBox::new(&mesh).with_transform(&t).execute().unwrap();

        // Rotated corners of the unit box would reach y = 1.414.
        let h = FRAC_PI_4.cos();
        assert_relative_eq!(aabb.min, p(-h, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.max, p(h, h, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn empty_mesh_is_invalid() {
        let mesh = crate::mesh::Mesh::default();
        let err = BoundingBox::new(&mesh).execute().unwrap_err();
        assert!(matches!(err, MeshgrainError::Mesh(MeshError::Empty)));
    }

    #[test]
    fn flat_mesh_is_invalid() {
        let mesh = crate::mesh::Mesh::new(vec![Triangle::new(
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
        )]);
        let err = BoundingBox::new(&mesh).execute().unwrap_err();
        assert!(matches!(
            err,
            MeshgrainError::Mesh(MeshError::ZeroExtent { axis: 'z' })
        ));
    }
}
