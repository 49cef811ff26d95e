use crate::error::{MeshError, Result};
use crate::math::intersect_3d::{ray_triangle_intersect, RayTriangleRelation};
use crate::math::{Point3, Vector3};

/// Classification of a point relative to a closed mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Ray directions tried in order. The first is the +X axis; the rest are
/// fixed small tilts of each axis, so a retry after a grazing hit is
/// reproducible.
const RAY_DIRECTIONS: [[f64; 3]; 4] = [
    [1.0, 0.0, 0.0],
    [1.0, 1.3e-3, 2.9e-3],
    [2.3e-3, 1.0, 1.7e-3],
    [3.1e-3, 1.1e-3, 1.0],
];

/// Classifies a point as inside, outside, or on the boundary of a closed mesh.
///
/// Uses ray casting: shoots a ray from the point and counts triangle
/// crossings. Odd crossings = inside, even = outside. If the ray grazes an
/// edge or vertex, retries with the next fixed direction.
///
/// # Errors
///
/// Returns [`MeshError::AmbiguousClassification`] if every direction grazes.
pub fn classify_point_in_mesh(
    point: &Point3,
    triangles: &[[Point3; 3]],
) -> Result<PointClassification> {
    for dir in &RAY_DIRECTIONS {
        let dir = Vector3::from(*dir);
        if let RayCastResult::Clear(classification) = ray_cast_classify(point, &dir, triangles) {
            return Ok(classification);
        }
    }

    Err(MeshError::AmbiguousClassification { point: *point }.into())
}

enum RayCastResult {
    Clear(PointClassification),
    Degenerate,
}

fn ray_cast_classify(point: &Point3, dir: &Vector3, triangles: &[[Point3; 3]]) -> RayCastResult {
    let mut crossings = 0u32;

    for tri in triangles {
        match ray_triangle_intersect(point, dir, tri) {
            RayTriangleRelation::Miss => {}
            RayTriangleRelation::Crossing { .. } => crossings += 1,
            RayTriangleRelation::Origin => {
                return RayCastResult::Clear(PointClassification::OnBoundary);
            }
            RayTriangleRelation::Grazing => return RayCastResult::Degenerate,
        }
    }

    if crossings % 2 == 1 {
        RayCastResult::Clear(PointClassification::Inside)
    } else {
        RayCastResult::Clear(PointClassification::Outside)
    }
}
