use super::{Point3, Vector3, TOLERANCE};

/// Barycentric tolerance under which a hit counts as touching an edge or vertex.
const EDGE_TOLERANCE: f64 = 1e-9;

/// `|dir . n|` below this treats the ray as parallel to the triangle plane.
const PARALLEL_TOLERANCE: f64 = 1e-12;

/// Relationship between a ray and a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayTriangleRelation {
    /// The ray does not touch the triangle.
    Miss,
    /// The ray crosses the triangle interior at parameter `t > 0`.
    Crossing { t: f64 },
    /// The ray touches an edge or vertex, or runs inside the triangle plane.
    /// Parity cannot be decided from this ray.
    Grazing,
    /// The ray origin lies on the triangle.
    Origin,
}

/// Intersects the ray `origin + t * dir` (`t >= 0`) with the triangle `tri`.
///
/// Zero-area triangles never report a hit. `dir` need not be normalized.
#[must_use]
pub fn ray_triangle_intersect(
    origin: &Point3,
    dir: &Vector3,
    tri: &[Point3; 3],
) -> RayTriangleRelation {
    let [a, b, c] = tri;
    let n = (b - a).cross(&(c - a));
    let n_len = n.norm();
    if n_len < TOLERANCE {
        return RayTriangleRelation::Miss;
    }
    let normal = n / n_len;

    let dist = (origin - a).dot(&normal);
    let denom = dir.dot(&normal);

    if denom.abs() < PARALLEL_TOLERANCE * dir.norm() {
        if dist.abs() < TOLERANCE {
            // Ray lies in the triangle plane.
            return if barycentric_state(origin, tri, &n) == Barycentric::Outside {
                RayTriangleRelation::Grazing
            } else {
                RayTriangleRelation::Origin
            };
        }
        return RayTriangleRelation::Miss;
    }

    let t = -dist / denom;
    if t * dir.norm() <= TOLERANCE {
        if t * dir.norm() >= -TOLERANCE
            && barycentric_state(origin, tri, &n) != Barycentric::Outside
        {
            return RayTriangleRelation::Origin;
        }
        return RayTriangleRelation::Miss;
    }

    let hit = origin + dir * t;
    match barycentric_state(&hit, tri, &n) {
        Barycentric::Outside => RayTriangleRelation::Miss,
        Barycentric::OnEdge => RayTriangleRelation::Grazing,
        Barycentric::Inside => RayTriangleRelation::Crossing { t },
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Barycentric {
    Inside,
    OnEdge,
    Outside,
}

/// Locates a point lying in the triangle plane using normalized barycentric weights.
fn barycentric_state(point: &Point3, tri: &[Point3; 3], n: &Vector3) -> Barycentric {
    let [a, b, c] = tri;
    let inv = 1.0 / n.norm_squared();
    let weights = [
        (b - point).cross(&(c - point)).dot(n) * inv,
        (c - point).cross(&(a - point)).dot(n) * inv,
        (a - point).cross(&(b - point)).dot(n) * inv,
    ];

    if weights.iter().any(|&w| w < -EDGE_TOLERANCE) {
        Barycentric::Outside
    } else if weights.iter().any(|&w| w < EDGE_TOLERANCE) {
        Barycentric::OnEdge
    } else {
        Barycentric::Inside
    }
}
