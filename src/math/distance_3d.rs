use super::Point3;

/// Closest point to `point` on the solid triangle `tri`.
///
/// Walks the Voronoi regions of the vertices, then the edges, then the face.
#[must_use]
pub fn closest_point_on_triangle(point: &Point3, tri: &[Point3; 3]) -> Point3 {
    let [a, b, c] = tri;
    let ab = b - a;
    let ac = c - a;

    let ap = point - a;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return *a;
    }

    let bp = point - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return *b;
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = point - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return *c;
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    let denom = va + vb + vc;
    if denom.abs() < f64::EPSILON {
        // Zero-area triangle that slipped through the edge regions.
        return *a;
    }
    let v = vb / denom;
    let w = vc / denom;
    a + ab * v + ac * w
}

/// Euclidean distance from `point` to the solid triangle `tri`.
#[must_use]
pub fn point_triangle_distance(point: &Point3, tri: &[Point3; 3]) -> f64 {
    (point - closest_point_on_triangle(point, tri)).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn tri() -> [Point3; 3] {
        [p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(0.0, 2.0, 0.0)]
    }

    #[test]
    fn above_face_projects_onto_plane() {
        let q = closest_point_on_triangle(&p(0.5, 0.5, 3.0), &tri());
        assert_relative_eq!(q, p(0.5, 0.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn beyond_vertex_snaps_to_vertex() {
        let q = closest_point_on_triangle(&p(-1.0, -1.0, 1.0), &tri());
        assert_relative_eq!(q, p(0.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn beside_hypotenuse_snaps_to_edge() {
        let q = closest_point_on_triangle(&p(2.0, 2.0, 0.0), &tri());
        assert_relative_eq!(q, p(1.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn distance_from_face() {
        let d = point_triangle_distance(&p(0.5, 0.5, -4.0), &tri());
        assert_relative_eq!(d, 4.0, epsilon = 1e-12);
    }
}
