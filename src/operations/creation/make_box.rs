use crate::error::{MeshError, Result};
use crate::math::{Point3, AXES, TOLERANCE};
use crate::mesh::{Mesh, Triangle};

/// Corner indices of each face, counter-clockwise seen from outside.
/// Corner `i` takes `max` on axis `k` when bit `k` of `i` is set.
const FACES: [[usize; 4]; 6] = [
    [0, 4, 6, 2], // -x
    [1, 3, 7, 5], // +x
    [0, 1, 5, 4], // -y
    [2, 6, 7, 3], // +y
    [0, 2, 3, 1], // -z
    [4, 5, 7, 6], // +z
];

/// Creates a closed, outward-wound box mesh from two corner points.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Creates a box of the given edge lengths centered on `center`.
    #[must_use]
    pub fn centered(center: Point3, size: [f64; 3]) -> Self {
        let half = nalgebra::Vector3::from(size) * 0.5;
        Self::new(center - half, center + half)
    }

    /// Executes the operation, returning 12 triangles.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::ZeroExtent`] if the box is flat or inverted on
    /// any axis.
    pub fn execute(&self) -> Result<Mesh> {
        let (lo, hi) = (self.min_corner, self.max_corner);
        for axis in 0..3 {
            if hi[axis] - lo[axis] < TOLERANCE {
                return Err(MeshError::ZeroExtent { axis: AXES[axis] }.into());
            }
        }

        let corners: Vec<Point3> = (0..8)
            .map(|i| {
                Point3::new(
                    if i & 1 == 0 { lo.x } else { hi.x },
                    if i & 2 == 0 { lo.y } else { hi.y },
                    if i & 4 == 0 { lo.z } else { hi.z },
                )
            })
            .collect();

        let mut triangles = Vec::with_capacity(12);
        for [a, b, c, d] in FACES {
            triangles.push(Triangle::new(corners[a], corners[b], corners[c]));
            triangles.push(Triangle::new(corners[a], corners[c], corners[d]));
        }
        Ok(Mesh::new(triangles))
    }
}
