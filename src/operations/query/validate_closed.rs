use std::collections::HashMap;

use crate::error::{MeshError, Result};
use crate::math::Point3;
use crate::mesh::Mesh;

/// Checks that a triangle soup bounds a closed, consistently wound volume.
///
/// Vertices are welded by exact position. A mesh passes when every edge is
/// used by exactly two triangles, once in each direction. Open edges and
/// edges shared by more than two triangles make parity classification
/// meaningless, so they are reported as [`MeshError::NonManifold`].
pub struct ValidateClosed<'a> {
    mesh: &'a Mesh,
}

impl<'a> ValidateClosed<'a> {
    /// Creates a new `ValidateClosed` query.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self { mesh }
    }

    /// Executes the check.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Empty`] for an empty mesh,
    /// [`MeshError::NonManifold`] for open or over-shared edges, and
    /// [`MeshError::InconsistentWinding`] when an edge is traversed twice in
    /// the same direction.
    pub fn execute(&self) -> Result<()> {
        if self.mesh.is_empty() {
            return Err(MeshError::Empty.into());
        }

        let mut welded: HashMap<[u64; 3], usize> = HashMap::new();
        let mut directed: HashMap<(usize, usize), usize> = HashMap::new();

        for tri in &self.mesh.triangles {
            let ids = tri.vertices.map(|v| {
                let next = welded.len();
                *welded.entry(weld_key(&v)).or_insert(next)
            });
            for k in 0..3 {
                let (a, b) = (ids[k], ids[(k + 1) % 3]);
                if a != b {
                    *directed.entry((a, b)).or_insert(0) += 1;
                }
            }
        }

        let mut boundary_edges = 0;
        let mut overshared_edges = 0;
        let mut misoriented_edges = 0;
        for (&(a, b), &forward) in &directed {
            let backward = directed.get(&(b, a)).copied().unwrap_or(0);
            // Visit each undirected edge once.
            if backward > 0 && a > b {
                continue;
            }
            match forward + backward {
                1 => boundary_edges += 1,
                2 if forward == 1 => {}
                2 => misoriented_edges += 1,
                _ => overshared_edges += 1,
            }
        }

        if boundary_edges > 0 || overshared_edges > 0 {
            return Err(MeshError::NonManifold {
                boundary_edges,
                overshared_edges,
            }
            .into());
        }
        if misoriented_edges > 0 {
            return Err(MeshError::InconsistentWinding {
                edges: misoriented_edges,
            }
            .into());
        }
        Ok(())
    }
}

/// Bit pattern of a position, with `-0.0` folded into `0.0`.
fn weld_key(v: &Point3) -> [u64; 3] {
    [v.x, v.y, v.z].map(|c| (c + 0.0).to_bits())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;
    use crate::operations::creation::MakeBox;
    use crate::MeshgrainError;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_box() -> Mesh {
        MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0))
            .execute()
            .unwrap()
    }

    #[test]
    fn closed_box_passes() {
        ValidateClosed::new(&unit_box()).execute().unwrap();
    }

    #[test]
    fn open_box_is_non_manifold() {
        let mut mesh = unit_box();
        // Drop the +z face.
        mesh.triangles.truncate(10);
        let err = ValidateClosed::new(&mesh).execute().unwrap_err();
        match err {
            MeshgrainError::Mesh(MeshError::NonManifold {
                boundary_edges,
                overshared_edges,
            }) => {
                assert_eq!(boundary_edges, 4);
                assert_eq!(overshared_edges, 0);
            }
            other => panic!("expected NonManifold, got {other:?}"),
        }
    }

    #[test]
    fn flipped_face_is_inconsistent() {
        let mut mesh = unit_box();
        mesh.triangles[0].vertices.swap(1, 2);
        mesh.triangles[1].vertices.swap(1, 2);
        let err = ValidateClosed::new(&mesh).execute().unwrap_err();
        assert!(matches!(
            err,
            MeshgrainError::Mesh(MeshError::InconsistentWinding { edges: 4 })
        ));
    }

    #[test]
    fn fin_triangle_is_overshared() {
        let mut mesh = unit_box();
        let tri = mesh.triangles[0];
        mesh.triangles.push(Triangle::new(
            tri.vertices[0],
            tri.vertices[2],
            p(-1.0, 0.5, 0.5),
        ));
        let err = ValidateClosed::new(&mesh).execute().unwrap_err();
        assert!(matches!(
            err,
            MeshgrainError::Mesh(MeshError::NonManifold {
                overshared_edges: 1,
                ..
            })
        ));
    }

    #[test]
    fn negative_zero_welds_with_zero() {
        assert_eq!(weld_key(&p(-0.0, 0.0, 1.0)), weld_key(&p(0.0, -0.0, 1.0)));
    }
}
