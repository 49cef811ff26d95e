use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// Computes the volume enclosed by a closed triangle mesh.
///
/// Uses the signed tetrahedron method. For each triangle, computes
/// `(1/6) * v0 . (v1 x v2)` and sums over all triangles. Outward winding
/// gives a positive sum.
pub struct Volume<'a> {
    mesh: &'a Mesh,
    signed: bool,
}

impl<'a> Volume<'a> {
    /// Creates a new `Volume` query returning the absolute volume.
    #[must_use]
    pub fn new(mesh: &'a Mesh) -> Self {
        Self {
            mesh,
            signed: false,
        }
    }

    /// Returns the signed volume instead, negative for inward winding.
    #[must_use]
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::Empty`] if the mesh has no triangles.
    pub fn execute(&self) -> Result<f64> {
        if self.mesh.is_empty() {
            return Err(MeshError::Empty.into());
        }

        let sum: f64 = self
            .mesh
            .triangles
            .iter()
            .map(|tri| {
                let [v0, v1, v2] = &tri.vertices;
                v0.coords.dot(&v1.coords.cross(&v2.coords))
            })
            .sum();

        let volume = sum / 6.0;
        Ok(if self.signed { volume } else { volume.abs() })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::mesh::Triangle;
    use crate::operations::creation::MakeBox;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_volume() {
        let mesh = MakeBox::new(p(0.0, 0.0, 0.0), p(2.0, 3.0, 4.0))
            .execute()
            .unwrap();
        let volume = Volume::new(&mesh).execute().unwrap();
        assert!((volume - 24.0).abs() < 1e-9, "expected 24.0, got {volume}");
    }

    #[test]
    fn offset_box_volume() {
        let mesh = MakeBox::new(p(1.0, 2.0, 3.0), p(3.0, 5.0, 7.0))
            .execute()
            .unwrap();
        let volume = Volume::new(&mesh).execute().unwrap();
        // 2 * 3 * 4 = 24
        assert!((volume - 24.0).abs() < 1e-9, "expected 24.0, got {volume}");
    }

    #[test]
    fn inverted_winding_gives_negative_signed_volume() {
        let mut mesh = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0))
            .execute()
            .unwrap();
        for tri in &mut mesh.triangles {
            tri.vertices.swap(1, 2);
        }
        let signed = Volume::new(&mesh).signed().execute().unwrap();
        assert!((signed + 1.0).abs() < 1e-9);
        assert!((Volume::new(&mesh).execute().unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tetrahedron_volume() {
        let (a, b, c, d) = (
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(0.0, 1.0, 0.0),
            p(0.0, 0.0, 1.0),
        );
        let mesh = Mesh::new(vec![
            Triangle::new(a, c, b),
            Triangle::new(a, b, d),
            Triangle::new(a, d, c),
            Triangle::new(b, c, d),
        ]);
        let volume = Volume::new(&mesh).signed().execute().unwrap();
        assert!((volume - 1.0 / 6.0).abs() < 1e-12);
    }
}
