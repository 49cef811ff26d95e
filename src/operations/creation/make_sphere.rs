use std::f64::consts::{PI, TAU};

use crate::error::{MeshError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::mesh::{Mesh, Triangle};

/// Creates a closed UV-sphere mesh around the Z axis.
///
/// Every ring vertex is computed once and reused by all triangles touching
/// it, so shared edges match bit for bit.
pub struct MakeSphere {
    center: Point3,
    radius: f64,
    stacks: usize,
    slices: usize,
}

impl MakeSphere {
    /// Creates a new `MakeSphere` operation with 12 stacks and 24 slices.
    #[must_use]
    pub fn new(center: Point3, radius: f64) -> Self {
        Self {
            center,
            radius,
            stacks: 12,
            slices: 24,
        }
    }

    /// Sets the number of latitude bands and longitude segments.
    #[must_use]
    pub fn with_segments(mut self, stacks: usize, slices: usize) -> Self {
        self.stacks = stacks;
        self.slices = slices;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidPrimitive`] if the radius is near zero,
    /// there are fewer than 2 stacks, or fewer than 3 slices.
    pub fn execute(&self) -> Result<Mesh> {
        if self.radius < TOLERANCE {
            return Err(MeshError::InvalidPrimitive("sphere radius must be positive".into()).into());
        }
        if self.stacks < 2 || self.slices < 3 {
            return Err(MeshError::InvalidPrimitive(format!(
                "sphere needs at least 2 stacks and 3 slices, got {}x{}",
                self.stacks, self.slices
            ))
            .into());
        }

        let (stacks, slices) = (self.stacks, self.slices);
        let north = self.center + Vector3::new(0.0, 0.0, self.radius);
        let south = self.center - Vector3::new(0.0, 0.0, self.radius);

        #[allow(clippy::cast_precision_loss)]
        let rings: Vec<Vec<Point3>> = (1..stacks)
            .map(|i| {
                let theta = PI * i as f64 / stacks as f64;
                (0..slices)
                    .map(|j| {
                        let phi = TAU * j as f64 / slices as f64;
                        self.center
                            + Vector3::new(
                                theta.sin() * phi.cos(),
                                theta.sin() * phi.sin(),
                                theta.cos(),
                            ) * self.radius
                    })
                    .collect()
            })
            .collect();

        let mut triangles = Vec::with_capacity(2 * slices * (stacks - 1));

        let top = &rings[0];
        for j in 0..slices {
            triangles.push(Triangle::new(north, top[j], top[(j + 1) % slices]));
        }

        for band in rings.windows(2) {
            let (upper, lower) = (&band[0], &band[1]);
            for j in 0..slices {
                let k = (j + 1) % slices;
                triangles.push(Triangle::new(upper[j], lower[j], lower[k]));
                triangles.push(Triangle::new(upper[j], lower[k], upper[k]));
            }
        }

        let bottom = &rings[rings.len() - 1];
        for j in 0..slices {
            triangles.push(Triangle::new(south, bottom[(j + 1) % slices], bottom[j]));
        }

        Ok(Mesh::new(triangles))
    }
}
