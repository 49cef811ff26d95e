use crate::math::{Point3, Vector3};

/// Where a sample sits relative to the body's surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// The sample's cell lies wholly inside the volume.
    Interior,
    /// The sample's cell touches the surface.
    Surface,
}

/// A single simulation particle produced from a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// World-space position.
    pub position: Point3,
    /// Initial velocity, shared by every particle of a body.
    pub velocity: Vector3,
    pub mass: f64,
    /// Group id of the owning body; particles with equal phase do not collide.
    pub phase: i32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Reciprocal mass, `0.0` for massless (static) particles.
    #[must_use]
    pub fn inv_mass(&self) -> f64 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }
}
