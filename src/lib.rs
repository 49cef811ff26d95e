//! Turns closed triangle meshes into particles for particle-based rigid
//! bodies.
//!
//! A [`RigidBody`] owns a mesh and its initial placement. Sampling lays a
//! regular lattice over the transformed mesh's bounding box, keeps the cell
//! centers inside the mesh (parity ray test), and emits one [`Particle`] per
//! kept cell carrying the body's phase, mass and initial velocity.

pub mod body;
pub mod error;
pub mod math;
pub mod mesh;
pub mod operations;
pub mod particle;
pub mod sampling;
pub mod transform;

pub use body::{BodyId, RigidBody, RigidBodyConfig, RigidBodySet};
pub use error::{MeshgrainError, Result};
pub use particle::{Particle, ParticleKind};
pub use sampling::{GridSpec, MassModel, SampleMode};
pub use transform::Transform;
