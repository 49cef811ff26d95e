//! Rigid bodies: the aggregate that owns a mesh, its placement, and the
//! particles sampled from it.

mod config;
mod rigid_body;
mod set;

pub use config::RigidBodyConfig;
pub use rigid_body::RigidBody;
pub use set::{BodyId, RigidBodySet};
