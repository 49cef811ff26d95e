#[cfg(feature = "parallel")]
use rayon::prelude::*;
use slotmap::SlotMap;
use tracing::debug;

use crate::error::Result;
use crate::particle::Particle;
use crate::sampling::GridSpec;

use super::RigidBody;

slotmap::new_key_type! {
    /// Unique identifier for a body in a [`RigidBodySet`].
    pub struct BodyId;
}

/// Arena of independent rigid bodies.
///
/// Bodies share nothing mutable, so [`RigidBodySet::sample_all`] samples
/// them concurrently when the `parallel` feature is on.
#[derive(Debug, Default)]
pub struct RigidBodySet {
    bodies: SlotMap<BodyId, RigidBody>,
}

impl RigidBodySet {
    /// Creates a new, empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a body and returns its ID.
    pub fn insert(&mut self, body: RigidBody) -> BodyId {
        self.bodies.insert(body)
    }

    pub fn remove(&mut self, id: BodyId) -> Option<RigidBody> {
        self.bodies.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &RigidBody)> {
        self.bodies.iter()
    }

    /// Samples every body with the same grid spec.
    ///
    /// Returns the particle count or the error of each body. A failing body
    /// keeps its previous particles and does not affect the others.
    pub fn sample_all(&mut self, spec: GridSpec) -> Vec<(BodyId, Result<usize>)> {
        let entries: Vec<(BodyId, &mut RigidBody)> = self.bodies.iter_mut().collect();

        #[cfg(feature = "parallel")]
        let results: Vec<(BodyId, Result<usize>)> = entries
            .into_par_iter()
            .map(|(id, body)| (id, body.sample(spec).map(<[Particle]>::len)))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<(BodyId, Result<usize>)> = entries
            .into_iter()
            .map(|(id, body)| (id, body.sample(spec).map(<[Particle]>::len)))
            .collect();

        debug!(
            bodies = results.len(),
            failed = results.iter().filter(|(_, r)| r.is_err()).count(),
            "sampled body set"
        );
        results
    }

    /// Snapshot of every body's particles, body by body.
    #[must_use]
    pub fn particles(&self) -> Vec<Particle> {
        self.bodies
            .values()
            .flat_map(|body| body.particles().iter().copied())
            .collect()
    }
}
