use crate::math::Vector3;
use crate::particle::Particle;

use super::SampleSet;

/// How particle mass is derived from the samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MassModel {
    /// Each sample weighs `density * h^3`.
    Density(f64),
    /// The body weighs this much in total, split evenly across samples.
    TotalMass(f64),
}

impl Default for MassModel {
    fn default() -> Self {
        Self::Density(1.0)
    }
}

/// Turns accepted samples into particles of one body.
///
/// A pure mapping: every sample becomes exactly one particle carrying the
/// body's phase and initial velocity, with mass from the [`MassModel`]
/// multiplied by the mass scale.
#[derive(Debug, Clone, Copy)]
pub struct ParticleFactory {
    phase: i32,
    velocity: Vector3,
    mass_scale: f64,
    mass_model: MassModel,
}

impl ParticleFactory {
    /// Creates a new `ParticleFactory` with unit mass scale and unit density.
    #[must_use]
    pub fn new(phase: i32, velocity: Vector3) -> Self {
        Self {
            phase,
            velocity,
            mass_scale: 1.0,
            mass_model: MassModel::default(),
        }
    }

    #[must_use]
    pub fn with_mass_scale(mut self, mass_scale: f64) -> Self {
        self.mass_scale = mass_scale;
        self
    }

    #[must_use]
    pub fn with_mass_model(mut self, mass_model: MassModel) -> Self {
        self.mass_model = mass_model;
        self
    }

    /// Mass of each particle for a given sample set.
    #[must_use]
    pub fn mass_per_sample(&self, set: &SampleSet) -> f64 {
        let base = match self.mass_model {
            MassModel::Density(density) => density * set.layout.cell_volume(),
            #[allow(clippy::cast_precision_loss)]
            MassModel::TotalMass(total) if !set.is_empty() => total / set.len() as f64,
            MassModel::TotalMass(_) => 0.0,
        };
        base * self.mass_scale
    }

    /// Builds one particle per sample, in sample order.
    #[must_use]
    pub fn execute(&self, set: &SampleSet) -> Vec<Particle> {
        let mass = self.mass_per_sample(set);
        set.samples
            .iter()
            .map(|s| Particle {
                position: s.position,
                velocity: self.velocity,
                mass,
                phase: self.phase,
                kind: s.kind,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::particle::ParticleKind;
    use crate::sampling::{GridLayout, Sample};
    use approx::assert_relative_eq;

    fn set_of(n: usize, cell_size: f64) -> SampleSet {
        let layout = GridLayout {
            origin: Point3::origin(),
            cell_size,
            dims: [n, 1, 1],
        };
        let samples = (0..n)
            .map(|i| Sample {
                position: layout.cell_center([i, 0, 0]),
                cell: [i, 0, 0],
                kind: ParticleKind::Interior,
            })
            .collect();
        SampleSet { layout, samples }
    }

    #[test]
    fn phase_and_velocity_are_copied() {
        let v = Vector3::new(1.0, 0.0, 0.0);
        let particles = ParticleFactory::new(7, v).execute(&set_of(5, 0.5));
        assert_eq!(particles.len(), 5);
        assert!(particles.iter().all(|p| p.phase == 7 && p.velocity == v));
    }

    #[test]
    fn density_mass_scales_with_cell_volume() {
        let particles = ParticleFactory::new(0, Vector3::zeros())
            .with_mass_model(MassModel::Density(2.0))
            .with_mass_scale(3.0)
            .execute(&set_of(4, 0.5));
        for p in &particles {
            assert_relative_eq!(p.mass, 2.0 * 0.125 * 3.0);
            assert_relative_eq!(p.inv_mass(), 1.0 / 0.75);
        }
    }

    #[test]
    fn total_mass_is_split_evenly() {
        let particles = ParticleFactory::new(0, Vector3::zeros())
            .with_mass_model(MassModel::TotalMass(10.0))
            .execute(&set_of(4, 0.5));
        let total: f64 = particles.iter().map(|p| p.mass).sum();
        assert_relative_eq!(total, 10.0);
    }

    #[test]
    fn empty_set_yields_no_particles() {
        let factory =
            ParticleFactory::new(1, Vector3::zeros()).with_mass_model(MassModel::TotalMass(1.0));
        let set = set_of(0, 1.0);
        assert_eq!(factory.mass_per_sample(&set), 0.0);
        assert!(factory.execute(&set).is_empty());
    }
}
