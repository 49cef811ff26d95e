//! Lattice sampling of a mesh volume and conversion of samples to particles.

mod grid_sampler;
mod grid_spec;
mod particle_factory;

pub use grid_sampler::{GridSampler, Sample, SampleMode, SampleSet, DEFAULT_CELL_LIMIT};
pub use grid_spec::{GridLayout, GridSpec};
pub use particle_factory::{MassModel, ParticleFactory};
