use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{MeshError, Result};
use crate::math::{Matrix3, Matrix4, Vector3};
use crate::mesh::{MeshLoader, SharedMesh};
use crate::operations::query::{Aabb, BoundingBox};
use crate::particle::Particle;
use crate::sampling::{GridLayout, GridSampler, GridSpec, MassModel, ParticleFactory, SampleMode};
use crate::transform::Transform;

use super::RigidBodyConfig;

/// A mesh-backed rigid body and the particles sampled from it.
///
/// Lifecycle: construct, load a mesh, optionally compute the bounding box,
/// then sample. Sampling again replaces the particle collection as a whole;
/// a failed pass leaves the previous collection in place. All mutators take
/// `&mut self`, so the body cannot change while a pass reads it.
#[derive(Debug, Clone)]
pub struct RigidBody {
    mesh: Option<SharedMesh>,
    transform: Transform,
    mass_scale: f64,
    init_velocity: Vector3,
    phase: i32,
    mass_model: MassModel,
    mode: SampleMode,
    cell_limit: usize,

    bounds: Option<Aabb>,
    grid_spec: Option<GridSpec>,
    layout: Option<GridLayout>,
    particles: Vec<Particle>,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::from_config(RigidBodyConfig::default())
    }
}

impl RigidBody {
    /// Creates an empty body with the identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty body from a configuration.
    #[must_use]
    pub fn from_config(config: RigidBodyConfig) -> Self {
        Self {
            mesh: None,
            transform: Transform::new()
                .with_scale(config.scale)
                .with_rotation(config.rotation)
                .with_translation(config.translation),
            mass_scale: config.mass_scale,
            init_velocity: config.init_velocity,
            phase: config.phase,
            mass_model: config.mass_model,
            mode: config.mode,
            cell_limit: config.cell_limit,
            bounds: None,
            grid_spec: None,
            layout: None,
            particles: Vec::new(),
        }
    }

    /// Attaches a mesh, discarding any previous samples.
    #[must_use]
    pub fn with_mesh(mut self, mesh: impl Into<SharedMesh>) -> Self {
        self.set_mesh(mesh);
        self
    }

    /// Attaches a mesh, discarding any previous samples.
    pub fn set_mesh(&mut self, mesh: impl Into<SharedMesh>) {
        self.mesh = Some(mesh.into());
        self.clear_samples();
    }

    /// Loads the body's mesh through `loader`.
    ///
    /// On failure the body is left with no mesh and no particles, and later
    /// sampling fails with [`MeshError::NotLoaded`].
    ///
    /// # Errors
    ///
    /// Propagates the loader's [`LoadError`](crate::error::LoadError).
    pub fn init_obj<L>(&mut self, loader: &L, path: impl AsRef<Path>) -> Result<()>
    where
        L: MeshLoader + ?Sized,
    {
        let path = path.as_ref();
        match loader.load(path) {
            Ok(mesh) => {
                debug!(path = %path.display(), triangles = mesh.triangles.len(), "loaded mesh");
                self.set_mesh(mesh);
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "mesh load failed");
                self.mesh = None;
                self.clear_samples();
                Err(e.into())
            }
        }
    }

    /// Computes and stores the bounding box of the transformed mesh.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NotLoaded`] without a mesh, or any error of
    /// [`BoundingBox::execute`].
    pub fn init_bounding_box(&mut self) -> Result<Aabb> {
        let mesh = self.mesh.as_ref().ok_or(MeshError::NotLoaded)?;
        let bounds = BoundingBox::new(mesh)
            .with_transform(&self.transform)
            .execute()?;
        self.bounds = Some(bounds);
        Ok(bounds)
    }

    /// Samples with `resolution` cells along the longest box axis.
    ///
    /// # Errors
    ///
    /// See [`RigidBody::sample`].
    pub fn init_particles_by_resolution(&mut self, resolution: i32) -> Result<&[Particle]> {
        self.sample(GridSpec::ByResolution(resolution))
    }

    /// Samples with an explicit cell edge length.
    ///
    /// # Errors
    ///
    /// See [`RigidBody::sample`].
    pub fn init_particles_by_cell_size(&mut self, cell_size: f64) -> Result<&[Particle]> {
        self.sample(GridSpec::ByCellSize(cell_size))
    }

    /// Runs a full sampling pass and replaces the particle collection.
    ///
    /// The mesh is transformed once, bounded, sampled on the lattice given
    /// by `spec`, and the samples are turned into particles. Nothing is
    /// published unless every step succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NotLoaded`] without a mesh, a
    /// [`GridSpecError`](crate::error::GridSpecError) for an unusable spec,
    /// and other [`MeshError`]s for empty, flat, or open meshes.
    pub fn sample(&mut self, spec: GridSpec) -> Result<&[Particle]> {
        let mesh = self.mesh.as_ref().ok_or(MeshError::NotLoaded)?;
        let world = mesh.transformed(&self.transform);
        let bounds = BoundingBox::new(&world).execute()?;

        let set = GridSampler::new(&world, &bounds, spec)
            .with_mode(self.mode)
            .with_cell_limit(self.cell_limit)
            .execute()?;
        let particles = ParticleFactory::new(self.phase, self.init_velocity)
            .with_mass_scale(self.mass_scale)
            .with_mass_model(self.mass_model)
            .execute(&set);

        info!(
            phase = self.phase,
            particles = particles.len(),
            cell_size = set.layout.cell_size,
            "sampled rigid body"
        );

        self.bounds = Some(bounds);
        self.grid_spec = Some(spec);
        self.layout = Some(set.layout);
        self.particles = particles;
        Ok(&self.particles)
    }

    pub fn set_scale(&mut self, scale: Vector3) {
        self.transform.set_scale(scale);
        self.bounds = None;
    }

    pub fn set_translate(&mut self, translation: Vector3) {
        self.transform.set_translation(translation);
        self.bounds = None;
    }

    pub fn set_rotation(&mut self, rotation: Matrix3) {
        self.transform.set_rotation(rotation);
        self.bounds = None;
    }

    pub fn set_mass_scale(&mut self, mass_scale: f64) {
        self.mass_scale = mass_scale;
    }

    pub fn set_init_velocity(&mut self, velocity: Vector3) {
        self.init_velocity = velocity;
    }

    pub fn set_phase(&mut self, phase: i32) {
        self.phase = phase;
    }

    pub fn set_mass_model(&mut self, mass_model: MassModel) {
        self.mass_model = mass_model;
    }

    pub fn set_mode(&mut self, mode: SampleMode) {
        self.mode = mode;
    }

    #[must_use]
    pub fn mesh(&self) -> Option<&SharedMesh> {
        self.mesh.as_ref()
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Combined object-to-world matrix.
    #[must_use]
    pub fn transform_matrix(&self) -> Matrix4 {
        self.transform.matrix()
    }

    /// Bounding box from the last successful bounding or sampling pass,
    /// cleared by transform changes.
    #[must_use]
    pub fn bounding_box(&self) -> Option<&Aabb> {
        self.bounds.as_ref()
    }

    /// Cell edge length of the last successful pass.
    #[must_use]
    pub fn grid_length(&self) -> Option<f64> {
        self.layout.map(|l| l.cell_size)
    }

    /// Lattice cell counts per axis of the last successful pass.
    #[must_use]
    pub fn resolution(&self) -> Option<[usize; 3]> {
        self.layout.map(|l| l.dims)
    }

    /// Grid spec of the last successful pass.
    #[must_use]
    pub fn grid_spec(&self) -> Option<GridSpec> {
        self.grid_spec
    }

    #[must_use]
    pub fn phase(&self) -> i32 {
        self.phase
    }

    #[must_use]
    pub fn mass_scale(&self) -> f64 {
        self.mass_scale
    }

    #[must_use]
    pub fn init_velocity(&self) -> &Vector3 {
        &self.init_velocity
    }

    #[must_use]
    pub fn mode(&self) -> SampleMode {
        self.mode
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Particle positions packed as `[x0, y0, z0, x1, ...]` for upload.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn particle_positions(&self) -> Vec<f32> {
        self.particles
            .iter()
            .flat_map(|p| [p.position.x as f32, p.position.y as f32, p.position.z as f32])
            .collect()
    }

    /// Sum of all particle masses.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass).sum()
    }

    fn clear_samples(&mut self) {
        self.bounds = None;
        self.grid_spec = None;
        self.layout = None;
        self.particles.clear();
    }
}
