use crate::math::{Matrix3, Vector3};
use crate::sampling::{MassModel, SampleMode, DEFAULT_CELL_LIMIT};

/// Setup parameters for a [`RigidBody`](super::RigidBody).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBodyConfig {
    /// Per-axis scale applied first.
    pub scale: Vector3,
    /// Rotation applied after scaling.
    pub rotation: Matrix3,
    /// Translation applied last.
    pub translation: Vector3,
    /// Multiplier on the mass given by `mass_model`.
    pub mass_scale: f64,
    pub init_velocity: Vector3,
    pub phase: i32,
    pub mass_model: MassModel,
    pub mode: SampleMode,
    /// Maximum lattice candidates per sampling pass.
    pub cell_limit: usize,
}

impl Default for RigidBodyConfig {
    fn default() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
            mass_scale: 1.0,
            init_velocity: Vector3::zeros(),
            phase: 0,
            mass_model: MassModel::default(),
            mode: SampleMode::default(),
            cell_limit: DEFAULT_CELL_LIMIT,
        }
    }
}

impl RigidBodyConfig {
    #[must_use]
    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Matrix3) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_translation(mut self, translation: Vector3) -> Self {
        self.translation = translation;
        self
    }

    #[must_use]
    pub fn with_mass_scale(mut self, mass_scale: f64) -> Self {
        self.mass_scale = mass_scale;
        self
    }

    #[must_use]
    pub fn with_init_velocity(mut self, init_velocity: Vector3) -> Self {
        self.init_velocity = init_velocity;
        self
    }

    #[must_use]
    pub fn with_phase(mut self, phase: i32) -> Self {
        self.phase = phase;
        self
    }

    #[must_use]
    pub fn with_mass_model(mut self, mass_model: MassModel) -> Self {
        self.mass_model = mass_model;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: SampleMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_cell_limit(mut self, cell_limit: usize) -> Self {
        self.cell_limit = cell_limit;
        self
    }
}
