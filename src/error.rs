use std::path::PathBuf;

use thiserror::Error;

use crate::math::Point3;

/// Top-level error type for mesh sampling.
#[derive(Debug, Error)]
pub enum MeshgrainError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error(transparent)]
    GridSpec(#[from] GridSpecError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// The mesh cannot be sampled.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("no mesh loaded")]
    NotLoaded,

    #[error("mesh has no triangles")]
    Empty,

    #[error("invalid primitive: {0}")]
    InvalidPrimitive(String),

    #[error("mesh contains a non-finite vertex")]
    NonFiniteVertex,

    #[error("bounding box has zero extent along the {axis} axis")]
    ZeroExtent { axis: char },

    #[error(
        "mesh is not closed: {boundary_edges} boundary edge(s), {overshared_edges} edge(s) shared by more than two triangles"
    )]
    NonManifold {
        boundary_edges: usize,
        overshared_edges: usize,
    },

    #[error("mesh winding is inconsistent on {edges} edge(s)")]
    InconsistentWinding { edges: usize },

    #[error("inside/outside classification is ambiguous at {point}")]
    AmbiguousClassification { point: Point3 },
}

/// The requested sampling grid is unusable.
#[derive(Debug, Error)]
pub enum GridSpecError {
    #[error("resolution must be positive, got {0}")]
    NonPositiveResolution(i32),

    #[error("cell size must be positive and finite, got {0}")]
    NonPositiveCellSize(f64),

    #[error("lattice of {requested:.0} cells exceeds the limit of {limit}")]
    TooManyCells { requested: f64, limit: usize },
}

/// The mesh loader could not produce geometry.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read mesh file")]
    Io(#[from] std::io::Error),

    #[error("failed to parse mesh: {0}")]
    Parse(String),

    #[error("mesh file contains no triangles")]
    NoGeometry,
}

/// Convenience type alias for results using [`MeshgrainError`].
pub type Result<T> = std::result::Result<T, MeshgrainError>;
