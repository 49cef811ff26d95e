use std::path::Path;

use crate::error::LoadError;

use super::Mesh;

/// Source of mesh geometry, typically a file-format parser.
///
/// Implementations must return [`LoadError::FileNotFound`] for missing files
/// so callers can tell absent assets from malformed ones.
pub trait MeshLoader {
    /// Loads the mesh stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the file is missing, unreadable, or holds
    /// no usable triangles.
    fn load(&self, path: &Path) -> Result<Mesh, LoadError>;
}

impl<F> MeshLoader for F
where
    F: Fn(&Path) -> Result<Mesh, LoadError>,
{
    fn load(&self, path: &Path) -> Result<Mesh, LoadError> {
        self(path)
    }
}
