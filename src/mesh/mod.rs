//! Passive triangle geometry handed to the sampler by a mesh loader.

mod loader;
#[cfg(feature = "wavefront")]
mod wavefront;

pub use loader::MeshLoader;
#[cfg(feature = "wavefront")]
pub use wavefront::ObjLoader;

use std::sync::Arc;

use crate::math::Point3;
use crate::transform::Transform;

/// A mesh that several bodies may sample from without copying.
pub type SharedMesh = Arc<Mesh>;

/// A single triangle given by its three vertex positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex positions, wound counter-clockwise when seen from outside.
    pub vertices: [Point3; 3],
    /// Index into [`Mesh::materials`], if the triangle has one.
    pub material: Option<usize>,
}

impl Triangle {
    /// Creates a triangle without a material.
    #[must_use]
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Self {
            vertices: [a, b, c],
            material: None,
        }
    }

    /// Assigns a material index.
    #[must_use]
    pub fn with_material(mut self, material: usize) -> Self {
        self.material = Some(material);
        self
    }
}

/// A named surface material referenced by triangles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub name: String,
}

/// Triangle soup plus the materials its triangles reference.
///
/// Immutable once built; the sampler only ever reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    pub materials: Vec<Material>,
}

impl Mesh {
    /// Creates a mesh from triangles with no materials.
    #[must_use]
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            materials: Vec::new(),
        }
    }

    /// Attaches a material table.
    #[must_use]
    pub fn with_materials(mut self, materials: Vec<Material>) -> Self {
        self.materials = materials;
        self
    }

    /// Returns `true` if the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns a copy with every vertex mapped through `transform`.
    #[must_use]
    pub fn transformed(&self, transform: &Transform) -> Mesh {
        let triangles = self
            .triangles
            .iter()
            .map(|t| Triangle {
                vertices: t.vertices.map(|v| transform.transform_point(&v)),
                material: t.material,
            })
            .collect();
        Mesh {
            triangles,
            materials: self.materials.clone(),
        }
    }

    /// Iterates over every vertex of every triangle (shared vertices repeat).
    pub fn vertices(&self) -> impl Iterator<Item = &Point3> {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }
}
