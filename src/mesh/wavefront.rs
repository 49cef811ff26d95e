use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use obj::{ObjData, ObjMaterial};

use crate::error::LoadError;
use crate::math::Point3;

use super::{Material, Mesh, MeshLoader, Triangle};

/// Loads Wavefront (`.obj`) files.
///
/// Polygons with more than three corners are fan-triangulated. Each `usemtl`
/// name becomes one [`Material`]; material libraries are not resolved.
///
/// This loader is enabled by the `wavefront` feature flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoader;

impl ObjLoader {
    /// Creates a new `ObjLoader`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parses OBJ text from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] on malformed input or out-of-range vertex
    /// indices, and [`LoadError::NoGeometry`] if no face is present.
    pub fn parse<R: Read>(&self, input: R) -> Result<Mesh, LoadError> {
        let data = ObjData::load_buf(BufReader::new(input))
            .map_err(|e| LoadError::Parse(e.to_string()))?;
        build_mesh(&data)
    }
}

impl MeshLoader for ObjLoader {
    fn load(&self, path: &Path) -> Result<Mesh, LoadError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
            _ => LoadError::Io(e),
        })?;
        self.parse(file)
    }
}

fn build_mesh(data: &ObjData) -> Result<Mesh, LoadError> {
    let positions: Vec<Point3> = data
        .position
        .iter()
        .map(|p| Point3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2])))
        .collect();

    let mut materials: Vec<Material> = Vec::new();
    let mut triangles = Vec::new();

    for object in &data.objects {
        for group in &object.groups {
            let material = group.material.as_ref().map(|m| {
                let name = match m {
                    ObjMaterial::Ref(name) => name.clone(),
                    ObjMaterial::Mtl(mtl) => mtl.name.clone(),
                };
                material_index(&mut materials, name)
            });

            for poly in &group.polys {
                let corners = poly
                    .0
                    .iter()
                    .map(|tuple| {
                        positions.get(tuple.0).copied().ok_or_else(|| {
                            LoadError::Parse(format!("vertex index {} out of range", tuple.0 + 1))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                for i in 1..corners.len().saturating_sub(1) {
                    triangles.push(Triangle {
                        vertices: [corners[0], corners[i], corners[i + 1]],
                        material,
                    });
                }
            }
        }
    }

    if triangles.is_empty() {
        return Err(LoadError::NoGeometry);
    }

    Ok(Mesh {
        triangles,
        materials,
    })
}

fn material_index(materials: &mut Vec<Material>, name: String) -> usize {
    if let Some(i) = materials.iter().position(|m| m.name == name) {
        return i;
    }
    materials.push(Material { name });
    materials.len() - 1
}
