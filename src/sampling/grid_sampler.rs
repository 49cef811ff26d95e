#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::Result;
use crate::math::distance_3d::{closest_point_on_triangle, point_triangle_distance};
use crate::math::Point3;
use crate::mesh::Mesh;
use crate::operations::query::{classify_point_in_mesh, Aabb, PointClassification, ValidateClosed};
use crate::particle::ParticleKind;

use super::{GridLayout, GridSpec};

/// Default cap on lattice candidates per sampling pass.
pub const DEFAULT_CELL_LIMIT: usize = 64 * 64 * 64 * 8;

/// Which lattice cells become samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SampleMode {
    /// Cells whose center is inside the closed mesh (or on it). Requires a
    /// closed, consistently wound mesh.
    #[default]
    Interior,
    /// Cells whose center lies within half a cell diagonal of the surface,
    /// on either side. Works on open meshes too.
    Surface,
}

/// One accepted lattice cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub position: Point3,
    pub cell: [usize; 3],
    pub kind: ParticleKind,
}

/// Result of a sampling pass: the lattice and its accepted cells in
/// lattice-scan order.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    pub layout: GridLayout,
    pub samples: Vec<Sample>,
}

impl SampleSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Samples the volume (or surface) of a world-space mesh on a regular grid.
///
/// Candidates are the centers of a lattice laid over `bounds`. Each is
/// classified independently; with the `parallel` feature the work is spread
/// over the rayon pool and the accepted samples are still returned in
/// lattice-scan order, so repeated passes are bit-identical.
pub struct GridSampler<'a> {
    mesh: &'a Mesh,
    bounds: &'a Aabb,
    spec: GridSpec,
    mode: SampleMode,
    cell_limit: usize,
}

impl<'a> GridSampler<'a> {
    /// Creates a new `GridSampler` in [`SampleMode::Interior`].
    #[must_use]
    pub fn new(mesh: &'a Mesh, bounds: &'a Aabb, spec: GridSpec) -> Self {
        Self {
            mesh,
            bounds,
            spec,
            mode: SampleMode::default(),
            cell_limit: DEFAULT_CELL_LIMIT,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: SampleMode) -> Self {
        self.mode = mode;
        self
    }

    /// Caps the number of lattice candidates.
    #[must_use]
    pub fn with_cell_limit(mut self, cell_limit: usize) -> Self {
        self.cell_limit = cell_limit;
        self
    }

    /// Executes the sampling pass.
    ///
    /// # Errors
    ///
    /// Returns a grid-spec error if the spec cannot be resolved, and a mesh
    /// error if the mesh is empty, open or non-manifold (interior mode), or a
    /// candidate cannot be classified.
    pub fn execute(&self) -> Result<SampleSet> {
        let layout = self.spec.resolve(self.bounds, self.cell_limit)?;
        debug!(
            cell_size = layout.cell_size,
            dims = ?layout.dims,
            mode = ?self.mode,
            "resolved sampling lattice"
        );
        if layout.cell_count() == 1 {
            warn!(
                cell_size = layout.cell_size,
                "lattice degenerates to a single sample at the box center"
            );
        }

        if self.mode == SampleMode::Interior {
            ValidateClosed::new(self.mesh).execute()?;
        }

        let triangles: Vec<[Point3; 3]> = self.mesh.triangles.iter().map(|t| t.vertices).collect();
        let band = layout.cell_size * 3.0_f64.sqrt() * 0.5;
        let reach: Vec<Aabb> = triangles.iter().map(triangle_bounds).collect();
        let classifier = CellClassifier {
            layout: &layout,
            triangles: &triangles,
            reach: &reach,
            mode: self.mode,
            band,
        };

        #[cfg(feature = "parallel")]
        let cells = (0..layout.cell_count())
            .into_par_iter()
            .map(|index| classifier.classify(index))
            .collect::<Result<Vec<_>>>()?;
        #[cfg(not(feature = "parallel"))]
        let cells = (0..layout.cell_count())
            .map(|index| classifier.classify(index))
            .collect::<Result<Vec<_>>>()?;

        let mut samples: Vec<Sample> = cells.into_iter().flatten().collect();
        if samples.is_empty() && layout.cell_count() == 1 {
            let position = nearest_surface_point(&layout.cell_center([0, 0, 0]), &triangles);
            warn!(?position, "single cell center is outside the mesh, using nearest surface point");
            samples.push(Sample {
                position,
                cell: [0, 0, 0],
                kind: ParticleKind::Surface,
            });
        }
        debug!(
            candidates = layout.cell_count(),
            accepted = samples.len(),
            "classified lattice"
        );

        Ok(SampleSet { layout, samples })
    }
}

struct CellClassifier<'a> {
    layout: &'a GridLayout,
    triangles: &'a [[Point3; 3]],
    /// Per-triangle bounds; a center outside `reach[i]` padded by `band`
    /// cannot be within `band` of triangle `i`.
    reach: &'a [Aabb],
    mode: SampleMode,
    /// Half a cell diagonal; centers closer than this to the surface belong
    /// to cells the surface passes through.
    band: f64,
}

impl CellClassifier<'_> {
    fn classify(&self, index: usize) -> Result<Option<Sample>> {
        let cell = self.layout.cell_of(index);
        let position = self.layout.cell_center(cell);

        let kind = match self.mode {
            SampleMode::Interior => {
                if classify_point_in_mesh(&position, self.triangles)?
                    == PointClassification::Outside
                {
                    return Ok(None);
                }
                if self.near_surface(&position) {
                    ParticleKind::Surface
                } else {
                    ParticleKind::Interior
                }
            }
            SampleMode::Surface => {
                if !self.near_surface(&position) {
                    return Ok(None);
                }
                ParticleKind::Surface
            }
        };

        Ok(Some(Sample {
            position,
            cell,
            kind,
        }))
    }

    fn near_surface(&self, point: &Point3) -> bool {
        self.triangles
            .iter()
            .zip(self.reach)
            .filter(|(_, bounds)| bounds.contains(point, self.band))
            .any(|(tri, _)| point_triangle_distance(point, tri) <= self.band)
    }
}

fn triangle_bounds(tri: &[Point3; 3]) -> Aabb {
    Aabb {
        min: tri[0].inf(&tri[1]).inf(&tri[2]),
        max: tri[0].sup(&tri[1]).sup(&tri[2]),
    }
}

/// Closest surface point to `point`. Ties go to the earliest triangle.
fn nearest_surface_point(point: &Point3, triangles: &[[Point3; 3]]) -> Point3 {
    let mut best = *point;
    let mut best_distance = f64::INFINITY;
    for tri in triangles {
        let candidate = closest_point_on_triangle(point, tri);
        let distance = nalgebra::distance_squared(point, &candidate);
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}
