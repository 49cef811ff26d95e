use crate::error::GridSpecError;
use crate::math::{Point3, Vector3};
use crate::operations::query::Aabb;

/// Relative slack applied before rounding cell counts up, so an extent that
/// is a whole multiple of the cell size does not gain a cell from round-off.
const COUNT_SLACK: f64 = 1e-9;

/// How the sampling lattice spacing is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridSpec {
    /// Number of cells along the longest bounding-box axis.
    ByResolution(i32),
    /// Explicit cell edge length.
    ByCellSize(f64),
}

impl GridSpec {
    /// Resolves the spec against `bounds` into a concrete lattice.
    ///
    /// Per-axis counts are `ceil(extent / h)`, at least 1. The lattice is
    /// centered on the box, so an axis shorter than one cell is sampled at
    /// its midpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GridSpecError::NonPositiveResolution`] or
    /// [`GridSpecError::NonPositiveCellSize`] for unusable specs, and
    /// [`GridSpecError::TooManyCells`] if the lattice would exceed
    /// `cell_limit` candidates.
    pub fn resolve(&self, bounds: &Aabb, cell_limit: usize) -> Result<GridLayout, GridSpecError> {
        let cell_size = match *self {
            Self::ByResolution(r) if r <= 0 => {
                return Err(GridSpecError::NonPositiveResolution(r));
            }
            Self::ByResolution(r) => bounds.max_extent() / f64::from(r),
            Self::ByCellSize(h) if !(h.is_finite() && h > 0.0) => {
                return Err(GridSpecError::NonPositiveCellSize(h));
            }
            Self::ByCellSize(h) => h,
        };

        let extents = bounds.extents();
        let counts = extents.map(|e| (e / cell_size - COUNT_SLACK).ceil().max(1.0));
        // Float-to-int casts saturate, so a runaway count shows up as an
        // overflowing product below.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let dims = [counts.x as usize, counts.y as usize, counts.z as usize];
        let total = dims
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .filter(|&total| total <= cell_limit);
        if total.is_none() {
            return Err(GridSpecError::TooManyCells {
                requested: counts.x * counts.y * counts.z,
                limit: cell_limit,
            });
        }

        let span = counts * cell_size;
        let origin = bounds.center() - span * 0.5;

        Ok(GridLayout {
            origin,
            cell_size,
            dims,
        })
    }
}

/// A resolved sampling lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Minimum corner of cell `[0, 0, 0]`.
    pub origin: Point3,
    /// Cell edge length `h`.
    pub cell_size: f64,
    /// Cell counts along x, y and z.
    pub dims: [usize; 3],
}

impl GridLayout {
    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Volume of one cell, `h^3`.
    #[must_use]
    pub fn cell_volume(&self) -> f64 {
        self.cell_size.powi(3)
    }

    /// Splits a scan index into `[ix, iy, iz]`. `z` varies fastest.
    #[must_use]
    pub fn cell_of(&self, index: usize) -> [usize; 3] {
        let [_, ny, nz] = self.dims;
        [index / (ny * nz), (index / nz) % ny, index % nz]
    }

    /// Center of cell `[ix, iy, iz]`: `origin + (i + 0.5) * h`.
    #[must_use]
    pub fn cell_center(&self, cell: [usize; 3]) -> Point3 {
        #[allow(clippy::cast_precision_loss)]
        let offset = Vector3::new(cell[0] as f64, cell[1] as f64, cell[2] as f64)
            .add_scalar(0.5)
            * self.cell_size;
        self.origin + offset
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const LIMIT: usize = 1 << 24;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn bounds(min: Point3, max: Point3) -> Aabb {
        Aabb { min, max }
    }

    #[test]
    fn resolution_divides_longest_axis() {
        let b = bounds(p(0.0, 0.0, 0.0), p(4.0, 2.0, 1.0));
        let layout = GridSpec::ByResolution(8).resolve(&b, LIMIT).unwrap();
        assert_relative_eq!(layout.cell_size, 0.5);
        assert_eq!(layout.dims, [8, 4, 2]);
        assert_eq!(layout.origin, p(0.0, 0.0, 0.0));
    }

    #[test]
    fn cell_size_rounds_counts_up_and_centers() {
        let b = bounds(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        let layout = GridSpec::ByCellSize(0.3).resolve(&b, LIMIT).unwrap();
        assert_eq!(layout.dims, [4, 4, 4]);
        // 4 * 0.3 = 1.2 overhangs the unit box by 0.1 on each side.
        assert_relative_eq!(layout.origin, p(-0.1, -0.1, -0.1), epsilon = 1e-12);
    }

    #[test]
    fn exact_multiple_gains_no_cell() {
        let b = bounds(p(-0.5, -0.5, -0.5), p(0.5, 0.5, 0.5));
        let layout = GridSpec::ByCellSize(0.1).resolve(&b, LIMIT).unwrap();
        assert_eq!(layout.dims, [10, 10, 10]);
    }

    #[test]
    fn oversized_cell_samples_box_center() {
        let b = bounds(p(1.0, 2.0, 3.0), p(2.0, 4.0, 3.5));
        let layout = GridSpec::ByCellSize(10.0).resolve(&b, LIMIT).unwrap();
        assert_eq!(layout.dims, [1, 1, 1]);
        assert_relative_eq!(layout.cell_center([0, 0, 0]), b.center(), epsilon = 1e-12);
    }

    #[test]
    fn resolution_one_is_a_single_cell_on_longest_axis() {
        let b = bounds(p(0.0, 0.0, 0.0), p(3.0, 1.0, 1.0));
        let layout = GridSpec::ByResolution(1).resolve(&b, LIMIT).unwrap();
        assert_eq!(layout.dims, [1, 1, 1]);
        assert_relative_eq!(layout.cell_size, 3.0);
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let b = bounds(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        assert!(matches!(
            GridSpec::ByResolution(0).resolve(&b, LIMIT),
            Err(GridSpecError::NonPositiveResolution(0))
        ));
        assert!(matches!(
            GridSpec::ByResolution(-3).resolve(&b, LIMIT),
            Err(GridSpecError::NonPositiveResolution(-3))
        ));
        assert!(matches!(
            GridSpec::ByCellSize(-0.1).resolve(&b, LIMIT),
            Err(GridSpecError::NonPositiveCellSize(_))
        ));
        assert!(GridSpec::ByCellSize(f64::NAN).resolve(&b, LIMIT).is_err());
        assert!(GridSpec::ByCellSize(0.0).resolve(&b, LIMIT).is_err());
    }

    #[test]
    fn runaway_lattice_is_rejected() {
        let b = bounds(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        let err = GridSpec::ByCellSize(1e-4).resolve(&b, LIMIT).unwrap_err();
        assert!(matches!(err, GridSpecError::TooManyCells { limit: LIMIT, .. }));
    }

    #[test]
    fn unbounded_limit_still_rejects_overflowing_lattice() {
        let b = bounds(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        let err = GridSpec::ByCellSize(1e-7).resolve(&b, usize::MAX).unwrap_err();
        assert!(matches!(
            err,
            GridSpecError::TooManyCells {
                limit: usize::MAX,
                ..
            }
        ));
    }

    #[test]
    fn lattice_at_the_limit_is_accepted() {
        let b = bounds(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0));
        let layout = GridSpec::ByResolution(4).resolve(&b, 64).unwrap();
        assert_eq!(layout.cell_count(), 64);
        assert!(GridSpec::ByResolution(4).resolve(&b, 63).is_err());
    }

    #[test]
    fn scan_index_round_trip() {
        let layout = GridLayout {
            origin: p(0.0, 0.0, 0.0),
            cell_size: 1.0,
            dims: [2, 3, 4],
        };
        assert_eq!(layout.cell_count(), 24);
        assert_eq!(layout.cell_of(0), [0, 0, 0]);
        assert_eq!(layout.cell_of(1), [0, 0, 1]);
        assert_eq!(layout.cell_of(4), [0, 1, 0]);
        assert_eq!(layout.cell_of(23), [1, 2, 3]);
        assert_eq!(layout.cell_center([1, 2, 3]), p(1.5, 2.5, 3.5));
    }
}
