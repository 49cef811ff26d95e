use std::sync::OnceLock;

use crate::math::{Matrix3, Matrix4, Point3, Vector3};

/// Initial placement of a body: scale, then rotate, then translate.
///
/// The combined 4x4 matrix is cached on first use and dropped by every
/// setter, so it is rebuilt lazily on the next query. Non-uniform scale is
/// composed with the rotation as a matrix product, never factored.
#[derive(Debug, Clone)]
pub struct Transform {
    scale: Vector3,
    rotation: Matrix3,
    translation: Vector3,
    combined: OnceLock<Matrix4>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
            combined: OnceLock::new(),
        }
    }
}

impl Transform {
    /// Creates the identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-axis scale.
    #[must_use]
    pub fn with_scale(mut self, scale: Vector3) -> Self {
        self.set_scale(scale);
        self
    }

    /// Sets the rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Matrix3) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Sets the translation.
    #[must_use]
    pub fn with_translation(mut self, translation: Vector3) -> Self {
        self.set_translation(translation);
        self
    }

    pub fn set_scale(&mut self, scale: Vector3) {
        self.scale = scale;
        self.combined = OnceLock::new();
    }

    /// Sets the orientation. The matrix is used as given; it is not
    /// re-orthonormalized.
    pub fn set_rotation(&mut self, rotation: Matrix3) {
        self.rotation = rotation;
        self.combined = OnceLock::new();
    }

    pub fn set_translation(&mut self, translation: Vector3) {
        self.translation = translation;
        self.combined = OnceLock::new();
    }

    #[must_use]
    pub fn scale(&self) -> &Vector3 {
        &self.scale
    }

    #[must_use]
    pub fn rotation(&self) -> &Matrix3 {
        &self.rotation
    }

    #[must_use]
    pub fn translation(&self) -> &Vector3 {
        &self.translation
    }

    /// Returns the combined object-to-world matrix `T * R * S`.
    #[must_use]
    pub fn matrix(&self) -> Matrix4 {
        *self.combined.get_or_init(|| {
            let linear = self.rotation * Matrix3::from_diagonal(&self.scale);
            let mut m = linear.to_homogeneous();
            m.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
            m
        })
    }

    /// Maps an object-space point to world space.
    #[must_use]
    pub fn transform_point(&self, point: &Point3) -> Point3 {
        let m = self.matrix();
        let v = m * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn quarter_turn_z() -> Matrix3 {
        *nalgebra::Rotation3::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2).matrix()
    }

    #[test]
    fn default_is_identity() {
        let t = Transform::new();
        assert_eq!(t.matrix(), Matrix4::identity());
        assert_eq!(t.transform_point(&p(1.0, -2.0, 3.0)), p(1.0, -2.0, 3.0));
    }

    #[test]
    fn applies_scale_then_rotate_then_translate() {
        let t = Transform::new()
            .with_scale(Vector3::new(2.0, 1.0, 1.0))
            .with_rotation(quarter_turn_z())
            .with_translation(Vector3::new(0.0, 0.0, 5.0));

        // (1,0,0) -> scale (2,0,0) -> rotate (0,2,0) -> translate (0,2,5)
        let q = t.transform_point(&p(1.0, 0.0, 0.0));
        assert_relative_eq!(q, p(0.0, 2.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn setter_invalidates_cached_matrix() {
        let mut t = Transform::new();
        assert_eq!(t.matrix(), Matrix4::identity());

        t.set_translation(Vector3::new(1.0, 2.0, 3.0));
        let q = t.transform_point(&p(0.0, 0.0, 0.0));
        assert_relative_eq!(q, p(1.0, 2.0, 3.0));

        t.set_scale(Vector3::new(3.0, 3.0, 3.0));
        let q = t.transform_point(&p(1.0, 1.0, 1.0));
        assert_relative_eq!(q, p(4.0, 5.0, 6.0));
    }
}
