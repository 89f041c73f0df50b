use crate::{EulerRot, Mat4, Quat, Vec3};

/// Rigid transform with uniform or non-uniform scale (Euler XYZ).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians (XYZ order).
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
            scale,
        }
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        )
    }

    /// Build matrix = T * R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.translation)
    }

    /// Post-multiply by a translation, i.e. move along the object's own axes.
    pub fn then_translate(mut self, offset: Vec3) -> Self {
        self.translation += self.rotation() * (self.scale * offset);
        self
    }

    /// Post-multiply by a rotation of `angle_rad` around `axis` (object space).
    ///
    /// Only exact for uniform scale, which is all the scene uses.
    pub fn then_rotate(mut self, axis: Vec3, angle_rad: f32) -> Self {
        let q = self.rotation() * Quat::from_axis_angle(axis.normalize(), angle_rad);
        let (x, y, z) = q.to_euler(EulerRot::XYZ);
        self.rotation_euler = Vec3::new(x, y, z);
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn chained_ops_match_matrix_product() {
        let t = Transform::identity()
            .then_translate(vec3(5.3, 0.0, 0.0))
            .then_translate(vec3(0.0, 0.0, -12.0))
            .then_rotate(Vec3::Y, 180f32.to_radians());
        let expected = Mat4::from_translation(vec3(5.3, 0.0, 0.0))
            * Mat4::from_translation(vec3(0.0, 0.0, -12.0))
            * Mat4::from_rotation_y(180f32.to_radians());
        assert!(t.matrix().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn translate_after_rotate_uses_rotated_axes() {
        let t = Transform::identity()
            .then_rotate(Vec3::X, -FRAC_PI_2)
            .then_translate(vec3(0.0, 0.0, 0.5));
        assert!(t.translation.abs_diff_eq(vec3(0.0, 0.5, 0.0), 1e-6));
    }
}
