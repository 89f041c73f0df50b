use std::f32::consts::{FRAC_PI_2, PI};

use crate::{CoreError, CoreResult, Mat4, Vec3};

/// Simple perspective camera (right-handed).
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    #[allow(clippy::too_many_arguments)]
    pub fn new_perspective(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_rad: f32,
        z_near: f32,
        z_far: f32,
        aspect: f32,
    ) -> Self {
        Self {
            eye,
            target,
            up,
            fov_y_rad,
            z_near,
            z_far,
            aspect,
        }
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Depth maps to [0, 1], which is what wgpu expects.
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }
}

/// Camera that sits on a sphere around the origin and always looks at it.
///
/// `horizontal_angle` rotates around +Y, `vertical_angle` lifts the eye
/// towards the pole. Neither angle is clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub horizontal_angle: f32,
    pub vertical_angle: f32,
    pub radius: f32,
    pub fov_y_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl OrbitCamera {
    pub fn new(radius: f32, fov_y_deg: f32, z_near: f32, z_far: f32) -> CoreResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(CoreError::InvalidCamera(format!(
                "radius must be positive, got {radius}"
            )));
        }
        if !(fov_y_deg > 0.0 && fov_y_deg < 180.0) {
            return Err(CoreError::InvalidCamera(format!(
                "fov must be in (0, 180) degrees, got {fov_y_deg}"
            )));
        }
        if !(z_near > 0.0 && z_far > z_near) {
            return Err(CoreError::InvalidCamera(format!(
                "clip planes must satisfy 0 < near < far, got {z_near}..{z_far}"
            )));
        }
        Ok(Self {
            radius,
            fov_y_deg,
            z_near,
            z_far,
            ..Self::default()
        })
    }

    /// Unit vector from the origin towards the eye.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        let (sin_h, cos_h) = self.horizontal_angle.sin_cos();
        let (sin_v, cos_v) = self.vertical_angle.sin_cos();
        Vec3::new(cos_v * sin_h, sin_v, cos_v * cos_h)
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.radius * self.direction()
    }

    /// Horizontal vector perpendicular to the view plane.
    #[inline]
    pub fn right(&self) -> Vec3 {
        let h = self.horizontal_angle - FRAC_PI_2;
        Vec3::new(h.sin(), 0.0, h.cos())
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.direction())
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera::new_perspective(
            self.position(),
            Vec3::ZERO,
            self.up(),
            self.fov_y_deg.to_radians(),
            self.z_near,
            self.z_far,
            aspect,
        )
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            horizontal_angle: PI,
            vertical_angle: 0.0,
            radius: 5.0,
            fov_y_deg: 45.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec3;

    #[test]
    fn default_eye_sits_behind_origin_on_negative_z() {
        let orbit = OrbitCamera::default();
        let eye = orbit.position();
        assert!(eye.abs_diff_eq(vec3(0.0, 0.0, -5.0), 1e-2));
        assert!(orbit.up().abs_diff_eq(Vec3::Y, 1e-2));
    }

    #[test]
    fn position_scales_with_radius() {
        let orbit = OrbitCamera {
            horizontal_angle: 0.0,
            vertical_angle: 0.0,
            radius: 12.0,
            ..OrbitCamera::default()
        };
        assert!(orbit.position().abs_diff_eq(vec3(0.0, 0.0, 12.0), 1e-5));
    }

    #[test]
    fn up_stays_orthogonal_at_the_pole() {
        let orbit = OrbitCamera {
            vertical_angle: FRAC_PI_2,
            ..OrbitCamera::default()
        };
        let up = orbit.up();
        assert!(up.length() > 0.5);
        assert!(up.dot(orbit.direction()).abs() < 1e-5);
        assert!(orbit.camera(1.0).view().is_finite());
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(OrbitCamera::new(0.0, 45.0, 0.1, 100.0).is_err());
        assert!(OrbitCamera::new(5.0, 180.0, 0.1, 100.0).is_err());
        assert!(OrbitCamera::new(5.0, 45.0, 1.0, 0.5).is_err());
        let ok = OrbitCamera::new(40.0, 60.0, 0.1, 500.0).expect("valid camera");
        assert_eq!(ok.radius, 40.0);
        assert_eq!(ok.horizontal_angle, OrbitCamera::default().horizontal_angle);
    }
}
