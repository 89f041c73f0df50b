use crate::Vec3;

/// Single point light shared by every object in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    /// Scales the inverse-square falloff in the shader.
    pub power: f32,
    pub enabled: bool,
}

impl PointLight {
    pub const DEFAULT_POWER: f32 = 1000.0;

    pub fn with_power(mut self, power: f32) -> Self {
        self.power = power.max(0.0);
        self
    }

    #[inline]
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 25.0, 0.0),
            color: Vec3::ONE,
            power: Self::DEFAULT_POWER,
            enabled: true,
        }
    }
}
