use crate::config::LightConfig;
use crate::error::Result;
use crate::math::{Matrix4, Vector3, Vector4};
use std::time::Duration;

/// Point light circling the world z axis; its matrix renders the shadow map.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingLight {
    pub radius: f32,
    pub height: f32,
    /// Current angle about z, degrees.
    pub angle_z: f32,
    /// Degrees per second.
    pub angular_velocity: f32,
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrbitingLight {
    fn default() -> Self {
        Self::from_config(&LightConfig::default())
    }
}

impl OrbitingLight {
    pub fn from_config(config: &LightConfig) -> Self {
        Self {
            radius: config.radius,
            height: config.height,
            angle_z: config.angle_z,
            angular_velocity: config.angular_velocity,
            fovy: config.fovy,
            near: config.near,
            far: config.far,
        }
    }

    pub fn position(&self) -> Vector3 {
        let mut p = Vector4::point(self.radius, 0.0, self.height);
        p.mult_l(&Matrix4::rotation_of(self.angle_z, 0.0, 0.0, 1.0));
        p.xyz()
    }

    pub fn advance(&mut self, dt: Duration) {
        self.angle_z = (self.angle_z + self.angular_velocity * dt.as_secs_f32()) % 360.0;
    }

    /// Shadow-map view-projection aimed one unit below `target`, in GL axes.
    pub fn light_matrix(&self, target: Vector3) -> Result<Matrix4> {
        let mut aim = target;
        aim.z -= 1.0;
        let mut m = Matrix4::IDENTITY;
        m.set_look_at(self.position(), aim, Vector3::Z, true)?
            .perspective(self.fovy, 1.0, self.near, self.far)?;
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn position_follows_angle() {
        let mut light = OrbitingLight::default();
        light.angle_z = 90.0;
        let p = light.position();
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 6.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.z, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn advance_wraps_angle() {
        let mut light = OrbitingLight::default();
        light.angle_z = 350.0;
        light.advance(Duration::from_secs(1));
        assert_abs_diff_eq!(light.angle_z, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn target_projects_to_centre_of_shadow_map() {
        let light = OrbitingLight::default();
        let target = Vector3::new(-4.0, 0.0, 4.0);
        let m = light.light_matrix(target).unwrap();

        // the aim point, expressed in GL axes, lands in the middle of the map
        let mut aim = Vector3::new(-4.0, 0.0, 3.0);
        aim.to_gl_coord();
        let mut clip = Vector4::from_vec3(aim, 1.0);
        clip.mult_l(&m).to_inhom();
        assert_abs_diff_eq!(clip.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(clip.y, 0.0, epsilon = 1e-4);
        assert!(clip.z > -1.0 && clip.z < 1.0);
    }
}
