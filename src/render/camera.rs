use crate::config::CameraConfig;
use crate::error::Result;
use crate::math::{Matrix4, Vector3, Vector4};

/// Degrees of azimuth per unit of horizontal pointer travel in NDC.
const AZIMUTH_PER_NDC: f32 = 120.0;
/// Degrees of elevation per unit of vertical pointer travel in NDC.
const ELEVATION_PER_NDC: f32 = 90.0;
const MIN_ELEVATION: f32 = -10.0;
const MAX_ELEVATION: f32 = 89.0;
const MIN_DISTANCE: f32 = 3.0;
/// Far plane kept this far beyond the orbit distance while zooming.
const FAR_MARGIN: f32 = 20.0;

/// Camera orbiting a look-at point in a z-up world.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitView {
    pub look_at: Vector3,
    pub distance: f32,
    /// Azimuth about world z, degrees.
    pub angle_z: f32,
    /// Elevation above the xy plane, degrees.
    pub angle_y: f32,
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub gl_axes: bool,
}

impl Default for OrbitView {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl OrbitView {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            look_at: Vector3::from(config.look_at),
            distance: config.distance,
            angle_z: config.angle_z,
            angle_y: config.angle_y,
            fovy: config.fovy,
            aspect: 1.0,
            near: config.near,
            far: config.far,
            gl_axes: config.gl_axes,
        }
    }

    /// Eye position: `(distance, 0, 0)` lifted by `angle_y`, swung by
    /// `angle_z`, then offset by the look-at point.
    pub fn eye(&self) -> Vector3 {
        let mut orbit = Matrix4::rotation_of(-self.angle_y, 0.0, 1.0, 0.0);
        orbit.rotate(self.angle_z, 0.0, 0.0, 1.0);
        let mut p = Vector4::point(self.distance, 0.0, 0.0);
        p.mult_l(&orbit);
        let mut eye = Vector3::ZERO;
        eye.set_sum(&p.xyz(), &self.look_at);
        eye
    }

    pub fn view_matrix(&self) -> Result<Matrix4> {
        let mut view = Matrix4::IDENTITY;
        view.set_look_at(self.eye(), self.look_at, Vector3::Z, self.gl_axes)?;
        Ok(view)
    }

    pub fn projection_matrix(&self) -> Result<Matrix4> {
        let mut proj = Matrix4::IDENTITY;
        proj.set_perspective(self.fovy, self.aspect, self.near, self.far)?;
        Ok(proj)
    }

    pub fn view_projection(&self) -> Result<Matrix4> {
        let mut view = self.view_matrix()?;
        view.perspective(self.fovy, self.aspect, self.near, self.far)?;
        Ok(view)
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Orbits by a pointer displacement in normalised device units (y up).
    pub fn orbit_drag(&mut self, dx: f32, dy: f32) {
        self.angle_z = (self.angle_z - dx * AZIMUTH_PER_NDC) % 360.0;
        self.angle_y = (self.angle_y - dy * ELEVATION_PER_NDC).clamp(MIN_ELEVATION, MAX_ELEVATION);
    }

    /// One wheel notch moves a third of a unit; positive steps zoom in.
    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance - steps / 3.0).max(MIN_DISTANCE);
        self.far = self.distance + FAR_MARGIN;
    }

    /// Ray from the eye through the pointer at `(ndc_x, ndc_y)` on the near
    /// plane. The direction is normalised.
    pub fn screen_to_ray(&self, ndc_x: f32, ndc_y: f32) -> Result<(Vector3, Vector3)> {
        let eye = self.eye();
        let mut sight = Vector3::ZERO;
        sight.set_sub(&self.look_at, &eye).normalize().scale(self.near);
        let mut near_origin = Vector3::ZERO;
        near_origin.set_sum(&eye, &sight);

        let mut near_to_world = Matrix4::IDENTITY;
        near_to_world
            .set_look_at(near_origin, self.look_at, Vector3::Z, false)?
            .invert()?;

        let half_h = self.near * (self.fovy.to_radians() / 2.0).tan();
        let mut p = Vector4::point(ndc_x * half_h * self.aspect, ndc_y * half_h, 0.0);
        p.mult_l(&near_to_world);

        let mut dir = Vector3::ZERO;
        dir.set_sub(&p.xyz(), &eye).normalize();
        Ok((eye, dir))
    }

    /// World point under the pointer on the plane through `plane_point` with
    /// normal `plane_normal`. `None` when the ray misses the plane.
    pub fn pick_on_plane(
        &self,
        ndc_x: f32,
        ndc_y: f32,
        plane_point: Vector3,
        plane_normal: Vector3,
    ) -> Option<Vector3> {
        let (origin, dir) = match self.screen_to_ray(ndc_x, ndc_y) {
            Ok(ray) => ray,
            Err(e) => {
                log::debug!("pick skipped: {e}");
                return None;
            }
        };

        let denom = dir.dot(&plane_normal);
        if denom.abs() < 1e-6 {
            return None;
        }
        let mut to_plane = Vector3::ZERO;
        to_plane.set_sub(&plane_point, &origin);
        let d = to_plane.dot(&plane_normal) / denom;
        if d < 0.0 {
            return None;
        }

        let mut hit = dir;
        hit.scale(d);
        let mut out = Vector3::ZERO;
        out.set_sum(&origin, &hit);
        Some(out)
    }
}
