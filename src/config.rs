//! Viewer configuration.

use crate::error::{KinematicsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Orbiting camera settings. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub look_at: [f32; 3],
    pub distance: f32,
    /// Azimuth about the world z axis.
    pub angle_z: f32,
    /// Elevation above the xy plane.
    pub angle_y: f32,
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
    /// Swap y and z so the view matrix targets a y-up renderer.
    pub gl_axes: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_at: [-4.0, 0.0, 4.0],
            distance: 10.0,
            angle_z: -60.0,
            angle_y: 45.0,
            fovy: 70.0,
            near: 1.0,
            far: 50.0,
            gl_axes: false,
        }
    }
}

/// Shadow-casting light circling the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub radius: f32,
    pub height: f32,
    pub angle_z: f32,
    /// Degrees per second.
    pub angular_velocity: f32,
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            radius: 6.0,
            height: 5.0,
            angle_z: 45.0,
            angular_velocity: 20.0,
            fovy: 70.0,
            near: 4.0,
            far: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub link_length: f32,
    pub camera: CameraConfig,
    pub light: LightConfig,
    /// Multiplier on the base playback rate.
    pub playback_velocity: f32,
    pub transition_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            link_length: 1.3,
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            playback_velocity: 1.0,
            transition_ms: 1500,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| KinematicsError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON file; a missing file falls back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!("config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            KinematicsError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&content)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn transition_time(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.link_length.is_nan() || self.link_length <= 0.0 {
            return Err(KinematicsError::Config(format!(
                "link_length must be positive, got {}",
                self.link_length
            )));
        }
        check_clip("camera", self.camera.near, self.camera.far)?;
        check_clip("light", self.light.near, self.light.far)?;
        if self.camera.distance <= 0.0 {
            return Err(KinematicsError::Config("camera distance must be positive".into()));
        }
        Ok(())
    }
}

fn check_clip(name: &str, near: f32, far: f32) -> Result<()> {
    if near.is_nan() || far.is_nan() || near <= 0.0 || far <= near {
        return Err(KinematicsError::Config(format!(
            "{name} clip planes need 0 < near < far, got near={near} far={far}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.transition_time(), Duration::from_millis(1500));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config =
            ViewerConfig::from_json_str(r#"{"camera": {"distance": 15}, "link_length": 2.0}"#)
                .unwrap();
        assert_eq!(config.camera.distance, 15.0);
        assert_eq!(config.camera.fovy, 70.0);
        assert_eq!(config.link_length, 2.0);
        assert_eq!(config.light, LightConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ViewerConfig::from_json_str(r#"{"link_length": 0}"#).is_err());
        assert!(ViewerConfig::from_json_str(r#"{"light": {"near": 10, "far": 5}}"#).is_err());
        assert!(ViewerConfig::from_json_str(r#"{"camera": {"near": -1}}"#).is_err());
        assert!(ViewerConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ViewerConfig::load(Path::new("/nonexistent/arm-viewer.json")).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }
}
