use crate::error::{KinematicsError, Result};
use crate::kinematics::{ArmModel, JointAngles};
use crate::math::Vector3;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Link length the built-in wall scene is authored for.
pub const BUILTIN_LINK_LENGTH: f32 = 1.3;

/// Which joint-space trajectory the arm follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathSelection {
    Path1,
    Path2,
    Path3,
    /// Move to the rest pose, then hand the arm to pointer-driven IK.
    Free,
}

impl PathSelection {
    pub const ALL: [PathSelection; 4] = [Self::Path1, Self::Path2, Self::Path3, Self::Free];
}

impl fmt::Display for PathSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Path1 => "path 1",
            Self::Path2 => "path 2",
            Self::Path3 => "path 3",
            Self::Free => "free path",
        };
        f.write_str(name)
    }
}

impl FromStr for PathSelection {
    type Err = KinematicsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "t1" | "path1" => Ok(Self::Path1),
            "2" | "t2" | "path2" => Ok(Self::Path2),
            "3" | "t3" | "path3" => Ok(Self::Path3),
            "free" | "f" => Ok(Self::Free),
            other => Err(KinematicsError::Config(format!("unknown path '{other}'"))),
        }
    }
}

/// Joint-space trajectories keyed the way the trajectory file stores them.
///
/// Deserializing goes through the same checks as [`TrajectoryLibrary::new`],
/// so every path holds at least one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLibrary")]
pub struct TrajectoryLibrary {
    t1: Vec<JointAngles>,
    t2: Vec<JointAngles>,
    t3: Vec<JointAngles>,
    #[serde(rename = "freeRest")]
    free_rest: Vec<JointAngles>,
    free: Vec<JointAngles>,
}

#[derive(Deserialize)]
struct RawLibrary {
    t1: Vec<JointAngles>,
    t2: Vec<JointAngles>,
    t3: Vec<JointAngles>,
    #[serde(rename = "freeRest")]
    free_rest: Vec<JointAngles>,
    free: Vec<JointAngles>,
}

impl TryFrom<RawLibrary> for TrajectoryLibrary {
    type Error = KinematicsError;

    fn try_from(raw: RawLibrary) -> Result<Self> {
        Self::new([raw.t1, raw.t2, raw.t3], raw.free_rest, raw.free)
    }
}

impl TrajectoryLibrary {
    pub fn new(
        paths: [Vec<JointAngles>; 3],
        free_rest: Vec<JointAngles>,
        free: Vec<JointAngles>,
    ) -> Result<Self> {
        let [t1, t2, t3] = paths;
        let lib = Self {
            t1,
            t2,
            t3,
            free_rest,
            free,
        };
        lib.validate()?;
        Ok(lib)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| KinematicsError::Config(format!("failed to parse trajectories: {e}")))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            KinematicsError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let lib = Self::from_json_str(&content)?;
        log::info!("loaded trajectories from {}", path.display());
        Ok(lib)
    }

    fn validate(&self) -> Result<()> {
        let named = [
            ("t1", &self.t1),
            ("t2", &self.t2),
            ("t3", &self.t3),
            ("freeRest", &self.free_rest),
            ("free", &self.free),
        ];
        for (name, samples) in named {
            if samples.is_empty() {
                return Err(KinematicsError::Config(format!("trajectory '{name}' is empty")));
            }
        }
        Ok(())
    }

    /// Samples played back once `selection` is active.
    pub fn samples(&self, selection: PathSelection) -> &[JointAngles] {
        match selection {
            PathSelection::Path1 => &self.t1,
            PathSelection::Path2 => &self.t2,
            PathSelection::Path3 => &self.t3,
            PathSelection::Free => &self.free,
        }
    }

    /// Pose the arm blends into when `selection` is chosen.
    pub fn rest_pose(&self, selection: PathSelection) -> JointAngles {
        let samples = match selection {
            PathSelection::Free => &self.free_rest,
            other => self.samples(other),
        };
        samples.first().copied().unwrap_or(JointAngles::ZERO)
    }

    /// Three circles traced on the wall, solved through IK, plus a rest pose
    /// facing the wall centre.
    ///
    /// The scene is laid out for a link length of 1.3 (wall at `x = -4`) and
    /// scaled with the arm, so every link length sees the same circles.
    pub fn builtin(arm: &ArmModel, samples: usize) -> Result<Self> {
        let s = arm.link_length() / BUILTIN_LINK_LENGTH;
        let circles = [
            (Vector3::new(-4.0, 0.0, 4.0), 0.8),
            (Vector3::new(-4.0, 1.0, 3.5), 0.5),
            (Vector3::new(-4.0, -1.0, 4.5), 0.6),
        ]
        .map(|(c, r)| (Vector3::new(c.x * s, c.y * s, c.z * s), r * s));
        let samples = samples.max(1);
        let mut paths: [Vec<JointAngles>; 3] = Default::default();
        for (path, (center, radius)) in paths.iter_mut().zip(circles) {
            let mut q = JointAngles::ZERO;
            for i in 0..samples {
                let t = TAU * i as f32 / samples as f32;
                let target = Vector3::new(
                    center.x,
                    center.y + radius * t.cos(),
                    center.z + radius * t.sin(),
                );
                arm.solve_position(&ArmModel::drag_pose(target), &mut q)?;
                path.push(q);
            }
        }

        let mut rest = JointAngles::ZERO;
        arm.solve_position(&ArmModel::drag_pose(circles[0].0), &mut rest)?;
        Self::new(paths, vec![rest], vec![rest])
    }
}
