use super::arm::{ArmGeometry, JointAngles};
use crate::error::{KinematicsError, Result};
use crate::math::Matrix4;

/// First three joint angles recovered from an end-effector pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WristSolution {
    pub q1: f32,
    pub q2: f32,
    pub q3: f32,
    /// Distance of the wrist centre from the shoulder.
    pub wrist_distance: f32,
}

/// Closed-form position solver for the arm's first three joints.
///
/// The wrist orientation (joints 4 to 6) is not solved. The elbow-up
/// branch (`cos q3 >= 0`) is always returned.
pub struct WristSolver;

impl WristSolver {
    pub fn solve(geometry: &ArmGeometry, pose: &Matrix4) -> Result<WristSolution> {
        let w = geometry.wrist_center(pose);
        let a2 = geometry.shoulder;
        let d4 = geometry.forearm;

        let dist_sq = w.dot(&w);
        let wrist_distance = dist_sq.sqrt();

        // law of cosines on the shoulder / forearm / wrist triangle
        let s3 = (dist_sq - a2 * a2 - d4 * d4) / (2.0 * a2 * d4);
        if !(-1.0..=1.0).contains(&s3) {
            let (min_reach, max_reach) = geometry.reach();
            log::warn!(
                "IK target out of workspace: wrist at {:.3} not in [{:.3}, {:.3}]",
                wrist_distance,
                min_reach,
                max_reach
            );
            return Err(KinematicsError::OutOfWorkspace {
                distance: wrist_distance,
                min_reach,
                max_reach,
            });
        }
        let c3 = (1.0 - s3 * s3).sqrt();
        let q3 = s3.atan2(c3);

        let r = (w.x * w.x + w.y * w.y).sqrt();
        let q2 = w.z.atan2(r) + (d4 * c3).atan2(a2 + d4 * s3);
        let q1 = w.y.atan2(w.x);

        log::debug!("IK solved: q1={q1:.4} q2={q2:.4} q3={q3:.4}");
        Ok(WristSolution {
            q1,
            q2,
            q3,
            wrist_distance,
        })
    }

    /// Writes `q[0..3]` on success; `q[3..6]` and any failure leave `q` as it was.
    pub fn solve_into(
        geometry: &ArmGeometry,
        pose: &Matrix4,
        q: &mut JointAngles,
    ) -> Result<WristSolution> {
        let sol = Self::solve(geometry, pose)?;
        q[0] = sol.q1;
        q[1] = sol.q2;
        q[2] = sol.q3;
        Ok(sol)
    }
}

/// Solves `[q1, q2, q3]` for the arm built from `link_length`.
pub fn solve(pose: &Matrix4, link_length: f32) -> Result<[f32; 3]> {
    let sol = WristSolver::solve(&ArmGeometry::from_link_length(link_length), pose)?;
    Ok([sol.q1, sol.q2, sol.q3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::ArmModel;
    use crate::math::Vector3;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::PI;

    const L: f32 = 1.3;

    fn wrap(a: f32) -> f32 {
        let mut a = a % (2.0 * PI);
        if a > PI {
            a -= 2.0 * PI;
        } else if a < -PI {
            a += 2.0 * PI;
        }
        a
    }

    #[test]
    fn home_pose_recovers_zero() {
        let arm = ArmModel::new(L);
        let pose = arm.end_effector(&JointAngles::ZERO);
        let q = solve(&pose, L).unwrap();
        for angle in q {
            assert_abs_diff_eq!(angle, 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn round_trip_through_forward_kinematics() {
        let arm = ArmModel::new(L);
        let configs = [
            [0.3, 0.2, 0.4, 0.0, 0.0, 0.0],
            [-1.2, -0.5, 1.0, 0.7, -0.4, 2.0],
            [2.5, 0.9, -0.8, -1.0, 1.1, 0.3],
            [0.0, 1.2, 0.1, 0.5, 0.5, 0.5],
        ];
        for cfg in configs {
            let q = JointAngles::new(cfg);
            let pose = arm.end_effector(&q);
            let sol = WristSolver::solve(arm.geometry(), &pose).unwrap();
            assert_abs_diff_eq!(wrap(sol.q1 - cfg[0]), 0.0, epsilon = 1e-3);
            assert_abs_diff_eq!(wrap(sol.q2 - cfg[1]), 0.0, epsilon = 1e-3);
            assert_abs_diff_eq!(wrap(sol.q3 - cfg[2]), 0.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn unreachable_target_leaves_q_untouched() {
        let arm = ArmModel::new(L);
        // wrist ends up 3.5L from the shoulder, past the 3L reach
        let pose = ArmModel::drag_pose(Vector3::new(-3.5 * L - 2.0 * L, 0.0, 2.0 * L));
        let mut q = JointAngles::new([0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let before = q;

        let err = arm.solve_position(&pose, &mut q).unwrap_err();
        match err {
            KinematicsError::OutOfWorkspace {
                distance,
                max_reach,
                ..
            } => {
                assert!(distance > 2.0 * L);
                assert!(distance > max_reach);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(q, before);
    }

    #[test]
    fn target_inside_inner_radius_is_unreachable() {
        let arm = ArmModel::new(L);
        // wrist exactly on the shoulder
        let pose = ArmModel::drag_pose(Vector3::new(-2.0 * L, 0.0, 2.0 * L));
        assert!(matches!(
            WristSolver::solve(arm.geometry(), &pose),
            Err(KinematicsError::OutOfWorkspace { .. })
        ));
    }

    #[test]
    fn wrist_joints_are_not_written() {
        let arm = ArmModel::new(L);
        let pose = ArmModel::drag_pose(Vector3::new(-4.0, 0.0, 4.0));
        let mut q = JointAngles::new([0.0, 0.0, 0.0, 0.4, 0.5, 0.6]);
        arm.solve_position(&pose, &mut q).unwrap();
        assert_eq!(&q.0[3..], &[0.4, 0.5, 0.6]);

        // the solved arm puts its wrist where the pose asked
        let w = arm.wrist_center(&q);
        let expected = Vector3::new(-4.0 + 2.0 * L, 0.0, 4.0);
        assert_abs_diff_eq!(w.x, expected.x, epsilon = 1e-4);
        assert_abs_diff_eq!(w.y, expected.y, epsilon = 1e-4);
        assert_abs_diff_eq!(w.z, expected.z, epsilon = 1e-4);
    }
}
