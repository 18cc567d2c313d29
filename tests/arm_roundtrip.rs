use approx::assert_abs_diff_eq;
use arm_kinematics::animation::{FollowState, PathFollower, PathSelection, TrajectoryLibrary};
use arm_kinematics::kinematics::{solve, FRAME_COUNT};
use arm_kinematics::render::{pack_aligned, ModelUniforms, OrbitView};
use arm_kinematics::{ArmModel, JointAngles, KinematicsError, MatrixBank, Vector3};
use std::time::Duration;

const L: f32 = 1.3;

#[test]
fn forward_then_inverse_reproduces_tip_position() {
    let arm = ArmModel::new(L);
    let configs = [
        [0.2, 0.4, -0.3, 0.9, 0.5, -1.2],
        [-2.0, 0.1, 0.6, -0.4, 1.3, 0.2],
        [1.0, -0.6, 1.2, 0.0, -0.8, 2.5],
    ];
    for cfg in configs {
        let original = JointAngles::new(cfg);
        let pose = arm.end_effector(&original);

        // keep the wrist joints, recover the first three
        let mut q = JointAngles::new([0.0, 0.0, 0.0, cfg[3], cfg[4], cfg[5]]);
        arm.solve_position(&pose, &mut q).unwrap();

        let tip = arm.end_effector(&q).translation();
        let expected = pose.translation();
        assert_abs_diff_eq!(tip.x, expected.x, epsilon = 1e-3);
        assert_abs_diff_eq!(tip.y, expected.y, epsilon = 1e-3);
        assert_abs_diff_eq!(tip.z, expected.z, epsilon = 1e-3);
    }
}

#[test]
fn free_function_matches_solver() {
    let arm = ArmModel::new(L);
    let pose = arm.end_effector(&JointAngles::new([0.5, 0.3, 0.2, 0.0, 0.0, 0.0]));
    let mut q = JointAngles::ZERO;
    let sol = arm.solve_position(&pose, &mut q).unwrap();
    assert_eq!(solve(&pose, L).unwrap(), [sol.q1, sol.q2, sol.q3]);
}

#[test]
fn pointer_on_the_wall_drives_the_tool_tip() {
    let arm = ArmModel::new(L);
    let mut view = OrbitView::default();
    view.set_aspect(4.0 / 3.0);

    let mut q = JointAngles::ZERO;
    for (nx, ny) in [(0.0, 0.0), (-0.06, 0.03), (0.05, -0.04), (0.04, 0.05)] {
        let hit = view
            .pick_on_plane(nx, ny, Vector3::new(-4.0, 0.0, 0.0), Vector3::X)
            .unwrap();
        assert_abs_diff_eq!(hit.x, -4.0, epsilon = 1e-3);

        arm.solve_position(&ArmModel::drag_pose(hit), &mut q).unwrap();
        let tip = arm.end_effector(&q).translation();
        assert_abs_diff_eq!(tip.x, hit.x, epsilon = 1e-3);
        assert_abs_diff_eq!(tip.y, hit.y, epsilon = 1e-3);
        assert_abs_diff_eq!(tip.z, hit.z, epsilon = 1e-3);
    }
}

#[test]
fn far_wall_pick_is_out_of_reach() {
    let arm = ArmModel::new(L);
    let target = Vector3::new(-8.0, 0.0, 4.0);
    let mut q = JointAngles::new([0.1; 6]);
    let err = arm.solve_position(&ArmModel::drag_pose(target), &mut q).unwrap_err();
    assert!(matches!(err, KinematicsError::OutOfWorkspace { .. }));
    assert_eq!(q, JointAngles::new([0.1; 6]));
}

#[test]
fn builtin_free_path_hands_over_to_drag() {
    let arm = ArmModel::new(L);
    let library = TrajectoryLibrary::builtin(&arm, 32).unwrap();
    let mut follower = PathFollower::new(library, Duration::from_millis(1500), Duration::ZERO);
    let mut q = JointAngles::ZERO;

    follower.update(Duration::from_millis(100), &mut q);
    follower.select(PathSelection::Free, &q, Duration::from_millis(100));
    follower.update(Duration::from_millis(900), &mut q);
    assert!(matches!(follower.state(), FollowState::Transitioning(_)));
    follower.update(Duration::from_millis(1700), &mut q);
    assert!(follower.accepts_drag());

    // rest pose points at the middle of the wall
    let tip = arm.end_effector(&q).translation();
    assert_abs_diff_eq!(tip.x, -4.0, epsilon = 1e-3);
    assert_abs_diff_eq!(tip.z, 4.0, epsilon = 1e-3);
}

#[test]
fn arm_frames_upload_as_one_block() {
    let arm = ArmModel::new(L);
    let frames = arm.forward(&JointAngles::new([0.3, 0.2, -0.1, 0.4, 0.5, 0.6]));

    let mut bank = MatrixBank::new(2 * FRAME_COUNT);
    for (i, frame) in frames.iter().enumerate() {
        *bank.get_mut(i).unwrap() = *frame;
        bank.normal_matrix(FRAME_COUNT + i, i).unwrap();
    }
    assert_eq!(bank.as_bytes().len(), 2 * FRAME_COUNT * 64);

    let blocks: Vec<ModelUniforms> = frames
        .iter()
        .map(|m| ModelUniforms::from_model(m).unwrap())
        .collect();
    for (i, block) in blocks.iter().enumerate() {
        assert!(block
            .normal
            .abs_diff_eq(bank.get(FRAME_COUNT + i).unwrap(), 1e-6));
    }
    assert_eq!(pack_aligned(&blocks, 256).len(), FRAME_COUNT * 256);
}
