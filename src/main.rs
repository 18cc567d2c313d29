//! Headless arm demo.
//!
//! Plays a trajectory for a number of frames, logging where the tool tip
//! goes, then switches to the free path and sweeps a pointer across the
//! wall, solving IK for every pick.
//!
//! Usage:
//!   cargo run --bin arm-demo -- --frames 120 --path 2
//!   RUST_LOG=debug cargo run --bin arm-demo -- --config viewer.json --trajectories paths.json

use arm_kinematics::animation::{
    PathFollower, PathSelection, TrajectoryLibrary, BUILTIN_LINK_LENGTH,
};
use arm_kinematics::render::{pack_aligned, FrameUniforms, ModelUniforms, OrbitView, OrbitingLight};
use arm_kinematics::{ArmModel, JointAngles, KinematicsError, Vector3, ViewerConfig};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

const FRAME_TIME: Duration = Duration::from_millis(16);
const UNIFORM_ALIGNMENT: usize = 256;
const BUILTIN_SAMPLES: usize = 600;
const SWEEP_STEPS: usize = 7;
const SWEEP_HALF_WIDTH: f32 = 0.15;
const WALL_X: f32 = -4.0;

#[derive(Parser)]
#[command(about = "Headless playback and drag-IK trace for the anthropomorphic arm")]
struct Args {
    /// Viewer configuration (JSON); defaults are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trajectory file with t1, t2, t3, freeRest and free samples
    #[arg(long)]
    trajectories: Option<PathBuf>,

    /// Number of playback frames to simulate
    #[arg(long, default_value_t = 60)]
    frames: u32,

    /// Path to play: 1, 2, 3 or free
    #[arg(long, default_value = "1")]
    path: PathSelection,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), KinematicsError> {
    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };

    let arm = ArmModel::new(config.link_length);
    let library = match &args.trajectories {
        Some(path) => TrajectoryLibrary::load(path)?,
        None => TrajectoryLibrary::builtin(&arm, BUILTIN_SAMPLES)?,
    };

    let mut view = OrbitView::from_config(&config.camera);
    view.set_aspect(16.0 / 9.0);
    let mut light = OrbitingLight::from_config(&config.light);

    let mut now = Duration::ZERO;
    let mut q = JointAngles::ZERO;
    let mut follower = PathFollower::new(library, config.transition_time(), now);
    follower.set_velocity(config.playback_velocity, now);
    follower.select(args.path, &q, now);
    log::info!("playing {} for {} frames", args.path, args.frames);

    for frame in 0..args.frames {
        follower.update(now, &mut q);
        light.advance(FRAME_TIME);
        let bytes = draw_frame(&arm, &view, &light, &q)?;

        let tip = arm.end_effector(&q).translation();
        log::info!("frame {frame:4}: tip {tip:.3} ({bytes} uniform bytes)");
        now += FRAME_TIME;
    }

    follower.select(PathSelection::Free, &q, now);
    while !follower.accepts_drag() {
        follower.update(now, &mut q);
        now += FRAME_TIME;
    }
    let wall_x = WALL_X * config.link_length / BUILTIN_LINK_LENGTH;
    log::info!("free path reached, sweeping pointer across x = {wall_x}");

    for step in 0..SWEEP_STEPS {
        let ndc_x = SWEEP_HALF_WIDTH * (2.0 * step as f32 / (SWEEP_STEPS - 1) as f32 - 1.0);
        let Some(hit) = view.pick_on_plane(ndc_x, 0.0, Vector3::new(wall_x, 0.0, 0.0), Vector3::X)
        else {
            log::warn!("pointer at {ndc_x:.2} misses the wall");
            continue;
        };

        match arm.solve_position(&ArmModel::drag_pose(hit), &mut q) {
            Ok(sol) => log::info!(
                "pointer {ndc_x:+.2} -> {hit:.3}: q1={:.3} q2={:.3} q3={:.3}",
                sol.q1,
                sol.q2,
                sol.q3
            ),
            Err(KinematicsError::OutOfWorkspace { distance, .. }) => {
                log::info!("pointer {ndc_x:+.2} -> {hit:.3}: out of reach ({distance:.3})")
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

/// Builds the per-frame and per-link uniform blocks, returning the upload size.
fn draw_frame(
    arm: &ArmModel,
    view: &OrbitView,
    light: &OrbitingLight,
    q: &JointAngles,
) -> Result<usize, KinematicsError> {
    let frame = FrameUniforms::new(
        view.view_projection()?,
        light.light_matrix(view.look_at)?,
        view.eye(),
    );
    let links = arm
        .forward(q)
        .iter()
        .map(ModelUniforms::from_model)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(bytemuck::bytes_of(&frame).len() + pack_aligned(&links, UNIFORM_ALIGNMENT).len())
}
