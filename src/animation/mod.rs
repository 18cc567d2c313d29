//! Trajectory playback module

pub mod follower;
pub mod playback;
pub mod trajectory;

pub use follower::{FollowState, PathFollower};
pub use playback::{Playback, Transition, BASE_RATE};
pub use trajectory::{PathSelection, TrajectoryLibrary, BUILTIN_LINK_LENGTH};
