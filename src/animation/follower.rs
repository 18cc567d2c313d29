use super::playback::{Playback, Transition};
use super::trajectory::{PathSelection, TrajectoryLibrary};
use crate::kinematics::JointAngles;
use std::time::Duration;

/// What the follower is doing with the arm this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FollowState {
    /// Stepping through the selected trajectory.
    Playing,
    /// Blending into the rest pose of the selected trajectory.
    Transitioning(Transition),
    /// At rest on the free path; the pointer drives joints 1 to 3 through IK.
    Dragging,
}

/// Drives joint angles from a [`TrajectoryLibrary`]: plays the active path,
/// blends between paths, and hands the arm to the pointer on the free path.
#[derive(Debug, Clone)]
pub struct PathFollower {
    library: TrajectoryLibrary,
    selection: PathSelection,
    playback: Playback,
    transition_time: Duration,
    state: FollowState,
    animating: bool,
}

impl PathFollower {
    pub fn new(library: TrajectoryLibrary, transition_time: Duration, now: Duration) -> Self {
        let selection = PathSelection::Path1;
        let len = library.samples(selection).len();
        Self {
            library,
            selection,
            playback: Playback::new(len, now),
            transition_time,
            state: FollowState::Playing,
            animating: true,
        }
    }

    pub fn library(&self) -> &TrajectoryLibrary {
        &self.library
    }

    pub fn selection(&self) -> PathSelection {
        self.selection
    }

    pub fn state(&self) -> &FollowState {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// True once the free path has settled and pointer input should move the arm.
    pub fn accepts_drag(&self) -> bool {
        matches!(self.state, FollowState::Dragging)
    }

    /// Switches to `selection`, blending from `current`. Reselecting the
    /// active path is ignored.
    pub fn select(&mut self, selection: PathSelection, current: &JointAngles, now: Duration) {
        if selection == self.selection {
            return;
        }
        log::debug!("switching from {} to {}", self.selection, selection);
        self.selection = selection;
        let rest = self.library.rest_pose(selection);
        self.state =
            FollowState::Transitioning(Transition::new(*current, rest, now, self.transition_time));
    }

    pub fn set_animating(&mut self, on: bool, now: Duration) {
        self.animating = on;
        if on {
            self.playback.resume(now);
        } else {
            self.playback.pause();
        }
    }

    pub fn set_velocity(&mut self, multiplier: f32, now: Duration) {
        self.playback.set_velocity(multiplier, now);
    }

    /// Advances to `now` and writes the resulting pose into `q`. While
    /// dragging, `q` is left for the caller's IK to update.
    pub fn update(&mut self, now: Duration, q: &mut JointAngles) {
        if let FollowState::Transitioning(transition) = &self.state {
            if !transition.is_finished(now) {
                *q = transition.pose_at(now);
                return;
            }
            *q = self.library.rest_pose(self.selection);
            self.state = match self.selection {
                PathSelection::Free => FollowState::Dragging,
                _ => {
                    let len = self.library.samples(self.selection).len();
                    self.playback.reset(len, now);
                    FollowState::Playing
                }
            };
            log::debug!("reached rest pose of {}", self.selection);
            return;
        }

        if self.state == FollowState::Playing && self.animating {
            let index = self.playback.index_at(now);
            if let Some(sample) = self.library.samples(self.selection).get(index) {
                *q = *sample;
            }
        }
    }
}
