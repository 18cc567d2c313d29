use crate::kinematics::JointAngles;
use std::f32::consts::{PI, TAU};
use std::time::Duration;

/// Samples per elapsed millisecond at unit velocity.
pub const BASE_RATE: f32 = 0.15;

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Maps wall-clock time onto an index into a looping trajectory.
///
/// All timestamps are measured from the same origin (for example the moment
/// the viewer started). Changing velocity restarts the clock from the last
/// emitted index so playback never jumps.
#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    len: usize,
    velocity: f32,
    start_pos: usize,
    last_pos: usize,
    started_at: Duration,
    running: bool,
}

impl Playback {
    pub fn new(len: usize, now: Duration) -> Self {
        Self {
            len: len.max(1),
            velocity: BASE_RATE,
            start_pos: 0,
            last_pos: 0,
            started_at: now,
            running: true,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn last_index(&self) -> usize {
        self.last_pos
    }

    /// `multiplier` scales the base rate; negative values play backwards.
    pub fn set_velocity(&mut self, multiplier: f32, now: Duration) {
        self.start_pos = self.last_pos;
        self.started_at = now;
        self.velocity = BASE_RATE * multiplier;
    }

    /// Restarts from sample 0 against a new trajectory length.
    pub fn reset(&mut self, len: usize, now: Duration) {
        self.len = len.max(1);
        self.start_pos = 0;
        self.last_pos = 0;
        self.started_at = now;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn resume(&mut self, now: Duration) {
        if !self.running {
            self.start_pos = self.last_pos;
            self.started_at = now;
            self.running = true;
        }
    }

    /// Index to display at `now`; frozen at the last index while paused.
    pub fn index_at(&mut self, now: Duration) -> usize {
        if !self.running {
            return self.last_pos;
        }
        let elapsed = millis(now.saturating_sub(self.started_at));
        let steps = (elapsed * f64::from(self.velocity)).round() as i64;
        let len = self.len as i64;
        self.last_pos = (steps + self.start_pos as i64).rem_euclid(len) as usize;
        self.last_pos
    }
}

/// Joint-space blend from the current pose into the rest pose of a newly
/// selected trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    from: JointAngles,
    to: JointAngles,
    started_at: Duration,
    duration: Duration,
}

impl Transition {
    /// `to` is unwrapped joint by joint so no joint travels more than half a
    /// turn.
    pub fn new(from: JointAngles, to: JointAngles, now: Duration, duration: Duration) -> Self {
        let mut end = to;
        for i in 0..end.0.len() {
            let delta = end[i] - from[i];
            if delta > PI || delta < -PI {
                end[i] -= TAU * (delta / TAU).round();
            }
        }
        Self {
            from,
            to: end,
            started_at: now,
            duration,
        }
    }

    pub fn from(&self) -> &JointAngles {
        &self.from
    }

    pub fn to(&self) -> &JointAngles {
        &self.to
    }

    /// Unclamped progress; values above 1 mean the blend is over.
    pub fn progress(&self, now: Duration) -> f32 {
        let total = millis(self.duration);
        if total <= 0.0 {
            return f32::INFINITY;
        }
        (millis(now.saturating_sub(self.started_at)) / total) as f32
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) > 1.0
    }

    pub fn pose_at(&self, now: Duration) -> JointAngles {
        let t = self.progress(now).clamp(0.0, 1.0);
        JointAngles::lerp(&self.from, &self.to, t)
    }
}
