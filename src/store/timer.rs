//! The single work timer shared by all projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of the timer, derived from the timer and the current project.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
        })
    }
}

/// Stopwatch state.
///
/// `elapsed_time` covers only the current run segment, which has not been
/// committed to any project yet. Pauses commit the segment and move it into
/// `session_time`, so the visible counter keeps going after a resume.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub(super) is_running: bool,
    pub(super) start_time: Option<DateTime<Utc>>,
    pub(super) elapsed_time: u64,
    pub(super) session_time: u64,
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Seconds in the current, uncommitted run segment.
    ///
    pub fn elapsed_time(&self) -> u64 {
        self.elapsed_time
    }

    /// Seconds already committed by pauses in this session.
    ///
    pub fn session_time(&self) -> u64 {
        self.session_time
    }

    /// Seconds to show on the stopwatch.
    ///
    pub fn display_seconds(&self) -> u64 {
        self.session_time + self.elapsed_time
    }

    /// Whole seconds of the running segment at `at`, or 0 when not running.
    ///
    pub(super) fn segment_at(&self, at: DateTime<Utc>) -> u64 {
        match (self.is_running, self.start_time) {
            (true, Some(start)) => whole_seconds_between(start, at),
            _ => 0,
        }
    }
}

/// Whole seconds from `start` to `end`, floored. A clock that stepped
/// backwards yields 0.
///
pub fn whole_seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    let millis = end.signed_duration_since(start).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis / 1000) as u64
    }
}
