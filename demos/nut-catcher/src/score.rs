use itertools::Itertools;

use crate::config::ScoreChunk;

/// One entry in the points table: catches made before `seconds` of
/// elapsed play are worth `points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakpoint {
    pub seconds: u32,
    pub points: u32,
}

/// Maps elapsed session time to a catch value and accumulates the tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    /// Sorted ascending by seconds
    table: Vec<ScoreBreakpoint>,
    default_points: u32,
    pub score: u32,
    pub caught: u32,
}

impl ScoreTracker {
    /// Build the points table from percentage chunks of the session.
    pub fn new(chunks: &[ScoreChunk], default_points: u32, session_seconds: u32) -> Self {
        let table = chunks
            .iter()
            .map(|chunk| ScoreBreakpoint {
                seconds: chunk.percent * session_seconds / 100,
                points: chunk.points,
            })
            .sorted_by_key(|breakpoint| breakpoint.seconds)
            .collect();
        Self::from_breakpoints(table, default_points)
    }

    /// Build directly from an already-sorted breakpoint table.
    pub fn from_breakpoints(mut table: Vec<ScoreBreakpoint>, default_points: u32) -> Self {
        table.sort_by_key(|breakpoint| breakpoint.seconds);
        Self {
            table,
            default_points,
            score: 0,
            caught: 0,
        }
    }

    /// The value of a catch made `elapsed_seconds` into the session: the
    /// first breakpoint not yet passed, or the default once all of them
    /// are behind us.
    pub fn points_for(&self, elapsed_seconds: u32) -> u32 {
        self.table
            .iter()
            .find(|breakpoint| breakpoint.seconds > elapsed_seconds)
            .map(|breakpoint| breakpoint.points)
            .unwrap_or(self.default_points)
    }

    /// Register one catch.
    ///
    /// A no-op while the robot is busy collecting: the click that sent it
    /// moving is the only one that may score, everything else is noise
    /// from impatient tapping. Gold nuts are worth exactly double the
    /// time-weighted value.
    pub fn register_catch(&mut self, special: bool, elapsed_seconds: u32, busy: bool) {
        if busy {
            return;
        }
        self.caught += 1;
        let points = self.points_for(elapsed_seconds);
        self.score += points;
        if special {
            self.score += points;
        }
    }
}
