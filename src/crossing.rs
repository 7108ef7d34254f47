use crate::config::ReferenceLines;
use crate::geometry::crossed_line;
use tracing::{debug, trace};

const MS_TO_KMH: f64 = 3.6;

/// Per-identity progress across the entry and exit lines.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CrossingState {
    #[default]
    NoCrossing,
    Entered {
        entry: f64,
    },
    Completed {
        entry: f64,
        exit: f64,
        speed_kmh: f64,
    },
}

impl CrossingState {
    #[inline]
    pub fn entry_time(&self) -> Option<f64> {
        match *self {
            CrossingState::NoCrossing => None,
            CrossingState::Entered { entry } | CrossingState::Completed { entry, .. } => {
                Some(entry)
            }
        }
    }

    #[inline]
    pub fn exit_time(&self) -> Option<f64> {
        match *self {
            CrossingState::Completed { exit, .. } => Some(exit),
            _ => None,
        }
    }

    #[inline]
    pub fn speed_kmh(&self) -> Option<f64> {
        match *self {
            CrossingState::Completed { speed_kmh, .. } => Some(speed_kmh),
            _ => None,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, CrossingState::Completed { .. })
    }
}

#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts the timed passage between the two lines into a speed.
#[derive(Debug, Clone)]
pub struct CrossingEngine {
    distance_m: f64,
}

impl CrossingEngine {
    pub fn new(distance_m: f64) -> Self {
        Self { distance_m }
    }

    #[inline]
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    /// Speed in km/h, rounded to two decimals, or `None` for a non-positive
    /// elapsed time.
    pub fn speed_kmh(&self, elapsed_sec: f64) -> Option<f64> {
        if elapsed_sec > 0.0 {
            Some(round2(self.distance_m / elapsed_sec * MS_TO_KMH))
        } else {
            None
        }
    }

    /// Advances `state` for one observation and returns the speed on the
    /// single frame the passage completes. The entry line is evaluated
    /// before the exit line.
    pub fn observe(
        &self,
        id: u32,
        state: &mut CrossingState,
        lines: &ReferenceLines,
        prev_y: f32,
        curr_y: f32,
        now: f64,
    ) -> Option<f64> {
        if let (CrossingState::NoCrossing, Some(line)) = (*state, lines.entry_y) {
            if crossed_line(prev_y, curr_y, line) {
                debug!("track {} crossed entry line {} at {:.3}s", id, line, now);
                *state = CrossingState::Entered { entry: now };
            }
        }

        if let (CrossingState::Entered { entry }, Some(line)) = (*state, lines.exit_y) {
            if crossed_line(prev_y, curr_y, line) {
                match self.speed_kmh(now - entry) {
                    Some(speed_kmh) => {
                        *state = CrossingState::Completed {
                            entry,
                            exit: now,
                            speed_kmh,
                        };
                        return Some(speed_kmh);
                    }
                    None => trace!(
                        "track {} exit at {:.3}s not after entry at {:.3}s",
                        id,
                        now,
                        entry
                    ),
                }
            }
        }

        None
    }
}
