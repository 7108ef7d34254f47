use tracing::debug;

/// Per-identity stationarity, driven by frame-to-frame displacement of the
/// crossing reference row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MotionState {
    #[default]
    Unseen,
    Watching {
        since: f64,
    },
    Stationary {
        since: f64,
    },
}

impl MotionState {
    #[inline]
    pub fn is_stationary(&self) -> bool {
        matches!(self, MotionState::Stationary { .. })
    }

    /// Start of the current low-motion period, if any.
    #[inline]
    pub fn still_since(&self) -> Option<f64> {
        match *self {
            MotionState::Unseen => None,
            MotionState::Watching { since } | MotionState::Stationary { since } => Some(since),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MotionClassifier {
    movement_threshold_px: f32,
    dwell_seconds: f64,
}

impl MotionClassifier {
    pub fn new(movement_threshold_px: f32, dwell_seconds: f64) -> Self {
        Self {
            movement_threshold_px,
            dwell_seconds,
        }
    }

    /// Advances `state` for one observation. Without a previous row there is
    /// no movement signal and the state is left alone. Returns true on the
    /// frame the object becomes stationary.
    pub fn observe(
        &self,
        id: u32,
        state: &mut MotionState,
        prev_y: Option<f32>,
        curr_y: f32,
        now: f64,
    ) -> bool {
        let prev_y = match prev_y {
            Some(y) => y,
            None => return false,
        };

        if (curr_y - prev_y).abs() >= self.movement_threshold_px {
            *state = MotionState::Unseen;
            return false;
        }

        match *state {
            MotionState::Unseen => {
                *state = MotionState::Watching { since: now };
                false
            }
            MotionState::Watching { since } => {
                if now - since > self.dwell_seconds {
                    debug!("track {} stationary since {:.2}s", id, since);
                    *state = MotionState::Stationary { since };
                    true
                } else {
                    false
                }
            }
            MotionState::Stationary { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> MotionClassifier {
        MotionClassifier::new(2.0, 3.0)
    }

    #[test]
    fn test_first_observation_is_skipped() {
        let mut state = MotionState::Unseen;

        assert!(!classifier().observe(1, &mut state, None, 100.0, 0.0));
        assert_eq!(state, MotionState::Unseen);
    }

    #[test]
    fn test_dwell_boundary_is_exclusive() {
        let motion = classifier();
        let mut state = MotionState::Unseen;

        motion.observe(1, &mut state, Some(100.0), 100.5, 0.0);
        assert_eq!(state, MotionState::Watching { since: 0.0 });

        motion.observe(1, &mut state, Some(100.5), 100.0, 1.5);
        motion.observe(1, &mut state, Some(100.0), 101.0, 3.0);
        assert!(!state.is_stationary());

        assert!(motion.observe(1, &mut state, Some(101.0), 101.0, 3.1));
        assert!(state.is_stationary());

        // fire once
        assert!(!motion.observe(1, &mut state, Some(101.0), 101.0, 4.0));
        assert!(state.is_stationary());
    }

    #[test]
    fn test_movement_resets_timer() {
        let motion = classifier();
        let mut state = MotionState::Unseen;

        motion.observe(1, &mut state, Some(100.0), 100.0, 0.0);
        motion.observe(1, &mut state, Some(100.0), 100.0, 4.0);
        assert!(state.is_stationary());

        motion.observe(1, &mut state, Some(100.0), 102.0, 5.0);
        assert_eq!(state, MotionState::Unseen);
        assert_eq!(state.still_since(), None);

        // next dwell starts from zero
        motion.observe(1, &mut state, Some(102.0), 102.0, 6.0);
        motion.observe(1, &mut state, Some(102.0), 102.0, 8.0);
        assert!(!state.is_stationary());
        motion.observe(1, &mut state, Some(102.0), 102.0, 9.5);
        assert!(state.is_stationary());
    }

    #[test]
    fn test_threshold_is_inclusive_for_movement() {
        let motion = classifier();
        let mut state = MotionState::Watching { since: 0.0 };

        motion.observe(1, &mut state, Some(10.0), 8.0, 1.0);
        assert_eq!(state, MotionState::Unseen);
    }
}
